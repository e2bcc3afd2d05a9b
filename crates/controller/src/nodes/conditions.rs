//! Condition leaves.
//!
//! Every condition is a pure predicate over the context. A missing blackboard
//! entry reads as `false`.
use agent_core::math::{orientation_to_vector, signed_angle};
use agent_core::{AgentConfig, RotationState, WorldInterface, keys};

use super::{target_house, target_item};
use crate::AgentContext;

// ============================================================================
// Threats
// ============================================================================

/// Agent stands inside a purge zone or within the escape margin around it.
pub fn is_in_purge_zone<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    let Some(agent) = ctx.agent() else {
        return false;
    };
    ctx.model
        .zone_containing(agent.position, AgentConfig::ESCAPE_MARGIN)
        .is_some()
}

pub fn is_enemy_in_view<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    !ctx.model.enemies().is_empty()
}

pub fn has_weapon<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    ctx.inventory.has_weapon()
}

/// Heading is within the aim tolerance of the direction to the target.
pub fn is_aiming_finished<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    let (Some(agent), Some(target)) = (ctx.agent(), ctx.target()) else {
        return false;
    };
    let desired = target - agent.position;
    if desired.length_squared() <= f32::EPSILON {
        return true;
    }
    signed_angle(agent.heading(), desired).abs() < AgentConfig::AIM_TOLERANCE
}

pub fn was_bitten<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    ctx.agent().is_some_and(|agent| agent.was_bitten)
}

/// Still inside the alert window that follows a bite.
pub fn is_under_attack_from_behind<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    ctx.read(keys::ALERT_TIMER)
        .is_some_and(|timer| timer > 0.0 && timer < AgentConfig::ALERT_WINDOW)
}

// ============================================================================
// Items
// ============================================================================

pub fn is_not_visited_item_tracked<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    ctx.model.items().any(|(_, item)| !item.visited)
}

/// Target item is within grab range and was seen this tick.
pub fn is_item_in_grab_range<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    let (Some(agent), Some((_, item))) = (ctx.agent(), target_item(ctx)) else {
        return false;
    };
    item.location().distance(agent.position) <= agent.grab_range && ctx.perception.sees_item(item.entity.hash)
}

pub fn is_item_not_garbage<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    target_item(ctx).is_some_and(|(_, item)| !item.is_garbage())
}

// ============================================================================
// Houses
// ============================================================================

pub fn is_not_visited_house_tracked<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    ctx.model.houses().any(|(_, house)| !house.visited)
}

pub fn is_inside_a_house<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    ctx.agent().is_some_and(|agent| agent.is_in_house)
}

pub fn is_agent_inside_target_house<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    let (Some(agent), Some((_, house))) = (ctx.agent(), target_house(ctx)) else {
        return false;
    };
    agent.is_in_house && house.contains(agent.position)
}

pub fn is_not_visited_search_point_in_house<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    target_house(ctx).is_some_and(|(_, house)| house.has_unvisited_search_point())
}

pub fn is_house_time_budget_exceeded<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    target_house(ctx).is_some_and(|(_, house)| house.time_inside >= ctx.config.house_time_budget)
}

// ============================================================================
// Movement & rotation
// ============================================================================

pub fn has_arrived_at_target<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    let (Some(agent), Some(target)) = (ctx.agent(), ctx.target()) else {
        return false;
    };
    agent.position.distance_squared(target) < AgentConfig::ARRIVAL_RADIUS_SQ
}

/// A sweep is in progress and it was started at the current target.
pub fn is_rotating_here<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    let (Some(state), Some(anchor), Some(target)) = (
        ctx.read(keys::ROTATION_STATE),
        ctx.read(keys::ROTATION_ANCHOR),
        ctx.target(),
    ) else {
        return false;
    };
    state == RotationState::Rotating && anchor.distance_squared(target) < AgentConfig::ARRIVAL_RADIUS_SQ
}

/// Heading has swept clockwise most of the way back to where it started.
///
/// The current heading then sits slightly counter-clockwise of the start:
/// positive cross product, positive dot product.
pub fn is_rotation_completed<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    let (Some(agent), Some(start)) = (ctx.agent(), ctx.read(keys::START_ORIENTATION)) else {
        return false;
    };
    let start = orientation_to_vector(start);
    let current = agent.heading();
    start.perp_dot(current) > AgentConfig::ROTATION_CROSS_THRESHOLD
        && start.dot(current) > AgentConfig::ROTATION_DOT_THRESHOLD
}

pub fn is_rotation_dwell_elapsed<W: WorldInterface>(ctx: &AgentContext<W>) -> bool {
    ctx.read(keys::ROTATION_ELAPSED)
        .is_some_and(|elapsed| elapsed >= AgentConfig::MAX_ROTATION_DWELL)
}

#[cfg(test)]
mod tests {
    use agent_core::{ItemKind, SandboxWorld, SlotCategory};
    use glam::Vec2;

    use super::*;
    use crate::testing::context;

    #[test]
    fn missing_key_reads_as_false() {
        let mut ctx = context(SandboxWorld::default());
        ctx.blackboard = agent_core::Blackboard::new();

        assert!(!has_arrived_at_target(&ctx));
        assert!(!is_under_attack_from_behind(&ctx));
        assert!(!is_rotating_here(&ctx));
    }

    #[test]
    fn enemy_and_weapon_checks() {
        let mut world = SandboxWorld::default();
        world.spawn_enemy(Vec2::new(5.0, 0.0), Vec2::ZERO);
        let mut ctx = context(world);

        assert!(is_enemy_in_view(&ctx));
        assert!(!has_weapon(&ctx));
        ctx.inventory.set(0, SlotCategory::Shotgun);
        assert!(has_weapon(&ctx));
    }

    #[test]
    fn aiming_uses_heading_against_target() {
        let mut ctx = context(SandboxWorld::default());
        ctx.write(keys::TARGET, Vec2::new(10.0, 0.5));
        assert!(is_aiming_finished(&ctx));

        ctx.write(keys::TARGET, Vec2::new(0.0, 10.0));
        assert!(!is_aiming_finished(&ctx));
    }

    #[test]
    fn purge_zone_includes_padding_and_margin() {
        let mut world = SandboxWorld::default();
        // Radius 3 + padding 5 + margin 2 reaches the agent at distance 9.
        world.spawn_purge_zone(Vec2::new(9.0, 0.0), 3.0);
        let ctx = context(world);
        assert!(is_in_purge_zone(&ctx));
    }

    #[test]
    fn grab_range_requires_item_in_view() {
        let mut world = SandboxWorld::default();
        world.spawn_item(ItemKind::Food, Vec2::new(1.0, 0.0), 3);
        let mut ctx = context(world);
        let id = ctx.model.items().next().map(|(id, _)| id).unwrap();
        ctx.write(keys::TARGET_ITEM, Some(id));

        assert!(is_item_in_grab_range(&ctx));
        assert!(is_item_not_garbage(&ctx));

        ctx.perception.items.clear();
        assert!(!is_item_in_grab_range(&ctx));
    }

    #[test]
    fn rotation_completes_near_a_full_clockwise_turn() {
        let mut ctx = context(SandboxWorld::default());
        ctx.write(keys::START_ORIENTATION, 0.0);

        let mut agent = ctx.agent().unwrap();
        for (degrees, expected) in [(-90.0f32, false), (-200.0, false), (-320.0, true), (-355.0, false)] {
            agent.orientation = degrees.to_radians();
            ctx.write(keys::AGENT_INFO, agent);
            assert_eq!(is_rotation_completed(&ctx), expected, "at {degrees} degrees");
        }
    }

    #[test]
    fn stale_rotation_is_not_rotating_here() {
        let mut ctx = context(SandboxWorld::default());
        ctx.write(keys::ROTATION_STATE, RotationState::Rotating);
        ctx.write(keys::ROTATION_ANCHOR, Vec2::new(30.0, 0.0));
        ctx.write(keys::TARGET, Vec2::new(30.5, 0.0));
        assert!(is_rotating_here(&ctx));

        ctx.write(keys::TARGET, Vec2::new(-30.0, 0.0));
        assert!(!is_rotating_here(&ctx));
    }
}
