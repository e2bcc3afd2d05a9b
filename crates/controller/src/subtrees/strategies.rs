//! Layer 3: strategic decision-making.
//!
//! A strategy orders tactics by priority; the first one that applies this
//! tick decides the steering.
use agent_core::WorldInterface;
use behavior_tree::{selector, sequence};

use super::{Node, patterns, tactics};

/// Full scavenger policy.
///
/// Consumables are handled first on every tick. Then, by priority:
/// 1. escape purge zones (running)
/// 2. fight or evade visible enemies
/// 3. back away from an unseen attacker
/// 4. collect items
/// 5. search houses
/// 6. leave a searched house
/// 7. explore the influence grid
/// 8. wander
pub fn scavenger<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        patterns::consume_when_hurt(),
        selector(vec![
            patterns::purge_zone_escape(),
            tactics::combat(),
            patterns::alert_response(),
            tactics::item_collection(),
            tactics::house_search(),
            patterns::leave_house(),
            patterns::explore(),
            patterns::wander_fallback(),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use agent_core::{AgentConfig, SandboxWorld, keys};
    use behavior_tree::{Behavior, Status};
    use glam::Vec2;

    use super::*;
    use crate::testing::context;

    #[test]
    fn empty_world_explores() {
        let mut ctx = context(SandboxWorld::default());
        let tree = scavenger::<SandboxWorld>();

        assert_eq!(tree.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.read(keys::CURRENT_STEERING), Some(Some(ctx.behaviors.explore)));
    }

    #[test]
    fn purge_zone_beats_everything() {
        let mut world = SandboxWorld::default();
        world.spawn_purge_zone(Vec2::new(2.0, 0.0), 3.0);
        world.spawn_enemy(Vec2::new(5.0, 5.0), Vec2::ZERO);
        let mut ctx = context(world);

        assert_eq!(scavenger::<SandboxWorld>().tick(&mut ctx), Status::Success);
        assert_eq!(ctx.read(keys::CURRENT_STEERING), Some(Some(ctx.behaviors.seek)));
        assert_eq!(ctx.read(keys::RUN_MODE), Some(true));
    }

    #[test]
    fn unarmed_agent_evades_visible_enemy() {
        let mut world = SandboxWorld::default();
        world.spawn_enemy(Vec2::new(5.0, 0.0), Vec2::ZERO);
        let mut ctx = context(world);

        scavenger::<SandboxWorld>().tick(&mut ctx);
        assert_eq!(ctx.read(keys::CURRENT_STEERING), Some(Some(ctx.behaviors.evade_or_wander)));
    }

    #[test]
    fn armed_agent_faces_enemy() {
        let mut world = SandboxWorld::default();
        world.give_item(0, agent_core::ItemKind::Pistol, 3);
        world.spawn_enemy(Vec2::new(0.0, 8.0), Vec2::ZERO);
        let mut ctx = context(world);

        scavenger::<SandboxWorld>().tick(&mut ctx);
        assert_eq!(ctx.read(keys::CURRENT_STEERING), Some(Some(ctx.behaviors.face)));
        assert_eq!(ctx.world.calls().inventory_use, 0);
    }

    #[test]
    fn bite_from_behind_triggers_flee_and_face() {
        let mut world = SandboxWorld::default();
        world.agent_mut().was_bitten = true;
        let mut ctx = context(world);
        ctx.perceive(0.1);

        scavenger::<SandboxWorld>().tick(&mut ctx);
        assert_eq!(ctx.read(keys::CURRENT_STEERING), Some(Some(ctx.behaviors.flee_and_face)));
        assert_eq!(ctx.target(), Some(Vec2::new(-AgentConfig::THREAT_DISTANCE, 0.0)));
    }
}
