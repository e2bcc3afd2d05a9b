//! Target selection.
//!
//! Every action here writes a nav-mesh-snapped point to the `Target` key and
//! fails when there is nothing to target. Nearest-candidate searches keep the
//! first candidate on ties.
use agent_core::{AgentConfig, WorldInterface, keys};
use behavior_tree::Status;
use tracing::debug;

use crate::AgentContext;
use crate::nodes::target_house;

pub fn set_closest_item_as_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(agent) = ctx.agent() else {
        return Status::Failure;
    };
    let Some(id) = ctx.model.closest_unvisited_item(agent.position) else {
        return Status::Failure;
    };
    let Some(location) = ctx.model.item(id).map(|item| item.location()) else {
        return Status::Failure;
    };
    ctx.write(keys::TARGET_ITEM, Some(id));
    ctx.set_target(location).into()
}

/// Targets the closest enemy in view and remembers its velocity for evasion.
///
/// Facing a visible enemy supersedes the attack-from-behind alert.
pub fn set_closest_enemy_as_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(agent) = ctx.agent() else {
        return Status::Failure;
    };
    let Some(enemy) = ctx.model.closest_enemy(agent.position).copied() else {
        return Status::Failure;
    };
    ctx.write(keys::TARGET_VELOCITY, enemy.info.linear_velocity);
    ctx.write(keys::ALERT_TIMER, 0.0);
    ctx.set_target(enemy.info.location).into()
}

pub fn set_closest_not_visited_house_as_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(agent) = ctx.agent() else {
        return Status::Failure;
    };
    let Some(id) = ctx.model.closest_unvisited_house(agent.position) else {
        return Status::Failure;
    };
    let Some(center) = ctx.model.house(id).map(|house| house.center) else {
        return Status::Failure;
    };
    if ctx.read(keys::TARGET_HOUSE).flatten() != Some(id) {
        debug!(?center, "new target house");
        ctx.write(keys::TARGET_HOUSE, Some(id));
        ctx.write(keys::TARGET_SEARCH_POINT, None);
    }
    ctx.set_target(center).into()
}

pub fn set_closest_not_visited_search_point_as_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(agent) = ctx.agent() else {
        return Status::Failure;
    };
    let Some((index, position)) = target_house(ctx).and_then(|(_, house)| {
        let index = house.closest_unvisited_search_point(agent.position)?;
        Some((index, house.search_points[index].position))
    }) else {
        return Status::Failure;
    };
    ctx.write(keys::TARGET_SEARCH_POINT, Some(index));
    ctx.set_target(position).into()
}

pub fn set_target_house_door_as_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(door) = target_house(ctx).map(|(_, house)| house.door_location) else {
        return Status::Failure;
    };
    ctx.set_target(door).into()
}

/// Picks the next exploration cell from the influence grid.
pub fn set_best_cell_as_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(agent) = ctx.agent() else {
        return Status::Failure;
    };
    let grid = ctx.model.grid();
    let best = grid
        .best_target(
            agent.position,
            ctx.config.local_influence_threshold,
            ctx.config.min_wide_influence,
        )
        .and_then(|index| grid.cell(index));
    let Some(position) = best.map(|cell| cell.position) else {
        debug!("every grid cell visited");
        return Status::Failure;
    };
    ctx.set_target(position).into()
}

/// Targets the closest point outside the purge zone the agent stands in.
pub fn set_purge_zone_escape_as_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(agent) = ctx.agent() else {
        return Status::Failure;
    };
    let escape = ctx
        .model
        .zone_containing(agent.position, AgentConfig::ESCAPE_MARGIN)
        .and_then(|id| ctx.model.zone(id))
        .map(|zone| zone.escape_point(agent.position, AgentConfig::ESCAPE_MARGIN * 2.0));
    let Some(escape) = escape else {
        return Status::Failure;
    };
    ctx.set_target(escape).into()
}

pub fn set_threat_position_as_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(threat) = ctx.read(keys::THREAT_POSITION) else {
        return Status::Failure;
    };
    ctx.set_target(threat).into()
}
