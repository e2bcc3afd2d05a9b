//! House bookkeeping.
use agent_core::{AgentConfig, WorldInterface, keys};
use behavior_tree::Status;
use tracing::{debug, info};

use crate::AgentContext;

/// Records where the agent entered the target house.
///
/// The entry point is pushed outward from the center so that seeking the
/// door later walks the agent out of the house. Only the first entry counts.
pub fn update_door_location<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let (Some(agent), Some(id)) = (ctx.agent(), ctx.read(keys::TARGET_HOUSE).flatten()) else {
        return Status::Failure;
    };
    let Some(house) = ctx.model.house_mut(id) else {
        return Status::Failure;
    };
    if !house.has_door() {
        house.door_location = house.center + (agent.position - house.center) * AgentConfig::DOOR_PUSH;
        debug!(door = ?house.door_location, "door location recorded");
    }
    Status::Success
}

pub fn mark_search_point_as_visited<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let (Some(id), Some(index)) = (
        ctx.read(keys::TARGET_HOUSE).flatten(),
        ctx.read(keys::TARGET_SEARCH_POINT).flatten(),
    ) else {
        return Status::Failure;
    };
    let Some(point) = ctx.model.house_mut(id).and_then(|house| house.search_points.get_mut(index)) else {
        return Status::Failure;
    };
    point.visited = true;
    ctx.write(keys::TARGET_SEARCH_POINT, None).into()
}

pub fn mark_house_as_visited<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(id) = ctx.read(keys::TARGET_HOUSE).flatten() else {
        return Status::Failure;
    };
    let Some(house) = ctx.model.house_mut(id) else {
        return Status::Failure;
    };
    house.mark_visited();
    info!(center = ?house.center, time_inside = house.time_inside, "house searched");
    Status::Success
}

#[cfg(test)]
mod tests {
    use agent_core::SandboxWorld;
    use glam::Vec2;

    use super::*;
    use crate::nodes::actions::set_closest_not_visited_house_as_target;
    use crate::nodes::conditions::is_not_visited_search_point_in_house;
    use crate::testing::context;

    fn inside_house() -> AgentContext<SandboxWorld> {
        let mut world = SandboxWorld::default();
        world.add_house(Vec2::new(2.0, 0.0), Vec2::new(10.0, 10.0));
        let mut ctx = context(world);
        set_closest_not_visited_house_as_target(&mut ctx);
        ctx
    }

    #[test]
    fn door_is_recorded_once_and_pushed_outward() {
        let mut ctx = inside_house();
        assert_eq!(update_door_location(&mut ctx), Status::Success);
        let door = ctx.model.houses().next().map(|(_, house)| house.door_location).unwrap();
        assert_eq!(door, Vec2::new(2.0 - 2.0 * AgentConfig::DOOR_PUSH, 0.0));

        ctx.world.agent_mut().position = Vec2::new(4.0, 4.0);
        ctx.perceive(0.1);
        update_door_location(&mut ctx);
        let again = ctx.model.houses().next().map(|(_, house)| house.door_location).unwrap();
        assert_eq!(again, door);
    }

    #[test]
    fn marking_the_only_search_point_finishes_the_sweep() {
        let mut ctx = inside_house();
        assert!(is_not_visited_search_point_in_house(&ctx));
        ctx.write(keys::TARGET_SEARCH_POINT, Some(0));

        assert_eq!(mark_search_point_as_visited(&mut ctx), Status::Success);
        assert!(!is_not_visited_search_point_in_house(&ctx));
        assert_eq!(ctx.read(keys::TARGET_SEARCH_POINT), Some(None));
        assert_eq!(mark_search_point_as_visited(&mut ctx), Status::Failure);
    }

    #[test]
    fn marking_the_house_removes_it_from_candidates() {
        let mut ctx = inside_house();
        assert_eq!(mark_house_as_visited(&mut ctx), Status::Success);
        assert_eq!(set_closest_not_visited_house_as_target(&mut ctx), Status::Failure);
    }
}
