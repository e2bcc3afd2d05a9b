//! Steering selection.
//!
//! Each action retargets the primitives involved at the current `Target`
//! and stores the behavior handle in `CurrentSteering`. Combinators take no
//! target of their own; their children are retargeted instead.
use agent_core::{AgentError, Key, SteeringId, TargetData, WorldInterface, keys};
use behavior_tree::Status;
use tracing::warn;

use crate::AgentContext;

/// Retargets every primitive in `primitives` at `Target`, then selects `handle`.
fn select<W: WorldInterface>(
    ctx: &mut AgentContext<W>,
    primitives: &[Key<SteeringId>],
    handle: Key<SteeringId>,
) -> Status {
    let Some(target) = ctx.target() else {
        return Status::Failure;
    };
    for primitive in primitives {
        if !ctx.retarget(*primitive, target) {
            return Status::Failure;
        }
    }
    ctx.use_steering(handle)
}

pub fn change_to_seek_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    select(ctx, &[keys::SEEK], keys::SEEK)
}

pub fn change_to_arrive_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    select(ctx, &[keys::ARRIVE], keys::ARRIVE)
}

pub fn change_to_face_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    select(ctx, &[keys::FACE], keys::FACE)
}

pub fn change_to_seek_and_face_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    select(ctx, &[keys::SEEK, keys::FACE], keys::SEEK_AND_FACE)
}

/// Moves away from the target while keeping it in view.
pub fn change_to_flee_and_face_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    select(ctx, &[keys::FLEE, keys::FACE], keys::FLEE_AND_FACE)
}

/// Turns toward the target before walking to it.
pub fn change_to_face_and_seek_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    select(ctx, &[keys::FACE, keys::SEEK], keys::FACE_AND_SEEK)
}

/// Blended seek toward the target with a little wander.
pub fn change_to_explore_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    select(ctx, &[keys::SEEK], keys::EXPLORE)
}

/// Seeks the target with run mode requested.
pub fn change_to_run_to_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let status = select(ctx, &[keys::SEEK], keys::SEEK);
    if status.is_success() {
        ctx.write(keys::RUN_MODE, true);
    }
    status
}

/// Evades the target enemy, predicting it from `TargetVelocity`.
///
/// The evade handle falls back to wandering once the enemy is out of range.
pub fn change_to_evade_target<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let (Some(target), Some(velocity)) = (ctx.target(), ctx.read(keys::TARGET_VELOCITY)) else {
        return Status::Failure;
    };
    let evade = ctx.behaviors.evade;
    if let Err(err) = ctx.steering.set_target(evade, TargetData::moving(target, velocity)) {
        warn!(%err, code = err.error_code(), "steering retarget failed");
        return Status::Failure;
    }
    ctx.use_steering(keys::EVADE)
}

pub fn change_to_wander<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    ctx.use_steering(keys::WANDER)
}

/// Spins clockwise in place while holding position at the target.
pub fn change_to_rotate_clockwise<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    select(ctx, &[keys::ROTATE_CLOCKWISE], keys::ROTATE_CLOCKWISE)
}

#[cfg(test)]
mod tests {
    use agent_core::SandboxWorld;
    use glam::Vec2;

    use super::*;
    use crate::testing::context;

    fn current(ctx: &AgentContext<SandboxWorld>) -> Option<SteeringId> {
        ctx.read(keys::CURRENT_STEERING).flatten()
    }

    #[test]
    fn combinators_retarget_their_children() {
        let mut ctx = context(SandboxWorld::default());
        ctx.write(keys::TARGET, Vec2::new(0.0, 12.0));

        assert_eq!(change_to_seek_and_face_target(&mut ctx), Status::Success);
        assert_eq!(current(&ctx), Some(ctx.behaviors.seek_and_face));
        assert_eq!(ctx.steering.target(ctx.behaviors.seek).map(|t| t.position), Some(Vec2::new(0.0, 12.0)));
        assert_eq!(ctx.steering.target(ctx.behaviors.face).map(|t| t.position), Some(Vec2::new(0.0, 12.0)));
    }

    #[test]
    fn run_to_sets_run_mode() {
        let mut ctx = context(SandboxWorld::default());
        ctx.write(keys::TARGET, Vec2::new(20.0, 0.0));

        assert_eq!(change_to_run_to_target(&mut ctx), Status::Success);
        assert_eq!(current(&ctx), Some(ctx.behaviors.seek));
        assert_eq!(ctx.read(keys::RUN_MODE), Some(true));
    }

    #[test]
    fn evade_uses_the_fallback_handle_and_enemy_velocity() {
        let mut ctx = context(SandboxWorld::default());
        ctx.write(keys::TARGET, Vec2::new(3.0, 0.0));
        ctx.write(keys::TARGET_VELOCITY, Vec2::new(-2.0, 0.0));

        assert_eq!(change_to_evade_target(&mut ctx), Status::Success);
        assert_eq!(current(&ctx), Some(ctx.behaviors.evade_or_wander));
        let target = ctx.steering.target(ctx.behaviors.evade).unwrap();
        assert_eq!(target.linear_velocity, Vec2::new(-2.0, 0.0));

        let agent = ctx.agent().unwrap();
        let command = ctx.steering_command(&agent);
        assert!(command.linear_velocity.x < 0.0);
    }

    #[test]
    fn wander_needs_no_target() {
        let mut ctx = context(SandboxWorld::default());
        ctx.blackboard = agent_core::Blackboard::new();
        assert_eq!(change_to_wander(&mut ctx), Status::Failure);

        let mut ctx = context(SandboxWorld::default());
        assert_eq!(change_to_wander(&mut ctx), Status::Success);
        assert_eq!(current(&ctx), Some(ctx.behaviors.wander));
    }
}
