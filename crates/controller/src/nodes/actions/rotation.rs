//! Rotation sweep state machine: `NotRotating -> Rotating -> Completed`,
//! then back to `NotRotating` once the search point is marked.
use agent_core::{RotationState, WorldInterface, keys};
use behavior_tree::Status;
use tracing::debug;

use crate::AgentContext;

/// Starts a sweep at the current target from the current heading.
pub fn initialize_rotating<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let (Some(agent), Some(target)) = (ctx.agent(), ctx.target()) else {
        return Status::Failure;
    };
    let written = ctx.write(keys::START_ORIENTATION, agent.orientation)
        && ctx.write(keys::ROTATION_ANCHOR, target)
        && ctx.write(keys::ROTATION_ELAPSED, 0.0)
        && ctx.write(keys::ROTATION_STATE, RotationState::Rotating);
    if written {
        debug!(anchor = ?target, orientation = agent.orientation, "rotation sweep started");
    }
    written.into()
}

pub fn set_rotation_completed<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    ctx.write(keys::ROTATION_STATE, RotationState::Completed).into()
}

pub fn reset_rotation<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let written = ctx.write(keys::ROTATION_STATE, RotationState::NotRotating)
        && ctx.write(keys::ROTATION_ELAPSED, 0.0);
    written.into()
}
