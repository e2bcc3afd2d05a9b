//! Steering behaviors and their combinators.
mod combinators;
mod output;
mod primitives;
mod set;

pub use combinators::{AddedSteering, BlendedSteering, PrioritySteering, WeightedBehavior, add, blend};
pub use output::{SteeringCommand, SteeringFlags, SteeringOutput, TargetData};
pub use primitives::{Arrive, Evade, Face, Flee, Pursuit, RotateClockwise, Seek, Wander, WanderMode};
pub use set::{SteeringBehavior, SteeringId, SteeringSet};

use crate::error::{AgentError, ErrorSeverity};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SteeringError {
    #[error("{0} is not registered")]
    UnknownBehavior(SteeringId),

    #[error("{0} is a combinator and has no target")]
    TargetOnCombinator(SteeringId),

    #[error("{0} exceeds the maximum composition depth")]
    CompositionTooDeep(SteeringId),
}

impl AgentError for SteeringError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TargetOnCombinator(_) => ErrorSeverity::Recoverable,
            Self::UnknownBehavior(_) | Self::CompositionTooDeep(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownBehavior(_) => "STEERING_UNKNOWN_BEHAVIOR",
            Self::TargetOnCombinator(_) => "STEERING_TARGET_ON_COMBINATOR",
            Self::CompositionTooDeep(_) => "STEERING_COMPOSITION_TOO_DEEP",
        }
    }
}
