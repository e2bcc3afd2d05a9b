use agent_core::{AgentError, BlackboardError, ErrorSeverity};

/// Errors raised while setting up a [`Controller`](crate::Controller).
///
/// Ticking never fails; everything here is detected at initialization.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ControllerError {
    #[error("world reports zero inventory capacity")]
    ZeroInventoryCapacity,

    #[error("world bounds {width}x{height} are degenerate")]
    DegenerateWorldBounds { width: f32, height: f32 },

    #[error("world bounds {width}x{height} are not finite")]
    NonFiniteWorldBounds { width: f32, height: f32 },

    #[error("world bounds {width}x{height} need more than {max} grid cells")]
    WorldTooLarge { width: f32, height: f32, max: usize },

    #[error("blackboard registration failed: {0}")]
    Blackboard(#[from] BlackboardError),
}

impl AgentError for ControllerError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroInventoryCapacity => "CONTROLLER_ZERO_INVENTORY_CAPACITY",
            Self::DegenerateWorldBounds { .. } => "CONTROLLER_DEGENERATE_WORLD_BOUNDS",
            Self::NonFiniteWorldBounds { .. } => "CONTROLLER_NON_FINITE_WORLD_BOUNDS",
            Self::WorldTooLarge { .. } => "CONTROLLER_WORLD_TOO_LARGE",
            Self::Blackboard(_) => "CONTROLLER_BLACKBOARD_REGISTRATION",
        }
    }
}
