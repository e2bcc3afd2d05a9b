//! Common error infrastructure for agent-core.
//!
//! Domain errors (`BlackboardError`, `SteeringError`) live next to the module
//! they guard; this module only provides the shared classification.

/// Severity level of an error, used for logging and recovery decisions.
///
/// - **Recoverable**: the current tick degrades (node fails, zero steering)
///   and the next tick may succeed
/// - **Internal**: state inconsistency that indicates a bug in the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    Recoverable,
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all agent-core errors.
pub trait AgentError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, useful in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
