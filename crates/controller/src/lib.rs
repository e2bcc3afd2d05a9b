//! Behavior-tree controller for the scavenger agent.
//!
//! Once per frame [`Controller::tick`] runs a fixed pipeline:
//!
//! 1. snapshot the agent and everything in its field of view
//! 2. fold the snapshot into the world model
//! 3. refresh the blackboard (agent info, timers)
//! 4. tick the decision tree, which picks and retargets a steering behavior
//! 5. evaluate the selected steering behavior into a [`SteeringCommand`]
//!
//! Tree nodes live in [`nodes`]; they are composed into layered subtrees in
//! [`subtrees`] the same way the patterns/tactics/strategies library is
//! organised: small if-then patterns, goal-oriented tactics, and one
//! strategy that orders the tactics by priority.
//!
//! [`SteeringCommand`]: agent_core::SteeringCommand
pub mod context;
pub mod controller;
mod debug;
pub mod error;
pub mod nodes;
pub mod subtrees;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{AgentContext, StandardBehaviors};
pub use controller::Controller;
pub use error::ControllerError;
