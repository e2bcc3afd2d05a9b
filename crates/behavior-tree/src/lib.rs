//! Lightweight behavior tree engine for per-frame agent controllers.
//!
//! This library provides a minimal, synchronous behavior tree designed for
//! controllers that are ticked exactly once per simulated frame:
//!
//! - **Single pass**: Every tick evaluates the tree top-down and returns
//! - **Leaves are plain functions**: domain logic plugs in as `fn` pointers
//! - **Read-only conditionals**: predicates only see `&C`
//! - **Traced**: every ticked node reports its name and status at `TRACE`
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure or Running
//! - Leaf nodes: [`Action`], [`Conditional`]
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`]
//! - [`BehaviorTree`]: root wrapper ticked by the controller

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use builder::{action, always_succeed, condition, inverter, selector, sequence};
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysSucceed, Inverter};
pub use leaf::{Action, Conditional};
pub use status::Status;
pub use tree::BehaviorTree;
