//! Reusable decision subtrees.
//!
//! Subtrees are organized into three layers:
//!
//! - **Layer 1 (Patterns)**: one condition gating one or two actions
//! - **Layer 2 (Tactics)**: goal-oriented behaviors combining patterns
//! - **Layer 3 (Strategies)**: priority ordering of tactics
//!
//! # Architecture
//!
//! ```text
//! Layer 3 (strategies)
//!     └─ scavenger()
//!         ├─ consume_when_hurt()          ← Layer 1 (always succeeds)
//!         ├─ purge_zone_escape()          ← Layer 1
//!         ├─ combat()                     ← Layer 2
//!         │   ├─ shoot_when_aimed()       ← Layer 1
//!         │   └─ evade_enemy()            ← Layer 1
//!         ├─ alert_response()             ← Layer 1
//!         ├─ item_collection()            ← Layer 2
//!         ├─ house_search()               ← Layer 2
//!         │   └─ search_point_sweep()     ← Layer 2
//!         ├─ leave_house()                ← Layer 1
//!         ├─ explore()                    ← Layer 1
//!         └─ wander_fallback()            ← Layer 1
//! ```
pub mod patterns;
pub mod strategies;
pub mod tactics;

use agent_core::WorldInterface;
use behavior_tree::{Behavior, Status, action, condition};

use crate::AgentContext;

/// Boxed tree node over the agent context.
///
/// All subtree functions return this type for consistency.
pub type Node<W> = Box<dyn Behavior<AgentContext<W>>>;

/// Condition leaf over the agent context.
pub(crate) fn check<W: WorldInterface + 'static>(
    name: &'static str,
    predicate: fn(&AgentContext<W>) -> bool,
) -> Node<W> {
    condition(name, predicate)
}

/// Action leaf over the agent context.
pub(crate) fn act<W: WorldInterface + 'static>(
    name: &'static str,
    func: fn(&mut AgentContext<W>) -> Status,
) -> Node<W> {
    action(name, func)
}
