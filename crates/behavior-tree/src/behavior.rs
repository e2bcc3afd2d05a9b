//! The node trait shared by every leaf, composite and decorator.

use crate::Status;

/// One node of a tree evaluated against a context `C`.
///
/// `C` is whatever the controller hands in each frame; for the scavenger it
/// bundles the world handle, the blackboard and the steering set. Nodes are
/// immutable after construction, so all per-frame state lives in `C`.
pub trait Behavior<C>: Send + Sync {
    /// Runs this node once and reports the outcome.
    fn tick(&self, ctx: &mut C) -> Status;

    /// Short label used in trace output.
    fn name(&self) -> &'static str {
        "node"
    }
}

impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}
