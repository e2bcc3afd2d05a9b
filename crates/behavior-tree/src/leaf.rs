//! Leaf behavior nodes.
//!
//! Leaves are where domain logic plugs into the tree. An [`Action`] runs a
//! function that may mutate the context and reports a [`Status`]; a
//! [`Conditional`] evaluates a predicate over a shared borrow of the context,
//! so it cannot change state that later conditionals in the same tick read.

use crate::{Behavior, Status};

/// Runs a function against the context and returns its status.
pub struct Action<C> {
    name: &'static str,
    func: fn(&mut C) -> Status,
}

impl<C> Action<C> {
    pub fn new(name: &'static str, func: fn(&mut C) -> Status) -> Self {
        Self { name, func }
    }
}

impl<C> Behavior<C> for Action<C> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (self.func)(ctx)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Maps a predicate over the context to `Success` (true) or `Failure` (false).
pub struct Conditional<C> {
    name: &'static str,
    predicate: fn(&C) -> bool,
}

impl<C> Conditional<C> {
    pub fn new(name: &'static str, predicate: fn(&C) -> bool) -> Self {
        Self { name, predicate }
    }
}

impl<C> Behavior<C> for Conditional<C> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from((self.predicate)(ctx))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
