//! Multi-child nodes.
//!
//! A decision policy is a [`Selector`] of fallbacks, each usually a
//! [`Sequence`] of guards followed by the action they unlock. Both stop at
//! the first child that answers `Running`.

use tracing::trace;

use crate::{Behavior, Status};

/// Ticks children in order while they succeed.
///
/// Returns the first non-`Success` status, or `Success` once every child has
/// passed. Children after the stopping point are not ticked.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// # Panics
    ///
    /// On an empty child list; such a sequence would succeed vacuously.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(!children.is_empty(), "sequence needs at least one child");
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.children
            .iter()
            .map(|child| tick_child(child.as_ref(), ctx))
            .find(|status| !status.is_success())
            .unwrap_or(Status::Success)
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

/// Ticks children in order until one does not fail.
///
/// Earlier children have priority: the first `Success` or `Running` wins and
/// `Failure` is returned only when every branch failed.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// # Panics
    ///
    /// On an empty child list.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(!children.is_empty(), "selector needs at least one child");
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.children
            .iter()
            .map(|child| tick_child(child.as_ref(), ctx))
            .find(|status| !status.is_failure())
            .unwrap_or(Status::Failure)
    }

    fn name(&self) -> &'static str {
        "selector"
    }
}

fn tick_child<C>(child: &dyn Behavior<C>, ctx: &mut C) -> Status {
    let status = child.tick(ctx);
    trace!(node = child.name(), ?status, "node ticked");
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Conditional};

    #[derive(Default)]
    struct Scout {
        sees_enemy: bool,
        armed: bool,
        log: Vec<&'static str>,
    }

    fn sees_enemy(s: &Scout) -> bool {
        s.sees_enemy
    }

    fn armed(s: &Scout) -> bool {
        s.armed
    }

    fn shoot(s: &mut Scout) -> Status {
        s.log.push("shoot");
        Status::Success
    }

    fn flee(s: &mut Scout) -> Status {
        s.log.push("flee");
        Status::Success
    }

    fn wander(s: &mut Scout) -> Status {
        s.log.push("wander");
        Status::Success
    }

    fn reload(s: &mut Scout) -> Status {
        s.log.push("reload");
        Status::Running
    }

    fn leaf_check(name: &'static str, f: fn(&Scout) -> bool) -> Box<dyn Behavior<Scout>> {
        Box::new(Conditional::new(name, f))
    }

    fn leaf_act(name: &'static str, f: fn(&mut Scout) -> Status) -> Box<dyn Behavior<Scout>> {
        Box::new(Action::new(name, f))
    }

    fn policy() -> Selector<Scout> {
        Selector::new(vec![
            Box::new(Sequence::new(vec![
                leaf_check("sees_enemy", sees_enemy),
                leaf_check("armed", armed),
                leaf_act("shoot", shoot),
            ])),
            Box::new(Sequence::new(vec![
                leaf_check("sees_enemy", sees_enemy),
                leaf_act("flee", flee),
            ])),
            leaf_act("wander", wander),
        ])
    }

    #[test]
    fn first_passing_branch_wins() {
        let mut scout = Scout {
            sees_enemy: true,
            armed: true,
            ..Default::default()
        };
        assert_eq!(policy().tick(&mut scout), Status::Success);
        assert_eq!(scout.log, ["shoot"]);
    }

    #[test]
    fn failed_guard_falls_through() {
        let mut scout = Scout {
            sees_enemy: true,
            ..Default::default()
        };
        assert_eq!(policy().tick(&mut scout), Status::Success);
        assert_eq!(scout.log, ["flee"]);

        let mut idle = Scout::default();
        policy().tick(&mut idle);
        assert_eq!(idle.log, ["wander"]);
    }

    #[test]
    fn sequence_stops_on_running() {
        let seq = Sequence::new(vec![leaf_act("reload", reload), leaf_act("shoot", shoot)]);
        let mut scout = Scout::default();

        assert_eq!(seq.tick(&mut scout), Status::Running);
        assert_eq!(scout.log, ["reload"]);
    }

    #[test]
    fn selector_stops_on_running() {
        let sel = Selector::new(vec![
            leaf_check("armed", armed),
            leaf_act("reload", reload),
            leaf_act("wander", wander),
        ]);
        let mut scout = Scout::default();

        assert_eq!(sel.tick(&mut scout), Status::Running);
        assert_eq!(scout.log, ["reload"]);
    }

    #[test]
    fn selector_fails_when_every_branch_fails() {
        let sel = Selector::new(vec![leaf_check("armed", armed), leaf_check("sees_enemy", sees_enemy)]);
        assert_eq!(sel.tick(&mut Scout::default()), Status::Failure);
    }
}
