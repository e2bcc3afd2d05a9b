//! Single-child wrappers.
//!
//! [`Inverter`] turns "has no weapon" style checks out of their positive
//! counterparts, and [`AlwaysSucceed`] lets a side step (consume a medkit,
//! shoot when aimed) run without vetoing the branch it sits in.

use crate::{Behavior, Status};

/// Swaps `Success` and `Failure`; `Running` is reported as is.
pub struct Inverter<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> Inverter<C> {
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }

    fn name(&self) -> &'static str {
        "inverter"
    }
}

/// Ticks the child for its side effects and reports `Success`.
///
/// The child's own status is discarded, including `Running`.
pub struct AlwaysSucceed<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> AlwaysSucceed<C> {
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.child.tick(ctx);
        Status::Success
    }

    fn name(&self) -> &'static str {
        "always_succeed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Conditional};

    #[derive(Default)]
    struct Medic {
        health: u32,
        medkits: u32,
        attempts: u32,
    }

    fn is_hurt(m: &Medic) -> bool {
        m.health < 50
    }

    fn use_medkit(m: &mut Medic) -> Status {
        m.attempts += 1;
        if m.medkits == 0 {
            return Status::Failure;
        }
        m.medkits -= 1;
        m.health = 100;
        Status::Success
    }

    fn still_healing(_: &mut Medic) -> Status {
        Status::Running
    }

    #[test]
    fn inverter_negates_a_check() {
        let healthy = Inverter::new(Box::new(Conditional::new("is_hurt", is_hurt)));

        let mut hurt = Medic { health: 10, ..Default::default() };
        assert_eq!(healthy.tick(&mut hurt), Status::Failure);

        let mut fine = Medic { health: 90, ..Default::default() };
        assert_eq!(healthy.tick(&mut fine), Status::Success);
    }

    #[test]
    fn inverter_keeps_running() {
        let node = Inverter::new(Box::new(Action::new("heal", still_healing)));
        assert_eq!(node.tick(&mut Medic::default()), Status::Running);
    }

    #[test]
    fn always_succeed_hides_a_failed_side_step() {
        let node = AlwaysSucceed::new(Box::new(Action::new("use_medkit", use_medkit)));
        let mut medic = Medic { health: 10, ..Default::default() };

        assert_eq!(node.tick(&mut medic), Status::Success);
        assert_eq!(medic.attempts, 1);
        assert_eq!(medic.health, 10);

        medic.medkits = 1;
        assert_eq!(node.tick(&mut medic), Status::Success);
        assert_eq!(medic.health, 100);
        assert_eq!(medic.medkits, 0);
    }

    #[test]
    fn always_succeed_swallows_running() {
        let node = AlwaysSucceed::new(Box::new(Action::new("heal", still_healing)));
        assert_eq!(node.tick(&mut Medic::default()), Status::Success);
        assert_eq!(node.name(), "always_succeed");
    }
}
