//! Free functions returning boxed nodes, so trees read as nested calls:
//!
//! ```
//! use behavior_tree::{action, condition, selector, sequence, Behavior, Status};
//!
//! struct Agent { armed: bool, shots: u32 }
//!
//! let tree = selector(vec![
//!     sequence(vec![
//!         condition("armed", |a: &Agent| a.armed),
//!         action("shoot", |a: &mut Agent| { a.shots += 1; Status::Success }),
//!     ]),
//!     action("flee", |_: &mut Agent| Status::Success),
//! ]);
//!
//! let mut agent = Agent { armed: true, shots: 0 };
//! assert_eq!(tree.tick(&mut agent), Status::Success);
//! assert_eq!(agent.shots, 1);
//! ```

use crate::{Action, AlwaysSucceed, Behavior, Conditional, Inverter, Selector, Sequence, Status};

pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

pub fn selector<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(children))
}

pub fn action<C: 'static>(name: &'static str, func: fn(&mut C) -> Status) -> Box<dyn Behavior<C>> {
    Box::new(Action::new(name, func))
}

pub fn condition<C: 'static>(name: &'static str, predicate: fn(&C) -> bool) -> Box<dyn Behavior<C>> {
    Box::new(Conditional::new(name, predicate))
}

pub fn inverter<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(Inverter::new(child))
}

pub fn always_succeed<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(AlwaysSucceed::new(child))
}
