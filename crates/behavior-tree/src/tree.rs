//! Root wrapper ticked once per frame.

use tracing::trace;

use crate::{Behavior, Status};

/// Owns the root node of a behavior tree and remembers the last result.
pub struct BehaviorTree<C> {
    root: Box<dyn Behavior<C>>,
    last_status: Option<Status>,
    ticks: u64,
}

impl<C> BehaviorTree<C> {
    pub fn new(root: Box<dyn Behavior<C>>) -> Self {
        Self {
            root,
            last_status: None,
            ticks: 0,
        }
    }

    /// Evaluates the whole tree once against `ctx`.
    pub fn tick(&mut self, ctx: &mut C) -> Status {
        let status = self.root.tick(ctx);
        self.last_status = Some(status);
        self.ticks += 1;
        trace!(root = self.root.name(), ?status, tick = self.ticks, "tree ticked");
        status
    }

    /// Status of the most recent tick, `None` before the first one.
    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::builder::{action, condition, selector, sequence};

    struct Ctx {
        armed: bool,
        fired: u32,
        fallback: u32,
    }

    fn is_armed(ctx: &Ctx) -> bool {
        ctx.armed
    }

    fn fire(ctx: &mut Ctx) -> Status {
        ctx.fired += 1;
        Status::Success
    }

    fn fall_back(ctx: &mut Ctx) -> Status {
        ctx.fallback += 1;
        Status::Success
    }

    #[test]
    fn priority_policy_falls_through() {
        let mut tree = BehaviorTree::new(selector(vec![
            sequence(vec![condition("is_armed", is_armed), action("fire", fire)]),
            action("fall_back", fall_back),
        ]));
        let mut ctx = Ctx {
            armed: false,
            fired: 0,
            fallback: 0,
        };

        assert_eq!(tree.last_status(), None);
        assert_eq!(tree.tick(&mut ctx), Status::Success);
        assert_eq!((ctx.fired, ctx.fallback), (0, 1));

        ctx.armed = true;
        tree.tick(&mut ctx);
        assert_eq!((ctx.fired, ctx.fallback), (1, 1));
        assert_eq!(tree.ticks(), 2);
        assert_eq!(tree.last_status(), Some(Status::Success));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn node_names_appear_in_trace_output() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(captured.clone())
            .finish();
        let mut tree = BehaviorTree::new(selector(vec![
            sequence(vec![condition("is_armed", is_armed), action("fire", fire)]),
            action("fall_back", fall_back),
        ]));
        let mut ctx = Ctx {
            armed: true,
            fired: 0,
            fallback: 0,
        };

        tracing::subscriber::with_default(subscriber, || tree.tick(&mut ctx));

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        for label in ["is_armed", "fire", "sequence", "selector"] {
            assert!(output.contains(label), "{label} missing from:\n{output}");
        }
        assert!(!output.contains("fall_back"), "short-circuited branch was traced");
        assert!(output.contains("tree ticked"));
    }
}
