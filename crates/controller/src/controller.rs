//! Per-frame orchestration.
use agent_core::{AgentConfig, Blackboard, Inventory, SteeringCommand, WorldInterface, WorldModel};
use behavior_tree::{BehaviorTree, Status};
use tracing::{debug, info};

use crate::context::AgentContext;
use crate::error::ControllerError;
use crate::subtrees::strategies;

/// Drives one agent: perception in, one steering command out per tick.
pub struct Controller<W: WorldInterface + 'static> {
    ctx: AgentContext<W>,
    tree: BehaviorTree<AgentContext<W>>,
}

impl<W: WorldInterface + 'static> Controller<W> {
    /// Queries inventory capacity and world bounds, registers the steering
    /// behaviors and blackboard keys, and builds the scavenger tree.
    pub fn new(world: W, config: AgentConfig) -> Result<Self, ControllerError> {
        let ctx = AgentContext::new(world, config)?;
        let tree = BehaviorTree::new(strategies::scavenger());
        info!(
            capacity = ctx.inventory.capacity(),
            cells = ctx.model.grid().len(),
            "controller ready"
        );
        Ok(Self { ctx, tree })
    }

    /// Runs one frame and returns the command for the host to apply.
    ///
    /// Never fails; a tick in which no steering could be evaluated yields a
    /// zero command.
    pub fn tick(&mut self, dt: f32) -> SteeringCommand {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let agent = self.ctx.perceive(dt);
        let status = self.tree.tick(&mut self.ctx);
        debug!(tick = self.tree.ticks(), ?status, "decision tree ticked");
        self.ctx.steering_command(&agent)
    }

    /// Draws the controller's internal state through the world interface.
    pub fn render_debug(&mut self) {
        crate::debug::render(&mut self.ctx);
    }

    // ===== accessors =====

    pub fn world(&self) -> &W {
        &self.ctx.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.ctx.world
    }

    pub fn model(&self) -> &WorldModel {
        &self.ctx.model
    }

    pub fn inventory(&self) -> &Inventory {
        &self.ctx.inventory
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.ctx.blackboard
    }

    pub fn last_status(&self) -> Option<Status> {
        self.tree.last_status()
    }

    pub fn ticks(&self) -> u64 {
        self.tree.ticks()
    }

    pub fn context(&self) -> &AgentContext<W> {
        &self.ctx
    }
}

#[cfg(test)]
mod tests {
    use agent_core::{SandboxWorld, keys};

    use super::*;

    #[test]
    fn tick_always_selects_a_steering_behavior() {
        let mut controller = Controller::new(SandboxWorld::default(), AgentConfig::default()).unwrap();
        assert_eq!(controller.last_status(), None);

        for _ in 0..20 {
            let command = controller.tick(0.1);
            controller.world_mut().step(&command, 0.1);
            assert!(controller.blackboard().get(keys::CURRENT_STEERING).unwrap().is_some());
        }
        assert_eq!(controller.last_status(), Some(Status::Success));
        assert_eq!(controller.ticks(), 20);
    }

    #[test]
    fn invalid_dt_is_treated_as_zero() {
        let mut controller = Controller::new(SandboxWorld::default(), AgentConfig::default()).unwrap();
        controller.tick(f32::NAN);
        controller.tick(-1.0);
        assert_eq!(controller.blackboard().get(keys::DELTA_TIME), Ok(0.0));
    }

    #[test]
    fn render_debug_only_draws() {
        let mut controller = Controller::new(SandboxWorld::default(), AgentConfig::default()).unwrap();
        controller.tick(0.1);
        let before = controller.world().agent_info();
        controller.render_debug();

        assert!(controller.world().calls().draw > 0);
        assert_eq!(controller.world().agent_info(), before);
        assert_eq!(controller.world().calls().inventory_add, 0);
    }
}
