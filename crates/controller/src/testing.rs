//! Fixtures shared by node unit tests.
use agent_core::{AgentConfig, SandboxWorld};

use crate::AgentContext;

/// Context over `world` with one perception pass already applied.
pub(crate) fn context(world: SandboxWorld) -> AgentContext<SandboxWorld> {
    let mut ctx = AgentContext::new(world, AgentConfig::default()).expect("sandbox context");
    ctx.perceive(0.0);
    ctx
}
