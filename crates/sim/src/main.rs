//! Headless simulator.
//!
//! Drives a [`Controller`] against a [`SandboxWorld`] scenario: every frame
//! the controller emits a steering command and the sandbox integrates it.
//!
//! ```bash
//! SIM_TICKS=600 SIM_SCENARIO=scenarios/town.json RUST_LOG=controller=debug cargo run -p sim
//! ```
mod config;

use std::path::Path;

use agent_core::{SandboxWorld, Scenario, SlotCategory, WorldInterface};
use anyhow::{Context, Result};
use config::SimConfig;
use controller::Controller;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let scenario = match &config.scenario {
        Some(path) => load_scenario(path)?,
        None => Scenario::demo(),
    };
    tracing::info!(
        houses = scenario.houses.len(),
        items = scenario.items.len(),
        enemies = scenario.enemies.len(),
        ticks = config.ticks,
        dt = config.dt,
        "starting simulation"
    );

    let world = SandboxWorld::from_scenario(&scenario);
    let mut controller =
        Controller::new(world, config.agent_config()).context("failed to initialize controller")?;

    for tick in 0..config.ticks {
        let command = controller.tick(config.dt);
        controller.world_mut().step(&command, config.dt);
        if config.debug_draw {
            controller.render_debug();
        }

        let agent = controller.world().agent_info();
        if agent.health <= 0.0 {
            tracing::warn!(tick, "agent died");
            break;
        }
        if tick % 100 == 0 {
            tracing::debug!(tick, position = ?agent.position, health = agent.health, energy = agent.energy, "progress");
        }
    }

    report(&controller);
    Ok(())
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid scenario {}", path.display()))
}

/// Setup logging to stderr, or to `<log_dir>/sim.log` when a directory is given.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, "sim.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking_file).with_ansi(false))
        .init();

    tracing::info!("Log file: {}/sim.log", log_dir.display());
    Ok(Some(guard))
}

fn report<W: WorldInterface>(controller: &Controller<W>) {
    let model = controller.model();
    let searched = model.houses().filter(|(_, house)| house.visited).count();
    let held: Vec<String> = controller
        .inventory()
        .iter()
        .filter(|(_, category)| *category != SlotCategory::Empty)
        .map(|(_, category)| category.to_string())
        .collect();
    let agent = controller.world().agent_info();

    tracing::info!(
        ticks = controller.ticks(),
        houses = model.house_count(),
        searched,
        unexplored_cells = model.grid().unvisited_count(),
        inventory = ?held,
        health = agent.health,
        energy = agent.energy,
        "simulation finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_scenario_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios/town.json");
        let scenario = load_scenario(&path).unwrap();

        assert_eq!(scenario.houses.len(), 3);
        assert_eq!(scenario.inventory_capacity, 4);
        assert_eq!(scenario.items[3].value, 0);
        assert_eq!(scenario.agent.fov_range, agent_core::AgentInfo::default().fov_range);
    }

    #[test]
    fn default_config_is_usable() {
        let config = SimConfig::default();
        assert!(config.dt > 0.0);
        assert_eq!(config.agent_config().seed, agent_core::AgentConfig::DEFAULT_SEED);
    }
}
