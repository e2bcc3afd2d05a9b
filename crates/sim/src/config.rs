//! Simulator configuration read from the environment.
use std::env;
use std::path::PathBuf;

use agent_core::AgentConfig;

/// Headless run configuration.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Number of frames to simulate.
    pub ticks: u64,
    /// Seconds per frame.
    pub dt: f32,
    /// Wander seed handed to the agent.
    pub seed: u64,
    /// JSON scenario file; the built-in demo town when unset.
    pub scenario: Option<PathBuf>,
    /// Directory for `sim.log`; logs go to stderr when unset.
    pub log_dir: Option<PathBuf>,
    /// Call the debug overlay every frame.
    pub debug_draw: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 3000,
            dt: 0.1,
            seed: AgentConfig::DEFAULT_SEED,
            scenario: None,
            log_dir: None,
            debug_draw: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SIM_TICKS` - frames to simulate (default: 3000)
    /// - `SIM_DT` - seconds per frame, must be positive (default: 0.1)
    /// - `SIM_SEED` - wander seed (default: 36)
    /// - `SIM_SCENARIO` - path to a JSON scenario
    /// - `SIM_LOG_DIR` - write logs to `<dir>/sim.log` instead of stderr
    /// - `SIM_DEBUG_DRAW` - `true` to run the debug overlay
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ticks) = read_env::<u64>("SIM_TICKS") {
            config.ticks = ticks;
        }
        if let Some(dt) = read_env::<f32>("SIM_DT").filter(|dt| dt.is_finite() && *dt > 0.0) {
            config.dt = dt;
        }
        if let Some(seed) = read_env::<u64>("SIM_SEED") {
            config.seed = seed;
        }
        config.scenario = read_env::<PathBuf>("SIM_SCENARIO");
        config.log_dir = read_env::<PathBuf>("SIM_LOG_DIR");
        if let Some(debug_draw) = read_env::<bool>("SIM_DEBUG_DRAW") {
            config.debug_draw = debug_draw;
        }

        config
    }

    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig::default().with_seed(self.seed)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
