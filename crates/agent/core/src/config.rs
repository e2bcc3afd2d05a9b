use serde::{Deserialize, Serialize};

use crate::steering::WanderMode;

/// Agent configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Seed for the wander jitter generator.
    pub seed: u64,
    /// Edge length of one exploration grid cell.
    pub grid_cell_size: f32,
    /// Minimum influence a neighbouring cell needs to be preferred locally.
    pub local_influence_threshold: f32,
    /// Minimum influence for a cell anywhere on the grid to be preferred.
    pub min_wide_influence: f32,

    pub arrive_stop_distance: f32,
    pub arrive_slow_radius: f32,
    pub face_stop_angle: f32,
    pub face_slow_angle: f32,
    pub wander_offset: f32,
    pub wander_radius: f32,
    /// Maximum wander angle change per tick, in radians.
    pub wander_max_angle_change: f32,
    pub wander_mode: WanderMode,
    pub evade_radius: f32,
    pub explore_seek_weight: f32,
    pub explore_wander_weight: f32,

    /// Extra radius added to every sighted purge zone.
    pub purge_zone_padding: f32,
    /// Seconds a purge zone is assumed to stay active after its last sighting.
    pub purge_zone_lifetime: f32,
    /// Seconds the agent may spend inside one house before it is marked visited.
    pub house_time_budget: f32,
}

impl AgentConfig {
    // ===== compile-time constants =====
    pub const MAX_INVENTORY_SLOTS: usize = 8;
    /// Upper bound of health and energy.
    pub const MAX_STAT: f32 = 10.0;
    /// Consumables are only used below this value.
    pub const STAT_BUFFER: f32 = 9.0;
    pub const HOUSE_REVISIT_COOLDOWN: f32 = 300.0;
    /// Seconds the agent keeps reacting after a bite.
    pub const ALERT_WINDOW: f32 = 4.0;
    /// Squared distance under which a target counts as reached.
    pub const ARRIVAL_RADIUS_SQ: f32 = 4.0;
    /// Heading error (radians) under which the agent is considered aimed.
    pub const AIM_TOLERANCE: f32 = 0.1;
    pub const ROTATION_CROSS_THRESHOLD: f32 = 0.2;
    pub const ROTATION_DOT_THRESHOLD: f32 = 0.5;
    /// Seconds spent rotating at one search point before giving up on the sweep.
    pub const MAX_ROTATION_DWELL: f32 = 6.0;
    /// Shotgun band as fractions of the squared field-of-view range.
    pub const SHOTGUN_BAND: (f32, f32) = (0.2, 0.7);
    /// Distance behind the agent at which an unseen attacker is assumed.
    pub const THREAT_DISTANCE: f32 = 100.0;
    /// Distance kept from a purge zone border when escaping it.
    pub const ESCAPE_MARGIN: f32 = 2.0;
    /// Factor by which the entry offset is pushed out to find the door target.
    pub const DOOR_PUSH: f32 = 10.0;
    /// Maximum FOV entries scanned per query before iteration stops.
    pub const MAX_FOV_ENTRIES: usize = 256;
    /// Upper bound on exploration grid cells; larger worlds are rejected.
    pub const MAX_GRID_CELLS: usize = 1 << 22;
    /// Maximum nesting depth of steering combinators.
    pub const MAX_COMPOSITION_DEPTH: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 36;
    pub const DEFAULT_GRID_CELL_SIZE: f32 = 30.0;
    pub const DEFAULT_LOCAL_INFLUENCE_THRESHOLD: f32 = 0.3;
    pub const DEFAULT_MIN_WIDE_INFLUENCE: f32 = 0.6;
    pub const DEFAULT_PURGE_ZONE_PADDING: f32 = 5.0;
    pub const DEFAULT_PURGE_ZONE_LIFETIME: f32 = 10.0;
    pub const DEFAULT_HOUSE_TIME_BUDGET: f32 = 60.0;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            grid_cell_size: Self::DEFAULT_GRID_CELL_SIZE,
            local_influence_threshold: Self::DEFAULT_LOCAL_INFLUENCE_THRESHOLD,
            min_wide_influence: Self::DEFAULT_MIN_WIDE_INFLUENCE,
            arrive_stop_distance: 2.0,
            arrive_slow_radius: 15.0,
            face_stop_angle: 0.1,
            face_slow_angle: 0.5,
            wander_offset: 6.0,
            wander_radius: 6.0,
            wander_max_angle_change: 45f32.to_radians(),
            wander_mode: WanderMode::Jitter,
            evade_radius: 10.0,
            explore_seek_weight: 0.85,
            explore_wander_weight: 0.15,
            purge_zone_padding: Self::DEFAULT_PURGE_ZONE_PADDING,
            purge_zone_lifetime: Self::DEFAULT_PURGE_ZONE_LIFETIME,
            house_time_budget: Self::DEFAULT_HOUSE_TIME_BUDGET,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_grid_cell_size(mut self, grid_cell_size: f32) -> Self {
        self.grid_cell_size = grid_cell_size;
        self
    }

    pub fn with_wander_mode(mut self, wander_mode: WanderMode) -> Self {
        self.wander_mode = wander_mode;
        self
    }

    pub fn with_house_time_budget(mut self, house_time_budget: f32) -> Self {
        self.house_time_budget = house_time_budget;
        self
    }

    pub fn with_purge_zone_lifetime(mut self, purge_zone_lifetime: f32) -> Self {
        self.purge_zone_lifetime = purge_zone_lifetime;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
