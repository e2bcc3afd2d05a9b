//! Domain data for the scavenger agent.
//!
//! This crate holds everything the controller reasons about but nothing about
//! *when* it reasons: the world interface the host implements, the typed
//! blackboard, steering primitives and combinators, the inventory slot model
//! and the persistent world model (houses, items, enemies, purge zones and
//! the exploration grid). [`sandbox::SandboxWorld`] is an in-memory world used
//! by tests and the headless simulator.
pub mod blackboard;
pub mod config;
pub mod error;
pub mod inventory;
pub mod math;
pub mod model;
pub mod sandbox;
pub mod steering;
pub mod world;

pub use blackboard::{Blackboard, BlackboardError, BlackboardValue, Key, Value, ValueKind, keys};
pub use config::AgentConfig;
pub use error::{AgentError, ErrorSeverity};
pub use glam::Vec2;
pub use inventory::{Inventory, Placement, SlotCategory};
pub use model::{
    Discoveries, GridCell, House, HouseId, InfluenceGrid, ItemId, PurgeZone, RotationState, SearchPoint,
    TrackedEnemy, TrackedItem, WorldModel, ZoneId,
};
pub use sandbox::{CallCounters, SandboxWorld, Scenario};
pub use steering::{
    SteeringBehavior, SteeringCommand, SteeringError, SteeringFlags, SteeringId, SteeringOutput,
    SteeringSet, TargetData, WanderMode,
};
pub use world::{
    AgentInfo, DebugColor, EnemyInfo, EntityInfo, EntityKind, HouseInfo, ItemInfo, ItemKind,
    PerceptionSnapshot, PurgeZoneInfo, WorldInfo, WorldInterface,
};
