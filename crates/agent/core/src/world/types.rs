use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Read-only snapshot of the controlled agent, refreshed every tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentInfo {
    pub position: Vec2,
    /// Radians, counter-clockwise positive, `0` along `+X`.
    pub orientation: f32,
    pub linear_velocity: Vec2,
    pub max_linear_speed: f32,
    pub max_angular_speed: f32,
    pub health: f32,
    pub energy: f32,
    pub stamina: f32,
    pub fov_range: f32,
    pub grab_range: f32,
    pub was_bitten: bool,
    pub is_in_house: bool,
}

impl AgentInfo {
    pub fn heading(&self) -> Vec2 {
        crate::math::orientation_to_vector(self.orientation)
    }
}

impl Default for AgentInfo {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            orientation: 0.0,
            linear_velocity: Vec2::ZERO,
            max_linear_speed: 10.0,
            max_angular_speed: core::f32::consts::PI,
            health: 10.0,
            energy: 10.0,
            stamina: 10.0,
            fov_range: 20.0,
            grab_range: 3.0,
            was_bitten: false,
            is_in_house: false,
        }
    }
}

/// Axis-aligned world bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldInfo {
    pub center: Vec2,
    pub dimensions: Vec2,
}

impl WorldInfo {
    pub fn new(center: Vec2, dimensions: Vec2) -> Self {
        Self { center, dimensions }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.dimensions * 0.5
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.dimensions * 0.5
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.dimensions.x > 0.0 && self.dimensions.y > 0.0)
    }
}

impl Default for WorldInfo {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::splat(200.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HouseInfo {
    pub center: Vec2,
    pub size: Vec2,
}

impl HouseInfo {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum EntityKind {
    Item,
    Enemy,
    PurgeZone,
}

/// Opaque handle of something inside the field of view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub kind: EntityKind,
    pub location: Vec2,
    pub hash: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ItemKind {
    Pistol,
    Shotgun,
    Medkit,
    Food,
    Garbage,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub kind: ItemKind,
    pub location: Vec2,
    pub hash: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyInfo {
    pub location: Vec2,
    pub linear_velocity: Vec2,
    pub size: f32,
    pub health: i32,
    pub hash: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurgeZoneInfo {
    pub center: Vec2,
    pub radius: f32,
    pub hash: u64,
}

/// Colors accepted by the debug draw side channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum DebugColor {
    Red,
    Green,
    Blue,
    Yellow,
    Gray,
}
