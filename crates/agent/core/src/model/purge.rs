use glam::Vec2;

use crate::world::PurgeZoneInfo;

/// Remembered purge zone. `radius` already includes the safety padding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PurgeZone {
    pub center: Vec2,
    pub radius: f32,
    pub remaining_lifetime: f32,
    pub hash: u64,
}

impl PurgeZone {
    pub fn from_sighting(info: &PurgeZoneInfo, padding: f32, lifetime: f32) -> Self {
        Self {
            center: info.center,
            radius: info.radius + padding,
            remaining_lifetime: lifetime,
            hash: info.hash,
        }
    }

    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        point.distance_squared(self.center) <= (self.radius + margin).powi(2)
    }

    /// Closest point `margin` outside the zone, straight away from the center.
    pub fn escape_point(&self, from: Vec2, margin: f32) -> Vec2 {
        let direction = (from - self.center).try_normalize().unwrap_or(Vec2::X);
        self.center + direction * (self.radius + margin)
    }
}
