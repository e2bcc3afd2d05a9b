use glam::Vec2;

use super::HouseId;
use crate::world::{EnemyInfo, EntityInfo, ItemInfo, ItemKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedItem {
    pub info: ItemInfo,
    pub entity: EntityInfo,
    /// Set when the item was judged not worth carrying.
    pub visited: bool,
    /// House whose footprint contains the item, if known.
    pub house: Option<HouseId>,
}

impl TrackedItem {
    pub fn location(&self) -> Vec2 {
        self.info.location
    }

    pub fn is_garbage(&self) -> bool {
        self.info.kind == ItemKind::Garbage
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedEnemy {
    pub info: EnemyInfo,
    pub position_when_seen: Vec2,
}

impl From<EnemyInfo> for TrackedEnemy {
    fn from(info: EnemyInfo) -> Self {
        Self {
            info,
            position_when_seen: info.location,
        }
    }
}
