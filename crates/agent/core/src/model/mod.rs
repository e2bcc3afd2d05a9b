//! Persistent memory of the agent.
//!
//! The world model accumulates what perception reported across ticks:
//! houses with their search points, items, purge zones and the exploration
//! grid. Enemies are the exception and are rebuilt every tick. Entities refer
//! to each other through generation-tagged handles, never references.
mod grid;
mod house;
mod item;
mod purge;
mod tracked;

pub use grid::{GridCell, InfluenceGrid};
pub use house::{House, SearchPoint, layout_search_points};
pub use item::{TrackedEnemy, TrackedItem};
pub use purge::PurgeZone;
pub use tracked::Tracked;

use glam::Vec2;
use tracing::{debug, info};

use crate::config::AgentConfig;
use crate::world::{AgentInfo, EnemyInfo, EntityInfo, HouseInfo, ItemInfo, PerceptionSnapshot, PurgeZoneInfo, WorldInfo};

slotmap::new_key_type! {
    pub struct HouseId;
    pub struct ItemId;
    pub struct ZoneId;
}

/// Squared distance under which two house or zone centers are the same.
const SAME_CENTER_SQ: f32 = 0.01;

/// Progress of the 360 degree sweep at a search point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
pub enum RotationState {
    #[default]
    NotRotating,
    Rotating,
    Completed,
}

/// Counts of entities first sighted during one perception update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Discoveries {
    pub houses: usize,
    pub items: usize,
    pub purge_zones: usize,
}

#[derive(Clone, Debug)]
pub struct WorldModel {
    houses: Tracked<HouseId, House>,
    items: Tracked<ItemId, TrackedItem>,
    zones: Tracked<ZoneId, PurgeZone>,
    enemies: Vec<TrackedEnemy>,
    grid: InfluenceGrid,
    purge_zone_padding: f32,
    purge_zone_lifetime: f32,
}

impl WorldModel {
    pub fn new(bounds: &WorldInfo, config: &AgentConfig) -> Self {
        Self {
            houses: Tracked::default(),
            items: Tracked::default(),
            zones: Tracked::default(),
            enemies: Vec::new(),
            grid: InfluenceGrid::new(bounds, config.grid_cell_size),
            purge_zone_padding: config.purge_zone_padding,
            purge_zone_lifetime: config.purge_zone_lifetime,
        }
    }

    // ===== observation =====

    /// Records a house sighting. Returns the new handle on first sighting.
    pub fn observe_house(&mut self, info: &HouseInfo, fov_range: f32) -> Option<HouseId> {
        if self
            .houses
            .find(|house| house.center.distance_squared(info.center) <= SAME_CENTER_SQ)
            .is_some()
        {
            return None;
        }

        let house = House::from_sighting(info, fov_range);
        let search_points = house.search_points.len();
        let id = self.houses.insert(house);
        if let Some(house) = self.houses.get(id) {
            for item in self.items.values_mut() {
                if item.house.is_none() && house.contains(item.location()) {
                    item.house = Some(id);
                }
            }
        }
        self.grid.mark_dirty();

        info!(center = ?info.center, size = ?info.size, search_points, "new house tracked");
        Some(id)
    }

    /// Records an item sighting. Items are deduplicated by hash.
    pub fn observe_item(&mut self, entity: &EntityInfo, item: &ItemInfo) -> Option<ItemId> {
        if self.items.find(|tracked| tracked.info.hash == item.hash).is_some() {
            return None;
        }

        let house = self.houses.find(|house| house.contains(item.location));
        let id = self.items.insert(TrackedItem {
            info: *item,
            entity: *entity,
            visited: false,
            house,
        });

        info!(kind = %item.kind, location = ?item.location, "new item tracked");
        Some(id)
    }

    /// Replaces the enemy list; enemies are never remembered across ticks.
    pub fn observe_enemies(&mut self, enemies: impl IntoIterator<Item = EnemyInfo>) {
        self.enemies.clear();
        self.enemies.extend(enemies.into_iter().map(TrackedEnemy::from));
    }

    /// Records a purge zone sighting. A re-sighting refreshes the lifetime.
    pub fn observe_purge_zone(&mut self, info: &PurgeZoneInfo) -> Option<ZoneId> {
        let lifetime = self.purge_zone_lifetime;
        if let Some(id) = self
            .zones
            .find(|zone| zone.hash == info.hash || zone.center.distance_squared(info.center) <= SAME_CENTER_SQ)
        {
            if let Some(zone) = self.zones.get_mut(id) {
                zone.remaining_lifetime = lifetime;
            }
            return None;
        }

        let id = self
            .zones
            .insert(PurgeZone::from_sighting(info, self.purge_zone_padding, lifetime));
        info!(center = ?info.center, radius = info.radius, "new purge zone tracked");
        Some(id)
    }

    /// Folds one tick of perception into the model.
    pub fn apply_perception(&mut self, perception: &PerceptionSnapshot) -> Discoveries {
        let mut discoveries = Discoveries::default();
        let fov_range = perception.agent.fov_range;

        for house in &perception.houses {
            if self.observe_house(house, fov_range).is_some() {
                discoveries.houses += 1;
            }
        }
        for (entity, item) in &perception.items {
            if self.observe_item(entity, item).is_some() {
                discoveries.items += 1;
            }
        }
        for zone in &perception.purge_zones {
            if self.observe_purge_zone(zone).is_some() {
                discoveries.purge_zones += 1;
            }
        }
        self.observe_enemies(perception.enemies.iter().copied());

        discoveries
    }

    /// Drops tracked items within `radius` of `position` that perception no
    /// longer reports. Returns how many were forgotten.
    pub fn forget_unseen_items_near(&mut self, position: Vec2, radius: f32, perception: &PerceptionSnapshot) -> usize {
        let before = self.items.len();
        self.items.retain(|_, item| {
            item.location().distance(position) > radius || perception.sees_item(item.entity.hash)
        });
        let forgotten = before - self.items.len();
        if forgotten > 0 {
            debug!(forgotten, "tracked items vanished from their location");
        }
        forgotten
    }

    // ===== timers =====

    /// Advances revisit cooldowns, time spent inside houses, purge zone
    /// lifetimes and grid visitation.
    pub fn update_timers(&mut self, dt: f32, agent: &AgentInfo) {
        let mut revisits = Vec::new();
        for (id, _) in self.houses.iter() {
            revisits.push(id);
        }
        revisits.retain(|id| {
            let Some(house) = self.houses.get_mut(*id) else {
                return false;
            };
            if agent.is_in_house && house.contains(agent.position) {
                house.time_inside += dt;
            }
            if !house.visited {
                return false;
            }
            house.time_since_visit += dt;
            house.time_since_visit > AgentConfig::HOUSE_REVISIT_COOLDOWN
        });

        for id in revisits {
            if let Some(house) = self.houses.get_mut(id) {
                house.reset_visits();
                debug!(center = ?house.center, "house cooldown elapsed, searching it again");
            }
            for item in self.items.values_mut() {
                if item.house == Some(id) {
                    item.visited = false;
                }
            }
        }

        self.zones.retain(|_, zone| {
            zone.remaining_lifetime -= dt;
            zone.remaining_lifetime > 0.0
        });

        self.grid.mark_visited_around(agent.position, agent.fov_range);
    }

    /// Recomputes grid influence if a house was discovered since the last call.
    pub fn refresh_influence(&mut self) -> bool {
        let centers: Vec<Vec2> = self.houses.iter().map(|(_, house)| house.center).collect();
        let recomputed = self.grid.recompute_influence(centers);
        if recomputed {
            debug!(houses = self.houses.len(), "influence grid recomputed");
        }
        recomputed
    }

    // ===== queries =====

    pub fn houses(&self) -> impl Iterator<Item = (HouseId, &House)> + '_ {
        self.houses.iter()
    }

    pub fn house(&self, id: HouseId) -> Option<&House> {
        self.houses.get(id)
    }

    pub fn house_mut(&mut self, id: HouseId) -> Option<&mut House> {
        self.houses.get_mut(id)
    }

    pub fn house_count(&self) -> usize {
        self.houses.len()
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &TrackedItem)> + '_ {
        self.items.iter()
    }

    pub fn item(&self, id: ItemId) -> Option<&TrackedItem> {
        self.items.get(id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut TrackedItem> {
        self.items.get_mut(id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<TrackedItem> {
        self.items.remove(id)
    }

    pub fn zones(&self) -> impl Iterator<Item = (ZoneId, &PurgeZone)> + '_ {
        self.zones.iter()
    }

    pub fn zone(&self, id: ZoneId) -> Option<&PurgeZone> {
        self.zones.get(id)
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn enemies(&self) -> &[TrackedEnemy] {
        &self.enemies
    }

    pub fn grid(&self) -> &InfluenceGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut InfluenceGrid {
        &mut self.grid
    }

    pub fn closest_unvisited_house(&self, from: Vec2) -> Option<HouseId> {
        closest(self.houses.iter().filter(|(_, house)| !house.visited), from, |house| house.center)
    }

    pub fn closest_unvisited_item(&self, from: Vec2) -> Option<ItemId> {
        closest(self.items.iter().filter(|(_, item)| !item.visited), from, TrackedItem::location)
    }

    pub fn closest_enemy(&self, from: Vec2) -> Option<&TrackedEnemy> {
        let mut closest: Option<(&TrackedEnemy, f32)> = None;
        for enemy in &self.enemies {
            let distance = enemy.info.location.distance_squared(from);
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((enemy, distance));
            }
        }
        closest.map(|(enemy, _)| enemy)
    }

    /// Closest zone whose padded radius plus `margin` contains `point`.
    pub fn zone_containing(&self, point: Vec2, margin: f32) -> Option<ZoneId> {
        closest(
            self.zones.iter().filter(|(_, zone)| zone.contains(point, margin)),
            point,
            |zone| zone.center,
        )
    }

    pub fn house_containing(&self, point: Vec2) -> Option<HouseId> {
        self.houses.find(|house| house.contains(point))
    }
}

/// Nearest entry by squared distance. Ties keep the first entry.
fn closest<'a, K, V: 'a>(
    entries: impl Iterator<Item = (K, &'a V)>,
    from: Vec2,
    position: impl Fn(&V) -> Vec2,
) -> Option<K> {
    let mut closest: Option<(K, f32)> = None;
    for (key, value) in entries {
        let distance = position(value).distance_squared(from);
        if closest.as_ref().is_none_or(|(_, best)| distance < *best) {
            closest = Some((key, distance));
        }
    }
    closest.map(|(key, _)| key)
}
