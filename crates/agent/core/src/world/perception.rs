use core::iter::FusedIterator;

use super::{AgentInfo, EnemyInfo, EntityInfo, EntityKind, HouseInfo, ItemInfo, PurgeZoneInfo, WorldInterface};
use crate::config::AgentConfig;

/// Iterator over the houses in the field of view.
///
/// Stops at the first missing index or after [`AgentConfig::MAX_FOV_ENTRIES`]
/// entries, whichever comes first.
pub struct HousesInFov<'a, W: ?Sized> {
    world: &'a W,
    index: usize,
}

impl<W: WorldInterface + ?Sized> Iterator for HousesInFov<'_, W> {
    type Item = HouseInfo;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= AgentConfig::MAX_FOV_ENTRIES {
            return None;
        }
        match self.world.house_in_fov(self.index) {
            Some(house) => {
                self.index += 1;
                Some(house)
            }
            None => {
                self.index = AgentConfig::MAX_FOV_ENTRIES;
                None
            }
        }
    }
}

impl<W: WorldInterface + ?Sized> FusedIterator for HousesInFov<'_, W> {}

pub fn houses_in_fov<W: WorldInterface + ?Sized>(world: &W) -> HousesInFov<'_, W> {
    HousesInFov { world, index: 0 }
}

/// Iterator over the entities in the field of view, bounded like [`HousesInFov`].
pub struct EntitiesInFov<'a, W: ?Sized> {
    world: &'a W,
    index: usize,
}

impl<W: WorldInterface + ?Sized> Iterator for EntitiesInFov<'_, W> {
    type Item = EntityInfo;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= AgentConfig::MAX_FOV_ENTRIES {
            return None;
        }
        match self.world.entity_in_fov(self.index) {
            Some(entity) => {
                self.index += 1;
                Some(entity)
            }
            None => {
                self.index = AgentConfig::MAX_FOV_ENTRIES;
                None
            }
        }
    }
}

impl<W: WorldInterface + ?Sized> FusedIterator for EntitiesInFov<'_, W> {}

pub fn entities_in_fov<W: WorldInterface + ?Sized>(world: &W) -> EntitiesInFov<'_, W> {
    EntitiesInFov { world, index: 0 }
}

/// Everything the agent perceived during one tick, resolved into typed infos.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerceptionSnapshot {
    pub agent: AgentInfo,
    pub houses: Vec<HouseInfo>,
    pub items: Vec<(EntityInfo, ItemInfo)>,
    pub enemies: Vec<EnemyInfo>,
    pub purge_zones: Vec<PurgeZoneInfo>,
}

impl PerceptionSnapshot {
    pub fn capture<W: WorldInterface + ?Sized>(world: &W, agent: AgentInfo) -> Self {
        let mut snapshot = Self {
            agent,
            houses: houses_in_fov(world).collect(),
            ..Self::default()
        };

        for entity in entities_in_fov(world) {
            match entity.kind {
                EntityKind::Item => {
                    if let Some(item) = world.item_info(&entity) {
                        snapshot.items.push((entity, item));
                    }
                }
                EntityKind::Enemy => {
                    if let Some(enemy) = world.enemy_info(&entity) {
                        snapshot.enemies.push(enemy);
                    }
                }
                EntityKind::PurgeZone => {
                    if let Some(zone) = world.purge_zone_info(&entity) {
                        snapshot.purge_zones.push(zone);
                    }
                }
            }
        }

        snapshot
    }

    /// Returns true if an entity with this hash was in view this tick.
    pub fn sees_item(&self, hash: u64) -> bool {
        self.items.iter().any(|(entity, _)| entity.hash == hash)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sandbox::SandboxWorld;
    use crate::world::ItemKind;

    #[test]
    fn capture_sorts_entities_by_kind() {
        let mut world = SandboxWorld::default();
        world.spawn_item(ItemKind::Pistol, Vec2::new(3.0, 0.0), 5);
        world.spawn_enemy(Vec2::new(0.0, 4.0), Vec2::ZERO);
        world.spawn_purge_zone(Vec2::new(-5.0, 0.0), 3.0);
        world.add_house(Vec2::new(0.0, -8.0), Vec2::splat(6.0));

        let snapshot = PerceptionSnapshot::capture(&world, world.agent_info());

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.enemies.len(), 1);
        assert_eq!(snapshot.purge_zones.len(), 1);
        assert_eq!(snapshot.houses.len(), 1);
        assert!(snapshot.sees_item(snapshot.items[0].0.hash));
    }

    #[test]
    fn iteration_skips_everything_out_of_range() {
        let mut world = SandboxWorld::default();
        world.spawn_item(ItemKind::Food, Vec2::new(500.0, 500.0), 3);

        assert_eq!(entities_in_fov(&world).count(), 0);
    }

    #[test]
    fn iteration_is_bounded() {
        let mut world = SandboxWorld::default();
        for _ in 0..AgentConfig::MAX_FOV_ENTRIES + 10 {
            world.spawn_item(ItemKind::Garbage, Vec2::new(1.0, 1.0), 0);
        }

        assert_eq!(entities_in_fov(&world).count(), AgentConfig::MAX_FOV_ENTRIES);
    }
}
