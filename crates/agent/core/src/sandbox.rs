//! In-memory [`WorldInterface`] implementation.
//!
//! Used by unit tests, integration scenarios and the headless simulator.
//! Field of view is a plain range check, the nav mesh is the world rectangle
//! and [`SandboxWorld::step`] integrates a steering command kinematically.
use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::AgentConfig;
use crate::math::{signed_angle, vector_to_orientation, wrap_angle};
use crate::steering::SteeringCommand;
use crate::world::{
    AgentInfo, DebugColor, EnemyInfo, EntityInfo, EntityKind, HouseInfo, ItemInfo, ItemKind, PurgeZoneInfo,
    WorldInfo, WorldInterface,
};

const DEFAULT_INVENTORY_CAPACITY: usize = 5;
const BITE_RANGE: f32 = 1.5;
const BITE_COOLDOWN: f32 = 1.0;
const BITE_DAMAGE: f32 = 1.0;
const ENERGY_DECAY: f32 = 0.05;
const RUN_SPEED_FACTOR: f32 = 2.0;
const SHOT_CONE: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub kind: ItemKind,
    pub location: Vec2,
    /// Ammo, energy or health depending on the kind.
    #[serde(default)]
    pub value: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub location: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurgeZoneSpawn {
    pub center: Vec2,
    pub radius: f32,
}

/// Serializable description of a sandbox episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub world: WorldInfo,
    pub agent: AgentInfo,
    pub inventory_capacity: usize,
    pub houses: Vec<HouseInfo>,
    pub items: Vec<ItemSpawn>,
    pub enemies: Vec<EnemySpawn>,
    pub purge_zones: Vec<PurgeZoneSpawn>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            world: WorldInfo::default(),
            agent: AgentInfo::default(),
            inventory_capacity: DEFAULT_INVENTORY_CAPACITY,
            houses: Vec::new(),
            items: Vec::new(),
            enemies: Vec::new(),
            purge_zones: Vec::new(),
        }
    }
}

impl Scenario {
    /// Small town with a few houses, loot and one wandering enemy.
    pub fn demo() -> Self {
        Self {
            world: WorldInfo::new(Vec2::ZERO, Vec2::splat(300.0)),
            houses: vec![
                HouseInfo::new(Vec2::new(40.0, 30.0), Vec2::new(30.0, 20.0)),
                HouseInfo::new(Vec2::new(-60.0, 50.0), Vec2::new(50.0, 40.0)),
                HouseInfo::new(Vec2::new(90.0, -80.0), Vec2::new(25.0, 25.0)),
            ],
            items: vec![
                ItemSpawn { kind: ItemKind::Pistol, location: Vec2::new(42.0, 28.0), value: 8 },
                ItemSpawn { kind: ItemKind::Food, location: Vec2::new(-55.0, 45.0), value: 4 },
                ItemSpawn { kind: ItemKind::Medkit, location: Vec2::new(-70.0, 60.0), value: 3 },
                ItemSpawn { kind: ItemKind::Garbage, location: Vec2::new(10.0, -5.0), value: 0 },
                ItemSpawn { kind: ItemKind::Shotgun, location: Vec2::new(95.0, -75.0), value: 4 },
            ],
            enemies: vec![EnemySpawn { location: Vec2::new(-20.0, -40.0), velocity: Vec2::new(1.0, 0.5) }],
            purge_zones: vec![PurgeZoneSpawn { center: Vec2::new(0.0, 100.0), radius: 15.0 }],
            ..Self::default()
        }
    }
}

/// Host calls observed by the sandbox, for assertions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounters {
    pub inventory_add: usize,
    pub inventory_remove: usize,
    pub inventory_use: usize,
    pub item_grab: usize,
    pub item_destroy: usize,
    pub draw: usize,
}

#[derive(Clone, Copy, Debug)]
enum Payload {
    Item(ItemInfo),
    Enemy(EnemyInfo),
    PurgeZone(PurgeZoneInfo),
}

#[derive(Clone, Copy, Debug)]
struct Spawned {
    entity: EntityInfo,
    payload: Payload,
}

#[derive(Clone, Debug)]
pub struct SandboxWorld {
    agent: AgentInfo,
    bounds: WorldInfo,
    houses: Vec<HouseInfo>,
    entities: Vec<Spawned>,
    inventory: Vec<Option<ItemInfo>>,
    values: HashMap<u64, i32>,
    /// Items `inventory_add` rejects.
    refused: HashSet<u64>,
    next_hash: u64,
    calls: CallCounters,
    bite_cooldown: f32,
    elapsed: f32,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new(WorldInfo::default(), AgentInfo::default(), DEFAULT_INVENTORY_CAPACITY)
    }
}

impl SandboxWorld {
    pub fn new(bounds: WorldInfo, agent: AgentInfo, inventory_capacity: usize) -> Self {
        Self {
            agent,
            bounds,
            houses: Vec::new(),
            entities: Vec::new(),
            inventory: vec![None; inventory_capacity],
            values: HashMap::new(),
            refused: HashSet::new(),
            next_hash: 1,
            calls: CallCounters::default(),
            bite_cooldown: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        let mut world = Self::new(scenario.world, scenario.agent, scenario.inventory_capacity);
        for house in &scenario.houses {
            world.add_house(house.center, house.size);
        }
        for item in &scenario.items {
            world.spawn_item(item.kind, item.location, item.value);
        }
        for enemy in &scenario.enemies {
            world.spawn_enemy(enemy.location, enemy.velocity);
        }
        for zone in &scenario.purge_zones {
            world.spawn_purge_zone(zone.center, zone.radius);
        }
        world
    }

    // ===== setup =====

    pub fn agent_mut(&mut self) -> &mut AgentInfo {
        &mut self.agent
    }

    pub fn add_house(&mut self, center: Vec2, size: Vec2) {
        self.houses.push(HouseInfo::new(center, size));
        self.refresh_house_flag();
    }

    pub fn spawn_item(&mut self, kind: ItemKind, location: Vec2, value: i32) -> u64 {
        let hash = self.next_hash();
        self.values.insert(hash, value);
        self.entities.push(Spawned {
            entity: EntityInfo { kind: EntityKind::Item, location, hash },
            payload: Payload::Item(ItemInfo { kind, location, hash }),
        });
        hash
    }

    pub fn spawn_enemy(&mut self, location: Vec2, velocity: Vec2) -> u64 {
        let hash = self.next_hash();
        self.entities.push(Spawned {
            entity: EntityInfo { kind: EntityKind::Enemy, location, hash },
            payload: Payload::Enemy(EnemyInfo { location, linear_velocity: velocity, size: 1.0, health: 3, hash }),
        });
        hash
    }

    pub fn spawn_purge_zone(&mut self, center: Vec2, radius: f32) -> u64 {
        let hash = self.next_hash();
        self.entities.push(Spawned {
            entity: EntityInfo { kind: EntityKind::PurgeZone, location: center, hash },
            payload: Payload::PurgeZone(PurgeZoneInfo { center, radius, hash }),
        });
        hash
    }

    pub fn remove_entity(&mut self, hash: u64) -> bool {
        let before = self.entities.len();
        self.entities.retain(|spawned| spawned.entity.hash != hash);
        self.entities.len() != before
    }

    /// Places an item straight into a slot without going through the
    /// interface, so setup does not show up in [`CallCounters`].
    pub fn give_item(&mut self, slot: usize, kind: ItemKind, value: i32) -> Option<u64> {
        if self.inventory.get(slot)?.is_some() {
            return None;
        }
        let hash = self.next_hash();
        self.values.insert(hash, value);
        self.inventory[slot] = Some(ItemInfo { kind, location: self.agent.position, hash });
        Some(hash)
    }

    /// Makes every later `inventory_add` of this item fail.
    pub fn refuse_item(&mut self, hash: u64) {
        self.refused.insert(hash);
    }

    // ===== inspection =====

    pub fn calls(&self) -> CallCounters {
        self.calls
    }

    pub fn reset_calls(&mut self) {
        self.calls = CallCounters::default();
    }

    pub fn value_of(&self, hash: u64) -> Option<i32> {
        self.values.get(&hash).copied()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn enemy_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|spawned| matches!(spawned.payload, Payload::Enemy(_)))
            .count()
    }

    pub fn contains_entity(&self, hash: u64) -> bool {
        self.entities.iter().any(|spawned| spawned.entity.hash == hash)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    // ===== simulation =====

    /// Integrates one steering command over `dt`.
    pub fn step(&mut self, command: &SteeringCommand, dt: f32) {
        let speed_cap = if command.run_mode {
            self.agent.max_linear_speed * RUN_SPEED_FACTOR
        } else {
            self.agent.max_linear_speed
        };
        let velocity = command.linear_velocity.clamp_length_max(speed_cap);

        self.agent.linear_velocity = velocity;
        self.agent.position = self.bounds.clamp(self.agent.position + velocity * dt);
        if command.auto_orient {
            if velocity.length_squared() > f32::EPSILON {
                self.agent.orientation = vector_to_orientation(velocity);
            }
        } else {
            let max = self.agent.max_angular_speed;
            let angular = command.angular_velocity.clamp(-max, max);
            self.agent.orientation = wrap_angle(self.agent.orientation + angular * dt);
        }

        self.agent.stamina = if command.run_mode {
            (self.agent.stamina - dt).max(0.0)
        } else {
            (self.agent.stamina + dt).min(AgentConfig::MAX_STAT)
        };
        self.agent.energy = (self.agent.energy - ENERGY_DECAY * dt).max(0.0);
        self.refresh_house_flag();

        self.move_enemies(dt);
        self.bite_cooldown = (self.bite_cooldown - dt).max(0.0);
        let bitten = self.bite_cooldown <= 0.0 && self.enemies().any(|enemy| enemy.location.distance(self.agent.position) <= BITE_RANGE);
        self.agent.was_bitten = bitten;
        if bitten {
            self.agent.health = (self.agent.health - BITE_DAMAGE).max(0.0);
            self.bite_cooldown = BITE_COOLDOWN;
        }

        self.elapsed += dt;
    }

    fn move_enemies(&mut self, dt: f32) {
        let bounds = self.bounds;
        for spawned in &mut self.entities {
            if let Payload::Enemy(enemy) = &mut spawned.payload {
                enemy.location = bounds.clamp(enemy.location + enemy.linear_velocity * dt);
                spawned.entity.location = enemy.location;
            }
        }
    }

    fn enemies(&self) -> impl Iterator<Item = &EnemyInfo> + '_ {
        self.entities.iter().filter_map(|spawned| match &spawned.payload {
            Payload::Enemy(enemy) => Some(enemy),
            _ => None,
        })
    }

    /// Damages the first enemy in view within a narrow cone ahead.
    fn resolve_shot(&mut self) {
        let agent = self.agent;
        let heading = agent.heading();
        let hit = self.entities.iter().position(|spawned| match spawned.payload {
            Payload::Enemy(enemy) => {
                let offset = enemy.location - agent.position;
                offset.length() <= agent.fov_range && signed_angle(heading, offset).abs() <= SHOT_CONE
            }
            _ => false,
        });
        let Some(index) = hit else {
            return;
        };
        if let Payload::Enemy(enemy) = &mut self.entities[index].payload {
            enemy.health -= 1;
            if enemy.health <= 0 {
                self.entities.remove(index);
            }
        }
    }

    fn refresh_house_flag(&mut self) {
        let position = self.agent.position;
        self.agent.is_in_house = self.houses.iter().any(|house| {
            let offset = (position - house.center).abs();
            offset.x <= house.size.x * 0.5 && offset.y <= house.size.y * 0.5
        });
    }

    fn next_hash(&mut self) -> u64 {
        let hash = self.next_hash;
        self.next_hash += 1;
        hash
    }

    fn in_view(&self, point: Vec2, extent: f32) -> bool {
        point.distance(self.agent.position) <= self.agent.fov_range + extent
    }

    fn find_item(&self, hash: u64) -> Option<ItemInfo> {
        self.entities.iter().find_map(|spawned| match spawned.payload {
            Payload::Item(item) if spawned.entity.hash == hash => Some(item),
            _ => None,
        })
    }

    fn in_grab_range(&self, location: Vec2) -> bool {
        location.distance(self.agent.position) <= self.agent.grab_range
    }
}

impl WorldInterface for SandboxWorld {
    fn agent_info(&self) -> AgentInfo {
        self.agent
    }

    fn world_info(&self) -> WorldInfo {
        self.bounds
    }

    fn house_in_fov(&self, index: usize) -> Option<HouseInfo> {
        self.houses
            .iter()
            .filter(|house| self.in_view(house.center, house.size.max_element() * 0.5))
            .nth(index)
            .copied()
    }

    fn entity_in_fov(&self, index: usize) -> Option<EntityInfo> {
        self.entities
            .iter()
            .filter(|spawned| {
                let extent = match spawned.payload {
                    Payload::PurgeZone(zone) => zone.radius,
                    _ => 0.0,
                };
                self.in_view(spawned.entity.location, extent)
            })
            .nth(index)
            .map(|spawned| spawned.entity)
    }

    fn item_info(&self, entity: &EntityInfo) -> Option<ItemInfo> {
        self.find_item(entity.hash)
    }

    fn enemy_info(&self, entity: &EntityInfo) -> Option<EnemyInfo> {
        self.entities.iter().find_map(|spawned| match spawned.payload {
            Payload::Enemy(enemy) if spawned.entity.hash == entity.hash => Some(enemy),
            _ => None,
        })
    }

    fn purge_zone_info(&self, entity: &EntityInfo) -> Option<PurgeZoneInfo> {
        self.entities.iter().find_map(|spawned| match spawned.payload {
            Payload::PurgeZone(zone) if spawned.entity.hash == entity.hash => Some(zone),
            _ => None,
        })
    }

    fn nav_mesh_closest_point(&self, target: Vec2) -> Vec2 {
        self.bounds.clamp(target)
    }

    fn inventory_capacity(&self) -> usize {
        self.inventory.len()
    }

    fn inventory_item(&self, slot: usize) -> Option<ItemInfo> {
        self.inventory.get(slot).copied().flatten()
    }

    fn inventory_add(&mut self, slot: usize, item: &ItemInfo) -> bool {
        self.calls.inventory_add += 1;
        if self.refused.contains(&item.hash) {
            return false;
        }
        match self.inventory.get_mut(slot) {
            Some(entry) if entry.is_none() => *entry = Some(*item),
            _ => return false,
        }
        self.remove_entity(item.hash);
        true
    }

    fn inventory_remove(&mut self, slot: usize) -> bool {
        self.calls.inventory_remove += 1;
        self.inventory.get_mut(slot).and_then(Option::take).is_some()
    }

    fn inventory_use(&mut self, slot: usize) -> bool {
        self.calls.inventory_use += 1;
        let Some(item) = self.inventory_item(slot) else {
            return false;
        };
        let Some(value) = self.values.get_mut(&item.hash) else {
            return false;
        };
        if *value <= 0 {
            return false;
        }

        match item.kind {
            ItemKind::Pistol | ItemKind::Shotgun => {
                *value -= 1;
                self.resolve_shot();
            }
            ItemKind::Medkit => {
                self.agent.health = (self.agent.health + *value as f32).min(AgentConfig::MAX_STAT);
                *value = 0;
            }
            ItemKind::Food => {
                self.agent.energy = (self.agent.energy + *value as f32).min(AgentConfig::MAX_STAT);
                *value = 0;
            }
            ItemKind::Garbage => return false,
        }
        true
    }

    fn weapon_ammo(&self, item: &ItemInfo) -> i32 {
        self.value_of(item.hash).unwrap_or(0)
    }

    fn food_energy(&self, item: &ItemInfo) -> i32 {
        self.value_of(item.hash).unwrap_or(0)
    }

    fn medkit_health(&self, item: &ItemInfo) -> i32 {
        self.value_of(item.hash).unwrap_or(0)
    }

    fn item_grab(&mut self, entity: &EntityInfo) -> Option<ItemInfo> {
        self.calls.item_grab += 1;
        let item = self.find_item(entity.hash)?;
        self.in_grab_range(item.location).then_some(item)
    }

    fn item_destroy(&mut self, entity: &EntityInfo) -> bool {
        self.calls.item_destroy += 1;
        match self.find_item(entity.hash) {
            Some(item) if self.in_grab_range(item.location) => self.remove_entity(item.hash),
            _ => false,
        }
    }

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: DebugColor) {
        self.calls.draw += 1;
    }

    fn draw_segment(&mut self, _from: Vec2, _to: Vec2, _color: DebugColor) {
        self.calls.draw += 1;
    }

    fn draw_direction(&mut self, _origin: Vec2, _direction: Vec2, _length: f32, _color: DebugColor) {
        self.calls.draw += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grabbing_requires_range_and_adding_picks_up() {
        let mut world = SandboxWorld::default();
        let near = world.spawn_item(ItemKind::Pistol, Vec2::new(1.0, 0.0), 6);
        let far = world.spawn_item(ItemKind::Pistol, Vec2::new(15.0, 0.0), 6);

        let far_entity = world.entity_in_fov(1).unwrap();
        assert_eq!(far_entity.hash, far);
        assert!(world.item_grab(&far_entity).is_none());

        let near_entity = world.entity_in_fov(0).unwrap();
        let item = world.item_grab(&near_entity).unwrap();
        assert!(world.inventory_add(0, &item));
        assert!(!world.contains_entity(near));
        assert!(!world.inventory_add(0, &item));
        assert_eq!(world.calls().inventory_add, 2);
    }

    #[test]
    fn medkit_is_depleted_by_one_use() {
        let mut world = SandboxWorld::default();
        world.agent_mut().health = 5.0;
        let hash = world.give_item(0, ItemKind::Medkit, 4).unwrap();

        assert!(world.inventory_use(0));
        assert_eq!(world.agent_info().health, 9.0);
        assert_eq!(world.value_of(hash), Some(0));
        assert!(!world.inventory_use(0));
    }

    #[test]
    fn weapon_loses_one_round_per_use() {
        let mut world = SandboxWorld::default();
        let hash = world.give_item(2, ItemKind::Shotgun, 2).unwrap();

        assert!(world.inventory_use(2));
        assert!(world.inventory_use(2));
        assert!(!world.inventory_use(2));
        assert_eq!(world.value_of(hash), Some(0));
        assert!(world.inventory_remove(2));
        assert!(!world.inventory_remove(2));
    }

    #[test]
    fn shooting_damages_enemy_ahead() {
        let mut world = SandboxWorld::default();
        world.spawn_enemy(Vec2::new(8.0, 0.0), Vec2::ZERO);
        world.give_item(0, ItemKind::Pistol, 5);

        for _ in 0..3 {
            world.inventory_use(0);
        }
        assert_eq!(world.enemy_count(), 0);
    }

    #[test]
    fn step_moves_and_orients_agent() {
        let mut world = SandboxWorld::default();
        let command = SteeringCommand {
            linear_velocity: Vec2::new(0.0, 100.0),
            ..SteeringCommand::default()
        };
        world.step(&command, 1.0);

        let agent = world.agent_info();
        assert_eq!(agent.position, Vec2::new(0.0, agent.max_linear_speed));
        assert!((agent.orientation - core::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn step_without_auto_orient_applies_angular_velocity() {
        let mut world = SandboxWorld::default();
        let command = SteeringCommand {
            angular_velocity: -1.0,
            auto_orient: false,
            ..SteeringCommand::default()
        };
        world.step(&command, 0.5);
        assert!((world.agent_info().orientation + 0.5).abs() < 1e-6);
    }

    #[test]
    fn enemy_contact_bites_once_per_cooldown() {
        let mut world = SandboxWorld::default();
        world.spawn_enemy(Vec2::new(0.5, 0.0), Vec2::ZERO);

        world.step(&SteeringCommand::default(), 0.1);
        assert!(world.agent_info().was_bitten);
        world.step(&SteeringCommand::default(), 0.1);
        assert!(!world.agent_info().was_bitten);
        assert_eq!(world.agent_info().health, AgentConfig::MAX_STAT - BITE_DAMAGE);
    }

    #[test]
    fn scenario_json_fills_defaults() {
        let scenario: Scenario = serde_json::from_str(
            r#"{ "houses": [{ "center": [10.0, 0.0], "size": [8.0, 8.0] }],
                 "items": [{ "kind": "Food", "location": [2.0, 0.0], "value": 3 }] }"#,
        )
        .unwrap();
        let world = SandboxWorld::from_scenario(&scenario);

        assert_eq!(world.inventory_capacity(), DEFAULT_INVENTORY_CAPACITY);
        assert!(world.house_in_fov(0).is_some());
        assert_eq!(world.entity_count(), 1);
    }
}
