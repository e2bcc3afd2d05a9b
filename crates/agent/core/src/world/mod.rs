//! Boundary between the controller and the host engine.
//!
//! The host implements [`WorldInterface`]; the controller never sees engine
//! types. Field-of-view queries are index based and are consumed through the
//! bounded iterators in [`perception`].
mod perception;
mod types;

pub use perception::{EntitiesInFov, HousesInFov, PerceptionSnapshot, entities_in_fov, houses_in_fov};
pub use types::{
    AgentInfo, DebugColor, EnemyInfo, EntityInfo, EntityKind, HouseInfo, ItemInfo, ItemKind,
    PurgeZoneInfo, WorldInfo,
};

use glam::Vec2;

/// Services the host engine provides to the controller.
///
/// Query methods take `&self`; inventory and item manipulation take
/// `&mut self` because they change engine state. Debug drawing defaults to a
/// no-op so headless hosts can ignore it.
pub trait WorldInterface {
    fn agent_info(&self) -> AgentInfo;
    fn world_info(&self) -> WorldInfo;

    /// Returns the `index`-th house in the field of view, `None` past the end.
    fn house_in_fov(&self, index: usize) -> Option<HouseInfo>;
    /// Returns the `index`-th entity in the field of view, `None` past the end.
    fn entity_in_fov(&self, index: usize) -> Option<EntityInfo>;

    fn item_info(&self, entity: &EntityInfo) -> Option<ItemInfo>;
    fn enemy_info(&self, entity: &EntityInfo) -> Option<EnemyInfo>;
    fn purge_zone_info(&self, entity: &EntityInfo) -> Option<PurgeZoneInfo>;

    /// Closest walkable point to `target`.
    fn nav_mesh_closest_point(&self, target: Vec2) -> Vec2;

    fn inventory_capacity(&self) -> usize;
    fn inventory_item(&self, slot: usize) -> Option<ItemInfo>;
    fn inventory_add(&mut self, slot: usize, item: &ItemInfo) -> bool;
    fn inventory_remove(&mut self, slot: usize) -> bool;
    fn inventory_use(&mut self, slot: usize) -> bool;

    fn weapon_ammo(&self, item: &ItemInfo) -> i32;
    fn food_energy(&self, item: &ItemInfo) -> i32;
    fn medkit_health(&self, item: &ItemInfo) -> i32;

    fn item_grab(&mut self, entity: &EntityInfo) -> Option<ItemInfo>;
    fn item_destroy(&mut self, entity: &EntityInfo) -> bool;

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: DebugColor) {}
    fn draw_segment(&mut self, _from: Vec2, _to: Vec2, _color: DebugColor) {}
    fn draw_direction(&mut self, _origin: Vec2, _direction: Vec2, _length: f32, _color: DebugColor) {}
}

/// Value an item is worth to the agent: ammo, energy or health.
///
/// Garbage has no value.
pub fn item_value<W: WorldInterface + ?Sized>(world: &W, item: &ItemInfo) -> i32 {
    match item.kind {
        ItemKind::Pistol | ItemKind::Shotgun => world.weapon_ammo(item),
        ItemKind::Medkit => world.medkit_health(item),
        ItemKind::Food => world.food_energy(item),
        ItemKind::Garbage => 0,
    }
}
