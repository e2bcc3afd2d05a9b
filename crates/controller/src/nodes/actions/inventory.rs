//! Inventory handling: picking items up, consuming them and firing weapons.
//!
//! The local [`Inventory`](agent_core::Inventory) mirror and the host are
//! kept in lockstep: a slot is only filled after `inventory_add` succeeded
//! and is cleared together with every `inventory_remove` call.
use agent_core::world::item_value;
use agent_core::{AgentConfig, ItemInfo, Placement, SlotCategory, WorldInterface, keys};
use behavior_tree::Status;
use tracing::{debug, info, warn};

use crate::AgentContext;
use crate::nodes::target_item;

/// Removes whatever `slot` holds from both the host and the mirror.
fn discard<W: WorldInterface>(ctx: &mut AgentContext<W>, slot: usize) -> bool {
    let removed = ctx.world.inventory_remove(slot);
    ctx.inventory.clear(slot);
    if !removed {
        warn!(slot, "host refused to empty inventory slot");
    }
    removed
}

/// Puts back an item that was discarded to make room for a refused one.
fn restore<W: WorldInterface>(ctx: &mut AgentContext<W>, slot: usize, item: &ItemInfo) {
    let category = SlotCategory::from_item(item.kind);
    match category {
        Some(category) if ctx.world.inventory_add(slot, item) => {
            ctx.inventory.set(slot, category);
            debug!(slot, kind = %item.kind, "discarded item restored");
        }
        _ => warn!(
            slot,
            kind = %item.kind,
            slot_state = ?ctx.inventory.get(slot),
            "discarded item lost, slot left empty"
        ),
    }
}

/// Value of the item currently stored in `slot`, zero when empty.
fn held_value<W: WorldInterface>(world: &W, slot: usize) -> i32 {
    world.inventory_item(slot).map_or(0, |item| item_value(world, &item))
}

// ============================================================================
// Items on the ground
// ============================================================================

/// Grabs the target item if it improves the inventory.
///
/// Placement goes to the first empty slot, else replaces the weakest item of
/// the same category when strictly weaker, else evicts the weakest item of
/// the most represented other category when the category is missing.
/// Otherwise the item is left on the ground and marked visited. An item the
/// host refuses to store is marked visited as well, and whatever was
/// discarded for it goes back into its slot.
pub fn handle_item_grabbing<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some((id, item)) = target_item(ctx).map(|(id, item)| (id, *item)) else {
        return Status::Failure;
    };
    let Some(category) = SlotCategory::from_item(item.info.kind) else {
        return Status::Failure;
    };
    let Some(grabbed) = ctx.world.item_grab(&item.entity) else {
        debug!(kind = %item.info.kind, "item grab refused");
        return Status::Failure;
    };

    let value = item_value(&ctx.world, &grabbed);
    let world = &ctx.world;
    let placement = ctx
        .inventory
        .plan_placement(category, value, |slot| held_value(world, slot));

    let (slot, previous) = match placement {
        Placement::Empty(slot) => (slot, None),
        Placement::Replace(slot) | Placement::Evict(slot) => {
            debug!(slot, ?placement, "making room for item");
            let previous = ctx.world.inventory_item(slot);
            if !discard(ctx, slot) {
                return Status::Failure;
            }
            (slot, previous)
        }
        Placement::LeaveOnGround => {
            if let Some(tracked) = ctx.model.item_mut(id) {
                tracked.visited = true;
            }
            ctx.write(keys::TARGET_ITEM, None);
            debug!(kind = %grabbed.kind, value, "item left on the ground");
            return Status::Success;
        }
    };

    if !ctx.world.inventory_add(slot, &grabbed) {
        warn!(slot, kind = %grabbed.kind, "host refused inventory add");
        if let Some(previous) = previous {
            restore(ctx, slot, &previous);
        }
        if let Some(tracked) = ctx.model.item_mut(id) {
            tracked.visited = true;
        }
        ctx.write(keys::TARGET_ITEM, None);
        return Status::Failure;
    }
    ctx.inventory.set(slot, category);
    ctx.model.remove_item(id);
    ctx.write(keys::TARGET_ITEM, None);
    info!(kind = %grabbed.kind, slot, value, "item picked up");
    Status::Success
}

pub fn destroy_item<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some((id, item)) = target_item(ctx).map(|(id, item)| (id, *item)) else {
        return Status::Failure;
    };
    if !ctx.world.item_destroy(&item.entity) {
        return Status::Failure;
    }
    ctx.model.remove_item(id);
    ctx.write(keys::TARGET_ITEM, None);
    debug!(kind = %item.info.kind, "item destroyed");
    Status::Success
}

// ============================================================================
// Consumables
// ============================================================================

/// Uses a medkit, then food, when health or energy dropped below the buffer.
///
/// Succeeds if anything was consumed.
pub fn handle_food_and_medkit_usage<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(agent) = ctx.agent() else {
        return Status::Failure;
    };
    let healed = consume(ctx, SlotCategory::Medkit, agent.health);
    let fed = consume(ctx, SlotCategory::Food, agent.energy);
    (healed || fed).into()
}

/// Uses the first `category` item that fits in the stat deficit.
fn consume<W: WorldInterface>(ctx: &mut AgentContext<W>, category: SlotCategory, stat: f32) -> bool {
    if stat >= AgentConfig::STAT_BUFFER {
        return false;
    }
    let deficit = AgentConfig::MAX_STAT - stat;
    let Some(slot) = ctx
        .inventory
        .slots_of(category)
        .find(|slot| held_value(&ctx.world, *slot) as f32 <= deficit)
    else {
        return false;
    };

    let used = ctx.world.inventory_use(slot);
    if !used || held_value(&ctx.world, slot) <= 0 {
        debug!(slot, %category, used, "consumable spent");
        discard(ctx, slot);
    }
    used
}

// ============================================================================
// Combat
// ============================================================================

/// Fires at the current target.
///
/// Shotguns are preferred inside their effective band, pistols (least ammo
/// first) everywhere else. A weapon that fails to fire or runs dry is
/// dropped.
pub fn handle_shooting<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let (Some(agent), Some(target)) = (ctx.agent(), ctx.target()) else {
        return Status::Failure;
    };
    let distance_sq = agent.position.distance_squared(target);
    let fov_sq = agent.fov_range * agent.fov_range;
    let (near, far) = AgentConfig::SHOTGUN_BAND;
    let in_band = distance_sq >= near * fov_sq && distance_sq <= far * fov_sq;

    let world = &ctx.world;
    let shotgun = ctx.inventory.slots_of(SlotCategory::Shotgun).next();
    let pistol = ctx
        .inventory
        .weakest_of(SlotCategory::Pistol, |slot| held_value(world, slot))
        .map(|(slot, _)| slot);
    let Some(slot) = (if in_band { shotgun.or(pistol) } else { pistol.or(shotgun) }) else {
        return Status::Failure;
    };

    let fired = ctx.world.inventory_use(slot);
    if !fired || held_value(&ctx.world, slot) <= 0 {
        debug!(slot, fired, "weapon spent");
        discard(ctx, slot);
    }
    fired.into()
}

#[cfg(test)]
mod tests {
    use agent_core::{ItemKind, SandboxWorld};
    use glam::Vec2;

    use super::*;
    use crate::testing::context;

    fn holding(items: &[(ItemKind, i32)]) -> SandboxWorld {
        let mut world = SandboxWorld::default();
        for (slot, (kind, value)) in items.iter().enumerate() {
            world.give_item(slot, *kind, *value);
        }
        world
    }

    fn target_first_item(ctx: &mut AgentContext<SandboxWorld>) {
        let id = ctx.model.items().next().map(|(id, _)| id);
        ctx.write(keys::TARGET_ITEM, id);
    }

    #[test]
    fn grab_into_empty_slot() {
        let mut world = SandboxWorld::default();
        let hash = world.spawn_item(ItemKind::Pistol, Vec2::new(1.0, 0.0), 6);
        let mut ctx = context(world);
        target_first_item(&mut ctx);

        assert_eq!(handle_item_grabbing(&mut ctx), Status::Success);
        assert_eq!(ctx.inventory.get(0), Some(SlotCategory::Pistol));
        assert_eq!(ctx.world.inventory_item(0).map(|item| item.hash), Some(hash));
        assert_eq!(ctx.model.item_count(), 0);
        assert_eq!(ctx.read(keys::TARGET_ITEM), Some(None));
    }

    #[test]
    fn full_inventory_replaces_strictly_weaker_item() {
        let pistols = [(ItemKind::Pistol, 3), (ItemKind::Pistol, 1), (ItemKind::Pistol, 2), (ItemKind::Pistol, 4), (ItemKind::Pistol, 5)];
        let mut world = holding(&pistols);
        let hash = world.spawn_item(ItemKind::Pistol, Vec2::new(1.0, 0.0), 2);
        let mut ctx = context(world);
        target_first_item(&mut ctx);

        assert_eq!(handle_item_grabbing(&mut ctx), Status::Success);
        assert_eq!(ctx.world.inventory_item(1).map(|item| item.hash), Some(hash));
        assert_eq!(ctx.world.calls().inventory_remove, 1);
        assert_eq!(ctx.world.calls().inventory_add, 1);
    }

    #[test]
    fn refused_replacement_puts_the_old_item_back() {
        let mut world = holding(&[(ItemKind::Pistol, 5), (ItemKind::Pistol, 1), (ItemKind::Pistol, 5), (ItemKind::Pistol, 5), (ItemKind::Pistol, 5)]);
        let weak = world.inventory_item(1).map(|item| item.hash);
        let hash = world.spawn_item(ItemKind::Pistol, Vec2::new(1.0, 0.0), 9);
        world.refuse_item(hash);
        let mut ctx = context(world);
        target_first_item(&mut ctx);

        assert_eq!(handle_item_grabbing(&mut ctx), Status::Failure);
        assert_eq!(ctx.world.inventory_item(1).map(|item| item.hash), weak);
        assert_eq!(ctx.inventory.get(1), Some(SlotCategory::Pistol));
        assert!(ctx.world.contains_entity(hash));
        assert!(ctx.model.items().all(|(_, item)| item.visited));
        assert_eq!(ctx.world.calls().inventory_remove, 1);
        assert_eq!(ctx.world.calls().inventory_add, 2);
    }

    #[test]
    fn lost_replacement_leaves_mirror_and_host_empty() {
        let mut world = SandboxWorld::default();
        let mut held = Vec::new();
        for (slot, value) in [5, 1, 5, 5, 5].into_iter().enumerate() {
            held.extend(world.give_item(slot, ItemKind::Pistol, value));
        }
        world.refuse_item(held[1]);
        let hash = world.spawn_item(ItemKind::Pistol, Vec2::new(1.0, 0.0), 9);
        world.refuse_item(hash);
        let mut ctx = context(world);
        target_first_item(&mut ctx);

        assert_eq!(handle_item_grabbing(&mut ctx), Status::Failure);
        assert!(ctx.world.inventory_item(1).is_none());
        assert_eq!(ctx.inventory.get(1), Some(SlotCategory::Empty));
        assert_eq!(ctx.inventory.count(SlotCategory::Pistol), 4);
    }

    #[test]
    fn no_better_slot_leaves_item_on_ground() {
        let mut world = holding(&[(ItemKind::Pistol, 5); 5]);
        world.spawn_item(ItemKind::Pistol, Vec2::new(1.0, 0.0), 2);
        let mut ctx = context(world);
        target_first_item(&mut ctx);

        assert_eq!(handle_item_grabbing(&mut ctx), Status::Success);
        assert!(ctx.model.items().all(|(_, item)| item.visited));
        assert_eq!(ctx.world.calls().inventory_add, 0);
    }

    #[test]
    fn missing_category_evicts_from_the_dominant_one() {
        let mut world = holding(&[
            (ItemKind::Food, 2),
            (ItemKind::Pistol, 3),
            (ItemKind::Pistol, 1),
            (ItemKind::Pistol, 2),
            (ItemKind::Food, 1),
        ]);
        world.spawn_item(ItemKind::Medkit, Vec2::new(1.0, 0.0), 4);
        let mut ctx = context(world);
        target_first_item(&mut ctx);

        assert_eq!(handle_item_grabbing(&mut ctx), Status::Success);
        assert_eq!(ctx.inventory.get(2), Some(SlotCategory::Medkit));
        assert_eq!(ctx.inventory.count(SlotCategory::Pistol), 2);
    }

    #[test]
    fn garbage_is_destroyed_not_grabbed() {
        let mut world = SandboxWorld::default();
        let hash = world.spawn_item(ItemKind::Garbage, Vec2::new(1.0, 0.0), 0);
        let mut ctx = context(world);
        target_first_item(&mut ctx);

        assert_eq!(handle_item_grabbing(&mut ctx), Status::Failure);
        assert_eq!(destroy_item(&mut ctx), Status::Success);
        assert!(!ctx.world.contains_entity(hash));
        assert_eq!(ctx.model.item_count(), 0);
    }

    #[test]
    fn medkit_used_once_and_removed_when_depleted() {
        let mut world = holding(&[(ItemKind::Medkit, 4)]);
        world.agent_mut().health = 5.0;
        let mut ctx = context(world);

        assert_eq!(handle_food_and_medkit_usage(&mut ctx), Status::Success);
        assert_eq!(ctx.world.agent_info().health, 9.0);
        assert_eq!(ctx.inventory.get(0), Some(SlotCategory::Empty));
        assert_eq!(ctx.world.calls().inventory_use, 1);
        assert_eq!(ctx.world.calls().inventory_remove, 1);
    }

    #[test]
    fn consumables_wait_for_the_buffer_and_the_deficit() {
        let mut world = holding(&[(ItemKind::Medkit, 4), (ItemKind::Food, 3)]);
        world.agent_mut().health = 9.5;
        world.agent_mut().energy = 8.0;
        let mut ctx = context(world);

        assert_eq!(handle_food_and_medkit_usage(&mut ctx), Status::Failure);
        assert_eq!(ctx.world.calls().inventory_use, 0);
    }

    #[test]
    fn shotgun_inside_band_pistol_outside() {
        let mut world = holding(&[(ItemKind::Pistol, 5), (ItemKind::Shotgun, 5), (ItemKind::Pistol, 2)]);
        world.spawn_enemy(Vec2::new(12.0, 0.0), Vec2::ZERO);
        let mut ctx = context(world);

        // 12^2 = 144 lies within [0.2, 0.7] * 20^2.
        ctx.write(keys::TARGET, Vec2::new(12.0, 0.0));
        assert_eq!(handle_shooting(&mut ctx), Status::Success);
        assert_eq!(ctx.world.value_of(ctx.world.inventory_item(1).unwrap().hash), Some(4));

        ctx.write(keys::TARGET, Vec2::new(3.0, 0.0));
        assert_eq!(handle_shooting(&mut ctx), Status::Success);
        assert_eq!(ctx.world.value_of(ctx.world.inventory_item(2).unwrap().hash), Some(1));
    }

    #[test]
    fn empty_weapon_is_dropped() {
        let world = holding(&[(ItemKind::Pistol, 1)]);
        let mut ctx = context(world);
        ctx.write(keys::TARGET, Vec2::new(3.0, 0.0));

        assert_eq!(handle_shooting(&mut ctx), Status::Success);
        assert_eq!(ctx.inventory.get(0), Some(SlotCategory::Empty));
        assert_eq!(ctx.world.inventory_item(0), None);
        assert_eq!(handle_shooting(&mut ctx), Status::Failure);
    }
}
