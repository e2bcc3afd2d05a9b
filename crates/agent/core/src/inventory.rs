//! Controller-side mirror of the host inventory.
//!
//! The host owns the items; this model only remembers the category stored
//! in each slot. Every slot change is paired with the matching
//! `inventory_add` / `inventory_remove` call on the world interface.
use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::config::AgentConfig;
use crate::world::ItemKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum SlotCategory {
    Pistol,
    Shotgun,
    Medkit,
    Food,
    Empty,
}

impl SlotCategory {
    /// Category an item would occupy. Garbage is never stored.
    pub fn from_item(kind: ItemKind) -> Option<Self> {
        match kind {
            ItemKind::Pistol => Some(Self::Pistol),
            ItemKind::Shotgun => Some(Self::Shotgun),
            ItemKind::Medkit => Some(Self::Medkit),
            ItemKind::Food => Some(Self::Food),
            ItemKind::Garbage => None,
        }
    }

    pub fn is_weapon(self) -> bool {
        matches!(self, Self::Pistol | Self::Shotgun)
    }
}

/// Where a newly grabbed item should go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Store in a free slot.
    Empty(usize),
    /// Replace a strictly weaker item of the same category.
    Replace(usize),
    /// Evict the weakest item of the most represented other category.
    Evict(usize),
    LeaveOnGround,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    slots: ArrayVec<SlotCategory, { AgentConfig::MAX_INVENTORY_SLOTS }>,
}

impl Inventory {
    /// Creates an empty inventory; capacity is clamped to `MAX_INVENTORY_SLOTS`.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = ArrayVec::new();
        for _ in 0..capacity.min(AgentConfig::MAX_INVENTORY_SLOTS) {
            slots.push(SlotCategory::Empty);
        }
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<SlotCategory> {
        self.slots.get(slot).copied()
    }

    pub fn set(&mut self, slot: usize, category: SlotCategory) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = category;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, slot: usize) -> bool {
        self.set(slot, SlotCategory::Empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, SlotCategory)> + '_ {
        self.slots.iter().copied().enumerate()
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == SlotCategory::Empty)
    }

    pub fn slots_of(&self, category: SlotCategory) -> impl Iterator<Item = usize> + '_ {
        self.iter()
            .filter(move |(_, slot)| *slot == category)
            .map(|(index, _)| index)
    }

    pub fn count(&self, category: SlotCategory) -> usize {
        self.slots_of(category).count()
    }

    pub fn contains(&self, category: SlotCategory) -> bool {
        self.slots.contains(&category)
    }

    pub fn has_weapon(&self) -> bool {
        self.slots.iter().any(|slot| slot.is_weapon())
    }

    /// Non-empty category with the most slots other than `excluded`.
    /// Ties keep the category declared first.
    pub fn most_represented_except(&self, excluded: SlotCategory) -> Option<SlotCategory> {
        let mut best: Option<(SlotCategory, usize)> = None;
        for category in SlotCategory::iter() {
            if category == excluded || category == SlotCategory::Empty {
                continue;
            }
            let count = self.count(category);
            if count > 0 && best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((category, count));
            }
        }
        best.map(|(category, _)| category)
    }

    /// Slot of `category` holding the lowest value. Ties keep the first slot.
    pub fn weakest_of(&self, category: SlotCategory, value_of: impl Fn(usize) -> i32) -> Option<(usize, i32)> {
        let mut weakest: Option<(usize, i32)> = None;
        for slot in self.slots_of(category) {
            let value = value_of(slot);
            if weakest.is_none_or(|(_, lowest)| value < lowest) {
                weakest = Some((slot, value));
            }
        }
        weakest
    }

    /// Decides where an item of `category` worth `value` should go.
    ///
    /// `value_of` reports the value of the item currently stored in a slot.
    pub fn plan_placement(&self, category: SlotCategory, value: i32, value_of: impl Fn(usize) -> i32) -> Placement {
        if let Some(slot) = self.first_empty() {
            return Placement::Empty(slot);
        }

        if let Some((slot, lowest)) = self.weakest_of(category, &value_of) {
            return if lowest < value {
                Placement::Replace(slot)
            } else {
                Placement::LeaveOnGround
            };
        }

        self.most_represented_except(category)
            .and_then(|dominant| self.weakest_of(dominant, &value_of))
            .map_or(Placement::LeaveOnGround, |(slot, _)| Placement::Evict(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(categories: &[SlotCategory]) -> Inventory {
        let mut inventory = Inventory::with_capacity(categories.len());
        for (slot, category) in categories.iter().enumerate() {
            inventory.set(slot, *category);
        }
        inventory
    }

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(Inventory::with_capacity(100).capacity(), AgentConfig::MAX_INVENTORY_SLOTS);
        assert_eq!(Inventory::with_capacity(3).capacity(), 3);
        assert!(!Inventory::with_capacity(3).set(5, SlotCategory::Food));
    }

    #[test]
    fn empty_slot_wins() {
        let inventory = filled(&[SlotCategory::Pistol, SlotCategory::Empty]);
        assert_eq!(inventory.plan_placement(SlotCategory::Pistol, 1, |_| 5), Placement::Empty(1));
    }

    #[test]
    fn weakest_same_type_is_replaced_only_when_strictly_weaker() {
        use SlotCategory::Pistol;
        let inventory = filled(&[Pistol, Pistol, Pistol]);
        let ammo = [4, 2, 2];

        assert_eq!(inventory.plan_placement(Pistol, 10, |slot| ammo[slot]), Placement::Replace(1));
        assert_eq!(inventory.plan_placement(Pistol, 2, |slot| ammo[slot]), Placement::LeaveOnGround);
    }

    #[test]
    fn absent_category_evicts_from_dominant_one() {
        use SlotCategory::{Food, Pistol};
        let inventory = filled(&[Food, Pistol, Pistol, Pistol]);
        let values = [1, 9, 3, 7];

        assert_eq!(inventory.plan_placement(SlotCategory::Medkit, 1, |slot| values[slot]), Placement::Evict(2));
    }

    #[test]
    fn most_represented_ties_keep_declaration_order() {
        use SlotCategory::{Food, Shotgun};
        let inventory = filled(&[Food, Shotgun, Food, Shotgun]);
        assert_eq!(inventory.most_represented_except(SlotCategory::Medkit), Some(Shotgun));
        assert_eq!(inventory.most_represented_except(Shotgun), Some(Food));
    }

    #[test]
    fn weapon_detection() {
        assert!(filled(&[SlotCategory::Food, SlotCategory::Shotgun]).has_weapon());
        assert!(!filled(&[SlotCategory::Food, SlotCategory::Medkit]).has_weapon());
    }
}
