//! Domain leaves of the decision tree.
//!
//! Conditions take `&AgentContext` and answer a yes/no question without
//! touching state. Actions take `&mut AgentContext`, update the blackboard,
//! world model or host, and report a [`Status`](behavior_tree::Status).
//! A missing blackboard entry or stale handle makes a node fail; it never
//! panics.
pub mod actions;
pub mod conditions;

use agent_core::{House, HouseId, ItemId, TrackedItem, WorldInterface, keys};

use crate::AgentContext;

/// Tracked item referenced by the `TargetItem` key.
pub(crate) fn target_item<W: WorldInterface>(ctx: &AgentContext<W>) -> Option<(ItemId, &TrackedItem)> {
    let id = ctx.read(keys::TARGET_ITEM).flatten()?;
    ctx.model.item(id).map(|item| (id, item))
}

/// House referenced by the `TargetHouse` key.
pub(crate) fn target_house<W: WorldInterface>(ctx: &AgentContext<W>) -> Option<(HouseId, &House)> {
    let id = ctx.read(keys::TARGET_HOUSE).flatten()?;
    ctx.model.house(id).map(|house| (id, house))
}
