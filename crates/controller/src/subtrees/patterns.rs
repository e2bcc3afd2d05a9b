//! Layer 1: basic if-then patterns.
//!
//! Each pattern gates one short chain of actions behind a condition.
//! Patterns follow the `action_when_condition()` naming where a condition
//! is involved.
use agent_core::WorldInterface;
use behavior_tree::{always_succeed, inverter, selector, sequence};

use super::{Node, act, check};
use crate::nodes::{actions, conditions};

// ============================================================================
// Survival Patterns
// ============================================================================

/// Heals and eats from the inventory when health or energy runs low.
///
/// Never fails, so it can precede the decision selector.
pub fn consume_when_hurt<W: WorldInterface + 'static>() -> Node<W> {
    always_succeed(act("handle_food_and_medkit_usage", actions::handle_food_and_medkit_usage))
}

/// Runs out of a purge zone along the shortest path.
pub fn purge_zone_escape<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        check("is_in_purge_zone", conditions::is_in_purge_zone),
        act("set_purge_zone_escape_as_target", actions::set_purge_zone_escape_as_target),
        act("change_to_run_to_target", actions::change_to_run_to_target),
    ])
}

/// Backs away from the spot a bite came from while watching it.
pub fn alert_response<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        selector(vec![
            check("was_bitten", conditions::was_bitten),
            check("is_under_attack_from_behind", conditions::is_under_attack_from_behind),
        ]),
        act("set_threat_position_as_target", actions::set_threat_position_as_target),
        act("change_to_flee_and_face_target", actions::change_to_flee_and_face_target),
    ])
}

// ============================================================================
// Combat Patterns
// ============================================================================

/// Faces the target enemy and fires once the aim settles.
///
/// Succeeds while armed even when not yet aimed, so that facing takes
/// precedence over evading.
pub fn shoot_when_aimed<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        check("has_weapon", conditions::has_weapon),
        act("change_to_face_target", actions::change_to_face_target),
        always_succeed(sequence(vec![
            check("is_aiming_finished", conditions::is_aiming_finished),
            act("handle_shooting", actions::handle_shooting),
        ])),
    ])
}

pub fn evade_enemy<W: WorldInterface + 'static>() -> Node<W> {
    act("change_to_evade_target", actions::change_to_evade_target)
}

// ============================================================================
// Item Patterns
// ============================================================================

/// Destroys garbage, otherwise triages the item into the inventory.
pub fn pick_up_when_in_range<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        check("is_item_in_grab_range", conditions::is_item_in_grab_range),
        selector(vec![
            sequence(vec![
                inverter(check("is_item_not_garbage", conditions::is_item_not_garbage)),
                act("destroy_item", actions::destroy_item),
            ]),
            act("handle_item_grabbing", actions::handle_item_grabbing),
        ]),
    ])
}

// ============================================================================
// House Patterns
// ============================================================================

/// Walks out through the door of the house just searched.
pub fn leave_house<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        check("is_inside_a_house", conditions::is_inside_a_house),
        check("is_agent_inside_target_house", conditions::is_agent_inside_target_house),
        exit_through_door(),
    ])
}

/// Marks the target house searched and heads for its door.
pub fn finish_house<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        act("mark_house_as_visited", actions::mark_house_as_visited),
        exit_through_door(),
    ])
}

fn exit_through_door<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        act("set_target_house_door_as_target", actions::set_target_house_door_as_target),
        act("change_to_seek_target", actions::change_to_seek_target),
    ])
}

// ============================================================================
// Fallback Patterns
// ============================================================================

/// Heads for the most promising unexplored grid cell.
pub fn explore<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        act("set_best_cell_as_target", actions::set_best_cell_as_target),
        act("change_to_explore_target", actions::change_to_explore_target),
    ])
}

pub fn wander_fallback<W: WorldInterface + 'static>() -> Node<W> {
    act("change_to_wander", actions::change_to_wander)
}
