//! Layer 2: goal-oriented tactical behaviors.
//!
//! Tactics pick their own target and then choose between patterns.
//! Each one fails when its goal has nothing to work on, handing control to
//! the next tactic in the strategy.
use agent_core::WorldInterface;
use behavior_tree::{selector, sequence};

use super::{Node, act, check, patterns};
use crate::nodes::{actions, conditions};

// ============================================================================
// Combat Tactics
// ============================================================================

/// Engages the closest enemy in view: shoot when armed, evade otherwise.
pub fn combat<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        check("is_enemy_in_view", conditions::is_enemy_in_view),
        act("set_closest_enemy_as_target", actions::set_closest_enemy_as_target),
        selector(vec![patterns::shoot_when_aimed(), patterns::evade_enemy()]),
    ])
}

// ============================================================================
// Scavenging Tactics
// ============================================================================

/// Walks to the closest unvisited item and deals with it once in reach.
pub fn item_collection<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        check("is_not_visited_item_tracked", conditions::is_not_visited_item_tracked),
        act("set_closest_item_as_target", actions::set_closest_item_as_target),
        selector(vec![
            patterns::pick_up_when_in_range(),
            act("change_to_seek_and_face_target", actions::change_to_seek_and_face_target),
        ]),
    ])
}

/// Searches the closest unvisited house.
///
/// Outside the house: turn toward it and walk in. Inside: remember the door,
/// sweep every search point, then mark the house visited and head out. A
/// house that takes longer than the time budget is abandoned the same way.
pub fn house_search<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        check("is_not_visited_house_tracked", conditions::is_not_visited_house_tracked),
        act("set_closest_not_visited_house_as_target", actions::set_closest_not_visited_house_as_target),
        selector(vec![
            sequence(vec![
                check("is_agent_inside_target_house", conditions::is_agent_inside_target_house),
                act("update_door_location", actions::update_door_location),
                selector(vec![
                    sequence(vec![
                        check("is_house_time_budget_exceeded", conditions::is_house_time_budget_exceeded),
                        patterns::finish_house(),
                    ]),
                    search_point_sweep(),
                    patterns::finish_house(),
                ]),
            ]),
            act("change_to_face_and_seek_target", actions::change_to_face_and_seek_target),
        ]),
    ])
}

/// Arrives at each search point and looks around with a full clockwise turn.
///
/// A sweep counts as done once the heading comes back around or the dwell
/// time at the point runs out, whichever happens first.
pub fn search_point_sweep<W: WorldInterface + 'static>() -> Node<W> {
    sequence(vec![
        check("is_not_visited_search_point_in_house", conditions::is_not_visited_search_point_in_house),
        act(
            "set_closest_not_visited_search_point_as_target",
            actions::set_closest_not_visited_search_point_as_target,
        ),
        selector(vec![
            sequence(vec![
                check("has_arrived_at_target", conditions::has_arrived_at_target),
                selector(vec![
                    sequence(vec![
                        check("is_rotating_here", conditions::is_rotating_here),
                        selector(vec![
                            check("is_rotation_completed", conditions::is_rotation_completed),
                            check("is_rotation_dwell_elapsed", conditions::is_rotation_dwell_elapsed),
                        ]),
                        act("set_rotation_completed", actions::set_rotation_completed),
                        act("mark_search_point_as_visited", actions::mark_search_point_as_visited),
                        act("reset_rotation", actions::reset_rotation),
                    ]),
                    sequence(vec![
                        check("is_rotating_here", conditions::is_rotating_here),
                        act("change_to_rotate_clockwise", actions::change_to_rotate_clockwise),
                    ]),
                    sequence(vec![
                        act("initialize_rotating", actions::initialize_rotating),
                        act("change_to_rotate_clockwise", actions::change_to_rotate_clockwise),
                    ]),
                ]),
            ]),
            act("change_to_arrive_target", actions::change_to_arrive_target),
        ]),
    ])
}
