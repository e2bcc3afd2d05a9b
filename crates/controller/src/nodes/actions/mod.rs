//! Action leaves.
//!
//! Grouped by concern: picking targets, selecting steering, the rotation
//! sweep state machine, house bookkeeping, and inventory handling.
mod houses;
mod inventory;
mod rotation;
mod steering;
mod targeting;

pub use houses::{mark_house_as_visited, mark_search_point_as_visited, update_door_location};
pub use inventory::{destroy_item, handle_food_and_medkit_usage, handle_item_grabbing, handle_shooting};
pub use rotation::{initialize_rotating, reset_rotation, set_rotation_completed};
pub use steering::{
    change_to_arrive_target, change_to_evade_target, change_to_explore_target, change_to_face_and_seek_target,
    change_to_face_target, change_to_flee_and_face_target, change_to_rotate_clockwise, change_to_run_to_target,
    change_to_seek_and_face_target, change_to_seek_target, change_to_wander,
};
pub use targeting::{
    set_best_cell_as_target, set_closest_enemy_as_target, set_closest_item_as_target,
    set_closest_not_visited_house_as_target, set_closest_not_visited_search_point_as_target,
    set_purge_zone_escape_as_target, set_target_house_door_as_target, set_threat_position_as_target,
};
