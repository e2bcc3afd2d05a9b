//! Small angle helpers over [`glam::Vec2`].
//!
//! Orientation is measured in radians, counter-clockwise positive, with `0`
//! pointing along `+X`. Clockwise rotation therefore has a negative angular
//! velocity.
use glam::Vec2;

pub fn orientation_to_vector(orientation: f32) -> Vec2 {
    Vec2::from_angle(orientation)
}

pub fn vector_to_orientation(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}

/// Signed angle that rotates `from` onto `to`, in `(-PI, PI]`.
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to))
}

/// Wraps an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + core::f32::consts::PI).rem_euclid(core::f32::consts::TAU);
    wrapped - core::f32::consts::PI
}
