//! Steering combinators.
//!
//! Combinators only hold child handles; the [`SteeringSet`](super::SteeringSet)
//! evaluates the children and folds their outputs with the functions below.
use glam::Vec2;

use super::{SteeringFlags, SteeringId, SteeringOutput};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedBehavior {
    pub id: SteeringId,
    pub weight: f32,
}

impl WeightedBehavior {
    pub fn new(id: SteeringId, weight: f32) -> Self {
        Self { id, weight }
    }
}

/// Weighted average of its children.
#[derive(Clone, Debug, Default)]
pub struct BlendedSteering {
    behaviors: Vec<WeightedBehavior>,
}

impl BlendedSteering {
    pub fn new(behaviors: Vec<WeightedBehavior>) -> Self {
        Self { behaviors }
    }

    pub fn behaviors(&self) -> &[WeightedBehavior] {
        &self.behaviors
    }

    /// Weights may be tuned at runtime.
    pub fn behaviors_mut(&mut self) -> &mut [WeightedBehavior] {
        &mut self.behaviors
    }
}

/// First child with a valid output wins.
#[derive(Clone, Debug, Default)]
pub struct PrioritySteering {
    behaviors: Vec<SteeringId>,
}

impl PrioritySteering {
    pub fn new(behaviors: Vec<SteeringId>) -> Self {
        Self { behaviors }
    }

    pub fn behaviors(&self) -> &[SteeringId] {
        &self.behaviors
    }
}

/// Sum of its children.
#[derive(Clone, Debug, Default)]
pub struct AddedSteering {
    behaviors: Vec<SteeringId>,
}

impl AddedSteering {
    pub fn new(behaviors: Vec<SteeringId>) -> Self {
        Self { behaviors }
    }

    pub fn behaviors(&self) -> &[SteeringId] {
        &self.behaviors
    }
}

/// Weighted average of linear and angular velocity. Zero when the weights
/// sum to zero.
pub fn blend(outputs: &[(SteeringOutput, f32)]) -> SteeringOutput {
    let total: f32 = outputs.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return SteeringOutput::linear(Vec2::ZERO);
    }

    let mut result = SteeringOutput::linear(Vec2::ZERO);
    for (output, weight) in outputs {
        result.linear_velocity += output.linear_velocity * *weight;
        result.angular_velocity += output.angular_velocity * *weight;
    }
    result.linear_velocity /= total;
    result.angular_velocity /= total;
    result
}

/// Sums velocities and ANDs flags. Empty input yields the default output.
pub fn add(outputs: &[SteeringOutput]) -> SteeringOutput {
    let Some(first) = outputs.first() else {
        return SteeringOutput::default();
    };

    outputs[1..].iter().fold(*first, |acc, output| SteeringOutput {
        linear_velocity: acc.linear_velocity + output.linear_velocity,
        angular_velocity: acc.angular_velocity + output.angular_velocity,
        flags: acc.flags & output.flags,
    })
}

/// Flags of a blended output: valid as soon as one weighted child is.
pub(super) fn blended_flags(outputs: &[(SteeringOutput, f32)]) -> SteeringFlags {
    let mut flags = SteeringFlags::AUTO_ORIENT;
    if outputs.iter().any(|(output, weight)| *weight > 0.0 && output.is_valid()) {
        flags |= SteeringFlags::VALID;
    }
    flags
}
