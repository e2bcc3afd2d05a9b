//! Primitive steering behaviors.
//!
//! Each primitive maps a target and the agent snapshot to one
//! [`SteeringOutput`]. Only [`Wander`] carries mutable state.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::{SteeringFlags, SteeringOutput, TargetData};
use crate::math::{orientation_to_vector, signed_angle};
use crate::world::AgentInfo;

const PREDICTION_STEP: f32 = 0.1;
const PREDICTION_HORIZON: f32 = 10.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct Seek;

impl Seek {
    pub fn calculate(&self, target: &TargetData, agent: &AgentInfo) -> SteeringOutput {
        let direction = (target.position - agent.position).normalize_or_zero();
        SteeringOutput::linear(direction * agent.max_linear_speed)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Flee;

impl Flee {
    pub fn calculate(&self, target: &TargetData, agent: &AgentInfo) -> SteeringOutput {
        let direction = (agent.position - target.position).normalize_or_zero();
        SteeringOutput::linear(direction * agent.max_linear_speed)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Arrive {
    pub stop_distance: f32,
    pub slow_radius: f32,
}

impl Arrive {
    pub fn new(stop_distance: f32, slow_radius: f32) -> Self {
        Self {
            stop_distance,
            slow_radius,
        }
    }

    pub fn calculate(&self, target: &TargetData, agent: &AgentInfo) -> SteeringOutput {
        let offset = target.position - agent.position;
        let distance = offset.length();
        if distance < self.stop_distance {
            return SteeringOutput::linear(glam::Vec2::ZERO);
        }

        let speed = if distance < self.slow_radius {
            agent.max_linear_speed * distance / self.slow_radius
        } else {
            agent.max_linear_speed
        };
        SteeringOutput::linear(offset / distance * speed)
    }
}

impl Default for Arrive {
    fn default() -> Self {
        Self::new(2.0, 15.0)
    }
}

/// Turns in place toward the target.
///
/// Output is invalid once the heading error is below the stop angle, which
/// lets a priority combinator fall through to its next behavior.
#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub stop_angle: f32,
    pub slow_angle: f32,
}

impl Face {
    pub fn new(stop_angle: f32, slow_angle: f32) -> Self {
        Self {
            stop_angle,
            slow_angle,
        }
    }

    pub fn calculate(&self, target: &TargetData, agent: &AgentInfo) -> SteeringOutput {
        let desired = target.position - agent.position;
        if desired.length_squared() <= f32::EPSILON {
            return SteeringOutput::invalid();
        }

        let error = signed_angle(agent.heading(), desired);
        if error.abs() < self.stop_angle {
            return SteeringOutput::invalid();
        }

        let magnitude = if error.abs() < self.slow_angle {
            agent.max_angular_speed * (error.abs() - self.stop_angle) / (self.slow_angle - self.stop_angle)
        } else {
            agent.max_angular_speed
        };
        SteeringOutput::new(glam::Vec2::ZERO, magnitude.copysign(error), SteeringFlags::VALID)
    }
}

impl Default for Face {
    fn default() -> Self {
        Self::new(0.1, 0.5)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum WanderMode {
    /// Uniform random change in `[-max, max]` every tick.
    #[default]
    Jitter,
    /// Keeps turning toward the side the agent is already drifting to.
    HeadingBias,
}

#[derive(Clone, Debug)]
pub struct Wander {
    pub offset: f32,
    pub radius: f32,
    pub max_angle_change: f32,
    pub mode: WanderMode,
    angle: f32,
    rng: ChaCha8Rng,
}

impl Wander {
    pub fn new(offset: f32, radius: f32, max_angle_change: f32, mode: WanderMode, seed: u64) -> Self {
        Self {
            offset,
            radius,
            max_angle_change,
            mode,
            angle: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Current wander angle relative to the agent's heading.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn calculate(&mut self, agent: &AgentInfo) -> SteeringOutput {
        self.angle += self.next_change(agent);

        let heading = agent.heading();
        let circle_center = agent.position + heading * self.offset;
        let point = circle_center + orientation_to_vector(agent.orientation + self.angle) * self.radius;

        Seek.calculate(&point.into(), agent)
    }

    fn next_change(&mut self, agent: &AgentInfo) -> f32 {
        let max = self.max_angle_change;
        if max <= 0.0 {
            return 0.0;
        }
        match self.mode {
            WanderMode::Jitter => self.rng.gen_range(-max..=max),
            WanderMode::HeadingBias => {
                let velocity = agent.linear_velocity;
                if velocity.length_squared() <= f32::EPSILON {
                    return self.rng.gen_range(-max..=max);
                }
                let side = if agent.heading().perp_dot(velocity) >= 0.0 { 1.0 } else { -1.0 };
                side * self.rng.gen_range(0.0..=max)
            }
        }
    }
}

/// Predicts where a moving target will be once the agent could reach it.
fn predicted_offset(target: &TargetData, agent: &AgentInfo) -> Option<glam::Vec2> {
    if agent.max_linear_speed <= 0.0 {
        return None;
    }
    let mut offset = target.position - agent.position;
    let mut time = 0.0;
    while offset.length() / agent.max_linear_speed > time && time < PREDICTION_HORIZON {
        offset += target.linear_velocity * PREDICTION_STEP;
        time += PREDICTION_STEP;
    }
    Some(offset)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    pub fn calculate(&self, target: &TargetData, agent: &AgentInfo) -> SteeringOutput {
        match predicted_offset(target, agent) {
            Some(offset) => SteeringOutput::linear(offset.normalize_or_zero() * agent.max_linear_speed),
            None => SteeringOutput::linear(glam::Vec2::ZERO),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Evade {
    pub radius: f32,
}

impl Evade {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn calculate(&self, target: &TargetData, agent: &AgentInfo) -> SteeringOutput {
        if agent.position.distance(target.position) > self.radius {
            return SteeringOutput::invalid();
        }
        match predicted_offset(target, agent) {
            Some(offset) => SteeringOutput::linear(-offset.normalize_or_zero() * agent.max_linear_speed),
            None => SteeringOutput::invalid(),
        }
    }
}

impl Default for Evade {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// Arrives at the target while spinning clockwise at full angular speed.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotateClockwise {
    pub arrive: Arrive,
}

impl RotateClockwise {
    pub fn calculate(&self, target: &TargetData, agent: &AgentInfo) -> SteeringOutput {
        let linear = self.arrive.calculate(target, agent).linear_velocity;
        SteeringOutput::new(linear, -agent.max_angular_speed, SteeringFlags::VALID)
    }
}
