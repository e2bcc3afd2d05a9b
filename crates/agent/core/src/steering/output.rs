use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SteeringFlags: u8 {
        /// Host should face the direction of travel.
        const AUTO_ORIENT = 1;
        /// Host should move at run speed.
        const RUN_MODE = 1 << 1;
        /// Output is meaningful; priority combinators skip invalid outputs.
        const VALID = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringOutput {
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub flags: SteeringFlags,
}

impl SteeringOutput {
    pub fn new(linear_velocity: Vec2, angular_velocity: f32, flags: SteeringFlags) -> Self {
        Self {
            linear_velocity,
            angular_velocity,
            flags,
        }
    }

    /// Zero output carrying no flags.
    pub fn invalid() -> Self {
        Self::new(Vec2::ZERO, 0.0, SteeringFlags::empty())
    }

    pub fn linear(linear_velocity: Vec2) -> Self {
        Self {
            linear_velocity,
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.flags.contains(SteeringFlags::VALID)
    }

    pub fn auto_orient(&self) -> bool {
        self.flags.contains(SteeringFlags::AUTO_ORIENT)
    }

    pub fn run_mode(&self) -> bool {
        self.flags.contains(SteeringFlags::RUN_MODE)
    }
}

impl Default for SteeringOutput {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0, SteeringFlags::AUTO_ORIENT | SteeringFlags::VALID)
    }
}

/// Command handed to the host once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringCommand {
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub auto_orient: bool,
    pub run_mode: bool,
}

impl Default for SteeringCommand {
    fn default() -> Self {
        Self {
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            auto_orient: true,
            run_mode: false,
        }
    }
}

impl From<SteeringOutput> for SteeringCommand {
    fn from(output: SteeringOutput) -> Self {
        Self {
            linear_velocity: output.linear_velocity,
            angular_velocity: output.angular_velocity,
            auto_orient: output.auto_orient(),
            run_mode: output.run_mode(),
        }
    }
}

/// Steering target. Copied by value into a behavior on retarget.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetData {
    pub position: Vec2,
    pub orientation: f32,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
}

impl TargetData {
    pub fn moving(position: Vec2, linear_velocity: Vec2) -> Self {
        Self {
            position,
            linear_velocity,
            ..Self::default()
        }
    }
}

impl From<Vec2> for TargetData {
    fn from(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}
