use glam::Vec2;

use crate::model::{HouseId, ItemId, RotationState};
use crate::steering::SteeringId;
use crate::world::AgentInfo;

/// Type-tagged blackboard value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Float(f32),
    Vec2(Vec2),
    Agent(AgentInfo),
    Rotation(RotationState),
    Steering(SteeringId),
    MaybeSteering(Option<SteeringId>),
    MaybeHouse(Option<HouseId>),
    MaybeItem(Option<ItemId>),
    MaybeSearchPoint(Option<usize>),
}

/// Discriminant of a [`Value`], used in errors and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum ValueKind {
    Bool,
    Float,
    Vec2,
    Agent,
    Rotation,
    Steering,
    MaybeSteering,
    MaybeHouse,
    MaybeItem,
    MaybeSearchPoint,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Float(_) => ValueKind::Float,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Agent(_) => ValueKind::Agent,
            Value::Rotation(_) => ValueKind::Rotation,
            Value::Steering(_) => ValueKind::Steering,
            Value::MaybeSteering(_) => ValueKind::MaybeSteering,
            Value::MaybeHouse(_) => ValueKind::MaybeHouse,
            Value::MaybeItem(_) => ValueKind::MaybeItem,
            Value::MaybeSearchPoint(_) => ValueKind::MaybeSearchPoint,
        }
    }
}

/// Rust types that can be stored on the blackboard.
pub trait BlackboardValue: Copy + Sized {
    const KIND: ValueKind;

    fn into_value(self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! blackboard_value {
    ($ty:ty, $variant:ident) => {
        impl BlackboardValue for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(inner) => Some(*inner),
                    _ => None,
                }
            }
        }
    };
}

blackboard_value!(bool, Bool);
blackboard_value!(f32, Float);
blackboard_value!(Vec2, Vec2);
blackboard_value!(AgentInfo, Agent);
blackboard_value!(RotationState, Rotation);
blackboard_value!(SteeringId, Steering);
blackboard_value!(Option<SteeringId>, MaybeSteering);
blackboard_value!(Option<HouseId>, MaybeHouse);
blackboard_value!(Option<ItemId>, MaybeItem);
blackboard_value!(Option<usize>, MaybeSearchPoint);
