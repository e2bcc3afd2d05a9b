//! Well-known blackboard keys.
use glam::Vec2;

use super::Key;
use crate::model::{HouseId, ItemId, RotationState};
use crate::steering::SteeringId;
use crate::world::AgentInfo;

pub const AGENT_INFO: Key<AgentInfo> = Key::new("AgentInfo");
pub const DELTA_TIME: Key<f32> = Key::new("DeltaTime");

/// Current movement target, already snapped to the nav mesh.
pub const TARGET: Key<Vec2> = Key::new("Target");
/// Velocity of the targeted enemy, used for evasion.
pub const TARGET_VELOCITY: Key<Vec2> = Key::new("TargetVelocity");
pub const TARGET_ITEM: Key<Option<ItemId>> = Key::new("TargetItem");
pub const TARGET_HOUSE: Key<Option<HouseId>> = Key::new("TargetHouse");
/// Index into the target house's search points.
pub const TARGET_SEARCH_POINT: Key<Option<usize>> = Key::new("TargetSearchPoint");

pub const CURRENT_STEERING: Key<Option<SteeringId>> = Key::new("CurrentSteering");
pub const RUN_MODE: Key<bool> = Key::new("RunMode");

pub const ROTATION_STATE: Key<RotationState> = Key::new("RotationState");
pub const START_ORIENTATION: Key<f32> = Key::new("StartOrientation");
/// Target the current rotation was started at.
pub const ROTATION_ANCHOR: Key<Vec2> = Key::new("RotationAnchor");
pub const ROTATION_ELAPSED: Key<f32> = Key::new("RotationElapsed");

/// Seconds since the last bite; `0` when not alerted.
pub const ALERT_TIMER: Key<f32> = Key::new("AlertTimer");
pub const THREAT_POSITION: Key<Vec2> = Key::new("ThreatPosition");

// ===== steering handles, registered once =====
pub const SEEK: Key<SteeringId> = Key::new("Seek");
pub const FLEE: Key<SteeringId> = Key::new("Flee");
pub const ARRIVE: Key<SteeringId> = Key::new("Arrive");
pub const FACE: Key<SteeringId> = Key::new("Face");
pub const WANDER: Key<SteeringId> = Key::new("Wander");
pub const EVADE: Key<SteeringId> = Key::new("Evade");
pub const ROTATE_CLOCKWISE: Key<SteeringId> = Key::new("RotateClockwise");
pub const SEEK_AND_FACE: Key<SteeringId> = Key::new("SeekAndFace");
pub const FLEE_AND_FACE: Key<SteeringId> = Key::new("FleeAndFace");
pub const FACE_AND_SEEK: Key<SteeringId> = Key::new("FaceAndSeek");
pub const EXPLORE: Key<SteeringId> = Key::new("Explore");
