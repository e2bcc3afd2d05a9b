//! Shared state every tree node operates on.
use agent_core::steering::{
    AddedSteering, Arrive, BlendedSteering, Evade, Face, Flee, PrioritySteering, RotateClockwise, Seek, Wander,
    WeightedBehavior,
};
use agent_core::{
    AgentConfig, AgentError, AgentInfo, Blackboard, BlackboardError, BlackboardValue, Discoveries, InfluenceGrid, Inventory, Key,
    PerceptionSnapshot, RotationState, SlotCategory, SteeringBehavior, SteeringCommand, SteeringId, SteeringSet, TargetData,
    WorldInterface, WorldModel, keys,
};
use behavior_tree::Status;
use glam::Vec2;
use tracing::{debug, warn};

use crate::error::ControllerError;

/// Handles of the steering behaviors every agent registers.
#[derive(Clone, Copy, Debug)]
pub struct StandardBehaviors {
    pub seek: SteeringId,
    pub flee: SteeringId,
    pub arrive: SteeringId,
    pub face: SteeringId,
    pub wander: SteeringId,
    pub evade: SteeringId,
    pub rotate_clockwise: SteeringId,
    /// Seek while turning toward the target (added).
    pub seek_and_face: SteeringId,
    /// Flee while turning toward the target (added).
    pub flee_and_face: SteeringId,
    /// Turn toward the target first, then seek it (priority).
    pub face_and_seek: SteeringId,
    /// Evade while the threat is close, wander otherwise (priority).
    pub evade_or_wander: SteeringId,
    /// Mostly seek, a little wander (blended).
    pub explore: SteeringId,
}

impl StandardBehaviors {
    pub fn register(set: &mut SteeringSet, config: &AgentConfig) -> Self {
        let seek = set.register(SteeringBehavior::Seek(Seek));
        let flee = set.register(SteeringBehavior::Flee(Flee));
        let arrive = set.register(SteeringBehavior::Arrive(Arrive::new(
            config.arrive_stop_distance,
            config.arrive_slow_radius,
        )));
        let face = set.register(SteeringBehavior::Face(Face::new(config.face_stop_angle, config.face_slow_angle)));
        let wander = set.register(SteeringBehavior::Wander(Wander::new(
            config.wander_offset,
            config.wander_radius,
            config.wander_max_angle_change,
            config.wander_mode,
            config.seed,
        )));
        let evade = set.register(SteeringBehavior::Evade(Evade::new(config.evade_radius)));
        let rotate_clockwise = set.register(SteeringBehavior::RotateClockwise(RotateClockwise {
            arrive: Arrive::new(config.arrive_stop_distance, config.arrive_slow_radius),
        }));

        let seek_and_face = set.register(SteeringBehavior::Added(AddedSteering::new(vec![seek, face])));
        let flee_and_face = set.register(SteeringBehavior::Added(AddedSteering::new(vec![flee, face])));
        let face_and_seek = set.register(SteeringBehavior::Priority(PrioritySteering::new(vec![face, seek])));
        let evade_or_wander = set.register(SteeringBehavior::Priority(PrioritySteering::new(vec![evade, wander])));
        let explore = set.register(SteeringBehavior::Blended(BlendedSteering::new(vec![
            WeightedBehavior::new(seek, config.explore_seek_weight),
            WeightedBehavior::new(wander, config.explore_wander_weight),
        ])));

        Self {
            seek,
            flee,
            arrive,
            face,
            wander,
            evade,
            rotate_clockwise,
            seek_and_face,
            flee_and_face,
            face_and_seek,
            evade_or_wander,
            explore,
        }
    }

    fn keyed(&self) -> [(Key<SteeringId>, SteeringId); 11] {
        [
            (keys::SEEK, self.seek),
            (keys::FLEE, self.flee),
            (keys::ARRIVE, self.arrive),
            (keys::FACE, self.face),
            (keys::WANDER, self.wander),
            (keys::EVADE, self.evade_or_wander),
            (keys::ROTATE_CLOCKWISE, self.rotate_clockwise),
            (keys::SEEK_AND_FACE, self.seek_and_face),
            (keys::FLEE_AND_FACE, self.flee_and_face),
            (keys::FACE_AND_SEEK, self.face_and_seek),
            (keys::EXPLORE, self.explore),
        ]
    }
}

/// Context passed to every behavior tree node.
///
/// Owns the world interface for the controller's lifetime so that nodes can
/// both query and act on the host without juggling borrows.
pub struct AgentContext<W> {
    pub world: W,
    pub blackboard: Blackboard,
    pub model: WorldModel,
    pub steering: SteeringSet,
    pub behaviors: StandardBehaviors,
    pub inventory: Inventory,
    /// What the agent saw this tick.
    pub perception: PerceptionSnapshot,
    pub config: AgentConfig,
}

impl<W: WorldInterface> AgentContext<W> {
    pub fn new(world: W, config: AgentConfig) -> Result<Self, ControllerError> {
        let capacity = world.inventory_capacity();
        if capacity == 0 {
            return Err(ControllerError::ZeroInventoryCapacity);
        }
        let bounds = world.world_info();
        let (width, height) = (bounds.dimensions.x, bounds.dimensions.y);
        if !bounds.center.is_finite() || !bounds.dimensions.is_finite() {
            return Err(ControllerError::NonFiniteWorldBounds { width, height });
        }
        if bounds.is_degenerate() {
            return Err(ControllerError::DegenerateWorldBounds { width, height });
        }
        if InfluenceGrid::layout(&bounds, config.grid_cell_size).is_none() {
            return Err(ControllerError::WorldTooLarge {
                width,
                height,
                max: AgentConfig::MAX_GRID_CELLS,
            });
        }
        let agent = world.agent_info();

        let mut steering = SteeringSet::new();
        let behaviors = StandardBehaviors::register(&mut steering, &config);
        let mut blackboard = Blackboard::new();
        register_keys(&mut blackboard, &behaviors, &agent)?;

        let inventory = held_inventory(&world, capacity);

        debug!(capacity, steering = steering.len(), keys = blackboard.len(), "agent context initialized");
        Ok(Self {
            world,
            blackboard,
            model: WorldModel::new(&bounds, &config),
            steering,
            behaviors,
            inventory,
            perception: PerceptionSnapshot::default(),
            config,
        })
    }

    // ===== blackboard access =====

    /// Reads a key. Missing or mistyped keys are logged and read as `None`.
    pub fn read<T: BlackboardValue>(&self, key: Key<T>) -> Option<T> {
        match self.blackboard.get(key) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%err, code = err.error_code(), "blackboard read failed");
                None
            }
        }
    }

    /// Overwrites a key. Returns false (and logs) if the key is missing or
    /// registered with another type.
    pub fn write<T: BlackboardValue>(&mut self, key: Key<T>, value: T) -> bool {
        match self.blackboard.change(key, value) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, code = err.error_code(), "blackboard write failed");
                false
            }
        }
    }

    pub fn agent(&self) -> Option<AgentInfo> {
        self.read(keys::AGENT_INFO)
    }

    pub fn target(&self) -> Option<Vec2> {
        self.read(keys::TARGET)
    }

    /// Snaps `point` to the nav mesh and stores it as the current target.
    pub fn set_target(&mut self, point: Vec2) -> bool {
        let snapped = self.world.nav_mesh_closest_point(point);
        self.write(keys::TARGET, snapped)
    }

    // ===== steering selection =====

    /// Retargets the behavior registered under `handle`.
    pub fn retarget(&mut self, handle: Key<SteeringId>, target: impl Into<TargetData>) -> bool {
        let Some(id) = self.read(handle) else {
            return false;
        };
        match self.steering.set_target(id, target) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, code = err.error_code(), "steering retarget failed");
                false
            }
        }
    }

    /// Makes the behavior registered under `handle` the current one.
    pub fn use_steering(&mut self, handle: Key<SteeringId>) -> Status {
        let Some(id) = self.read(handle) else {
            return Status::Failure;
        };
        self.write(keys::CURRENT_STEERING, Some(id)).into()
    }

    // ===== per-tick pipeline =====

    /// Pulls this tick's perception into the world model and the blackboard.
    pub fn perceive(&mut self, dt: f32) -> AgentInfo {
        let agent = self.world.agent_info();
        self.perception = PerceptionSnapshot::capture(&self.world, agent);

        let discoveries = self.model.apply_perception(&self.perception);
        if discoveries != Discoveries::default() {
            debug!(?discoveries, "perception update");
        }
        self.model
            .forget_unseen_items_near(agent.position, agent.grab_range, &self.perception);
        self.model.update_timers(dt, &agent);
        self.model.refresh_influence();

        self.refresh_blackboard(&agent, dt);
        agent
    }

    fn refresh_blackboard(&mut self, agent: &AgentInfo, dt: f32) {
        self.write(keys::AGENT_INFO, *agent);
        self.write(keys::DELTA_TIME, dt);
        self.write(keys::RUN_MODE, false);

        let timer = self.read(keys::ALERT_TIMER).unwrap_or(0.0);
        let timer = if agent.was_bitten {
            self.write(
                keys::THREAT_POSITION,
                agent.position - agent.heading() * AgentConfig::THREAT_DISTANCE,
            );
            dt.max(f32::EPSILON)
        } else if timer > 0.0 && timer + dt < AgentConfig::ALERT_WINDOW {
            timer + dt
        } else {
            0.0
        };
        self.write(keys::ALERT_TIMER, timer);

        // A sweep only survives while the previous tick kept spinning.
        if self.read(keys::ROTATION_STATE) == Some(RotationState::Rotating) {
            let spinning = self.read(keys::CURRENT_STEERING).flatten() == Some(self.behaviors.rotate_clockwise);
            if spinning {
                let elapsed = self.read(keys::ROTATION_ELAPSED).unwrap_or(0.0);
                self.write(keys::ROTATION_ELAPSED, elapsed + dt);
            } else {
                debug!("rotation sweep interrupted");
                self.write(keys::ROTATION_STATE, RotationState::NotRotating);
                self.write(keys::ROTATION_ELAPSED, 0.0);
            }
        }
    }

    /// Evaluates the current steering behavior into a host command.
    pub fn steering_command(&mut self, agent: &AgentInfo) -> SteeringCommand {
        let Some(id) = self.read(keys::CURRENT_STEERING).flatten() else {
            return SteeringCommand::default();
        };
        match self.steering.calculate(id, agent) {
            Ok(output) => {
                let mut command = SteeringCommand::from(output);
                command.run_mode |= self.read(keys::RUN_MODE).unwrap_or(false);
                command
            }
            Err(err) => {
                warn!(%err, code = err.error_code(), "steering evaluation failed");
                SteeringCommand::default()
            }
        }
    }
}

/// Mirrors whatever the host already holds at startup.
fn held_inventory<W: WorldInterface>(world: &W, capacity: usize) -> Inventory {
    let mut inventory = Inventory::with_capacity(capacity);
    for slot in 0..inventory.capacity() {
        if let Some(category) = world.inventory_item(slot).and_then(|item| SlotCategory::from_item(item.kind)) {
            inventory.set(slot, category);
        }
    }
    inventory
}

fn register_keys(
    blackboard: &mut Blackboard,
    behaviors: &StandardBehaviors,
    agent: &AgentInfo,
) -> Result<(), BlackboardError> {
    blackboard.add(keys::AGENT_INFO, *agent)?;
    blackboard.add(keys::DELTA_TIME, 0.0)?;
    blackboard.add(keys::TARGET, agent.position)?;
    blackboard.add(keys::TARGET_VELOCITY, Vec2::ZERO)?;
    blackboard.add(keys::TARGET_ITEM, None)?;
    blackboard.add(keys::TARGET_HOUSE, None)?;
    blackboard.add(keys::TARGET_SEARCH_POINT, None)?;
    blackboard.add(keys::CURRENT_STEERING, Some(behaviors.wander))?;
    blackboard.add(keys::RUN_MODE, false)?;
    blackboard.add(keys::ROTATION_STATE, RotationState::NotRotating)?;
    blackboard.add(keys::START_ORIENTATION, agent.orientation)?;
    blackboard.add(keys::ROTATION_ANCHOR, agent.position)?;
    blackboard.add(keys::ROTATION_ELAPSED, 0.0)?;
    blackboard.add(keys::ALERT_TIMER, 0.0)?;
    blackboard.add(keys::THREAT_POSITION, agent.position)?;

    for (key, id) in behaviors.keyed() {
        blackboard.add(key, id)?;
    }
    Ok(())
}
