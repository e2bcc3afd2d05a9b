use super::combinators::{self, AddedSteering, BlendedSteering, PrioritySteering, WeightedBehavior};
use super::primitives::{Arrive, Evade, Face, Flee, Pursuit, RotateClockwise, Seek, Wander};
use super::{SteeringError, SteeringOutput, TargetData};
use crate::config::AgentConfig;
use crate::world::AgentInfo;

/// Handle of a behavior registered in a [`SteeringSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SteeringId(usize);

impl SteeringId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for SteeringId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "steering#{}", self.0)
    }
}

/// Closed set of steering behaviors.
#[derive(Clone, Debug, strum::IntoStaticStr)]
pub enum SteeringBehavior {
    Seek(Seek),
    Flee(Flee),
    Arrive(Arrive),
    Face(Face),
    Wander(Wander),
    Pursuit(Pursuit),
    Evade(Evade),
    RotateClockwise(RotateClockwise),
    Blended(BlendedSteering),
    Priority(PrioritySteering),
    Added(AddedSteering),
}

impl SteeringBehavior {
    pub fn is_combinator(&self) -> bool {
        matches!(self, Self::Blended(_) | Self::Priority(_) | Self::Added(_))
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }

    /// Evaluates a primitive. Combinators return `None`.
    fn calculate_primitive(&mut self, target: &TargetData, agent: &AgentInfo) -> Option<SteeringOutput> {
        let output = match self {
            Self::Seek(seek) => seek.calculate(target, agent),
            Self::Flee(flee) => flee.calculate(target, agent),
            Self::Arrive(arrive) => arrive.calculate(target, agent),
            Self::Face(face) => face.calculate(target, agent),
            Self::Wander(wander) => wander.calculate(agent),
            Self::Pursuit(pursuit) => pursuit.calculate(target, agent),
            Self::Evade(evade) => evade.calculate(target, agent),
            Self::RotateClockwise(rotate) => rotate.calculate(target, agent),
            Self::Blended(_) | Self::Priority(_) | Self::Added(_) => return None,
        };
        Some(output)
    }
}

#[derive(Clone, Debug)]
struct Entry {
    behavior: SteeringBehavior,
    target: TargetData,
}

enum Plan {
    Blended(Vec<WeightedBehavior>),
    Priority(Vec<SteeringId>),
    Added(Vec<SteeringId>),
}

/// Owns every steering behavior of one agent.
///
/// Behaviors are registered once and addressed by [`SteeringId`]; combinators
/// refer to their children by id, so a behavior may be shared by several
/// combinators and still be retargeted in one place.
#[derive(Clone, Debug, Default)]
pub struct SteeringSet {
    entries: Vec<Entry>,
}

impl SteeringSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, behavior: SteeringBehavior) -> SteeringId {
        let id = SteeringId(self.entries.len());
        self.entries.push(Entry {
            behavior,
            target: TargetData::default(),
        });
        id
    }

    pub fn get(&self, id: SteeringId) -> Option<&SteeringBehavior> {
        self.entries.get(id.0).map(|entry| &entry.behavior)
    }

    pub fn get_mut(&mut self, id: SteeringId) -> Option<&mut SteeringBehavior> {
        self.entries.get_mut(id.0).map(|entry| &mut entry.behavior)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn target(&self, id: SteeringId) -> Option<TargetData> {
        self.entries.get(id.0).map(|entry| entry.target)
    }

    /// Retargets a primitive. Combinators have no target of their own.
    pub fn set_target(&mut self, id: SteeringId, target: impl Into<TargetData>) -> Result<(), SteeringError> {
        let entry = self.entries.get_mut(id.0).ok_or(SteeringError::UnknownBehavior(id))?;
        if entry.behavior.is_combinator() {
            return Err(SteeringError::TargetOnCombinator(id));
        }
        entry.target = target.into();
        Ok(())
    }

    pub fn calculate(&mut self, id: SteeringId, agent: &AgentInfo) -> Result<SteeringOutput, SteeringError> {
        self.calculate_at(id, agent, 0)
    }

    fn calculate_at(&mut self, id: SteeringId, agent: &AgentInfo, depth: usize) -> Result<SteeringOutput, SteeringError> {
        if depth > AgentConfig::MAX_COMPOSITION_DEPTH {
            return Err(SteeringError::CompositionTooDeep(id));
        }

        let plan = {
            let entry = self.entries.get_mut(id.0).ok_or(SteeringError::UnknownBehavior(id))?;
            let target = entry.target;
            if let Some(output) = entry.behavior.calculate_primitive(&target, agent) {
                return Ok(output);
            }
            match &entry.behavior {
                SteeringBehavior::Blended(blended) => Plan::Blended(blended.behaviors().to_vec()),
                SteeringBehavior::Priority(priority) => Plan::Priority(priority.behaviors().to_vec()),
                SteeringBehavior::Added(added) => Plan::Added(added.behaviors().to_vec()),
                _ => return Err(SteeringError::UnknownBehavior(id)),
            }
        };

        match plan {
            Plan::Blended(children) => {
                let mut outputs = Vec::with_capacity(children.len());
                for child in children {
                    outputs.push((self.calculate_at(child.id, agent, depth + 1)?, child.weight));
                }
                let mut output = combinators::blend(&outputs);
                output.flags = combinators::blended_flags(&outputs);
                Ok(output)
            }
            Plan::Priority(children) => {
                let mut last = SteeringOutput::invalid();
                for child in children {
                    last = self.calculate_at(child, agent, depth + 1)?;
                    if last.is_valid() {
                        break;
                    }
                }
                Ok(last)
            }
            Plan::Added(children) => {
                let mut outputs = Vec::with_capacity(children.len());
                for child in children {
                    outputs.push(self.calculate_at(child, agent, depth + 1)?);
                }
                Ok(combinators::add(&outputs))
            }
        }
    }
}
