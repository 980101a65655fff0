//! Signal groups: lanes sharing one traffic light channel

use std::collections::BTreeMap;

use super::directions::Directions;
use super::error::{JunctionError, Result};
use super::lane::Lane;
use super::sequence::Sequence;
use super::types::{LaneId, ProgramId, SignalGroupId};

/// Transition times between green and red, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signalisation {
    pub green_to_red: u32,
    pub red_to_green: u32,
}

/// A vehicle detector feeding traffic actuation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detector {
    id: String,
    pub running_gap: u32,
    pub demand_reset_threshold: u32,
    pub lanes_used: Vec<LaneId>,
}

impl Detector {
    pub fn new(name: &str, running_gap: u32, demand_reset_threshold: u32) -> Self {
        Self {
            id: format!("{}-{}-{}", name, running_gap, demand_reset_threshold),
            running_gap,
            demand_reset_threshold,
            lanes_used: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn add_lane_used(&mut self, lane: LaneId) {
        self.lanes_used.push(lane);
    }
}

/// A group of lanes switched together
#[derive(Debug, Clone)]
pub struct SignalGroup {
    id: SignalGroupId,
    /// Union of the member lanes' straight/left/right movements
    directions: Directions,
    pub signalisation: Signalisation,
    sequences: BTreeMap<ProgramId, Sequence>,
    detectors: Vec<Detector>,
    lanes: Vec<Lane>,
}

impl SignalGroup {
    pub fn new(id: SignalGroupId, signalisation: Signalisation) -> Self {
        Self {
            id,
            directions: Directions::NONE,
            signalisation,
            sequences: BTreeMap::new(),
            detectors: Vec::new(),
            lanes: Vec::new(),
        }
    }

    pub fn id(&self) -> SignalGroupId {
        self.id
    }

    pub fn directions(&self) -> &Directions {
        &self.directions
    }

    /// Lanes ordered by direction, the lane with id 0 last
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub(crate) fn lanes_mut(&mut self) -> &mut [Lane] {
        &mut self.lanes
    }

    pub fn lane_by_net_id(&self, net_id: &str) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.net_id() == net_id)
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    pub fn add_detector(&mut self, detector: Detector) {
        self.detectors.push(detector);
    }

    pub fn sequence(&self, program: ProgramId) -> Result<&Sequence> {
        self.sequences.get(&program).ok_or_else(|| {
            JunctionError::ElementNotFound(format!(
                "Sequence of signal group {} for program {}",
                self.id, program
            ))
        })
    }

    pub fn insert_sequence(&mut self, program: ProgramId, sequence: Sequence) {
        self.sequences.insert(program, sequence);
    }

    /// Id one above the highest lane id in use
    pub fn next_lane_id(&self) -> LaneId {
        let max = self.lanes.iter().map(|lane| lane.id().0).max().unwrap_or(0);
        LaneId(max + 1)
    }

    pub fn add_lane(&mut self, lane: Lane) {
        self.lanes.push(lane);
        self.refresh_lanes();
    }

    /// Replace the directions of the lane at `position` in [`Self::lanes`]
    pub fn change_lane(&mut self, position: usize, directions: Directions) {
        if let Some(lane) = self.lanes.get_mut(position) {
            lane.set_directions(directions);
        }
        self.refresh_lanes();
    }

    pub fn delete_lane(&mut self, position: usize) -> Option<Lane> {
        if position >= self.lanes.len() {
            return None;
        }
        let removed = self.lanes.remove(position);
        self.refresh_lanes();
        Some(removed)
    }

    /// Rebuild the aggregate directions, reorder lanes and renumber them
    fn refresh_lanes(&mut self) {
        self.directions = self
            .lanes
            .iter()
            .fold(Directions::NONE, |acc, lane| {
                let movements = lane.directions();
                acc.merged(&Directions::new(
                    movements.straight,
                    movements.left,
                    movements.right,
                    false,
                ))
            });

        self.lanes
            .sort_by_key(|lane| lane.directions().sorting_index());
        let count = self.lanes.len() as u32;
        for (position, lane) in self.lanes.iter_mut().enumerate() {
            lane.set_id(LaneId(count - 1 - position as u32));
        }
    }
}
