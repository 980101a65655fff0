//! Intersection legs: the roads entering and leaving a junction

use log::debug;

use super::angle::Angle;
use super::coordinates::Coordinates;
use super::directions::Directions;
use super::error::{JunctionError, LaneConflict, Result};
use super::lane::Lane;
use super::signal_group::SignalGroup;
use super::turns::{resolve_turns, TurnSlot, Turns};
use super::types::{LegIndex, INCOMING_EDGE_SUFFIX, OUTGOING_EDGE_SUFFIX};

/// Maximum number of pure left (or pure right) lanes on one leg
pub const MAX_SINGLE_TURN_LANES: usize = 2;

/// An approach road of an intersection
#[derive(Debug, Clone)]
pub struct Leg {
    id: String,
    /// Position in the owning intersection's leg list
    index: LegIndex,
    angle: Angle,
    coordinates: Coordinates,
    directions: Directions,
    turns: Turns,
    self_references: Vec<TurnSlot>,
    signal_groups: Vec<SignalGroup>,
}

impl Leg {
    pub fn new(id: impl Into<String>, angle: Angle, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            index: LegIndex(0),
            angle,
            coordinates,
            directions: Directions::NONE,
            turns: Turns::default(),
            self_references: Vec::new(),
            signal_groups: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> LegIndex {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: LegIndex) {
        self.index = index;
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn directions(&self) -> &Directions {
        &self.directions
    }

    /// Edge carrying traffic into the intersection
    pub fn incoming_edge(&self) -> String {
        format!("{}{}", self.id, INCOMING_EDGE_SUFFIX)
    }

    /// Edge carrying traffic out of the intersection
    pub fn outgoing_edge(&self) -> String {
        format!("{}{}", self.id, OUTGOING_EDGE_SUFFIX)
    }

    pub fn turns(&self) -> &Turns {
        &self.turns
    }

    pub fn left_most_leg(&self) -> Option<LegIndex> {
        self.turns.left_most
    }

    pub fn right_most_leg(&self) -> Option<LegIndex> {
        self.turns.right_most
    }

    pub fn straight_leg(&self) -> Option<LegIndex> {
        self.turns.straight
    }

    /// Adjacency slots that fell back to this leg during the last resolution
    pub fn self_references(&self) -> &[TurnSlot] {
        &self.self_references
    }

    pub fn signal_groups(&self) -> &[SignalGroup] {
        &self.signal_groups
    }

    pub(crate) fn signal_groups_mut(&mut self) -> &mut [SignalGroup] {
        &mut self.signal_groups
    }

    pub fn add_signal_group(&mut self, signal_group: SignalGroup) {
        let directions = *signal_group.directions();
        self.adjust_directions(&directions);
        self.signal_groups.push(signal_group);
    }

    /// Add the movements of a signal group to the leg's directions
    pub fn adjust_directions(&mut self, directions: &Directions) {
        self.directions = self.directions.merged(directions);
    }

    /// Rebuild the leg's directions from its signal groups
    pub fn refresh_directions(&mut self) {
        self.directions = self
            .signal_groups
            .iter()
            .fold(Directions::NONE, |acc, signal_group| {
                acc.merged(signal_group.directions())
            });
    }

    /// Resolve leftmost, rightmost and straight legs from all leg angles
    pub fn calculate_turns(&mut self, angles: &[Angle]) {
        let resolution = resolve_turns(self.index, &self.directions, angles);
        debug!(
            "Leg {} ({}) turns: {:?}",
            self.id, self.directions, resolution.turns
        );
        self.turns = resolution.turns;
        self.self_references = resolution.self_references;
    }

    /// Recompute the output legs of every lane from the current adjacency
    pub fn refresh_output_legs(&mut self) {
        let origin = self.index;
        let turns = self.turns;
        for signal_group in &mut self.signal_groups {
            for lane in signal_group.lanes_mut() {
                lane.calculate_output_legs(origin, &turns);
            }
        }
    }

    /// All lanes of all signal groups, ordered by direction
    pub fn all_lanes(&self) -> Vec<&Lane> {
        let mut lanes: Vec<&Lane> = self
            .signal_groups
            .iter()
            .flat_map(|signal_group| signal_group.lanes())
            .collect();
        lanes.sort_by_key(|lane| lane.directions().sorting_index());
        lanes
    }

    /// Locate a lane by network id as (signal group position, lane position)
    ///
    /// Lane ids are only unique within a signal group, so several lanes of a
    /// leg may share a network id. The last one in group order is returned.
    pub fn find_lane(&self, net_id: &str) -> Option<(usize, usize)> {
        self.signal_groups
            .iter()
            .enumerate()
            .flat_map(|(group_position, signal_group)| {
                signal_group
                    .lanes()
                    .iter()
                    .enumerate()
                    .filter(move |(_, lane)| lane.net_id() == net_id)
                    .map(move |(lane_position, _)| (group_position, lane_position))
            })
            .last()
    }

    /// Check the lane layout for conflicting movements
    pub fn validate(&self) -> Result<()> {
        let lanes = self.all_lanes();
        let mut left_only = 0;
        let mut right_only = 0;

        for lane in &lanes {
            let directions = lane.directions();
            if directions.is_straight_left_right() && lanes.len() > 1 {
                return Err(self.conflict(LaneConflict::AllDirectionsNotAlone));
            }
            if directions.is_left_right_only() && lanes.len() > 1 {
                return Err(self.conflict(LaneConflict::LeftRightNotAlone));
            }
            if directions.is_left_only() {
                left_only += 1;
                if left_only > MAX_SINGLE_TURN_LANES {
                    return Err(self.conflict(LaneConflict::TooManyLeftOnly));
                }
            }
            if directions.is_right_only() {
                right_only += 1;
                if right_only > MAX_SINGLE_TURN_LANES {
                    return Err(self.conflict(LaneConflict::TooManyRightOnly));
                }
            }
        }
        Ok(())
    }

    fn conflict(&self, conflict: LaneConflict) -> JunctionError {
        JunctionError::LegValidation {
            leg: self.id.clone(),
            conflict,
        }
    }
}
