//! A single traffic lane of a leg

use log::debug;

use super::directions::Directions;
use super::turns::Turns;
use super::types::{LaneId, LegIndex};

/// A lane controlled by a signal group
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    id: LaneId,
    /// Name of the edge the lane belongs to, prefix of the network id
    edge: String,
    directions: Directions,
    output_legs: Vec<LegIndex>,
}

impl Lane {
    pub fn new(id: LaneId, directions: Directions, edge: impl Into<String>) -> Self {
        Self {
            id,
            edge: edge.into(),
            directions,
            output_legs: Vec::new(),
        }
    }

    pub fn id(&self) -> LaneId {
        self.id
    }

    /// Lane id as used in the generated network, `<edge>_<id>`
    pub fn net_id(&self) -> String {
        format!("{}_{}", self.edge, self.id)
    }

    pub fn directions(&self) -> &Directions {
        &self.directions
    }

    /// Legs reachable from this lane, straight first, then left, right and back
    pub fn output_legs(&self) -> &[LegIndex] {
        &self.output_legs
    }

    pub(crate) fn set_id(&mut self, id: LaneId) {
        if id != self.id {
            debug!("Changing lane id from {} to {}_{}", self.net_id(), self.edge, id);
        }
        self.id = id;
    }

    pub(crate) fn set_directions(&mut self, directions: Directions) {
        self.directions = directions;
    }

    /// Recompute the output legs from the origin leg's adjacency
    pub fn calculate_output_legs(&mut self, origin: LegIndex, turns: &Turns) {
        let mut output_legs = Vec::new();
        if let (true, Some(leg)) = (self.directions.straight, turns.straight) {
            output_legs.push(leg);
        }
        if let (true, Some(leg)) = (self.directions.left, turns.left_most) {
            output_legs.push(leg);
        }
        if let (true, Some(leg)) = (self.directions.right, turns.right_most) {
            output_legs.push(leg);
        }
        if self.directions.back {
            output_legs.push(origin);
        }
        self.output_legs = output_legs;
    }
}
