//! Lane edits requested by the authoring layer

use log::debug;

use super::directions::Directions;
use super::error::{JunctionError, Result};
use super::lane::Lane;
use super::leg::Leg;

/// An edit of a leg's lanes; lanes are named by network id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneOperation {
    /// Add a lane to the signal group that controls `sibling`
    Add {
        sibling: String,
        directions: Directions,
    },
    /// Replace the directions of `lane`
    Change { lane: String, directions: Directions },
    /// Remove `lane` from its signal group
    Delete { lane: String },
}

impl LaneOperation {
    /// Network id of the lane the operation is anchored on
    pub fn lane(&self) -> &str {
        match self {
            LaneOperation::Add { sibling, .. } => sibling,
            LaneOperation::Change { lane, .. } => lane,
            LaneOperation::Delete { lane } => lane,
        }
    }
}

/// Apply `operation` to `leg`, leaving the leg untouched on failure
///
/// Adjacency is not recomputed here; the owning intersection does that.
pub(crate) fn apply(leg: &mut Leg, operation: &LaneOperation) -> Result<()> {
    let lane_net_id = operation.lane();
    let (group_position, lane_position) = leg.find_lane(lane_net_id).ok_or_else(|| {
        JunctionError::LaneOperation(format!("Lane was not found: {}", lane_net_id))
    })?;

    match operation {
        LaneOperation::Add { directions, .. } => {
            debug!("Adding {} lane next to {}", directions, lane_net_id);
            if directions.has_no_direction() {
                return Err(JunctionError::LaneOperation(format!(
                    "Lane was not added, resulting lane has to have at least one direction: {}",
                    lane_net_id
                )));
            }
            let edge = leg.incoming_edge();
            let previous = leg.signal_groups()[group_position].clone();
            let signal_group = &mut leg.signal_groups_mut()[group_position];
            let lane = Lane::new(signal_group.next_lane_id(), without_back(directions), edge);
            signal_group.add_lane(lane);

            if let Err(error) = leg.validate() {
                leg.signal_groups_mut()[group_position] = previous;
                return Err(JunctionError::LaneOperation(format!(
                    "Lane was not added, leg validation failed: {}",
                    error
                )));
            }
        }
        LaneOperation::Change { directions, .. } => {
            debug!("Changing lane {} to {}", lane_net_id, directions);
            if directions.has_no_direction() {
                return Err(JunctionError::LaneOperation(format!(
                    "Lane was not changed, resulting lane has to have at least one direction: {}",
                    lane_net_id
                )));
            }
            let previous = leg.signal_groups()[group_position].clone();
            leg.signal_groups_mut()[group_position]
                .change_lane(lane_position, without_back(directions));

            if let Err(error) = leg.validate() {
                leg.signal_groups_mut()[group_position] = previous;
                return Err(JunctionError::LaneOperation(format!(
                    "Lane was not changed, leg validation failed: {}",
                    error
                )));
            }
        }
        LaneOperation::Delete { .. } => {
            debug!("Deleting lane {}", lane_net_id);
            let signal_group = &mut leg.signal_groups_mut()[group_position];
            if signal_group.lanes().len() < 2 {
                return Err(JunctionError::LaneOperation(format!(
                    "Lane was not deleted, since it is the last one: {}",
                    lane_net_id
                )));
            }
            signal_group.delete_lane(lane_position);
        }
    }

    leg.refresh_directions();
    Ok(())
}

/// Edited lanes never carry a back movement
fn without_back(directions: &Directions) -> Directions {
    Directions::new(directions.straight, directions.left, directions.right, false)
}
