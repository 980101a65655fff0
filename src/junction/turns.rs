//! Turn resolution: which sibling leg a leg's traffic reaches when it turns
//!
//! Everything here is a pure function of the leg's directions and the angles
//! of all legs of the intersection. Leftmost neighbours are found by scanning
//! upward from the leg's angle, rightmost ones by scanning downward.

use log::{debug, warn};

use super::angle::{Angle, FULL_TURN};
use super::directions::Directions;
use super::types::LegIndex;

/// Candidate angles visited by a neighbour scan before giving up
const SCAN_STEPS: u16 = FULL_TURN + 1;

/// Adjacency triple of a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Turns {
    pub left_most: Option<LegIndex>,
    pub right_most: Option<LegIndex>,
    pub straight: Option<LegIndex>,
}

/// One slot of the adjacency triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnSlot {
    LeftMost,
    RightMost,
    Straight,
}

/// Output of [`resolve_turns`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnResolution {
    pub turns: Turns,
    /// Slots that resolved to the origin leg itself
    ///
    /// This happens when no other leg is found by a scan. It is a fallback,
    /// not a genuine neighbour.
    pub self_references: Vec<TurnSlot>,
}

/// Resolve the adjacency of the leg at `origin`
///
/// `angles[i]` is the angle of leg `i` of the intersection.
pub fn resolve_turns(origin: LegIndex, directions: &Directions, angles: &[Angle]) -> TurnResolution {
    let Some(&origin_angle) = angles.get(origin.0) else {
        warn!("Leg index {} is outside of {} legs", origin.0, angles.len());
        return TurnResolution::default();
    };

    let leg_count = angles.len();
    let mut turns = Turns::default();

    if directions.is_straight_left_right() {
        if leg_count == 2 {
            turns.straight = straight_by_leg_count(origin_angle, angles, &turns);
        } else {
            turns.left_most = left_most(angles, origin_angle);
            turns.right_most = right_most(angles, origin_angle);
            turns.straight = straight_by_leg_count(origin_angle, angles, &turns);
        }
    } else if directions.is_straight_left() || directions.is_straight_right() {
        if leg_count == 3 {
            // T junction
            if directions.left {
                turns.left_most = left_most(angles, origin_angle);
            } else {
                turns.right_most = right_most(angles, origin_angle);
            }
            turns.straight = straight_by_leg_count(origin_angle, angles, &turns);
        } else if directions.is_straight_left() {
            // straight is the second leg found to the left
            turns.left_most = left_most(angles, origin_angle);
            turns.straight = turns
                .left_most
                .and_then(|leg| left_most(angles, angles[leg.0]));
        } else {
            turns.right_most = right_most(angles, origin_angle);
            turns.straight = turns
                .right_most
                .and_then(|leg| right_most(angles, angles[leg.0]));
        }
    } else if directions.left && directions.right {
        turns.left_most = left_most(angles, origin_angle);
        turns.right_most = right_most(angles, origin_angle);
    } else if directions.left {
        turns.left_most = left_most(angles, origin_angle);
    } else if directions.right {
        turns.right_most = right_most(angles, origin_angle);
    } else if directions.straight {
        if leg_count == 4 {
            let probe = left_most(angles, origin_angle);
            turns.straight = probe.and_then(|leg| left_most(angles, angles[leg.0]));
        } else {
            turns.straight = straight_by_leg_count(origin_angle, angles, &turns);
        }
    }

    let self_references: Vec<TurnSlot> = [
        (TurnSlot::LeftMost, turns.left_most),
        (TurnSlot::RightMost, turns.right_most),
        (TurnSlot::Straight, turns.straight),
    ]
    .into_iter()
    .filter(|(_, leg)| leg.is_some_and(|leg| angles[leg.0] == origin_angle))
    .map(|(slot, _)| slot)
    .collect();

    if !self_references.is_empty() {
        warn!(
            "Leg at {} resolved {:?} to itself, no other leg was found",
            origin_angle, self_references
        );
    }

    TurnResolution {
        turns,
        self_references,
    }
}

/// First leg found scanning upward from `from`, or the leg at `from` itself
pub fn left_most(angles: &[Angle], from: Angle) -> Option<LegIndex> {
    let mut candidate = from;
    for _ in 0..SCAN_STEPS {
        candidate = candidate.next();
        if let Some(leg) = leg_at_angle(angles, candidate) {
            debug!("Left of {} is the leg at {}", from, candidate);
            return Some(leg);
        }
    }
    leg_at_angle(angles, from)
}

/// First leg found scanning downward from `from`, or the leg at `from` itself
pub fn right_most(angles: &[Angle], from: Angle) -> Option<LegIndex> {
    let mut candidate = from;
    for _ in 0..SCAN_STEPS {
        candidate = candidate.previous();
        if let Some(leg) = leg_at_angle(angles, candidate) {
            debug!("Right of {} is the leg at {}", from, candidate);
            return Some(leg);
        }
    }
    leg_at_angle(angles, from)
}

/// Straight leg chosen by case analysis on the number of legs
///
/// When several legs qualify the last one in leg order wins.
fn straight_by_leg_count(origin: Angle, angles: &[Angle], turns: &Turns) -> Option<LegIndex> {
    let left_angle = turns.left_most.map(|leg| angles[leg.0]);
    let right_angle = turns.right_most.map(|leg| angles[leg.0]);

    let mut straight = None;
    for &angle in angles {
        let qualifies = match angles.len() {
            4 => angle != origin && left_angle != Some(angle) && right_angle != Some(angle),
            3 => {
                angle != origin
                    && (left_angle.is_some_and(|left| left != angle)
                        || right_angle.is_some_and(|right| right != angle))
            }
            2 => angle != origin,
            _ => false,
        };
        if qualifies {
            straight = leg_at_angle(angles, angle);
        }
    }
    straight
}

fn leg_at_angle(angles: &[Angle], angle: Angle) -> Option<LegIndex> {
    angles
        .iter()
        .position(|candidate| *candidate == angle)
        .map(LegIndex)
}
