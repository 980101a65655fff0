#![allow(dead_code)]

use junction_sim::junction::{
    Angle, Coordinates, Directions, GridPosition, Intersection, IntersectionId, Lane, Leg,
    SignalGroup, SignalGroupId, Signalisation,
};

/// A leg with one signal group holding `lanes`
pub fn leg(id: &str, angle: i64, lanes: &[Directions]) -> Leg {
    let mut leg = Leg::new(id, Angle::new(angle).unwrap(), Coordinates::default());
    let mut signal_group = SignalGroup::new(SignalGroupId(1), Signalisation::default());
    for directions in lanes {
        let lane_id = signal_group.next_lane_id();
        signal_group.add_lane(Lane::new(lane_id, *directions, leg.incoming_edge()));
    }
    leg.add_signal_group(signal_group);
    leg
}

/// An intersection at the origin with turns already resolved
pub fn intersection(legs: Vec<Leg>) -> Intersection {
    let mut intersection = Intersection::new(
        IntersectionId(1),
        Coordinates::default(),
        GridPosition::default(),
        Angle::new(0).unwrap(),
        legs,
        Vec::new(),
    );
    intersection.calculate_turns();
    intersection
}

/// Four legs at 0, 90, 180 and 270 degrees named after their angle
pub fn four_way(directions: Directions) -> Intersection {
    intersection(vec![
        leg("l0", 0, &[directions]),
        leg("l90", 90, &[directions]),
        leg("l180", 180, &[directions]),
        leg("l270", 270, &[directions]),
    ])
}

/// Id of the leg an adjacency slot points at
pub fn leg_id(intersection: &Intersection, index: Option<junction_sim::junction::LegIndex>) -> Option<String> {
    index
        .and_then(|index| intersection.leg_at(index))
        .map(|leg| leg.id().to_string())
}

pub const SL: Directions = Directions::new(true, true, false, false);
pub const SR: Directions = Directions::new(true, false, true, false);
pub const LR: Directions = Directions::new(false, true, true, false);
