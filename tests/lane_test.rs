mod common;

use common::{intersection, leg, leg_id, LR};
use junction_sim::junction::{
    Angle, Coordinates, Directions, Intersection, JunctionError, Lane, LaneConflict,
    LaneOperation, Leg, SignalGroup, SignalGroupId, Signalisation,
};

fn conflict(result: Result<(), JunctionError>) -> Option<LaneConflict> {
    match result {
        Err(JunctionError::LegValidation { conflict, .. }) => Some(conflict),
        _ => None,
    }
}

/// A four way junction where leg l0 has a left lane and a straight lane
fn junction_with_split_leg() -> Intersection {
    intersection(vec![
        leg("l0", 0, &[Directions::left_only(), Directions::straight_only()]),
        leg("l90", 90, &[Directions::straight_left_right()]),
        leg("l180", 180, &[Directions::straight_left_right()]),
        leg("l270", 270, &[Directions::straight_left_right()]),
    ])
}

fn lane_summary(junction: &Intersection, leg_id: &str) -> Vec<(String, Directions)> {
    junction
        .leg(leg_id)
        .unwrap()
        .all_lanes()
        .iter()
        .map(|lane| (lane.net_id(), *lane.directions()))
        .collect()
}

/// Test that two pure left lanes are accepted and a third is rejected
#[test]
fn test_left_only_limit() {
    let two = leg("l0", 0, &[Directions::left_only(), Directions::left_only()]);
    assert_eq!(two.validate(), Ok(()));

    let three = leg("l0", 0, &[Directions::left_only(); 3]);
    assert_eq!(conflict(three.validate()), Some(LaneConflict::TooManyLeftOnly));

    let right = leg("l0", 0, &[Directions::right_only(); 3]);
    assert_eq!(conflict(right.validate()), Some(LaneConflict::TooManyRightOnly));
}

#[test]
fn test_multi_movement_lanes_must_be_alone() {
    let all = leg(
        "l0",
        0,
        &[Directions::straight_left_right(), Directions::straight_only()],
    );
    assert_eq!(conflict(all.validate()), Some(LaneConflict::AllDirectionsNotAlone));

    let left_right = leg("l0", 0, &[LR, Directions::straight_only()]);
    assert_eq!(conflict(left_right.validate()), Some(LaneConflict::LeftRightNotAlone));

    assert_eq!(leg("l0", 0, &[LR]).validate(), Ok(()));
}

/// Test that lanes are ordered left to right and numbered from the right
#[test]
fn test_lane_numbering() {
    let junction = junction_with_split_leg();
    assert_eq!(
        lane_summary(&junction, "l0"),
        [
            ("l0si_1".to_string(), Directions::left_only()),
            ("l0si_0".to_string(), Directions::straight_only()),
        ]
    );
}

#[test]
fn test_add_lane() {
    let mut junction = junction_with_split_leg();
    junction
        .apply_lane_operation(
            "l0",
            &LaneOperation::Add {
                sibling: "l0si_0".to_string(),
                directions: Directions::left_only(),
            },
        )
        .unwrap();

    assert_eq!(
        lane_summary(&junction, "l0"),
        [
            ("l0si_2".to_string(), Directions::left_only()),
            ("l0si_1".to_string(), Directions::left_only()),
            ("l0si_0".to_string(), Directions::straight_only()),
        ]
    );
}

/// Test that an add breaking validation leaves the leg unchanged
#[test]
fn test_add_lane_rolls_back() {
    let mut junction = junction_with_split_leg();
    let add_left = LaneOperation::Add {
        sibling: "l0si_0".to_string(),
        directions: Directions::left_only(),
    };
    junction.apply_lane_operation("l0", &add_left).unwrap();
    let before = lane_summary(&junction, "l0");

    let result = junction.apply_lane_operation("l0", &add_left);
    match result {
        Err(JunctionError::LaneOperation(message)) => {
            assert!(message.contains("only 2 pure left lanes"), "{}", message)
        }
        other => panic!("expected a rejected lane operation, got {:?}", other),
    }
    assert_eq!(lane_summary(&junction, "l0"), before);
}

#[test]
fn test_change_lane_rolls_back() {
    let mut junction = junction_with_split_leg();
    let result = junction.apply_lane_operation(
        "l0",
        &LaneOperation::Change {
            lane: "l0si_0".to_string(),
            directions: Directions::straight_left_right(),
        },
    );
    assert!(matches!(result, Err(JunctionError::LaneOperation(_))));
    assert_eq!(
        lane_summary(&junction, "l0")[1],
        ("l0si_0".to_string(), Directions::straight_only())
    );
}

/// Test that changing a lane refreshes the leg's turns and lane outputs
#[test]
fn test_change_lane_refreshes_turns() {
    let mut junction = junction_with_split_leg();
    junction
        .apply_lane_operation(
            "l0",
            &LaneOperation::Change {
                lane: "l0si_1".to_string(),
                directions: Directions::right_only(),
            },
        )
        .unwrap();

    let l0 = junction.leg("l0").unwrap();
    assert_eq!(*l0.directions(), Directions::new(true, false, true, false));
    assert_eq!(l0.left_most_leg(), None);
    assert_eq!(leg_id(&junction, l0.right_most_leg()).as_deref(), Some("l270"));

    let lanes = l0.all_lanes();
    let right_lane = lanes.last().unwrap();
    assert_eq!(right_lane.net_id(), "l0si_0");
    assert_eq!(
        leg_id(&junction, right_lane.output_legs().first().copied()).as_deref(),
        Some("l270")
    );
}

#[test]
fn test_delete_lane() {
    let mut junction = junction_with_split_leg();
    junction
        .apply_lane_operation(
            "l0",
            &LaneOperation::Delete {
                lane: "l0si_1".to_string(),
            },
        )
        .unwrap();

    assert_eq!(
        lane_summary(&junction, "l0"),
        [("l0si_0".to_string(), Directions::straight_only())]
    );
    let l0 = junction.leg("l0").unwrap();
    assert_eq!(*l0.directions(), Directions::straight_only());
    assert_eq!(l0.left_most_leg(), None);
    assert_eq!(leg_id(&junction, l0.straight_leg()).as_deref(), Some("l180"));
}

/// Test that the last lane of a signal group cannot be deleted
#[test]
fn test_delete_last_lane_refused() {
    let mut junction = junction_with_split_leg();
    let result = junction.apply_lane_operation(
        "l90",
        &LaneOperation::Delete {
            lane: "l90si_0".to_string(),
        },
    );
    assert!(matches!(result, Err(JunctionError::LaneOperation(_))));
    assert_eq!(junction.leg("l90").unwrap().all_lanes().len(), 1);
}

#[test]
fn test_lane_without_direction_refused() {
    let mut junction = junction_with_split_leg();
    for operation in [
        LaneOperation::Add {
            sibling: "l0si_0".to_string(),
            directions: Directions::NONE,
        },
        LaneOperation::Change {
            lane: "l0si_0".to_string(),
            directions: Directions::new(false, false, false, true),
        },
    ] {
        let result = junction.apply_lane_operation("l0", &operation);
        assert!(matches!(result, Err(JunctionError::LaneOperation(_))), "{:?}", operation);
    }
    assert_eq!(lane_summary(&junction, "l0").len(), 2);
}

#[test]
fn test_unknown_lane_or_leg() {
    let mut junction = junction_with_split_leg();
    let operation = LaneOperation::Delete {
        lane: "l0si_9".to_string(),
    };
    assert!(matches!(
        junction.apply_lane_operation("l0", &operation),
        Err(JunctionError::LaneOperation(_))
    ));
    assert!(matches!(
        junction.apply_lane_operation("nowhere", &operation),
        Err(JunctionError::ElementNotFound(_))
    ));
}

/// Test that a back movement on a lane points it at its own leg
#[test]
fn test_back_lane_outputs_origin() {
    let junction = intersection(vec![
        leg("l0", 0, &[Directions::new(true, false, false, true)]),
        leg("l180", 180, &[Directions::straight_only()]),
    ]);
    let l0 = junction.leg("l0").unwrap();
    let outputs: Vec<Option<String>> = l0.all_lanes()[0]
        .output_legs()
        .iter()
        .map(|index| leg_id(&junction, Some(*index)))
        .collect();
    assert_eq!(outputs, [Some("l180".to_string()), Some("l0".to_string())]);
}

/// Test that a network id shared by two signal groups resolves to the last group
#[test]
fn test_shared_net_id_edits_last_group() {
    let mut l0 = Leg::new("l0", Angle::new(0).unwrap(), Coordinates::default());
    for (id, directions) in [(1, Directions::left_only()), (2, Directions::straight_only())] {
        let mut signal_group = SignalGroup::new(SignalGroupId(id), Signalisation::default());
        signal_group.add_lane(Lane::new(signal_group.next_lane_id(), directions, l0.incoming_edge()));
        l0.add_signal_group(signal_group);
    }
    let mut junction = intersection(vec![
        l0,
        leg("l90", 90, &[Directions::straight_left_right()]),
        leg("l180", 180, &[Directions::straight_left_right()]),
        leg("l270", 270, &[Directions::straight_left_right()]),
    ]);

    junction
        .apply_lane_operation(
            "l0",
            &LaneOperation::Change {
                lane: "l0si_0".to_string(),
                directions: Directions::right_only(),
            },
        )
        .unwrap();

    let groups: Vec<(String, Directions)> = junction
        .leg("l0")
        .unwrap()
        .signal_groups()
        .iter()
        .map(|group| (group.lanes()[0].net_id(), *group.lanes()[0].directions()))
        .collect();
    assert_eq!(
        groups,
        [
            ("l0si_0".to_string(), Directions::left_only()),
            ("l0si_0".to_string(), Directions::right_only()),
        ]
    );
}

/// Test that an edit changing nothing leaves the leg's directions as loaded
#[test]
fn test_noop_edit_keeps_leg_directions() {
    let mut junction = intersection(vec![
        leg(
            "l0",
            0,
            &[Directions::new(true, false, false, true), Directions::left_only()],
        ),
        leg("l180", 180, &[Directions::straight_only()]),
    ]);
    let before = *junction.leg("l0").unwrap().directions();
    assert_eq!(before, Directions::new(true, true, false, false));

    junction
        .apply_lane_operation(
            "l0",
            &LaneOperation::Change {
                lane: "l0si_1".to_string(),
                directions: Directions::left_only(),
            },
        )
        .unwrap();
    assert_eq!(*junction.leg("l0").unwrap().directions(), before);
}

/// Test that added and changed lanes drop a requested back movement
#[test]
fn test_edited_lanes_have_no_back() {
    let mut junction = junction_with_split_leg();
    junction
        .apply_lane_operation(
            "l0",
            &LaneOperation::Change {
                lane: "l0si_0".to_string(),
                directions: Directions::new(true, false, false, true),
            },
        )
        .unwrap();
    junction
        .apply_lane_operation(
            "l0",
            &LaneOperation::Add {
                sibling: "l0si_0".to_string(),
                directions: Directions::new(false, false, true, true),
            },
        )
        .unwrap();

    let lanes = lane_summary(&junction, "l0");
    assert_eq!(lanes.len(), 3);
    assert!(lanes.iter().all(|(_, directions)| !directions.back), "{:?}", lanes);
    assert_eq!(*junction.leg("l0").unwrap().directions(), Directions::new(true, true, true, false));
}
