use junction_sim::junction::Directions;

/// Test the lane ordering index for every combination of movements
#[test]
fn test_sorting_index_table() {
    // (straight, left, right) -> sorting index
    let expected = [
        ((false, false, false), 0),
        ((true, false, false), 3),
        ((false, true, false), 1),
        ((false, false, true), 5),
        ((true, true, false), 2),
        ((true, false, true), 4),
        ((false, true, true), 0),
        ((true, true, true), 6),
    ];

    for back in [false, true] {
        for ((straight, left, right), index) in expected {
            let directions = Directions::new(straight, left, right, back);
            assert_eq!(directions.sorting_index(), index, "{}", directions);
        }
    }
}

#[test]
fn test_connections_count() {
    assert_eq!(Directions::straight_left_right().connections_count(), 3);
    assert_eq!(Directions::new(true, true, false, false).connections_count(), 2);
    assert_eq!(Directions::new(true, false, true, true).connections_count(), 2);
    assert_eq!(Directions::straight_only().connections_count(), 1);
    assert_eq!(Directions::left_only().connections_count(), 1);
    assert_eq!(Directions::new(false, true, true, false).connections_count(), 1);
}

#[test]
fn test_classification() {
    let left_right = Directions::new(false, true, true, false);
    assert!(left_right.is_left_right_only());
    assert!(!left_right.is_left_only());
    assert!(!Directions::straight_left_right().is_left_right_only());

    assert!(Directions::new(false, false, false, true).has_no_direction());
    assert!(Directions::NONE.has_no_direction());
    assert!(!Directions::right_only().has_no_direction());
}

#[test]
fn test_merged_and_display() {
    let merged = Directions::left_only().merged(&Directions::new(true, false, false, true));
    assert_eq!(merged, Directions::new(true, true, false, true));
    assert_eq!(merged.to_string(), "SLB");
    assert_eq!(Directions::NONE.to_string(), "-");
}

/// Test that omitted movements default to false when deserialising
#[test]
fn test_deserialize_partial() {
    let directions: Directions = serde_json::from_str(r#"{ "left": true }"#).unwrap();
    assert_eq!(directions, Directions::left_only());
}
