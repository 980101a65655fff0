use junction_sim::junction::{Angle, Coordinates, JunctionError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Test that angles outside of [0, 360) are rejected
#[test]
fn test_angle_range() {
    assert_eq!(Angle::new(0).unwrap().value(), 0);
    assert_eq!(Angle::new(359).unwrap().value(), 359);
    assert_eq!(Angle::new(360), Err(JunctionError::InvalidAngle(360)));
    assert_eq!(Angle::new(-1), Err(JunctionError::InvalidAngle(-1)));
    assert!(Angle::try_from(400_i64).is_err());
}

/// Test that angle addition wraps around the full turn
#[test]
fn test_angle_addition_wraps() {
    assert_eq!(Angle::new(50).unwrap().add(309).unwrap().value(), 359);
    assert_eq!(Angle::new(50).unwrap().add(310).unwrap().value(), 0);
    assert_eq!(Angle::new(0).unwrap().add(400).unwrap().value(), 40);
    assert_eq!(Angle::new(90).unwrap().add(0).unwrap().value(), 90);
    assert_eq!(
        Angle::new(10).unwrap().add(-5),
        Err(JunctionError::NegativeAngleDelta(-5))
    );
}

/// Test angle addition against plain modular arithmetic on sampled input
#[test]
fn test_angle_addition_sampled() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let start: i64 = rng.random_range(0..360);
        let delta: i64 = rng.random_range(0..100_000);
        let sum = Angle::new(start).unwrap().add(delta).unwrap();
        assert_eq!(i64::from(sum.value()), (start + delta) % 360);
    }
}

#[test]
fn test_angle_opposite_and_within() {
    assert_eq!(Angle::new(90).unwrap().opposite().value(), 270);
    assert_eq!(Angle::new(270).unwrap().opposite().value(), 90);
    assert!(Angle::new(45).unwrap().within(45, 135));
    assert!(Angle::new(135).unwrap().within(45, 135));
    assert!(!Angle::new(136).unwrap().within(45, 135));
}

/// Test that components closer than 0.01 to zero snap to exactly zero
#[test]
fn test_coordinates_snap_to_zero() {
    let coordinates = Coordinates::new(0.009, -0.0099);
    assert_eq!(coordinates.x(), 0.0);
    assert_eq!(coordinates.y(), 0.0);

    let kept = Coordinates::new(0.01, -0.01);
    assert_eq!(kept.x(), 0.01);
    assert_eq!(kept.y(), -0.01);
}

/// Test moving along the four axis angles
#[test]
fn test_move_by_distance() {
    let origin = Coordinates::default();

    let down = origin.move_by_distance(Angle::new(0).unwrap(), 10.0);
    assert_eq!((down.x(), down.y()), (0.0, -10.0));

    let up = origin.move_by_distance(Angle::new(180).unwrap(), 250.0);
    assert_eq!(up.x(), 0.0);
    assert!((up.y() - 250.0).abs() < 1e-9);

    let left = origin.move_by_distance(Angle::new(90).unwrap(), 10.0);
    assert!((left.x() + 10.0).abs() < 1e-9);
    assert_eq!(left.y(), 0.0);
}

/// Test that moving out and back along opposite angles returns to the start
#[test]
fn test_move_round_trip_sampled() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let start = Coordinates::new(rng.random_range(-1000.0..1000.0), rng.random_range(-1000.0..1000.0));
        let angle = Angle::new(rng.random_range(0..360)).unwrap();
        let distance = rng.random_range(0.0..500.0);

        let back = start
            .move_by_distance(angle, distance)
            .move_by_distance(angle.opposite(), distance);
        assert!((back.x() - start.x()).abs() < 0.02, "{} vs {}", back, start);
        assert!((back.y() - start.y()).abs() < 0.02, "{} vs {}", back, start);
    }
}

#[test]
fn test_distance_and_midpoint() {
    let first = Coordinates::new(0.0, 0.0);
    let second = Coordinates::new(3.0, 4.0);
    assert_eq!(first.distance(&second), 5.0);

    let middle = first.midpoint(&second);
    assert_eq!((middle.x(), middle.y()), (1.5, 2.0));
}
