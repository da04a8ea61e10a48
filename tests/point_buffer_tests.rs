use approx::assert_relative_eq;
use chart_lod::ChartError;
use chart_lod::core::{DataPoint, DomainRange, PointBuffer};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

fn at_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).expect("valid timestamp")
}

#[test]
fn decimal_samples_become_unix_second_points() {
    let samples = [
        (at_millis(1_700_000_000_000), Decimal::new(12_345, 2)),
        (at_millis(1_700_000_000_500), Decimal::new(-5, 1)),
        (at_millis(1_700_000_060_000), Decimal::ZERO),
    ];
    let buffer = PointBuffer::from_decimal_samples(&samples).expect("convert samples");

    assert_eq!(buffer.point_count(), 3);
    assert_relative_eq!(buffer.point(0).x, 1_700_000_000.0);
    assert_relative_eq!(buffer.point(0).y, 123.45);
    assert_relative_eq!(buffer.point(1).x, 1_700_000_000.5);
    assert_relative_eq!(buffer.point(1).y, -0.5);
    assert_eq!(buffer.point(2), DataPoint::new(1_700_000_060.0, 0.0));
}

#[test]
fn explicit_point_count_is_checked_against_storage() {
    let coords = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let buffer = PointBuffer::with_point_count(coords.clone(), 1).expect("fits");
    assert_eq!(buffer.point_count(), 1);
    assert_eq!(buffer.coords(), &[0.0, 1.0]);
    assert_eq!(buffer.capacity(), 5);

    let err = PointBuffer::with_point_count(coords, 3).expect_err("too few coordinates");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(PointBuffer::with_point_count(Vec::<f64>::new(), usize::MAX).is_err());
}

#[test]
fn odd_trailing_coordinate_is_ignored() {
    let buffer = PointBuffer::new(vec![1.0, 2.0, 3.0]);
    assert_eq!(buffer.point_count(), 1);
    assert_eq!(buffer.get(0), Some(DataPoint::new(1.0, 2.0)));
    assert_eq!(buffer.get(1), None);
}

#[test]
fn clones_alias_storage() {
    let buffer = PointBuffer::from_points(&[DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 1.0)]);
    let alias = buffer.clone();
    let copy = PointBuffer::from(buffer.coords().to_vec());

    assert!(alias.shares_storage_with(&buffer));
    assert!(!copy.shares_storage_with(&buffer));
    assert_eq!(copy, buffer);
    assert_eq!(buffer.byte_len(), 4 * std::mem::size_of::<f64>());
}

#[test]
fn x_range_skips_non_finite_values() {
    let buffer = PointBuffer::new(vec![
        5.0,
        0.0,
        f64::NAN,
        1.0,
        -2.0,
        2.0,
        f64::INFINITY,
        3.0,
        9.0,
        4.0,
    ]);
    assert_eq!(buffer.x_range(), Some(DomainRange::new(-2.0, 9.0)));
    assert_eq!(PointBuffer::empty().x_range(), None);
    assert_eq!(PointBuffer::new(vec![f64::NAN, 0.0]).x_range(), None);
}

#[test]
fn range_queries_are_inclusive() {
    let coords: Vec<f64> = (0..10).flat_map(|i| [i as f64, (i * 10) as f64]).collect();
    let buffer = PointBuffer::new(coords);
    let range = DomainRange::new(2.0, 5.0);

    assert_eq!(buffer.count_in_range(range), 4);
    let inside = buffer.points_in_range(range);
    assert_eq!(inside.point_count(), 4);
    assert_eq!(inside.point(0), DataPoint::new(2.0, 20.0));
    assert_eq!(inside.point(3), DataPoint::new(5.0, 50.0));

    assert_eq!(buffer.count_in_range(DomainRange::new(5.0, 2.0)), 4);
    assert_eq!(buffer.count_in_range(DomainRange::new(20.0, 30.0)), 0);
}

#[test]
fn checked_range_orders_and_validates_bounds() {
    assert_eq!(
        DomainRange::checked(4.0, -1.0).expect("finite"),
        DomainRange::new(-1.0, 4.0)
    );
    assert!(DomainRange::checked(f64::NAN, 1.0).is_err());
    assert_eq!(DomainRange::new(3.0, 1.0).span(), 2.0);
    assert!(DomainRange::new(3.0, 1.0).contains(2.0));
}
