//! Tests for timeline events
//!
//! These tests verify how events seed, advance, and shift their own
//! timelines, and how invalid draws are rejected.

use event_timeline::events::{compare_timestamps, DistributionConfig, Event, RandomDraw};
use event_timeline::simulation::SimulationError;
use event_timeline::types::EventKind;
use std::cmp::Ordering;

/// Draw source replaying a fixed list of values
fn replay(values: Vec<f64>) -> impl FnMut() -> f64 {
    let mut iter = values.into_iter();
    move || iter.next().unwrap_or(0.0)
}

/// Test that construction records the first draw as the first interval
#[test]
fn test_first_interval_equals_first_occurrence() {
    let event = Event::new("first", || 3.25).unwrap();
    assert_eq!(event.interval(), event.current_timestamp());
    assert_eq!(event.previous_timestamp(), 0.0);

    let seeded = RandomDraw::seeded(DistributionConfig::exponential(0.5), 11).unwrap();
    let event = Event::new("seeded", seeded).unwrap();
    assert_eq!(event.interval(), event.current_timestamp());
}

/// Test that n advances sum the draws and never move backwards
#[test]
fn test_advances_sum_draws() {
    let draws = vec![0.5, 1.5, 0.0, 2.0, 4.0];
    let expected: f64 = draws.iter().sum();
    let mut event = Event::new("sum", replay(draws)).unwrap();

    let mut last = event.current_timestamp();
    for _ in 0..4 {
        let next = event.advance().unwrap();
        assert!(next >= last);
        assert_eq!(event.previous_timestamp(), last);
        last = next;
    }
    assert_eq!(event.current_timestamp(), expected);
}

/// Test that advancing a seeded exponential event is monotone
#[test]
fn test_random_event_is_monotone() {
    let source = RandomDraw::seeded(DistributionConfig::exponential(2.0), 5).unwrap();
    let mut event = Event::new("random", source).unwrap();

    let mut last = event.current_timestamp();
    for _ in 0..1_000 {
        let next = event.advance().unwrap();
        assert!(next >= last);
        assert!(event.interval() >= 0.0);
        last = next;
    }
}

/// Test that offsetting the origin shifts exactly and moves the boundary
#[test]
fn test_offset_origin_shifts_exactly() {
    let mut event = Event::expiring("shifted", 3.0, || 2.0).unwrap();
    assert_eq!(event.expire_boundary(), Some(5.0));

    event.offset_origin(10.0);
    assert_eq!(event.current_timestamp(), 12.0);
    assert_eq!(event.previous_timestamp(), 0.0);
    assert_eq!(event.expire_boundary(), Some(15.0));
}

/// Test expiring event boundaries and expiry detection
#[test]
fn test_expiring_event_boundary() {
    let mut event = Event::expiring("session", 2.0, || 1.0).unwrap();
    assert_eq!(event.kind(), EventKind::Expiring);
    assert!(event.is_expiring());
    assert!(!event.is_expired());

    event.advance().unwrap();
    assert!(!event.is_expired());
    event.advance().unwrap();
    // Reaching the boundary exactly counts as expired
    assert_eq!(event.current_timestamp(), 3.0);
    assert!(event.is_expired());
}

/// Test that a zero expire interval expires on the first occurrence
#[test]
fn test_zero_expire_interval() {
    let event = Event::expiring("instant", 0.0, || 1.0).unwrap();
    assert!(event.is_expired());
}

/// Test that invalid draws and intervals are type constraint errors
#[test]
fn test_invalid_values_rejected() {
    for bad in [-1.0, f64::NAN, f64::INFINITY] {
        let err = Event::new("bad", move || bad).unwrap_err();
        assert!(matches!(err, SimulationError::TypeConstraint(_)));
    }

    let err = Event::expiring("bad", -0.5, || 1.0).unwrap_err();
    assert!(matches!(err, SimulationError::TypeConstraint(_)));

    // A failing advance leaves the timeline untouched
    let mut event = Event::new("later", replay(vec![1.0, -3.0])).unwrap();
    assert!(event.advance().is_err());
    assert_eq!(event.current_timestamp(), 1.0);
    assert_eq!(event.previous_timestamp(), 0.0);
}

/// Test that ordering only looks at current timestamps
#[test]
fn test_compare_timestamps() {
    let early = Event::new("zzz", || 1.0).unwrap();
    let late = Event::new("aaa", || 2.0).unwrap();
    let same = Event::new("other", || 1.0).unwrap();

    assert_eq!(compare_timestamps(&early, &late), Ordering::Less);
    assert_eq!(compare_timestamps(&late, &early), Ordering::Greater);
    assert_eq!(compare_timestamps(&early, &same), Ordering::Equal);
}

/// Test the event display format
#[test]
fn test_event_display() {
    let event = Event::new("Event1", || 1.5).unwrap();
    assert_eq!(event.to_string(), "[Event1]: 1.5");
}
