use super::*;
use crate::track::model::Fix;
use chrono::TimeZone;

fn track_at(secs: &[i64]) -> Track {
    Track::new(
        secs.iter()
            .map(|&s| Fix {
                longitude: 0.0,
                latitude: 0.0,
                timestamp: Utc.timestamp_opt(1_700_000_000 + s, 0).unwrap(),
                elevation: None,
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn zero_offset_starts_at_first_fix() {
    let track = track_at(&[0, 1, 2]);
    let w = DrawWindow::resolve(&track, TimeDelta::zero());
    assert_eq!(w.start_index, 0);
    assert!(!w.is_empty());
    assert!(w.is_open_at(track.first().timestamp));
}

#[test]
fn offset_picks_first_fix_at_or_after_threshold() {
    let track = track_at(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let w = DrawWindow::resolve(&track, TimeDelta::seconds(5));
    assert_eq!(w.start_index, 5);

    let w = DrawWindow::resolve(&track, TimeDelta::milliseconds(4_500));
    assert_eq!(w.start_index, 5);
}

#[test]
fn ties_resolve_to_first_matching_index() {
    let track = track_at(&[0, 2, 2, 2, 3]);
    let w = DrawWindow::resolve(&track, TimeDelta::seconds(1));
    assert_eq!(w.start_index, 1);
}

#[test]
fn offset_beyond_span_yields_track_len() {
    let track = track_at(&[0, 1, 2]);
    let w = DrawWindow::resolve(&track, TimeDelta::seconds(30));
    assert_eq!(w.start_index, 3);
    assert!(w.is_empty());
    assert!(!w.is_open_at(track.last().timestamp));
}

#[test]
fn unrepresentable_threshold_draws_nothing() {
    let track = track_at(&[0, 1]);
    let w = DrawWindow::resolve(&track, TimeDelta::MAX);
    assert_eq!(w.start_time, None);
    assert_eq!(w.start_index, 2);
    assert!(!w.is_open_at(track.last().timestamp));
}
