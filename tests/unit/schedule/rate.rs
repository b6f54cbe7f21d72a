use super::*;
use crate::track::model::Fix;
use chrono::{TimeDelta, TimeZone, Utc};

fn track_spanning(n: usize, span_ms: i64) -> Track {
    let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let step = if n > 1 { span_ms / (n as i64 - 1) } else { 0 };
    Track::new(
        (0..n)
            .map(|i| Fix {
                longitude: 0.0,
                latitude: 0.0,
                timestamp: t0 + TimeDelta::milliseconds(step * i as i64),
                elevation: None,
            })
            .collect(),
    )
    .unwrap()
}

fn clamps(min: f64, max: f64) -> AnimationConfig {
    AnimationConfig {
        min_interval_ms: min,
        max_interval_ms: max,
        ..AnimationConfig::default()
    }
}

#[test]
fn duration_drives_interval_within_clamps() {
    // 40 fixes over ~20 s (39 steps of 512 ms = 19.968 s) -> 499.2 ms per frame.
    let track = track_spanning(40, 19_968);
    let s = negotiate(&track, 40, &clamps(20.0, 1000.0));
    assert_eq!(s.source, IntervalSource::Track);
    assert!((s.interval_ms - 499.2).abs() < 1e-9);
    assert!((s.fps - 1000.0 / 499.2).abs() < 1e-9);
    assert!((s.expected_duration_secs() - 19.968).abs() < 1e-9);
}

#[test]
fn single_fix_uses_reference_interval() {
    let track = track_spanning(1, 0);
    let cfg = AnimationConfig {
        reference_interval_ms: 40.0,
        ..AnimationConfig::default()
    };
    let s = negotiate(&track, 1, &cfg);
    assert_eq!(s.source, IntervalSource::Reference);
    assert_eq!(s.interval_ms, 40.0);
    assert_eq!(s.fps, 25.0);
}

#[test]
fn zero_span_uses_reference_interval() {
    let track = track_spanning(5, 0);
    let s = negotiate(&track, 5, &AnimationConfig::default());
    assert_eq!(s.source, IntervalSource::Reference);
    assert_eq!(s.interval_ms, 50.0);
    assert_eq!(s.fps, 20.0);
}

#[test]
fn negative_span_uses_reference_interval() {
    let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let fixes = vec![
        Fix {
            longitude: 0.0,
            latitude: 0.0,
            timestamp: t0 + TimeDelta::seconds(10),
            elevation: None,
        },
        Fix {
            longitude: 0.0,
            latitude: 0.0,
            timestamp: t0,
            elevation: None,
        },
    ];
    let track = Track::new(fixes).unwrap();
    let s = negotiate(&track, 2, &AnimationConfig::default());
    assert_eq!(s.source, IntervalSource::Reference);
}

#[test]
fn short_span_clamps_to_minimum() {
    // 100 frames over 1 s -> 10 ms, below the 20 ms floor.
    let track = track_spanning(100, 1_000);
    let s = negotiate(&track, 100, &clamps(20.0, 1000.0));
    assert_eq!(s.source, IntervalSource::ClampedMin);
    assert_eq!(s.interval_ms, 20.0);
    assert_eq!(s.fps, 50.0);
}

#[test]
fn long_span_clamps_to_maximum() {
    // 10 frames over 1 h -> 360 s per frame, far above 100 ms.
    let track = track_spanning(10, 3_600_000);
    let s = negotiate(&track, 10, &AnimationConfig::chroma_key());
    assert_eq!(s.source, IntervalSource::ClampedMax);
    assert_eq!(s.interval_ms, 100.0);
    assert_eq!(s.fps, 10.0);
}

#[test]
fn interval_on_a_clamp_boundary_is_not_clamped() {
    let track = track_spanning(2, 40);
    let s = negotiate(&track, 2, &clamps(20.0, 20.0));
    assert_eq!(s.source, IntervalSource::Track);
    assert_eq!(s.interval_ms, 20.0);
}
