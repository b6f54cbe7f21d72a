use super::*;

#[test]
fn presets_are_valid() {
    AnimationConfig::map_overlay().validate().unwrap();
    AnimationConfig::chroma_key().validate().unwrap();
    assert_eq!(AnimationConfig::default(), AnimationConfig::map_overlay());
}

#[test]
fn chroma_key_uses_tighter_clamps() {
    let c = AnimationConfig::chroma_key();
    assert_eq!(c.reference_interval_ms, 33.0);
    assert_eq!(c.min_interval_ms, 8.0);
    assert_eq!(c.max_interval_ms, 100.0);
    assert_eq!(c.points_per_frame, 1);
}

#[test]
fn out_of_domain_options_are_rejected() {
    let cases: Vec<(&str, AnimationConfig)> = vec![
        (
            "points_per_frame",
            AnimationConfig {
                points_per_frame: 0,
                ..AnimationConfig::default()
            },
        ),
        (
            "draw_start_offset_s",
            AnimationConfig {
                draw_start_offset_s: -1.0,
                ..AnimationConfig::default()
            },
        ),
        (
            "reference_interval_ms",
            AnimationConfig {
                reference_interval_ms: 0.0,
                ..AnimationConfig::default()
            },
        ),
        (
            "min_interval_ms",
            AnimationConfig {
                min_interval_ms: 0.0,
                ..AnimationConfig::default()
            },
        ),
        (
            "max_interval_ms",
            AnimationConfig {
                min_interval_ms: 50.0,
                max_interval_ms: 40.0,
                ..AnimationConfig::default()
            },
        ),
        (
            "elevation_window_size",
            AnimationConfig {
                elevation_window_size: 0,
                ..AnimationConfig::default()
            },
        ),
        (
            "elevation_update_threshold_m",
            AnimationConfig {
                elevation_update_threshold_m: f64::NAN,
                ..AnimationConfig::default()
            },
        ),
    ];

    for (field, cfg) in cases {
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ReelError::InvalidConfig(_)), "{field}");
        assert!(err.to_string().contains(field), "{field}: {err}");
    }
}

#[test]
fn equal_clamps_are_allowed() {
    let cfg = AnimationConfig {
        min_interval_ms: 40.0,
        max_interval_ms: 40.0,
        ..AnimationConfig::default()
    };
    cfg.validate().unwrap();
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg: AnimationConfig =
        serde_json::from_str(r#"{"points_per_frame":5,"elevation_update_threshold_m":25.0}"#)
            .unwrap();
    assert_eq!(cfg.points_per_frame, 5);
    assert_eq!(cfg.elevation_update_threshold_m, 25.0);
    assert_eq!(cfg.min_interval_ms, 20.0);

    assert!(serde_json::from_str::<AnimationConfig>(r#"{"fps":30}"#).is_err());
}

#[test]
fn draw_start_offset_converts_to_time_delta() {
    let cfg = AnimationConfig {
        draw_start_offset_s: 2.5,
        ..AnimationConfig::default()
    };
    assert_eq!(cfg.draw_start_offset(), TimeDelta::milliseconds(2_500));
    assert_eq!(AnimationConfig::default().draw_start_offset(), TimeDelta::zero());
}

#[test]
fn from_path_reads_and_validates() {
    let dir = std::path::PathBuf::from("target").join("config_unit");
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("good.json");
    std::fs::write(&good, r#"{"points_per_frame":2}"#).unwrap();
    assert_eq!(AnimationConfig::from_path(&good).unwrap().points_per_frame, 2);

    let bad = dir.join("bad.json");
    std::fs::write(&bad, r#"{"points_per_frame":0}"#).unwrap();
    assert!(matches!(
        AnimationConfig::from_path(&bad).unwrap_err(),
        ReelError::InvalidConfig(_)
    ));

    let broken = dir.join("broken.json");
    std::fs::write(&broken, "{").unwrap();
    assert!(matches!(
        AnimationConfig::from_path(&broken).unwrap_err(),
        ReelError::Parse(_)
    ));
}
