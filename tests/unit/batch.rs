use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("batch_unit").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn output_path_sits_next_to_input() {
    assert_eq!(
        output_path_for(Path::new("rides/2024/morning.gpx")),
        PathBuf::from("rides/2024/morning-telemetry.jsonl")
    );
    assert_eq!(
        output_path_for(Path::new("GOPR0001.GPX")),
        PathBuf::from("GOPR0001-telemetry.jsonl")
    );
}

#[test]
fn finds_gpx_files_recursively_and_sorted() {
    let root = scratch("discover");
    std::fs::create_dir_all(root.join("b/deeper")).unwrap();
    std::fs::create_dir_all(root.join("a")).unwrap();
    for rel in ["b/deeper/z.gpx", "a/one.GPX", "top.gpx", "a/notes.txt", "b/x.json"] {
        std::fs::write(root.join(rel), "").unwrap();
    }

    let found = find_track_files(&root).unwrap();
    let rel: Vec<PathBuf> = found
        .iter()
        .map(|p| p.strip_prefix(&root).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        rel,
        vec![
            PathBuf::from("a/one.GPX"),
            PathBuf::from("b/deeper/z.gpx"),
            PathBuf::from("top.gpx"),
        ]
    );
}

#[test]
fn missing_root_is_an_error() {
    let err = find_track_files(Path::new("target/batch_unit/no-such-dir")).unwrap_err();
    assert!(err.to_string().contains("is not a directory"));
}

#[test]
fn zero_threads_and_bad_config_fail_up_front() {
    let opts = BatchOpts {
        parallel: true,
        threads: Some(0),
        keep_existing: false,
    };
    let err = run_batch(&[], &AnimationConfig::default(), &opts).unwrap_err();
    assert!(matches!(err, ReelError::InvalidConfig(_)));

    let bad = AnimationConfig {
        elevation_window_size: 0,
        ..AnimationConfig::default()
    };
    let err = run_batch(&[], &bad, &BatchOpts::default()).unwrap_err();
    assert!(matches!(err, ReelError::InvalidConfig(_)));
}

#[test]
fn empty_batch_summarizes_to_zero() {
    let summary = run_batch(&[], &AnimationConfig::default(), &BatchOpts::default()).unwrap();
    assert_eq!(summary, BatchSummary::default());
}
