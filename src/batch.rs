//! Batch scheduling of every GPX file under a directory.
//!
//! Each file is an independent run with its own smoother state, so files can be processed in
//! parallel. A failing file is recorded and never aborts the batch.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::encode::jsonl::{JsonLinesSink, JsonLinesSinkOpts};
use crate::foundation::error::{ReelError, ReelResult};
use crate::pipeline::{RenderStats, render_track};
use crate::schedule::config::AnimationConfig;
use crate::schedule::rate::FrameSchedule;
use crate::track::io::load_track;

/// Suffix appended to a track's file stem to name its output.
pub const OUTPUT_SUFFIX: &str = "-telemetry.jsonl";

/// Batch execution options.
#[derive(Clone, Debug, Default)]
pub struct BatchOpts {
    /// Process files on a rayon thread pool.
    pub parallel: bool,
    /// Override the worker count (parallel mode only). Must be >= 1 when set.
    pub threads: Option<usize>,
    /// Keep existing outputs instead of overwriting them (the file then counts as failed).
    pub keep_existing: bool,
}

/// One file that could not be processed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BatchFailure {
    /// Input track path.
    pub path: PathBuf,
    /// Rendered error message.
    pub error: String,
}

/// Outcome counters for a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    /// Track files considered.
    pub found: usize,
    /// Files scheduled and written.
    pub succeeded: usize,
    /// Files that failed.
    pub failed: usize,
    /// Failure details, in input order.
    pub failures: Vec<BatchFailure>,
}

/// Recursively collect `.gpx` files (any case) under `root`, sorted by path.
pub fn find_track_files(root: &Path) -> ReelResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ReelError::Other(anyhow::anyhow!(
            "'{}' is not a directory",
            root.display()
        )));
    }

    let mut out = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries =
            std::fs::read_dir(&dir).with_context(|| format!("read dir '{}'", dir.display()))?;
        for entry in entries {
            let path = entry
                .with_context(|| format!("read entry in '{}'", dir.display()))?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if is_gpx(&path) {
                out.push(path);
            }
        }
    }
    out.sort();
    Ok(out)
}

fn is_gpx(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gpx"))
}

/// Output path for `input`: `<dir>/<stem>-telemetry.jsonl`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// Load, schedule and write one track file next to its input.
pub fn process_file(
    input: &Path,
    config: &AnimationConfig,
    keep_existing: bool,
) -> ReelResult<(FrameSchedule, RenderStats)> {
    let track = load_track(input)?;
    let mut opts = JsonLinesSinkOpts::new(output_path_for(input));
    opts.overwrite = !keep_existing;
    let mut sink = JsonLinesSink::new(opts);
    render_track(&track, config, &mut sink)
}

/// Process every file in `files`, collecting per-file outcomes.
///
/// Fails up front only for an invalid config or thread count; per-file errors are recorded.
#[tracing::instrument(skip_all, fields(files = files.len(), parallel = opts.parallel))]
pub fn run_batch(
    files: &[PathBuf],
    config: &AnimationConfig,
    opts: &BatchOpts,
) -> ReelResult<BatchSummary> {
    config.validate()?;

    let run_one = |path: &PathBuf| -> Option<BatchFailure> {
        tracing::info!(path = %path.display(), "processing track");
        match process_file(path, config, opts.keep_existing) {
            Ok((timing, stats)) => {
                tracing::info!(
                    path = %path.display(),
                    frames = stats.frames_total,
                    fps = timing.fps,
                    "track done"
                );
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "track failed");
                Some(BatchFailure {
                    path: path.clone(),
                    error: format!("{e:#}"),
                })
            }
        }
    };

    let outcomes: Vec<Option<BatchFailure>> = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| files.par_iter().map(run_one).collect())
    } else {
        files.iter().map(run_one).collect()
    };

    let failures: Vec<BatchFailure> = outcomes.into_iter().flatten().collect();
    let summary = BatchSummary {
        found: files.len(),
        succeeded: files.len() - failures.len(),
        failed: failures.len(),
        failures,
    };
    tracing::info!(
        found = summary.found,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch finished"
    );
    Ok(summary)
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::invalid_config(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
