use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::schedule::config::AnimationConfig;
use crate::schedule::rate::FrameSchedule;
use crate::schedule::scheduler::{MarkerEmphasis, schedule};
use crate::schedule::smoother::ElevationLabel;
use crate::track::model::Track;

/// Margin, as a fraction of the drawn span, around the view bounds handed to sinks.
pub const VIEW_MARGIN_FRAC: f64 = 0.05;

/// Counters for one [`render_track`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Frames with a drawn path.
    pub frames_drawn: u64,
    /// Frames with a dimmed marker.
    pub frames_dimmed: u64,
    /// Frames whose altitude label changed text.
    pub label_updates: u64,
}

/// Schedule `track` and stream every frame into `sink`.
///
/// Scheduling errors are returned before the sink sees anything. Errors from the sink are
/// wrapped as [`ReelError::RenderBackend`] and not retried.
#[tracing::instrument(skip_all, fields(fixes = track.len()))]
pub fn render_track(
    track: &Track,
    config: &AnimationConfig,
    sink: &mut dyn FrameSink,
) -> ReelResult<(FrameSchedule, RenderStats)> {
    let (timing, states) = schedule(track, config)?;
    let window = states.window();

    sink.begin(SinkConfig {
        schedule: timing,
        track_len: track.len(),
        draw_start_index: window.start_index,
        bounds: track.view_bounds(window.start_index, VIEW_MARGIN_FRAC),
    })
    .map_err(backend_error)?;

    let mut stats = RenderStats::default();
    let mut idx = FrameIndex(0);
    for state in states {
        sink.push_frame(idx, &state).map_err(backend_error)?;

        stats.frames_total += 1;
        if state.path_end.is_some() {
            stats.frames_drawn += 1;
        }
        if state.marker == MarkerEmphasis::Dimmed {
            stats.frames_dimmed += 1;
        }
        if state.elevation != ElevationLabel::Unchanged {
            stats.label_updates += 1;
        }
        idx = idx.next();
    }

    sink.end().map_err(backend_error)?;

    tracing::info!(
        frames = stats.frames_total,
        expected_duration_s = timing.expected_duration_secs(),
        "rendered track"
    );
    Ok((timing, stats))
}

fn backend_error(err: ReelError) -> ReelError {
    match err {
        ReelError::RenderBackend(_) => err,
        other => ReelError::render_backend(format!("{other:#}")),
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
