use std::iter::FusedIterator;

use crate::foundation::core::frames_for;
use crate::foundation::error::{ReelError, ReelResult};
use crate::schedule::config::AnimationConfig;
use crate::schedule::rate::{FrameSchedule, negotiate};
use crate::schedule::smoother::{ElevationLabel, ElevationSmoother};
use crate::schedule::visibility::DrawWindow;
use crate::track::model::Track;

/// How the position marker is drawn on a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerEmphasis {
    /// Drawing has started.
    Full,
    /// Before the draw-start offset: shown, but de-emphasized.
    Dimmed,
}

/// Display state of one output frame. Indices refer to fixes of the scheduled track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameState {
    /// Last fix included in the drawn path (which starts at the draw window), if any.
    pub path_end: Option<usize>,
    /// Fix marking the current position.
    pub marker_index: usize,
    /// Marker emphasis.
    pub marker: MarkerEmphasis,
    /// Altitude label update.
    pub elevation: ElevationLabel,
}

/// Last fix covered by frame `frame` when each frame advances `points_per_frame` fixes.
pub fn last_index_for(frame: u64, points_per_frame: usize, track_len: usize) -> usize {
    let frame = usize::try_from(frame).unwrap_or(usize::MAX);
    frame
        .saturating_add(1)
        .saturating_mul(points_per_frame)
        .saturating_sub(1)
        .min(track_len.saturating_sub(1))
}

/// Schedule `track` for playback: negotiate timing and produce per-frame display states.
///
/// Config is validated first. The returned iterator is lazy and owns fresh smoother state, so
/// calling `schedule` again on the same input yields an identical sequence.
#[tracing::instrument(skip(track, config), fields(fixes = track.len()))]
pub fn schedule<'a>(
    track: &'a Track,
    config: &AnimationConfig,
) -> ReelResult<(FrameSchedule, FrameStates<'a>)> {
    config.validate()?;
    if track.is_empty() {
        return Err(ReelError::empty_track("track has no fixes"));
    }

    let total_frames = frames_for(track.len(), config.points_per_frame);
    if total_frames == 0 {
        return Err(ReelError::EmptySchedule);
    }

    let window = DrawWindow::resolve(track, config.draw_start_offset());
    if window.is_empty() {
        tracing::warn!(
            offset_s = config.draw_start_offset_s,
            "draw-start offset exceeds the track span, no path will be drawn"
        );
    }

    let timing = negotiate(track, total_frames, config);
    tracing::info!(
        total_frames,
        interval_ms = timing.interval_ms,
        fps = timing.fps,
        draw_start_index = window.start_index,
        "scheduled track"
    );

    let states = FrameStates {
        track,
        points_per_frame: config.points_per_frame,
        window,
        smoother: ElevationSmoother::new(
            track,
            config.elevation_window_size,
            config.elevation_update_threshold_m,
        ),
        next: 0,
        total: total_frames,
        progress_every: (total_frames / 20).max(1),
    };
    Ok((timing, states))
}

/// Lazy, finite sequence of [`FrameState`]s in frame order.
///
/// Not restartable: it owns the smoothing state of its run. Dropping it early is always safe.
#[derive(Debug)]
pub struct FrameStates<'a> {
    track: &'a Track,
    points_per_frame: usize,
    window: DrawWindow,
    smoother: ElevationSmoother<'a>,
    next: u64,
    total: u64,
    progress_every: u64,
}

impl FrameStates<'_> {
    /// The resolved draw window.
    pub fn window(&self) -> DrawWindow {
        self.window
    }

    /// Total number of frames in the run.
    pub fn total_frames(&self) -> u64 {
        self.total
    }
}

impl Iterator for FrameStates<'_> {
    type Item = FrameState;

    fn next(&mut self) -> Option<FrameState> {
        if self.next >= self.total {
            return None;
        }
        let frame = self.next;
        self.next += 1;

        let last_index = last_index_for(frame, self.points_per_frame, self.track.len());
        let current_time = self.track.fixes()[last_index].timestamp;
        let elevation = self.smoother.update(last_index);

        let (path_end, marker) = if self.window.is_open_at(current_time) {
            let path_end = (self.window.start_index <= last_index).then_some(last_index);
            (path_end, MarkerEmphasis::Full)
        } else {
            (None, MarkerEmphasis::Dimmed)
        };

        if frame % self.progress_every == 0 {
            tracing::debug!(frame = frame + 1, total = self.total, "frame progress");
        }

        Some(FrameState {
            path_end,
            marker_index: last_index,
            marker,
            elevation,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameStates<'_> {}

impl FusedIterator for FrameStates<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
