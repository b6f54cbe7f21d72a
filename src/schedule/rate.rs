use crate::schedule::config::AnimationConfig;
use crate::track::model::Track;

/// Which rule produced a [`FrameSchedule`]'s interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalSource {
    /// Track duration was unusable (fewer than two fixes, or zero/negative span).
    Reference,
    /// Track duration divided by the frame count, within clamps.
    Track,
    /// Track-derived interval was below `min_interval_ms`.
    ClampedMin,
    /// Track-derived interval was above `max_interval_ms`.
    ClampedMax,
}

/// Playback timing for a scheduled track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSchedule {
    /// Number of output frames.
    pub total_frames: u64,
    /// Milliseconds between frames (> 0).
    pub interval_ms: f64,
    /// Frames per second, `1000 / interval_ms`.
    pub fps: f64,
    /// How `interval_ms` was chosen.
    pub source: IntervalSource,
}

impl FrameSchedule {
    /// Playback length of the rendered video in seconds.
    pub fn expected_duration_secs(&self) -> f64 {
        self.total_frames as f64 / self.fps
    }
}

/// Pick the frame interval so playback length matches the track's recorded span.
///
/// Falls back to `reference_interval_ms` when the span is unusable; otherwise clamps
/// `span / total_frames` to `[min_interval_ms, max_interval_ms]`.
pub fn negotiate(track: &Track, total_frames: u64, config: &AnimationConfig) -> FrameSchedule {
    let (interval_ms, source) = pick_interval(track, total_frames, config);
    FrameSchedule {
        total_frames,
        interval_ms,
        fps: 1000.0 / interval_ms,
        source,
    }
}

fn pick_interval(
    track: &Track,
    total_frames: u64,
    config: &AnimationConfig,
) -> (f64, IntervalSource) {
    if track.len() < 2 {
        tracing::info!(
            interval_ms = config.reference_interval_ms,
            "fewer than two fixes, using reference interval"
        );
        return (config.reference_interval_ms, IntervalSource::Reference);
    }

    let span = track.duration();
    let duration_s = match span.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => span.num_milliseconds() as f64 / 1e3,
    };
    if duration_s <= 0.0 || total_frames == 0 {
        tracing::info!(
            duration_s,
            interval_ms = config.reference_interval_ms,
            "track span is not positive, using reference interval"
        );
        return (config.reference_interval_ms, IntervalSource::Reference);
    }

    let computed_ms = duration_s * 1000.0 / total_frames as f64;
    if computed_ms < config.min_interval_ms {
        tracing::warn!(
            computed_ms,
            min_interval_ms = config.min_interval_ms,
            "interval below minimum, clamping (playback will run longer than the track)"
        );
        (config.min_interval_ms, IntervalSource::ClampedMin)
    } else if computed_ms > config.max_interval_ms {
        tracing::warn!(
            computed_ms,
            max_interval_ms = config.max_interval_ms,
            "interval above maximum, clamping (playback will run shorter than the track)"
        );
        (config.max_interval_ms, IntervalSource::ClampedMax)
    } else {
        (computed_ms, IntervalSource::Track)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/rate.rs"]
mod tests;
