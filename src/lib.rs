//! trackreel schedules a moving-position overlay for a recorded GPS track.
//!
//! Given a [`Track`] and an [`AnimationConfig`], the scheduler produces a fixed-length sequence
//! of per-frame display states (drawn path prefix, position marker, smoothed altitude label) and
//! negotiates a frame interval so that playback lasts as long as the recording did.
//!
//! # Pipeline overview
//!
//! 1. **Load**: GPX or JSON file -> [`Track`] ([`load_track`])
//! 2. **Schedule**: `Track + AnimationConfig -> (FrameSchedule, FrameStates)` ([`schedule`])
//! 3. **Sink**: stream frames into a [`FrameSink`] ([`render_track`]); rasterizing and encoding
//!    are left to whatever sits behind the sink
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: scheduling depends only on the track and config; no wall clock, no
//!   shared state. Each run owns its smoother, so tracks can be scheduled in parallel.
//! - **No IO in the scheduler**: loading and writing live at the edges.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod encode;
mod foundation;
mod schedule;
mod track;

/// Batch processing of track directories.
pub mod batch;
/// Schedule-to-sink driver.
pub mod pipeline;

pub use encode::jsonl::{JsonLinesSink, JsonLinesSinkOpts, ensure_parent_dir};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{FrameIndex, frames_for};
pub use foundation::error::{ReelError, ReelResult};
pub use pipeline::{RenderStats, VIEW_MARGIN_FRAC, render_track};
pub use schedule::config::AnimationConfig;
pub use schedule::rate::{FrameSchedule, IntervalSource, negotiate};
pub use schedule::scheduler::{FrameState, FrameStates, MarkerEmphasis, last_index_for, schedule};
pub use schedule::smoother::{ElevationLabel, ElevationSmoother, SmootherState};
pub use schedule::visibility::DrawWindow;
pub use track::io::{load_track, read_gpx, read_json};
pub use track::model::{Fix, MIN_VIEW_SPAN_DEG, RawSample, Track};
