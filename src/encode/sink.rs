use crate::foundation::core::FrameIndex;
use crate::foundation::error::ReelResult;
use crate::schedule::rate::FrameSchedule;
use crate::schedule::scheduler::FrameState;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SinkConfig {
    /// Negotiated timing.
    pub schedule: FrameSchedule,
    /// Number of fixes in the scheduled track; frame indices refer into it.
    pub track_len: usize,
    /// First fix of the drawn path (`track_len` when nothing is drawn).
    pub draw_start_index: usize,
    /// Longitude/latitude framing of the drawn part of the track.
    pub bounds: kurbo::Rect,
}

/// Consumer of scheduled frames, typically a renderer/encoder.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, between
/// one `begin` and one `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameState) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameState)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameState)] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameState) -> ReelResult<()> {
        self.frames.push((idx, *frame));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.finished = true;
        Ok(())
    }
}
