/// Convenience result type used across trackreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by scheduling and pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// The track has no usable fixes (none with coordinates and a timestamp).
    #[error("empty track: {0}")]
    EmptyTrack(String),

    /// A non-empty track still produced zero frames.
    #[error("empty schedule: track produced no frames")]
    EmptySchedule,

    /// A configuration option is outside its domain.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Opaque failure surfaced by a frame sink or renderer.
    #[error("render backend error: {0}")]
    RenderBackend(String),

    /// Malformed track or configuration input.
    #[error("parse error: {0}")]
    Parse(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::EmptyTrack`] value.
    pub fn empty_track(msg: impl Into<String>) -> Self {
        Self::EmptyTrack(msg.into())
    }

    /// Build a [`ReelError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build a [`ReelError::RenderBackend`] value.
    pub fn render_backend(msg: impl Into<String>) -> Self {
        Self::RenderBackend(msg.into())
    }

    /// Build a [`ReelError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
