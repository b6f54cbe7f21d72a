/// Zero-based index of one output frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The frame after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Number of frames needed to cover `len` items advancing `per_frame` items per frame.
///
/// Returns 0 when either input is 0.
pub fn frames_for(len: usize, per_frame: usize) -> u64 {
    if per_frame == 0 {
        return 0;
    }
    len.div_ceil(per_frame) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
