use chrono::{DateTime, TimeDelta, Utc};

use crate::track::model::Track;

/// The part of a track the path is drawn over: fixes from `start_index` onward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DrawWindow {
    /// First drawable fix, or the track length when nothing is ever drawn.
    pub start_index: usize,
    /// Instant at which drawing begins (`first.timestamp + offset`).
    ///
    /// `None` when that instant is not representable, which also means nothing is drawn.
    pub start_time: Option<DateTime<Utc>>,
    track_len: usize,
}

impl DrawWindow {
    /// Find the first fix at or after `track[0].timestamp + offset`.
    ///
    /// Ties resolve to the earliest index. When no fix qualifies the window starts at
    /// `track.len()`.
    pub fn resolve(track: &Track, offset: TimeDelta) -> Self {
        let start_time = track.first().timestamp.checked_add_signed(offset);
        let start_index = start_time
            .and_then(|threshold| {
                track
                    .fixes()
                    .iter()
                    .position(|fix| fix.timestamp >= threshold)
            })
            .unwrap_or(track.len());

        Self {
            start_index,
            start_time,
            track_len: track.len(),
        }
    }

    /// `true` when the offset exceeds the track's span.
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.track_len
    }

    /// Whether drawing has begun at instant `t`.
    pub fn is_open_at(&self, t: DateTime<Utc>) -> bool {
        self.start_time.is_some_and(|start| t >= start)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/visibility.rs"]
mod tests;
