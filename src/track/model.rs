use chrono::{DateTime, TimeDelta, Utc};
use kurbo::Rect;

use crate::foundation::error::{ReelError, ReelResult};

/// Smallest longitude/latitude extent (degrees) used when framing a degenerate path.
pub const MIN_VIEW_SPAN_DEG: f64 = 0.0002;

/// One timestamped geographic sample.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fix {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Sample instant (UTC, sub-second precision).
    pub timestamp: DateTime<Utc>,
    /// Elevation in meters, when the source recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

/// A parsed sample before it is known to be usable.
///
/// Parsers produce these; [`Track::from_samples`] keeps the ones that have coordinates and a
/// timestamp.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSample {
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Sample instant.
    pub timestamp: Option<DateTime<Utc>>,
    /// Elevation in meters.
    pub elevation: Option<f64>,
}

impl RawSample {
    fn into_fix(self) -> Option<Fix> {
        Some(Fix {
            longitude: self.longitude?,
            latitude: self.latitude?,
            timestamp: self.timestamp?,
            elevation: self.elevation,
        })
    }
}

/// Ordered, immutable sequence of fixes. Always holds at least one fix.
///
/// Timestamps are expected to be non-decreasing (ties allowed). That ordering is the parser's
/// contract and is not re-checked here.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TrackDef", into = "TrackDef")]
pub struct Track {
    fixes: Vec<Fix>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct TrackDef {
    fixes: Vec<Fix>,
}

impl TryFrom<TrackDef> for Track {
    type Error = ReelError;

    fn try_from(def: TrackDef) -> Result<Self, Self::Error> {
        Track::new(def.fixes)
    }
}

impl From<Track> for TrackDef {
    fn from(track: Track) -> Self {
        Self {
            fixes: track.fixes,
        }
    }
}

impl Track {
    /// Build a track from already-complete fixes.
    pub fn new(fixes: Vec<Fix>) -> ReelResult<Self> {
        if fixes.is_empty() {
            return Err(ReelError::empty_track("track has no fixes"));
        }
        Ok(Self { fixes })
    }

    /// Build a track from raw samples, dropping those without coordinates or a timestamp.
    pub fn from_samples(samples: impl IntoIterator<Item = RawSample>) -> ReelResult<Self> {
        let mut seen = 0usize;
        let fixes: Vec<Fix> = samples
            .into_iter()
            .inspect(|_| seen += 1)
            .filter_map(RawSample::into_fix)
            .collect();
        if fixes.is_empty() {
            return Err(ReelError::empty_track(format!(
                "none of {seen} samples has coordinates and a timestamp"
            )));
        }
        if fixes.len() < seen {
            tracing::debug!(
                kept = fixes.len(),
                dropped = seen - fixes.len(),
                "dropped incomplete samples"
            );
        }
        Ok(Self { fixes })
    }

    /// Number of fixes (always >= 1).
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    /// Always `false` for a constructed track.
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Borrow all fixes in order.
    pub fn fixes(&self) -> &[Fix] {
        &self.fixes
    }

    /// Fix at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Fix> {
        self.fixes.get(index)
    }

    /// First fix.
    pub fn first(&self) -> &Fix {
        &self.fixes[0]
    }

    /// Last fix.
    pub fn last(&self) -> &Fix {
        &self.fixes[self.fixes.len() - 1]
    }

    /// Recorded span from first to last fix. Zero or negative for degenerate input.
    pub fn duration(&self) -> TimeDelta {
        self.last().timestamp - self.first().timestamp
    }

    /// Longitude/latitude box (x = longitude, y = latitude) framing fixes `[from_index, n)`.
    ///
    /// Falls back to the whole track when that range is empty. Each axis is widened by
    /// `margin_frac` of its span; a zero span is first replaced by [`MIN_VIEW_SPAN_DEG`].
    pub fn view_bounds(&self, from_index: usize, margin_frac: f64) -> Rect {
        let fixes = if from_index < self.fixes.len() {
            &self.fixes[from_index..]
        } else {
            &self.fixes[..]
        };

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for fix in fixes {
            min_x = min_x.min(fix.longitude);
            max_x = max_x.max(fix.longitude);
            min_y = min_y.min(fix.latitude);
            max_y = max_y.max(fix.latitude);
        }

        let (x0, x1) = widen(min_x, max_x, margin_frac);
        let (y0, y1) = widen(min_y, max_y, margin_frac);
        Rect::new(x0, y0, x1, y1)
    }
}

fn widen(min: f64, max: f64, margin_frac: f64) -> (f64, f64) {
    let mut span = max - min;
    if span <= 0.0 {
        span = MIN_VIEW_SPAN_DEG;
    }
    let center = (min + max) * 0.5;
    let half = span * 0.5 + span * margin_frac.max(0.0);
    (center - half, center + half)
}

#[cfg(test)]
#[path = "../../tests/unit/track/model.rs"]
mod tests;
