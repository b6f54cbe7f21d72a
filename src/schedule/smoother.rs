use crate::track::model::Track;

/// Mutable state of one smoothing run: the value the label currently shows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmootherState {
    /// Last smoothed altitude emitted as [`ElevationLabel::Value`], if the label shows one.
    pub last_displayed: Option<f64>,
}

/// What the altitude label should do on a frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ElevationLabel {
    /// Show this smoothed altitude in meters.
    Value(f64),
    /// Altitude data disappeared; show a not-available marker.
    NotAvailable,
    /// Keep whatever the label shows now.
    Unchanged,
}

impl ElevationLabel {
    /// Label text for this update, or `None` when the renderer should keep its current text.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Self::Value(v) => Some(format!("Alt: {v:.1} m")),
            Self::NotAvailable => Some("Alt: N/A".to_owned()),
            Self::Unchanged => None,
        }
    }
}

/// Trailing moving average of elevation with a hysteresis gate on label updates.
///
/// One smoother belongs to exactly one scheduling run; it is never shared between tracks.
#[derive(Debug)]
pub struct ElevationSmoother<'a> {
    track: &'a Track,
    window_size: usize,
    threshold_m: f64,
    state: SmootherState,
    last_index: Option<usize>,
}

impl<'a> ElevationSmoother<'a> {
    /// Create a smoother with fresh state. `window_size` is raised to at least 1.
    pub fn new(track: &'a Track, window_size: usize, threshold_m: f64) -> Self {
        Self {
            track,
            window_size: window_size.max(1),
            threshold_m,
            state: SmootherState::default(),
            last_index: None,
        }
    }

    /// Current state (what the label shows).
    pub fn state(&self) -> SmootherState {
        self.state
    }

    /// Mean of the elevations present in the window ending at `last_index`.
    ///
    /// Fixes without elevation count toward neither sum nor divisor. `None` when the window has
    /// no elevation at all.
    pub fn smoothed_at(&self, last_index: usize) -> Option<f64> {
        let fixes = self.track.fixes();
        let end = last_index.min(fixes.len().saturating_sub(1));
        let start = (end + 1).saturating_sub(self.window_size);

        let (sum, count) = fixes[start..=end]
            .iter()
            .filter_map(|fix| fix.elevation)
            .fold((0.0f64, 0usize), |(sum, count), e| (sum + e, count + 1));

        (count > 0).then(|| sum / count as f64)
    }

    /// Advance to the window ending at `last_index` and decide the label update.
    ///
    /// Must be called with strictly increasing `last_index`.
    pub fn update(&mut self, last_index: usize) -> ElevationLabel {
        debug_assert!(
            self.last_index.is_none_or(|prev| last_index > prev),
            "smoother indices must strictly increase"
        );
        self.last_index = Some(last_index);

        let candidate = self.smoothed_at(last_index);
        match (candidate, self.state.last_displayed) {
            (None, Some(_)) => {
                self.state.last_displayed = None;
                ElevationLabel::NotAvailable
            }
            (Some(c), None) => {
                self.state.last_displayed = Some(c);
                ElevationLabel::Value(c)
            }
            (Some(c), Some(prev)) if (c - prev).abs() >= self.threshold_m => {
                self.state.last_displayed = Some(c);
                ElevationLabel::Value(c)
            }
            _ => ElevationLabel::Unchanged,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/smoother.rs"]
mod tests;
