use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use chrono::TimeDelta;

use crate::foundation::error::{ReelError, ReelResult};

/// Immutable animation settings for one scheduling run.
///
/// Missing fields in a JSON config fall back to [`AnimationConfig::map_overlay`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Track fixes advanced per output frame (>= 1).
    pub points_per_frame: usize,
    /// Real-track seconds to skip before the path starts being drawn (>= 0).
    pub draw_start_offset_s: f64,
    /// Inter-frame interval used when the track duration cannot drive negotiation.
    pub reference_interval_ms: f64,
    /// Lower clamp on the negotiated interval (> 0).
    pub min_interval_ms: f64,
    /// Upper clamp on the negotiated interval (>= `min_interval_ms`).
    pub max_interval_ms: f64,
    /// Trailing fixes averaged for the altitude label (>= 1).
    pub elevation_window_size: usize,
    /// Minimum smoothed-altitude change, in meters, that updates the label (>= 0).
    pub elevation_update_threshold_m: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::map_overlay()
    }
}

impl AnimationConfig {
    /// Settings for an overlay drawn on top of a basemap.
    pub fn map_overlay() -> Self {
        Self {
            points_per_frame: 1,
            draw_start_offset_s: 0.0,
            reference_interval_ms: 50.0,
            min_interval_ms: 20.0,
            max_interval_ms: 1000.0,
            elevation_window_size: 5,
            elevation_update_threshold_m: 0.5,
        }
    }

    /// Settings for a standalone layer meant for chroma-key compositing in an editor.
    ///
    /// Tighter clamps keep the layer between 10 and 125 fps.
    pub fn chroma_key() -> Self {
        Self {
            reference_interval_ms: 33.0,
            min_interval_ms: 8.0,
            max_interval_ms: 100.0,
            ..Self::map_overlay()
        }
    }

    /// Load a JSON config file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ReelError::parse(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject any option outside its domain.
    pub fn validate(&self) -> ReelResult<()> {
        if self.points_per_frame == 0 {
            return Err(ReelError::invalid_config("points_per_frame must be >= 1"));
        }
        if !self.draw_start_offset_s.is_finite() || self.draw_start_offset_s < 0.0 {
            return Err(ReelError::invalid_config(
                "draw_start_offset_s must be finite and >= 0",
            ));
        }
        if !self.reference_interval_ms.is_finite() || self.reference_interval_ms <= 0.0 {
            return Err(ReelError::invalid_config(
                "reference_interval_ms must be finite and > 0",
            ));
        }
        if !self.min_interval_ms.is_finite() || self.min_interval_ms <= 0.0 {
            return Err(ReelError::invalid_config(
                "min_interval_ms must be finite and > 0",
            ));
        }
        if !self.max_interval_ms.is_finite() || self.max_interval_ms < self.min_interval_ms {
            return Err(ReelError::invalid_config(
                "max_interval_ms must be finite and >= min_interval_ms",
            ));
        }
        if self.elevation_window_size == 0 {
            return Err(ReelError::invalid_config(
                "elevation_window_size must be >= 1",
            ));
        }
        if !self.elevation_update_threshold_m.is_finite() || self.elevation_update_threshold_m < 0.0
        {
            return Err(ReelError::invalid_config(
                "elevation_update_threshold_m must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Draw-start offset as a time delta, rounded to the microsecond.
    pub fn draw_start_offset(&self) -> TimeDelta {
        // `as` saturates, so absurd offsets land on i64::MAX microseconds.
        TimeDelta::microseconds((self.draw_start_offset_s * 1e6).round().max(0.0) as i64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/config.rs"]
mod tests;
