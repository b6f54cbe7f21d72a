use std::{fs::File, io::BufReader, io::Read, path::Path};

use anyhow::Context as _;
use chrono::{DateTime, Utc};

use crate::foundation::error::{ReelError, ReelResult};
use crate::track::model::{RawSample, Track};

/// Parse a GPX document and build a [`Track`] from every segment of its first track.
///
/// Points without a timestamp are dropped. A document with no track or no segment is an
/// [`ReelError::EmptyTrack`].
pub fn read_gpx<R: Read>(reader: R) -> ReelResult<Track> {
    let gpx = gpx::read(reader).map_err(|e| ReelError::parse(format!("invalid GPX: {e}")))?;

    let Some(first) = gpx.tracks.into_iter().next() else {
        return Err(ReelError::empty_track("GPX document has no tracks"));
    };
    if first.segments.is_empty() {
        return Err(ReelError::empty_track("first GPX track has no segments"));
    }

    let mut samples = Vec::new();
    for segment in first.segments {
        for point in segment.points {
            let timestamp = point
                .time
                .map(|time| -> ReelResult<DateTime<Utc>> {
                    let iso = time
                        .format()
                        .map_err(|e| ReelError::parse(format!("GPX time: {e}")))?;
                    DateTime::parse_from_rfc3339(&iso)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|e| ReelError::parse(format!("GPX time '{iso}': {e}")))
                })
                .transpose()?;
            let geo = point.point();
            samples.push(RawSample {
                longitude: Some(geo.x()),
                latitude: Some(geo.y()),
                timestamp,
                elevation: point.elevation,
            });
        }
    }

    Track::from_samples(samples)
}

/// Parse a JSON track document: `{ "fixes": [ { longitude, latitude, timestamp, elevation? } ] }`.
pub fn read_json<R: Read>(reader: R) -> ReelResult<Track> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_data() && e.to_string().contains("empty track") {
            ReelError::empty_track("JSON track has no fixes")
        } else {
            ReelError::parse(format!("invalid track JSON: {e}"))
        }
    })
}

/// Load a track from `path`, choosing the parser from the file extension (`gpx` or `json`).
#[tracing::instrument]
pub fn load_track(path: &Path) -> ReelResult<Track> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != "gpx" && ext != "json" {
        return Err(ReelError::parse(format!(
            "unsupported track file '{}' (expected .gpx or .json)",
            path.display()
        )));
    }

    let f = File::open(path).with_context(|| format!("open track '{}'", path.display()))?;
    let r = BufReader::new(f);
    let track = if ext == "gpx" {
        read_gpx(r)?
    } else {
        read_json(r)?
    };

    tracing::info!(fixes = track.len(), "loaded track");
    Ok(track)
}

#[cfg(test)]
#[path = "../../tests/unit/track/io.rs"]
mod tests;
