use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::schedule::scheduler::FrameState;

/// Options for [`JsonLinesSink`].
#[derive(Clone, Debug)]
pub struct JsonLinesSinkOpts {
    /// Output file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
}

impl JsonLinesSinkOpts {
    /// Create options for writing to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

#[derive(serde::Serialize)]
struct FrameLine<'a> {
    frame: u64,
    #[serde(flatten)]
    state: &'a FrameState,
}

/// Writes the schedule as JSON Lines: one header object, then one object per frame.
///
/// The file is the hand-off to an external renderer, which resolves the fix indices it contains
/// against the same track.
pub struct JsonLinesSink {
    opts: JsonLinesSinkOpts,
    out: Option<BufWriter<File>>,
    last_idx: Option<FrameIndex>,
}

impl JsonLinesSink {
    /// Create a sink writing to `opts.out_path`.
    pub fn new(opts: JsonLinesSinkOpts) -> Self {
        Self {
            opts,
            out: None,
            last_idx: None,
        }
    }

    fn write_line(&mut self, value: &impl serde::Serialize) -> ReelResult<()> {
        let Some(out) = self.out.as_mut() else {
            return Err(ReelError::render_backend("jsonl sink not started"));
        };
        serde_json::to_writer(&mut *out, value)
            .map_err(|e| ReelError::render_backend(format!("serialize line: {e}")))?;
        out.write_all(b"\n")
            .with_context(|| format!("write '{}'", self.opts.out_path.display()))?;
        Ok(())
    }
}

impl FrameSink for JsonLinesSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(ReelError::render_backend(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        let f = File::create(&self.opts.out_path)
            .with_context(|| format!("create '{}'", self.opts.out_path.display()))?;
        self.out = Some(BufWriter::new(f));
        self.last_idx = None;
        self.write_line(&cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameState) -> ReelResult<()> {
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(ReelError::render_backend(
                "jsonl sink received out-of-order frame index",
            ));
        }
        self.write_line(&FrameLine {
            frame: idx.0,
            state: frame,
        })?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        let mut out = self
            .out
            .take()
            .ok_or_else(|| ReelError::render_backend("jsonl sink not started"))?;
        out.flush()
            .with_context(|| format!("flush '{}'", self.opts.out_path.display()))?;
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jsonl.rs"]
mod tests;
