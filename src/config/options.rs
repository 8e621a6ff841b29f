use std::{fs::File, io::BufReader, path::Path};

use crate::{
    convert::frame::PaletteConverter,
    foundation::{
        core::{DEFAULT_FRAME_DELAY_CS, LoopCount},
        error::{GifferError, GifferResult},
    },
};

/// Worker configuration for the per-frame conversion fan-out.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertThreading {
    /// Worker threads; `None` uses every available core.
    pub threads: Option<usize>,
    /// Skip frames positioned after an already failed frame.
    pub fail_fast: bool,
}

/// Options for a [`Giffer`](crate::Giffer) run.
///
/// Every field has a default, so a JSON config only needs the keys it changes:
///
/// ```json
/// { "delay_cs": 12, "threading": { "threads": 4 } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GifferOptions {
    /// Display duration applied to every frame, in centiseconds.
    pub delay_cs: u16,
    /// Replay count; `0` loops forever.
    pub loop_count: LoopCount,
    /// NeuQuant sampling speed (`1..=30`, lower is slower and more accurate).
    pub quantize_speed: i32,
    /// Worker configuration.
    pub threading: ConvertThreading,
}

impl Default for GifferOptions {
    fn default() -> Self {
        Self {
            delay_cs: DEFAULT_FRAME_DELAY_CS,
            loop_count: LoopCount::INFINITE,
            quantize_speed: PaletteConverter::default().speed,
            threading: ConvertThreading::default(),
        }
    }
}

impl GifferOptions {
    /// Reject out-of-range speed and zero worker threads.
    pub fn validate(&self) -> GifferResult<()> {
        PaletteConverter::new(self.quantize_speed)?;
        if self.threading.threads == Some(0) {
            return Err(GifferError::validation(
                "threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Parse and validate options from a JSON string.
    pub fn from_json_str(s: &str) -> GifferResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| GifferError::config(format!("parse options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read, parse and validate options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> GifferResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| GifferError::config(format!("open '{}': {e}", path.display())))?;
        let opts: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| GifferError::config(format!("parse '{}': {e}", path.display())))?;
        opts.validate()?;
        Ok(opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
