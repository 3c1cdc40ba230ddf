use std::fs;
use std::path::Path;

use ftk_fft::FftOptions;
use serde::{Deserialize, Serialize};

use crate::FilterError;
use crate::band::BandMask;
use crate::signal::SignalSpec;

/// Everything a band-filter run needs. Missing JSON fields take the
/// defaults below, which reproduce the reference demo: 1024 samples over
/// `[0, 1000)`, band-stop on `(0.02, 1.0]`, seed 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BandFilterConfig {
    pub signal: SignalSpec,
    pub band: BandMask,
    pub transform: FftOptions,
    /// Capacity of the transform trace ledger.
    pub trace_capacity: usize,
}

impl BandFilterConfig {
    pub fn from_json_str(text: &str) -> Result<Self, FilterError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, FilterError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        self.signal.validate()?;
        self.band.validate()?;
        if !self.signal.samples.is_power_of_two() {
            return Err(FilterError::invalid_config(
                "samples must be a power of two for the fast transform",
            ));
        }
        Ok(())
    }
}
