#![forbid(unsafe_code)]

//! Frequency-domain band filtering of synthetic signals.
//!
//! A run generates a noisy trend ([`generate_signal`]), takes its fast
//! transform, zeroes the bins a [`BandMask`] rejects, transforms back, and
//! writes every intermediate as a column file ([`columns`]). Everything a
//! run needs is described by a [`BandFilterConfig`].

pub mod band;
pub mod columns;
pub mod config;
pub mod signal;

pub use band::{BandMask, FilterOutcome, filter_signal};
pub use columns::{read_columns, write_columns, write_outcome};
pub use config::BandFilterConfig;
pub use signal::{SignalSpec, generate_signal, trend};

use std::path::{Path, PathBuf};

use ftk_fft::{Complex64, FftError, TransformTrace, Transformer};
use thiserror::Error;

/// Default trace ledger capacity for a run: forward and inverse pass plus headroom.
pub const DEFAULT_TRACE_CAPACITY: usize = 16;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    Transform(#[from] FftError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid configuration: {detail}")]
    InvalidConfig { detail: String },
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("malformed column value `{token}`")]
    MalformedColumn { token: String },
}

impl FilterError {
    pub fn invalid_config(detail: impl Into<String>) -> Self {
        Self::InvalidConfig {
            detail: detail.into(),
        }
    }
}

/// Result of [`run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: FilterOutcome,
    pub signal: Vec<Complex64>,
    pub written: Vec<PathBuf>,
    pub traces: Vec<TransformTrace>,
}

/// Generate, filter, and (when `output_dir` is given) write one run.
pub fn run(config: &BandFilterConfig, output_dir: Option<&Path>) -> Result<RunSummary, FilterError> {
    config.validate()?;
    let signal = generate_signal(&config.signal)?;
    let capacity = if config.trace_capacity == 0 {
        DEFAULT_TRACE_CAPACITY
    } else {
        config.trace_capacity
    };
    let mut transformer = Transformer::new(config.transform.clone(), capacity);
    let outcome = filter_signal(
        &signal,
        config.signal.sampling_rate(),
        &config.band,
        &mut transformer,
    )?;
    let written = match output_dir {
        Some(dir) => write_outcome(dir, &config.signal, &signal, &outcome)?,
        None => Vec::new(),
    };
    Ok(RunSummary {
        outcome,
        signal,
        written,
        traces: transformer.take_traces(),
    })
}
