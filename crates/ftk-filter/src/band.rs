//! Threshold masks over transform bins.

use ftk_fft::{Complex64, Transformer, frequency_bins};
use serde::{Deserialize, Serialize};

use crate::FilterError;

/// Frequency band `(low, high]` and what to do with the bins inside it.
///
/// A bin at frequency `f` is in band when `low < |f| <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BandMask {
    /// Zero every in-band coefficient.
    Stop { low: f64, high: f64 },
    /// Zero every out-of-band coefficient.
    Pass { low: f64, high: f64 },
}

impl Default for BandMask {
    fn default() -> Self {
        Self::Stop {
            low: 0.02,
            high: 1.0,
        }
    }
}

impl BandMask {
    #[must_use]
    pub const fn bounds(&self) -> (f64, f64) {
        match *self {
            Self::Stop { low, high } | Self::Pass { low, high } => (low, high),
        }
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        let (low, high) = self.bounds();
        if low.is_nan() || high.is_nan() {
            return Err(FilterError::invalid_config("band thresholds must not be NaN"));
        }
        if low > high {
            return Err(FilterError::invalid_config(
                "band low threshold exceeds high threshold",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn in_band(&self, frequency: f64) -> bool {
        let (low, high) = self.bounds();
        let magnitude = frequency.abs();
        low < magnitude && magnitude <= high
    }

    /// Whether a coefficient at `frequency` survives the mask.
    #[must_use]
    pub fn keeps(&self, frequency: f64) -> bool {
        match self {
            Self::Stop { .. } => !self.in_band(frequency),
            Self::Pass { .. } => self.in_band(frequency),
        }
    }

    /// Masked copy of `spectrum`; `frequencies[k]` labels `spectrum[k]`.
    pub fn apply(
        &self,
        spectrum: &[Complex64],
        frequencies: &[f64],
    ) -> Result<Vec<Complex64>, FilterError> {
        if spectrum.len() != frequencies.len() {
            return Err(FilterError::LengthMismatch {
                expected: spectrum.len(),
                actual: frequencies.len(),
            });
        }
        Ok(spectrum
            .iter()
            .zip(frequencies)
            .map(|(&value, &frequency)| {
                if self.keeps(frequency) {
                    value
                } else {
                    Complex64::new(0.0, 0.0)
                }
            })
            .collect())
    }
}

/// Every intermediate of one filtering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub mask: BandMask,
    pub spectrum: Vec<Complex64>,
    pub masked_spectrum: Vec<Complex64>,
    pub frequencies: Vec<f64>,
    pub filtered: Vec<Complex64>,
}

impl FilterOutcome {
    /// `signal - filtered`, element-wise.
    pub fn residues(&self, signal: &[Complex64]) -> Result<Vec<Complex64>, FilterError> {
        if signal.len() != self.filtered.len() {
            return Err(FilterError::LengthMismatch {
                expected: self.filtered.len(),
                actual: signal.len(),
            });
        }
        Ok(signal
            .iter()
            .zip(&self.filtered)
            .map(|(original, kept)| original - kept)
            .collect())
    }

    /// Number of bins the mask zeroed.
    #[must_use]
    pub fn rejected_bins(&self) -> usize {
        self.frequencies
            .iter()
            .filter(|&&frequency| !self.mask.keeps(frequency))
            .count()
    }
}

/// Forward transform, label bins, mask, inverse transform.
///
/// `signal.len()` must be a power of two.
pub fn filter_signal(
    signal: &[Complex64],
    sampling_rate: f64,
    mask: &BandMask,
    transformer: &mut Transformer,
) -> Result<FilterOutcome, FilterError> {
    mask.validate()?;
    let spectrum = transformer.fft(signal)?;
    let frequencies = frequency_bins(signal.len(), sampling_rate);
    let masked_spectrum = mask.apply(&spectrum, &frequencies)?;
    let filtered = transformer.ifft(&masked_spectrum)?;
    Ok(FilterOutcome {
        mask: *mask,
        spectrum,
        masked_spectrum,
        frequencies,
        filtered,
    })
}
