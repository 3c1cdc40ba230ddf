//! Synthetic test signals.

use ftk_fft::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::FilterError;

/// Sampling window for a synthetic signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSpec {
    pub t0: f64,
    pub t1: f64,
    pub samples: usize,
    /// Seed for the additive noise; equal seeds give equal signals.
    pub seed: u64,
}

impl Default for SignalSpec {
    fn default() -> Self {
        Self {
            t0: 0.0,
            t1: 1000.0,
            samples: 1024,
            seed: 0,
        }
    }
}

impl SignalSpec {
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.samples == 0 {
            return Err(FilterError::invalid_config("samples must be greater than zero"));
        }
        if !(self.t0.is_finite() && self.t1.is_finite()) {
            return Err(FilterError::invalid_config("time window must be finite"));
        }
        if self.t1 <= self.t0 {
            return Err(FilterError::invalid_config("t1 must be greater than t0"));
        }
        Ok(())
    }

    #[must_use]
    pub fn sample_spacing(&self) -> f64 {
        (self.t1 - self.t0) / self.samples as f64
    }

    /// Samples per unit time.
    #[must_use]
    pub fn sampling_rate(&self) -> f64 {
        self.samples as f64 / (self.t1 - self.t0)
    }

    /// Sample instants `t0 + i·dt` for `i in 0..samples`.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        let dt = self.sample_spacing();
        (0..self.samples).map(move |i| self.t0 + i as f64 * dt)
    }
}

/// Noise-free part of the synthetic signal: a linear trend plus a slow cosine.
#[must_use]
pub fn trend(t: f64) -> f64 {
    t + 100.0 * (t / 20.0).cos()
}

/// Sample `trend(t) + noise` over the window, noise drawn uniformly from the
/// integers `0..100`.
pub fn generate_signal(spec: &SignalSpec) -> Result<Vec<Complex64>, FilterError> {
    spec.validate()?;
    let mut rng = StdRng::seed_from_u64(spec.seed);
    Ok(spec
        .times()
        .map(|t| {
            let noise = f64::from(rng.random_range(0u32..100));
            Complex64::new(trend(t) + noise, 0.0)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{SignalSpec, generate_signal, trend};
    use crate::FilterError;

    #[test]
    fn default_window_matches_reference_demo() {
        let spec = SignalSpec::default();
        assert_eq!(spec.samples, 1024);
        assert!((spec.sampling_rate() - 1.024).abs() < 1e-12);
    }

    #[test]
    fn signal_has_requested_length_and_zero_imaginary_part() {
        let spec = SignalSpec {
            samples: 64,
            ..SignalSpec::default()
        };
        let signal = generate_signal(&spec).expect("signal");
        assert_eq!(signal.len(), 64);
        assert!(signal.iter().all(|z| z.im == 0.0));
    }

    #[test]
    fn noise_is_bounded_and_seeded() {
        let spec = SignalSpec {
            samples: 128,
            seed: 7,
            ..SignalSpec::default()
        };
        let first = generate_signal(&spec).expect("signal");
        let second = generate_signal(&spec).expect("signal");
        assert_eq!(first, second);
        for (t, z) in spec.times().zip(&first) {
            let noise = z.re - trend(t);
            assert!((-1e-9..=99.0 + 1e-9).contains(&noise), "noise {noise} out of range");
        }
    }

    #[test]
    fn empty_or_inverted_windows_are_rejected() {
        let empty = SignalSpec {
            samples: 0,
            ..SignalSpec::default()
        };
        assert!(matches!(
            generate_signal(&empty),
            Err(FilterError::InvalidConfig { .. })
        ));
        let inverted = SignalSpec {
            t0: 5.0,
            t1: 1.0,
            ..SignalSpec::default()
        };
        assert!(inverted.validate().is_err());
    }
}
