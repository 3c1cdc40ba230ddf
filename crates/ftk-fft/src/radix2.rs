//! Recursive radix-2 decimation-in-time FFT.
//!
//! The input is split by index parity, both halves are transformed
//! recursively, and the half spectra are combined with one twiddle per
//! output pair: because `W_{k+n/2} = -W_k`,
//!
//! ```text
//! X[k]       = E[k] + W_k·O[k]
//! X[k + n/2] = E[k] - W_k·O[k]        for k in 0..n/2
//! ```
//!
//! which is the `E[k mod n/2] + W_k·O[k mod n/2]` recurrence evaluated for
//! all `n` outputs. Every level re-checks that its own length is a power of
//! two, so a bad length can never reach the combine step.
//!
//! The inverse reuses the forward recursion through conjugation:
//! `ifft(X) = conj(fft(conj(X)))`, left unscaled here.

use num_traits::Zero;

use crate::backend::{BackendKind, FftBackend};
use crate::sample::{Complex, FftFloat, twiddle};
use crate::transforms::FftError;

/// Sub-problems shorter than this are never split across threads.
pub const PARALLEL_MIN_LEN: usize = 4096;

#[derive(Debug, Clone, Copy, Default)]
pub struct Radix2 {
    parallel: bool,
}

impl Radix2 {
    #[must_use]
    pub const fn serial() -> Self {
        Self { parallel: false }
    }

    /// Evaluate the even/odd halves of large sub-problems with `rayon::join`.
    #[must_use]
    pub const fn parallel() -> Self {
        Self { parallel: true }
    }

    #[must_use]
    pub const fn is_parallel(&self) -> bool {
        self.parallel
    }

    fn forward<T: FftFloat>(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        let n = input.len();
        if !n.is_power_of_two() {
            return Err(FftError::NotPowerOfTwo { len: n });
        }
        if n == 1 {
            return Ok(input.to_vec());
        }

        let even = input.iter().step_by(2).copied().collect::<Vec<_>>();
        let odd = input.iter().skip(1).step_by(2).copied().collect::<Vec<_>>();

        let (even_spectrum, odd_spectrum) = if self.parallel && n >= PARALLEL_MIN_LEN {
            rayon::join(|| self.forward(&even), || self.forward(&odd))
        } else {
            (self.forward(&even), self.forward(&odd))
        };
        let (even_spectrum, odd_spectrum) = (even_spectrum?, odd_spectrum?);

        let half = n / 2;
        let mut output = vec![Complex::zero(); n];
        for k in 0..half {
            let rotated = twiddle::<T>(k, n, false) * odd_spectrum[k];
            output[k] = even_spectrum[k] + rotated;
            output[k + half] = even_spectrum[k] - rotated;
        }
        Ok(output)
    }
}

impl<T: FftFloat> FftBackend<T> for Radix2 {
    fn kind(&self) -> BackendKind {
        BackendKind::Radix2
    }

    fn transform_unscaled(
        &self,
        input: &[Complex<T>],
        inverse: bool,
    ) -> Result<Vec<Complex<T>>, FftError> {
        if !inverse {
            return self.forward(input);
        }
        let conjugated = input.iter().map(Complex::conj).collect::<Vec<_>>();
        let mut output = self.forward(&conjugated)?;
        for value in &mut output {
            *value = value.conj();
        }
        Ok(output)
    }
}
