#![forbid(unsafe_code)]

//! Discrete Fourier transforms over finite complex sequences.
//!
//! - [`dft`] / [`idft`]: exact O(n²) transforms for any length; the
//!   reference the fast path is checked against.
//! - [`fft`] / [`ifft`]: recursive radix-2 decimation-in-time, power-of-two
//!   lengths only. Any other length is rejected with
//!   [`FftError::NotPowerOfTwo`] rather than padded or truncated.
//! - [`frequency_bins`] and [`normalize`]: utilities used by band filters.
//!
//! Every entrypoint borrows its input and returns a freshly allocated
//! sequence of the same length. All of them are generic over the sample
//! precision (`f32` or `f64`, see [`FftFloat`]).

pub mod backend;
pub mod exact;
pub mod helpers;
pub mod radix2;
pub mod sample;
pub mod trace;
pub mod transforms;

pub use backend::{BackendKind, FftBackend};
pub use exact::ExactDft;
pub use helpers::{frequency_bins, l2_norm, normalize};
pub use radix2::{PARALLEL_MIN_LEN, Radix2};
pub use sample::{Complex, Complex32, Complex64, FftFloat, twiddle};
pub use trace::{TraceLedger, TransformTrace, Transformer};
pub use transforms::{FftError, FftOptions, WorkerPolicy, dft, fft, idft, ifft};

use serde::{Deserialize, Serialize};

/// Where the `1/n` factor of a forward/inverse pair is applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Forward divided by `n`, inverse unscaled.
    Forward,
    /// Forward unscaled, inverse divided by `n`.
    #[default]
    Backward,
    /// Both passes divided by `sqrt(n)`.
    Ortho,
}

/// Transform entrypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Dft,
    Idft,
    Fft,
    Ifft,
}

impl TransformKind {
    #[must_use]
    pub const fn is_inverse(self) -> bool {
        matches!(self, Self::Idft | Self::Ifft)
    }

    /// Backend that serves this entrypoint.
    #[must_use]
    pub const fn backend(self) -> BackendKind {
        match self {
            Self::Dft | Self::Idft => BackendKind::ExactDft,
            Self::Fft | Self::Ifft => BackendKind::Radix2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BackendKind, Normalization, TransformKind};

    #[test]
    fn normalization_default_is_backward() {
        assert_eq!(Normalization::default(), Normalization::Backward);
    }

    #[test]
    fn transform_kinds_route_to_backends() {
        assert_eq!(TransformKind::Dft.backend(), BackendKind::ExactDft);
        assert_eq!(TransformKind::Ifft.backend(), BackendKind::Radix2);
        assert!(TransformKind::Idft.is_inverse());
        assert!(!TransformKind::Fft.is_inverse());
    }
}
