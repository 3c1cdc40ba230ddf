use serde::{Deserialize, Serialize};

use crate::sample::{Complex, FftFloat};
use crate::transforms::FftError;

/// Backends that can serve transform requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Direct O(n²) summation; any length.
    ExactDft,
    /// Recursive decimation-in-time; power-of-two lengths only.
    Radix2,
}

impl BackendKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ExactDft => "exact_dft",
            Self::Radix2 => "radix2",
        }
    }
}

/// A one-dimensional transform kernel.
///
/// Implementations return the *unscaled* sum: the forward kernel uses
/// `exp(-i·2π·k·j/n)`, the inverse kernel `exp(+i·2π·k·j/n)`, and neither
/// divides by `n`. Normalization is the caller's job.
pub trait FftBackend<T: FftFloat>: Sync {
    fn kind(&self) -> BackendKind;

    fn transform_unscaled(
        &self,
        input: &[Complex<T>],
        inverse: bool,
    ) -> Result<Vec<Complex<T>>, FftError>;
}
