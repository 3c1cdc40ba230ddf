use std::num::NonZeroUsize;
use std::time::Instant;

use ftk_runtime::RuntimeMode;
use rayon::ThreadPool;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{BackendKind, FftBackend};
use crate::exact::ExactDft;
use crate::radix2::Radix2;
use crate::sample::{Complex, FftFloat, to_float};
use crate::{Normalization, TransformKind};

/// Worker control policy for the fast transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerPolicy {
    /// Use the ambient rayon pool; split only when it has more than one thread.
    #[default]
    Auto,
    /// Require an exact worker count.
    Exact(usize),
    /// Upper-bound worker count, capped by the host's available parallelism.
    Max(usize),
}

/// Common options shared by every transform entrypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FftOptions {
    pub mode: RuntimeMode,
    pub normalization: Normalization,
    pub workers: WorkerPolicy,
    pub check_finite: bool,
}

impl Default for FftOptions {
    fn default() -> Self {
        Self {
            mode: RuntimeMode::Strict,
            normalization: Normalization::Backward,
            workers: WorkerPolicy::Auto,
            check_finite: false,
        }
    }
}

impl FftOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: RuntimeMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: WorkerPolicy) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn with_check_finite(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }

    fn should_check_finite(&self) -> bool {
        self.check_finite || self.mode.rejects_non_finite()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FftError {
    #[error("fast transform requires a power-of-two length, got {len}")]
    NotPowerOfTwo { len: usize },
    #[error("invalid worker count: {requested}")]
    InvalidWorkers { requested: usize },
    #[error("non-finite input rejected by policy")]
    NonFiniteInput,
    #[error("worker pool unavailable: {detail}")]
    WorkerPool { detail: String },
}

/// Output of one transform call plus what is needed to trace it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Execution<T> {
    pub output: Vec<Complex<T>>,
    pub backend: BackendKind,
    pub parallel: bool,
    pub timing_ns: u64,
}

/// Exact forward transform, `X[k] = Σ x[j]·exp(-i·2π·k·j/n)`.
///
/// Accepts any length; an empty input yields an empty output.
pub fn dft<T: FftFloat>(
    input: &[Complex<T>],
    options: &FftOptions,
) -> Result<Vec<Complex<T>>, FftError> {
    execute(TransformKind::Dft, input, options).map(|run| run.output)
}

/// Exact inverse transform, `x[j] = (1/n)·Σ X[k]·exp(+i·2π·k·j/n)` under
/// the default [`Normalization::Backward`].
pub fn idft<T: FftFloat>(
    input: &[Complex<T>],
    options: &FftOptions,
) -> Result<Vec<Complex<T>>, FftError> {
    execute(TransformKind::Idft, input, options).map(|run| run.output)
}

/// Radix-2 fast forward transform.
///
/// An explicit worker count above one spins up a thread pool for this call
/// alone; a [`crate::Transformer`] keeps its pool across calls.
///
/// # Errors
/// [`FftError::NotPowerOfTwo`] unless `input.len()` is a power of two
/// (zero is not).
pub fn fft<T: FftFloat>(
    input: &[Complex<T>],
    options: &FftOptions,
) -> Result<Vec<Complex<T>>, FftError> {
    execute(TransformKind::Fft, input, options).map(|run| run.output)
}

/// Radix-2 fast inverse transform via the conjugate trick.
///
/// # Errors
/// Same preconditions as [`fft`].
pub fn ifft<T: FftFloat>(
    input: &[Complex<T>],
    options: &FftOptions,
) -> Result<Vec<Complex<T>>, FftError> {
    execute(TransformKind::Ifft, input, options).map(|run| run.output)
}

pub(crate) fn execute<T: FftFloat>(
    kind: TransformKind,
    input: &[Complex<T>],
    options: &FftOptions,
) -> Result<Execution<T>, FftError> {
    validate(kind, input, options)?;
    let pool = match kind.backend() {
        BackendKind::Radix2 => build_pool(options.workers)?,
        BackendKind::ExactDft => None,
    };
    execute_validated(kind, input, options, pool.as_ref())
}

/// Every precondition of `kind`, checked before any work or thread setup.
pub(crate) fn validate<T: FftFloat>(
    kind: TransformKind,
    input: &[Complex<T>],
    options: &FftOptions,
) -> Result<(), FftError> {
    validate_workers(options.workers)?;
    validate_finite(input, options)?;
    if kind.backend() == BackendKind::Radix2 {
        ensure_power_of_two(input.len())?;
    }
    Ok(())
}

/// Run an already validated transform. The fast path splits across
/// threads inside `pool` when one is given, otherwise across the ambient
/// rayon pool under [`WorkerPolicy::Auto`].
pub(crate) fn execute_validated<T: FftFloat>(
    kind: TransformKind,
    input: &[Complex<T>],
    options: &FftOptions,
    pool: Option<&ThreadPool>,
) -> Result<Execution<T>, FftError> {
    let inverse = kind.is_inverse();
    let started = Instant::now();
    let (mut output, backend, parallel) = match kind.backend() {
        BackendKind::ExactDft => {
            let output = ExactDft.transform_unscaled(input, inverse)?;
            (output, BackendKind::ExactDft, false)
        }
        BackendKind::Radix2 => {
            let output = match pool {
                Some(pool) => {
                    pool.install(|| Radix2::parallel().transform_unscaled(input, inverse))?
                }
                None if splits_on_ambient_pool(options.workers) => {
                    Radix2::parallel().transform_unscaled(input, inverse)?
                }
                None => Radix2::serial().transform_unscaled(input, inverse)?,
            };
            let parallel = pool.is_some() || splits_on_ambient_pool(options.workers);
            (output, BackendKind::Radix2, parallel)
        }
    };
    apply_normalization(&mut output, options.normalization, inverse);

    Ok(Execution {
        output,
        backend,
        parallel,
        timing_ns: u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX),
    })
}

fn splits_on_ambient_pool(policy: WorkerPolicy) -> bool {
    policy == WorkerPolicy::Auto && rayon::current_num_threads() > 1
}

/// Dedicated pool for an explicit worker count above one.
///
/// The free functions build one per fast call; [`crate::Transformer`] builds
/// it once and keeps it.
pub(crate) fn build_pool(policy: WorkerPolicy) -> Result<Option<ThreadPool>, FftError> {
    let threads = match policy {
        WorkerPolicy::Auto => return Ok(None),
        WorkerPolicy::Exact(requested) => requested,
        WorkerPolicy::Max(requested) => requested.min(available_parallelism()),
    };
    if threads <= 1 {
        return Ok(None);
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map(Some)
        .map_err(|error| FftError::WorkerPool {
            detail: error.to_string(),
        })
}

fn available_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

fn ensure_power_of_two(len: usize) -> Result<(), FftError> {
    if len.is_power_of_two() {
        Ok(())
    } else {
        Err(FftError::NotPowerOfTwo { len })
    }
}

fn validate_workers(policy: WorkerPolicy) -> Result<(), FftError> {
    match policy {
        WorkerPolicy::Auto => Ok(()),
        WorkerPolicy::Exact(0) | WorkerPolicy::Max(0) => {
            Err(FftError::InvalidWorkers { requested: 0 })
        }
        WorkerPolicy::Exact(_) | WorkerPolicy::Max(_) => Ok(()),
    }
}

fn validate_finite<T: FftFloat>(input: &[Complex<T>], options: &FftOptions) -> Result<(), FftError> {
    if options.should_check_finite()
        && input
            .iter()
            .any(|value| !(value.re.is_finite() && value.im.is_finite()))
    {
        return Err(FftError::NonFiniteInput);
    }
    Ok(())
}

/// Divisor applied to a transform's output; `None` leaves it unscaled.
fn normalization_divisor<T: FftFloat>(
    normalization: Normalization,
    n: usize,
    inverse: bool,
) -> Option<T> {
    if n <= 1 {
        return None;
    }
    let n = to_float::<T>(n);
    match (normalization, inverse) {
        (Normalization::Backward, true) | (Normalization::Forward, false) => Some(n),
        (Normalization::Backward, false) | (Normalization::Forward, true) => None,
        (Normalization::Ortho, _) => Some(n.sqrt()),
    }
}

fn apply_normalization<T: FftFloat>(
    data: &mut [Complex<T>],
    normalization: Normalization,
    inverse: bool,
) {
    let Some(divisor) = normalization_divisor::<T>(normalization, data.len(), inverse) else {
        return;
    };
    for value in data.iter_mut() {
        *value = value.unscale(divisor);
    }
}

#[cfg(test)]
mod tests {
    use ftk_runtime::{RuntimeMode, assert_close, assert_close_slice};

    use super::{FftError, FftOptions, WorkerPolicy, dft, execute, fft, idft, ifft};
    use crate::backend::BackendKind;
    use crate::sample::{Complex32, Complex64};
    use crate::{Normalization, TransformKind};

    fn fixture() -> Vec<Complex64> {
        vec![
            Complex64::new(1.0, 2.0),
            Complex64::new(2.5, -2.5),
            Complex64::new(3.2, 5.0),
            Complex64::new(4.8, 0.5),
        ]
    }

    #[test]
    fn options_default_to_strict_backward_mode() {
        let opts = FftOptions::default();
        assert_eq!(opts.mode, RuntimeMode::Strict);
        assert_eq!(opts.normalization, Normalization::Backward);
        assert_eq!(opts.workers, WorkerPolicy::Auto);
    }

    #[test]
    fn options_deserialize_with_defaults_for_missing_fields() {
        let opts: FftOptions =
            serde_json::from_str(r#"{"mode":"Hardened","workers":{"exact":2}}"#)
                .expect("options json");
        assert_eq!(opts.mode, RuntimeMode::Hardened);
        assert_eq!(opts.workers, WorkerPolicy::Exact(2));
        assert_eq!(opts.normalization, Normalization::Backward);
    }

    #[test]
    fn exact_zero_workers_is_rejected() {
        let opts = FftOptions::default().with_workers(WorkerPolicy::Exact(0));
        let err = fft(&[Complex64::new(0.0, 0.0)], &opts).expect_err("zero workers");
        assert_eq!(err, FftError::InvalidWorkers { requested: 0 });
    }

    #[test]
    fn dft_idft_roundtrip_identity() {
        let input = fixture();
        let opts = FftOptions::default();
        let spectrum = dft(&input, &opts).expect("dft");
        let recovered = idft(&spectrum, &opts).expect("idft");
        assert_close_slice(&recovered, &input, 1e-9, 0.0);
    }

    #[test]
    fn fft_ifft_roundtrip_identity() {
        let input = fixture();
        let opts = FftOptions::default();
        let spectrum = fft(&input, &opts).expect("fft");
        let recovered = ifft(&spectrum, &opts).expect("ifft");
        assert_close_slice(&recovered, &input, 1e-9, 0.0);
    }

    #[test]
    fn fft_matches_dft_on_fixture() {
        let opts = FftOptions::default();
        let fast = fft(&fixture(), &opts).expect("fft");
        let exact = dft(&fixture(), &opts).expect("dft");
        assert_close_slice(&fast, &exact, 1e-9, 0.0);
    }

    #[test]
    fn empty_input_policy() {
        let opts = FftOptions::default();
        let empty: &[Complex64] = &[];
        assert_eq!(dft(empty, &opts), Ok(Vec::new()));
        assert_eq!(idft(empty, &opts), Ok(Vec::new()));
        assert_eq!(fft(empty, &opts), Err(FftError::NotPowerOfTwo { len: 0 }));
        assert_eq!(ifft(empty, &opts), Err(FftError::NotPowerOfTwo { len: 0 }));
    }

    #[test]
    fn length_three_is_rejected_by_fast_path() {
        let input = vec![Complex64::new(1.0, 0.0); 3];
        let opts = FftOptions::default();
        assert_eq!(fft(&input, &opts), Err(FftError::NotPowerOfTwo { len: 3 }));
        assert_eq!(ifft(&input, &opts), Err(FftError::NotPowerOfTwo { len: 3 }));
        assert_eq!(dft(&input, &opts).map(|out| out.len()), Ok(3));
    }

    #[test]
    fn single_sample_is_returned_unchanged() {
        let z = [Complex64::new(-3.5, 0.25)];
        let opts = FftOptions::default();
        assert_eq!(fft(&z, &opts), Ok(z.to_vec()));
        assert_eq!(ifft(&z, &opts), Ok(z.to_vec()));
    }

    #[test]
    fn hardened_mode_rejects_non_finite_input() {
        let input = [Complex64::new(1.0, 0.0), Complex64::new(f64::NAN, 0.0)];
        let opts = FftOptions::default().with_mode(RuntimeMode::Hardened);
        assert_eq!(fft(&input, &opts), Err(FftError::NonFiniteInput));
        assert_eq!(dft(&input, &opts), Err(FftError::NonFiniteInput));
    }

    #[test]
    fn strict_mode_passes_non_finite_input_through() {
        let input = [Complex64::new(f64::INFINITY, 0.0), Complex64::new(1.0, 0.0)];
        let out = fft(&input, &FftOptions::default()).expect("strict fft");
        assert!(!out[0].is_finite());
        let checked = FftOptions::default().with_check_finite(true);
        assert_eq!(fft(&input, &checked), Err(FftError::NonFiniteInput));
    }

    #[test]
    fn finiteness_check_covers_both_components() {
        let checked = FftOptions::default().with_check_finite(true);
        let bad_imag = [Complex64::new(1.0, 0.0), Complex64::new(0.0, f64::NEG_INFINITY)];
        assert_eq!(fft(&bad_imag, &checked), Err(FftError::NonFiniteInput));
        assert_eq!(idft(&bad_imag, &checked), Err(FftError::NonFiniteInput));

        let single = [Complex32::new(f32::NAN, 0.0), Complex32::new(0.0, 0.0)];
        let hardened = FftOptions::default().with_mode(RuntimeMode::Hardened);
        assert_eq!(ifft(&single, &hardened), Err(FftError::NonFiniteInput));

        let finite = [Complex32::new(f32::MAX, f32::MIN), Complex32::new(0.0, 0.0)];
        assert!(dft(&finite, &hardened).is_ok());
    }

    #[test]
    fn ortho_normalization_preserves_energy() {
        let input = fixture();
        let opts = FftOptions::default().with_normalization(Normalization::Ortho);
        let spectrum = fft(&input, &opts).expect("fft");
        let energy_in = input.iter().map(|z| z.norm_sqr()).sum::<f64>();
        let energy_out = spectrum.iter().map(|z| z.norm_sqr()).sum::<f64>();
        assert!((energy_in - energy_out).abs() <= 1e-9);
        let recovered = ifft(&spectrum, &opts).expect("ifft");
        assert_close_slice(&recovered, &input, 1e-9, 0.0);
    }

    #[test]
    fn forward_normalization_scales_the_forward_pass() {
        let input = vec![Complex64::new(1.0, 0.0); 4];
        let opts = FftOptions::default().with_normalization(Normalization::Forward);
        let spectrum = dft(&input, &opts).expect("dft");
        assert_close(spectrum[0], Complex64::new(1.0, 0.0), 1e-12, 0.0);
        let recovered = idft(&spectrum, &opts).expect("idft");
        assert_close_slice(&recovered, &input, 1e-12, 0.0);
    }

    #[test]
    fn explicit_workers_route_through_a_pool() {
        let input = (0..64)
            .map(|i| Complex64::new(f64::from(i), 0.0))
            .collect::<Vec<_>>();
        let serial = FftOptions::default().with_workers(WorkerPolicy::Exact(1));
        let pooled = FftOptions::default().with_workers(WorkerPolicy::Exact(2));
        let lhs = execute(TransformKind::Fft, &input, &serial).expect("serial");
        let rhs = execute(TransformKind::Fft, &input, &pooled).expect("pooled");
        assert!(!lhs.parallel);
        assert!(rhs.parallel);
        assert_eq!(lhs.backend, BackendKind::Radix2);
        assert_eq!(lhs.output, rhs.output);
    }

    #[test]
    fn single_precision_roundtrip() {
        let input = (0..8)
            .map(|i| Complex32::new(i as f32, 1.0 - i as f32))
            .collect::<Vec<_>>();
        let opts = FftOptions::default();
        let recovered = ifft(&fft(&input, &opts).expect("fft"), &opts).expect("ifft");
        for (lhs, rhs) in recovered.iter().zip(&input) {
            assert!((lhs - rhs).norm() <= 1e-4, "{lhs} !~= {rhs}");
        }
    }
}
