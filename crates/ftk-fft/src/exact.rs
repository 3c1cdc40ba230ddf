//! Exact O(n²) discrete Fourier transform.
//!
//! This is the reference kernel the fast path is validated against. It
//! accepts any length, including zero.

use num_traits::Zero;

use crate::backend::{BackendKind, FftBackend};
use crate::sample::{Complex, FftFloat, twiddle};
use crate::transforms::FftError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExactDft;

impl<T: FftFloat> FftBackend<T> for ExactDft {
    fn kind(&self) -> BackendKind {
        BackendKind::ExactDft
    }

    fn transform_unscaled(
        &self,
        input: &[Complex<T>],
        inverse: bool,
    ) -> Result<Vec<Complex<T>>, FftError> {
        Ok(direct_sum(input, inverse))
    }
}

fn direct_sum<T: FftFloat>(input: &[Complex<T>], inverse: bool) -> Vec<Complex<T>> {
    let n = input.len();
    let mut output = vec![Complex::zero(); n];
    for (k, out) in output.iter_mut().enumerate() {
        let mut acc = Complex::zero();
        for (j, &value) in input.iter().enumerate() {
            // k·j < n², reduced before it reaches the angle.
            acc = acc + value * twiddle::<T>((k * j) % n, n, inverse);
        }
        *out = acc;
    }
    output
}

#[cfg(test)]
mod tests {
    use ftk_runtime::assert_close;

    use super::ExactDft;
    use crate::backend::FftBackend;
    use crate::sample::{Complex32, Complex64};

    #[test]
    fn empty_input_yields_empty_output() {
        let out = ExactDft
            .transform_unscaled(&[] as &[Complex64], false)
            .expect("empty dft");
        assert!(out.is_empty());
    }

    #[test]
    fn constant_sequence_concentrates_in_dc_bin() {
        let input = vec![Complex64::new(1.0, 0.0); 4];
        let out = ExactDft.transform_unscaled(&input, false).expect("dft");
        assert_close(out[0], Complex64::new(4.0, 0.0), 1e-12, 0.0);
        for &bin in &out[1..] {
            assert_close(bin, Complex64::new(0.0, 0.0), 1e-12, 0.0);
        }
    }

    #[test]
    fn inverse_kernel_is_unscaled() {
        let input = vec![Complex64::new(1.0, 0.0); 3];
        let out = ExactDft.transform_unscaled(&input, true).expect("idft");
        assert_close(out[0], Complex64::new(3.0, 0.0), 1e-12, 0.0);
    }

    #[test]
    fn odd_length_is_accepted() {
        let input = (0..5)
            .map(|i| Complex32::new(i as f32, -(i as f32)))
            .collect::<Vec<_>>();
        let out = ExactDft.transform_unscaled(&input, false).expect("dft");
        assert_eq!(out.len(), 5);
        assert!((out[0].re - 10.0).abs() < 1e-5);
        assert!((out[0].im + 10.0).abs() < 1e-5);
    }
}
