//! Complex sample type and the floating-point precision bound shared by
//! every transform.

use std::fmt::Debug;

use num_traits::{Float, FloatConst, FromPrimitive};

pub use num_complex::{Complex, Complex32, Complex64};

/// Floating-point precision a transform can run at.
///
/// Blanket-implemented; `f32` and `f64` both qualify.
pub trait FftFloat: Float + FloatConst + FromPrimitive + Debug + Send + Sync + 'static {}

impl<T> FftFloat for T where T: Float + FloatConst + FromPrimitive + Debug + Send + Sync + 'static {}

/// Lossy `usize` to float conversion. Total for `f32` and `f64`.
#[inline]
pub(crate) fn to_float<T: FftFloat>(value: usize) -> T {
    T::from_usize(value).unwrap_or_else(T::nan)
}

/// Twiddle factor `exp(∓i·2π·k/n)`; the exponent is positive when `inverse`.
///
/// `k` is reduced modulo `n` before the angle is formed so large products
/// of indices do not lose precision in the argument.
#[inline]
pub fn twiddle<T: FftFloat>(k: usize, n: usize, inverse: bool) -> Complex<T> {
    debug_assert!(n > 0, "twiddle period must be positive");
    let turns = to_float::<T>(k % n) / to_float::<T>(n);
    let sign = if inverse { T::one() } else { -T::one() };
    let angle = sign * (T::PI() + T::PI()) * turns;
    Complex::from_polar(T::one(), angle)
}
