use crate::sample::{Complex, FftFloat, to_float};

/// Physical frequency of every transform bin, `k · sampling_rate / sample_count`.
///
/// Bins above Nyquist are not folded to negative frequencies: entry `k`
/// always labels the `k`-th output of a forward transform as-is. A zero
/// `sample_count` yields an empty vector.
#[must_use]
pub fn frequency_bins<T: FftFloat>(sample_count: usize, sampling_rate: T) -> Vec<T> {
    if sample_count == 0 {
        return Vec::new();
    }
    let count = to_float::<T>(sample_count);
    (0..sample_count)
        .map(|k| to_float::<T>(k) * sampling_rate / count)
        .collect()
}

/// Rescale a sequence to unit Euclidean norm.
///
/// An empty input stays empty, and an all-zero input is returned unchanged
/// instead of being divided by zero. Magnitudes near the edge of the float
/// range are handled without overflow or underflow.
#[must_use]
pub fn normalize<T: FftFloat>(sequence: &[Complex<T>]) -> Vec<Complex<T>> {
    let (scale, ratio) = scaled_norm(sequence);
    if scale.is_zero() {
        return sequence.to_vec();
    }
    sequence
        .iter()
        .map(|value| value.unscale(scale).unscale(ratio))
        .collect()
}

/// `sqrt(Σ|z|²)` over the sequence.
#[must_use]
pub fn l2_norm<T: FftFloat>(sequence: &[Complex<T>]) -> T {
    let (scale, ratio) = scaled_norm(sequence);
    scale * ratio
}

/// Norm split as `scale · ratio`, where `scale` is the largest component
/// magnitude and every square is taken after dividing by it.
fn scaled_norm<T: FftFloat>(sequence: &[Complex<T>]) -> (T, T) {
    let scale = sequence
        .iter()
        .fold(T::zero(), |acc, value| acc.max(value.re.abs()).max(value.im.abs()));
    if scale.is_zero() || !scale.is_finite() {
        return (scale, T::one());
    }
    let ratio = sequence
        .iter()
        .fold(T::zero(), |acc, value| acc + value.unscale(scale).norm_sqr())
        .sqrt();
    (scale, ratio)
}
