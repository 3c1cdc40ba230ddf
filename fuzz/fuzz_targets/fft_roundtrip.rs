#![no_main]

use arbitrary::Arbitrary;
use ftk_fft::{Complex64, FftOptions, Normalization, fft, ifft};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct RoundtripInput {
    exponent: u8,
    normalization: u8,
    values: Vec<(i16, i16)>,
}

fuzz_target!(|input: RoundtripInput| {
    let len = 1usize << (input.exponent % 11);
    let mut signal = vec![Complex64::new(0.0, 0.0); len];
    for (slot, (re, im)) in signal.iter_mut().zip(input.values.iter().copied()) {
        *slot = Complex64::new(f64::from(re), f64::from(im));
    }
    let options = FftOptions {
        normalization: match input.normalization % 3 {
            0 => Normalization::Backward,
            1 => Normalization::Forward,
            _ => Normalization::Ortho,
        },
        ..FftOptions::default()
    };
    let Ok(spectrum) = fft(&signal, &options) else {
        panic!("power-of-two length {len} rejected");
    };
    let Ok(recovered) = ifft(&spectrum, &options) else {
        panic!("inverse of length {len} rejected");
    };
    let peak = signal.iter().map(|z| z.norm()).fold(1.0, f64::max);
    let tol = 1e-9 * peak * len as f64;
    for (idx, (got, want)) in recovered.iter().zip(&signal).enumerate() {
        assert!((got - want).norm() <= tol, "[{idx}] {got} != {want}");
    }
});
