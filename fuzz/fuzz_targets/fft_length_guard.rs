#![no_main]

use arbitrary::Arbitrary;
use ftk_fft::{Complex64, FftError, FftOptions, fft, ifft};
use ftk_runtime::RuntimeMode;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct LengthInput {
    len: u16,
    hardened: bool,
    inverse: bool,
    values: Vec<(f64, f64)>,
}

fuzz_target!(|input: LengthInput| {
    let len = usize::from(input.len % 2048);
    let mut signal = vec![Complex64::new(0.0, 0.0); len];
    for (slot, (re, im)) in signal.iter_mut().zip(input.values.iter().copied()) {
        *slot = Complex64::new(re, im);
    }
    let options = FftOptions {
        mode: if input.hardened {
            RuntimeMode::Hardened
        } else {
            RuntimeMode::Strict
        },
        ..FftOptions::default()
    };
    let result = if input.inverse {
        ifft(&signal, &options)
    } else {
        fft(&signal, &options)
    };
    match result {
        Ok(output) => {
            assert!(len.is_power_of_two());
            assert_eq!(output.len(), len);
        }
        Err(FftError::NotPowerOfTwo { len: reported }) => {
            assert!(!len.is_power_of_two());
            assert_eq!(reported, len);
        }
        Err(FftError::NonFiniteInput) => {
            assert!(input.hardened);
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
});
