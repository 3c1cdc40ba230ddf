//! Property tests for the shared tolerance helpers.
//!
//! Reproduce: `PROPTEST_SEED=<seed> cargo test -p ftk-runtime --test tolerance_properties`

use ftk_runtime::{max_abs_diff, within_tolerance};
use num_complex::Complex64;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_tolerance_value_is_within_itself(value in -1e12f64..1e12) {
        prop_assert!(within_tolerance(value, value, 0.0, 0.0));
    }

    #[test]
    fn test_tolerance_rtol_scales_with_magnitude(
        expected in 1.0f64..1e6,
        rel in 0.0f64..0.5,
    ) {
        let actual = expected * (1.0 + rel * 1e-10);
        prop_assert!(within_tolerance(actual, expected, 0.0, 1e-9));
    }

    #[test]
    fn test_tolerance_max_abs_diff_is_symmetric(
        lhs in prop::collection::vec(-1e3f64..1e3, 0..32),
        shift in -1.0f64..1.0,
    ) {
        let rhs = lhs.iter().map(|v| v + shift).collect::<Vec<_>>();
        let forward = max_abs_diff(&lhs, &rhs);
        let backward = max_abs_diff(&rhs, &lhs);
        prop_assert!((forward - backward).abs() <= 1e-12);
        if !lhs.is_empty() {
            prop_assert!((forward - shift.abs()).abs() <= 1e-9);
        }
    }

    #[test]
    fn test_tolerance_complex_distance_is_modulus(re in -1e3f64..1e3, im in -1e3f64..1e3) {
        let z = Complex64::new(re, im);
        let origin = Complex64::new(0.0, 0.0);
        prop_assert!((max_abs_diff(&[z], &[origin]) - z.norm()).abs() <= 1e-12);
        prop_assert!(within_tolerance(z, origin, z.norm(), 0.0));
    }
}
