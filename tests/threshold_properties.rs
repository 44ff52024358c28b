use proptest::prelude::*;

use rust_type_inference::inference::threshold::logarithmic_threshold;

proptest! {
    #[test]
    fn threshold_is_strictly_between_zero_and_one(n in 2usize..10_000_000, m in 1.01f64..1_000.0) {
        let t = logarithmic_threshold(n, m).unwrap();
        prop_assert!(t > 0.0 && t < 1.0, "threshold({n}, {m}) = {t}");
    }

    #[test]
    fn threshold_does_not_shrink_as_rows_grow(n in 2usize..1_000_000, m in 1.01f64..100.0) {
        let smaller = logarithmic_threshold(n, m).unwrap();
        let larger = logarithmic_threshold(n * 2, m).unwrap();
        prop_assert!(smaller <= larger);
    }

    #[test]
    fn degenerate_rows_have_no_threshold(n in 0usize..=1, m in 1.01f64..100.0) {
        prop_assert_eq!(logarithmic_threshold(n, m), None);
    }
}
