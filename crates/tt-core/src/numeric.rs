//! Float helpers shared by the property and table crates.

use crate::{CoreError, CoreResult};

/// Pass `v` through if finite, otherwise name the offending quantity.
pub fn ensure_finite(v: f64, what: &'static str) -> CoreResult<f64> {
    if v.is_finite() {
        return Ok(v);
    }
    Err(CoreError::NonFinite { what, value: v })
}

/// Sorted, de-duplicated copy of the finite values in `values`.
pub fn sorted_distinct(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

/// Median of the finite values, `None` when there are none.
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => None,
        n if n % 2 == 0 => Some(0.5 * (sorted[mid - 1] + sorted[mid])),
        _ => Some(sorted[mid]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ensure_finite_names_the_quantity() {
        assert_eq!(ensure_finite(2.0, "quality"), Ok(2.0));
        let msg = ensure_finite(f64::INFINITY, "quality").unwrap_err().to_string();
        assert!(msg.contains("quality"));
        let nan: CoreResult<f64> = ensure_finite(f64::NAN, "x");
        assert!(matches!(nan, Err(CoreError::NonFinite { what: "x", .. })));
    }

    #[test]
    fn sorted_distinct_drops_duplicates_and_nan() {
        let out = sorted_distinct([3.0, 1.0, f64::NAN, 3.0, 2.0, 1.0]);
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median([3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median([4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median([f64::NAN]), None);
        assert_eq!(median(std::iter::empty()), None);
    }

    proptest! {
        #[test]
        fn sorted_distinct_is_strictly_increasing(values in proptest::collection::vec(-1e6f64..1e6, 0..64)) {
            let out = sorted_distinct(values);
            for pair in out.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        #[test]
        fn median_lies_within_range(values in proptest::collection::vec(-1e6f64..1e6, 1..64)) {
            let m = median(values.iter().copied()).unwrap();
            let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(lo <= m && m <= hi);
        }
    }
}
