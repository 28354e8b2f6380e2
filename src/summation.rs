//! Compensated summation in double-double precision.
//!
//! # Algorithm
//!
//! Kahan summation carries a correction term holding the low-order bits
//! lost by the previous addition and re-injects it into the next addend,
//! reducing the accumulated rounding error from O(n·ε) to O(ε) plus a term
//! of order n·ε².
//!
//! Reference: Kahan (1965), "Further Remarks on Reducing Truncation
//! Errors", *Communications of the ACM* 8(1), p. 40.

use crate::ddouble::DoubleDouble;

/// Running compensated sum.
///
/// Only the running total is observable through [`KahanSum::value`]; the
/// pending correction is internal state.
///
/// Non-finite addends are not special-cased: NaN and ±∞ propagate into the
/// total exactly as they would in a naive sum.
///
/// # Examples
/// ```
/// use u_ddstat::ddouble::DoubleDouble;
/// use u_ddstat::summation::KahanSum;
///
/// let mut acc = KahanSum::new();
/// for _ in 0..10 {
///     acc.add(DoubleDouble::from(1e20));
/// }
/// acc.add(DoubleDouble::ONE);
/// for _ in 0..10 {
///     acc.add(DoubleDouble::from(-1e20));
/// }
/// assert_eq!(acc.value(), DoubleDouble::ONE);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KahanSum {
    total: DoubleDouble,
    correction: DoubleDouble,
}

impl KahanSum {
    /// Creates a zero-initialized accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the running total.
    pub fn add(&mut self, value: DoubleDouble) {
        let d = value - self.correction;
        let t = self.total + d;
        self.correction = (t - self.total) - d;
        self.total = t;
    }

    /// Returns a new accumulator with both the total and the pending
    /// correction multiplied by `factor`.
    #[must_use]
    pub fn scale(&self, factor: DoubleDouble) -> Self {
        Self {
            total: self.total * factor,
            correction: self.correction * factor,
        }
    }

    /// The accumulated total.
    pub fn value(&self) -> DoubleDouble {
        self.total
    }
}

impl Extend<DoubleDouble> for KahanSum {
    fn extend<I: IntoIterator<Item = DoubleDouble>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}

impl FromIterator<DoubleDouble> for KahanSum {
    fn from_iter<I: IntoIterator<Item = DoubleDouble>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Compensated sum of a slice.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn kahan_sum(data: &[DoubleDouble]) -> DoubleDouble {
    data.iter().copied().collect::<KahanSum>().value()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn matches_exact_integer_sum(
            data in proptest::collection::vec(-1_000_000_i32..1_000_000, 0..200)
        ) {
            // Integer partial sums of this size are exact in double-double.
            let terms: Vec<DoubleDouble> = data.iter().map(|&x| DoubleDouble::from(x)).collect();
            let mut exact = DoubleDouble::ZERO;
            for &t in &terms {
                exact += t;
            }
            prop_assert_eq!(kahan_sum(&terms), exact);
        }

        #[test]
        fn order_does_not_matter(
            mut data in proptest::collection::vec(-1e3_f64..1e3, 1..100)
        ) {
            let thirds = |v: &[f64]| -> DoubleDouble {
                v.iter().map(|&x| DoubleDouble::from(x) / 3.0).collect::<KahanSum>().value()
            };
            let forward = thirds(&data);
            data.reverse();
            let backward = thirds(&data);
            prop_assert!((forward - backward).abs() < 1e-24);
        }
    }
}
