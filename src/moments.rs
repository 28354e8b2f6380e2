//! Numerical moments of continuous distributions.
//!
//! Every estimator here is a single adaptive integral of the density over
//! its support, split at the distribution's breakpoints:
//!
//! | Estimator | Integrand |
//! |---|---|
//! | [`mean`] | x·f(x) |
//! | [`variance`] | (x−μ)²·f(x) |
//! | [`skewness`] | (x−μ)³·f(x) / σ³ |
//! | [`kurtosis`] | (x−μ)⁴·f(x) / σ⁴ − 3 |
//! | [`entropy`] | −f(x)·ln f(x) |
//!
//! μ and σ² are taken from the distribution's closed-form
//! [`mean`](ContinuousDistribution::mean) and
//! [`variance`](ContinuousDistribution::variance), so each estimator is an
//! independent check of one closed form.
//!
//! The error estimate and evaluation count of each integral are emitted
//! through `tracing` at debug level and otherwise discarded.
//!
//! # Examples
//! ```
//! use u_ddstat::ddouble::DoubleDouble;
//! use u_ddstat::distributions::Normal;
//! use u_ddstat::moments;
//!
//! let n = Normal::standard();
//! let v = moments::variance(&n, DoubleDouble::from(1e-28), 65536).unwrap();
//! assert!((v - 1.0).abs() < 1e-25);
//! ```

use std::cmp::Ordering;

use tracing::debug;

use crate::ddouble::DoubleDouble;
use crate::distributions::ContinuousDistribution;
use crate::quadrature::{QuadratureError, QuadratureOptions};

/// Which side of `x` a CDF integral covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    /// P(X ≤ x)
    Lower,
    /// P(X > x)
    Upper,
}

/// All five estimators for one distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentSummary {
    pub mean: DoubleDouble,
    pub variance: DoubleDouble,
    pub skewness: DoubleDouble,
    /// Excess kurtosis.
    pub kurtosis: DoubleDouble,
    pub entropy: DoubleDouble,
}

/// Support bounds of `dist` restricted to `[lo, hi]`, with the breakpoints
/// strictly inside, sorted.
fn split_points<D>(dist: &D, lo: DoubleDouble, hi: DoubleDouble) -> Vec<DoubleDouble>
where
    D: ContinuousDistribution + ?Sized,
{
    let mut interior: Vec<DoubleDouble> = dist
        .breakpoints()
        .into_iter()
        .filter(|&p| p > lo && p < hi)
        .collect();
    interior.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut points = Vec::with_capacity(interior.len() + 2);
    points.push(lo);
    points.extend(interior);
    points.push(hi);
    points
}

fn integrate<D, F>(
    dist: &D,
    quantity: &'static str,
    f: F,
    lo: DoubleDouble,
    hi: DoubleDouble,
    options: &QuadratureOptions,
) -> Result<DoubleDouble, QuadratureError>
where
    D: ContinuousDistribution + ?Sized,
    F: Fn(DoubleDouble) -> DoubleDouble,
{
    let points = split_points(dist, lo, hi);
    let r = options.integrate_pieces(f, &points)?;
    debug!(
        quantity,
        value = %r.value,
        error = %r.error,
        eval_points = r.eval_points,
        "moment integral"
    );
    Ok(r.value)
}

fn over_support<D, F>(
    dist: &D,
    quantity: &'static str,
    f: F,
    eps: DoubleDouble,
    discontinue_eval_points: usize,
) -> Result<DoubleDouble, QuadratureError>
where
    D: ContinuousDistribution + ?Sized,
    F: Fn(DoubleDouble) -> DoubleDouble,
{
    let options = QuadratureOptions::new(eps, discontinue_eval_points)?;
    let support = dist.support();
    integrate(dist, quantity, f, support.min(), support.max(), &options)
}

/// E[X] = ∫ x·f(x) dx
///
/// # Errors
/// Only precondition violations of the underlying integration.
pub fn mean<D>(
    dist: &D,
    eps: DoubleDouble,
    discontinue_eval_points: usize,
) -> Result<DoubleDouble, QuadratureError>
where
    D: ContinuousDistribution + ?Sized,
{
    over_support(dist, "mean", |x| x * dist.pdf(x), eps, discontinue_eval_points)
}

/// Var[X] = ∫ (x−μ)²·f(x) dx with μ the closed-form mean.
///
/// # Errors
/// Only precondition violations of the underlying integration.
pub fn variance<D>(
    dist: &D,
    eps: DoubleDouble,
    discontinue_eval_points: usize,
) -> Result<DoubleDouble, QuadratureError>
where
    D: ContinuousDistribution + ?Sized,
{
    let mu = dist.mean();
    over_support(
        dist,
        "variance",
        |x| (x - mu).sqr() * dist.pdf(x),
        eps,
        discontinue_eval_points,
    )
}

/// Third standardized moment.
///
/// A distribution with zero variance yields a non-finite result.
///
/// # Errors
/// Only precondition violations of the underlying integration.
pub fn skewness<D>(
    dist: &D,
    eps: DoubleDouble,
    discontinue_eval_points: usize,
) -> Result<DoubleDouble, QuadratureError>
where
    D: ContinuousDistribution + ?Sized,
{
    let mu = dist.mean();
    let var = dist.variance();
    let m3 = over_support(
        dist,
        "skewness",
        |x| (x - mu).powi(3) * dist.pdf(x),
        eps,
        discontinue_eval_points,
    )?;
    Ok(m3 / (var * var.sqrt()))
}

/// Excess kurtosis: fourth standardized moment minus 3.
///
/// # Errors
/// Only precondition violations of the underlying integration.
pub fn kurtosis<D>(
    dist: &D,
    eps: DoubleDouble,
    discontinue_eval_points: usize,
) -> Result<DoubleDouble, QuadratureError>
where
    D: ContinuousDistribution + ?Sized,
{
    let mu = dist.mean();
    let var = dist.variance();
    let m4 = over_support(
        dist,
        "kurtosis",
        |x| (x - mu).sqr().sqr() * dist.pdf(x),
        eps,
        discontinue_eval_points,
    )?;
    Ok(m4 / var.sqr() - 3.0)
}

/// Differential entropy −∫ f(x) ln f(x) dx over the support, in nats.
///
/// Points where the density is zero (or negative) contribute nothing.
///
/// # Errors
/// Only precondition violations of the underlying integration.
pub fn entropy<D>(
    dist: &D,
    eps: DoubleDouble,
    discontinue_eval_points: usize,
) -> Result<DoubleDouble, QuadratureError>
where
    D: ContinuousDistribution + ?Sized,
{
    let integrand = |x: DoubleDouble| {
        let p = dist.pdf(x);
        if p > DoubleDouble::ZERO {
            -(p * p.ln())
        } else if p.is_nan() {
            p
        } else {
            DoubleDouble::ZERO
        }
    };
    over_support(dist, "entropy", integrand, eps, discontinue_eval_points)
}

/// Numerical CDF: the probability mass on one side of `x`.
///
/// Points outside the support give exactly 0 or 1; NaN gives NaN.
///
/// # Errors
/// Only precondition violations of the underlying integration.
pub fn cdf<D>(
    dist: &D,
    x: DoubleDouble,
    tail: Tail,
    eps: DoubleDouble,
    discontinue_eval_points: usize,
) -> Result<DoubleDouble, QuadratureError>
where
    D: ContinuousDistribution + ?Sized,
{
    let options = QuadratureOptions::new(eps, discontinue_eval_points)?;
    if x.is_nan() {
        return Ok(DoubleDouble::NAN);
    }

    let support = dist.support();
    let (below, above) = if x <= support.min() {
        (DoubleDouble::ZERO, DoubleDouble::ONE)
    } else if x >= support.max() {
        (DoubleDouble::ONE, DoubleDouble::ZERO)
    } else {
        let pdf = |t: DoubleDouble| dist.pdf(t);
        return match tail {
            Tail::Lower => integrate(dist, "cdf", pdf, support.min(), x, &options),
            Tail::Upper => integrate(dist, "ccdf", pdf, x, support.max(), &options),
        };
    };
    Ok(match tail {
        Tail::Lower => below,
        Tail::Upper => above,
    })
}

/// Runs all five estimators.
///
/// # Errors
/// Only precondition violations of the underlying integration.
pub fn summary<D>(
    dist: &D,
    eps: DoubleDouble,
    discontinue_eval_points: usize,
) -> Result<MomentSummary, QuadratureError>
where
    D: ContinuousDistribution + ?Sized,
{
    Ok(MomentSummary {
        mean: mean(dist, eps, discontinue_eval_points)?,
        variance: variance(dist, eps, discontinue_eval_points)?,
        skewness: skewness(dist, eps, discontinue_eval_points)?,
        kurtosis: kurtosis(dist, eps, discontinue_eval_points)?,
        entropy: entropy(dist, eps, discontinue_eval_points)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::{Exponential, Gamma, LogNormal, Normal, Triangular, Uniform};
    use crate::quadrature::{Interval, DEFAULT_DISCONTINUE_EVAL_POINTS, DEFAULT_EPS};

    const CAP: usize = DEFAULT_DISCONTINUE_EVAL_POINTS;

    fn eps() -> DoubleDouble {
        DoubleDouble::from(DEFAULT_EPS)
    }

    fn dd(x: f64) -> DoubleDouble {
        DoubleDouble::from(x)
    }

    fn assert_close(got: DoubleDouble, expected: DoubleDouble, tol: f64, what: &str) {
        assert!(
            (got - expected).abs() <= tol,
            "{what}: got {got}, expected {expected}"
        );
    }

    /// Density 1/4 on [0, 1) and 3/4 on [1, 2], with a jump at 1.
    struct TwoStep;

    impl ContinuousDistribution for TwoStep {
        fn pdf(&self, x: DoubleDouble) -> DoubleDouble {
            if x.is_nan() {
                DoubleDouble::NAN
            } else if x < 0.0 || x > 2.0 {
                DoubleDouble::ZERO
            } else if x < 1.0 {
                dd(0.25)
            } else {
                dd(0.75)
            }
        }

        fn support(&self) -> Interval {
            Interval::new(dd(0.0), dd(2.0)).unwrap()
        }

        fn breakpoints(&self) -> Vec<DoubleDouble> {
            vec![dd(1.0)]
        }

        fn mean(&self) -> DoubleDouble {
            dd(1.25)
        }

        fn variance(&self) -> DoubleDouble {
            // E[X²] = 0.25/3 + 0.75·7/3 = 11/6
            DoubleDouble::from(11.0) / 6.0 - dd(1.25).sqr()
        }
    }

    /// Uniform density on [1, 2] inside a declared support of [0, 2].
    struct ZeroPadded;

    impl ContinuousDistribution for ZeroPadded {
        fn pdf(&self, x: DoubleDouble) -> DoubleDouble {
            if x >= 1.0 && x <= 2.0 {
                DoubleDouble::ONE
            } else {
                DoubleDouble::ZERO
            }
        }

        fn support(&self) -> Interval {
            Interval::new(dd(0.0), dd(2.0)).unwrap()
        }

        fn breakpoints(&self) -> Vec<DoubleDouble> {
            vec![dd(1.0)]
        }

        fn mean(&self) -> DoubleDouble {
            dd(1.5)
        }

        fn variance(&self) -> DoubleDouble {
            DoubleDouble::ONE / 12.0
        }
    }

    // --- normal ---

    #[test]
    fn test_standard_normal_moments() {
        let n = Normal::standard();
        let s = summary(&n, eps(), CAP).unwrap();
        assert_close(s.mean, dd(0.0), 1e-28, "mean");
        assert_close(s.variance, dd(1.0), 1e-26, "variance");
        assert_close(s.skewness, dd(0.0), 1e-26, "skewness");
        assert_close(s.kurtosis, dd(0.0), 1e-25, "kurtosis");
        assert_close(s.entropy, n.entropy(), 1e-26, "entropy");
    }

    #[test]
    fn test_shifted_normal() {
        let n = Normal::new(3.0, 2.0).unwrap();
        assert_close(mean(&n, eps(), CAP).unwrap(), dd(3.0), 1e-25, "mean");
        assert_close(variance(&n, eps(), CAP).unwrap(), dd(4.0), 1e-25, "variance");
        assert_close(entropy(&n, eps(), CAP).unwrap(), n.entropy(), 1e-25, "entropy");
    }

    // --- gamma ---

    #[test]
    fn test_gamma_variance() {
        let g = Gamma::new(2.0, 1.0).unwrap();
        assert_close(variance(&g, eps(), CAP).unwrap(), dd(2.0), 1e-20, "variance");
    }

    #[test]
    fn test_gamma_summary() {
        let g = Gamma::new(3.5, 0.5).unwrap();
        let s = summary(&g, eps(), CAP).unwrap();
        assert_close(s.mean, g.mean(), 1e-24, "mean");
        assert_close(s.variance, g.variance(), 1e-24, "variance");
        assert_close(s.skewness, g.skewness(), 1e-22, "skewness");
        assert_close(s.kurtosis, g.excess_kurtosis(), 1e-22, "kurtosis");
        assert_close(s.entropy, g.entropy(), 1e-22, "entropy");
    }

    #[test]
    fn test_gamma_with_singular_density() {
        // k < 1: the density is unbounded at the left edge of the support.
        let g = Gamma::new(0.5, 1.0).unwrap();
        let mass = crate::quadrature::adaptive_integrate(
            |x| g.pdf(x),
            DoubleDouble::ZERO,
            DoubleDouble::INFINITY,
            eps(),
            CAP,
        )
        .unwrap();
        assert_close(mass.value, dd(1.0), 1e-27, "mass");

        let s = summary(&g, eps(), CAP).unwrap();
        assert_close(s.mean, g.mean(), 1e-26, "mean");
        assert_close(s.variance, g.variance(), 1e-26, "variance");
        assert_close(s.skewness, g.skewness(), 1e-25, "skewness");
        assert_close(s.kurtosis, g.excess_kurtosis(), 1e-24, "kurtosis");
        assert_close(s.entropy, g.entropy(), 1e-25, "entropy");
    }

    // --- exponential ---

    #[test]
    fn test_exponential_summary() {
        let e = Exponential::new(1.5).unwrap();
        let s = summary(&e, eps(), CAP).unwrap();
        assert_close(s.mean, e.mean(), 1e-25, "mean");
        assert_close(s.variance, e.variance(), 1e-25, "variance");
        assert_close(s.skewness, e.skewness(), 1e-23, "skewness");
        assert_close(s.kurtosis, e.excess_kurtosis(), 1e-22, "kurtosis");
        assert_close(s.entropy, e.entropy(), 1e-25, "entropy");
    }

    // --- bounded supports ---

    #[test]
    fn test_uniform_summary() {
        let u = Uniform::new(-1.0, 3.0).unwrap();
        let s = summary(&u, eps(), CAP).unwrap();
        assert_close(s.mean, u.mean(), 1e-29, "mean");
        assert_close(s.variance, u.variance(), 1e-29, "variance");
        assert_close(s.skewness, u.skewness(), 1e-29, "skewness");
        assert_close(s.kurtosis, u.excess_kurtosis(), 1e-28, "kurtosis");
        assert_close(s.entropy, u.entropy(), 1e-29, "entropy");
    }

    #[test]
    fn test_triangular_split_at_mode() {
        let t = Triangular::new(0.0, 1.0, 4.0).unwrap();
        let s = summary(&t, eps(), CAP).unwrap();
        assert_close(s.mean, t.mean(), 1e-28, "mean");
        assert_close(s.variance, t.variance(), 1e-28, "variance");
        assert_close(s.skewness, t.skewness(), 1e-27, "skewness");
        assert_close(s.kurtosis, t.excess_kurtosis(), 1e-27, "kurtosis");
        assert_close(s.entropy, t.entropy(), 1e-26, "entropy");
    }

    #[test]
    fn test_lognormal_mean_and_variance() {
        let ln = LogNormal::new(0.25, 0.5).unwrap();
        assert_close(mean(&ln, eps(), CAP).unwrap(), ln.mean(), 1e-22, "mean");
        assert_close(variance(&ln, eps(), CAP).unwrap(), ln.variance(), 1e-22, "variance");
        assert_close(entropy(&ln, eps(), CAP).unwrap(), ln.entropy(), 1e-22, "entropy");
    }

    // --- caller-defined densities ---

    #[test]
    fn test_jump_density_via_breakpoints() {
        let d = TwoStep;
        assert_close(mean(&d, eps(), CAP).unwrap(), dd(1.25), 1e-30, "mean");
        assert_close(variance(&d, eps(), CAP).unwrap(), d.variance(), 1e-29, "variance");
    }

    #[test]
    fn test_entropy_ignores_zero_density() {
        let h = entropy(&ZeroPadded, eps(), CAP).unwrap();
        assert!(!h.is_nan());
        assert_close(h, dd(0.0), 1e-30, "entropy");
    }

    #[test]
    fn test_trait_object() {
        let dists: Vec<Box<dyn ContinuousDistribution>> = vec![
            Box::new(Uniform::new(0.0, 1.0).unwrap()),
            Box::new(Exponential::new(1.0).unwrap()),
        ];
        for d in &dists {
            let m = mean(d.as_ref(), eps(), CAP).unwrap();
            assert_close(m, d.mean(), 1e-25, "mean");
        }
    }

    // --- cdf ---

    #[test]
    fn test_cdf_tails_sum_to_one() {
        let n = Normal::new(0.5, 1.5).unwrap();
        for x in [-2.0, 0.0, 0.7, 4.0] {
            let lower = cdf(&n, dd(x), Tail::Lower, eps(), CAP).unwrap();
            let upper = cdf(&n, dd(x), Tail::Upper, eps(), CAP).unwrap();
            assert_close(lower + upper, dd(1.0), 1e-26, "lower + upper");
        }
    }

    #[test]
    fn test_cdf_matches_closed_form() {
        let e = Exponential::new(0.8).unwrap();
        for x in [0.1, 1.0, 5.0] {
            let got = cdf(&e, dd(x), Tail::Lower, eps(), CAP).unwrap();
            assert_close(got, e.cdf(dd(x)), 1e-27, "exponential cdf");
        }

        let t = Triangular::new(0.0, 1.0, 4.0).unwrap();
        for x in [0.5, 1.0, 2.0, 3.9] {
            let got = cdf(&t, dd(x), Tail::Lower, eps(), CAP).unwrap();
            assert_close(got, t.cdf(dd(x)), 1e-29, "triangular cdf");
        }
    }

    #[test]
    fn test_cdf_outside_support() {
        let u = Uniform::new(0.0, 1.0).unwrap();
        assert_eq!(cdf(&u, dd(-1.0), Tail::Lower, eps(), CAP).unwrap(), 0.0);
        assert_eq!(cdf(&u, dd(-1.0), Tail::Upper, eps(), CAP).unwrap(), 1.0);
        assert_eq!(cdf(&u, dd(2.0), Tail::Lower, eps(), CAP).unwrap(), 1.0);
        assert_eq!(cdf(&u, dd(2.0), Tail::Upper, eps(), CAP).unwrap(), 0.0);
        assert!(cdf(&u, DoubleDouble::NAN, Tail::Lower, eps(), CAP)
            .unwrap()
            .is_nan());
    }

    // --- preconditions ---

    #[test]
    fn test_invalid_options_propagate() {
        let n = Normal::standard();
        assert!(matches!(
            mean(&n, dd(0.0), CAP),
            Err(QuadratureError::InvalidTolerance(_))
        ));
        assert!(matches!(
            variance(&n, eps(), 10),
            Err(QuadratureError::EvalCapTooSmall { .. })
        ));
        assert!(matches!(
            cdf(&n, DoubleDouble::NAN, Tail::Lower, DoubleDouble::NAN, CAP),
            Err(QuadratureError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_small_cap_still_returns_estimate() {
        // Too few evaluations to converge; the value is still usable.
        let g = Gamma::new(2.0, 1.0).unwrap();
        let v = variance(&g, eps(), 62).unwrap();
        assert!(v.is_finite());
        assert!((v - 2.0).abs() < 1e-2);
    }
}
