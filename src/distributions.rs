//! Reference probability distributions.
//!
//! Continuous distributions with closed-form moments, evaluated in
//! double-double precision. They serve two roles: as inputs to the
//! numerical moment estimators in [`crate::moments`], and as the oracle those
//! estimators are checked against.
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Mean | Variance |
//! |---|---|---|---|
//! | [`Uniform`] | min, max | (a+b)/2 | (b−a)²/12 |
//! | [`Triangular`] | min, mode, max | (a+b+c)/3 | (a²+b²+c²−ab−ac−bc)/18 |
//! | [`Normal`] | μ, σ | μ | σ² |
//! | [`LogNormal`] | μ, σ | exp(μ+σ²/2) | (exp(σ²)−1)·exp(2μ+σ²) |
//! | [`Exponential`] | λ | 1/λ | 1/λ² |
//! | [`Gamma`] | k, θ | kθ | kθ² |
//!
//! # Design Notes
//!
//! Only the density, the support and the first two moments are part of the
//! [`ContinuousDistribution`] contract. Skewness, kurtosis, entropy and CDFs
//! are inherent methods, so a caller-defined density needs nothing beyond
//! the trait to be integrated.

use thiserror::Error;

use crate::ddouble::DoubleDouble;
use crate::quadrature::Interval;
use crate::special;

/// Error type for invalid distribution parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    /// Parameters violate distribution constraints.
    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),
}

/// A univariate continuous distribution that can be integrated numerically.
///
/// `pdf` must return 0 outside [`support`](Self::support) and NaN for NaN
/// input. [`breakpoints`](Self::breakpoints) lists interior points where the
/// density has a kink or jump; integrals are split there.
pub trait ContinuousDistribution {
    fn pdf(&self, x: DoubleDouble) -> DoubleDouble;

    fn support(&self) -> Interval;

    fn breakpoints(&self) -> Vec<DoubleDouble> {
        Vec::new()
    }

    fn mean(&self) -> DoubleDouble;

    fn variance(&self) -> DoubleDouble;
}

fn finite_support(min: DoubleDouble, max: DoubleDouble) -> Interval {
    Interval::new(min, max).unwrap_or_else(|_| Interval::real_line())
}

fn half_line() -> Interval {
    finite_support(DoubleDouble::ZERO, DoubleDouble::INFINITY)
}

// ============================================================================
// Uniform Distribution
// ============================================================================

/// Continuous uniform distribution on `[min, max]`.
///
/// # Mathematical Definition
/// - PDF: f(x) = 1/(max−min) for x ∈ [min, max]
/// - CDF: F(x) = (x−min)/(max−min)
/// - Mean: (min+max)/2
/// - Variance: (max−min)²/12
/// - Entropy: ln(max−min)
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    min: DoubleDouble,
    max: DoubleDouble,
}

impl Uniform {
    /// Creates a new uniform distribution on `[min, max]`.
    ///
    /// # Errors
    /// Returns `Err` if `min >= max` or either parameter is not finite.
    pub fn new(
        min: impl Into<DoubleDouble>,
        max: impl Into<DoubleDouble>,
    ) -> Result<Self, DistributionError> {
        let (min, max) = (min.into(), max.into());
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(DistributionError::InvalidParameters(format!(
                "Uniform requires min < max, got min={min}, max={max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> DoubleDouble {
        self.min
    }

    pub fn max(&self) -> DoubleDouble {
        self.max
    }

    pub fn skewness(&self) -> DoubleDouble {
        DoubleDouble::ZERO
    }

    /// Excess kurtosis, −6/5.
    pub fn excess_kurtosis(&self) -> DoubleDouble {
        DoubleDouble::from(-6.0) / 5.0
    }

    pub fn entropy(&self) -> DoubleDouble {
        (self.max - self.min).ln()
    }

    /// CDF: F(x) = (x−min)/(max−min), clamped to [0, 1].
    pub fn cdf(&self, x: DoubleDouble) -> DoubleDouble {
        if x.is_nan() {
            DoubleDouble::NAN
        } else if x <= self.min {
            DoubleDouble::ZERO
        } else if x >= self.max {
            DoubleDouble::ONE
        } else {
            (x - self.min) / (self.max - self.min)
        }
    }
}

impl ContinuousDistribution for Uniform {
    /// PDF: f(x) = 1/(max−min) for x ∈ [min, max], 0 otherwise.
    fn pdf(&self, x: DoubleDouble) -> DoubleDouble {
        if x.is_nan() {
            DoubleDouble::NAN
        } else if x >= self.min && x <= self.max {
            (self.max - self.min).recip()
        } else {
            DoubleDouble::ZERO
        }
    }

    fn support(&self) -> Interval {
        finite_support(self.min, self.max)
    }

    fn mean(&self) -> DoubleDouble {
        (self.min + self.max).mul_pow2(0.5)
    }

    fn variance(&self) -> DoubleDouble {
        (self.max - self.min).sqr() / 12.0
    }
}

// ============================================================================
// Triangular Distribution
// ============================================================================

/// Triangular distribution with parameters `[min, mode, max]`.
///
/// # Mathematical Definition
/// - PDF: piecewise linear, peaking at mode
/// - CDF: piecewise quadratic
/// - Mean: (min + mode + max) / 3
/// - Variance: (a² + b² + c² − ab − ac − bc) / 18
/// - Entropy: ½ + ln((max − min)/2)
///
/// The density has a kink at the mode, which is reported as a breakpoint.
///
/// Reference: Johnson, Kotz & Balakrishnan (1995), *Continuous Univariate
/// Distributions*, Vol. 2, Chapter 26.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangular {
    min: DoubleDouble,
    mode: DoubleDouble,
    max: DoubleDouble,
}

impl Triangular {
    /// Creates a new triangular distribution.
    ///
    /// # Errors
    /// Returns `Err` if `min >= max` or `mode` is outside `[min, max]`.
    pub fn new(
        min: impl Into<DoubleDouble>,
        mode: impl Into<DoubleDouble>,
        max: impl Into<DoubleDouble>,
    ) -> Result<Self, DistributionError> {
        let (min, mode, max) = (min.into(), mode.into(), max.into());
        if !min.is_finite() || !mode.is_finite() || !max.is_finite() {
            return Err(DistributionError::InvalidParameters(
                "Triangular parameters must be finite".into(),
            ));
        }
        if min > mode || mode > max || min >= max {
            return Err(DistributionError::InvalidParameters(format!(
                "Triangular requires min ≤ mode ≤ max and min < max, got {min}, {mode}, {max}"
            )));
        }
        Ok(Self { min, mode, max })
    }

    pub fn min(&self) -> DoubleDouble {
        self.min
    }

    pub fn mode(&self) -> DoubleDouble {
        self.mode
    }

    pub fn max(&self) -> DoubleDouble {
        self.max
    }

    /// a² + b² + c² − ab − ac − bc
    fn spread(&self) -> DoubleDouble {
        let (a, b, c) = (self.min, self.mode, self.max);
        a.sqr() + b.sqr() + c.sqr() - a * b - a * c - b * c
    }

    /// Skewness √2 (a+c−2b)(2a−c−b)(a−2c+b) / (5 f^(3/2)), with a = min,
    /// b = mode, c = max and f the spread term of the variance.
    pub fn skewness(&self) -> DoubleDouble {
        let (a, b, c) = (self.min, self.mode, self.max);
        let numerator = DoubleDouble::from(2.0).sqrt()
            * (a + c - b.mul_pow2(2.0))
            * (a.mul_pow2(2.0) - c - b)
            * (a - c.mul_pow2(2.0) + b);
        let f = self.spread();
        numerator / (f * f.sqrt() * 5.0)
    }

    /// Excess kurtosis, −3/5.
    pub fn excess_kurtosis(&self) -> DoubleDouble {
        DoubleDouble::from(-3.0) / 5.0
    }

    pub fn entropy(&self) -> DoubleDouble {
        (self.max - self.min).mul_pow2(0.5).ln() + 0.5
    }

    /// CDF of the triangular distribution.
    ///
    /// ```text
    /// F(x) = (x−a)² / ((c−a)(b−a))       for a ≤ x ≤ b
    ///      = 1 − (c−x)² / ((c−a)(c−b))   for b < x ≤ c
    /// ```
    pub fn cdf(&self, x: DoubleDouble) -> DoubleDouble {
        let (a, b, c) = (self.min, self.mode, self.max);
        if x.is_nan() {
            DoubleDouble::NAN
        } else if x <= a {
            DoubleDouble::ZERO
        } else if x <= b {
            (x - a).sqr() / ((c - a) * (b - a))
        } else if x < c {
            DoubleDouble::ONE - (c - x).sqr() / ((c - a) * (c - b))
        } else {
            DoubleDouble::ONE
        }
    }
}

impl ContinuousDistribution for Triangular {
    /// PDF of the triangular distribution.
    ///
    /// ```text
    /// f(x) = 2(x−a) / ((c−a)(b−a))  for a ≤ x < b
    ///      = 2 / (c−a)               at x = b
    ///      = 2(c−x) / ((c−a)(c−b))  for b < x ≤ c
    ///      = 0                       otherwise
    /// ```
    fn pdf(&self, x: DoubleDouble) -> DoubleDouble {
        let (a, b, c) = (self.min, self.mode, self.max);
        if x.is_nan() {
            DoubleDouble::NAN
        } else if x < a || x > c {
            DoubleDouble::ZERO
        } else if x < b {
            (x - a).mul_pow2(2.0) / ((c - a) * (b - a))
        } else if x > b {
            (c - x).mul_pow2(2.0) / ((c - a) * (c - b))
        } else {
            DoubleDouble::from(2.0) / (c - a)
        }
    }

    fn support(&self) -> Interval {
        finite_support(self.min, self.max)
    }

    fn breakpoints(&self) -> Vec<DoubleDouble> {
        if self.mode > self.min && self.mode < self.max {
            vec![self.mode]
        } else {
            Vec::new()
        }
    }

    /// Mean = (min + mode + max) / 3.
    fn mean(&self) -> DoubleDouble {
        (self.min + self.mode + self.max) / 3.0
    }

    /// Variance = (a² + b² + c² − ab − ac − bc) / 18.
    fn variance(&self) -> DoubleDouble {
        self.spread() / 18.0
    }
}

// ============================================================================
// Normal Distribution
// ============================================================================

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// # Mathematical Definition
/// - PDF: φ(x) = (1/(σ√(2π))) exp(−(x−μ)²/(2σ²))
/// - Mean: μ
/// - Variance: σ²
/// - Entropy: ½ ln(2πeσ²)
#[derive(Debug, Clone, PartialEq)]
pub struct Normal {
    mu: DoubleDouble,
    sigma: DoubleDouble,
}

impl Normal {
    /// Creates a new normal distribution N(μ, σ).
    ///
    /// # Errors
    /// Returns `Err` if `sigma ≤ 0` or parameters are not finite.
    pub fn new(
        mu: impl Into<DoubleDouble>,
        sigma: impl Into<DoubleDouble>,
    ) -> Result<Self, DistributionError> {
        let (mu, sigma) = (mu.into(), sigma.into());
        if !mu.is_finite() || !sigma.is_finite() || sigma <= DoubleDouble::ZERO {
            return Err(DistributionError::InvalidParameters(format!(
                "Normal requires finite μ and σ > 0, got μ={mu}, σ={sigma}"
            )));
        }
        Ok(Self { mu, sigma })
    }

    /// N(0, 1).
    pub fn standard() -> Self {
        Self {
            mu: DoubleDouble::ZERO,
            sigma: DoubleDouble::ONE,
        }
    }

    pub fn mu(&self) -> DoubleDouble {
        self.mu
    }

    pub fn sigma(&self) -> DoubleDouble {
        self.sigma
    }

    pub fn std_dev(&self) -> DoubleDouble {
        self.sigma
    }

    pub fn skewness(&self) -> DoubleDouble {
        DoubleDouble::ZERO
    }

    pub fn excess_kurtosis(&self) -> DoubleDouble {
        DoubleDouble::ZERO
    }

    /// Entropy = ½(1 + ln 2π) + ln σ.
    pub fn entropy(&self) -> DoubleDouble {
        (DoubleDouble::TAU.ln() + 1.0).mul_pow2(0.5) + self.sigma.ln()
    }
}

impl ContinuousDistribution for Normal {
    /// PDF: (1/(σ√(2π))) exp(−(x−μ)²/(2σ²)).
    fn pdf(&self, x: DoubleDouble) -> DoubleDouble {
        let z = (x - self.mu) / self.sigma;
        special::standard_normal_pdf(z) / self.sigma
    }

    fn support(&self) -> Interval {
        Interval::real_line()
    }

    fn mean(&self) -> DoubleDouble {
        self.mu
    }

    fn variance(&self) -> DoubleDouble {
        self.sigma.sqr()
    }
}

// ============================================================================
// LogNormal Distribution
// ============================================================================

/// Log-normal distribution: if X ~ LogNormal(μ, σ), then ln(X) ~ N(μ, σ²).
///
/// # Mathematical Definition
/// - PDF: (1/(xσ√(2π))) exp(−(ln(x)−μ)²/(2σ²)) for x > 0
/// - Mean: exp(μ + σ²/2)
/// - Variance: (exp(σ²) − 1) · exp(2μ + σ²)
/// - Skewness: (exp(σ²) + 2) √(exp(σ²) − 1)
/// - Excess kurtosis: exp(4σ²) + 2exp(3σ²) + 3exp(2σ²) − 6
///
/// Reference: Johnson, Kotz & Balakrishnan (1994), *Continuous Univariate
/// Distributions*, Vol. 1, Chapter 14.
#[derive(Debug, Clone, PartialEq)]
pub struct LogNormal {
    mu: DoubleDouble,
    sigma: DoubleDouble,
}

impl LogNormal {
    /// Creates a new log-normal distribution.
    ///
    /// Parameters `mu` and `sigma` are the mean and std dev of ln(X).
    ///
    /// # Errors
    /// Returns `Err` if `sigma ≤ 0` or parameters are not finite.
    pub fn new(
        mu: impl Into<DoubleDouble>,
        sigma: impl Into<DoubleDouble>,
    ) -> Result<Self, DistributionError> {
        let (mu, sigma) = (mu.into(), sigma.into());
        if !mu.is_finite() || !sigma.is_finite() || sigma <= DoubleDouble::ZERO {
            return Err(DistributionError::InvalidParameters(format!(
                "LogNormal requires finite μ and σ > 0, got μ={mu}, σ={sigma}"
            )));
        }
        Ok(Self { mu, sigma })
    }

    pub fn mu(&self) -> DoubleDouble {
        self.mu
    }

    pub fn sigma(&self) -> DoubleDouble {
        self.sigma
    }

    pub fn skewness(&self) -> DoubleDouble {
        let w = self.sigma.sqr().exp();
        (w + 2.0) * (w - 1.0).sqrt()
    }

    pub fn excess_kurtosis(&self) -> DoubleDouble {
        let w = self.sigma.sqr().exp();
        w.powi(4) + w.powi(3) * 2.0 + w.sqr() * 3.0 - 6.0
    }

    /// Entropy = μ + ½ + ln(σ√(2π)).
    pub fn entropy(&self) -> DoubleDouble {
        self.mu + 0.5 + (self.sigma * DoubleDouble::TAU.sqrt()).ln()
    }
}

impl ContinuousDistribution for LogNormal {
    /// PDF for x > 0.
    fn pdf(&self, x: DoubleDouble) -> DoubleDouble {
        if x.is_nan() {
            return DoubleDouble::NAN;
        }
        if x <= DoubleDouble::ZERO || x.is_infinite() {
            return DoubleDouble::ZERO;
        }
        let z = (x.ln() - self.mu) / self.sigma;
        special::standard_normal_pdf(z) / (x * self.sigma)
    }

    fn support(&self) -> Interval {
        half_line()
    }

    /// Mean = exp(μ + σ²/2).
    fn mean(&self) -> DoubleDouble {
        (self.mu + self.sigma.sqr().mul_pow2(0.5)).exp()
    }

    /// Variance = (exp(σ²) − 1) · exp(2μ + σ²).
    fn variance(&self) -> DoubleDouble {
        let s2 = self.sigma.sqr();
        (s2.exp() - 1.0) * (self.mu.mul_pow2(2.0) + s2).exp()
    }
}

// ============================================================================
// Exponential Distribution
// ============================================================================

/// Exponential distribution with rate λ.
///
/// # Mathematical Definition
/// - PDF: f(x) = λ exp(−λx) for x ≥ 0
/// - CDF: F(x) = 1 − exp(−λx)
/// - Mean: 1/λ, Variance: 1/λ²
/// - Skewness 2, excess kurtosis 6
/// - Entropy: 1 − ln λ
#[derive(Debug, Clone, PartialEq)]
pub struct Exponential {
    rate: DoubleDouble,
}

impl Exponential {
    /// # Errors
    /// Returns `Err` if `rate ≤ 0` or is not finite.
    pub fn new(rate: impl Into<DoubleDouble>) -> Result<Self, DistributionError> {
        let rate = rate.into();
        if !rate.is_finite() || rate <= DoubleDouble::ZERO {
            return Err(DistributionError::InvalidParameters(format!(
                "Exponential requires finite λ > 0, got λ={rate}"
            )));
        }
        Ok(Self { rate })
    }

    pub fn rate(&self) -> DoubleDouble {
        self.rate
    }

    pub fn skewness(&self) -> DoubleDouble {
        DoubleDouble::from(2.0)
    }

    pub fn excess_kurtosis(&self) -> DoubleDouble {
        DoubleDouble::from(6.0)
    }

    pub fn entropy(&self) -> DoubleDouble {
        DoubleDouble::ONE - self.rate.ln()
    }

    pub fn cdf(&self, x: DoubleDouble) -> DoubleDouble {
        if x.is_nan() {
            DoubleDouble::NAN
        } else if x <= DoubleDouble::ZERO {
            DoubleDouble::ZERO
        } else {
            DoubleDouble::ONE - (-(self.rate * x)).exp()
        }
    }
}

impl ContinuousDistribution for Exponential {
    fn pdf(&self, x: DoubleDouble) -> DoubleDouble {
        if x.is_nan() {
            DoubleDouble::NAN
        } else if x < DoubleDouble::ZERO {
            DoubleDouble::ZERO
        } else {
            self.rate * (-(self.rate * x)).exp()
        }
    }

    fn support(&self) -> Interval {
        half_line()
    }

    fn mean(&self) -> DoubleDouble {
        self.rate.recip()
    }

    fn variance(&self) -> DoubleDouble {
        self.rate.sqr().recip()
    }
}

// ============================================================================
// Gamma Distribution
// ============================================================================

/// Gamma distribution with shape k and scale θ.
///
/// # Mathematical Definition
/// - PDF: f(x) = x^(k−1) exp(−x/θ) / (Γ(k) θ^k) for x > 0
/// - Mean: kθ, Variance: kθ²
/// - Skewness: 2/√k, Excess kurtosis: 6/k
/// - Entropy: k + ln θ + ln Γ(k) + (1 − k) ψ(k)
///
/// Reference: Johnson, Kotz & Balakrishnan (1994), *Continuous Univariate
/// Distributions*, Vol. 1, Chapter 17.
#[derive(Debug, Clone, PartialEq)]
pub struct Gamma {
    shape: DoubleDouble,
    scale: DoubleDouble,
    /// ln Γ(k) + k ln θ
    ln_norm: DoubleDouble,
}

impl Gamma {
    /// # Errors
    /// Returns `Err` if `shape ≤ 0`, `scale ≤ 0`, or either is not finite.
    pub fn new(
        shape: impl Into<DoubleDouble>,
        scale: impl Into<DoubleDouble>,
    ) -> Result<Self, DistributionError> {
        let (shape, scale) = (shape.into(), scale.into());
        if !shape.is_finite() || !scale.is_finite() {
            return Err(DistributionError::InvalidParameters(
                "Gamma parameters must be finite".into(),
            ));
        }
        if shape <= DoubleDouble::ZERO || scale <= DoubleDouble::ZERO {
            return Err(DistributionError::InvalidParameters(format!(
                "Gamma requires k > 0 and θ > 0, got k={shape}, θ={scale}"
            )));
        }
        let ln_norm = special::ln_gamma(shape) + shape * scale.ln();
        Ok(Self {
            shape,
            scale,
            ln_norm,
        })
    }

    pub fn shape(&self) -> DoubleDouble {
        self.shape
    }

    pub fn scale(&self) -> DoubleDouble {
        self.scale
    }

    pub fn skewness(&self) -> DoubleDouble {
        DoubleDouble::from(2.0) / self.shape.sqrt()
    }

    pub fn excess_kurtosis(&self) -> DoubleDouble {
        DoubleDouble::from(6.0) / self.shape
    }

    pub fn entropy(&self) -> DoubleDouble {
        let k = self.shape;
        k + self.scale.ln() + special::ln_gamma(k) + (DoubleDouble::ONE - k) * special::digamma(k)
    }
}

impl ContinuousDistribution for Gamma {
    fn pdf(&self, x: DoubleDouble) -> DoubleDouble {
        if x.is_nan() {
            return DoubleDouble::NAN;
        }
        if x < DoubleDouble::ZERO || x.is_infinite() {
            return DoubleDouble::ZERO;
        }
        if x.is_zero() {
            return if self.shape < 1.0 {
                DoubleDouble::INFINITY
            } else if self.shape == 1.0 {
                self.scale.recip()
            } else {
                DoubleDouble::ZERO
            };
        }
        ((self.shape - 1.0) * x.ln() - x / self.scale - self.ln_norm).exp()
    }

    fn support(&self) -> Interval {
        half_line()
    }

    fn mean(&self) -> DoubleDouble {
        self.shape * self.scale
    }

    fn variance(&self) -> DoubleDouble {
        self.shape * self.scale.sqr()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dd(x: f64) -> DoubleDouble {
        DoubleDouble::from(x)
    }

    fn close(a: DoubleDouble, b: DoubleDouble, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    // --- Uniform ---

    #[test]
    fn test_uniform_basic() {
        let u = Uniform::new(0.0, 10.0).unwrap();
        assert_eq!(u.mean(), 5.0);
        assert!(close(u.variance(), dd(100.0) / 12.0, 1e-30));
        assert!(close(u.entropy(), dd(10.0).ln(), 1e-30));
    }

    #[test]
    fn test_uniform_cdf() {
        let u = Uniform::new(0.0, 10.0).unwrap();
        assert_eq!(u.cdf(dd(-1.0)), 0.0);
        assert_eq!(u.cdf(dd(5.0)), 0.5);
        assert_eq!(u.cdf(dd(11.0)), 1.0);
        assert!(u.cdf(DoubleDouble::NAN).is_nan());
    }

    #[test]
    fn test_uniform_pdf() {
        let u = Uniform::new(0.0, 5.0).unwrap();
        assert_eq!(u.pdf(dd(2.5)), dd(5.0).recip());
        assert_eq!(u.pdf(dd(-1.0)), 0.0);
        assert!(u.pdf(DoubleDouble::NAN).is_nan());
    }

    #[test]
    fn test_uniform_invalid() {
        assert!(Uniform::new(5.0, 5.0).is_err());
        assert!(Uniform::new(5.0, 3.0).is_err());
        assert!(Uniform::new(f64::NAN, 5.0).is_err());
        assert!(Uniform::new(0.0, f64::INFINITY).is_err());
    }

    // --- Triangular ---

    #[test]
    fn test_triangular_mean() {
        let t = Triangular::new(0.0, 3.0, 6.0).unwrap();
        assert_eq!(t.mean(), 3.0);
        assert_eq!(t.breakpoints(), vec![dd(3.0)]);
    }

    #[test]
    fn test_triangular_symmetric_variance() {
        let t = Triangular::new(0.0, 5.0, 10.0).unwrap();
        // Var = (0+25+100-0-0-50)/18 = 75/18
        assert!(close(t.variance(), dd(75.0) / 18.0, 1e-30));
        assert!(t.skewness().abs() < 1e-30);
    }

    #[test]
    fn test_triangular_skewness_right_angle() {
        // Mode at min: skewness 2√2/5
        let t = Triangular::new(0.0, 0.0, 1.0).unwrap();
        let expected = dd(2.0).sqrt().mul_pow2(2.0) / 5.0;
        assert!(close(t.skewness(), expected, 1e-30), "{}", t.skewness());
        assert!(t.breakpoints().is_empty());
    }

    #[test]
    fn test_triangular_pdf_at_mode() {
        let t = Triangular::new(0.0, 0.0, 2.0).unwrap();
        assert_eq!(t.pdf(dd(0.0)), 1.0);
        assert_eq!(t.pdf(dd(1.0)), 0.5);
        assert_eq!(t.pdf(dd(2.5)), 0.0);
    }

    #[test]
    fn test_triangular_cdf() {
        let t = Triangular::new(0.0, 5.0, 10.0).unwrap();
        assert_eq!(t.cdf(dd(0.0)), 0.0);
        assert_eq!(t.cdf(dd(10.0)), 1.0);
        // At mode: F(5) = 25/50
        assert_eq!(t.cdf(dd(5.0)), 0.5);
    }

    #[test]
    fn test_triangular_invalid() {
        assert!(Triangular::new(5.0, 3.0, 10.0).is_err()); // mode < min
        assert!(Triangular::new(0.0, 11.0, 10.0).is_err()); // mode > max
        assert!(Triangular::new(5.0, 5.0, 5.0).is_err()); // min == max
    }

    // --- Normal ---

    #[test]
    fn test_normal_standard() {
        let n = Normal::standard();
        assert_eq!(n.mean(), 0.0);
        assert_eq!(n.variance(), 1.0);
        assert!(n.support().contains_interior(dd(-1e10)));
        assert!(close(n.pdf(dd(0.0)), special::frac_1_sqrt_2pi(), 1e-31));
    }

    #[test]
    fn test_normal_entropy() {
        // ½ ln(2πe)
        let expected = (DoubleDouble::TAU * DoubleDouble::E).ln().mul_pow2(0.5);
        assert!(close(Normal::standard().entropy(), expected, 1e-30));
        let wide = Normal::new(3.0, 2.0).unwrap();
        assert!(close(wide.entropy(), expected + dd(2.0).ln(), 1e-30));
    }

    #[test]
    fn test_normal_invalid() {
        assert!(Normal::new(0.0, 0.0).is_err());
        assert!(Normal::new(0.0, -1.0).is_err());
        let err = Normal::new(f64::NAN, 1.0).unwrap_err();
        assert!(err.to_string().starts_with("invalid distribution parameters"));
    }

    // --- LogNormal ---

    #[test]
    fn test_lognormal_mean() {
        let ln = LogNormal::new(0.0, 1.0).unwrap();
        assert!(close(ln.mean(), dd(0.5).exp(), 1e-30));
    }

    #[test]
    fn test_lognormal_pdf() {
        let ln = LogNormal::new(0.0, 1.0).unwrap();
        assert_eq!(ln.pdf(dd(0.0)), 0.0);
        assert_eq!(ln.pdf(dd(-1.0)), 0.0);
        // At the median the density is φ(0)
        assert!(close(ln.pdf(dd(1.0)), special::frac_1_sqrt_2pi(), 1e-31));
    }

    #[test]
    fn test_lognormal_skewness_small_sigma() {
        // Tends to 3σ as σ → 0.
        let ln = LogNormal::new(0.0, 1e-4).unwrap();
        assert!((ln.skewness() - 3e-4).abs() < 1e-7);
    }

    // --- Exponential ---

    #[test]
    fn test_exponential_moments() {
        let e = Exponential::new(2.0).unwrap();
        assert_eq!(e.mean(), 0.5);
        assert_eq!(e.variance(), 0.25);
        assert!(close(e.entropy(), DoubleDouble::ONE - dd(2.0).ln(), 1e-31));
    }

    #[test]
    fn test_exponential_cdf() {
        let e = Exponential::new(1.0).unwrap();
        assert_eq!(e.cdf(dd(-1.0)), 0.0);
        assert!(close(e.cdf(dd(1.0)), DoubleDouble::ONE - DoubleDouble::E.recip(), 1e-31));
    }

    #[test]
    fn test_exponential_invalid() {
        assert!(Exponential::new(0.0).is_err());
        assert!(Exponential::new(f64::INFINITY).is_err());
    }

    // --- Gamma ---

    #[test]
    fn test_gamma_reduces_to_exponential() {
        let g = Gamma::new(1.0, 0.5).unwrap();
        let e = Exponential::new(2.0).unwrap();
        for x in [0.0, 0.1, 1.0, 3.7] {
            assert!(close(g.pdf(dd(x)), e.pdf(dd(x)), 1e-29), "x={x}");
        }
        assert!(close(g.entropy(), e.entropy(), 1e-28));
    }

    #[test]
    fn test_gamma_pdf_at_zero() {
        assert_eq!(Gamma::new(2.0, 1.0).unwrap().pdf(dd(0.0)), 0.0);
        assert!(Gamma::new(0.5, 1.0).unwrap().pdf(dd(0.0)).is_infinite());
        assert_eq!(Gamma::new(1.0, 4.0).unwrap().pdf(dd(0.0)), 0.25);
    }

    #[test]
    fn test_gamma_moments() {
        let g = Gamma::new(2.0, 1.0).unwrap();
        assert_eq!(g.mean(), 2.0);
        assert_eq!(g.variance(), 2.0);
        assert!(close(g.skewness(), dd(2.0).sqrt(), 1e-30));
        assert_eq!(g.excess_kurtosis(), 3.0);
    }

    #[test]
    fn test_gamma_invalid() {
        assert!(Gamma::new(0.0, 1.0).is_err());
        assert!(Gamma::new(1.0, -1.0).is_err());
        assert!(Gamma::new(f64::NAN, 1.0).is_err());
    }
}
