//! Adaptive quadrature in double-double precision.
//!
//! Approximates ∫ f(x) dx over a finite, half-infinite or infinite interval
//! and reports an absolute error estimate together with the number of
//! integrand evaluations spent.
//!
//! # Algorithm
//!
//! - **Rule pair**: Fejér's second rule (open Clenshaw–Curtis) with 15
//!   nodes embedded in the 31-node rule of the same family. The nodes of the
//!   15-point rule are every other node of the 31-point rule, so one round of
//!   31 evaluations yields both estimates. Their difference is the local
//!   error estimate; the 31-point value is the one accumulated.
//! - **Unbounded intervals**: mapped onto a finite reference interval with
//!   `x = a + t/(1−t)`, `x = b − t/(1−t)` or `x = t/(1−t²)`. The rule is
//!   open, so the infinite end of the map is never sampled.
//! - **Subdivision**: globally adaptive, as in QUADPACK's `qag`. Leaves of
//!   the bisection tree wait in a max-heap keyed by error and the worst one
//!   is bisected next, so evaluations go where the error is. A segment's
//!   share of `eps` halves with each bisection; the shares sum to `eps`, so
//!   the run stops once the summed error is within `eps`.
//! - **Monotone error**: a region reports the smaller of its own error and
//!   its halves' combined error. The bisection order depends on neither
//!   `eps` nor the cap, so a tighter `eps` or a larger cap only extends the
//!   same run and never reports a larger error.
//! - **Evaluation cap**: once another bisection would exceed
//!   `discontinue_eval_points`, the partition is reported as it stands and
//!   the error carries the shortfall.
//!
//! References:
//! - Fejér (1933), "Mechanische Quadraturen mit positiven Cotesschen
//!   Zahlen", *Mathematische Zeitschrift* 37.
//! - Waldvogel (2006), "Fast Construction of the Fejér and Clenshaw–Curtis
//!   Quadrature Rules", *BIT Numerical Mathematics* 46(1).
//! - Piessens et al. (1983), *QUADPACK*, Springer (global subdivision,
//!   round-off floor).
//!
//! # Examples
//! ```
//! use u_ddstat::ddouble::DoubleDouble;
//! use u_ddstat::quadrature::adaptive_integrate;
//!
//! let r = adaptive_integrate(
//!     |x: DoubleDouble| (-x).exp(),
//!     DoubleDouble::ZERO,
//!     DoubleDouble::INFINITY,
//!     DoubleDouble::from(1e-28),
//!     65536,
//! )
//! .unwrap();
//! assert!((r.value - 1.0).abs() < 1e-26);
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, warn};

use crate::ddouble::DoubleDouble;
use crate::summation::KahanSum;

/// Nodes of the lower-order rule.
pub const LOW_ORDER_POINTS: usize = 15;

/// Nodes of the higher-order rule; one rule application costs this many
/// integrand evaluations.
pub const HIGH_ORDER_POINTS: usize = 31;

/// Default absolute tolerance.
pub const DEFAULT_EPS: f64 = 1e-28;

/// Default cap on integrand evaluations.
pub const DEFAULT_DISCONTINUE_EVAL_POINTS: usize = 65536;

/// Errors below this multiple of `EPSILON · Σ w|f|` are round-off and are
/// not reduced by bisection.
const ROUNDOFF_FACTOR: f64 = 64.0;

/// Precondition violations. Non-convergence is never reported here; it shows
/// up as a larger [`QuadratureResult::error`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    #[error("integration bound is NaN")]
    NanBound,
    #[error("reversed interval: min={min} > max={max}")]
    ReversedInterval {
        min: DoubleDouble,
        max: DoubleDouble,
    },
    #[error("tolerance must be positive, got {0}")]
    InvalidTolerance(DoubleDouble),
    #[error("evaluation cap {cap} cannot afford {required} integrand evaluations")]
    EvalCapTooSmall { cap: usize, required: usize },
    #[error("piecewise integration needs at least two points, got {0}")]
    TooFewPoints(usize),
}

// ============================================================================
// Interval
// ============================================================================

/// Closed interval `[min, max]`; either bound may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    min: DoubleDouble,
    max: DoubleDouble,
}

impl Interval {
    /// # Errors
    /// Returns `Err` if either bound is NaN or `min > max`.
    pub fn new(min: DoubleDouble, max: DoubleDouble) -> Result<Self, QuadratureError> {
        if min.is_nan() || max.is_nan() {
            return Err(QuadratureError::NanBound);
        }
        if min > max {
            return Err(QuadratureError::ReversedInterval { min, max });
        }
        Ok(Self { min, max })
    }

    /// The whole real line.
    pub fn real_line() -> Self {
        Self {
            min: DoubleDouble::NEG_INFINITY,
            max: DoubleDouble::INFINITY,
        }
    }

    pub fn min(&self) -> DoubleDouble {
        self.min
    }

    pub fn max(&self) -> DoubleDouble {
        self.max
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn is_bounded(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Whether `x` lies strictly between the bounds.
    pub fn contains_interior(&self, x: DoubleDouble) -> bool {
        x > self.min && x < self.max
    }
}

// ============================================================================
// Result
// ============================================================================

/// Outcome of one integration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuadratureResult {
    /// Accumulated estimate of the integral.
    pub value: DoubleDouble,
    /// Absolute error estimate, same units as `value`. Never negative.
    pub error: DoubleDouble,
    /// Integrand calls actually made.
    pub eval_points: usize,
}

impl QuadratureResult {
    /// Whether the reported error is within `eps`.
    pub fn meets(&self, eps: DoubleDouble) -> bool {
        self.error <= eps
    }
}

// ============================================================================
// Embedded rule
// ============================================================================

/// The 15/31-point embedded Fejér rule pair on `[−1, 1]`.
#[derive(Debug)]
pub struct EmbeddedRule {
    /// `cos(kπ/32)` for `k = 1..=31`, descending.
    nodes: [DoubleDouble; HIGH_ORDER_POINTS],
    high_weights: [DoubleDouble; HIGH_ORDER_POINTS],
    /// Weights of the 15-point rule at `nodes[1], nodes[3], …, nodes[29]`.
    low_weights: [DoubleDouble; LOW_ORDER_POINTS],
}

/// One rule application on a reference segment.
#[derive(Debug, Clone, Copy)]
struct Estimate {
    value: DoubleDouble,
    error: DoubleDouble,
    resabs: DoubleDouble,
}

impl EmbeddedRule {
    /// Process-wide rule, computed on first use.
    pub fn get() -> &'static Self {
        static RULE: OnceLock<EmbeddedRule> = OnceLock::new();
        RULE.get_or_init(Self::fejer)
    }

    pub fn nodes(&self) -> &[DoubleDouble] {
        &self.nodes
    }

    pub fn high_weights(&self) -> &[DoubleDouble] {
        &self.high_weights
    }

    pub fn low_weights(&self) -> &[DoubleDouble] {
        &self.low_weights
    }

    /// Builds the pair from the closed form
    /// `w_k = (4 sin θ_k / N) Σ_{j=1}^{N/2} sin((2j−1)θ_k) / (2j−1)`,
    /// `θ_k = kπ/N`, with N = 32 and N = 16.
    fn fejer() -> Self {
        const N: usize = HIGH_ORDER_POINTS + 1;
        const HALF: usize = N / 2;

        // sin(iπ/N) over one full period; every angle below is a multiple.
        let sines: Vec<DoubleDouble> = (0..2 * N)
            .map(|i| (DoubleDouble::PI * i as f64 / N as f64).sin())
            .collect();
        let sin_at = |i: usize| sines[i % (2 * N)];

        // Weight of node k for the rule with `n` panels, in units of π/N.
        let weight = |k: usize, n: usize| -> DoubleDouble {
            let stride = N / n;
            let mut sum = KahanSum::new();
            for j in 1..=n / 2 {
                let odd = (2 * j - 1) as f64;
                sum.add(sin_at((2 * j - 1) * k * stride) / odd);
            }
            sum.scale(sin_at(k * stride) * 4.0 / n as f64).value()
        };

        let mut nodes = [DoubleDouble::ZERO; HIGH_ORDER_POINTS];
        let mut high_weights = [DoubleDouble::ZERO; HIGH_ORDER_POINTS];
        for k in 1..HALF {
            // cos(kπ/N) = sin((N/2 − k)π/N)
            let x = sin_at(HALF - k);
            let w = weight(k, N);
            nodes[k - 1] = x;
            nodes[N - k - 1] = -x;
            high_weights[k - 1] = w;
            high_weights[N - k - 1] = w;
        }
        high_weights[HALF - 1] = weight(HALF, N);

        let mut low_weights = [DoubleDouble::ZERO; LOW_ORDER_POINTS];
        let low_n = N / 2;
        for m in 1..low_n / 2 {
            let w = weight(m, low_n);
            low_weights[m - 1] = w;
            low_weights[LOW_ORDER_POINTS - m] = w;
        }
        low_weights[low_n / 2 - 1] = weight(low_n / 2, low_n);

        Self {
            nodes,
            high_weights,
            low_weights,
        }
    }

    /// Applies the pair to the reference segment `[a, b]`.
    fn evaluate<F>(
        &self,
        f: &F,
        transform: Transform,
        a: DoubleDouble,
        b: DoubleDouble,
        evals: &mut usize,
    ) -> Estimate
    where
        F: Fn(DoubleDouble) -> DoubleDouble,
    {
        let center = (a + b).mul_pow2(0.5);
        let half = (b - a).mul_pow2(0.5);

        let mut samples = [DoubleDouble::ZERO; HIGH_ORDER_POINTS];
        for (sample, &node) in samples.iter_mut().zip(&self.nodes) {
            let (x, jacobian) = transform.apply(center + half * node);
            if !x.is_finite() {
                continue;
            }
            *evals += 1;
            let y = f(x) * jacobian;
            if y.is_finite() {
                *sample = y;
            }
        }

        let high: KahanSum = self
            .high_weights
            .iter()
            .zip(&samples)
            .map(|(&w, &y)| w * y)
            .collect();
        let low: KahanSum = self
            .low_weights
            .iter()
            .zip(samples.iter().skip(1).step_by(2))
            .map(|(&w, &y)| w * y)
            .collect();
        let resabs: KahanSum = self
            .high_weights
            .iter()
            .zip(&samples)
            .map(|(&w, &y)| w * y.abs())
            .collect();

        let value = high.scale(half).value();
        let low = low.scale(half).value();
        if !value.is_finite() || !low.is_finite() {
            debug!(%a, %b, "segment estimate overflowed; counted as zero");
            return Estimate {
                value: DoubleDouble::ZERO,
                error: DoubleDouble::ZERO,
                resabs: DoubleDouble::ZERO,
            };
        }
        Estimate {
            value,
            error: (value - low).abs(),
            resabs: resabs.scale(half.abs()).value(),
        }
    }
}

// ============================================================================
// Variable transforms
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Transform {
    Identity,
    /// `[a, +∞)`: `x = a + t/(1−t)`, `t ∈ [0, 1)`.
    UpperTail(DoubleDouble),
    /// `(−∞, b]`: `x = b − t/(1−t)`, `t ∈ [0, 1)`.
    LowerTail(DoubleDouble),
    /// `(−∞, +∞)`: `x = t/(1−t²)`, `t ∈ (−1, 1)`.
    RealLine,
}

impl Transform {
    fn for_interval(interval: Interval) -> Self {
        match (interval.min.is_finite(), interval.max.is_finite()) {
            (true, true) => Self::Identity,
            (true, false) => Self::UpperTail(interval.min),
            (false, true) => Self::LowerTail(interval.max),
            (false, false) => Self::RealLine,
        }
    }

    fn reference_bounds(self, interval: Interval) -> (DoubleDouble, DoubleDouble) {
        match self {
            Self::Identity => (interval.min, interval.max),
            Self::UpperTail(_) | Self::LowerTail(_) => (DoubleDouble::ZERO, DoubleDouble::ONE),
            Self::RealLine => (-DoubleDouble::ONE, DoubleDouble::ONE),
        }
    }

    /// Maps a reference point to `(x, dx/dt)`.
    fn apply(self, t: DoubleDouble) -> (DoubleDouble, DoubleDouble) {
        match self {
            Self::Identity => (t, DoubleDouble::ONE),
            Self::UpperTail(a) => {
                let s = DoubleDouble::ONE - t;
                (a + t / s, s.sqr().recip())
            }
            Self::LowerTail(b) => {
                let s = DoubleDouble::ONE - t;
                (b - t / s, s.sqr().recip())
            }
            Self::RealLine => {
                let s = (DoubleDouble::ONE - t) * (DoubleDouble::ONE + t);
                (t / s, (DoubleDouble::ONE + t.sqr()) / s.sqr())
            }
        }
    }
}

// ============================================================================
// Bisection tree
// ============================================================================

/// A node of the bisection tree over the reference interval. Inner nodes
/// keep their own estimate so that a split which did not lower the error
/// can be reported as if it had not been made.
#[derive(Debug, Clone, Copy)]
struct Segment {
    a: DoubleDouble,
    b: DoubleDouble,
    estimate: Estimate,
    parent: Option<usize>,
    children: Option<[usize; 2]>,
    /// Smallest error found for this region: its own, or its children's.
    best_error: DoubleDouble,
}

impl Segment {
    fn new(a: DoubleDouble, b: DoubleDouble, estimate: Estimate, parent: Option<usize>) -> Self {
        Self {
            a,
            b,
            estimate,
            parent,
            children: None,
            best_error: estimate.error,
        }
    }

    /// The error is at the round-off level of the samples.
    fn at_roundoff(&self) -> bool {
        let e = self.estimate;
        e.error <= DoubleDouble::EPSILON * ROUNDOFF_FACTOR * e.resabs
    }

    fn midpoint(&self) -> Option<DoubleDouble> {
        let mid = (self.a + self.b).mul_pow2(0.5);
        (mid > self.a && mid < self.b).then_some(mid)
    }
}

/// A leaf that may still be bisected, keyed by its own error.
#[derive(Debug, Clone, Copy)]
struct Pending {
    error: DoubleDouble,
    index: usize,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    /// Largest error first; among equal errors, the older segment.
    fn cmp(&self, other: &Self) -> Ordering {
        self.error
            .partial_cmp(&other.error)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// All segments evaluated so far plus the leaves still worth bisecting.
///
/// The reported error of a region never grows: once both halves exist, the
/// region reports whichever of its own error and its halves' summed best
/// error is smaller.
#[derive(Debug)]
struct Partition {
    segments: Vec<Segment>,
    pending: BinaryHeap<Pending>,
}

impl Partition {
    fn new(root: Segment) -> Self {
        let mut partition = Self {
            segments: Vec::new(),
            pending: BinaryHeap::new(),
        };
        partition.insert(root);
        partition
    }

    fn insert(&mut self, segment: Segment) -> usize {
        let index = self.segments.len();
        if !segment.at_roundoff() && segment.midpoint().is_some() {
            self.pending.push(Pending {
                error: segment.estimate.error,
                index,
            });
        }
        self.segments.push(segment);
        index
    }

    /// Reported error of the whole interval.
    fn error(&self) -> DoubleDouble {
        self.segments[0].best_error
    }

    fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Removes the leaf with the largest error.
    fn pop(&mut self) -> Option<(usize, Segment)> {
        self.pending.pop().map(|p| (p.index, self.segments[p.index]))
    }

    /// Children of `index`, if reporting them beats the segment's own error.
    fn improving_children(&self, index: usize) -> Option<[usize; 2]> {
        let segment = &self.segments[index];
        let [left, right] = segment.children?;
        let split = self.segments[left].best_error + self.segments[right].best_error;
        (split < segment.estimate.error).then_some([left, right])
    }

    /// Attaches the two halves of `index` and refreshes `best_error` up to
    /// the root.
    fn split(&mut self, index: usize, left: Segment, right: Segment) {
        let left = self.insert(left);
        let right = self.insert(right);
        self.segments[index].children = Some([left, right]);

        let mut node = Some(index);
        while let Some(i) = node {
            self.segments[i].best_error = match self.improving_children(i) {
                Some([l, r]) => self.segments[l].best_error + self.segments[r].best_error,
                None => self.segments[i].estimate.error,
            };
            node = self.segments[i].parent;
        }
    }

    /// Sums value and error over the reported regions, left to right.
    fn totals(&self) -> (DoubleDouble, DoubleDouble) {
        let mut value = KahanSum::new();
        let mut error = KahanSum::new();
        let mut stack = vec![0];
        while let Some(i) = stack.pop() {
            match self.improving_children(i) {
                Some([l, r]) => {
                    stack.push(r);
                    stack.push(l);
                }
                None => {
                    value.add(self.segments[i].estimate.value);
                    error.add(self.segments[i].estimate.error);
                }
            }
        }
        (value.value(), error.value())
    }
}

// ============================================================================
// Options and driver
// ============================================================================

/// Tolerance and evaluation budget for one integration.
///
/// # Examples
/// ```
/// use u_ddstat::ddouble::DoubleDouble;
/// use u_ddstat::quadrature::QuadratureOptions;
///
/// let options = QuadratureOptions::default().with_discontinue_eval_points(4096);
/// let r = options
///     .integrate(|x: DoubleDouble| x * x, DoubleDouble::ZERO, DoubleDouble::ONE)
///     .unwrap();
/// assert!((r.value - DoubleDouble::ONE / 3.0).abs() < 1e-30);
/// assert_eq!(r.eval_points, 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureOptions {
    /// Target absolute error for the whole integral.
    pub eps: DoubleDouble,
    /// Hard cap on integrand evaluations.
    pub discontinue_eval_points: usize,
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self {
            eps: DoubleDouble::from(DEFAULT_EPS),
            discontinue_eval_points: DEFAULT_DISCONTINUE_EVAL_POINTS,
        }
    }
}

impl QuadratureOptions {
    /// # Errors
    /// Returns `Err` if `eps` is not positive or the cap cannot afford one
    /// rule application.
    pub fn new(eps: DoubleDouble, discontinue_eval_points: usize) -> Result<Self, QuadratureError> {
        let options = Self {
            eps,
            discontinue_eval_points,
        };
        options.validate()?;
        Ok(options)
    }

    #[must_use]
    pub fn with_eps(mut self, eps: DoubleDouble) -> Self {
        self.eps = eps;
        self
    }

    #[must_use]
    pub fn with_discontinue_eval_points(mut self, cap: usize) -> Self {
        self.discontinue_eval_points = cap;
        self
    }

    /// Checks the preconditions shared by every integration.
    pub fn validate(&self) -> Result<(), QuadratureError> {
        if !(self.eps > DoubleDouble::ZERO) {
            return Err(QuadratureError::InvalidTolerance(self.eps));
        }
        if self.discontinue_eval_points < HIGH_ORDER_POINTS {
            return Err(QuadratureError::EvalCapTooSmall {
                cap: self.discontinue_eval_points,
                required: HIGH_ORDER_POINTS,
            });
        }
        Ok(())
    }

    /// Integrates `f` over `[a, b]`.
    ///
    /// `a == b` returns `(0, 0, 0)` without calling `f`.
    ///
    /// # Errors
    /// Precondition violations only; see [`QuadratureError`].
    pub fn integrate<F>(
        &self,
        f: F,
        a: DoubleDouble,
        b: DoubleDouble,
    ) -> Result<QuadratureResult, QuadratureError>
    where
        F: Fn(DoubleDouble) -> DoubleDouble,
    {
        self.validate()?;
        let interval = Interval::new(a, b)?;
        Ok(self.integrate_interval(&f, interval))
    }

    /// Integrates `f` over `[p₀, p₁] ∪ [p₁, p₂] ∪ …`, one adaptive run per
    /// piece. Use this for integrands with known kinks or jumps.
    ///
    /// `eps` is split evenly over the non-degenerate pieces. Each piece may
    /// spend an even share of the evaluation cap plus whatever the pieces
    /// before it left unused.
    ///
    /// # Errors
    /// Fewer than two points, NaN or decreasing points, or a cap too small
    /// to give every piece one rule application.
    pub fn integrate_pieces<F>(
        &self,
        f: F,
        points: &[DoubleDouble],
    ) -> Result<QuadratureResult, QuadratureError>
    where
        F: Fn(DoubleDouble) -> DoubleDouble,
    {
        if points.len() < 2 {
            return Err(QuadratureError::TooFewPoints(points.len()));
        }
        self.validate()?;
        let pieces = points
            .windows(2)
            .map(|w| Interval::new(w[0], w[1]))
            .filter(|piece| !matches!(piece, Ok(p) if p.is_degenerate()))
            .collect::<Result<Vec<_>, _>>()?;
        if pieces.is_empty() {
            return Ok(QuadratureResult::default());
        }

        let count = pieces.len();
        if self.discontinue_eval_points / count < HIGH_ORDER_POINTS {
            return Err(QuadratureError::EvalCapTooSmall {
                cap: self.discontinue_eval_points,
                required: HIGH_ORDER_POINTS * count,
            });
        }
        let eps = self.eps / count as f64;

        let mut value = KahanSum::new();
        let mut error = KahanSum::new();
        let mut eval_points = 0;
        for (i, piece) in pieces.into_iter().enumerate() {
            let remaining = self.discontinue_eval_points - eval_points;
            let per_piece = Self {
                eps,
                discontinue_eval_points: remaining / (count - i),
            };
            let r = per_piece.integrate_interval(&f, piece);
            value.add(r.value);
            error.add(r.error);
            eval_points += r.eval_points;
        }
        Ok(QuadratureResult {
            value: value.value(),
            error: error.value(),
            eval_points,
        })
    }

    fn integrate_interval<F>(&self, f: &F, interval: Interval) -> QuadratureResult
    where
        F: Fn(DoubleDouble) -> DoubleDouble,
    {
        if interval.is_degenerate() {
            return QuadratureResult::default();
        }

        let rule = EmbeddedRule::get();
        let transform = Transform::for_interval(interval);
        let (ta, tb) = transform.reference_bounds(interval);

        let mut evals = 0;
        let root = rule.evaluate(f, transform, ta, tb, &mut evals);
        let mut partition = Partition::new(Segment::new(ta, tb, root, None));
        let mut discontinued = false;

        while partition.error() > self.eps && partition.has_pending() {
            if evals + 2 * HIGH_ORDER_POINTS > self.discontinue_eval_points {
                discontinued = true;
                break;
            }
            let Some((parent, segment)) = partition.pop() else {
                break;
            };
            let Some(mid) = segment.midpoint() else {
                continue;
            };
            let left = rule.evaluate(f, transform, segment.a, mid, &mut evals);
            let right = rule.evaluate(f, transform, mid, segment.b, &mut evals);
            partition.split(
                parent,
                Segment::new(segment.a, mid, left, Some(parent)),
                Segment::new(mid, segment.b, right, Some(parent)),
            );
        }

        let (value, error) = partition.totals();
        let result = QuadratureResult {
            value,
            error,
            eval_points: evals,
        };
        if discontinued {
            warn!(
                cap = self.discontinue_eval_points,
                error = %result.error,
                eps = %self.eps,
                "evaluation cap reached before the tolerance was met"
            );
        }
        debug!(
            min = %interval.min,
            max = %interval.max,
            value = %result.value,
            error = %result.error,
            eval_points = result.eval_points,
            "adaptive integration finished"
        );
        result
    }
}

/// Integrates `f` over `[a, b]` to absolute tolerance `eps`, spending at most
/// `discontinue_eval_points` integrand evaluations.
///
/// Either bound may be infinite. Samples where `f` returns NaN or ±∞
/// contribute zero.
///
/// # Errors
/// NaN bounds, `a > b`, `eps ≤ 0` (or NaN), or a cap below
/// [`HIGH_ORDER_POINTS`].
pub fn adaptive_integrate<F>(
    f: F,
    a: DoubleDouble,
    b: DoubleDouble,
    eps: DoubleDouble,
    discontinue_eval_points: usize,
) -> Result<QuadratureResult, QuadratureError>
where
    F: Fn(DoubleDouble) -> DoubleDouble,
{
    QuadratureOptions::new(eps, discontinue_eval_points)?.integrate(f, a, b)
}

/// Piecewise variant of [`adaptive_integrate`] over consecutive `points`.
///
/// # Errors
/// See [`QuadratureOptions::integrate_pieces`].
pub fn integrate_pieces<F>(
    f: F,
    points: &[DoubleDouble],
    eps: DoubleDouble,
    discontinue_eval_points: usize,
) -> Result<QuadratureResult, QuadratureError>
where
    F: Fn(DoubleDouble) -> DoubleDouble,
{
    QuadratureOptions::new(eps, discontinue_eval_points)?.integrate_pieces(f, points)
}

// ============================================================================
// Tests
// ============================================================================
