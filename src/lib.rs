//! # u-ddstat
//!
//! Extended-precision numerical verification for continuous distributions.
//!
//! This crate computes integrals and distribution moments in double-double
//! arithmetic (about 32 significant digits), so that closed-form formulas
//! computed in `f64` elsewhere can be checked against an independent,
//! more accurate reference. It knows nothing about where those formulas come
//! from or what they are used for.
//!
//! ## Modules
//!
//! - [`ddouble`] — The `DoubleDouble` scalar: arithmetic, elementary
//!   functions, parsing and formatting
//! - [`summation`] — Kahan compensated accumulation
//! - [`quadrature`] — Adaptive embedded-rule quadrature over finite and
//!   infinite intervals, with an evaluation cap
//! - [`moments`] — Mean, variance, skewness, excess kurtosis, entropy and CDF
//!   as numerical integrals of a density
//! - [`distributions`] — The `ContinuousDistribution` contract and reference
//!   distributions with closed-form moments
//! - [`special`] — ln Γ, Γ, ψ and the standard normal density
//!
//! ## Design Philosophy
//!
//! - **Accuracy first**: every weighted sum goes through compensated
//!   summation; every sample is a double-double
//! - **Errors are preconditions**: invalid bounds or options are
//!   `Err`; non-convergence shows up as a larger error estimate
//! - **Property-based testing**: Mathematical invariants verified via proptest

pub mod ddouble;
pub mod distributions;
pub mod moments;
pub mod quadrature;
pub mod special;
pub mod summation;
