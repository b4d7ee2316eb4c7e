//! # Quiver Math
//!
//! Mathematical utilities for the Quiver portfolio analytics library.
//!
//! This crate provides:
//!
//! - **Statistics**: mean, sample standard deviation, downside deviation,
//!   higher moments, z-scores, confidence lookups
//! - **Linear Algebra**: covariance/correlation matrices, quadratic forms
//! - **Sampling**: seedable generators, Box–Muller normals, random weights
//! - **Rounding**: decimal-exact presentation rounding
//!
//! ## Design Philosophy
//!
//! - **Total functions**: degenerate samples give 0, never NaN
//! - **Explicit randomness**: generators are passed in, never global
//! - **Reproducible**: a seed fixes every sampled result

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod linear_algebra;
pub mod rounding;
pub mod sampling;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{
        correlation_from_returns, correlation_matrix, covariance_matrix, dot, quadratic_form,
    };
    pub use crate::rounding::{round2, round2_opt, round_dp};
    pub use crate::sampling::{
        derive_seed, normal_samples, random_weights, resolve_seed, rng_from_seed, BoxMuller,
    };
    pub use crate::statistics::{
        downside_deviation, mean, std_dev, tail_index, variance, z_score_for_confidence,
    };
}

pub use error::{MathError, MathResult};
pub use nalgebra::DMatrix;
