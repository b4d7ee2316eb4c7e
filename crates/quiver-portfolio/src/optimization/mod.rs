//! Sampling-based portfolio optimization.
//!
//! - [`AssetUniverse`]: expected returns and covariance, annualized
//! - [`PortfolioOptimizer`]: efficient frontier, tangency, minimum
//!   variance, equal weight and constrained searches
//! - [`capital_allocation_line`]: risk/return line through a portfolio
//!
//! Every search draws long-only weight vectors (independent uniforms
//! normalized to sum to 1) and scores them against the universe. It is a
//! random search, not a quadratic solver; the contract is that weights sum
//! to the target total and every reported metric is computed from them.

mod cal;
mod candidate;
mod constraints;
mod optimizer;
mod sampler;
mod universe;

pub use cal::{capital_allocation_line, CalPoint};
pub use candidate::{CandidateKind, PortfolioCandidate};
pub use constraints::{Objective, WeightConstraints};
pub use optimizer::PortfolioOptimizer;
pub use universe::AssetUniverse;
