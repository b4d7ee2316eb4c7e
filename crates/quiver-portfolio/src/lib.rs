//! # Quiver Portfolio
//!
//! Portfolio optimization and stress testing for the Quiver portfolio
//! analytics library.
//!
//! ## Design Philosophy
//!
//! - **Service objects hold configuration only**: [`PortfolioOptimizer`]
//!   and [`StressTester`] are cheap to build and pure to call
//! - **Metrics follow weights**: every candidate's return, volatility and
//!   Sharpe ratio are computed from its weights against the universe
//! - **Seeded sampling**: one RNG stream per batch, so a seeded run gives
//!   the same answer sequentially or on the rayon pool
//! - **Cooperative run control**: a [`CancellationToken`] and an optional
//!   timeout are checked between batches
//!
//! ## Quick Start
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use quiver_config::OptimizerConfig;
//! use quiver_core::AssetType;
//! use quiver_portfolio::prelude::*;
//!
//! let universe = AssetUniverse::new(
//!     vec!["SPY".into(), "AGG".into()],
//!     vec![0.08, 0.03],
//!     DMatrix::from_row_slice(2, 2, &[0.04, 0.002, 0.002, 0.0025]),
//! )
//! .unwrap();
//!
//! let optimizer = PortfolioOptimizer::new(
//!     OptimizerConfig::sequential().with_seed(1).with_samples(2_000),
//! )
//! .unwrap();
//! let tangency = optimizer.tangency_portfolio(&universe).unwrap();
//!
//! let holdings = holdings_from_weights(
//!     &tangency,
//!     &universe,
//!     &[AssetType::Equity, AssetType::Bond],
//!     100_000.0,
//! )
//! .unwrap();
//! let report = StressTester::default()
//!     .run(&holdings, "2008_financial_crisis")
//!     .unwrap();
//! assert!(report.result.is_loss());
//! ```
//!
//! ## Module Overview
//!
//! - [`optimization`] - Asset universe, frontier, tangency, minimum
//!   variance, constrained search, capital allocation line
//! - [`stress`] - Scenarios, standard catalog, recovery, recommendations,
//!   sensitivity and correlation shocks
//!
//! ## Feature Flags
//!
//! - `parallel`: Spread sampling batches across the rayon pool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_arguments)]

mod cancel;
pub mod error;
mod parallel;

pub mod optimization;
pub mod stress;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

pub use cancel::CancellationToken;
pub use parallel::maybe_parallel_try_map;

pub use optimization::{
    capital_allocation_line, AssetUniverse, CalPoint, CandidateKind, Objective,
    PortfolioCandidate, PortfolioOptimizer, WeightConstraints,
};

pub use stress::{
    apply_scenario, correlation_shock, estimate_recovery, holdings_from_weights,
    recommendations, sensitivity_analysis, standard, stress_test, summarize_results,
    CorrelationShockResult, HoldingImpact, Recommendation, RecommendationKind,
    RecoveryEstimate, SensitivityPoint, Severity, StressReport, StressResult, StressScenario,
    StressSummary, StressTester,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cancel::CancellationToken;
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::optimization::{
        AssetUniverse, CandidateKind, Objective, PortfolioCandidate, PortfolioOptimizer,
        WeightConstraints,
    };
    pub use crate::stress::{
        holdings_from_weights, standard, Severity, StressReport, StressScenario, StressTester,
    };
}
