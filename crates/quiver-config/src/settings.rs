//! Top-level configuration grouping every section.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigResult, Validate, ValidationError};
use crate::optimizer::OptimizerConfig;
use crate::risk::RiskConfig;
use crate::stress::StressConfig;

/// Complete library configuration.
///
/// Each section is optional in JSON and falls back to its defaults:
///
/// ```rust
/// use quiver_config::QuiverConfig;
///
/// let config = QuiverConfig::from_json_str(r#"{"optimizer": {"seed": 42}}"#).unwrap();
/// assert_eq!(config.optimizer.seed, Some(42));
/// assert_eq!(config.risk.confidence_level, 0.95);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuiverConfig {
    /// Risk metrics settings.
    #[serde(default)]
    pub risk: RiskConfig,

    /// Optimizer settings.
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Stress testing thresholds.
    #[serde(default)]
    pub stress: StressConfig,
}

impl QuiverConfig {
    /// Creates a config with default settings for every section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serializes the config as pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replaces the risk section.
    #[must_use]
    pub fn with_risk(mut self, risk: RiskConfig) -> Self {
        self.risk = risk;
        self
    }

    /// Replaces the optimizer section.
    #[must_use]
    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Replaces the stress section.
    #[must_use]
    pub fn with_stress(mut self, stress: StressConfig) -> Self {
        self.stress = stress;
        self
    }

    /// Applies one seed to every seeded section.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.risk.seed = Some(seed);
        self.optimizer.seed = Some(seed);
        self
    }
}

impl Validate for QuiverConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let risk = self.risk.validate().into_iter().map(|e| e.in_section("risk"));
        let optimizer = self
            .optimizer
            .validate()
            .into_iter()
            .map(|e| e.in_section("optimizer"));
        let stress = self
            .stress
            .validate()
            .into_iter()
            .map(|e| e.in_section("stress"));
        risk.chain(optimizer).chain(stress).collect()
    }
}
