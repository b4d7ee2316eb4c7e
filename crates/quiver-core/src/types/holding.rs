//! Priced holdings used by the risk and stress layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asset type of a holding, used to look up scenario shocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    /// Listed or private equity.
    Equity,
    /// Fixed income.
    Bond,
    /// Options, futures, swaps.
    Derivative,
    /// Structured products.
    Structured,
    /// Cash and money-market instruments.
    Cash,
    /// Commodities.
    Commodity,
    /// Real estate.
    RealEstate,
    /// Hedge funds, private credit, crypto and similar.
    Alternative,
    /// Anything unclassified.
    Other,
}

impl AssetType {
    /// All asset types, in declaration order.
    pub const ALL: [AssetType; 9] = [
        AssetType::Equity,
        AssetType::Bond,
        AssetType::Derivative,
        AssetType::Structured,
        AssetType::Cash,
        AssetType::Commodity,
        AssetType::RealEstate,
        AssetType::Alternative,
        AssetType::Other,
    ];

    /// Parses a free-form asset class label.
    ///
    /// Matching is case-insensitive and accepts common synonyms
    /// (`"stock"`, `"fixed income"`, `"reit"`...). Unknown labels map to
    /// [`AssetType::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "EQUITY" | "EQUITIES" | "STOCK" | "STOCKS" | "ETF" => Self::Equity,
            "BOND" | "BONDS" | "FIXEDINCOME" | "CREDIT" => Self::Bond,
            "DERIVATIVE" | "DERIVATIVES" | "OPTION" | "OPTIONS" | "FUTURE" | "FUTURES" => {
                Self::Derivative
            }
            "STRUCTURED" | "STRUCTUREDPRODUCT" | "STRUCTUREDPRODUCTS" => Self::Structured,
            "CASH" | "MONEYMARKET" => Self::Cash,
            "COMMODITY" | "COMMODITIES" => Self::Commodity,
            "REALESTATE" | "REIT" | "REITS" | "PROPERTY" => Self::RealEstate,
            "ALTERNATIVE" | "ALTERNATIVES" | "CRYPTO" | "HEDGEFUND" => Self::Alternative,
            _ => Self::Other,
        }
    }

    /// Canonical upper-case label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "EQUITY",
            Self::Bond => "BOND",
            Self::Derivative => "DERIVATIVE",
            Self::Structured => "STRUCTURED",
            Self::Cash => "CASH",
            Self::Commodity => "COMMODITY",
            Self::RealEstate => "REAL_ESTATE",
            Self::Alternative => "ALTERNATIVE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

/// A priced asset in the risk/stress domain.
///
/// Conceptually the same entity as a valued `Position`; the valuation layer
/// maps one to the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Display name.
    pub name: String,

    /// Asset type driving scenario shocks.
    #[serde(rename = "type")]
    pub asset_type: AssetType,

    /// Current value in base currency.
    pub value: f64,

    /// Ticker or other identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Holding {
    /// Creates a holding.
    #[must_use]
    pub fn new(name: impl Into<String>, asset_type: AssetType, value: f64) -> Self {
        Self {
            name: name.into(),
            asset_type,
            value,
            symbol: None,
        }
    }

    /// Sets the symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}
