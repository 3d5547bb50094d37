//! Strategy tagging engine.
//!
//! Each rule looks at one structural property of a market and pins a label
//! on it when the property holds. Rules are independent: all of them run for
//! every market and a market can collect several labels. A market that
//! matches nothing still gets [`FALLBACK_TAG`] so downstream consumers can
//! rely on a non-empty tag list.
//!
//! Thresholds live in configuration; the defaults below are starting points,
//! not constants of the system.

use serde::Deserialize;

use super::event::Market;

/// Label for markets no rule claimed.
pub const FALLBACK_TAG: &str = "RAW_MARKET";

/// A heuristic rule that may pin a strategy label on a market.
pub trait TagRule: Send + Sync {
    /// Unique identifier for this rule.
    ///
    /// Used in configuration and logging.
    fn name(&self) -> &'static str;

    /// Label emitted when the rule fires.
    fn tag(&self) -> &'static str;

    /// Whether the rule fires for this market under this category.
    fn matches(&self, market: &Market, category: &str) -> bool;
}

// ---------------------------------------------------------------------------
// Tail risk
// ---------------------------------------------------------------------------

/// Configuration for tail-risk detection.
#[derive(Debug, Clone, Deserialize)]
pub struct TailRiskConfig {
    /// Distance from 0 or 1 that counts as a tail price.
    #[serde(default = "default_price_band")]
    pub price_band: f64,

    /// Minimum liquidity for the tail to be actionable.
    #[serde(default = "default_tail_min_liquidity")]
    pub min_liquidity: f64,
}

const fn default_price_band() -> f64 {
    0.05
}

const fn default_tail_min_liquidity() -> f64 {
    5000.0
}

impl Default for TailRiskConfig {
    fn default() -> Self {
        Self {
            price_band: default_price_band(),
            min_liquidity: default_tail_min_liquidity(),
        }
    }
}

/// Fires when an outcome trades near certainty but the book is deep enough
/// that the residual doubt is still tradable.
pub struct TailRiskRule {
    config: TailRiskConfig,
}

impl TailRiskRule {
    #[must_use]
    pub const fn new(config: TailRiskConfig) -> Self {
        Self { config }
    }
}

impl TagRule for TailRiskRule {
    fn name(&self) -> &'static str {
        "tail_risk"
    }

    fn tag(&self) -> &'static str {
        "TAIL_RISK"
    }

    fn matches(&self, market: &Market, _category: &str) -> bool {
        let band = self.config.price_band;
        let has_tail = market
            .prices
            .iter()
            .any(|p| *p < band || *p > 1.0 - band);
        has_tail && market.liquidity > self.config.min_liquidity
    }
}

// ---------------------------------------------------------------------------
// Reflexivity / trend
// ---------------------------------------------------------------------------

/// Configuration for trend detection.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendConfig {
    /// Minimum 24h volume behind the move.
    #[serde(default = "default_trend_min_volume_24h")]
    pub min_volume_24h: f64,

    /// Minimum absolute one-day price change.
    #[serde(default = "default_min_change")]
    pub min_change: f64,
}

const fn default_trend_min_volume_24h() -> f64 {
    10_000.0
}

const fn default_min_change() -> f64 {
    0.05
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_volume_24h: default_trend_min_volume_24h(),
            min_change: default_min_change(),
        }
    }
}

/// Fires when a market moved hard on real volume in the last day.
pub struct TrendRule {
    config: TrendConfig,
}

impl TrendRule {
    #[must_use]
    pub const fn new(config: TrendConfig) -> Self {
        Self { config }
    }
}

impl TagRule for TrendRule {
    fn name(&self) -> &'static str {
        "trend"
    }

    fn tag(&self) -> &'static str {
        "REFLEXIVITY_TREND"
    }

    fn matches(&self, market: &Market, _category: &str) -> bool {
        let change = market.one_day_change.unwrap_or(0.0).abs();
        market.volume_24h > self.config.min_volume_24h && change > self.config.min_change
    }
}

// ---------------------------------------------------------------------------
// High certainty
// ---------------------------------------------------------------------------

/// Configuration for certainty detection.
#[derive(Debug, Clone, Deserialize)]
pub struct CertaintyConfig {
    /// Minimum all-time volume.
    #[serde(default = "default_certainty_min_volume")]
    pub min_volume: f64,

    /// Maximum quoted spread.
    #[serde(default = "default_max_spread")]
    pub max_spread: f64,
}

const fn default_certainty_min_volume() -> f64 {
    50_000.0
}

const fn default_max_spread() -> f64 {
    0.01
}

impl Default for CertaintyConfig {
    fn default() -> Self {
        Self {
            min_volume: default_certainty_min_volume(),
            max_spread: default_max_spread(),
        }
    }
}

/// Fires when a heavily traded market quotes a razor-thin spread.
///
/// A market with no quoted spread is treated as maximally wide, so the rule
/// never fires without real quote data.
pub struct CertaintyRule {
    config: CertaintyConfig,
}

impl CertaintyRule {
    #[must_use]
    pub const fn new(config: CertaintyConfig) -> Self {
        Self { config }
    }
}

impl TagRule for CertaintyRule {
    fn name(&self) -> &'static str {
        "certainty"
    }

    fn tag(&self) -> &'static str {
        "HIGH_CERTAINTY"
    }

    fn matches(&self, market: &Market, _category: &str) -> bool {
        let spread = market.spread.unwrap_or(1.0);
        market.volume > self.config.min_volume && spread < self.config.max_spread
    }
}

// ---------------------------------------------------------------------------
// Category leverage
// ---------------------------------------------------------------------------

/// Configuration for the category-leverage rule.
#[derive(Debug, Clone, Deserialize)]
pub struct LeverageConfig {
    /// Category the rule is keyed to.
    #[serde(default = "default_leverage_category")]
    pub category: String,

    /// Minimum all-time volume.
    #[serde(default = "default_leverage_min_volume")]
    pub min_volume: f64,
}

fn default_leverage_category() -> String {
    "tech".to_string()
}

const fn default_leverage_min_volume() -> f64 {
    20_000.0
}

impl Default for LeverageConfig {
    fn default() -> Self {
        Self {
            category: default_leverage_category(),
            min_volume: default_leverage_min_volume(),
        }
    }
}

/// Fires for any sufficiently traded market in the designated category.
pub struct LeverageRule {
    config: LeverageConfig,
}

impl LeverageRule {
    #[must_use]
    pub const fn new(config: LeverageConfig) -> Self {
        Self { config }
    }
}

impl TagRule for LeverageRule {
    fn name(&self) -> &'static str {
        "leverage"
    }

    fn tag(&self) -> &'static str {
        "TECH_LEVERAGE"
    }

    fn matches(&self, market: &Market, category: &str) -> bool {
        category == self.config.category && market.volume > self.config.min_volume
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Configuration for all tag rules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaggingConfig {
    #[serde(default)]
    pub tail_risk: TailRiskConfig,

    #[serde(default)]
    pub trend: TrendConfig,

    #[serde(default)]
    pub certainty: CertaintyConfig,

    #[serde(default)]
    pub leverage: LeverageConfig,
}

/// Registry of tag rules.
///
/// Rules run in registration order; emitted tags keep that order.
#[derive(Default)]
pub struct TagEngine {
    rules: Vec<Box<dyn TagRule>>,
}

impl TagEngine {
    /// Create a new empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard rule set from configuration.
    #[must_use]
    pub fn from_config(config: &TaggingConfig) -> Self {
        let mut engine = Self::new();
        engine.register(Box::new(TailRiskRule::new(config.tail_risk.clone())));
        engine.register(Box::new(TrendRule::new(config.trend.clone())));
        engine.register(Box::new(CertaintyRule::new(config.certainty.clone())));
        engine.register(Box::new(LeverageRule::new(config.leverage.clone())));
        engine
    }

    /// Register a rule.
    pub fn register(&mut self, rule: Box<dyn TagRule>) {
        self.rules.push(rule);
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the engine has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule and collect the labels that fired.
    ///
    /// Never returns an empty list: markets nothing claimed get
    /// [`FALLBACK_TAG`].
    #[must_use]
    pub fn evaluate(&self, market: &Market, category: &str) -> Vec<String> {
        let tags: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(market, category))
            .map(|rule| rule.tag().to_string())
            .collect();

        if tags.is_empty() {
            vec![FALLBACK_TAG.to_string()]
        } else {
            tags
        }
    }
}
