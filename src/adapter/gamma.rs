//! Polymarket Gamma API client and response types.
//!
//! The Gamma API (`gamma-api.polymarket.com`) serves event listings with
//! nested markets and tags. Response format: flat JSON array (no wrapper
//! object). Numeric fields arrive either as JSON numbers or as numeric
//! strings depending on the field and the day, and `outcomes` /
//! `outcomePrices` are JSON arrays encoded *inside* JSON strings.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, info};

use super::build_http_client;
use crate::config::NetworkConfig;
use crate::domain::{Event, Market};
use crate::error::Result;
use crate::port::EventSource;

/// A numeric field that may arrive as a number or a string.
///
/// Anything unparseable counts as zero so one odd field never poisons the
/// comparisons downstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GammaNumber {
    Num(f64),
    Text(String),
}

impl GammaNumber {
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Num(n) => *n,
            Self::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

fn to_f64_or_zero(value: Option<&GammaNumber>) -> f64 {
    value.map_or(0.0, GammaNumber::as_f64)
}

#[derive(Debug, Clone, Deserialize)]
pub struct GammaTag {
    #[serde(default)]
    pub slug: Option<String>,
}

/// Event data from the Gamma API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaEvent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<GammaTag>>,
    #[serde(default)]
    pub markets: Option<Vec<GammaMarket>>,
}

impl GammaEvent {
    /// Convert into the domain event, dropping malformed markets.
    #[must_use]
    pub fn into_event(self) -> Event {
        let tags = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| t.slug)
            .collect();
        let markets = self
            .markets
            .unwrap_or_default()
            .into_iter()
            .filter_map(GammaMarket::into_market)
            .collect();

        Event {
            title: self.title.unwrap_or_default(),
            slug: self.slug.unwrap_or_default(),
            tags,
            markets,
        }
    }
}

/// Market data nested inside a Gamma event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    #[serde(default)]
    pub slug: Option<String>,
    /// Market question.
    #[serde(default)]
    pub question: Option<String>,
    /// Short per-market label inside a grouped event (preferred over
    /// `question` for display when non-empty).
    #[serde(default)]
    pub group_item_title: Option<String>,
    /// Whether the market is active.
    #[serde(default)]
    pub active: bool,
    /// Whether the market is closed.
    #[serde(default)]
    pub closed: bool,
    /// JSON-encoded outcome names (e.g., `["Yes", "No"]`).
    #[serde(default)]
    pub outcomes: Option<String>,
    /// JSON-encoded outcome prices (e.g., `["0.65", "0.35"]`).
    #[serde(default)]
    pub outcome_prices: Option<String>,
    /// Total all-time volume in USD.
    #[serde(default)]
    pub volume: Option<GammaNumber>,
    /// 24-hour trading volume in USD.
    #[serde(default)]
    pub volume_24hr: Option<GammaNumber>,
    /// Current liquidity depth in USD.
    #[serde(default)]
    pub liquidity: Option<GammaNumber>,
    #[serde(default)]
    pub spread: Option<GammaNumber>,
    #[serde(default)]
    pub one_day_price_change: Option<GammaNumber>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub group_item_threshold: Option<GammaNumber>,
}

impl GammaMarket {
    /// Parse the JSON-encoded outcome names.
    pub fn parse_outcomes(&self) -> Option<Vec<String>> {
        let raw = self.outcomes.as_deref()?;
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(outcomes) => Some(outcomes),
            Err(e) => {
                debug!(
                    error = %e,
                    raw = %raw,
                    market = self.slug.as_deref().unwrap_or(""),
                    "Failed to parse outcomes"
                );
                None
            }
        }
    }

    /// Parse the JSON-encoded outcome prices.
    pub fn parse_prices(&self) -> Option<Vec<f64>> {
        let raw = self.outcome_prices.as_deref()?;
        match serde_json::from_str::<Vec<GammaNumber>>(raw) {
            Ok(prices) => Some(prices.iter().map(GammaNumber::as_f64).collect()),
            Err(e) => {
                debug!(
                    error = %e,
                    raw = %raw,
                    market = self.slug.as_deref().unwrap_or(""),
                    "Failed to parse outcome prices"
                );
                None
            }
        }
    }

    /// Convert into the domain market.
    ///
    /// Returns `None` when the outcome or price arrays are absent,
    /// unparseable, or disagree in length; the caller skips such markets
    /// and keeps the rest of the event.
    #[must_use]
    pub fn into_market(self) -> Option<Market> {
        let outcomes = self.parse_outcomes()?;
        let prices = self.parse_prices()?;
        if outcomes.len() != prices.len() {
            debug!(
                market = self.slug.as_deref().unwrap_or(""),
                outcomes = outcomes.len(),
                prices = prices.len(),
                "Outcome and price arrays disagree, skipping market"
            );
            return None;
        }

        let question = match self.group_item_title {
            Some(title) if !title.is_empty() => title,
            _ => self.question.unwrap_or_default(),
        };

        Some(Market {
            slug: self.slug.unwrap_or_default(),
            question,
            outcomes,
            prices,
            volume: to_f64_or_zero(self.volume.as_ref()),
            volume_24h: to_f64_or_zero(self.volume_24hr.as_ref()),
            liquidity: to_f64_or_zero(self.liquidity.as_ref()),
            spread: self.spread.as_ref().map(GammaNumber::as_f64),
            one_day_change: self.one_day_price_change.as_ref().map(GammaNumber::as_f64),
            end_date: self.end_date,
            updated_at: self.updated_at,
            sort_order: to_f64_or_zero(self.group_item_threshold.as_ref()),
            active: self.active,
            closed: self.closed,
        })
    }
}

/// HTTP client for the Gamma events listing.
pub struct GammaClient {
    http: HttpClient,
    base_url: String,
}

impl GammaClient {
    #[must_use]
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self {
            http: build_http_client(config.timeout_ms, config.connect_timeout_ms),
            base_url: config.gamma_url.clone(),
        }
    }

    /// Fetch the top events ordered by 24h volume.
    pub async fn get_events(&self, limit: usize) -> Result<Vec<GammaEvent>> {
        let url = format!(
            "{}/events?limit={}&active=true&closed=false&order=volume24hr&ascending=false",
            self.base_url, limit
        );

        info!(url = %url, "Fetching events (Gamma)");

        let events: Vec<GammaEvent> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(count = events.len(), "Fetched events from Gamma");

        Ok(events)
    }
}

#[async_trait]
impl EventSource for GammaClient {
    async fn fetch_events(&self, limit: usize) -> Result<Vec<Event>> {
        let events = self.get_events(limit).await?;
        Ok(events.into_iter().map(GammaEvent::into_event).collect())
    }
}
