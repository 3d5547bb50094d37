//! Published signal records.
//!
//! [`SignalRecord`] is the exact row shape written to the artifact: display
//! strings are pre-formatted here so every consumer of the JSON sees the
//! same rendering. Keys are camelCase except `strategy_tags`, which existing
//! consumers already parse in snake case.

use serde::Serialize;

use super::event::{Event, Market};

const EVENT_URL_BASE: &str = "https://polymarket.com/event/";

/// One published market signal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRecord {
    /// Event slug.
    pub slug: String,
    /// Market slug.
    pub ticker: String,
    pub question: String,
    pub event_title: String,
    /// Rendered outcome prices, e.g. `"Yes: 65.0% | No: 35.0%"`.
    pub prices: String,
    /// All-time volume in USD, rounded.
    pub volume: i64,
    /// Liquidity in USD, rounded.
    pub liquidity: i64,
    /// Resolution date (date part only), `"N/A"` when unknown.
    pub end_date: String,
    /// One-day move as a percent string, `"0.00%"` when unknown.
    pub day_change: String,
    /// 24h volume in USD, rounded. The ranking key.
    pub vol24h: i64,
    /// Spread as a percent string, `"N/A"` when unquoted.
    pub spread: String,
    pub sort_order: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Category name, uppercased.
    pub category: String,
    pub url: String,
    #[serde(rename = "strategy_tags")]
    pub strategy_tags: Vec<String>,
}

impl SignalRecord {
    /// Assemble the published row for one tagged market.
    #[must_use]
    pub fn build(event: &Event, market: &Market, category: &str, tags: Vec<String>) -> Self {
        let prices = market
            .outcomes
            .iter()
            .zip(&market.prices)
            .map(|(outcome, price)| format!("{}: {:.1}%", outcome, price * 100.0))
            .collect::<Vec<_>>()
            .join(" | ");

        Self {
            slug: event.slug.clone(),
            ticker: market.slug.clone(),
            question: market.question.clone(),
            event_title: event.title.clone(),
            prices,
            volume: market.volume.round() as i64,
            liquidity: market.liquidity.round() as i64,
            end_date: format_end_date(market.end_date.as_deref()),
            day_change: format_percent(market.one_day_change, "0.00%"),
            vol24h: market.volume_24h.round() as i64,
            spread: format_percent(market.spread, "N/A"),
            sort_order: market.sort_order,
            updated_at: market.updated_at.clone(),
            category: category.to_uppercase(),
            url: format!("{EVENT_URL_BASE}{}", event.slug),
            strategy_tags: tags,
        }
    }
}

fn format_percent(value: Option<f64>, missing: &str) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => missing.to_string(),
    }
}

fn format_end_date(end_date: Option<&str>) -> String {
    match end_date {
        Some(ts) if !ts.is_empty() => ts.split('T').next().unwrap_or(ts).to_string(),
        _ => "N/A".to_string(),
    }
}
