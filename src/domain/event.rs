//! Event and market domain types.

/// A prediction-market event with its nested markets.
///
/// Events are immutable during a scan; classification and dedup operate on
/// the event title and tag slugs, tagging operates on the nested markets.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event title, as served upstream.
    pub title: String,
    /// Event slug (used for the public URL and the record `slug` field).
    pub slug: String,
    /// Tag slugs attached to the event.
    pub tags: Vec<String>,
    pub markets: Vec<Market>,
}

/// A single market inside an event.
///
/// `outcomes` and `prices` are parallel arrays; adapters reject markets
/// where the two disagree, so domain code may zip them freely.
#[derive(Debug, Clone)]
pub struct Market {
    pub slug: String,
    /// Display question: the group item title when present, else the
    /// market question.
    pub question: String,
    pub outcomes: Vec<String>,
    /// Outcome probabilities in `[0, 1]`, parallel to `outcomes`.
    pub prices: Vec<f64>,
    /// All-time volume in USD.
    pub volume: f64,
    /// 24-hour volume in USD (the ranking key).
    pub volume_24h: f64,
    /// Liquidity depth in USD.
    pub liquidity: f64,
    /// Quoted spread, absent when the market has no recent book.
    pub spread: Option<f64>,
    /// Price change over the last day, absent when not served.
    pub one_day_change: Option<f64>,
    /// Resolution timestamp (ISO 8601), absent for perpetual markets.
    pub end_date: Option<String>,
    pub updated_at: Option<String>,
    /// Group ordering threshold, used verbatim in the output record.
    pub sort_order: f64,
    pub active: bool,
    pub closed: bool,
}

impl Market {
    /// Whether this market should be considered for tagging at all.
    ///
    /// Closed or inactive markets carry stale prices, and thin markets below
    /// the 24h-volume floor are not worth a slot in the output.
    #[must_use]
    pub fn tradable(&self, min_volume_24h: f64) -> bool {
        self.active && !self.closed && self.volume_24h >= min_volume_24h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_market(active: bool, closed: bool, volume_24h: f64) -> Market {
        Market {
            slug: "test-market".into(),
            question: "Test?".into(),
            outcomes: vec!["Yes".into(), "No".into()],
            prices: vec![0.6, 0.4],
            volume: 100_000.0,
            volume_24h,
            liquidity: 10_000.0,
            spread: Some(0.02),
            one_day_change: None,
            end_date: None,
            updated_at: None,
            sort_order: 0.0,
            active,
            closed,
        }
    }

    #[test]
    fn tradable_when_active_open_and_above_floor() {
        assert!(make_market(true, false, 15_000.0).tradable(10_000.0));
    }

    #[test]
    fn not_tradable_when_inactive() {
        assert!(!make_market(false, false, 15_000.0).tradable(10_000.0));
    }

    #[test]
    fn not_tradable_when_closed() {
        assert!(!make_market(true, true, 15_000.0).tradable(10_000.0));
    }

    #[test]
    fn not_tradable_below_volume_floor() {
        assert!(!make_market(true, false, 9_999.9).tradable(10_000.0));
    }

    #[test]
    fn tradable_exactly_at_floor() {
        assert!(make_market(true, false, 10_000.0).tradable(10_000.0));
    }
}
