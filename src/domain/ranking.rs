//! Volume ranking and selection.

use super::signal::SignalRecord;

/// Order records by 24h volume, highest first, and keep at most `max`.
///
/// The sort is stable, so records with equal volume keep their scan order.
#[must_use]
pub fn select_top(mut records: Vec<SignalRecord>, max: usize) -> Vec<SignalRecord> {
    records.sort_by_key(|r| std::cmp::Reverse(r.vol24h));
    records.truncate(max);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(ticker: &str, vol24h: i64) -> SignalRecord {
        SignalRecord {
            slug: "event".into(),
            ticker: ticker.into(),
            question: "Q".into(),
            event_title: "T".into(),
            prices: String::new(),
            volume: 0,
            liquidity: 0,
            end_date: "N/A".into(),
            day_change: "0.00%".into(),
            vol24h,
            spread: "N/A".into(),
            sort_order: 0.0,
            updated_at: None,
            category: "CRYPTO".into(),
            url: String::new(),
            strategy_tags: vec!["RAW_MARKET".into()],
        }
    }

    #[test]
    fn sorts_by_volume_descending() {
        let records = vec![
            make_record("low", 12_000),
            make_record("high", 90_000),
            make_record("mid", 40_000),
        ];
        let top = select_top(records, 10);
        let order: Vec<&str> = top.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["high", "mid", "low"]);
    }

    #[test]
    fn volumes_are_non_increasing() {
        let records = vec![
            make_record("a", 10_000),
            make_record("b", 75_000),
            make_record("c", 75_000),
            make_record("d", 20_000),
            make_record("e", 11_000),
        ];
        let top = select_top(records, 10);
        for pair in top.windows(2) {
            assert!(pair[0].vol24h >= pair[1].vol24h);
        }
    }

    #[test]
    fn truncates_to_max() {
        let records = (0..50).map(|i| make_record(&format!("m{i}"), 10_000 + i)).collect();
        let top = select_top(records, 30);
        assert_eq!(top.len(), 30);
        assert_eq!(top[0].vol24h, 10_049);
    }

    #[test]
    fn keeps_everything_when_under_max() {
        let records = vec![make_record("a", 1), make_record("b", 2)];
        assert_eq!(select_top(records, 30).len(), 2);
    }

    #[test]
    fn ties_keep_scan_order() {
        let records = vec![
            make_record("first", 50_000),
            make_record("second", 50_000),
            make_record("third", 50_000),
        ];
        let top = select_top(records, 2);
        let order: Vec<&str> = top.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(select_top(Vec::new(), 30).is_empty());
    }
}
