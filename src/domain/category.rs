//! Topical classification with priority-ordered keyword tables.
//!
//! Each [`CategoryRule`] names an upstream tag slug and carries two keyword
//! lists: `noise` vetoes a title outright, `signals` must hit at least once
//! unless the category is `loose`. The [`Classifier`] assigns the first rule
//! (in table order) whose name appears among an event's tag slugs, so the
//! table order is the category priority.
//!
//! The tables are data: they deserialize straight from configuration and the
//! defaults below are only a starting point.

use serde::Deserialize;

fn contains_any(title: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| title.contains(k.as_str()))
}

/// One category: a tag slug plus its keyword gates.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRule {
    /// Tag slug this category binds to (and the record's category name).
    pub name: String,
    /// At least one must appear in the title, unless `loose`.
    #[serde(default)]
    pub signals: Vec<String>,
    /// Any hit drops the event.
    #[serde(default)]
    pub noise: Vec<String>,
    /// Loose categories skip the signal requirement; broad topics where
    /// the tag itself is meaningful enough.
    #[serde(default)]
    pub loose: bool,
}

impl CategoryRule {
    /// Apply the keyword gates to a normalized title.
    #[must_use]
    pub fn passes(&self, normalized_title: &str) -> bool {
        if contains_any(normalized_title, &self.noise) {
            return false;
        }
        self.loose || contains_any(normalized_title, &self.signals)
    }
}

/// Priority-ordered category table.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
}

impl Classifier {
    #[must_use]
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Pick the highest-priority category whose name matches a tag slug.
    ///
    /// Returns `None` when no category claims the event; such events are
    /// dropped silently.
    #[must_use]
    pub fn classify(&self, tag_slugs: &[String]) -> Option<&CategoryRule> {
        self.rules
            .iter()
            .find(|rule| tag_slugs.iter().any(|slug| slug == &rule.name))
    }
}

fn rule(name: &str, signals: &[&str], noise: &[&str], loose: bool) -> CategoryRule {
    CategoryRule {
        name: name.into(),
        signals: signals.iter().map(|s| (*s).to_string()).collect(),
        noise: noise.iter().map(|s| (*s).to_string()).collect(),
        loose,
    }
}

/// Default category table, highest priority first.
#[must_use]
pub fn default_categories() -> Vec<CategoryRule> {
    vec![
        rule(
            "politics",
            &["election", "nominate", "strike", "shutdown", "fed", "president", "war", "cabinet", "senate", "house"],
            &["tweet", "post", "mention", "says", "follower", "wear", "odds", "poll", "approval"],
            true,
        ),
        rule(
            "economy",
            &["fed", "powell", "rate", "inflation", "cpi", "gdp", "recession", "ecb", "treasury", "job", "unemployment"],
            &["brazil", "turkey", "ranking", "statement"],
            false,
        ),
        rule(
            "finance",
            &["gold", "silver", "s&p", "nasdaq", "oil", "commodity", "largest company", "revenue", "stock"],
            &["acquisition", "merger", "ipo", "earnings call", "dividend"],
            false,
        ),
        rule(
            "crypto",
            &["bitcoin", "ethereum", "solana", "etf", "flow", "price", "hit", "market cap"],
            &["fdv", "launch", "airdrop", "listing", "mint", "floor price", "nft", "meme", "token"],
            false,
        ),
        rule(
            "tech",
            &["ai model", "benchmark", "gemini", "gpt", "nvidia", "apple", "microsoft", "semiconductor", "agi"],
            &["app store", "download", "tiktok", "charizard", "pokemon", "influencer", "game"],
            false,
        ),
        rule(
            "geopolitics",
            &["strike", "ceasefire", "supreme leader", "regime", "invasion", "nuclear", "war", "military", "border"],
            &["costa rica", "thailand", "parliamentary election", "local"],
            true,
        ),
        rule(
            "climate-science",
            &["earthquake", "spacex", "measles", "virus", "pandemic", "temperature", "volcano", "hurricane"],
            &["snow", "inches", "rain", "weather in", "nyc", "washington", "cloud"],
            false,
        ),
        rule(
            "world",
            &["coalition", "prime minister", "eu", "nato", "un", "trade deal"],
            &["us election", "us strike"],
            true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(slugs: &[&str]) -> Vec<String> {
        slugs.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn classify_picks_first_rule_in_table_order() {
        let classifier = Classifier::new(default_categories());
        // crypto sits above tech in the default table
        let category = classifier.classify(&tags(&["tech", "crypto"])).unwrap();
        assert_eq!(category.name, "crypto");
    }

    #[test]
    fn classify_returns_none_for_unknown_tags() {
        let classifier = Classifier::new(default_categories());
        assert!(classifier.classify(&tags(&["sports", "nba"])).is_none());
        assert!(classifier.classify(&[]).is_none());
    }

    #[test]
    fn noise_keyword_vetoes_title() {
        let rules = default_categories();
        let politics = &rules[0];
        assert!(!politics.passes("trump approval rating above 50"));
    }

    #[test]
    fn loose_category_passes_without_signal() {
        let rules = default_categories();
        let politics = &rules[0];
        assert!(politics.passes("who will win the mayoral race in chicago"));
    }

    #[test]
    fn strict_category_requires_signal() {
        let rules = default_categories();
        let economy = rules.iter().find(|r| r.name == "economy").unwrap();
        assert!(!economy.passes("biggest company by market value"));
        assert!(economy.passes("cpi above 3% this month"));
    }

    #[test]
    fn noise_vetoes_even_with_signal_present() {
        let rules = default_categories();
        let economy = rules.iter().find(|r| r.name == "economy").unwrap();
        // "rate" is a signal but "turkey" is noise
        assert!(!economy.passes("turkey interest rate decision"));
    }

    #[test]
    fn default_table_order_is_the_priority() {
        let rules = default_categories();
        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "politics",
                "economy",
                "finance",
                "crypto",
                "tech",
                "geopolitics",
                "climate-science",
                "world",
            ]
        );
    }

    #[test]
    fn loose_flags_cover_broad_topics() {
        let rules = default_categories();
        let loose: Vec<&str> = rules
            .iter()
            .filter(|r| r.loose)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(loose, vec!["politics", "geopolitics", "world"]);
    }
}
