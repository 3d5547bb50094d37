//! Dedup blacklist built from templated phrases.
//!
//! Templates carry `{date}`, `{month}`, `{next_month}`, and `{year}`
//! placeholders and expand against the current date into concrete normalized
//! entries. A single `{date}` template covers the next three days; month and
//! year templates cover the current and the following cycle, so entries stay
//! valid across month and year boundaries without anyone editing them.
//!
//! Expansion policy, first match wins per template:
//!
//! 1. `{date}` - one entry per upcoming day (today, +1, +2); `{year}` binds
//!    to that day's year, `{month}`/`{next_month}` to the current calendar
//! 2. `{month}` or `{next_month}` - two entries, shifting both month
//!    placeholders one cycle forward in the second (`{year}` follows the
//!    shifted month across a December rollover)
//! 3. `{year}` - two entries: current year and next year
//! 4. no placeholder - the phrase itself
//!
//! All arithmetic is calendar-based UTC; month names are English.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};

use super::text::normalize;

fn month_name(d: NaiveDate) -> String {
    d.format("%B").to_string()
}

/// Date bindings for template expansion, computed once per scan.
#[derive(Debug, Clone)]
pub struct DateContext {
    /// Upcoming days as ("March 5", 2026) pairs: today, +1, +2.
    days: Vec<(String, i32)>,
    month: String,
    next_month: String,
    month_after_next: String,
    year: i32,
    next_year: i32,
    /// Year of next month; differs from `year` only across December.
    next_month_year: i32,
}

impl DateContext {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();

        let days = (0..3u64)
            .map(|offset| {
                let d = today.checked_add_days(Days::new(offset)).unwrap_or(today);
                (format!("{} {}", month_name(d), d.day()), d.year())
            })
            .collect();

        let next = today.checked_add_months(Months::new(1)).unwrap_or(today);
        let after_next = today.checked_add_months(Months::new(2)).unwrap_or(today);

        Self {
            days,
            month: month_name(today),
            next_month: month_name(next),
            month_after_next: month_name(after_next),
            year: today.year(),
            next_year: today.year() + 1,
            next_month_year: next.year(),
        }
    }

    /// Expand one template into normalized blacklist entries.
    #[must_use]
    pub fn expand(&self, template: &str) -> Vec<String> {
        if template.contains("{date}") {
            self.days
                .iter()
                .map(|(day, year)| {
                    normalize(
                        &template
                            .replace("{date}", day)
                            .replace("{year}", &year.to_string())
                            .replace("{month}", &self.month)
                            .replace("{next_month}", &self.next_month),
                    )
                })
                .collect()
        } else if template.contains("{month}") || template.contains("{next_month}") {
            let this_cycle = template
                .replace("{month}", &self.month)
                .replace("{next_month}", &self.next_month)
                .replace("{year}", &self.year.to_string());
            let next_cycle = template
                .replace("{month}", &self.next_month)
                .replace("{next_month}", &self.month_after_next)
                .replace("{year}", &self.next_month_year.to_string());
            vec![normalize(&this_cycle), normalize(&next_cycle)]
        } else if template.contains("{year}") {
            vec![
                normalize(&template.replace("{year}", &self.year.to_string())),
                normalize(&template.replace("{year}", &self.next_year.to_string())),
            ]
        } else {
            vec![normalize(template)]
        }
    }
}

/// Concrete dedup entries, write-once per scan.
///
/// Exclusion is a loose two-directional substring test on normalized
/// titles: a blacklist entry matches both more-specific titles ("also in
/// 2026") and less-specific ones. Over-exclusion is accepted; output slots
/// are scarce.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    entries: Vec<String>,
}

impl Blacklist {
    /// Expand `templates` against `now` into a ready blacklist.
    ///
    /// Entries that normalize to the empty string are dropped; an empty
    /// entry would match every title.
    #[must_use]
    pub fn build(templates: &[String], now: DateTime<Utc>) -> Self {
        let ctx = DateContext::new(now);
        let entries = templates
            .iter()
            .flat_map(|t| ctx.expand(t))
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    /// Whether a normalized title collides with any entry, in either
    /// direction.
    #[must_use]
    pub fn excludes(&self, normalized_title: &str) -> bool {
        self.entries
            .iter()
            .any(|e| normalized_title.contains(e.as_str()) || e.contains(normalized_title))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
