//! Title normalization.
//!
//! Every string compared during a scan (event titles, blacklist entries)
//! passes through [`normalize`] first, so matching is case-insensitive and
//! ignores question/exclamation punctuation and uneven spacing.

/// Normalize a title for comparison.
///
/// Lower-cases, removes `?` and `!`, collapses whitespace runs to a single
/// space, and trims. Idempotent: `normalize(normalize(s)) == normalize(s)`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped: String = lowered.chars().filter(|c| *c != '?' && *c != '!').collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
