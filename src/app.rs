//! Scan orchestration.
//!
//! One run: fetch dedup templates and live events concurrently, classify
//! and filter the events, tag the surviving markets, rank them, publish
//! the artifact.

use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::{debug, info, warn};

use crate::adapter::{GammaClient, GitHubClient};
use crate::config::Config;
use crate::domain::{
    normalize, select_top, Blacklist, Classifier, Event, SignalRecord, TagEngine,
};
use crate::error::Result;
use crate::port::{ArtifactSink, EventSource, TemplateSource};

/// What a run did, for the caller's closing log line.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Events returned by the discovery endpoint.
    pub events_seen: usize,
    /// Records built before truncation.
    pub markets_tagged: usize,
    /// Artifact path, when a publish happened.
    pub published: Option<String>,
}

/// Main application struct.
pub struct App;

impl App {
    /// Run one scan cycle against the live services.
    pub async fn run(config: Config) -> Result<ScanSummary> {
        let github = GitHubClient::from_config(&config.github, &config.network)?;
        let gamma = GammaClient::from_config(&config.network);

        run_scan(&config, &github, &gamma, &github, Utc::now()).await
    }
}

/// Execute one scan cycle with explicit dependencies.
///
/// `now` anchors both the blacklist date expansion and the artifact path,
/// so a whole run sees a single clock reading.
pub async fn run_scan<T, E, S>(
    config: &Config,
    templates: &T,
    events: &E,
    sink: &S,
    now: DateTime<Utc>,
) -> Result<ScanSummary>
where
    T: TemplateSource,
    E: EventSource,
    S: ArtifactSink,
{
    info!("Starting radar scan");

    let (templates, events) = tokio::join!(
        templates.fetch_templates(),
        events.fetch_events(config.scan.events_limit),
    );

    // A broken template source must not stall the scan; run with an
    // empty blacklist instead.
    let templates = match templates {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "Failed to fetch blacklist templates, continuing without");
            Vec::new()
        }
    };
    let events = events?;

    let blacklist = Blacklist::build(&templates, now);
    let classifier = Classifier::new(config.categories.clone());
    let engine = TagEngine::from_config(&config.tagging);

    info!(
        events = events.len(),
        blacklist = blacklist.len(),
        "Scan inputs ready"
    );

    let records = scan_events(
        &events,
        &blacklist,
        &classifier,
        &engine,
        config.scan.min_volume_24h,
    );

    let mut summary = ScanSummary {
        events_seen: events.len(),
        markets_tagged: records.len(),
        published: None,
    };

    let top = select_top(records, config.scan.max_signals);

    if top.is_empty() {
        info!("No high-value signals found");
        return Ok(summary);
    }

    info!(signals = top.len(), "Signals selected");

    if config.dry_run {
        info!("Dry run, skipping publish");
        return Ok(summary);
    }

    let body = serde_json::to_string_pretty(&top)?;
    let (path, file_name) = artifact_path(now);
    sink.publish(&path, &format!("Radar Update: {file_name}"), &body)
        .await?;
    summary.published = Some(path);

    Ok(summary)
}

/// Classify, dedup, and tag every market in `events`.
fn scan_events(
    events: &[Event],
    blacklist: &Blacklist,
    classifier: &Classifier,
    engine: &TagEngine,
    min_volume_24h: f64,
) -> Vec<SignalRecord> {
    let mut records = Vec::new();

    for event in events {
        let Some(rule) = classifier.classify(&event.tags) else {
            continue;
        };

        let title = normalize(&event.title);
        if blacklist.excludes(&title) {
            debug!(title = %event.title, "Blacklisted event skipped");
            continue;
        }
        if !rule.passes(&title) {
            continue;
        }

        for market in &event.markets {
            if !market.tradable(min_volume_24h) {
                continue;
            }
            let tags = engine.evaluate(market, &rule.name);
            records.push(SignalRecord::build(event, market, &rule.name, tags));
        }
    }

    records
}

/// Artifact path and file name for a run at `now` (UTC).
///
/// The clock part is zero-padded, the date part is not, e.g.
/// `data/trends/2026-03-05/radar-2026-3-5-09_07.json`.
fn artifact_path(now: DateTime<Utc>) -> (String, String) {
    let file_name = format!(
        "radar-{}-{}-{}-{:02}_{:02}.json",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute()
    );
    let path = format!("data/trends/{}/{}", now.format("%Y-%m-%d"), file_name);
    (path, file_name)
}
