//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values: the GitHub token comes from `MY_PAT`
//! (falling back to `GITHUB_TOKEN`) and never from the file. Output repo
//! coordinates follow CI conventions: `REPO_OWNER`/`REPO_NAME`, then
//! `GITHUB_REPOSITORY_OWNER`/`GITHUB_REPOSITORY`, then the file.
//!
//! A missing config file is not an error; every field has a default, so a
//! bare environment with the right variables is a complete setup.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::domain::category::{default_categories, CategoryRule};
use crate::domain::tagging::TaggingConfig;
use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Category table, highest priority first. Listing any `[[categories]]`
    /// in the file replaces the whole default table.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryRule>,
    #[serde(default)]
    pub tagging: TaggingConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    /// Dry-run mode: scan and rank but don't publish.
    #[serde(default)]
    pub dry_run: bool,
}

/// GitHub API configuration.
/// The token is loaded from `MY_PAT` or `GITHUB_TOKEN` at runtime (never
/// from the config file).
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Repo whose open issues carry the dedup templates.
    #[serde(default = "default_source_repo")]
    pub source_repo: String,
    /// Marker token an issue title must carry to count as a template.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// `owner/name` of the repo that receives the artifact. Usually comes
    /// from the environment in CI.
    #[serde(default)]
    pub output_repo: String,
    /// Bearer token, environment only.
    #[serde(skip)]
    pub token: Option<String>,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_source_repo() -> String {
    "wenfp108/Central-Bank".to_string()
}

fn default_marker() -> String {
    "[poly]".to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            source_repo: default_source_repo(),
            marker: default_marker(),
            output_repo: String::new(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Gamma API base URL (event discovery).
    #[serde(default = "default_gamma_url")]
    pub gamma_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_gamma_url() -> String {
    "https://gamma-api.polymarket.com".to_string()
}

const fn default_http_timeout_ms() -> u64 {
    10_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    3000
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            gamma_url: default_gamma_url(),
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
        }
    }
}

/// Scan sizing knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// How many events to pull per run.
    #[serde(default = "default_events_limit")]
    pub events_limit: usize,
    /// Markets below this 24h volume are not worth a slot.
    #[serde(default = "default_min_volume_24h")]
    pub min_volume_24h: f64,
    /// Output truncation cap.
    #[serde(default = "default_max_signals")]
    pub max_signals: usize,
}

const fn default_events_limit() -> usize {
    100
}

const fn default_min_volume_24h() -> f64 {
    10_000.0
}

const fn default_max_signals() -> usize {
    30
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            events_limit: default_events_limit(),
            min_volume_24h: default_min_volume_24h(),
            max_signals: default_max_signals(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// One staged subtree and where it archives to.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveTarget {
    /// Subdirectory of `data_dir` the scan stages under.
    pub staging: String,
    /// Subdirectory of `bank_dir` the files move into.
    pub archive: String,
}

/// Configuration for the archival relocation run.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Staging root (mirrors the artifact path written by the scan).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Bank root, usually a checkout of the archive repo.
    #[serde(default = "default_bank_dir")]
    pub bank_dir: PathBuf,
    #[serde(default = "default_archive_targets")]
    pub targets: Vec<ArchiveTarget>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_bank_dir() -> PathBuf {
    PathBuf::from("central_bank")
}

fn default_archive_targets() -> Vec<ArchiveTarget> {
    vec![
        ArchiveTarget {
            staging: "strategy".into(),
            archive: "polymarket/strategy".into(),
        },
        ArchiveTarget {
            staging: "trends".into(),
            archive: "polymarket/trends".into(),
        },
    ]
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bank_dir: default_bank_dir(),
            targets: default_archive_targets(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GithubConfig::default(),
            network: NetworkConfig::default(),
            scan: ScanConfig::default(),
            logging: LoggingConfig::default(),
            categories: default_categories(),
            tagging: TaggingConfig::default(),
            archive: ArchiveConfig::default(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist, then overlay environment values and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config: Self = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        } else {
            Self::default()
        };

        // Token comes from the environment, never from the config file
        config.github.token = std::env::var("MY_PAT")
            .or_else(|_| std::env::var("GITHUB_TOKEN"))
            .ok()
            .filter(|t| !t.is_empty());

        if let Some(repo) = output_repo_from_env() {
            config.github.output_repo = repo;
        }

        config.validate()?;

        Ok(config)
    }

    /// Like [`load`](Self::load) but without the credential checks, for
    /// runs that never talk to the network.
    pub fn load_unchecked<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            Ok(toml::from_str(&content).map_err(ConfigError::Parse)?)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.github.token.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingField {
                field: "github.token",
            }
            .into());
        }
        if self.github.output_repo.is_empty() {
            return Err(ConfigError::MissingField {
                field: "github.output_repo",
            }
            .into());
        }
        if !self.github.output_repo.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "github.output_repo",
                reason: "expected owner/name".into(),
            }
            .into());
        }
        for (field, value) in [
            ("github.api_url", &self.github.api_url),
            ("network.gamma_url", &self.network.gamma_url),
        ] {
            Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

/// Output repo coordinates from CI-style environment variables.
///
/// `REPO_OWNER`/`REPO_NAME` win; `GITHUB_REPOSITORY_OWNER` and the
/// `owner/name` in `GITHUB_REPOSITORY` fill whichever half is missing.
fn output_repo_from_env() -> Option<String> {
    let repository = std::env::var("GITHUB_REPOSITORY").ok();
    let (repo_owner, repo_name) = repository
        .as_deref()
        .and_then(|r| r.split_once('/'))
        .map_or((None, None), |(o, n)| {
            (Some(o.to_string()), Some(n.to_string()))
        });

    let owner = std::env::var("REPO_OWNER")
        .ok()
        .or_else(|| std::env::var("GITHUB_REPOSITORY_OWNER").ok())
        .or(repo_owner)
        .filter(|s| !s.is_empty());
    let name = std::env::var("REPO_NAME")
        .ok()
        .or(repo_name)
        .filter(|s| !s.is_empty());

    match (owner, name) {
        (Some(owner), Some(name)) => Some(format!("{owner}/{name}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_valid_config() -> Config {
        let mut config = Config::default();
        config.github.token = Some("ghp_test".into());
        config.github.output_repo = "acme/radar-output".into();
        config
    }

    #[test]
    fn empty_toml_gives_full_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.source_repo, "wenfp108/Central-Bank");
        assert_eq!(config.github.marker, "[poly]");
        assert_eq!(config.network.gamma_url, "https://gamma-api.polymarket.com");
        assert_eq!(config.scan.events_limit, 100);
        assert_eq!(config.scan.min_volume_24h, 10_000.0);
        assert_eq!(config.scan.max_signals, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.categories.len(), 8);
        assert!(!config.dry_run);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            dry_run = true

            [scan]
            events_limit = 50
            min_volume_24h = 5000.0

            [network]
            gamma_url = "https://gamma.example.com"

            [github]
            source_repo = "acme/watchtower"
            marker = "[radar]"

            [tagging.certainty]
            min_volume = 75000.0
            "#,
        )
        .unwrap();

        assert!(config.dry_run);
        assert_eq!(config.scan.events_limit, 50);
        assert_eq!(config.scan.min_volume_24h, 5000.0);
        assert_eq!(config.scan.max_signals, 30);
        assert_eq!(config.network.gamma_url, "https://gamma.example.com");
        assert_eq!(config.github.source_repo, "acme/watchtower");
        assert_eq!(config.github.marker, "[radar]");
        assert_eq!(config.tagging.certainty.min_volume, 75_000.0);
        assert_eq!(config.tagging.certainty.max_spread, 0.01);
    }

    #[test]
    fn category_table_in_file_replaces_defaults() {
        let config: Config = toml::from_str(
            r#"
            [[categories]]
            name = "sports"
            signals = ["cup", "final"]
            noise = ["friendly"]
            "#,
        )
        .unwrap();

        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories[0].name, "sports");
        assert!(!config.categories[0].loose);
    }

    #[test]
    fn token_never_deserializes_from_file() {
        let config: Config = toml::from_str(
            r#"
            [github]
            output_repo = "acme/out"
            "#,
        )
        .unwrap();
        assert!(config.github.token.is_none());
        assert_eq!(config.github.output_repo, "acme/out");
    }

    #[test]
    fn validate_rejects_missing_token() {
        let mut config = make_valid_config();
        config.github.token = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_output_repo() {
        let mut config = make_valid_config();
        config.github.output_repo = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_output_repo_without_owner() {
        let mut config = make_valid_config();
        config.github.output_repo = "just-a-name".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_gamma_url() {
        let mut config = make_valid_config();
        config.network.gamma_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(make_valid_config().validate().is_ok());
    }

    #[test]
    fn archive_defaults_cover_both_staged_subtrees() {
        let config = ArchiveConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.bank_dir, PathBuf::from("central_bank"));
        let staging: Vec<&str> = config.targets.iter().map(|t| t.staging.as_str()).collect();
        assert_eq!(staging, vec!["strategy", "trends"]);
    }
}
