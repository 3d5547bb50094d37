//! GitHub REST API client.
//!
//! Two operations against `api.github.com`:
//! - **issue listing** on the source repo, which doubles as the control
//!   surface for dedup templates: open issues whose title carries the
//!   marker token (default `[poly]`) are templates, everything else is
//!   ignored
//! - **contents write** on the output repo, used to commit the rendered
//!   artifact

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::header::ACCEPT;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::info;

use super::build_http_client;
use crate::config::{GithubConfig, NetworkConfig};
use crate::error::{ConfigError, Result};
use crate::port::{ArtifactSink, TemplateSource};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// An issue from the list endpoint. Only the title matters here.
#[derive(Debug, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub title: String,
}

/// Extract a template from an issue title.
///
/// Titles without the marker are not templates. Every marker occurrence is
/// removed case-insensitively; titles that are nothing but marker yield
/// `None` instead of an empty template.
fn template_from_title(title: &str, marker: &str) -> Option<String> {
    let marker = marker.to_lowercase();
    let lowered = title.to_lowercase();
    if marker.is_empty() || !lowered.contains(&marker) {
        return None;
    }
    let stripped = lowered.replace(&marker, "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// HTTP client for the GitHub issue listing and contents endpoints.
pub struct GitHubClient {
    http: HttpClient,
    api_url: String,
    source_repo: String,
    marker: String,
    output_repo: String,
    token: String,
}

impl GitHubClient {
    pub fn from_config(github: &GithubConfig, network: &NetworkConfig) -> Result<Self> {
        let token = github
            .token
            .clone()
            .ok_or(ConfigError::MissingField { field: "github.token" })?;

        Ok(Self {
            http: build_http_client(network.timeout_ms, network.connect_timeout_ms),
            api_url: github.api_url.clone(),
            source_repo: github.source_repo.clone(),
            marker: github.marker.clone(),
            output_repo: github.output_repo.clone(),
            token,
        })
    }
}

#[async_trait]
impl TemplateSource for GitHubClient {
    async fn fetch_templates(&self) -> Result<Vec<String>> {
        let url = format!(
            "{}/repos/{}/issues?state=open&per_page=100",
            self.api_url, self.source_repo
        );

        info!(repo = %self.source_repo, "Syncing dedup templates");

        let issues: Vec<Issue> = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let templates: Vec<String> = issues
            .iter()
            .filter_map(|issue| template_from_title(&issue.title, &self.marker))
            .collect();

        info!(
            issues = issues.len(),
            templates = templates.len(),
            "Loaded dedup templates"
        );

        Ok(templates)
    }
}

#[async_trait]
impl ArtifactSink for GitHubClient {
    async fn publish(&self, path: &str, message: &str, content: &str) -> Result<()> {
        let url = format!(
            "{}/repos/{}/contents/{}",
            self.api_url, self.output_repo, path
        );
        let body = serde_json::json!({
            "message": message,
            "content": BASE64.encode(content),
        });

        self.http
            .put(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        info!(path = %path, repo = %self.output_repo, "Artifact published");
        Ok(())
    }
}
