//! Ports for the scan's external collaborators.
//!
//! This module defines the traits for the three network touch points of one
//! scan: where dedup templates come from, where events come from, and where
//! the finished artifact goes. The orchestrator only sees these traits, so
//! integration tests drive the full pipeline with in-memory fakes.

use async_trait::async_trait;

use crate::domain::Event;
use crate::error::Result;

/// Source of raw blacklist templates.
///
/// Implementations return templates with any routing marker already removed
/// and obviously empty entries dropped; placeholder expansion happens in the
/// domain layer.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch_templates(&self) -> Result<Vec<String>>;
}

/// Source of prediction-market events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch up to `limit` events, highest 24h volume first.
    async fn fetch_events(&self, limit: usize) -> Result<Vec<Event>>;
}

/// Destination for the rendered artifact.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Persist `content` at `path`, annotated with `message`.
    async fn publish(&self, path: &str, message: &str, content: &str) -> Result<()>;
}
