//! Polyradar - Prediction market scanning and signal publishing.
//!
//! This crate scans the top Polymarket events, classifies each into a topical
//! category, drops blacklisted and low-signal titles, tags the surviving
//! markets with strategy labels, and publishes the highest-volume slice as a
//! dated JSON artifact through the GitHub contents API.
//!
//! # Architecture
//!
//! The pipeline is a straight line with pure domain logic in the middle:
//!
//! - **`domain::blacklist`** - Dedup targets expanded from templated phrases
//!   (`{date}`, `{month}`, `{next_month}`, `{year}`) bound to the current date
//! - **`domain::category`** - Priority-ordered classification with
//!   signal/noise keyword tables
//! - **`domain::tagging`** - Pluggable tag rules (tail risk, trend,
//!   certainty, leverage) behind the [`domain::tagging::TagRule`] trait
//! - **`domain::ranking`** - Volume ranking and truncation
//!
//! External collaborators sit behind the [`port`] traits so the pipeline can
//! be driven end to end without a network.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files with env overrides
//! - [`domain`] - Pure scan logic: normalization, blacklist, categories, tags
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for template/event sources and the sink
//! - [`adapter`] - Gamma and GitHub API clients
//! - [`app`] - Scan orchestration
//! - [`archive`] - Relocation of staged daily artifacts into the bank tree
//!
//! # Example
//!
//! ```no_run
//! use polyradar::config::Config;
//! use polyradar::domain::tagging::TagEngine;
//!
//! let config = Config::default();
//! let engine = TagEngine::from_config(&config.tagging);
//! ```

pub mod adapter;
pub mod app;
pub mod archive;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
