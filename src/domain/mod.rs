//! Network-agnostic scan logic.

mod event;
mod ranking;
mod signal;
mod text;

pub mod blacklist;
pub mod category;
pub mod tagging;

// Core domain types
pub use event::{Event, Market};
pub use signal::SignalRecord;

// Blacklist expansion and dedup
pub use blacklist::{Blacklist, DateContext};

// Classification
pub use category::{CategoryRule, Classifier};

// Tagging
pub use tagging::{TagEngine, TaggingConfig};

// Ranking
pub use ranking::select_top;

// Text normalization
pub use text::normalize;
