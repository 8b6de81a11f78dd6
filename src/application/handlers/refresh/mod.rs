//! Refresh handlers.
//!
//! Single-item rewrites and the scheduled sweep that drives them.

mod content_refresher;
mod refresh_all;

pub use content_refresher::{ContentRefresher, RefreshOutcome};
pub use refresh_all::{RefreshAll, RefreshSummary};
