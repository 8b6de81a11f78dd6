//! Analysis handlers.
//!
//! Read-side judgements over stored content: completion performance and
//! research freshness.

mod performance_analyzer;
mod research_advisor;

pub use performance_analyzer::{PerformanceAnalyzer, PerformanceReport};
pub use research_advisor::ResearchAdvisor;
