//! Research module - Time-boxed freshness updates for stored content.
//!
//! Candidate developments come from a research source; relevant ones are
//! classified into `ResearchUpdate`s that expire and must never be applied
//! afterwards.

mod update;

pub use update::{
    classify_priority, classify_update_type, partition_applicable, Development, ExpiryPolicy,
    ResearchPriority, ResearchUpdate, SectionUpdate, UpdateType, RELEVANCE_THRESHOLD,
};
