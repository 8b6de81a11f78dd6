//! Content module - Requests, generated content, revisions and completions.

mod completion;
pub(crate) mod generated;
mod request;
mod revision;

pub use completion::{CompletionRecord, CompletionSubmission, QualityMetrics};
pub use generated::{
    ContentMetadata, ContentSection, GeneratedContent, InteractionKind, InteractiveElement,
};
pub use request::{
    map_audience_to_difficulty, ContentLength, ContentRequest, ContentRequestInput, ContentType,
    EnhancementFlags, Personalization, DEFAULT_DIFFICULTY,
};
pub use revision::{
    ContentItem, ContentRevision, ImprovementLogEntry, NewRevision, RefreshTrigger,
};
