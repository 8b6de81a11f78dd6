//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Generation Ports
//!
//! - `TextCompletion` - Raw LLM completion service
//! - `ContentProvider` - Structured content, questions and insights
//!
//! ## Persistence Ports
//!
//! - `UserProfileStore` - Learner profiles and lesson history
//! - `ContentRepository` - Content items with append-only revisions
//! - `CompletionRepository` - Append-only completion telemetry
//!
//! ## Collaborator Ports
//!
//! - `ResearchSource` - Current developments for a topic
//! - `NotificationSink` - Best-effort operator notifications

mod completion_repository;
mod content_provider;
mod content_repository;
mod notification_sink;
mod profile_store;
mod repository_error;
mod research_source;
mod text_completion;

pub use completion_repository::CompletionRepository;
pub use content_provider::{
    ContentProvider, PerformanceInsights, ProviderError, ProviderMode, Question,
    MAX_DIFFICULTY_ADJUSTMENT,
};
pub use content_repository::ContentRepository;
pub use notification_sink::{NotificationError, NotificationSink};
pub use profile_store::UserProfileStore;
pub use repository_error::RepositoryError;
pub use research_source::{ResearchError, ResearchSource};
pub use text_completion::{
    AIError, CompletionRequest, CompletionResponse, FinishReason, Message, MessageRole,
    ProviderInfo, TextCompletion, TokenUsage,
};
