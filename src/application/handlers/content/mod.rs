//! Content handlers.
//!
//! Generation of new content and intake of completion telemetry.

mod orchestrate_content;
mod submit_completion;

pub use orchestrate_content::{
    ContentOrchestrator, IntelligentContentResponse, OrchestrationMetadata,
};
pub use submit_completion::{CompletionReceipt, SubmitCompletion};
