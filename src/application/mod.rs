//! Application layer - Handlers and the errors they surface.
//!
//! Handlers coordinate domain services and ports. Commands (orchestrate,
//! submit completion, refresh) write; queries (analyze, research, tutor,
//! questions, insights) only read.

mod errors;
pub mod handlers;

pub use errors::PipelineError;
pub use handlers::{
    CompletionReceipt, ContentOrchestrator, ContentRefresher, GenerateQuestions,
    IntelligentContentResponse, LearnerInsights, LearnerInsightsView, OrchestrationMetadata,
    PerformanceAnalyzer, PerformanceReport, QuestionRequest, RefreshAll, RefreshOutcome,
    RefreshSummary, ResearchAdvisor, SubmitCompletion, TutorAssistant,
};
