//! Application handlers.
//!
//! One handler per pipeline operation, each depending only on ports.

pub mod analysis;
pub mod content;
pub mod learner;
pub mod refresh;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::{PerformanceAnalyzer, PerformanceReport, ResearchAdvisor};
pub use content::{
    CompletionReceipt, ContentOrchestrator, IntelligentContentResponse, OrchestrationMetadata,
    SubmitCompletion,
};
pub use learner::{
    GenerateQuestions, LearnerInsights, LearnerInsightsView, QuestionRequest, TutorAssistant,
};
pub use refresh::{ContentRefresher, RefreshAll, RefreshOutcome, RefreshSummary};
