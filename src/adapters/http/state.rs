//! Shared application state for the HTTP surface.

use std::sync::Arc;

use crate::application::{
    ContentOrchestrator, ContentRefresher, GenerateQuestions, LearnerInsights,
    PerformanceAnalyzer, RefreshAll, ResearchAdvisor, SubmitCompletion, TutorAssistant,
};
use crate::config::PipelineConfig;
use crate::ports::{
    CompletionRepository, ContentProvider, ContentRepository, NotificationSink, ProviderMode,
    ResearchSource, UserProfileStore,
};

/// Port implementations the handlers are built from.
#[derive(Clone)]
pub struct Dependencies {
    pub provider: Arc<dyn ContentProvider>,
    pub profiles: Arc<dyn UserProfileStore>,
    pub contents: Arc<dyn ContentRepository>,
    pub completions: Arc<dyn CompletionRepository>,
    pub research: Arc<dyn ResearchSource>,
    pub notifier: Arc<dyn NotificationSink>,
}

/// Handlers shared by every request.
///
/// Cloned per request; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ContentOrchestrator>,
    pub submit_completion: Arc<SubmitCompletion>,
    pub analyzer: Arc<PerformanceAnalyzer>,
    pub research: Arc<ResearchAdvisor>,
    pub refresher: Arc<ContentRefresher>,
    pub refresh_all: Arc<RefreshAll>,
    pub tutor: Arc<TutorAssistant>,
    pub questions: Arc<GenerateQuestions>,
    pub insights: Arc<LearnerInsights>,
    pub contents: Arc<dyn ContentRepository>,
    pub provider_mode: ProviderMode,
}

impl AppState {
    /// Builds every handler from `deps`, tuned by `pipeline`.
    pub fn new(deps: Dependencies, pipeline: &PipelineConfig) -> Self {
        let analyzer = Arc::new(
            PerformanceAnalyzer::new(deps.contents.clone(), deps.completions.clone())
                .with_thresholds(pipeline.min_completions, pipeline.regeneration_threshold),
        );
        let research = Arc::new(ResearchAdvisor::new(
            deps.research.clone(),
            pipeline.expiry_policy(),
        ));
        let refresher = Arc::new(ContentRefresher::new(
            deps.provider.clone(),
            deps.contents.clone(),
            deps.completions.clone(),
            research.clone(),
        ));
        let refresh_all = Arc::new(
            RefreshAll::new(
                deps.contents.clone(),
                analyzer.clone(),
                refresher.clone(),
                deps.notifier.clone(),
            )
            .with_window_days(pipeline.refresh_window_days)
            .with_item_delay(pipeline.refresh_item_delay()),
        );

        Self {
            orchestrator: Arc::new(ContentOrchestrator::new(
                deps.provider.clone(),
                deps.profiles.clone(),
                deps.contents.clone(),
                deps.completions.clone(),
            )),
            submit_completion: Arc::new(SubmitCompletion::new(
                deps.contents.clone(),
                deps.completions.clone(),
                deps.profiles.clone(),
            )),
            analyzer,
            research,
            refresher,
            refresh_all,
            tutor: Arc::new(TutorAssistant::new(deps.profiles.clone())),
            questions: Arc::new(GenerateQuestions::new(
                deps.provider.clone(),
                deps.profiles.clone(),
            )),
            insights: Arc::new(LearnerInsights::new(deps.provider.clone(), deps.profiles)),
            contents: deps.contents,
            provider_mode: deps.provider.mode(),
        }
    }
}
