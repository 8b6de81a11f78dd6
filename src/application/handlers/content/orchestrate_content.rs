//! ContentOrchestrator - Runs the content generation pipeline.
//!
//! Base generation is the only fatal step. Personalization, recommendations,
//! engagement estimation and variations degrade to `None` or nothing when
//! their inputs are absent or their lookups fail.

use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::application::PipelineError;
use crate::domain::content::{ContentItem, ContentRequest, GeneratedContent, Personalization};
use crate::domain::foundation::{ContentId, Timestamp, UserId};
use crate::domain::orchestration::{
    discover, enhance, estimate_engagement, generate_variations, recommend_topics,
    ContentAnalytics, ContentRecommendation, ContentVariation, DiscoveryMetadata,
    EngagementEstimate,
};
use crate::domain::prompt::{PromptBuilder, RelatedAsset};
use crate::domain::user::UserProfile;
use crate::ports::{
    CompletionRepository, ContentProvider, ContentRepository, ProviderMode, UserProfileStore,
};

/// Recent completions consulted for related assets and observed engagement.
const HISTORY_LIMIT: usize = 10;

/// Descriptive metadata about one orchestration run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrchestrationMetadata {
    pub content_id: ContentId,
    pub revision: u32,
    pub personalization_applied: bool,
    pub enhancements_applied: Vec<String>,
    pub discovery: DiscoveryMetadata,
    pub provider: ProviderMode,
    pub generated_at: Timestamp,
}

/// Full result of a content generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntelligentContentResponse {
    pub content: GeneratedContent,
    pub metadata: OrchestrationMetadata,
    pub recommendations: Option<Vec<ContentRecommendation>>,
    pub analytics: ContentAnalytics,
    pub engagement: Option<EngagementEstimate>,
    pub variations: Vec<ContentVariation>,
}

/// Orchestrates personalized content generation.
pub struct ContentOrchestrator {
    provider: Arc<dyn ContentProvider>,
    profiles: Arc<dyn UserProfileStore>,
    contents: Arc<dyn ContentRepository>,
    completions: Arc<dyn CompletionRepository>,
}

impl ContentOrchestrator {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        profiles: Arc<dyn UserProfileStore>,
        contents: Arc<dyn ContentRepository>,
        completions: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            provider,
            profiles,
            contents,
            completions,
        }
    }

    #[instrument(skip(self, request), fields(topic = %request.topic, content_type = %request.content_type.as_str()))]
    pub async fn orchestrate(
        &self,
        request: ContentRequest,
    ) -> Result<IntelligentContentResponse, PipelineError> {
        let now = Timestamp::now();

        // 1. Build the learner profile when personalization was requested
        let profile = match &request.personalization {
            Some(personalization) => Some(self.build_profile(personalization).await?),
            None => None,
        };
        let personalized = profile.is_some();

        // 2. Recommend next topics
        let recent_topics: &[String] = request
            .personalization
            .as_ref()
            .map(|p| p.recent_topics.as_slice())
            .unwrap_or(&[]);
        let recommendations = profile.as_ref().map(|profile| {
            recommend_topics(
                profile,
                &request.topic,
                recent_topics,
                request.personalization.as_ref().and_then(|p| p.goal.as_deref()),
            )
        });

        // 3. Generate base content (fatal on failure)
        let history = match profile.as_ref() {
            Some(profile) => self.recent_history(profile.user_id()).await,
            None => Vec::new(),
        };
        let assets = self.related_assets(&request.topic, &history).await;
        let prompt = PromptBuilder::build(&request, profile.as_ref(), recent_topics, &assets);
        let mut content = self.provider.generate(&prompt).await.map_err(|err| {
            warn!(error = %err, "Base content generation failed");
            PipelineError::UpstreamGeneration(err)
        })?;
        content.metadata.generated_at = now;

        // 4. Enhancement pass
        let preferred = profile
            .as_ref()
            .map(|p| p.performance_metrics().preferred_difficulty);
        let enhancements_applied = enhance(&mut content, &request.enhancement_flags, preferred);

        // 5. Discovery metadata
        let discovery = discover(&content.title, &content.description, &request.audience);
        merge_discovery(&mut content, &discovery);

        // 6. Engagement estimate
        let engagement = profile.as_ref().map(|profile| {
            let observed: Vec<f64> = history
                .iter()
                .map(|(record_engagement, _)| *record_engagement)
                .collect();
            estimate_engagement(&content, profile, &observed)
        });

        // 7. Variations for other delivery contexts
        let variations = generate_variations(&content, request.length);

        let analytics = ContentAnalytics::compute(
            content.metadata.confidence,
            personalized,
            request.is_beginner_audience(),
            request.length.target_minutes(),
            engagement.as_ref().map(|e| e.predicted_score),
        );

        // 8. Persist as revision 1
        let item = ContentItem::new(
            ContentId::new(),
            request.content_type,
            request.topic.clone(),
            request.audience.clone(),
            content.clone(),
            now,
        );
        let content_id = item.id();
        let revision = item.revision_number();
        self.contents.insert(item).await?;

        info!(
            content_id = %content_id,
            personalized,
            provider = %self.provider.mode(),
            enhancements = enhancements_applied.len(),
            "Content orchestrated"
        );

        Ok(IntelligentContentResponse {
            content,
            metadata: OrchestrationMetadata {
                content_id,
                revision,
                personalization_applied: personalized,
                enhancements_applied,
                discovery,
                provider: self.provider.mode(),
                generated_at: now,
            },
            recommendations,
            analytics,
            engagement,
            variations,
        })
    }

    /// Loads (or starts) the profile and applies request overrides.
    ///
    /// Store failures fall back to a fresh profile; invalid overrides fail.
    async fn build_profile(
        &self,
        personalization: &Personalization,
    ) -> Result<UserProfile, PipelineError> {
        let user_id = &personalization.user_id;
        let mut profile = match self.profiles.find_or_new(user_id).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Profile lookup failed, starting fresh");
                UserProfile::new(user_id.clone())
            }
        };
        profile.apply_overrides(&personalization.overrides)?;

        if let Err(err) = self.profiles.save(&profile).await {
            warn!(user_id = %user_id, error = %err, "Failed to save profile");
        }
        Ok(profile)
    }

    /// Engagement scores and content ids of the learner's recent completions.
    async fn recent_history(&self, user_id: &UserId) -> Vec<(f64, ContentId)> {
        match self.completions.recent_for_user(user_id, HISTORY_LIMIT).await {
            Ok(records) => records
                .iter()
                .map(|r| (f64::from(r.engagement_score.value()), r.content_id))
                .collect(),
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Completion history unavailable");
                Vec::new()
            }
        }
    }

    /// Previously completed content, ranked by word overlap with `topic`.
    ///
    /// Lookups run concurrently; a failed lookup only drops that asset.
    async fn related_assets(
        &self,
        topic: &str,
        history: &[(f64, ContentId)],
    ) -> Vec<RelatedAsset> {
        let topic_words = words(topic);
        let mut seen = BTreeSet::new();
        let ids: Vec<ContentId> = history
            .iter()
            .map(|(_, content_id)| *content_id)
            .filter(|content_id| seen.insert(*content_id))
            .collect();

        let lookups = join_all(ids.iter().map(|content_id| self.contents.find(*content_id))).await;

        ids.iter()
            .zip(lookups)
            .filter_map(|(content_id, lookup)| match lookup {
                Ok(item) => item,
                Err(err) => {
                    warn!(content_id = %content_id, error = %err, "Related content unavailable");
                    None
                }
            })
            .map(|item| {
                let overlap = words(item.topic()).intersection(&topic_words).count();
                let current = &item.current().content;
                RelatedAsset {
                    title: current.title.clone(),
                    excerpt: current.description.clone(),
                    relevance: if overlap > 0 { 0.9 } else { 0.5 },
                }
            })
            .collect()
    }
}

fn words(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
        .map(str::to_lowercase)
        .collect()
}

fn merge_discovery(content: &mut GeneratedContent, discovery: &DiscoveryMetadata) {
    for tag in &discovery.tags {
        if !content.metadata.tags.contains(tag) {
            content.metadata.tags.push(tag.clone());
        }
    }
    if content.metadata.category.trim().is_empty() {
        content.metadata.category = discovery.category.clone();
    }
}
