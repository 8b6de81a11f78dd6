//! Prompt builder for generation and rewrite tasks.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::domain::analysis::ImprovementSuggestion;
use crate::domain::content::{map_audience_to_difficulty, ContentRequest, GeneratedContent};
use crate::domain::research::ResearchUpdate;
use crate::domain::user::UserProfile;

/// Most related assets included in one prompt.
pub const MAX_ASSETS: usize = 3;

/// Longest asset excerpt, in characters.
pub const MAX_ASSET_CHARS: usize = 280;

const SYSTEM_PREAMBLE: &str = "You are an expert instructional designer. \
Respond with a single JSON object with the fields: title, description, \
sections (array of {heading, body, code_example}), difficulty_level (1-10), \
interactive_elements (array of {kind, prompt}), metadata ({tags, category}).";

/// What the prompt asks the provider to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptTask {
    Generate,
    Rewrite,
}

/// Previously produced material related to the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedAsset {
    pub title: String,
    pub excerpt: String,
    /// Relevance to the request (0-1).
    pub relevance: f64,
}

/// A fully rendered prompt: system and user messages plus the parameters
/// they were rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptSpec {
    pub task: PromptTask,
    pub topic: String,
    pub audience: String,
    pub system: String,
    pub user: String,
    pub params: BTreeMap<String, String>,
}

impl PromptSpec {
    /// Looks up a rendering parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Builds prompt specs from requests, profiles and history.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Builds the prompt for a fresh generation request.
    pub fn build(
        request: &ContentRequest,
        profile: Option<&UserProfile>,
        recent_topics: &[String],
        related_assets: &[RelatedAsset],
    ) -> PromptSpec {
        let difficulty = map_audience_to_difficulty(&request.audience);
        let mut params = BTreeMap::new();
        params.insert("content_type".to_string(), request.content_type.as_str().to_string());
        params.insert("format".to_string(), request.format.clone());
        params.insert("length".to_string(), request.length.as_str().to_string());
        params.insert(
            "target_minutes".to_string(),
            request.length.target_minutes().to_string(),
        );
        params.insert("difficulty".to_string(), difficulty.to_string());

        let mut user = String::new();
        let _ = writeln!(
            user,
            "Create a {} about \"{}\" for a {} audience.",
            request.content_type.as_str().replace('_', " "),
            request.topic,
            request.audience
        );
        let _ = writeln!(
            user,
            "Format: {}. Length: about {} minutes (~{} words). Target difficulty: {}/10.",
            request.format,
            request.length.target_minutes(),
            request.length.target_words(),
            difficulty
        );

        let flags = &request.enhancement_flags;
        if flags.include_code_examples {
            let _ = writeln!(user, "Include a runnable code example in every section.");
        }
        if flags.include_interactive {
            let _ = writeln!(user, "Include at least two interactive elements.");
        }

        if let Some(profile) = profile {
            params.insert("personalized".to_string(), "true".to_string());
            write_profile(&mut user, profile);
        }
        if !recent_topics.is_empty() {
            let _ = writeln!(user, "Recently studied: {}.", recent_topics.join(", "));
        }
        write_assets(&mut user, related_assets);

        PromptSpec {
            task: PromptTask::Generate,
            topic: request.topic.clone(),
            audience: request.audience.clone(),
            system: SYSTEM_PREAMBLE.to_string(),
            user,
            params,
        }
    }

    /// Builds the rewrite prompt for an existing content item.
    ///
    /// At most `feedback_sample` entries should be passed in; the builder
    /// renders every entry it is given.
    pub fn rewrite(
        current: &GeneratedContent,
        topic: &str,
        audience: &str,
        suggestions: &[ImprovementSuggestion],
        feedback_sample: &[String],
        research_updates: &[ResearchUpdate],
    ) -> PromptSpec {
        let mut params = BTreeMap::new();
        params.insert(
            "difficulty".to_string(),
            current.difficulty_level.to_string(),
        );
        params.insert("current_title".to_string(), current.title.clone());
        params.insert("suggestions".to_string(), suggestions.len().to_string());
        params.insert(
            "research_updates".to_string(),
            research_updates.len().to_string(),
        );

        let mut user = String::new();
        let _ = writeln!(
            user,
            "Rewrite the following {} content about \"{}\" for a {} audience, keeping its structure where it works.",
            current.metadata.category, topic, audience
        );
        let _ = writeln!(user, "\nCurrent title: {}", current.title);
        let _ = writeln!(user, "Current description: {}", current.description);
        let _ = writeln!(user, "Current body:\n{}", current.body_text());

        if !suggestions.is_empty() {
            let _ = writeln!(user, "\nAddress these improvements, most important first:");
            for s in suggestions {
                let _ = writeln!(
                    user,
                    "- [{}/{}] {}",
                    s.area.as_str(),
                    s.priority.as_str(),
                    s.suggestion
                );
            }
        }
        if !feedback_sample.is_empty() {
            let _ = writeln!(user, "\nRecent learner feedback:");
            for text in feedback_sample {
                let _ = writeln!(user, "- \"{}\"", text);
            }
        }
        if !research_updates.is_empty() {
            let _ = writeln!(user, "\nIntegrate these current developments:");
            for update in research_updates {
                let _ = writeln!(
                    user,
                    "- ({}) {}",
                    update.update_type.as_str(),
                    update.research_summary
                );
                for patch in &update.content_updates {
                    let _ = writeln!(user, "  * {}: {}", patch.section, patch.new_content);
                }
            }
        }

        PromptSpec {
            task: PromptTask::Rewrite,
            topic: topic.to_string(),
            audience: audience.to_string(),
            system: SYSTEM_PREAMBLE.to_string(),
            user,
            params,
        }
    }
}

fn write_profile(user: &mut String, profile: &UserProfile) {
    let metrics = profile.performance_metrics();
    let _ = writeln!(
        user,
        "\nLearner profile: {} learner at {} level; {}.",
        profile.learning_style(),
        profile.skill_level(),
        profile.learning_style().delivery_hint()
    );
    if !profile.interests().is_empty() {
        let _ = writeln!(user, "Interests: {}.", join(profile.interests()));
    }
    if !profile.knowledge_gaps().is_empty() {
        let _ = writeln!(user, "Knowledge gaps to address: {}.", join(profile.knowledge_gaps()));
    }
    if !profile.strengths().is_empty() {
        let _ = writeln!(user, "Strengths to build on: {}.", join(profile.strengths()));
    }
    let _ = writeln!(
        user,
        "Performance: average score {:.0}, completion rate {:.0}%, preferred difficulty {}/10, {:.1} lessons/week.",
        metrics.average_score,
        metrics.completion_rate * 100.0,
        metrics.preferred_difficulty,
        metrics.learning_velocity
    );
}

fn write_assets(user: &mut String, assets: &[RelatedAsset]) {
    let mut ranked: Vec<&RelatedAsset> = assets.iter().collect();
    ranked.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.title.cmp(&b.title))
    });
    ranked.truncate(MAX_ASSETS);
    if ranked.is_empty() {
        return;
    }
    let _ = writeln!(user, "\nRelated material:");
    for asset in ranked {
        let _ = writeln!(user, "- {}: {}", asset.title, truncate_chars(&asset.excerpt, MAX_ASSET_CHARS));
    }
}

fn join<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{ImprovementArea, SuggestionPriority};
    use crate::domain::content::generated::fixtures::sample_content;
    use crate::domain::content::{ContentType, EnhancementFlags};
    use crate::domain::foundation::UserId;
    use crate::domain::user::{LearningStyle, ProfileOverrides};

    fn request() -> ContentRequest {
        ContentRequest::new(ContentType::Lesson, "Neural Networks", "beginner").unwrap()
    }

    fn profile() -> UserProfile {
        let mut profile = UserProfile::new(UserId::new("u-1").unwrap());
        profile
            .apply_overrides(&ProfileOverrides {
                learning_style: Some(LearningStyle::Kinesthetic),
                interests: vec!["robotics".to_string()],
                knowledge_gaps: vec!["calculus".to_string()],
                ..Default::default()
            })
            .unwrap();
        profile
    }

    fn asset(title: &str, relevance: f64) -> RelatedAsset {
        RelatedAsset {
            title: title.to_string(),
            excerpt: "excerpt".to_string(),
            relevance,
        }
    }

    #[test]
    fn build_is_deterministic() {
        let p = profile();
        let a = PromptBuilder::build(&request(), Some(&p), &[], &[asset("x", 0.5)]);
        let b = PromptBuilder::build(&request(), Some(&p), &[], &[asset("x", 0.5)]);
        assert_eq!(a, b);
    }

    #[test]
    fn build_includes_audience_difficulty() {
        let spec = PromptBuilder::build(&request(), None, &[], &[]);
        assert_eq!(spec.param("difficulty"), Some("3"));
        assert_eq!(spec.param("content_type"), Some("lesson"));
        assert!(spec.param("personalized").is_none());
        assert!(spec.user.contains("Neural Networks"));
    }

    #[test]
    fn build_incorporates_profile() {
        let spec = PromptBuilder::build(&request(), Some(&profile()), &[], &[]);
        assert!(spec.user.contains("kinesthetic"));
        assert!(spec.user.contains("robotics"));
        assert!(spec.user.contains("calculus"));
        assert_eq!(spec.param("personalized"), Some("true"));
    }

    #[test]
    fn build_keeps_only_three_most_relevant_assets() {
        let assets = vec![
            asset("low", 0.1),
            asset("top", 0.9),
            asset("mid", 0.5),
            asset("high", 0.7),
        ];
        let spec = PromptBuilder::build(&request(), None, &[], &assets);
        assert!(spec.user.contains("top"));
        assert!(spec.user.contains("high"));
        assert!(spec.user.contains("mid"));
        assert!(!spec.user.contains("- low"));
    }

    #[test]
    fn long_excerpts_are_truncated_on_char_boundaries() {
        let excerpt = "é".repeat(MAX_ASSET_CHARS + 20);
        let truncated = truncate_chars(&excerpt, MAX_ASSET_CHARS);
        assert_eq!(truncated.chars().count(), MAX_ASSET_CHARS + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn enhancement_flags_add_instructions() {
        let req = request().with_enhancements(EnhancementFlags {
            include_code_examples: true,
            ..Default::default()
        });
        let spec = PromptBuilder::build(&req, None, &[], &[]);
        assert!(spec.user.contains("code example"));
    }

    #[test]
    fn rewrite_lists_suggestions_and_feedback() {
        let suggestions = vec![ImprovementSuggestion::new(
            ImprovementArea::Clarity,
            SuggestionPriority::High,
            "Define terms",
            0.9,
        )];
        let spec = PromptBuilder::rewrite(
            &sample_content(),
            "Ownership",
            "intermediate",
            &suggestions,
            &["too confusing".to_string()],
            &[],
        );
        assert_eq!(spec.task, PromptTask::Rewrite);
        assert!(spec.user.contains("[clarity/high] Define terms"));
        assert!(spec.user.contains("too confusing"));
        assert_eq!(spec.param("research_updates"), Some("0"));
    }
}
