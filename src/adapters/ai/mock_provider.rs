//! Mock Content Provider - Deterministic output with no network.
//!
//! Used when no API key is configured and throughout the test suite.
//! Identical prompts always produce identical content, including the
//! `generated_at` stamp; callers re-stamp when they persist.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockContentProvider::new();
//! let content = provider.generate(&prompt).await?;
//! assert_eq!(content.metadata.confidence, 0.85);
//! ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::content::{
    map_audience_to_difficulty, ContentMetadata, ContentSection, GeneratedContent,
    InteractionKind, InteractiveElement,
};
use crate::domain::foundation::{Amazingness, Timestamp};
use crate::domain::prompt::{PromptSpec, PromptTask};
use crate::domain::user::{LearnerStats, LessonOutcome, UserProfile};
use crate::ports::{
    ContentProvider, PerformanceInsights, ProviderError, ProviderMode, Question,
};

/// Confidence reported for every mock generation.
pub const MOCK_CONFIDENCE: f64 = 0.85;

/// Fixed generation time stamped on mock output (2024-01-01T00:00:00Z).
pub const MOCK_GENERATED_AT_SECS: i64 = 1_704_067_200;

const MINUTES_PER_SECTION: u32 = 5;
const MAX_SECTIONS: u32 = 6;

/// Deterministic content provider.
#[derive(Debug, Clone, Default)]
pub struct MockContentProvider {
    calls: Arc<AtomicUsize>,
}

impl MockContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of generate calls served.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn label(content_type: &str) -> String {
    let spaced = content_type.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn section_count(prompt: &PromptSpec) -> u32 {
    prompt
        .param("target_minutes")
        .and_then(|m| m.parse::<u32>().ok())
        .map(|minutes| (minutes / MINUTES_PER_SECTION).clamp(2, MAX_SECTIONS))
        .unwrap_or(3)
}

fn build_sections(prompt: &PromptSpec, difficulty: u8) -> Vec<ContentSection> {
    let topic = &prompt.topic;
    let with_code = prompt.user.contains("code example");
    let headings = [
        format!("Introduction to {}", topic),
        format!("Core concepts of {}", topic),
        format!("Working through {}", topic),
        format!("Common pitfalls in {}", topic),
        format!("Putting {} into practice", topic),
        format!("Where to go after {}", topic),
    ];

    headings
        .into_iter()
        .take(section_count(prompt) as usize)
        .enumerate()
        .map(|(i, heading)| {
            let mut section = ContentSection::new(
                heading,
                format!(
                    "Part {} of this material on {} for a {} audience at difficulty {}/10.",
                    i + 1,
                    topic,
                    prompt.audience,
                    difficulty
                ),
            );
            if with_code {
                section.code_example = Some(format!("// {} example {}\n", topic, i + 1));
            }
            section
        })
        .collect()
}

#[async_trait]
impl ContentProvider for MockContentProvider {
    async fn generate(&self, prompt: &PromptSpec) -> Result<GeneratedContent, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let difficulty = prompt
            .param("difficulty")
            .and_then(|d| d.parse::<u8>().ok())
            .filter(|d| (1..=10).contains(d))
            .unwrap_or_else(|| map_audience_to_difficulty(&prompt.audience));
        let content_type = prompt.param("content_type").unwrap_or("lesson");

        let title = match (prompt.task, prompt.param("current_title")) {
            (PromptTask::Rewrite, Some(current)) => format!("{} (revised)", current),
            _ => format!("{}: {}", label(content_type), prompt.topic),
        };

        let content = GeneratedContent {
            title,
            description: format!(
                "A {} on {} for {} learners.",
                label(content_type).to_lowercase(),
                prompt.topic,
                prompt.audience
            ),
            sections: build_sections(prompt, difficulty),
            difficulty_level: difficulty,
            interactive_elements: vec![InteractiveElement {
                kind: InteractionKind::Quiz,
                prompt: format!("Quick check: what is the key idea behind {}?", prompt.topic),
            }],
            metadata: ContentMetadata {
                tags: vec![prompt.topic.to_lowercase(), content_type.to_string()],
                // Left for discovery to fill in.
                category: String::new(),
                confidence: MOCK_CONFIDENCE,
                generated_at: Timestamp::from_unix_secs(MOCK_GENERATED_AT_SECS),
            },
        };
        content
            .validate()
            .map_err(|e| ProviderError::parse(e.to_string()))?;
        Ok(content)
    }

    async fn generate_questions(
        &self,
        topic: &str,
        difficulty: u8,
        profile: Option<&UserProfile>,
    ) -> Result<Vec<Question>, ProviderError> {
        let difficulty = difficulty.clamp(1, 10);
        let mut subjects = vec![topic.to_string()];
        if let Some(profile) = profile {
            subjects.extend(profile.knowledge_gaps().iter().take(2).cloned());
        }

        let questions = subjects
            .iter()
            .enumerate()
            .map(|(i, subject)| Question {
                prompt: format!("Which statement about {} is correct?", subject),
                options: vec![
                    format!("{} has a single core principle", subject),
                    format!("{} builds on earlier concepts", subject),
                    format!("{} is unrelated to {}", subject, topic),
                    "None of the above".to_string(),
                ],
                correct_index: 1,
                explanation: format!("Understanding {} depends on its foundations.", subject),
                difficulty: (difficulty + i as u8).min(10),
            })
            .collect();
        Ok(questions)
    }

    async fn analyze_performance(
        &self,
        history: &[LessonOutcome],
    ) -> Result<PerformanceInsights, ProviderError> {
        let reference_day = history
            .iter()
            .map(|o| o.completed_at)
            .max()
            .unwrap_or_else(|| Timestamp::from_unix_secs(MOCK_GENERATED_AT_SECS))
            .date();
        let stats = LearnerStats::from_outcomes(history, reference_day);

        if stats.is_new_learner() {
            return Ok(PerformanceInsights {
                insights: vec!["No lessons completed yet".to_string()],
                recommendations: vec!["Start with a beginner lesson".to_string()],
                knowledge_gaps: vec![],
                strengths: vec![],
                next_learning_path: vec![],
                difficulty_adjustment: 0,
            });
        }

        let mean = stats.mean_amazingness;
        let difficulty_adjustment = if mean >= 130.0 {
            2
        } else if mean >= Amazingness::AMAZING_THRESHOLD {
            1
        } else if mean < 60.0 {
            -2
        } else if mean < Amazingness::GOOD_THRESHOLD {
            -1
        } else {
            0
        };

        let knowledge_gaps: Vec<String> = stats
            .improvement_areas()
            .iter()
            .map(|t| t.topic.clone())
            .collect();
        let strengths: Vec<String> = stats.strong_topics().iter().map(|t| t.topic.clone()).collect();

        let mut recommendations = Vec::new();
        for gap in &knowledge_gaps {
            recommendations.push(format!("Review the fundamentals of {}", gap));
        }
        if recommendations.is_empty() {
            recommendations.push("Keep going at the current pace".to_string());
        }

        Ok(PerformanceInsights {
            insights: vec![format!(
                "{} lessons completed with a mean amazingness of {:.1}",
                stats.lesson_count, mean
            )],
            recommendations,
            next_learning_path: strengths
                .iter()
                .map(|s| format!("Advanced {}", s))
                .chain(knowledge_gaps.iter().map(|g| format!("{} refresher", g)))
                .collect(),
            knowledge_gaps,
            strengths,
            difficulty_adjustment,
        }
        .normalized())
    }

    fn mode(&self) -> ProviderMode {
        ProviderMode::Mock
    }
}
