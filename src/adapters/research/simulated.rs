//! Deterministic research feed.
//!
//! Produces a fixed spread of developments per topic so the research
//! pipeline can run without an external index. Tests may pin the exact
//! developments returned.

use async_trait::async_trait;

use crate::domain::foundation::Timestamp;
use crate::domain::research::Development;
use crate::ports::{ResearchError, ResearchSource};

/// Research source that synthesizes developments from the topic name.
#[derive(Debug, Clone, Default)]
pub struct SimulatedResearchSource {
    fixed: Option<Vec<Development>>,
}

impl SimulatedResearchSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns exactly `developments` for every topic.
    pub fn fixed(developments: Vec<Development>) -> Self {
        Self {
            fixed: Some(developments),
        }
    }

    fn synthesize(topic: &str, now: Timestamp) -> Vec<Development> {
        let templates: [(&str, &str, f64, i64, &str); 4] = [
            (
                "New tooling changes how {} is taught",
                "Refresh the worked example with the current tooling",
                0.92,
                3,
                "tooling-weekly",
            ),
            (
                "Survey: adoption statistics for {}",
                "Update the statistic quoted in the introduction",
                0.84,
                12,
                "industry-survey",
            ),
            (
                "{} in the news this month",
                "Mention the current news as a motivating hook",
                0.76,
                1,
                "tech-news",
            ),
            (
                "Historical retrospective on {}",
                "Optional background reading",
                0.45,
                40,
                "archive",
            ),
        ];

        templates
            .iter()
            .map(|(headline, integration, relevance, age_days, source)| Development {
                headline: headline.replace("{}", topic),
                summary: format!("{} ({})", headline.replace("{}", topic), source),
                source: format!("https://{}.example.org/{}", source, slug(topic)),
                relevance: *relevance,
                published_date: now.minus_days(*age_days),
                suggested_integration: integration.to_string(),
            })
            .collect()
    }
}

fn slug(topic: &str) -> String {
    topic
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[async_trait]
impl ResearchSource for SimulatedResearchSource {
    async fn current_developments(&self, topic: &str) -> Result<Vec<Development>, ResearchError> {
        if topic.trim().is_empty() {
            return Err(ResearchError::Unavailable("empty topic".to_string()));
        }
        Ok(match &self.fixed {
            Some(developments) => developments.clone(),
            None => Self::synthesize(topic, Timestamp::now()),
        })
    }
}
