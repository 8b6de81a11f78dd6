//! Discovery metadata: tags, category and an engagement-factor estimate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::user::SkillLevel;

const MAX_TAGS: usize = 5;

const STOPWORDS: &[&str] = &[
    "about", "after", "also", "and", "from", "have", "into", "more", "that", "their", "them",
    "then", "there", "these", "this", "those", "what", "when", "which", "with", "your", "will",
];

const CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["neural", "machine learning", "model", "data", "statistic"], "data_science"),
    (&["rust", "python", "code", "programming", "function", "algorithm"], "programming"),
    (&["market", "business", "finance", "startup"], "business"),
    (&["design", "color", "typography", "layout"], "design"),
    (&["physics", "chemistry", "biology", "math"], "science"),
];

const ENGAGING_TERMS: &[&str] = &[
    "interactive",
    "hands-on",
    "project",
    "real-world",
    "example",
    "challenge",
];

/// Search and discovery metadata for generated content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryMetadata {
    pub tags: Vec<String>,
    pub category: String,
    /// Estimated pull of the content (0-1).
    pub engagement_factor: f64,
}

/// Derives discovery metadata from title, description and audience.
pub fn discover(title: &str, description: &str, audience: &str) -> DiscoveryMetadata {
    let text = format!("{} {}", title, description).to_lowercase();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for word in text
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| w.chars().count() > 3 && !STOPWORDS.contains(w))
    {
        *counts.entry(word).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let tags = ranked
        .into_iter()
        .take(MAX_TAGS)
        .map(|(w, _)| w.to_string())
        .collect();

    let category = CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, category)| (*category).to_string())
        .unwrap_or_else(|| "general".to_string());

    let engaging = ENGAGING_TERMS.iter().filter(|t| text.contains(*t)).count();
    let beginner_bonus = if SkillLevel::from_audience(audience) == Some(SkillLevel::Beginner) {
        0.1
    } else {
        0.0
    };
    let engagement_factor = (0.5 + 0.1 * engaging as f64 + beginner_bonus).min(1.0);

    DiscoveryMetadata {
        tags,
        category,
        engagement_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_rank_by_frequency_then_alphabetically() {
        let meta = discover(
            "Neural Networks",
            "Neural networks learn weights from data",
            "beginner",
        );
        assert_eq!(meta.tags[0], "networks");
        assert_eq!(meta.tags[1], "neural");
        assert!(!meta.tags.contains(&"from".to_string()));
    }

    #[test]
    fn category_comes_from_keyword_rules() {
        assert_eq!(discover("Neural Networks", "", "x").category, "data_science");
        assert_eq!(discover("Rust traits", "", "x").category, "programming");
        assert_eq!(discover("Poetry", "rhyme", "x").category, "general");
    }

    #[test]
    fn engagement_factor_rewards_engaging_terms_and_beginners() {
        let plain = discover("Topic", "Plain text", "advanced");
        assert_eq!(plain.engagement_factor, 0.5);
        let rich = discover("Hands-on project", "An interactive challenge", "beginner");
        assert!(rich.engagement_factor > 0.9);
        assert!(rich.engagement_factor <= 1.0);
    }
}
