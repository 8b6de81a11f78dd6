//! Adaptive variations of content for alternate delivery contexts.

use serde::{Deserialize, Serialize};

use crate::domain::content::{ContentLength, GeneratedContent};

/// Delivery context a variation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationContext {
    Mobile,
    Desktop,
    Collaborative,
}

/// Informational outline of a variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentVariation {
    pub context: VariationContext,
    pub title: String,
    pub section_headings: Vec<String>,
    pub estimated_minutes: u32,
    pub notes: String,
}

/// Derives mobile, desktop and collaborative variations.
pub fn generate_variations(content: &GeneratedContent, length: ContentLength) -> Vec<ContentVariation> {
    let headings: Vec<String> = content.sections.iter().map(|s| s.heading.clone()).collect();
    let minutes = length.target_minutes();

    vec![
        ContentVariation {
            context: VariationContext::Mobile,
            title: format!("{} (quick read)", content.title),
            section_headings: headings.iter().take(3).cloned().collect(),
            estimated_minutes: (minutes / 2).max(1),
            notes: "Shortened to the first key sections; code examples collapsed".to_string(),
        },
        ContentVariation {
            context: VariationContext::Desktop,
            title: content.title.clone(),
            section_headings: headings.clone(),
            estimated_minutes: minutes,
            notes: "Full content with all examples and interactive elements".to_string(),
        },
        ContentVariation {
            context: VariationContext::Collaborative,
            title: format!("{} (group session)", content.title),
            section_headings: headings
                .iter()
                .map(|h| format!("{} + discussion", h))
                .collect(),
            estimated_minutes: minutes + 5 * content.sections.len() as u32,
            notes: "Each section followed by a short group discussion prompt".to_string(),
        },
    ]
}
