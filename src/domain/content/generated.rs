//! Structured content produced by a content provider.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// One section of a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub heading: String,
    pub body: String,
    #[serde(default)]
    pub code_example: Option<String>,
}

impl ContentSection {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
            code_example: None,
        }
    }
}

/// Kind of interactive element attached to content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Quiz,
    Exercise,
    Reflection,
    Discussion,
}

/// An interactive element (quiz, exercise, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveElement {
    pub kind: InteractionKind,
    pub prompt: String,
}

/// Descriptive metadata attached to generated content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    /// Provider confidence in the output (0-1).
    #[serde(default)]
    pub confidence: f64,
    pub generated_at: Timestamp,
}

/// Structured content as returned by a provider and refined by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub title: String,
    pub description: String,
    pub sections: Vec<ContentSection>,
    /// Difficulty on the 1-10 scale.
    pub difficulty_level: u8,
    #[serde(default)]
    pub interactive_elements: Vec<InteractiveElement>,
    pub metadata: ContentMetadata,
}

impl GeneratedContent {
    /// Checks the structural requirements every provider output must meet.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if self.sections.is_empty() {
            return Err(ValidationError::empty_field("sections"));
        }
        if !(1..=10).contains(&self.difficulty_level) {
            return Err(ValidationError::out_of_range(
                "difficulty_level",
                1.0,
                10.0,
                f64::from(self.difficulty_level),
            ));
        }
        if !(0.0..=1.0).contains(&self.metadata.confidence) {
            return Err(ValidationError::out_of_range(
                "confidence",
                0.0,
                1.0,
                self.metadata.confidence,
            ));
        }
        Ok(())
    }

    /// True when at least one section carries a code example.
    pub fn has_code_examples(&self) -> bool {
        self.sections.iter().any(|s| s.code_example.is_some())
    }

    /// Concatenated plain text of all sections.
    pub fn body_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| format!("{}\n{}", s.heading, s.body))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
