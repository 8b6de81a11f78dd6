//! Content requests - the immutable input of one orchestration run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::user::{ProfileOverrides, SkillLevel};

/// Difficulty used when the audience label is not recognised.
pub const DEFAULT_DIFFICULTY: u8 = 5;

/// Kind of content being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Lesson,
    Assessment,
    Trending,
    Newsletter,
    CourseOutline,
    Exercise,
    Summary,
}

impl ContentType {
    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lesson => "lesson",
            Self::Assessment => "assessment",
            Self::Trending => "trending",
            Self::Newsletter => "newsletter",
            Self::CourseOutline => "course_outline",
            Self::Exercise => "exercise",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested length of a content item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ContentLength {
    /// Target reading/working time in minutes.
    pub fn target_minutes(&self) -> u32 {
        match self {
            Self::Short => 5,
            Self::Medium => 15,
            Self::Long => 30,
        }
    }

    /// Approximate target word count.
    pub fn target_words(&self) -> u32 {
        match self {
            Self::Short => 600,
            Self::Medium => 1500,
            Self::Long => 3000,
        }
    }

    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

/// Optional learner-specific parameters of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personalization {
    pub user_id: UserId,
    #[serde(flatten)]
    pub overrides: ProfileOverrides,
    #[serde(default)]
    pub recent_topics: Vec<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

/// Post-generation adjustments requested by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementFlags {
    pub include_code_examples: bool,
    pub adaptive_difficulty: bool,
    pub include_interactive: bool,
}

/// Raw request body as received at the boundary. Required fields are optional
/// here so that every missing one can be reported at once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentRequestInput {
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    pub topic: Option<String>,
    pub audience: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub length: Option<ContentLength>,
    #[serde(default)]
    pub personalization: Option<Personalization>,
    #[serde(default)]
    pub enhancement_flags: Option<EnhancementFlags>,
}

/// A validated content request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRequest {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub topic: String,
    pub audience: String,
    pub format: String,
    pub length: ContentLength,
    pub personalization: Option<Personalization>,
    pub enhancement_flags: EnhancementFlags,
}

impl ContentRequest {
    /// Creates a request with defaults for every optional field.
    pub fn new(
        content_type: ContentType,
        topic: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        ContentRequestInput {
            content_type: Some(content_type),
            topic: Some(topic.into()),
            audience: Some(audience.into()),
            ..Default::default()
        }
        .validate()
    }

    /// Attaches personalization.
    pub fn with_personalization(mut self, personalization: Personalization) -> Self {
        self.personalization = Some(personalization);
        self
    }

    /// Attaches enhancement flags.
    pub fn with_enhancements(mut self, flags: EnhancementFlags) -> Self {
        self.enhancement_flags = flags;
        self
    }

    /// Target difficulty for the request's audience.
    pub fn target_difficulty(&self) -> u8 {
        map_audience_to_difficulty(&self.audience)
    }

    /// True when the audience is the beginner bracket.
    pub fn is_beginner_audience(&self) -> bool {
        SkillLevel::from_audience(&self.audience) == Some(SkillLevel::Beginner)
    }
}

impl ContentRequestInput {
    /// Validates required fields, reporting all that are missing.
    pub fn validate(self) -> Result<ContentRequest, ValidationError> {
        let mut missing = Vec::new();
        if self.content_type.is_none() {
            missing.push("type");
        }
        let topic = non_blank(self.topic);
        if topic.is_none() {
            missing.push("topic");
        }
        let audience = non_blank(self.audience);
        if audience.is_none() {
            missing.push("audience");
        }

        match (self.content_type, topic, audience) {
            (Some(content_type), Some(topic), Some(audience)) => Ok(ContentRequest {
                content_type,
                topic,
                audience,
                format: non_blank(self.format).unwrap_or_else(|| "text".to_string()),
                length: self.length.unwrap_or_default(),
                personalization: self.personalization,
                enhancement_flags: self.enhancement_flags.unwrap_or_default(),
            }),
            _ => Err(ValidationError::missing_fields(missing)),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Maps an audience label to a 1-10 difficulty.
///
/// beginner=3, intermediate=6, advanced=8, expert=9, anything else=5.
pub fn map_audience_to_difficulty(audience: &str) -> u8 {
    SkillLevel::from_audience(audience)
        .map(|level| level.difficulty())
        .unwrap_or(DEFAULT_DIFFICULTY)
}
