//! UserProfile aggregate root and core value objects

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Score, Timestamp, UserId, ValidationError};

/// Preferred way of taking in new material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    #[default]
    Visual,
    Auditory,
    Kinesthetic,
    Reading,
}

impl LearningStyle {
    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Auditory => "auditory",
            Self::Kinesthetic => "kinesthetic",
            Self::Reading => "reading",
        }
    }

    /// Short instruction for the content generator.
    pub fn delivery_hint(&self) -> &'static str {
        match self {
            Self::Visual => "use diagrams, charts and visual metaphors",
            Self::Auditory => "use a conversational, narrated tone with verbal mnemonics",
            Self::Kinesthetic => "use hands-on exercises and step-by-step activities",
            Self::Reading => "use well-structured prose with clear headings and summaries",
        }
    }
}

impl std::fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse skill bracket of a learner (or the intended audience of content).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Parses an audience label, case-insensitively.
    pub fn from_audience(audience: &str) -> Option<Self> {
        match audience.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }

    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Target difficulty on the 1-10 scale.
    pub fn difficulty(&self) -> u8 {
        match self {
            Self::Beginner => 3,
            Self::Intermediate => 6,
            Self::Advanced => 8,
            Self::Expert => 9,
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate performance signals for a learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Mean completion score (0-150).
    pub average_score: f64,
    /// Fraction of started content that was completed (0-1).
    pub completion_rate: f64,
    /// Preferred difficulty (1-10).
    pub preferred_difficulty: u8,
    /// Lessons completed per week.
    pub learning_velocity: f64,
}

impl PerformanceMetrics {
    /// Creates metrics, validating every bound.
    pub fn new(
        average_score: f64,
        completion_rate: f64,
        preferred_difficulty: u8,
        learning_velocity: f64,
    ) -> Result<Self, ValidationError> {
        if !(0.0..=Score::MAX).contains(&average_score) {
            return Err(ValidationError::out_of_range("average_score", 0.0, Score::MAX, average_score));
        }
        if !(0.0..=1.0).contains(&completion_rate) {
            return Err(ValidationError::out_of_range("completion_rate", 0.0, 1.0, completion_rate));
        }
        if !(1..=10).contains(&preferred_difficulty) {
            return Err(ValidationError::out_of_range(
                "preferred_difficulty",
                1.0,
                10.0,
                f64::from(preferred_difficulty),
            ));
        }
        if learning_velocity < 0.0 || !learning_velocity.is_finite() {
            return Err(ValidationError::out_of_range(
                "learning_velocity",
                0.0,
                f64::MAX,
                learning_velocity,
            ));
        }
        Ok(Self {
            average_score,
            completion_rate,
            preferred_difficulty,
            learning_velocity,
        })
    }
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            average_score: 0.0,
            completion_rate: 0.0,
            preferred_difficulty: 5,
            learning_velocity: 1.0,
        }
    }
}

/// Profile version for tracking updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileVersion(u32);

impl ProfileVersion {
    /// Create initial version (1)
    pub fn initial() -> Self {
        Self(1)
    }

    /// Increment version
    pub fn increment(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Get inner value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Default for ProfileVersion {
    fn default() -> Self {
        Self::initial()
    }
}

/// One entry in the profile's append-only change log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileChange {
    pub version: ProfileVersion,
    pub changed_at: Timestamp,
    pub summary: String,
}

/// Caller-supplied profile fields that take precedence over stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileOverrides {
    #[serde(default)]
    pub learning_style: Option<LearningStyle>,
    #[serde(default)]
    pub skill_level: Option<SkillLevel>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub knowledge_gaps: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub preferred_difficulty: Option<u8>,
}

impl ProfileOverrides {
    /// True when no field would change a profile.
    pub fn is_empty(&self) -> bool {
        self.learning_style.is_none()
            && self.skill_level.is_none()
            && self.interests.is_empty()
            && self.knowledge_gaps.is_empty()
            && self.strengths.is_empty()
            && self.preferred_difficulty.is_none()
    }
}

/// A learner's profile.
///
/// Created on first interaction and never deleted. Every mutation bumps the
/// version and appends to `changes` instead of silently overwriting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: UserId,
    learning_style: LearningStyle,
    skill_level: SkillLevel,
    interests: BTreeSet<String>,
    knowledge_gaps: BTreeSet<String>,
    strengths: BTreeSet<String>,
    performance_metrics: PerformanceMetrics,
    version: ProfileVersion,
    created_at: Timestamp,
    updated_at: Timestamp,
    changes: Vec<ProfileChange>,
}

impl UserProfile {
    /// Creates a fresh profile with default preferences.
    pub fn new(user_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            user_id,
            learning_style: LearningStyle::default(),
            skill_level: SkillLevel::default(),
            interests: BTreeSet::new(),
            knowledge_gaps: BTreeSet::new(),
            strengths: BTreeSet::new(),
            performance_metrics: PerformanceMetrics::default(),
            version: ProfileVersion::initial(),
            created_at: now,
            updated_at: now,
            changes: Vec::new(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn learning_style(&self) -> LearningStyle {
        self.learning_style
    }

    pub fn skill_level(&self) -> SkillLevel {
        self.skill_level
    }

    pub fn interests(&self) -> &BTreeSet<String> {
        &self.interests
    }

    pub fn knowledge_gaps(&self) -> &BTreeSet<String> {
        &self.knowledge_gaps
    }

    pub fn strengths(&self) -> &BTreeSet<String> {
        &self.strengths
    }

    pub fn performance_metrics(&self) -> &PerformanceMetrics {
        &self.performance_metrics
    }

    pub fn version(&self) -> ProfileVersion {
        self.version
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn changes(&self) -> &[ProfileChange] {
        &self.changes
    }

    /// Applies caller-supplied overrides. No-op (and no version bump) when empty.
    pub fn apply_overrides(&mut self, overrides: &ProfileOverrides) -> Result<(), ValidationError> {
        if overrides.is_empty() {
            return Ok(());
        }
        if let Some(difficulty) = overrides.preferred_difficulty {
            if !(1..=10).contains(&difficulty) {
                return Err(ValidationError::out_of_range(
                    "preferred_difficulty",
                    1.0,
                    10.0,
                    f64::from(difficulty),
                ));
            }
            self.performance_metrics.preferred_difficulty = difficulty;
        }
        if let Some(style) = overrides.learning_style {
            self.learning_style = style;
        }
        if let Some(level) = overrides.skill_level {
            self.skill_level = level;
        }
        self.interests.extend(normalized(&overrides.interests));
        self.knowledge_gaps.extend(normalized(&overrides.knowledge_gaps));
        self.strengths.extend(normalized(&overrides.strengths));
        self.record_change("applied request personalization");
        Ok(())
    }

    /// Folds analysis signals into the profile. A topic that became a strength
    /// stops being a gap.
    pub fn record_signals(&mut self, knowledge_gaps: &[String], strengths: &[String]) {
        if knowledge_gaps.is_empty() && strengths.is_empty() {
            return;
        }
        let strengths: Vec<String> = normalized(strengths).collect();
        for strength in &strengths {
            self.knowledge_gaps.remove(strength);
        }
        self.strengths.extend(strengths);
        self.knowledge_gaps.extend(
            normalized(knowledge_gaps).filter(|gap| !self.strengths.contains(gap)),
        );
        self.record_change("recorded performance signals");
    }

    /// Replaces performance metrics.
    pub fn update_metrics(&mut self, metrics: PerformanceMetrics) {
        self.performance_metrics = metrics;
        self.record_change("updated performance metrics");
    }

    fn record_change(&mut self, summary: &str) {
        self.version = self.version.increment();
        self.updated_at = Timestamp::now();
        self.changes.push(ProfileChange {
            version: self.version,
            changed_at: self.updated_at,
            summary: summary.to_string(),
        });
    }
}

fn normalized(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}
