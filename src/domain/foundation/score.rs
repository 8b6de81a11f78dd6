//! Score scales used across the pipeline.
//!
//! There is one scale, 0-150. A completion score is recorded on it directly
//! and every quality judgement (content status, regeneration trigger,
//! strong/weak topics) compares raw means against its thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A completion score between 0 and 150 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = Amazingness::MAX;

    /// Creates a Score, returning error if out of range or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "score",
                Self::MIN,
                Self::MAX,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// The same value, typed for band classification.
    pub fn amazingness(&self) -> Amazingness {
        Amazingness::new(self.0)
    }
}

impl TryFrom<f64> for Score {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Composite quality value on the 0-150 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amazingness(f64);

impl Amazingness {
    pub const MAX: f64 = 150.0;
    /// Mean at or above this is "amazing".
    pub const AMAZING_THRESHOLD: f64 = 110.0;
    /// Mean at or above this is "good"; below it content is regenerated.
    pub const GOOD_THRESHOLD: f64 = 90.0;

    /// Wraps a value already on this scale, clamping to 0..=150.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, Self::MAX))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Classifies this value into a quality band.
    pub fn band(&self) -> QualityBand {
        QualityBand::classify(self.0)
    }
}

impl fmt::Display for Amazingness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Quality band derived from a mean amazingness value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBand {
    Amazing,
    Good,
    NeedsImprovement,
}

impl QualityBand {
    /// Classifies a value on the amazingness scale.
    pub fn classify(amazingness: f64) -> Self {
        if amazingness >= Amazingness::AMAZING_THRESHOLD {
            QualityBand::Amazing
        } else if amazingness >= Amazingness::GOOD_THRESHOLD {
            QualityBand::Good
        } else {
            QualityBand::NeedsImprovement
        }
    }

    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityBand::Amazing => "amazing",
            QualityBand::Good => "good",
            QualityBand::NeedsImprovement => "needs_improvement",
        }
    }
}

impl fmt::Display for QualityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
