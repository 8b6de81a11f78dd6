//! Bounded learner ratings collected on lesson completion.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Satisfaction rating on a 1 (hated it) to 5 (loved it) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SatisfactionRating(u8);

impl SatisfactionRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a rating, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        check_range("satisfaction_rating", value, Self::MIN, Self::MAX)?;
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SatisfactionRating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<SatisfactionRating> for u8 {
    fn from(rating: SatisfactionRating) -> Self {
        rating.0
    }
}

impl fmt::Display for SatisfactionRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// Ten-point rating used for perceived difficulty and engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TenPointRating(u8);

impl TenPointRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates a rating for the named field, returning error if out of range.
    pub fn try_new(field: &str, value: u8) -> Result<Self, ValidationError> {
        check_range(field, value, Self::MIN, Self::MAX)?;
        Ok(Self(value))
    }

    /// Creates a rating, clamping to the valid range.
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for TenPointRating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new("rating", value)
    }
}

impl From<TenPointRating> for u8 {
    fn from(rating: TenPointRating) -> Self {
        rating.0
    }
}

impl fmt::Display for TenPointRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

fn check_range(field: &str, value: u8, min: u8, max: u8) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::out_of_range(
            field,
            f64::from(min),
            f64::from(max),
            f64::from(value),
        ));
    }
    Ok(())
}
