//! User module - Learner profile and learning history.
//!
//! The `UserProfile` is a learner-owned aggregate that persists across
//! requests and biases content generation and recommendations.
//!
//! # Domain Invariants
//!
//! 1. Each profile belongs to exactly one user
//! 2. Profiles are never deleted
//! 3. Profile version only increases; every mutation is logged
//! 4. Preferred difficulty stays within 1-10

pub mod history;
pub mod profile;

pub use history::{LearnerStats, LessonOutcome, TopicPerformance};
pub use profile::{
    LearningStyle, PerformanceMetrics, ProfileChange, ProfileOverrides, ProfileVersion,
    SkillLevel, UserProfile,
};

#[cfg(test)]
pub(crate) use history::fixtures;
