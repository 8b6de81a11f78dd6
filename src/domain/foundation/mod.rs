//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the content pipeline.

mod errors;
mod ids;
mod rating;
mod score;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{CompletionId, ContentId, UserId};
pub use rating::{SatisfactionRating, TenPointRating};
pub use score::{Amazingness, QualityBand, Score};
pub use timestamp::Timestamp;
