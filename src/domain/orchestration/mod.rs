//! Orchestration module - Pure pipeline steps around base generation.
//!
//! - `recommendations` - Ranked next topics for a learner
//! - `enhancement` - Flag-driven content adjustments
//! - `discovery` - Tags, category and engagement factor
//! - `engagement` - Engagement prediction and optimizations
//! - `variations` - Alternate delivery contexts
//! - `analytics` - Confidence and completion heuristics

mod analytics;
mod discovery;
mod engagement;
mod enhancement;
mod recommendations;
mod variations;

pub use analytics::ContentAnalytics;
pub use discovery::{discover, DiscoveryMetadata};
pub use engagement::{
    estimate_engagement, synthetic_history, EngagementEstimate, EngagementOptimization,
};
pub use enhancement::enhance;
pub use recommendations::{recommend_topics, ContentRecommendation, MAX_RECOMMENDATIONS};
pub use variations::{generate_variations, ContentVariation, VariationContext};
