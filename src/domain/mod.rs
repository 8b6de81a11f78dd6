//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, scores, errors)
//! - `user` - Learner profile and learning history
//! - `content` - Content requests, generated content, revisions, completions
//! - `analysis` - Performance analysis and improvement suggestions
//! - `research` - Freshness updates and their expiry
//! - `prompt` - Deterministic prompt construction
//! - `orchestration` - Pure steps of the content pipeline
//! - `tutor` - Intent classification and tutor replies

pub mod analysis;
pub mod content;
pub mod foundation;
pub mod orchestration;
pub mod prompt;
pub mod research;
pub mod tutor;
pub mod user;
