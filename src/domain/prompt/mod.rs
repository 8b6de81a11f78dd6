//! Prompt module - Deterministic prompt construction.
//!
//! Everything here is pure: identical inputs always produce an identical
//! `PromptSpec`, which keeps generation reproducible and mock output stable.

mod builder;

pub use builder::{PromptBuilder, PromptSpec, PromptTask, RelatedAsset, MAX_ASSETS, MAX_ASSET_CHARS};
