//! Adaptive Content - Personalized learning content that improves itself
//!
//! This crate generates learning content tailored to each learner, records
//! how learners do with it, and rewrites underperforming content from that
//! telemetry and from current research.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
