//! Learner handlers.
//!
//! Tutor chat, practice questions and history insights. None of these write
//! content.

mod generate_questions;
mod learner_insights;
mod tutor_assistant;

pub use generate_questions::{GenerateQuestions, QuestionRequest};
pub use learner_insights::{LearnerInsights, LearnerInsightsView};
pub use tutor_assistant::TutorAssistant;
