//! Tutor module - Intent classification and reply builders for the
//! conversational learning assistant.

mod intent;
mod replies;

pub use intent::{classify_intent, Intent, IntentRule, INTENT_RULES};
pub use replies::{build_reply, StudyPlan, StudySession, TutorContext, TutorReply};
