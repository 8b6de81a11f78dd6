//! Templated, data-driven reply builders. One builder per intent.

use serde::{Deserialize, Serialize};

use crate::domain::user::{LearnerStats, SkillLevel, UserProfile};

use super::intent::Intent;

const MOTIVATION_LINES: &[&str] = &[
    "Every lesson you finish compounds. Keep stacking them.",
    "Progress beats perfection. One focused session today is enough.",
    "You have already done the hardest part: starting. Let's keep going.",
    "Small, steady steps build real mastery.",
];

const WEEKDAYS: &[&str] = &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Everything a reply builder reads.
#[derive(Debug, Clone, Copy)]
pub struct TutorContext<'a> {
    pub profile: &'a UserProfile,
    pub stats: &'a LearnerStats,
}

/// One session of a study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub day: String,
    pub focus: String,
    pub minutes: u32,
}

/// A weekly study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub daily_minutes: u32,
    pub sessions: Vec<StudySession>,
}

/// Reply to one chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorReply {
    pub intent: Intent,
    pub message: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_content: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_plan: Option<StudyPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
}

impl TutorReply {
    fn new(intent: Intent, message: String, suggestions: Vec<String>) -> Self {
        Self {
            intent,
            message,
            suggestions,
            recommended_content: None,
            insights: None,
            study_plan: None,
            motivation: None,
        }
    }
}

/// Renders the reply for `intent`.
pub fn build_reply(intent: Intent, ctx: TutorContext<'_>) -> TutorReply {
    match intent {
        Intent::RecommendNext => recommend_next(ctx),
        Intent::ShowProgress => show_progress(ctx),
        Intent::ProvideHelp => provide_help(ctx),
        Intent::CreatePlan => create_plan(ctx),
        Intent::Motivate => motivate(ctx),
        Intent::ShowInsights => show_insights(ctx),
        Intent::GeneralChat => general_chat(ctx),
    }
}

fn recommend_next(ctx: TutorContext<'_>) -> TutorReply {
    let mut recommended: Vec<String> = Vec::new();
    for weak in ctx.stats.improvement_areas() {
        recommended.push(format!("Review: {}", weak.topic));
    }
    for strong in ctx.stats.strong_topics() {
        recommended.push(format!("Advanced {}", strong.topic));
    }
    for gap in ctx.profile.knowledge_gaps().iter().take(2) {
        recommended.push(format!("Foundations of {}", gap));
    }
    for interest in ctx.profile.interests().iter().take(2) {
        recommended.push(format!("Intro to {}", interest));
    }
    if recommended.is_empty() {
        recommended.push("Getting started: learning how to learn".to_string());
    }
    recommended.dedup();

    let message = if ctx.stats.is_new_learner() {
        "Welcome! Since you're just getting started, here is a good first step.".to_string()
    } else {
        format!(
            "Based on your {} completed lessons, here's what I'd study next.",
            ctx.stats.lesson_count
        )
    };

    let mut reply = TutorReply::new(
        Intent::RecommendNext,
        message,
        vec![
            format!("Start with \"{}\"", recommended[0]),
            "Show my progress".to_string(),
            "Create a study plan".to_string(),
        ],
    );
    reply.recommended_content = Some(recommended);
    reply
}

fn show_progress(ctx: TutorContext<'_>) -> TutorReply {
    let stats = ctx.stats;
    let message = if stats.is_new_learner() {
        "You haven't completed any lessons yet. Your progress will show up here.".to_string()
    } else {
        format!(
            "You've completed {} lessons with an average amazingness of {:.0}/150 and a {}-day streak.",
            stats.lesson_count, stats.mean_amazingness, stats.streak_days
        )
    };

    let mut suggestions = vec!["What should I learn next?".to_string()];
    if let Some(strong) = stats.strong_topics().first() {
        suggestions.push(format!("Go deeper into {}", strong.topic));
    }
    if let Some(weak) = stats.improvement_areas().first() {
        suggestions.push(format!("Review {}", weak.topic));
    }
    suggestions.push("Show my learning insights".to_string());
    suggestions.push("Create a study plan".to_string());

    TutorReply::new(Intent::ShowProgress, message, suggestions)
}

fn provide_help(ctx: TutorContext<'_>) -> TutorReply {
    let hint = ctx.profile.learning_style().delivery_hint();
    let message = format!(
        "Getting stuck is part of learning. As a {} learner, try to {}. Tell me the concept and I'll break it down.",
        ctx.profile.learning_style(),
        hint
    );
    let mut suggestions = vec![
        "Explain it with a simpler example".to_string(),
        "Break the topic into smaller steps".to_string(),
        "Give me a practice exercise".to_string(),
    ];
    if let Some(weak) = ctx.stats.improvement_areas().first() {
        suggestions.push(format!("Review the basics of {}", weak.topic));
    }
    TutorReply::new(Intent::ProvideHelp, message, suggestions)
}

fn create_plan(ctx: TutorContext<'_>) -> TutorReply {
    let daily_minutes = match ctx.profile.skill_level() {
        SkillLevel::Beginner => 20,
        SkillLevel::Intermediate => 30,
        SkillLevel::Advanced => 40,
        SkillLevel::Expert => 45,
    };

    let mut focus: Vec<String> = ctx
        .stats
        .improvement_areas()
        .iter()
        .map(|t| format!("Review {}", t.topic))
        .collect();
    focus.extend(ctx.profile.knowledge_gaps().iter().map(|g| format!("Close gap: {}", g)));
    focus.extend(ctx.stats.strong_topics().iter().map(|t| format!("Deepen {}", t.topic)));
    focus.extend(ctx.profile.interests().iter().map(|i| format!("Explore {}", i)));
    if focus.is_empty() {
        focus.push("Core fundamentals".to_string());
    }

    let sessions = WEEKDAYS
        .iter()
        .enumerate()
        .map(|(i, day)| StudySession {
            day: (*day).to_string(),
            focus: focus[i % focus.len()].clone(),
            minutes: daily_minutes,
        })
        .collect();

    let mut reply = TutorReply::new(
        Intent::CreatePlan,
        format!(
            "Here's a 5-day plan with {} minutes a day, tuned to your {} level.",
            daily_minutes,
            ctx.profile.skill_level()
        ),
        vec![
            "Make the sessions shorter".to_string(),
            "Add a weekend review".to_string(),
            "What should I learn next?".to_string(),
        ],
    );
    reply.study_plan = Some(StudyPlan {
        daily_minutes,
        sessions,
    });
    reply
}

fn motivate(ctx: TutorContext<'_>) -> TutorReply {
    let line = MOTIVATION_LINES[ctx.stats.lesson_count % MOTIVATION_LINES.len()];
    let message = if ctx.stats.streak_days > 1 {
        format!("You're on a {}-day streak. {}", ctx.stats.streak_days, line)
    } else if ctx.stats.lesson_count > 0 {
        format!("{} lessons done so far. {}", ctx.stats.lesson_count, line)
    } else {
        line.to_string()
    };

    let mut reply = TutorReply::new(
        Intent::Motivate,
        message,
        vec![
            "Give me a quick 5-minute lesson".to_string(),
            "Show my progress".to_string(),
            "Create a study plan".to_string(),
        ],
    );
    reply.motivation = Some(line.to_string());
    reply
}

fn show_insights(ctx: TutorContext<'_>) -> TutorReply {
    let stats = ctx.stats;
    let mut insights = Vec::new();
    if stats.is_new_learner() {
        insights.push("Complete a few lessons to unlock personal insights.".to_string());
    } else {
        insights.push(format!(
            "Average amazingness: {:.0}/150 across {} lessons.",
            stats.mean_amazingness, stats.lesson_count
        ));
        let strong: Vec<&str> = stats.strong_topics().iter().map(|t| t.topic.as_str()).collect();
        if !strong.is_empty() {
            insights.push(format!("You excel at: {}.", strong.join(", ")));
        }
        let weak: Vec<&str> = stats
            .improvement_areas()
            .iter()
            .map(|t| t.topic.as_str())
            .collect();
        if !weak.is_empty() {
            insights.push(format!("Room to grow in: {}.", weak.join(", ")));
        }
        if stats.streak_days > 0 {
            insights.push(format!("Current streak: {} days.", stats.streak_days));
        }
    }
    insights.push(format!(
        "You learn best with a {} style.",
        ctx.profile.learning_style()
    ));

    let mut reply = TutorReply::new(
        Intent::ShowInsights,
        "Here's what your learning history shows.".to_string(),
        vec![
            "What should I learn next?".to_string(),
            "Create a study plan".to_string(),
            "How am I doing?".to_string(),
        ],
    );
    reply.insights = Some(insights);
    reply
}

fn general_chat(_ctx: TutorContext<'_>) -> TutorReply {
    TutorReply::new(
        Intent::GeneralChat,
        "I'm your learning assistant. I can recommend what to study, track your progress, build a plan or help when you're stuck.".to_string(),
        vec![
            "What should I learn next?".to_string(),
            "How am I doing?".to_string(),
            "Create a study plan".to_string(),
            "I need help".to_string(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::user::fixtures::outcomes_now;

    const ALL_INTENTS: &[Intent] = &[
        Intent::RecommendNext,
        Intent::ShowProgress,
        Intent::ProvideHelp,
        Intent::CreatePlan,
        Intent::Motivate,
        Intent::ShowInsights,
        Intent::GeneralChat,
    ];

    fn stats_from(scores: &[(&str, f64)]) -> LearnerStats {
        LearnerStats::from_outcomes(&outcomes_now(scores), Timestamp::now().date())
    }

    fn profile() -> UserProfile {
        UserProfile::new(UserId::new("u-1").unwrap())
    }

    #[test]
    fn every_reply_has_three_to_six_suggestions() {
        let profile = profile();
        for stats in [stats_from(&[]), stats_from(&[("rust", 140.0), ("sql", 30.0)])] {
            let ctx = TutorContext {
                profile: &profile,
                stats: &stats,
            };
            for intent in ALL_INTENTS {
                let reply = build_reply(*intent, ctx);
                assert_eq!(reply.intent, *intent);
                assert!(
                    (3..=6).contains(&reply.suggestions.len()),
                    "{} had {} suggestions",
                    intent,
                    reply.suggestions.len()
                );
            }
        }
    }

    #[test]
    fn recommendations_review_weak_and_extend_strong_topics() {
        let profile = profile();
        let stats = stats_from(&[("rust", 140.0), ("sql", 30.0)]);
        let reply = build_reply(Intent::RecommendNext, TutorContext { profile: &profile, stats: &stats });
        let recommended = reply.recommended_content.unwrap();
        assert_eq!(recommended[0], "Review: sql");
        assert!(recommended.contains(&"Advanced rust".to_string()));
    }

    #[test]
    fn progress_reports_aggregate_stats() {
        let profile = profile();
        let stats = stats_from(&[("rust", 80.0), ("rust", 60.0)]);
        let reply = build_reply(Intent::ShowProgress, TutorContext { profile: &profile, stats: &stats });
        assert!(reply.message.contains("2 lessons"));
        assert!(reply.message.contains("70/150"));
        assert!(reply.message.contains("1-day streak"));
    }

    #[test]
    fn motivation_rotates_with_lesson_count() {
        let profile = profile();
        let one = stats_from(&[("a", 50.0)]);
        let two = stats_from(&[("a", 50.0), ("b", 50.0)]);
        let first = build_reply(Intent::Motivate, TutorContext { profile: &profile, stats: &one });
        let second = build_reply(Intent::Motivate, TutorContext { profile: &profile, stats: &two });
        assert_ne!(first.motivation, second.motivation);
        let again = build_reply(Intent::Motivate, TutorContext { profile: &profile, stats: &one });
        assert_eq!(first, again);
    }

    #[test]
    fn plan_has_five_sessions_sized_by_skill() {
        let profile = profile();
        let stats = stats_from(&[("sql", 30.0)]);
        let reply = build_reply(Intent::CreatePlan, TutorContext { profile: &profile, stats: &stats });
        let plan = reply.study_plan.unwrap();
        assert_eq!(plan.daily_minutes, 20);
        assert_eq!(plan.sessions.len(), 5);
        assert_eq!(plan.sessions[0].focus, "Review sql");
    }

    #[test]
    fn insights_name_strong_and_weak_topics() {
        let profile = profile();
        let stats = stats_from(&[("rust", 140.0), ("sql", 30.0)]);
        let reply = build_reply(Intent::ShowInsights, TutorContext { profile: &profile, stats: &stats });
        let insights = reply.insights.unwrap();
        assert!(insights.iter().any(|i| i.contains("You excel at: rust")));
        assert!(insights.iter().any(|i| i.contains("Room to grow in: sql")));
    }
}
