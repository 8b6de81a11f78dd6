//! Stored content items and their revision history.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::ImprovementArea;
use crate::domain::foundation::{ContentId, Timestamp};

use super::generated::GeneratedContent;
use super::request::ContentType;

/// Why a content item was rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTrigger {
    /// Mean performance fell below the regeneration threshold.
    Performance,
    /// Fresh research was merged into the content.
    Research,
    /// An operator asked for a rewrite.
    Manual,
}

/// One entry of the append-only improvement log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementLogEntry {
    pub timestamp: Timestamp,
    pub revision: u32,
    pub areas: Vec<ImprovementArea>,
    pub trigger: RefreshTrigger,
    pub feedback_count: usize,
    pub research_updates_applied: usize,
}

/// A numbered snapshot of a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRevision {
    pub number: u32,
    pub content: GeneratedContent,
    pub created_at: Timestamp,
}

/// Revision about to be committed together with its log entry.
///
/// The revision number and log entry number are assigned on commit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRevision {
    pub content: GeneratedContent,
    pub areas: Vec<ImprovementArea>,
    pub trigger: RefreshTrigger,
    pub feedback_count: usize,
    pub research_updates_applied: usize,
}

/// A persisted content item.
///
/// Revisions are never overwritten: every rewrite appends a new one and an
/// improvement log entry in the same step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    id: ContentId,
    content_type: ContentType,
    topic: String,
    audience: String,
    revisions: Vec<ContentRevision>,
    improvement_log: Vec<ImprovementLogEntry>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ContentItem {
    /// Creates an item whose first revision is `content`.
    pub fn new(
        id: ContentId,
        content_type: ContentType,
        topic: impl Into<String>,
        audience: impl Into<String>,
        content: GeneratedContent,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            content_type,
            topic: topic.into(),
            audience: audience.into(),
            revisions: vec![ContentRevision {
                number: 1,
                content,
                created_at: now,
            }],
            improvement_log: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> ContentId {
        self.id
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn revisions(&self) -> &[ContentRevision] {
        &self.revisions
    }

    pub fn improvement_log(&self) -> &[ImprovementLogEntry] {
        &self.improvement_log
    }

    /// The latest revision.
    pub fn current(&self) -> &ContentRevision {
        // `new` seeds revision 1 and revisions are only ever appended.
        &self.revisions[self.revisions.len() - 1]
    }

    /// Latest revision number.
    pub fn revision_number(&self) -> u32 {
        self.current().number
    }

    /// Appends a revision and its log entry, returning the new revision number.
    pub fn commit(&mut self, revision: NewRevision, now: Timestamp) -> u32 {
        let number = self.revision_number() + 1;
        self.revisions.push(ContentRevision {
            number,
            content: revision.content,
            created_at: now,
        });
        self.improvement_log.push(ImprovementLogEntry {
            timestamp: now,
            revision: number,
            areas: revision.areas,
            trigger: revision.trigger,
            feedback_count: revision.feedback_count,
            research_updates_applied: revision.research_updates_applied,
        });
        self.updated_at = now;
        number
    }

    /// True when the item changed at or after `since`.
    pub fn updated_since(&self, since: Timestamp) -> bool {
        !self.updated_at.is_before(&since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::generated::fixtures::sample_content;

    fn item() -> ContentItem {
        ContentItem::new(
            ContentId::new(),
            ContentType::Lesson,
            "Ownership",
            "intermediate",
            sample_content(),
            Timestamp::from_unix_secs(1_705_276_800),
        )
    }

    fn rewrite(title: &str) -> NewRevision {
        let mut content = sample_content();
        content.title = title.to_string();
        NewRevision {
            content,
            areas: vec![ImprovementArea::Clarity],
            trigger: RefreshTrigger::Performance,
            feedback_count: 3,
            research_updates_applied: 0,
        }
    }

    #[test]
    fn new_item_starts_at_revision_one() {
        let item = item();
        assert_eq!(item.revision_number(), 1);
        assert!(item.improvement_log().is_empty());
    }

    #[test]
    fn commit_appends_revision_and_log_entry() {
        let mut item = item();
        let now = Timestamp::from_unix_secs(1_705_363_200);
        let number = item.commit(rewrite("Ownership, revisited"), now);

        assert_eq!(number, 2);
        assert_eq!(item.revisions().len(), 2);
        assert_eq!(item.revisions()[0].content.title, "Intro to Ownership");
        assert_eq!(item.current().content.title, "Ownership, revisited");
        assert_eq!(item.improvement_log().len(), 1);
        assert_eq!(item.improvement_log()[0].revision, 2);
        assert_eq!(item.improvement_log()[0].feedback_count, 3);
        assert_eq!(item.updated_at(), now);
    }

    #[test]
    fn revision_numbers_increase_monotonically() {
        let mut item = item();
        let numbers: Vec<u32> = (0..3)
            .map(|i| item.commit(rewrite(&format!("v{}", i)), Timestamp::now()))
            .collect();
        assert_eq!(numbers, vec![2, 3, 4]);
    }

    #[test]
    fn updated_since_is_inclusive() {
        let item = item();
        assert!(item.updated_since(item.updated_at()));
        assert!(!item.updated_since(item.updated_at().plus_days(1)));
    }
}
