//! Draft validation and record building.
//!
//! A [`Draft`] is the mutable, not-yet-validated form state. [`build_record`]
//! turns it into an immutable [`WrongQuestionRecord`], rejecting drafts with
//! blank required fields and deriving the next review date from the
//! self-assessed difficulty.

use crate::error::{Result, StoreError};
use crate::types::{Difficulty, RecordId, RootCause, WrongQuestionRecord};
use chrono::{DateTime, Duration, Utc};

/// Mutable form state, as the user typed it.
///
/// `tags` holds the raw comma-separated input; it is split at build time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    pub subject: String,
    pub topic: String,
    pub question: String,
    pub correct_answer: String,
    pub student_answer: String,
    pub root_cause: RootCause,
    pub difficulty: Difficulty,
    pub tags: String,
    pub notes: String,
}

/// Text fields of a draft, for generic field updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    Subject,
    Topic,
    Question,
    CorrectAnswer,
    StudentAnswer,
    Tags,
    Notes,
}

impl Draft {
    /// Replace one text field.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Subject => self.subject = value,
            DraftField::Topic => self.topic = value,
            DraftField::Question => self.question = value,
            DraftField::CorrectAnswer => self.correct_answer = value,
            DraftField::StudentAnswer => self.student_answer = value,
            DraftField::Tags => self.tags = value,
            DraftField::Notes => self.notes = value,
        }
    }
}

/// Required fields checked by [`build_record`], with their serialized names.
const REQUIRED_FIELDS: [(DraftField, &str); 4] = [
    (DraftField::Subject, "subject"),
    (DraftField::Topic, "topic"),
    (DraftField::Question, "question"),
    (DraftField::StudentAnswer, "studentAnswer"),
];

fn field_value<'a>(draft: &'a Draft, field: DraftField) -> &'a str {
    match field {
        DraftField::Subject => &draft.subject,
        DraftField::Topic => &draft.topic,
        DraftField::Question => &draft.question,
        DraftField::CorrectAnswer => &draft.correct_answer,
        DraftField::StudentAnswer => &draft.student_answer,
        DraftField::Tags => &draft.tags,
        DraftField::Notes => &draft.notes,
    }
}

/// Split comma-separated tag input, trimming each piece and dropping empties.
/// Order is preserved; duplicates are kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Validate a draft and build an immutable record created at `now`.
///
/// Fails with [`StoreError::Validation`] naming every required field that is
/// blank after trimming, not just the first.
pub fn build_record(draft: &Draft, now: DateTime<Utc>) -> Result<WrongQuestionRecord> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|(field, _)| field_value(draft, *field).trim().is_empty())
        .map(|(_, name)| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(StoreError::Validation { fields: missing });
    }

    let notes = draft.notes.trim();

    Ok(WrongQuestionRecord {
        id: RecordId::generate(),
        subject: draft.subject.trim().to_string(),
        topic: draft.topic.trim().to_string(),
        question: draft.question.trim().to_string(),
        correct_answer: draft.correct_answer.trim().to_string(),
        student_answer: draft.student_answer.trim().to_string(),
        root_cause: draft.root_cause,
        difficulty: draft.difficulty,
        tags: parse_tags(&draft.tags),
        notes: (!notes.is_empty()).then(|| notes.to_string()),
        created_at: now,
        next_review_at: now + Duration::days(draft.difficulty.review_offset_days()),
    })
}
