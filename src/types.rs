//! Core types for the record store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a record.
///
/// Random (UUID v4) rather than derived from the creation timestamp, so two
/// rapid submits can never collide.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        RecordId(Uuid::new_v4())
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Self-assessed difficulty of a wrong question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Days until the next review. Harder questions come back sooner.
    pub fn review_offset_days(self) -> i64 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 3,
            Difficulty::Hard => 1,
        }
    }

    /// Display label for option groups.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "基础",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "拔高",
        }
    }

    /// All options, in display order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// Why the question was answered wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootCause {
    Concept,
    Careless,
    Calculation,
    Memory,
    Other,
}

impl RootCause {
    /// Display label for option groups.
    pub fn label(self) -> &'static str {
        match self {
            RootCause::Concept => "概念模糊",
            RootCause::Careless => "粗心疏漏",
            RootCause::Calculation => "计算错误",
            RootCause::Memory => "记忆缺失",
            RootCause::Other => "其他",
        }
    }

    /// All options, in display order.
    pub const ALL: [RootCause; 5] = [
        RootCause::Concept,
        RootCause::Careless,
        RootCause::Calculation,
        RootCause::Memory,
        RootCause::Other,
    ];
}

impl Default for RootCause {
    fn default() -> Self {
        RootCause::Concept
    }
}

/// One captured wrong-question entry. Immutable once built.
///
/// Serialized field names stay camelCase so the persisted layout matches the
/// `loop::wrong-questions` collection shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongQuestionRecord {
    pub id: RecordId,
    pub subject: String,
    pub topic: String,
    pub question: String,
    pub correct_answer: String,
    pub student_answer: String,
    pub root_cause: RootCause,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    /// Absent (not empty) when the user left the field blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub next_review_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> WrongQuestionRecord {
        WrongQuestionRecord {
            id: RecordId::generate(),
            subject: "数学".into(),
            topic: "导数".into(),
            question: "求 f(x)=x^2 的导数".into(),
            correct_answer: "f'(x)=2x".into(),
            student_answer: "x".into(),
            root_cause: RootCause::Concept,
            difficulty: Difficulty::Hard,
            tags: vec!["微积分".into()],
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            next_review_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_review_offsets() {
        assert_eq!(Difficulty::Easy.review_offset_days(), 5);
        assert_eq!(Difficulty::Medium.review_offset_days(), 3);
        assert_eq!(Difficulty::Hard.review_offset_days(), 1);
    }

    #[test]
    fn test_record_json_shape() {
        let record = sample_record();
        let json = serde_json::to_value(&record).unwrap();

        // camelCase keys, enums as lowercase strings, RFC 3339 timestamps
        assert_eq!(json["studentAnswer"], "x");
        assert_eq!(json["rootCause"], "concept");
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["nextReviewAt"], "2024-01-02T00:00:00Z");
    }

    #[test]
    fn test_blank_notes_serialized_as_absent() {
        let record = sample_record();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_record_roundtrip_without_notes() {
        // Old payloads without the key must still deserialize.
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: WrongQuestionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
        assert_eq!(parsed.notes, None);
    }

    #[test]
    fn test_option_labels() {
        assert_eq!(Difficulty::ALL.len(), 3);
        assert_eq!(Difficulty::Hard.label(), "拔高");
        assert_eq!(RootCause::ALL.len(), 5);
        assert_eq!(RootCause::Careless.label(), "粗心疏漏");
    }

    #[test]
    fn test_enum_wire_form_is_lowercase() {
        assert_eq!(serde_json::to_value(Difficulty::Easy).unwrap(), "easy");
        assert_eq!(serde_json::to_value(RootCause::Calculation).unwrap(), "calculation");
        let parsed: Difficulty = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Difficulty::Medium);
    }

    #[test]
    fn test_record_id_display() {
        let id = RecordId::generate();
        assert_eq!(format!("{}", id), id.0.to_string());
    }
}
