//! Form session: draft buffering and submission orchestration.

use crate::analysis::AnalyzedQuestion;
use crate::error::{Result, StoreError};
use crate::schema::{build_record, Draft, DraftField};
use crate::store::RecordStore;
use crate::types::{Difficulty, RootCause, WrongQuestionRecord};
use chrono::Utc;
use std::sync::Arc;

/// Fallback message for non-validation submit failures.
const GENERIC_SUBMIT_ERROR: &str = "提交失败，请稍后再试";

/// Holds one in-progress wrong-question entry and drives submission.
///
/// `submit` validates the draft, persists the built record, resets the draft
/// to defaults and remembers the saved record for summary display. Errors are
/// surfaced twice on purpose: through [`FormSession::error`] for the UI, and
/// as the returned `Err` so the caller can acknowledge the failed submit.
pub struct FormSession {
    store: Arc<RecordStore>,
    draft: Draft,
    submitting: bool,
    error: Option<String>,
    last_saved: Option<WrongQuestionRecord>,
}

impl FormSession {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            store,
            draft: Draft::default(),
            submitting: false,
            error: None,
            last_saved: None,
        }
    }

    /// Start a session pre-filled from an image analysis result.
    pub fn with_prefill(store: Arc<RecordStore>, prefill: AnalyzedQuestion) -> Self {
        let mut session = Self::new(store);
        session.apply_prefill(prefill);
        session
    }

    /// Current draft state.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Replace one text field of the draft. No side effects beyond local
    /// state.
    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn set_root_cause(&mut self, root_cause: RootCause) {
        self.draft.root_cause = root_cause;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.draft.difficulty = difficulty;
    }

    /// Fill draft fields from a best-effort analysis result, keeping existing
    /// input where the analyzer came back empty.
    pub fn apply_prefill(&mut self, prefill: AnalyzedQuestion) {
        let fields = [
            (DraftField::Question, prefill.question),
            (DraftField::StudentAnswer, prefill.student_answer),
            (DraftField::CorrectAnswer, prefill.correct_answer),
            (DraftField::Subject, prefill.subject),
            (DraftField::Topic, prefill.topic),
        ];
        for (field, value) in fields {
            if !value.trim().is_empty() {
                self.draft.set(field, value);
            }
        }
    }

    /// Validate, build and persist the draft as a new record.
    ///
    /// On success the draft resets to defaults and the saved record becomes
    /// the new [`FormSession::summary`] source. On failure the error message
    /// is recorded (validation text verbatim, a generic fallback otherwise)
    /// and the error is returned.
    pub fn submit(&mut self) -> Result<WrongQuestionRecord> {
        self.submitting = true;
        self.error = None;

        let result = build_record(&self.draft, Utc::now())
            .and_then(|record| self.store.save(record));

        self.submitting = false;

        match result {
            Ok(record) => {
                self.last_saved = Some(record.clone());
                self.draft = Draft::default();
                Ok(record)
            }
            Err(e) => {
                self.error = Some(user_message(&e));
                Err(e)
            }
        }
    }

    /// Whether a submit is in flight. Advisory: callers are expected to
    /// disable the submit action while true.
    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// Message from the last failed submit, cleared by the next submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The last successfully saved record.
    pub fn last_saved(&self) -> Option<&WrongQuestionRecord> {
        self.last_saved.as_ref()
    }

    /// Human-readable summary of the last saved record, or `None` before the
    /// first successful submit.
    pub fn summary(&self) -> Option<String> {
        self.last_saved
            .as_ref()
            .map(|record| format!("{} · {}", record.subject, record.topic))
    }
}

fn user_message(error: &StoreError) -> String {
    if error.is_user_facing() {
        error.to_string()
    } else {
        GENERIC_SUBMIT_ERROR.to_string()
    }
}
