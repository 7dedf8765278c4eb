//! Image-analysis collaborator seam.
//!
//! The camera flow hands a photographed question to an external analyzer and
//! uses whatever it extracted to pre-fill the form draft. The record core
//! treats the result purely as best-effort pre-fill data: nothing downstream
//! depends on any field being present or well-formed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Best-effort fields extracted from a photographed question.
///
/// Fields the analyzer could not determine come back as empty strings, which
/// is also how the upstream JSON response encodes "unknown".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzedQuestion {
    pub question: String,
    pub student_answer: String,
    pub correct_answer: String,
    pub subject: String,
    pub topic: String,
}

/// Failure of the external analyzer. Propagated to the call site as-is; the
/// record core never masks collaborator errors.
#[derive(Debug, Error)]
#[error("image analysis failed: {0}")]
pub struct AnalysisError(pub String);

/// External image analyzer.
///
/// Implementations take a base64-encoded image and return whatever they could
/// extract. The production implementation calls a remote vision model; tests
/// use a canned stub.
pub trait ImageAnalyzer {
    fn analyze(&self, base64_image: &str) -> Result<AnalyzedQuestion, AnalysisError>;
}
