//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from question-core
pub use question_core::types::{
    CorrectAnswer, DraftPreview, LabeledOption, Module, PersistedQuestion, QuestionDraft,
    QuestionType, Source,
};

// === Parse Types ===

/// Parsed draft plus its review rendition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuestion {
    #[serde(flatten)]
    pub draft: QuestionDraft,
    pub display_text: String,
}

impl From<QuestionDraft> for ParsedQuestion {
    fn from(draft: QuestionDraft) -> Self {
        let display_text = question_core::display_text(&draft);
        Self {
            draft,
            display_text,
        }
    }
}

/// Response for POST /api/questions/parse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub message: String,
    pub count: usize,
    pub questions: Vec<ParsedQuestion>,
}

// === Export Types ===

/// Query for GET /api/questions/template
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateQuery {
    pub module: Option<Module>,
}

/// Request for POST /api/questions/export-word
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub questions: Vec<PersistedQuestion>,
    #[serde(default)]
    pub filename: Option<String>,
}

// === Normalize Types ===

/// Response for POST /api/questions/normalize
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeResponse {
    /// "exam", "school", "textbook" or ""
    pub source_type: String,
    pub tags: Vec<String>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
