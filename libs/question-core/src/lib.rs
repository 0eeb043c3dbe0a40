//! Core question bank library shared by the backend and other callers.
//!
//! Provides:
//! - Line-oriented parser turning extracted document text into question drafts
//! - Word document export (upload template, printable worksheet)
//! - Source classification and tag derivation
//! - Export preconditions for persisted questions
//! - Shared types (QuestionDraft, PersistedQuestion, Module, Source, etc.)

pub mod error;
pub mod export;
pub mod metadata;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ExportError, Result, ValidationError};
pub use export::{
    build_template, build_worksheet, render_template, render_worksheet, Document, Paragraph,
    ParagraphStyle, DOCX_MIME, TEMPLATE_FILENAME, WORKSHEET_FILENAME,
};
pub use metadata::{answer_index, format_tags, option_letter, source_type, SourceType};
pub use parser::{display_text, parse, parse_text};
pub use types::{
    CorrectAnswer, DraftPreview, LabeledOption, Module, PersistedQuestion, QuestionDraft,
    QuestionType, Source,
};
pub use validation::validate;
