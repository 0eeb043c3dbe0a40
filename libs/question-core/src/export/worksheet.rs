//! Printable worksheet for a selection of questions.

use tracing::debug;

use super::{Document, Paragraph, ParagraphStyle};
use crate::error::{ExportError, Result};
use crate::metadata::option_letter;
use crate::types::PersistedQuestion;
use crate::validation::validate;

pub const WORKSHEET_FILENAME: &str = "math_questions.docx";

/// Blank paragraphs left for working on non-MC questions.
pub const WORKING_SPACE_LINES: usize = 3;

pub const ANSWER_LINE: &str = "Answer: __________";

/// Build the worksheet document, in the order the questions are given.
///
/// Every question is validated first; nothing is built if any fails.
pub fn build_worksheet(questions: &[PersistedQuestion]) -> Result<Document> {
    if questions.is_empty() {
        return Err(ExportError::EmptyQuestionList);
    }
    for (i, question) in questions.iter().enumerate() {
        validate(question).map_err(|source| ExportError::InvalidQuestion {
            position: i + 1,
            source,
        })?;
    }

    let mut doc = Document::new();
    doc.push(
        Paragraph::styled("Math Worksheet", ParagraphStyle::Title)
            .centered()
            .spacing(400),
    );

    for (i, question) in questions.iter().enumerate() {
        let content = question.content.replace('\n', " ");
        doc.push(Paragraph::new(format!("{}. {}", i + 1, content)).spacing(200));

        if question.is_multiple_choice() && !question.options.is_empty() {
            for (idx, option) in question.options.iter().enumerate() {
                doc.push(Paragraph::new(format!("   ({}) {}", option_letter(idx), option)));
            }
            doc.push(Paragraph::new(ANSWER_LINE).spacing(300));
        } else {
            doc.extend((0..WORKING_SPACE_LINES).map(|_| Paragraph::blank().spacing(200)));
        }
    }

    debug!(questions = questions.len(), "built worksheet");
    Ok(doc)
}

/// Render the worksheet as `.docx` bytes.
pub fn render_worksheet(questions: &[PersistedQuestion]) -> Result<Vec<u8>> {
    build_worksheet(questions)?.to_docx()
}
