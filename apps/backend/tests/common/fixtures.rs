//! Test fixtures and factory functions for creating test data.

use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};
use uuid::Uuid;

use question_core::{Document, Paragraph, DOCX_MIME};

/// Build a `.docx` whose paragraphs are the given lines.
pub fn docx_from_lines(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::new();
    for line in lines {
        doc.push(Paragraph::new(*line));
    }
    doc.to_docx().expect("Failed to render test document")
}

/// Two questions: one conventional, one multiple choice.
pub fn sample_document() -> Vec<u8> {
    docx_from_lines(&[
        "Question 1",
        "Expand (x + 1)^2.",
        "Source: HKDSE",
        "Year: 2020",
        "Topic: Algebra",
        "Correct Answer: x^2 + 2x + 1",
        "Marking Scheme:",
        "1. Apply the identity",
        "Question 2",
        "Which of the following is prime?",
        "(a) 4",
        "(b) 7",
        "(c) 9",
        "Source: School Mock",
        "School: Queen's College",
        "Topic: Number",
        "Correct Answer: b",
    ])
}

/// Multipart form carrying a single `file` part.
pub fn upload_form(bytes: Vec<u8>, file_name: &str, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes).file_name(file_name).mime_type(mime),
    )
}

/// Multipart form carrying a `.docx` upload.
pub fn docx_form(bytes: Vec<u8>) -> MultipartForm {
    upload_form(bytes, "questions.docx", DOCX_MIME)
}

/// A persisted conventional question in wire form.
pub fn conventional_question(content: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "module": "compulsory",
        "source": "HKDSE",
        "year": "2019",
        "type": "Conventional",
        "topic": "Quadratic Equations",
        "content": content,
        "correctAnswer": "x = -2, x = -3"
    })
}

/// A persisted multiple-choice question in wire form.
pub fn mc_question(options: &[&str], answer: i64) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "source": "School Exam",
        "school": "St. Paul's College",
        "year": "2021",
        "type": "MC",
        "topic": "Geometry",
        "content": "What is the length of the other side?",
        "options": options,
        "correctAnswer": answer
    })
}
