//! Document parsing API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::fixtures;
use common::TestContext;
use question_bank_backend::config::Config;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_parse_sample_document() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/questions/parse")
        .multipart(fixtures::docx_form(fixtures::sample_document()))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Document parsed successfully");
    assert_eq!(body["count"], 2);

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);

    let first = &questions[0];
    assert_eq!(first["questionNumber"], "1");
    assert_eq!(first["content"], "Expand (x + 1)^2.");
    assert_eq!(first["source"], "HKDSE");
    assert_eq!(first["year"], "2020");
    assert_eq!(first["topic"], "Algebra");
    assert_eq!(first["correctAnswer"], "x^2 + 2x + 1");
    assert_eq!(first["markingScheme"], "1. Apply the identity");
    assert!(first["options"].as_array().unwrap().is_empty());

    let second = &questions[1];
    assert_eq!(second["type"], "MC");
    assert_eq!(second["school"], "Queen's College");
    assert_eq!(second["options"], serde_json::json!(["4", "7", "9"]));
    assert_eq!(second["correctAnswer"], 1);
    assert_eq!(second["preview"]["correctAnswerLabel"], "b");
    assert_eq!(
        second["displayText"],
        "Question 2\n\nWhich of the following is prime?\n\n(a) 4\n(b) 7\n(c) 9\n\nCorrect Answer: b"
    );
}

#[tokio::test]
async fn test_parse_template_round_trip() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let template = server.get("/api/questions/template").await;
    template.assert_status_ok();
    let bytes = template.as_bytes().to_vec();

    let response = server
        .post("/api/questions/parse")
        .multipart(fixtures::docx_form(bytes))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 4);
    assert_eq!(questions[2]["type"], "MC");
    assert_eq!(questions[2]["correctAnswer"], 0);
    assert_eq!(questions[3]["textbook"], "New Century Mathematics 4A");
}

#[tokio::test]
async fn test_parse_document_without_questions() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let bytes = fixtures::docx_from_lines(&["Notes for the week", "Source: HKDSE"]);
    let response = server
        .post("/api/questions/parse")
        .multipart(fixtures::docx_form(bytes))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 0);
    assert!(body["questions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_parse_rejects_wrong_file_type() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let form = fixtures::upload_form(b"%PDF-1.7".to_vec(), "paper.pdf", "application/pdf");
    let response = server.post("/api/questions/parse").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
    assert_eq!(
        body["message"],
        "Bad request: Only .doc and .docx files are allowed"
    );
}

#[tokio::test]
async fn test_parse_requires_file() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let form = axum_test::multipart::MultipartForm::new().add_text("note", "no file here");
    let response = server.post("/api/questions/parse").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Bad request: No file uploaded");
}

#[tokio::test]
async fn test_parse_rejects_unreadable_document() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let form = fixtures::upload_form(
        b"not a zip package".to_vec(),
        "broken.docx",
        "application/octet-stream",
    );
    let response = server.post("/api/questions/parse").multipart(form).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "extraction_error");
}

#[tokio::test]
async fn test_parse_respects_upload_limit() {
    let ctx = TestContext::with_config(Config {
        max_upload_bytes: 64,
        ..Config::default()
    });
    let server = ctx.server();

    let response = server
        .post("/api/questions/parse")
        .multipart(fixtures::docx_form(fixtures::sample_document()))
        .await;

    assert!(response.status_code().is_client_error());
}
