//! Question document endpoints

use axum::{
    extract::{Multipart, Query},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use question_core::{
    format_tags, metadata::source_type_str, render_template, render_worksheet, validate,
    DOCX_MIME, TEMPLATE_FILENAME, WORKSHEET_FILENAME,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::extract;

const DOC_MIME: &str = "application/msword";

/// POST /api/questions/parse
/// Extracts the uploaded Word document and parses it into question drafts
pub async fn parse(mut multipart: Multipart) -> Result<Json<ParseResponse>> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        ensure_word_document(file_name.as_deref(), content_type.as_deref())?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    let (line_count, drafts) = tokio::task::spawn_blocking(move || {
        let lines = extract::extract_lines(&bytes)?;
        Ok::<_, ApiError>((lines.len(), question_core::parse(&lines)))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    tracing::info!(
        file = file_name.as_deref().unwrap_or("<unnamed>"),
        lines = line_count,
        questions = drafts.len(),
        "Parsed uploaded document"
    );

    Ok(Json(ParseResponse {
        message: "Document parsed successfully".to_string(),
        count: drafts.len(),
        questions: drafts.into_iter().map(ParsedQuestion::from).collect(),
    }))
}

/// GET /api/questions/template
pub async fn template(Query(query): Query<TemplateQuery>) -> Result<Response> {
    let bytes = render_template(query.module)?;
    tracing::info!(module = ?query.module, bytes = bytes.len(), "Generated upload template");
    Ok(docx_response(bytes, TEMPLATE_FILENAME))
}

/// POST /api/questions/export-word
/// Renders the given questions as a worksheet, all or nothing
pub async fn export_word(Json(request): Json<ExportRequest>) -> Result<Response> {
    let filename = match request.filename.as_deref() {
        Some(name) => sanitize_filename(name)?,
        None => WORKSHEET_FILENAME.to_string(),
    };

    let bytes = render_worksheet(&request.questions)?;
    tracing::info!(
        questions = request.questions.len(),
        bytes = bytes.len(),
        "Exported worksheet"
    );
    Ok(docx_response(bytes, &filename))
}

/// POST /api/questions/normalize
/// Derives source type and tags and reports whether the question is exportable
pub async fn normalize(Json(question): Json<PersistedQuestion>) -> Json<NormalizeResponse> {
    let error = validate(&question).err().map(|e| e.to_string());

    Json(NormalizeResponse {
        source_type: source_type_str(question.source.as_str()).to_string(),
        tags: format_tags(&question),
        valid: error.is_none(),
        error,
    })
}

fn ensure_word_document(file_name: Option<&str>, content_type: Option<&str>) -> Result<()> {
    let mime_ok = matches!(content_type, Some(DOCX_MIME) | Some(DOC_MIME));
    let extension_ok = file_name
        .map(|name| {
            let name = name.to_ascii_lowercase();
            name.ends_with(".docx") || name.ends_with(".doc")
        })
        .unwrap_or(false);

    if mime_ok || extension_ok {
        Ok(())
    } else {
        Err(ApiError::BadRequest(
            "Only .doc and .docx files are allowed".to_string(),
        ))
    }
}

fn sanitize_filename(name: &str) -> Result<String> {
    let cleaned: String = name
        .trim()
        .chars()
        .filter(|c| !matches!(c, '"' | '/' | '\\') && !c.is_control())
        .collect();
    if cleaned.is_empty() {
        return Err(ApiError::BadRequest("filename must not be empty".to_string()));
    }

    if cleaned.to_ascii_lowercase().ends_with(".docx") {
        Ok(cleaned)
    } else {
        Ok(format!("{cleaned}.docx"))
    }
}

fn docx_response(bytes: Vec<u8>, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
