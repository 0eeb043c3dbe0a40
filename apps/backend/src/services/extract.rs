//! Plain-text extraction from uploaded `.docx` files.
//!
//! A `.docx` is a ZIP package; the body lives in `word/document.xml`.
//! Each `<w:p>` becomes one paragraph, paragraphs are separated by a blank
//! line, and in-paragraph breaks become newlines.

use std::io::{Cursor, Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Largest decompressed `word/document.xml` accepted: 32 MiB.
pub const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not a Word (.docx) package: {0}")]
    NotDocx(#[from] ZipError),

    #[error("word/document.xml not found in archive")]
    MissingDocument,

    #[error("word/document.xml exceeds {limit} bytes when decompressed")]
    DocumentTooLarge { limit: u64 },

    #[error("XML parsing error: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract the document text, paragraphs separated by `"\n\n"`.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    extract_text_with_limit(bytes, MAX_DOCUMENT_XML_BYTES)
}

/// Like [`extract_text`], rejecting a document body larger than `limit` bytes.
pub fn extract_text_with_limit(bytes: &[u8], limit: u64) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let xml = read_document_xml(&mut archive, limit)?;
    let paragraphs = parse_document_xml(&xml)?;
    Ok(paragraphs.join("\n\n"))
}

/// Extract the document as trimmed lines, ready for the question parser.
pub fn extract_lines(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let text = extract_text(bytes)?;
    Ok(text.lines().map(|line| line.trim().to_string()).collect())
}

fn read_document_xml<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    limit: u64,
) -> Result<String, ExtractError> {
    let mut file = match archive.by_name(DOCUMENT_PART) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Err(ExtractError::MissingDocument),
        Err(e) => return Err(e.into()),
    };
    if file.size() > limit {
        return Err(ExtractError::DocumentTooLarge { limit });
    }

    // The declared size can lie, so the read itself is capped too.
    let mut xml = Vec::new();
    file.by_ref().take(limit + 1).read_to_end(&mut xml)?;
    if xml.len() as u64 > limit {
        return Err(ExtractError::DocumentTooLarge { limit });
    }
    String::from_utf8(xml).map_err(|e| ExtractError::Xml(e.to_string()))
}

fn parse_document_xml(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    // Paragraphs can nest (text boxes inside runs); each open one keeps its text.
    let mut open: Vec<String> = Vec::new();
    let mut run_depth = 0usize;
    let mut text_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:r" => run_depth += 1,
                b"w:t" => text_depth += 1,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(paragraph) = open.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => text_depth = text_depth.saturating_sub(1),
                _ => {}
            },
            Ok(Event::Empty(e)) => match (e.name().as_ref(), open.last_mut()) {
                (b"w:p", _) => paragraphs.push(String::new()),
                (b"w:br" | b"w:cr", Some(current)) if run_depth > 0 => current.push('\n'),
                (b"w:tab", Some(current)) if run_depth > 0 => current.push('\t'),
                _ => {}
            },
            Ok(Event::Text(e)) if text_depth > 0 => {
                let text = e.unescape().map_err(|e| ExtractError::Xml(e.to_string()))?;
                if let Some(current) = open.last_mut() {
                    current.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::Xml(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}
