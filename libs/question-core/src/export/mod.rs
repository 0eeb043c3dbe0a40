//! Word document generation.
//!
//! Documents are assembled as an ordered list of paragraphs and then
//! packaged into a minimal `.docx` archive.

mod docx;
mod template;
mod worksheet;

pub use template::{build_template, render_template, TEMPLATE_FILENAME};
pub use worksheet::{build_worksheet, render_worksheet, WORKSHEET_FILENAME};

use crate::error::Result;

/// MIME type of generated documents.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Paragraph style, mapped onto the styles shipped in `word/styles.xml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Normal,
    Title,
    Heading1,
    Heading2,
    Heading3,
}

impl ParagraphStyle {
    pub(crate) fn style_id(&self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Title => Some("Title"),
            Self::Heading1 => Some("Heading1"),
            Self::Heading2 => Some("Heading2"),
            Self::Heading3 => Some("Heading3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// A single paragraph. Newlines in `text` become line breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub style: ParagraphStyle,
    pub alignment: Alignment,
    /// Space after the paragraph, in twentieths of a point.
    pub spacing_after: u32,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: ParagraphStyle::Normal,
            alignment: Alignment::Left,
            spacing_after: 100,
        }
    }

    /// Empty paragraph used as vertical space.
    pub fn blank() -> Self {
        Self::new(String::new())
    }

    pub fn styled(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self {
            style,
            ..Self::new(text)
        }
    }

    pub fn spacing(mut self, after: u32) -> Self {
        self.spacing_after = after;
        self
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Ordered document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Plain-text rendition with paragraphs separated by a blank line,
    /// the shape text extraction produces for a `.docx`.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Package the document as `.docx` bytes.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        docx::package(self)
    }
}

impl Extend<Paragraph> for Document {
    fn extend<I: IntoIterator<Item = Paragraph>>(&mut self, iter: I) {
        self.paragraphs.extend(iter);
    }
}
