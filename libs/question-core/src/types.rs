//! Core types for the question bank.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Curriculum module a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Compulsory,
    Module1,
    Module2,
}

impl Default for Module {
    fn default() -> Self {
        Self::Compulsory
    }
}

impl Module {
    /// Get the module id as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compulsory => "compulsory",
            Self::Module1 => "module1",
            Self::Module2 => "module2",
        }
    }

    /// Human-readable module title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Compulsory => "Compulsory Part",
            Self::Module1 => "Module 1 (Calculus & Statistics)",
            Self::Module2 => "Module 2 (Algebra & Calculus)",
        }
    }

    /// Representative topics covered by the module.
    pub fn topics(&self) -> &'static [&'static str] {
        match self {
            Self::Compulsory => &[
                "Algebra",
                "Geometry",
                "Trigonometry",
                "Functions",
                "Coordinate Geometry",
            ],
            Self::Module1 => &[
                "Differentiation",
                "Integration",
                "Probability",
                "Statistical Analysis",
                "Data Representation",
            ],
            Self::Module2 => &[
                "Advanced Algebra",
                "Calculus Methods",
                "Mathematical Induction",
                "Complex Numbers",
                "Vectors",
            ],
        }
    }
}

/// Where a question was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "HKDSE")]
    Hkdse,
    #[serde(rename = "HKCEE")]
    Hkcee,
    #[serde(rename = "HKALE")]
    Hkale,
    #[serde(rename = "School Exam")]
    SchoolExam,
    #[serde(rename = "School Mock")]
    SchoolMock,
    #[serde(rename = "Textbook")]
    Textbook,
}

impl Source {
    pub const ALL: [Source; 6] = [
        Self::Hkdse,
        Self::Hkcee,
        Self::Hkale,
        Self::SchoolExam,
        Self::SchoolMock,
        Self::Textbook,
    ];

    /// The label exactly as written in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hkdse => "HKDSE",
            Self::Hkcee => "HKCEE",
            Self::Hkale => "HKALE",
            Self::SchoolExam => "School Exam",
            Self::SchoolMock => "School Mock",
            Self::Textbook => "Textbook",
        }
    }
}

/// Question format of a persisted question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    Conventional,
    #[serde(rename = "MC")]
    MultipleChoice,
}

impl Default for QuestionType {
    fn default() -> Self {
        Self::Conventional
    }
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conventional => "Conventional",
            Self::MultipleChoice => "MC",
        }
    }
}

/// Correct answer: an option index for MC questions, free text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Index(i64),
    Text(String),
}

impl Default for CorrectAnswer {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl CorrectAnswer {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

/// An option exactly as labeled in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledOption {
    pub label: String,
    pub text: String,
}

/// Presentation hints collected while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPreview {
    pub formatted_options: Vec<LabeledOption>,
    pub correct_answer_label: String,
}

/// Question parsed from an uploaded document, pending human review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question_number: String,
    pub content: String,
    pub source: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub year: String,
    pub school: String,
    pub textbook: String,
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    pub marking_scheme: String,
    pub preview: DraftPreview,
}

impl QuestionDraft {
    pub fn new(question_number: impl Into<String>) -> Self {
        Self {
            question_number: question_number.into(),
            ..Self::default()
        }
    }

    /// Whether the draft was classified as multiple choice.
    pub fn is_multiple_choice(&self) -> bool {
        self.question_type == QuestionType::MultipleChoice.as_str()
    }
}

fn default_difficulty() -> u8 {
    3
}

fn default_time_estimate() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

/// Question stored in the bank, as handed to the exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedQuestion {
    pub id: Uuid,
    #[serde(default)]
    pub module: Module,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textbook: Option<String>,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    pub topic: String,
    pub content: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marking_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default = "default_time_estimate")]
    pub time_estimate: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PersistedQuestion {
    /// Create a question with required fields and storage defaults.
    pub fn new(
        source: Source,
        question_type: QuestionType,
        topic: impl Into<String>,
        content: impl Into<String>,
        correct_answer: CorrectAnswer,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            module: Module::default(),
            source,
            year: None,
            school: None,
            textbook: None,
            question_type,
            topic: topic.into(),
            content: content.into(),
            options: Vec::new(),
            correct_answer,
            marking_scheme: None,
            explanation: None,
            tags: Vec::new(),
            difficulty: default_difficulty(),
            time_estimate: default_time_estimate(),
            is_active: true,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        self.question_type == QuestionType::MultipleChoice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_deserializes_index_or_text() {
        let idx: CorrectAnswer = serde_json::from_str("2").unwrap();
        assert_eq!(idx, CorrectAnswer::Index(2));
        let text: CorrectAnswer = serde_json::from_str("\"x = 3\"").unwrap();
        assert_eq!(text, CorrectAnswer::Text("x = 3".to_string()));
    }

    #[test]
    fn source_uses_document_labels() {
        let json = serde_json::to_string(&Source::SchoolMock).unwrap();
        assert_eq!(json, "\"School Mock\"");
        let parsed: Source = serde_json::from_str("\"HKALE\"").unwrap();
        assert_eq!(parsed, Source::Hkale);
        assert!(serde_json::from_str::<Source>("\"hkale\"").is_err());
    }

    #[test]
    fn persisted_question_defaults() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "source": "HKDSE",
            "type": "MC",
            "topic": "Geometry",
            "content": "Pick one",
            "options": ["1", "2"],
            "correctAnswer": 1
        }"#;
        let question: PersistedQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(question.module, Module::Compulsory);
        assert_eq!(question.difficulty, 3);
        assert_eq!(question.time_estimate, 5);
        assert!(question.is_active);
        assert!(question.is_multiple_choice());
    }

    #[test]
    fn draft_serializes_camel_case() {
        let draft = QuestionDraft::new("1");
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["questionNumber"], "1");
        assert_eq!(value["type"], "");
        assert_eq!(value["correctAnswer"], "");
        assert!(value["preview"]["formattedOptions"].as_array().unwrap().is_empty());
    }
}
