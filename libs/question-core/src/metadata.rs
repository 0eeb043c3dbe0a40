//! Metadata normalization shared by the parser, the exporter and callers.

use serde::{Deserialize, Serialize};

use crate::types::PersistedQuestion;

/// Broad category of a question source.
///
/// Decides which of the year/school/textbook details apply to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Exam,
    School,
    Textbook,
}

/// Detail field that accompanies a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Year,
    School,
    Textbook,
}

impl DetailField {
    /// Document label for the field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::School => "School",
            Self::Textbook => "Textbook",
        }
    }
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exam => "exam",
            Self::School => "school",
            Self::Textbook => "textbook",
        }
    }

    /// Detail fields relevant for this kind of source, in document order.
    pub fn detail_fields(&self) -> &'static [DetailField] {
        match self {
            Self::Exam => &[DetailField::Year],
            Self::School => &[DetailField::School, DetailField::Year],
            Self::Textbook => &[DetailField::Textbook, DetailField::Year],
        }
    }
}

/// Classify a source label. Unknown labels have no source type.
pub fn source_type(source: &str) -> Option<SourceType> {
    match source {
        "HKDSE" | "HKCEE" | "HKALE" => Some(SourceType::Exam),
        "School Exam" | "School Mock" => Some(SourceType::School),
        "Textbook" => Some(SourceType::Textbook),
        _ => None,
    }
}

/// Wire form of [`source_type`]: `"exam"`, `"school"`, `"textbook"` or `""`.
pub fn source_type_str(source: &str) -> &'static str {
    source_type(source).map(|t| t.as_str()).unwrap_or("")
}

/// Letter shown for a zero-based option index (0 -> 'a').
pub fn option_letter(index: usize) -> char {
    // Past 'z' there is no letter; fall back to a neutral marker.
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'a' + i))
        .unwrap_or('?')
}

/// Zero-based index for an answer letter ('a' -> 0, case-insensitive).
///
/// Only the first character is considered and no bounds are enforced, so
/// `"z"` gives 25 and `"1"` gives a negative index. Returns `None` for an
/// empty answer.
pub fn answer_index(answer: &str) -> Option<i64> {
    let first = answer.chars().next()?;
    let lower = first.to_lowercase().next().unwrap_or(first);
    Some(i64::from(u32::from(lower)) - i64::from(u32::from('a')))
}

/// Lowercase display label for an MC answer (its first character).
pub fn answer_label(answer: &str) -> String {
    answer
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default()
}

/// Build the question's tag list: existing tags, a formatted source tag
/// such as `"School Exam - School A - 2012"`, then the topic.
pub fn format_tags(question: &PersistedQuestion) -> Vec<String> {
    let mut tags = question.tags.clone();

    let mut source_tag = question.source.as_str().to_string();
    let detail = match source_type(question.source.as_str()) {
        Some(SourceType::School) => question.school.as_deref(),
        Some(SourceType::Textbook) => question.textbook.as_deref(),
        _ => None,
    };
    if let Some(detail) = detail.filter(|d| !d.trim().is_empty()) {
        source_tag.push_str(" - ");
        source_tag.push_str(detail.trim());
    }
    if let Some(year) = question.year.as_deref().filter(|y| !y.trim().is_empty()) {
        source_tag.push_str(" - ");
        source_tag.push_str(year.trim());
    }

    if !tags.contains(&source_tag) {
        tags.push(source_tag);
    }
    let topic = question.topic.trim();
    if !topic.is_empty() && !tags.iter().any(|t| t == topic) {
        tags.push(topic.to_string());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CorrectAnswer, QuestionType, Source};

    #[test]
    fn classifies_sources() {
        assert_eq!(source_type("HKDSE"), Some(SourceType::Exam));
        assert_eq!(source_type("HKCEE"), Some(SourceType::Exam));
        assert_eq!(source_type("HKALE"), Some(SourceType::Exam));
        assert_eq!(source_type("School Exam"), Some(SourceType::School));
        assert_eq!(source_type("School Mock"), Some(SourceType::School));
        assert_eq!(source_type("Textbook"), Some(SourceType::Textbook));
        assert_eq!(source_type("textbook"), None);
        assert_eq!(source_type_str("Olympiad"), "");
        assert_eq!(source_type_str("School Mock"), "school");
    }

    #[test]
    fn every_known_source_has_a_type() {
        for source in Source::ALL {
            assert!(source_type(source.as_str()).is_some(), "{:?}", source);
        }
    }

    #[test]
    fn letters_and_indices_agree() {
        for i in 0..26 {
            let letter = option_letter(i).to_string();
            assert_eq!(answer_index(&letter), Some(i as i64));
        }
        assert_eq!(answer_index("C"), Some(2));
        assert_eq!(answer_index("b) 6 units"), Some(1));
        assert_eq!(answer_index(""), None);
        assert!(answer_index("1").unwrap() < 0);
        assert_eq!(option_letter(26), '?');
    }

    #[test]
    fn school_tag_includes_school_and_year() {
        let mut question = PersistedQuestion::new(
            Source::SchoolExam,
            QuestionType::Conventional,
            "Geometry",
            "Find x.",
            CorrectAnswer::Text("4".to_string()),
        );
        question.school = Some("School A".to_string());
        question.year = Some("2012".to_string());
        question.textbook = Some("ignored".to_string());

        assert_eq!(
            format_tags(&question),
            vec!["School Exam - School A - 2012".to_string(), "Geometry".to_string()]
        );
    }

    #[test]
    fn tags_are_not_duplicated() {
        let mut question = PersistedQuestion::new(
            Source::Hkcee,
            QuestionType::Conventional,
            "Algebra",
            "Expand.",
            CorrectAnswer::Text("x".to_string()),
        );
        question.year = Some("2017".to_string());
        question.tags = vec!["HKCEE - 2017".to_string(), "Algebra".to_string()];

        assert_eq!(format_tags(&question), question.tags);
    }
}
