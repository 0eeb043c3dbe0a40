//! Preconditions a persisted question must satisfy before export.

use crate::error::ValidationError;
use crate::types::{CorrectAnswer, PersistedQuestion};

/// Check required fields and multiple-choice consistency.
pub fn validate(question: &PersistedQuestion) -> Result<(), ValidationError> {
    if question.content.trim().is_empty() {
        return Err(ValidationError::MissingContent);
    }
    if question.topic.trim().is_empty() {
        return Err(ValidationError::MissingTopic);
    }
    if question.correct_answer.is_empty() {
        return Err(ValidationError::MissingAnswer);
    }
    if !(1..=5).contains(&question.difficulty) {
        return Err(ValidationError::Difficulty(question.difficulty));
    }
    if question.time_estimate < 1 {
        return Err(ValidationError::TimeEstimate);
    }

    if question.is_multiple_choice() {
        let options = question.options.len();
        if options < 2 {
            return Err(ValidationError::TooFewOptions { found: options });
        }
        match question.correct_answer {
            CorrectAnswer::Index(index) if index >= 0 && (index as usize) < options => {}
            CorrectAnswer::Index(index) => {
                return Err(ValidationError::AnswerOutOfRange { index, options })
            }
            CorrectAnswer::Text(_) => return Err(ValidationError::AnswerNotIndex),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QuestionType, Source};

    fn mc(options: &[&str], answer: CorrectAnswer) -> PersistedQuestion {
        let mut q = PersistedQuestion::new(
            Source::Hkdse,
            QuestionType::MultipleChoice,
            "Geometry",
            "Pick one",
            answer,
        );
        q.options = options.iter().map(|s| s.to_string()).collect();
        q
    }

    #[test]
    fn valid_mc_question() {
        assert_eq!(validate(&mc(&["a", "b", "c"], CorrectAnswer::Index(2))), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert_eq!(
            validate(&mc(&["a", "b"], CorrectAnswer::Index(4))),
            Err(ValidationError::AnswerOutOfRange { index: 4, options: 2 })
        );
        assert!(matches!(
            validate(&mc(&["a", "b"], CorrectAnswer::Index(-48))),
            Err(ValidationError::AnswerOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_mc_with_single_option() {
        assert_eq!(
            validate(&mc(&["only"], CorrectAnswer::Index(0))),
            Err(ValidationError::TooFewOptions { found: 1 })
        );
    }

    #[test]
    fn rejects_text_answer_on_mc() {
        assert_eq!(
            validate(&mc(&["a", "b"], CorrectAnswer::Text("a".to_string()))),
            Err(ValidationError::AnswerNotIndex)
        );
    }

    #[test]
    fn rejects_missing_fields() {
        let mut q = PersistedQuestion::new(
            Source::Textbook,
            QuestionType::Conventional,
            "Limits",
            "  ",
            CorrectAnswer::Text("0".to_string()),
        );
        assert_eq!(validate(&q), Err(ValidationError::MissingContent));

        q.content = "Evaluate the limit.".to_string();
        q.topic.clear();
        assert_eq!(validate(&q), Err(ValidationError::MissingTopic));

        q.topic = "Limits".to_string();
        q.correct_answer = CorrectAnswer::default();
        assert_eq!(validate(&q), Err(ValidationError::MissingAnswer));

        q.correct_answer = CorrectAnswer::Text("0".to_string());
        q.difficulty = 9;
        assert_eq!(validate(&q), Err(ValidationError::Difficulty(9)));
    }
}
