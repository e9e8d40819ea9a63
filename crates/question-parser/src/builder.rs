/// Question builder: turns raw matches into validated `ParsedQuestion` records.
///
/// Validation:
/// - the question fragment must be non-empty after trimming
/// - all four option fragments must be non-empty after trimming
///
/// The correct answer is the option named by the answer letter, or option A
/// when the block carried no answer marker.
use uuid::Uuid;

use crate::error::QuestionError;
use crate::model::{AnswerLetter, ParsedQuestion, QuestionKind, QuestionOrigin, RawMatch};

/// Validate one raw match and build a record with a fresh id.
pub fn build_question(raw: &RawMatch) -> Result<ParsedQuestion, QuestionError> {
    let question_text = raw.question.trim();
    if question_text.is_empty() {
        return Err(QuestionError::EmptyQuestionText);
    }

    let options = trim_options(&raw.options)?;
    let correct_answer = options[raw.answer.map_or(0, AnswerLetter::index)].clone();

    Ok(ParsedQuestion {
        id: new_id(),
        question_text: question_text.to_string(),
        kind: QuestionKind::MultipleChoice,
        options,
        correct_answer,
        explanation: String::new(),
        origin: QuestionOrigin::FromParsing,
    })
}

/// Trim every option, rejecting the first one that ends up empty.
pub(crate) fn trim_options(options: &[String; 4]) -> Result<[String; 4], QuestionError> {
    let mut trimmed: [String; 4] = Default::default();
    for (slot, (letter, option)) in trimmed
        .iter_mut()
        .zip(AnswerLetter::ALL.iter().zip(options.iter()))
    {
        let option = option.trim();
        if option.is_empty() {
            return Err(QuestionError::EmptyOption(*letter));
        }
        *slot = option.to_string();
    }
    Ok(trimmed)
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
