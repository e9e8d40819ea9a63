use crate::model::AnswerLetter;

/// Errors raised when a question fails validation or cannot be found.
///
/// The parser itself never surfaces these to its caller: a block that fails
/// validation is dropped. They are returned by the question list operations
/// and by [`crate::builder::build_question`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("question not found: {0}")]
    NotFound(String),

    #[error("question text must not be empty")]
    EmptyQuestionText,

    #[error("expected exactly 4 options, got {0}")]
    WrongOptionCount(usize),

    #[error("option {0:?} must not be empty")]
    EmptyOption(AnswerLetter),

    #[error("correct answer '{0}' is not one of the options")]
    AnswerNotAnOption(String),
}

