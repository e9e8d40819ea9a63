use question_parser::{ParsedQuestion, Question, QuestionPatch};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ParseQuestionsParams {
    /// Assignment description text to scan for multiple-choice questions.
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateQuestionParams {
    /// ID of the accepted question to edit.
    pub id: String,
    /// Fields to change; omitted fields keep their current value.
    #[serde(flatten)]
    pub patch: QuestionPatch,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RemoveQuestionParams {
    /// ID of the accepted question to remove.
    pub id: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ParseQuestionsResponse {
    /// Number of questions found, e.g. for a "Found N questions" hint.
    pub found: usize,
    /// Number of matched blocks dropped as malformed.
    pub skipped: usize,
    pub questions: Vec<ParsedQuestion>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct AcceptQuestionsResponse {
    pub accepted: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct QuestionResponse {
    pub question: Question,
}
