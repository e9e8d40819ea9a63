use std::sync::Arc;

use question_parser::{
    parse_with_report, NewQuestion, ParseOptions, ParsedQuestion, QuestionList,
};
use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::api::{
    AcceptQuestionsResponse, ParseQuestionsParams, ParseQuestionsResponse, QuestionListResponse,
    QuestionResponse, RemoveQuestionParams, UpdateQuestionParams,
};
use crate::config::Config;
use crate::error::AppError;

/// Questions from the most recent parse that have not been accepted yet, and
/// the accepted list they are promoted into.
#[derive(Default)]
pub struct AppState {
    pub pending: Vec<ParsedQuestion>,
    pub questions: QuestionList,
}

#[derive(Clone)]
pub struct QuestionParserServer {
    state: Arc<RwLock<AppState>>,
    config: Config,
    tool_router: ToolRouter<QuestionParserServer>,
}

impl QuestionParserServer {
    pub fn new(config: Config) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            config,
            tool_router: Self::tool_router(),
        }
    }

    fn check_input_size(&self, text: &str) -> Result<(), AppError> {
        if text.len() > self.config.max_input_bytes {
            return Err(AppError::InputTooLarge {
                size: text.len(),
                limit: self.config.max_input_bytes,
            });
        }
        Ok(())
    }
}

#[tool_router]
impl QuestionParserServer {
    #[tool(description = "Scan assignment text for multiple-choice questions ('1. Q? A) .. B) .. C) .. D) .. [Answer: X]' or 'Q? a) .. b) .. c) .. d) ..'). The result replaces the pending parsed questions.")]
    async fn parse_questions(
        &self,
        Parameters(params): Parameters<ParseQuestionsParams>,
    ) -> Result<Json<ParseQuestionsResponse>, String> {
        self.check_input_size(&params.text)
            .map_err(|e| e.to_string())?;

        let options = ParseOptions {
            deduplicate: self.config.deduplicate,
        };
        let report = parse_with_report(&params.text, &options);
        info!(
            found = report.questions.len(),
            skipped = report.skipped,
            "parse_questions"
        );

        let mut state = self.state.write().await;
        state.pending = report.questions.clone();

        Ok(Json(ParseQuestionsResponse {
            found: report.questions.len(),
            skipped: report.skipped,
            questions: report.questions,
        }))
    }

    #[tool(description = "Accept all pending parsed questions into the question list.")]
    async fn accept_parsed_questions(&self) -> Result<Json<AcceptQuestionsResponse>, String> {
        let mut state = self.state.write().await;
        let pending = std::mem::take(&mut state.pending);
        let accepted = state.questions.accept(pending);

        Ok(Json(AcceptQuestionsResponse {
            accepted,
            total: state.questions.len(),
        }))
    }

    #[tool(description = "List the accepted questions in order.")]
    async fn list_questions(&self) -> Result<Json<QuestionListResponse>, String> {
        let state = self.state.read().await;
        Ok(Json(QuestionListResponse {
            questions: state.questions.iter().cloned().collect(),
        }))
    }

    #[tool(description = "Add a manually authored multiple-choice question with exactly four options.")]
    async fn add_question(
        &self,
        Parameters(params): Parameters<NewQuestion>,
    ) -> Result<Json<QuestionResponse>, String> {
        let mut state = self.state.write().await;
        let question = state
            .questions
            .add(params)
            .map_err(|e| format!("add failed: {e}"))?
            .clone();
        info!(id = %question.id, "question added");

        Ok(Json(QuestionResponse { question }))
    }

    #[tool(description = "Edit an accepted question. Omitted fields keep their current value.")]
    async fn update_question(
        &self,
        Parameters(params): Parameters<UpdateQuestionParams>,
    ) -> Result<Json<QuestionResponse>, String> {
        let id = params.id.trim().to_string();
        if id.is_empty() {
            return Err("id must not be empty".to_string());
        }

        let mut state = self.state.write().await;
        let question = state
            .questions
            .update(&id, params.patch)
            .map_err(|e| format!("update failed: {e}"))?
            .clone();
        info!(id = %question.id, "question updated");

        Ok(Json(QuestionResponse { question }))
    }

    #[tool(description = "Remove an accepted question by ID.")]
    async fn remove_question(
        &self,
        Parameters(params): Parameters<RemoveQuestionParams>,
    ) -> Result<Json<QuestionResponse>, String> {
        let id = params.id.trim().to_string();
        if id.is_empty() {
            return Err("id must not be empty".to_string());
        }

        let mut state = self.state.write().await;
        let question = state
            .questions
            .remove(&id)
            .map_err(|e| format!("remove failed: {e}"))?;
        info!(id = %question.id, "question removed");

        Ok(Json(QuestionResponse { question }))
    }
}

#[tool_handler]
impl ServerHandler for QuestionParserServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "question-parser".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Question parser MCP server. Use parse_questions on an assignment description \
                 to extract multiple-choice questions, accept_parsed_questions to move them into \
                 the question list, and add_question, update_question, remove_question and \
                 list_questions to edit that list."
                    .to_string(),
            ),
        }
    }
}
