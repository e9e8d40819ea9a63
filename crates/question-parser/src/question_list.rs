use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::builder::{new_id, trim_options};
use crate::error::QuestionError;
use crate::model::{ParsedQuestion, Question, QuestionKind};

/// A manually authored question, before validation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NewQuestion {
    pub question_text: String,
    /// Exactly four options, in A, B, C, D order
    pub options: Vec<String>,
    /// Must equal one of the options
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// A partial edit of an existing question. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QuestionPatch {
    pub question_text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
}

/// The caller-owned, user-editable list of accepted questions.
///
/// Questions keep their insertion order. Every stored question satisfies the
/// same invariants as parser output: non-empty text, four non-empty options,
/// and a correct answer equal to one of them.
#[derive(Debug, Clone, Default)]
pub struct QuestionList {
    questions: Vec<Question>,
}

impl QuestionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote parsed questions into the list, dropping their origin marker.
    ///
    /// Returns the number of questions added.
    pub fn accept(&mut self, parsed: impl IntoIterator<Item = ParsedQuestion>) -> usize {
        let before = self.questions.len();
        self.questions.extend(parsed.into_iter().map(Question::from));
        let added = self.questions.len() - before;
        info!(added, total = self.questions.len(), "accepted parsed questions");
        added
    }

    pub fn add(&mut self, new: NewQuestion) -> Result<&Question, QuestionError> {
        let question = validate(
            new_id(),
            &new.question_text,
            &new.options,
            &new.correct_answer,
            new.explanation,
        )?;
        self.questions.push(question);
        Ok(&self.questions[self.questions.len() - 1])
    }

    /// Apply `patch` to the question with `id`.
    ///
    /// The patched question is validated as a whole; on failure the stored
    /// question is left as it was.
    pub fn update(&mut self, id: &str, patch: QuestionPatch) -> Result<&Question, QuestionError> {
        let idx = self.position(id)?;
        let current = &self.questions[idx];

        let question_text = patch
            .question_text
            .unwrap_or_else(|| current.question_text.clone());
        let options = patch.options.unwrap_or_else(|| current.options.to_vec());
        let correct_answer = patch
            .correct_answer
            .unwrap_or_else(|| current.correct_answer.clone());
        let explanation = patch
            .explanation
            .unwrap_or_else(|| current.explanation.clone());

        let updated = validate(
            current.id.clone(),
            &question_text,
            &options,
            &correct_answer,
            explanation,
        )?;
        self.questions[idx] = updated;
        Ok(&self.questions[idx])
    }

    pub fn remove(&mut self, id: &str) -> Result<Question, QuestionError> {
        let idx = self.position(id)?;
        Ok(self.questions.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    fn position(&self, id: &str) -> Result<usize, QuestionError> {
        self.questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| QuestionError::NotFound(id.to_string()))
    }
}

fn validate(
    id: String,
    question_text: &str,
    options: &[String],
    correct_answer: &str,
    explanation: String,
) -> Result<Question, QuestionError> {
    let question_text = question_text.trim();
    if question_text.is_empty() {
        return Err(QuestionError::EmptyQuestionText);
    }

    let options: &[String; 4] = options
        .try_into()
        .map_err(|_| QuestionError::WrongOptionCount(options.len()))?;
    let options = trim_options(options)?;

    let correct_answer = correct_answer.trim();
    if !options.iter().any(|o| o == correct_answer) {
        return Err(QuestionError::AnswerNotAnOption(correct_answer.to_string()));
    }

    Ok(Question {
        id,
        question_text: question_text.to_string(),
        kind: QuestionKind::MultipleChoice,
        options,
        correct_answer: correct_answer.to_string(),
        explanation: explanation.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerLetter;
    use crate::parse_questions;

    fn new_question(text: &str, answer: &str) -> NewQuestion {
        NewQuestion {
            question_text: text.to_string(),
            options: vec!["red".into(), "green".into(), "blue".into(), "black".into()],
            correct_answer: answer.to_string(),
            explanation: String::new(),
        }
    }

    #[test]
    fn test_accept_strips_origin_and_keeps_order() {
        let parsed = parse_questions(
            "1. First? A) a B) b C) c D) d\n2. Second? A) e B) f C) g D) h [Answer: D]",
        );
        let ids: Vec<String> = parsed.iter().map(|q| q.id.clone()).collect();

        let mut list = QuestionList::new();
        assert_eq!(list.accept(parsed), 2);
        assert_eq!(list.len(), 2);

        let stored: Vec<&Question> = list.iter().collect();
        assert_eq!(stored[0].id, ids[0]);
        assert_eq!(stored[1].question_text, "2. Second?");
        assert_eq!(stored[1].correct_answer, "h");
    }

    #[test]
    fn test_add_manual_question() {
        let mut list = QuestionList::new();
        let added = list
            .add(new_question("  Which colour is grass? ", "green"))
            .unwrap()
            .clone();
        assert_eq!(added.question_text, "Which colour is grass?");
        assert_eq!(added.correct_answer, "green");
        assert_eq!(list.get(&added.id), Some(&added));
    }

    #[test]
    fn test_add_rejects_invalid_questions() {
        let mut list = QuestionList::new();

        assert_eq!(
            list.add(new_question(" ", "red")).unwrap_err(),
            QuestionError::EmptyQuestionText
        );
        assert_eq!(
            list.add(new_question("Q?", "purple")).unwrap_err(),
            QuestionError::AnswerNotAnOption("purple".to_string())
        );

        let mut three = new_question("Q?", "red");
        three.options.pop();
        assert_eq!(list.add(three).unwrap_err(), QuestionError::WrongOptionCount(3));

        let mut blank = new_question("Q?", "red");
        blank.options[1] = "  ".to_string();
        assert_eq!(
            list.add(blank).unwrap_err(),
            QuestionError::EmptyOption(AnswerLetter::B)
        );

        assert!(list.is_empty());
    }

    #[test]
    fn test_update_applies_patch() {
        let mut list = QuestionList::new();
        let id = list.add(new_question("Q?", "red")).unwrap().id.clone();

        let updated = list
            .update(
                &id,
                QuestionPatch {
                    correct_answer: Some("blue".to_string()),
                    explanation: Some("Look at the sky.".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.correct_answer, "blue");
        assert_eq!(updated.explanation, "Look at the sky.");
        assert_eq!(updated.question_text, "Q?");
    }

    #[test]
    fn test_failed_update_leaves_question_untouched() {
        let mut list = QuestionList::new();
        let id = list.add(new_question("Q?", "red")).unwrap().id.clone();
        let before = list.get(&id).cloned();

        // New options no longer contain the stored answer "red".
        let err = list
            .update(
                &id,
                QuestionPatch {
                    options: Some(vec!["w".into(), "x".into(), "y".into(), "z".into()]),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, QuestionError::AnswerNotAnOption("red".to_string()));
        assert_eq!(list.get(&id).cloned(), before);
    }

    #[test]
    fn test_remove_and_missing_ids() {
        let mut list = QuestionList::new();
        let id = list.add(new_question("Q?", "red")).unwrap().id.clone();

        let removed = list.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(list.is_empty());

        assert_eq!(list.remove(&id).unwrap_err(), QuestionError::NotFound(id.clone()));
        assert_eq!(
            list.update(&id, QuestionPatch::default()).unwrap_err(),
            QuestionError::NotFound(id)
        );
    }
}
