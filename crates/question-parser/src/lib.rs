//! Extraction of multiple-choice questions from free-form assignment text.
//!
//! Parsing is a pure two-step pipeline: [`matcher`] finds candidate blocks and
//! returns them as typed [`RawMatch`] records, [`builder`] validates each one
//! and turns it into a [`ParsedQuestion`]. Malformed blocks are dropped.
//!
//! [`QuestionList`] is the caller-owned list that parsed questions are
//! accepted into and that supports manual authoring.

pub mod builder;
pub mod error;
pub mod matcher;
pub mod model;
pub mod question_list;

use std::collections::HashSet;

use tracing::debug;

pub use error::QuestionError;
pub use model::{
    AnswerLetter, BlockForm, ParseOptions, ParseReport, ParsedQuestion, Question, QuestionKind,
    QuestionOrigin, RawMatch,
};
pub use question_list::{NewQuestion, QuestionList, QuestionPatch};

/// Extract every well-formed question block from `text`.
///
/// Numbered-form questions come first, then lowercase-form questions, each in
/// source order. A text with no recognizable block yields an empty list.
pub fn parse_questions(text: &str) -> Vec<ParsedQuestion> {
    parse_with_report(text, &ParseOptions::default()).questions
}

/// Like [`parse_questions`], but also counts the blocks that were matched and
/// then rejected, and optionally drops duplicate records.
pub fn parse_with_report(text: &str, options: &ParseOptions) -> ParseReport {
    let mut report = ParseReport::default();
    let mut seen: HashSet<(String, [String; 4])> = HashSet::new();

    for raw in matcher::find_blocks(text) {
        let question = match builder::build_question(&raw) {
            Ok(question) => question,
            Err(e) => {
                debug!(start = raw.start, form = ?raw.form, reason = %e, "skipping malformed question block");
                report.skipped += 1;
                continue;
            }
        };

        if options.deduplicate
            && !seen.insert((question.question_text.clone(), question.options.clone()))
        {
            debug!(start = raw.start, "dropping duplicate question block");
            continue;
        }

        report.questions.push(question);
    }

    debug!(
        found = report.questions.len(),
        skipped = report.skipped,
        "parsed questions"
    );
    report
}
