use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Question type. The parser only ever produces multiple-choice questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
}

/// Marks a question as produced by the parser rather than authored by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionOrigin {
    FromParsing,
}

/// Which textual shape a block was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockForm {
    /// `1. Question? A) .. B) .. C) .. D) .. [Answer: X]`
    Numbered,
    /// `Question? a) .. b) .. c) .. d) ..`
    Lowercase,
}

/// Option letter of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    pub(crate) const ALL: [AnswerLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Accepts both upper and lower case letters.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' | 'a' => Some(Self::A),
            'B' | 'b' => Some(Self::B),
            'C' | 'c' => Some(Self::C),
            'D' | 'd' => Some(Self::D),
            _ => None,
        }
    }

    /// Position of the option this letter refers to.
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }
}

/// A question block as captured from the source text, before validation.
///
/// Fragments are kept exactly as captured (untrimmed); the builder decides
/// whether the block is well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub form: BlockForm,
    /// Byte offset of the block in the source text
    pub start: usize,
    pub question: String,
    /// Option fragments in A, B, C, D order
    pub options: [String; 4],
    pub answer: Option<AnswerLetter>,
}

/// A multiple-choice question extracted from free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParsedQuestion {
    /// Fresh UUID, not stable across re-parses
    pub id: String,
    pub question_text: String,
    pub kind: QuestionKind,
    pub options: [String; 4],
    /// Always equal to one of `options`
    pub correct_answer: String,
    /// Empty at parse time
    pub explanation: String,
    pub origin: QuestionOrigin,
}

/// A question in the caller-owned list, either accepted from the parser or
/// authored by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    pub id: String,
    pub question_text: String,
    pub kind: QuestionKind,
    pub options: [String; 4],
    pub correct_answer: String,
    pub explanation: String,
}

impl From<ParsedQuestion> for Question {
    fn from(parsed: ParsedQuestion) -> Self {
        Self {
            id: parsed.id,
            question_text: parsed.question_text,
            kind: parsed.kind,
            options: parsed.options,
            correct_answer: parsed.correct_answer,
            explanation: parsed.explanation,
        }
    }
}

/// Result of one parse over a text: the accepted records and how many
/// matched blocks were dropped as malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub questions: Vec<ParsedQuestion>,
    pub skipped: usize,
}

/// Knobs for [`crate::parse_with_report`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Drop records whose question text and options repeat an earlier record.
    /// Off by default: a block that satisfies both forms is reported twice.
    pub deduplicate: bool,
}
