/// Pattern matcher for multiple-choice blocks embedded in free text.
///
/// Two shapes are recognized, each by its own pass over the same input:
/// - Numbered: `1. Question? A) .. B) .. C) .. D) .. [Answer: X]`
///   (marker letters and the answer marker are case-insensitive)
/// - Lowercase: `Question? a) .. b) .. c) .. d) ..` (no answer marker)
///
/// Line structure:
/// - The question stem runs up to the first `?` on its line. A numbered stem
///   starts at `<digits>. `; a lowercase stem starts at the last sentence
///   start before its `?` (after `. `, `! ` or `; ` followed by a capital or
///   digit), so leading prose on the same line is not part of the question.
/// - Markers may be separated by any whitespace, line breaks included, so the
///   one-line form and the one-option-per-line form both match.
/// - Options A to C never cross a line break.
/// - Option D ends at the first `[Answer: X]` marker, at the start of the next
///   block on the same line, or at the end of its line. A numbered answer
///   marker may also open the following line.
///
/// The regex crate has no lookahead, so each pass walks the text block by
/// block: match a block head (stem plus markers A to D), find where option D
/// stops, then resume scanning from there.
///
/// The passes are independent and do not deduplicate: a block written in the
/// numbered form with lowercase markers is found by both.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{AnswerLetter, BlockForm, RawMatch};

/// Stem plus options A to C, ending just after the `D)` marker.
static NUMBERED_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(\d+\.[ \t]+[^?\n]*\?)",
        r"\s*[Aa]\)[ \t]*([^\n]*?)",
        r"\s+[Bb]\)[ \t]*([^\n]*?)",
        r"\s+[Cc]\)[ \t]*([^\n]*?)",
        r"\s+[Dd]\)[ \t]*",
    ))
    .expect("valid regex")
});

/// Start of the next numbered block on the same line.
static NUMBERED_NEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\.[ \t]+[^?\n]*\?\s*[Aa]\)").expect("valid regex"));

/// Option D text, stopping at the first answer marker.
static NUMBERED_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\n]*?)(?:\s*\[(?i:answer)\s*:\s*([A-Da-d])\s*\]|\s*$)").expect("valid regex")
});

/// Answer marker placed after the line holding option D.
static ANSWER_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[(?i:answer)\s*:\s*([A-Da-d])\s*\]").expect("valid regex")
});

static LOWERCASE_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"([^?\n]+\?)",
        r"\s*a\)[ \t]*([^\n]*?)",
        r"\s+b\)[ \t]*([^\n]*?)",
        r"\s+c\)[ \t]*([^\n]*?)",
        r"\s+d\)[ \t]*",
    ))
    .expect("valid regex")
});

static LOWERCASE_NEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^?\n]+\?\s*a\)").expect("valid regex"));

/// Sentence boundary; group 1 is the first character of the new sentence.
/// A period right after a digit (`1. `) is a list number, not a boundary.
static SENTENCE_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\s\d][.!;]\s+([\p{Lu}\d])").expect("valid regex")
});

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

/// Find every numbered-form block, in source order.
pub fn find_numbered(text: &str) -> Vec<RawMatch> {
    scan(text, BlockForm::Numbered)
}

/// Find every lowercase-form block, in source order.
pub fn find_lowercase(text: &str) -> Vec<RawMatch> {
    scan(text, BlockForm::Lowercase)
}

/// Run both passes over `text`: numbered blocks first, then lowercase blocks.
pub fn find_blocks(text: &str) -> Vec<RawMatch> {
    let mut blocks = find_numbered(text);
    blocks.extend(find_lowercase(text));
    blocks
}

fn scan(text: &str, form: BlockForm) -> Vec<RawMatch> {
    let head_re: &Regex = match form {
        BlockForm::Numbered => &NUMBERED_HEAD_RE,
        BlockForm::Lowercase => &LOWERCASE_HEAD_RE,
    };

    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(caps) = head_re.captures_at(text, pos) {
        let Some(head) = caps.get(0) else { break };
        let tail_start = head.end();
        let line_end = text[tail_start..]
            .find('\n')
            .map_or(text.len(), |i| tail_start + i);
        let next_start = next_block_start(text, tail_start, line_end, form);
        let tail_end = next_start.unwrap_or(line_end);
        let tail = &text[tail_start..tail_end];
        pos = tail_end;

        let (last_option, answer) = match form {
            BlockForm::Numbered => {
                let (option, mut answer) = split_answer(tail);
                if answer.is_none() && next_start.is_none() {
                    if let Some(line) = ANSWER_LINE_RE.captures(&text[line_end..]) {
                        answer = answer_letter(&line, 1);
                        pos = line_end + line.get(0).map_or(0, |m| m.end());
                    }
                }
                (option, answer)
            }
            BlockForm::Lowercase => (tail, None),
        };

        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();
        let (start, question) = match (form, caps.get(1)) {
            (BlockForm::Lowercase, Some(stem)) => {
                let offset = sentence_start(stem.as_str());
                (stem.start() + offset, stem.as_str()[offset..].to_string())
            }
            _ => (head.start(), group(1)),
        };

        blocks.push(RawMatch {
            form,
            start,
            question,
            options: [group(2), group(3), group(4), last_option.to_string()],
            answer,
        });
    }

    blocks
}

/// Byte offset where the next block on the same line begins, if any.
fn next_block_start(
    text: &str,
    tail_start: usize,
    line_end: usize,
    form: BlockForm,
) -> Option<usize> {
    let line = &text[..line_end];
    match form {
        BlockForm::Numbered => NUMBERED_NEXT_RE.find_at(line, tail_start).map(|m| m.start()),
        BlockForm::Lowercase => {
            let next = LOWERCASE_NEXT_RE.find_at(line, tail_start)?;
            if next.start() > tail_start {
                return Some(next.start());
            }
            // The stem runs straight on from option D: split the two apart.
            let question_mark = next.start() + next.as_str().find('?')?;
            Some(next.start() + split_after_option(&text[next.start()..question_mark]))
        }
    }
}

/// Split `region` (option D text followed by the next stem, without its `?`)
/// and return where the stem begins.
///
/// The stem starts at the first sentence start if there is one, otherwise at
/// the first capitalised word after option D's first word, otherwise at the
/// second word. A single word is left to the stem.
fn split_after_option(region: &str) -> usize {
    if let Some(start) = SENTENCE_START_RE
        .captures(region)
        .and_then(|caps| caps.get(1))
    {
        return start.start();
    }

    let words: Vec<_> = WORD_RE.find_iter(region).collect();
    words
        .iter()
        .skip(1)
        .find(|w| w.as_str().starts_with(|c: char| c.is_uppercase() || c.is_ascii_digit()))
        .or_else(|| words.get(1))
        .map_or(0, |w| w.start())
}

/// Offset of the last sentence start in a lowercase stem.
fn sentence_start(stem: &str) -> usize {
    SENTENCE_START_RE
        .captures_iter(stem)
        .last()
        .and_then(|caps| caps.get(1))
        .map_or(0, |m| m.start())
}

/// Split option D from a trailing `[Answer: X]` marker.
fn split_answer(tail: &str) -> (&str, Option<AnswerLetter>) {
    match NUMBERED_TAIL_RE.captures(tail) {
        Some(caps) => (
            caps.get(1).map_or(tail, |m| m.as_str()),
            answer_letter(&caps, 2),
        ),
        None => (tail, None),
    }
}

fn answer_letter(caps: &Captures<'_>, group: usize) -> Option<AnswerLetter> {
    caps.get(group)
        .and_then(|m| m.as_str().chars().next())
        .and_then(AnswerLetter::from_char)
}
