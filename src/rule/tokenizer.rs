//! Rule string tokenizer
//!
//! Rules are matched with patterns rather than scanned character by character:
//! whitespace is removed globally, the text is split around `AND`/`OR`, and
//! each remaining segment contributes its first `attribute comparator literal`
//! match.

use crate::rule::ast::{Comparator, Connective, Literal, Operand};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static WHITESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static CONNECTIVE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"AND|OR").unwrap());

/// `[><=]+` deliberately accepts runs like `=>` or `>>`; they are rejected at
/// evaluation time, not here.
static OPERAND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z]+)([><=]+)([0-9]+|'[a-zA-Z]+')").unwrap());

/// A piece of the whitespace-free rule text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Connective(Connective),
    Text(&'a str),
}

/// Raw operand triple as matched in the rule text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandMatch {
    pub attribute: String,
    pub comparator: String,
    pub literal: String,
}

impl OperandMatch {
    pub fn into_operand(self) -> Operand {
        Operand {
            comparator: Comparator::from_symbol(&self.comparator),
            literal: Literal::from_token(&self.literal),
            attribute: self.attribute,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Connective(Connective),
    Operand(OperandMatch),
    /// Text segment without any operand match
    Gap(String),
}

/// Remove every whitespace run from the rule text
pub fn strip_whitespace(rule: &str) -> Cow<'_, str> {
    WHITESPACE_PATTERN.replace_all(rule, "")
}

/// Split text around `AND`/`OR`, keeping the keywords in place
///
/// Adjacent keywords produce an empty text segment between them, and the
/// result always starts and ends with a text segment.
pub fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in CONNECTIVE_PATTERN.find_iter(text) {
        segments.push(Segment::Text(&text[last..m.start()]));
        if let Some(connective) = Connective::from_keyword(m.as_str()) {
            segments.push(Segment::Connective(connective));
        }
        last = m.end();
    }
    segments.push(Segment::Text(&text[last..]));

    segments
}

/// First operand triple found in a text segment
pub fn match_operand(segment: &str) -> Option<OperandMatch> {
    OPERAND_PATTERN.captures(segment).map(|caps| OperandMatch {
        attribute: caps[1].to_string(),
        comparator: caps[2].to_string(),
        literal: caps[3].to_string(),
    })
}

/// Tokenize a raw rule string
pub fn tokenize(rule: &str) -> Vec<Token> {
    let stripped = strip_whitespace(rule);

    split_segments(&stripped)
        .into_iter()
        .map(|segment| match segment {
            Segment::Connective(connective) => Token::Connective(connective),
            Segment::Text(text) => match match_operand(text) {
                Some(operand) => Token::Operand(operand),
                None => Token::Gap(text.to_string()),
            },
        })
        .collect()
}
