//! Rule string parser
//!
//! Builds an AST with a single left-to-right reduction over the tokenized
//! segments. There is no precedence between AND and OR and no grouping:
//! `a>1ANDb>2ORc>3` is `((a>1 AND b>2) OR c>3)`.

use crate::error::{Result, RuleEngineError};
use crate::rule::ast::{Connective, Node};
use crate::rule::tokenizer::{tokenize, Token};
use smallvec::SmallVec;
use tracing::debug;

/// Parse a rule string into an AST
pub fn parse(rule: &str) -> Result<Node> {
    build(tokenize(rule), rule)
}

fn build(tokens: Vec<Token>, rule: &str) -> Result<Node> {
    let mut connectives: SmallVec<[Connective; 8]> = SmallVec::new();
    let mut nodes: SmallVec<[Node; 8]> = SmallVec::new();
    let mut found_operand = false;

    for token in tokens {
        match token {
            Token::Connective(connective) => connectives.push(connective),
            Token::Operand(operand) => {
                found_operand = true;
                nodes.push(Node::Operand(operand.into_operand()));
            }
            // Segments without an operand contribute no node
            Token::Gap(text) => {
                if !text.is_empty() {
                    debug!(segment = %text, "skipping segment without operand");
                }
            }
        }

        reduce(&mut connectives, &mut nodes);
    }

    if !found_operand {
        return Err(RuleEngineError::MalformedRule(format!(
            "no operand found in '{}'",
            rule
        )));
    }

    // Trailing or doubled connectives are left over; they are dropped
    if !connectives.is_empty() {
        debug!(rule, dropped = connectives.len(), "dropping surplus connectives");
    }

    match nodes.len() {
        1 => nodes
            .pop()
            .ok_or_else(|| RuleEngineError::MalformedRule(format!("empty rule '{}'", rule))),
        n => Err(RuleEngineError::MalformedRule(format!(
            "rule '{}' reduced to {} nodes instead of one",
            rule, n
        ))),
    }
}

/// Join the two topmost nodes with the topmost connective while both are available
fn reduce(connectives: &mut SmallVec<[Connective; 8]>, nodes: &mut SmallVec<[Node; 8]>) {
    while !connectives.is_empty() && nodes.len() >= 2 {
        if let (Some(connective), Some(right), Some(left)) =
            (connectives.pop(), nodes.pop(), nodes.pop())
        {
            nodes.push(Node::operator(connective, left, right));
        }
    }
}
