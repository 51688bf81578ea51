//! Rule evaluator

use crate::config::{CrossTypePolicy, EngineConfig};
use crate::error::{Result, RuleEngineError};
use crate::record::{AttributeSource, Value};
use crate::rule::ast::{Comparator, Connective, Literal, Node, Operand};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Evaluate an AST against a record with the default configuration
pub fn evaluate<S: AttributeSource + ?Sized>(node: &Node, source: &S) -> bool {
    Evaluator::default().evaluate(Some(node), source)
}

/// Evaluates rules under a given [`EngineConfig`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: EngineConfig,
}

impl Evaluator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a rule; an absent rule is `false`
    ///
    /// Never fails: type mismatches count as `false` whatever the policy.
    pub fn evaluate<S: AttributeSource + ?Sized>(&self, node: Option<&Node>, source: &S) -> bool {
        match node {
            Some(node) => self.check(node, source, false).unwrap_or(false),
            None => false,
        }
    }

    /// Evaluate a rule, reporting cross-type comparisons under [`CrossTypePolicy::Reject`]
    pub fn try_evaluate<S: AttributeSource + ?Sized>(
        &self,
        node: Option<&Node>,
        source: &S,
    ) -> Result<bool> {
        match node {
            Some(node) => self.check(node, source, true),
            None => Ok(false),
        }
    }

    /// Every operand is checked, left to right; under `strict` the first
    /// failure is reported once the whole tree has been visited
    fn check<S: AttributeSource + ?Sized>(&self, node: &Node, source: &S, strict: bool) -> Result<bool> {
        let mut failure = None;
        let result = node.fold(
            |operand| match self.check_operand(operand, source) {
                Ok(result) => result,
                Err(err) => {
                    if strict && failure.is_none() {
                        failure = Some(err);
                    }
                    false
                }
            },
            Connective::apply,
        );

        match failure {
            Some(err) => Err(err),
            None => Ok(result),
        }
    }

    fn check_operand<S: AttributeSource + ?Sized>(&self, operand: &Operand, source: &S) -> Result<bool> {
        let Some(value) = source.attribute(&operand.attribute) else {
            return Ok(false);
        };
        let comparator = &operand.comparator;
        if !comparator.is_recognized() {
            return Ok(false);
        }

        match (value, &operand.literal) {
            (Value::Text(text), Literal::Text(literal)) => {
                Ok(comparator.holds(Some(strip_quotes(text).as_ref().cmp(literal.as_str()))))
            }
            (Value::Integer(v), Literal::Integer(l)) => Ok(comparator.holds(Some(v.cmp(l)))),
            (Value::Text(text), literal) => {
                self.check_cross_type(operand, value, &strip_quotes(text), literal.as_f64(), false)
            }
            (value, Literal::Text(literal)) => {
                self.check_cross_type(operand, value, literal, value.as_f64(), true)
            }
            // `Digits` only holds runs past `i64::MAX`
            (Value::Integer(_), Literal::Digits(_)) => Ok(comparator.holds(Some(Ordering::Less))),
            (Value::Decimal(v), Literal::Integer(l)) => {
                Ok(comparator.holds(compare_decimal_integer(*v, *l)))
            }
            (Value::Decimal(v), Literal::Digits(digits)) => {
                Ok(comparator.holds(compare_decimal_digits(*v, digits)))
            }
        }
    }

    /// Compare a text side against a numeric side; `number_on_record` tells
    /// which side of the comparison the number came from.
    fn check_cross_type(
        &self,
        operand: &Operand,
        value: &Value,
        text: &str,
        number: Option<f64>,
        number_on_record: bool,
    ) -> Result<bool> {
        match self.config.cross_type {
            CrossTypePolicy::AlwaysFalse => Ok(false),
            CrossTypePolicy::Reject => Err(RuleEngineError::TypeMismatch {
                attribute: operand.attribute.clone(),
                expected: operand.literal.kind_name(),
                actual: value.kind_name(),
            }),
            CrossTypePolicy::Coerce => {
                if operand.comparator == Comparator::Equal {
                    return Ok(false);
                }
                let (Some(number), Ok(coerced)) = (number, text.trim().parse::<f64>()) else {
                    return Ok(false);
                };
                let ordering = if number_on_record {
                    number.partial_cmp(&coerced)
                } else {
                    coerced.partial_cmp(&number)
                };
                Ok(operand.comparator.holds(ordering))
            }
        }
    }
}

/// Exact ordering of a record decimal against an integer literal
fn compare_decimal_integer(value: f64, literal: i64) -> Option<Ordering> {
    match value.partial_cmp(&(literal as f64))? {
        // Equal to a converted i64 means integral and within 2^63
        Ordering::Equal => Some((value as i128).cmp(&i128::from(literal))),
        ordering => Some(ordering),
    }
}

/// Exact ordering of a record decimal against a digit run past `i64::MAX`
fn compare_decimal_digits(value: f64, digits: &str) -> Option<Ordering> {
    if value.is_nan() {
        return None;
    }
    // 2^63; every f64 from here up is integral
    if value < 9_223_372_036_854_775_808.0 {
        return Some(Ordering::Less);
    }
    if value.is_infinite() {
        return Some(Ordering::Greater);
    }

    let whole = format!("{:.0}", value);
    Some(
        whole
            .len()
            .cmp(&digits.len())
            .then_with(|| whole.as_str().cmp(digits)),
    )
}

/// Record text values are compared with their `'` characters removed
fn strip_quotes(text: &str) -> Cow<'_, str> {
    if text.contains('\'') {
        Cow::Owned(text.replace('\'', ""))
    } else {
        Cow::Borrowed(text)
    }
}
