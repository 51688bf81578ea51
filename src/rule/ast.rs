//! Abstract Syntax Tree for rule expressions

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// AST node for rule expressions
///
/// Children are boxed and owned by their parent, so a tree can neither share
/// nodes nor contain cycles, and every operator always has both children.
///
/// Parsed rules are left-deep, so a tree is as deep as its rule is long.
/// Every walk over a tree (including `Clone`, `PartialEq` and `Drop`) uses
/// an explicit stack instead of recursion.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Single comparison like "age>30"
    Operand(Operand),
    /// Two sub-rules joined by AND/OR
    Operator {
        connective: Connective,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Pending work of a post-order walk
enum Step<'a> {
    Enter(&'a Node),
    Join(Connective),
}

impl Node {
    pub fn operand(
        attribute: impl Into<String>,
        comparator: Comparator,
        literal: Literal,
    ) -> Self {
        Node::Operand(Operand {
            attribute: attribute.into(),
            comparator,
            literal,
        })
    }

    pub fn operator(connective: Connective, left: Node, right: Node) -> Self {
        Node::Operator {
            connective,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Node, right: Node) -> Self {
        Self::operator(Connective::And, left, right)
    }

    pub fn or(left: Node, right: Node) -> Self {
        Self::operator(Connective::Or, left, right)
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Node::Operand(_))
    }

    /// Number of operand leaves in the tree
    pub fn operand_count(&self) -> usize {
        self.fold(|_| 1, |_, left, right| left + right)
    }

    /// Height of the tree; a lone operand has depth 1
    pub fn depth(&self) -> usize {
        self.fold(|_| 1, |_, left, right| 1 + left.max(right))
    }

    /// Post-order fold: `leaf` maps every operand, left to right, and `join`
    /// combines the results of an operator's two children
    pub fn fold<T>(
        &self,
        mut leaf: impl FnMut(&Operand) -> T,
        mut join: impl FnMut(Connective, T, T) -> T,
    ) -> T {
        let mut steps = vec![Step::Enter(self)];
        let mut results: Vec<T> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(Node::Operand(operand)) => results.push(leaf(operand)),
                Step::Enter(Node::Operator {
                    connective,
                    left,
                    right,
                }) => {
                    steps.push(Step::Join(*connective));
                    steps.push(Step::Enter(right));
                    steps.push(Step::Enter(left));
                }
                Step::Join(connective) => match (results.pop(), results.pop()) {
                    (Some(right), Some(left)) => results.push(join(connective, left, right)),
                    _ => unreachable!(),
                },
            }
        }

        // Each join consumes two results and adds one, leaving exactly one
        match results.pop() {
            Some(result) => result,
            None => unreachable!(),
        }
    }

    /// Leaf left behind when a subtree is moved out during drop
    fn vacant() -> Self {
        Node::Operand(Operand {
            attribute: String::new(),
            comparator: Comparator::Equal,
            literal: Literal::Integer(0),
        })
    }

    /// Move `node`'s operator children onto `pending`, leaving vacant leaves
    fn detach_operators(node: &mut Node, pending: &mut Vec<Node>) {
        if let Node::Operator { left, right, .. } = node {
            for child in [left, right] {
                if !child.is_operand() {
                    pending.push(std::mem::replace(&mut **child, Node::vacant()));
                }
            }
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        self.fold(|operand| Node::Operand(operand.clone()), Node::operator)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs: Vec<(&Node, &Node)> = vec![(self, other)];

        while let Some(pair) = pairs.pop() {
            match pair {
                (Node::Operand(a), Node::Operand(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    Node::Operator {
                        connective: c1,
                        left: l1,
                        right: r1,
                    },
                    Node::Operator {
                        connective: c2,
                        left: l2,
                        right: r2,
                    },
                ) => {
                    if c1 != c2 {
                        return false;
                    }
                    pairs.push((&**r1, &**r2));
                    pairs.push((&**l1, &**l2));
                }
                _ => return false,
            }
        }

        true
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        Node::detach_operators(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            Node::detach_operators(&mut node, &mut pending);
        }
    }
}

/// Piece of the canonical text still to be written
enum Piece<'a> {
    Node(&'a Node),
    Connective(Connective),
    Close,
}

/// Canonical, fully parenthesized form: `((age > 30) AND (status = 'active'))`
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = vec![Piece::Node(self)];

        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Node(Node::Operand(operand)) => write!(f, "({})", operand)?,
                Piece::Node(Node::Operator {
                    connective,
                    left,
                    right,
                }) => {
                    f.write_str("(")?;
                    pieces.push(Piece::Close);
                    pieces.push(Piece::Node(right));
                    pieces.push(Piece::Connective(*connective));
                    pieces.push(Piece::Node(left));
                }
                Piece::Connective(connective) => write!(f, " {} ", connective)?,
                Piece::Close => f.write_str(")")?,
            }
        }

        Ok(())
    }
}

/// Single comparison of a record attribute against a literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operand {
    pub attribute: String,
    pub comparator: Comparator,
    pub literal: Literal,
}

/// Renders as `attribute comparator literal`, without parentheses
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.comparator, self.literal)
    }
}

/// Comparison operators
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Greater than (>)
    Greater,
    /// Less than (<)
    Less,
    /// Equal (=)
    Equal,
    /// Greater than or equal (>=)
    GreaterEqual,
    /// Less than or equal (<=)
    LessEqual,
    /// Any other run of `>`, `<`, `=` characters, kept verbatim
    Unrecognized(String),
}

impl Comparator {
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            ">" => Comparator::Greater,
            "<" => Comparator::Less,
            "=" => Comparator::Equal,
            ">=" => Comparator::GreaterEqual,
            "<=" => Comparator::LessEqual,
            other => Comparator::Unrecognized(other.to_string()),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Comparator::Greater => ">",
            Comparator::Less => "<",
            Comparator::Equal => "=",
            Comparator::GreaterEqual => ">=",
            Comparator::LessEqual => "<=",
            Comparator::Unrecognized(symbol) => symbol,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Comparator::Unrecognized(_))
    }

    /// Whether an ordering of `record value` against `literal` satisfies the comparator
    ///
    /// `None` (incomparable, e.g. NaN) never satisfies anything.
    pub fn holds(&self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return false;
        };
        match self {
            Comparator::Greater => ordering == Ordering::Greater,
            Comparator::Less => ordering == Ordering::Less,
            Comparator::Equal => ordering == Ordering::Equal,
            Comparator::GreaterEqual => ordering != Ordering::Less,
            Comparator::LessEqual => ordering != Ordering::Greater,
            Comparator::Unrecognized(_) => false,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Comparator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// Boolean connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "AND" => Some(Connective::And),
            "OR" => Some(Connective::Or),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }

    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Connective::And => left && right,
            Connective::Or => left || right,
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Literal values written in a rule
///
/// The syntactic kind (quoted or numeric) is fixed when the rule is parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Integer(i64),
    /// Digit run past `i64::MAX`, kept as written without leading zeros
    Digits(String),
    /// Content of a quoted literal, quotes removed
    Text(String),
}

impl Literal {
    /// Build a literal from its matched text: `'letters'` or a digit run
    pub fn from_token(token: &str) -> Self {
        if token.starts_with('\'') {
            return Literal::Text(token.replace('\'', ""));
        }

        match token.parse::<i64>() {
            Ok(i) => Literal::Integer(i),
            Err(_) => Literal::Digits(token.trim_start_matches('0').to_string()),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Integer(_) | Literal::Digits(_) => "number",
            Literal::Text(_) => "text",
        }
    }

    /// Nearest `f64`; digit runs past `f64::MAX` give infinity
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Integer(i) => Some(*i as f64),
            Literal::Digits(digits) => digits.parse().ok(),
            Literal::Text(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Digits(digits) => f.write_str(digits),
            Literal::Text(s) => write!(f, "'{}'", s),
        }
    }
}
