//! Parse cache for repeated rule strings

use crate::error::Result;
use crate::rule::ast::Node;
use crate::rule::parser;
use ahash::AHashMap;

/// Rule string to AST cache, owned by whoever parses repeatedly
#[derive(Debug, Clone, Default)]
pub struct ParseCache {
    entries: AHashMap<String, Node>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: AHashMap::with_capacity(capacity),
        }
    }

    /// Get or parse a rule string; failed parses are not cached
    pub fn get_or_parse(&mut self, rule: &str) -> Result<Node> {
        if let Some(ast) = self.entries.get(rule) {
            return Ok(ast.clone());
        }

        let ast = parser::parse(rule)?;
        self.entries.insert(rule.to_string(), ast.clone());
        Ok(ast)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
