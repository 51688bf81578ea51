//! Append-only rule store
//!
//! The store owns every rule created during a session. Rules are never
//! modified or removed once stored; the most recently created rule is the
//! active one for evaluation.


use crate::config::EngineConfig;
use crate::error::Result;
use crate::record::AttributeSource;
use crate::rule::{combine_with_cache, parse, render, Evaluator, Node, ParseCache};
use tracing::{info, warn};

/// Session rule list
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: Vec<Node>,
    evaluator: Evaluator,
    cache: ParseCache,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            evaluator: Evaluator::new(config),
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.evaluator.config()
    }

    /// Parse a rule and append it to the store
    ///
    /// On error nothing is stored.
    pub fn create_rule(&mut self, rule: &str) -> Result<&Node> {
        let ast = parse(rule).inspect_err(|e| warn!(rule, error = %e, "rejected rule"))?;

        info!(
            index = self.rules.len(),
            rule,
            operands = ast.operand_count(),
            depth = ast.depth(),
            "rule created"
        );
        self.rules.push(ast);

        Ok(&self.rules[self.rules.len() - 1])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.rules.get(index)
    }

    pub fn rules(&self) -> &[Node] {
        &self.rules
    }

    /// The most recently created rule
    pub fn active(&self) -> Option<&Node> {
        self.rules.last()
    }

    /// Display lines for the rule list: `Rule 1: (age > 30)`
    pub fn render_rules(&self) -> Vec<String> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("Rule {}: {}", i + 1, render(rule)))
            .collect()
    }

    /// OR-combination of every stored rule; `None` when the store is empty
    pub fn combine_rules(&mut self) -> Result<Option<Node>> {
        combine_with_cache(&self.rules, &mut self.cache)
    }

    /// Evaluate the active rule; an empty store evaluates to `false`
    pub fn evaluate_active<S: AttributeSource + ?Sized>(&self, source: &S) -> bool {
        self.evaluator.evaluate(self.active(), source)
    }

    /// Checked variant of [`RuleStore::evaluate_active`]
    pub fn try_evaluate_active<S: AttributeSource + ?Sized>(&self, source: &S) -> Result<bool> {
        self.evaluator.try_evaluate(self.active(), source)
    }
}
