//! Python bindings for the rule store

use crate::config::EngineConfig;
use crate::record::Record;
use crate::rule::{project, render};
use crate::store::RuleStore;
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

/// Rule engine session exposed to Python
///
/// Holds an append-only rule list; `evaluate` always uses the most recently
/// created rule.
#[pyclass(name = "RuleEngine")]
pub struct PyRuleEngine {
    store: RuleStore,
}

#[pymethods]
impl PyRuleEngine {
    /// Create an engine session
    ///
    /// # Arguments
    /// * `config` - Optional JSON configuration, e.g. `{"cross_type": "coerce"}`
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&str>) -> PyResult<Self> {
        let config = match config {
            Some(json) => EngineConfig::from_json(json)?,
            None => EngineConfig::default(),
        };
        Ok(Self {
            store: RuleStore::with_config(config),
        })
    }

    /// Parse and store a rule, returning its canonical rendering
    ///
    /// # Raises
    /// ValueError if the rule contains no operand
    fn create_rule(&mut self, rule: &str) -> PyResult<String> {
        let ast = self.store.create_rule(rule)?;
        Ok(render(ast))
    }

    /// Rule list display lines, e.g. `["Rule 1: (age > 30)"]`
    fn rules(&self) -> Vec<String> {
        self.store.render_rules()
    }

    /// Canonical rendering of all rules joined with OR, or None when empty
    fn combine_rules(&mut self) -> PyResult<Option<String>> {
        Ok(self.store.combine_rules()?.as_ref().map(render))
    }

    /// Evaluate the active rule against a JSON record
    ///
    /// # Raises
    /// ValueError if the record is not a JSON object of strings and numbers
    fn evaluate(&self, record_json: &str) -> PyResult<bool> {
        let record = Record::from_json(record_json)?;
        Ok(self.store.try_evaluate_active(&record)?)
    }

    /// Labeled tree of a stored rule as JSON (`{"name": ..., "children": [...]}`)
    ///
    /// Defaults to the active rule; returns None when the store is empty.
    #[pyo3(signature = (index=None))]
    fn tree(&self, index: Option<usize>) -> PyResult<Option<String>> {
        let node = match index {
            Some(i) => Some(self.store.get(i).ok_or_else(|| {
                PyIndexError::new_err(format!("no rule at index {}", i))
            })?),
            None => self.store.active(),
        };

        node.map(|node| {
            serde_json::to_string(&project(node)).map_err(|e| PyValueError::new_err(e.to_string()))
        })
        .transpose()
    }

    fn __len__(&self) -> usize {
        self.store.len()
    }
}
