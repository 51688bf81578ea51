//! Rule AST Engine - compiles textual boolean rules into ASTs
//!
//! Rules such as `age>30ANDstatus='active'` are parsed into a binary tree of
//! connectives and comparisons, evaluated against data records, rendered back
//! to canonical text and combined with OR. Optional Python bindings are
//! available behind the `python` feature.
//!
//! ```
//! use rule_ast_engine::record::Record;
//! use rule_ast_engine::rule::{evaluate, parse, render};
//!
//! let ast = parse("age>30ANDstatus='active'").unwrap();
//! assert_eq!(render(&ast), "((age > 30) AND (status = 'active'))");
//!
//! let record = Record::from_json(r#"{"age": 35, "status": "active"}"#).unwrap();
//! assert!(evaluate(&ast, &record));
//! ```

pub mod config;
pub mod error;
pub mod record;
pub mod rule;
pub mod store;

#[cfg(feature = "python")]
mod python;

pub use crate::error::{Result, RuleEngineError};
pub use crate::store::RuleStore;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn rule_ast_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyRuleEngine>()?;
    Ok(())
}
