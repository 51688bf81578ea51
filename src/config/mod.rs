//! Engine configuration
//!
//! Holds the knobs that change evaluation semantics. Configuration can be
//! built in code or decoded from JSON.

mod policy;

pub use policy::*;

use crate::error::{Result, RuleEngineError};
use serde::{Deserialize, Serialize};

/// Configuration shared by the evaluator and the rule store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// How a text value is compared against a numeric one
    pub cross_type: CrossTypePolicy,
}

impl EngineConfig {
    pub fn new(cross_type: CrossTypePolicy) -> Self {
        Self { cross_type }
    }

    /// Decode a configuration from JSON, e.g. `{"cross_type": "coerce"}`
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RuleEngineError::InvalidConfig(e.to_string()))
    }
}
