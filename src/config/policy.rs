use serde::{Deserialize, Serialize};

/// Policy for comparing a text value against a numeric one
///
/// A missing attribute is never affected by the policy: it always compares
/// as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossTypePolicy {
    /// Every cross-type comparison is false
    #[default]
    AlwaysFalse,
    /// Ordering comparators parse the text side as a number; `=` stays strict
    Coerce,
    /// Cross-type comparisons are a `TypeMismatch` error in checked evaluation
    Reject,
}
