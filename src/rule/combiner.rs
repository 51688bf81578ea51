//! Rule combination
//!
//! Rules are joined with OR, left to right. Every input is reparsed from its
//! canonical rendering, so the combined tree never shares nodes with the
//! rules it was built from.

use crate::error::Result;
use crate::rule::ast::Node;
use crate::rule::cache::ParseCache;
use crate::rule::render::render;
use tracing::debug;

/// Combine rules into one OR-chain
///
/// Returns `None` for an empty input, the (reparsed) rule itself for a single
/// input, and `((r0 OR r1) OR r2) ...` otherwise.
pub fn combine(rules: &[Node]) -> Result<Option<Node>> {
    combine_with_cache(rules, &mut ParseCache::new())
}

/// Same as [`combine`], reusing previously parsed renderings
pub fn combine_with_cache(rules: &[Node], cache: &mut ParseCache) -> Result<Option<Node>> {
    let rendered: Vec<String> = rules.iter().map(render).collect();
    combine_strs_with_cache(&rendered, cache)
}

/// Parse rule strings and combine them into one OR-chain
pub fn combine_strs<S: AsRef<str>>(rules: &[S]) -> Result<Option<Node>> {
    combine_strs_with_cache(rules, &mut ParseCache::new())
}

pub fn combine_strs_with_cache<S: AsRef<str>>(
    rules: &[S],
    cache: &mut ParseCache,
) -> Result<Option<Node>> {
    debug!(count = rules.len(), "combining rules");

    rules.iter().try_fold(None, |combined, rule| {
        let ast = cache.get_or_parse(rule.as_ref())?;
        Ok(Some(match combined {
            None => ast,
            Some(left) => Node::or(left, ast),
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleEngineError;
    use crate::record::{Record, Value};
    use crate::rule::evaluator::evaluate;
    use crate::rule::parser::parse;

    #[test]
    fn test_combine_empty() {
        assert_eq!(combine(&[]).unwrap(), None);
        assert_eq!(combine_strs::<&str>(&[]).unwrap(), None);
    }

    #[test]
    fn test_combine_single_is_identity() {
        let rule = parse("age>30ANDstatus='active'").unwrap();
        assert_eq!(combine(std::slice::from_ref(&rule)).unwrap(), Some(rule));
    }

    #[test]
    fn test_combine_scenario() {
        let combined = combine_strs(&["age>30", "status='active'"]).unwrap().unwrap();
        assert_eq!(render(&combined), "((age > 30) OR (status = 'active'))");

        let record = |age: i64, status: &str| {
            Record::from([("age", Value::from(age)), ("status", Value::from(status))])
        };
        assert!(evaluate(&combined, &record(35, "inactive")));
        assert!(evaluate(&combined, &record(20, "active")));
        assert!(!evaluate(&combined, &record(20, "inactive")));
    }

    #[test]
    fn test_combine_left_leaning() {
        let rules = ["a>1", "b>2", "c>3"].map(|r| parse(r).unwrap());
        let combined = combine(&rules).unwrap().unwrap();

        let [a, b, c] = rules;
        assert_eq!(combined, Node::or(Node::or(a, b), c));
    }

    #[test]
    fn test_combine_compound_rules_keep_their_shape() {
        let rules = ["a>1ANDb>2", "c>3"].map(|r| parse(r).unwrap());
        let combined = combine(&rules).unwrap().unwrap();
        assert_eq!(
            render(&combined),
            "(((a > 1) AND (b > 2)) OR (c > 3))"
        );
    }

    #[test]
    fn test_combine_strs_propagates_parse_errors() {
        assert!(matches!(
            combine_strs(&["age>30", "ANDAND"]),
            Err(RuleEngineError::MalformedRule(_))
        ));
    }

    #[test]
    fn test_combine_with_cache_reuses_entries() {
        let rules = ["a>1", "a>1", "b>2"].map(|r| parse(r).unwrap());
        let mut cache = ParseCache::new();
        combine_with_cache(&rules, &mut cache).unwrap();
        assert_eq!(cache.len(), 2);
    }
}
