//! End-to-end session: create rules, evaluate the active one, combine, project

use rule_ast_engine::config::{CrossTypePolicy, EngineConfig};
use rule_ast_engine::record::Record;
use rule_ast_engine::rule::{evaluate, parse, project, render};
use rule_ast_engine::{RuleEngineError, RuleStore};

#[test]
fn test_session_flow() {
    let mut store = RuleStore::new();

    store.create_rule("age>30ANDstatus='active'").unwrap();
    let record = Record::from_json(r#"{"age": 35, "status": "active"}"#).unwrap();
    assert!(store.evaluate_active(&record));

    let record = Record::from_json(r#"{"age": 20, "status": "active"}"#).unwrap();
    assert!(!store.evaluate_active(&record));

    // A rejected rule does not change the active rule
    assert!(matches!(
        store.create_rule("ANDAND"),
        Err(RuleEngineError::MalformedRule(_))
    ));
    assert_eq!(store.len(), 1);

    store.create_rule("department='sales'ORsalary>50000").unwrap();
    let record = Record::from_json(r#"{"department": "marketing", "salary": 60000}"#).unwrap();
    assert!(store.evaluate_active(&record));

    assert_eq!(
        store.render_rules(),
        vec![
            "Rule 1: ((age > 30) AND (status = 'active'))",
            "Rule 2: ((department = 'sales') OR (salary > 50000))",
        ]
    );

    let combined = store.combine_rules().unwrap().unwrap();
    assert_eq!(
        render(&combined),
        "(((age > 30) AND (status = 'active')) OR ((department = 'sales') OR (salary > 50000)))"
    );
    assert_eq!(parse(&render(&combined)).unwrap(), {
        // Reparsing the rendering folds left, flattening the right-hand group
        parse("age>30ANDstatus='active'ORdepartment='sales'ORsalary>50000").unwrap()
    });

    let tree = serde_json::to_value(project(&combined)).unwrap();
    assert_eq!(tree["name"], "OR");
    assert_eq!(tree["children"][0]["name"], "AND");
    assert_eq!(tree["children"][1]["children"][0]["name"], "department = 'sales'");
}

#[test]
fn test_session_with_config_from_json() {
    let config = EngineConfig::from_json(r#"{"cross_type": "coerce"}"#).unwrap();
    assert_eq!(config.cross_type, CrossTypePolicy::Coerce);

    let mut store = RuleStore::with_config(config);
    store.create_rule("age >= 18").unwrap();

    let record = Record::from_json(r#"{"age": "21"}"#).unwrap();
    assert!(store.evaluate_active(&record));
}

#[test]
fn test_record_decode_failure() {
    assert!(matches!(
        Record::from_json(r#"{"age": 35"#),
        Err(RuleEngineError::RecordDecode(_))
    ));
}

#[test]
fn test_long_rule_session() {
    let mut store = RuleStore::new();
    let rule = format!("{}b>5", "a>1AND".repeat(20_000));
    assert_eq!(store.create_rule(&rule).unwrap().depth(), 20_001);
    store.create_rule("b>5").unwrap();

    // The second combine is served from the parse cache
    for _ in 0..2 {
        let combined = store.combine_rules().unwrap().unwrap();
        assert_eq!(combined.depth(), 20_002);
        assert_eq!(combined.operand_count(), 20_002);

        let record = Record::from_json(r#"{"a": 0, "b": 9}"#).unwrap();
        assert!(evaluate(&combined, &record));
        assert!(store.evaluate_active(&record));
    }

    let digits = "9".repeat(400);
    store.create_rule(&format!("x<{}", digits)).unwrap();
    let combined = store.combine_rules().unwrap().unwrap();
    assert!(render(&combined).ends_with(&format!("(x < {}))", digits)));
}
