//! Benchmarks for rule parsing, evaluation and combination

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rule_ast_engine::record::{Record, Value};
use rule_ast_engine::rule::{combine, combine_with_cache, evaluate, parse, Node, ParseCache};

const RULES: [&str; 5] = [
    "age>30",
    "age>30ANDstatus='active'",
    "age>30ANDstatus='active'ORdepartment='sales'",
    "salary>=50000ANDexperience>3ORlevel='senior'ANDage<60",
    "a>1ANDb>2ORc>3ANDd<=4ORe=5ANDf>=6ORg<7ANDh>8",
];

fn create_test_record() -> Record {
    Record::from([
        ("age", Value::from(35i64)),
        ("status", Value::from("active")),
        ("department", Value::from("marketing")),
        ("salary", Value::from(62000i64)),
        ("experience", Value::from(4i64)),
        ("level", Value::from("junior")),
        ("a", Value::from(2i64)),
        ("b", Value::from(1i64)),
        ("c", Value::from(3.5)),
    ])
}

fn benchmark_rule_parsing(c: &mut Criterion) {
    c.bench_function("rule_parsing_cold", |b| {
        b.iter(|| {
            for rule in &RULES {
                let _ = black_box(parse(rule));
            }
        })
    });

    c.bench_function("rule_parsing_cached", |b| {
        let mut cache = ParseCache::new();
        // Warm up cache
        for rule in &RULES {
            let _ = cache.get_or_parse(rule);
        }

        b.iter(|| {
            for rule in &RULES {
                let _ = black_box(cache.get_or_parse(rule));
            }
        })
    });
}

fn benchmark_rule_evaluation(c: &mut Criterion) {
    let asts: Vec<Node> = RULES.iter().map(|r| parse(r).unwrap()).collect();
    let record = create_test_record();

    c.bench_function("rule_evaluation", |b| {
        b.iter(|| {
            for ast in &asts {
                black_box(evaluate(black_box(ast), black_box(&record)));
            }
        })
    });
}

fn benchmark_rule_combination(c: &mut Criterion) {
    let asts: Vec<Node> = RULES.iter().map(|r| parse(r).unwrap()).collect();

    c.bench_function("combine_rules", |b| {
        b.iter(|| black_box(combine(black_box(&asts))))
    });

    c.bench_function("combine_rules_cached", |b| {
        let mut cache = ParseCache::new();
        b.iter(|| black_box(combine_with_cache(black_box(&asts), &mut cache)))
    });
}

criterion_group!(
    benches,
    benchmark_rule_parsing,
    benchmark_rule_evaluation,
    benchmark_rule_combination
);
criterion_main!(benches);
