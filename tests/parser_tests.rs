// tests/parser_tests.rs

use spl_lang::ast::{
    AggFunc, AggSpec, BinOp, Command, CompareOp, Condition, ConditionOp, Direction, Expr,
    FieldsMode, Operand, SortKey,
};
use spl_lang::lexer::Lexer;
use spl_lang::parser::Parser;
use spl_lang::query::{parse_query, parse_stage};
use spl_lang::{SplError, Value};

fn expr(input: &str) -> Expr {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer).unwrap();
    parser.parse().unwrap()
}

fn conditions(stage: &str) -> Vec<Condition> {
    match parse_stage(stage).unwrap() {
        Command::Search(conditions) => conditions,
        other => panic!("Expected search, got {:?}", other),
    }
}

fn agg(function: AggFunc, field: Option<&str>, alias: Option<&str>) -> AggSpec {
    AggSpec {
        function,
        field: field.map(String::from),
        alias: alias.map(String::from),
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_precedence() {
    // Should be: Add(1, Multiply(2, 3))
    match expr("1 + 2 * 3") {
        Expr::BinaryOp {
            op: BinOp::Add,
            left,
            right,
        } => {
            assert_eq!(*left, Expr::Literal(Value::Integer(1)));
            assert!(matches!(*right, Expr::BinaryOp { op: BinOp::Multiply, .. }));
        }
        other => panic!("Expected addition, got {:?}", other),
    }
}

#[test]
fn test_parentheses() {
    // Should be: Multiply(Add(1, 2), 3)
    match expr("(1 + 2) * 3") {
        Expr::BinaryOp {
            op: BinOp::Multiply,
            left,
            right,
        } => {
            assert!(matches!(*left, Expr::BinaryOp { op: BinOp::Add, .. }));
            assert_eq!(*right, Expr::Literal(Value::Integer(3)));
        }
        other => panic!("Expected multiplication, got {:?}", other),
    }
}

#[test]
fn test_left_associativity() {
    assert_eq!(
        expr("10 - 4 - 3"),
        Expr::binary(
            BinOp::Subtract,
            Expr::binary(BinOp::Subtract, Expr::literal(10i64), Expr::literal(4i64)),
            Expr::literal(3i64),
        )
    );
}

#[test]
fn test_unary_minus() {
    assert_eq!(
        expr("-price"),
        Expr::binary(BinOp::Subtract, Expr::literal(0i64), Expr::field("price"))
    );
}

#[test]
fn test_concatenation() {
    assert_eq!(
        expr(r#"first . " " . last"#),
        Expr::binary(
            BinOp::Concat,
            Expr::binary(BinOp::Concat, Expr::field("first"), Expr::literal(" ")),
            Expr::field("last"),
        )
    );
}

#[test]
fn test_if_expression() {
    match expr(r#"if(score >= 80, "pass", "fail")"#) {
        Expr::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            assert_eq!(
                *condition,
                Condition {
                    field: "score".into(),
                    op: ConditionOp::Compare(CompareOp::GreaterEqual),
                    value: Operand::Number(Value::Integer(80)),
                }
            );
            assert_eq!(*then_branch, Expr::literal("pass"));
            assert_eq!(*else_branch, Expr::literal("fail"));
        }
        other => panic!("Expected conditional, got {:?}", other),
    }
}

#[test]
fn test_if_condition_uses_search_grammar() {
    let condition = |input: &str| match expr(input) {
        Expr::Conditional { condition, .. } => *condition,
        other => panic!("Expected conditional, got {:?}", other),
    };

    assert_eq!(condition("if(city=NYC, 1, 0)").value, Operand::Word("NYC".into()));
    assert_eq!(condition("if(city=*,1,0)").op, ConditionOp::Exists);
    assert_eq!(condition("if(city != *, 1, 0)").op, ConditionOp::NotExists);
    assert_eq!(condition(r#"if(score="85", 1, 0)"#).value, Operand::Quoted("85".into()));
    assert_eq!(condition("if(http-status=200, 1, 0)").field, "http-status");
    assert_eq!(condition("if(avg(score) > 80, 1, 0)").field, "avg(score)");
}

#[test]
fn test_aggregate_call_is_field_reference() {
    assert_eq!(expr("avg(score) * 2"), Expr::binary(BinOp::Multiply, Expr::field("avg(score)"), Expr::literal(2i64)));
    assert_eq!(expr("count()"), Expr::field("count"));
}

#[test]
fn test_expression_errors() {
    let cases = ["(1 + 2", "1 +", "foo(1)", "if(a > 1, 2)", "if(a > *, 1, 0)", "if(a, 1, 0)", "1 2"];
    for input in cases {
        let result = Parser::new(Lexer::new(input)).and_then(|mut p| p.parse());
        assert!(result.is_err(), "Expected error for: {}", input);
    }
}

// ============================================================================
// Search Conditions
// ============================================================================

#[test]
fn test_implicit_search() {
    assert_eq!(
        conditions(r#"city="NYC" age>30"#),
        vec![
            Condition {
                field: "city".into(),
                op: ConditionOp::Compare(CompareOp::Equal),
                value: Operand::Quoted("NYC".into()),
            },
            Condition {
                field: "age".into(),
                op: ConditionOp::Compare(CompareOp::GreaterThan),
                value: Operand::Number(Value::Integer(30)),
            },
        ]
    );
}

#[test]
fn test_search_and_where_keywords() {
    let implicit = conditions("status=200");
    assert_eq!(conditions("search status=200"), implicit);
    assert_eq!(conditions("WHERE status = 200"), implicit);
    assert_eq!(conditions("status==200"), implicit);
}

#[test]
fn test_field_comparison_and_words() {
    let parsed = conditions("where score > threshold AND path=/api/v1");
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].value, Operand::Word("threshold".into()));
    assert_eq!(parsed[1].value, Operand::Word("/api/v1".into()));
}

#[test]
fn test_wildcards() {
    assert!(conditions("*").is_empty());

    let parsed = conditions("email=* phone!=*");
    assert_eq!(parsed[0].op, ConditionOp::Exists);
    assert_eq!(parsed[1].op, ConditionOp::NotExists);

    assert!(parse_stage("age>*").is_err());
}

#[test]
fn test_condition_on_aggregate_output() {
    let parsed = conditions("where avg(score) > 80");
    assert_eq!(parsed[0].field, "avg(score)");
    assert_eq!(conditions("where mean( score )>80"), parsed);
    assert_eq!(conditions("count()>1")[0].field, "count");
}

#[test]
fn test_field_names_are_read_up_to_the_operator() {
    assert_eq!(
        conditions("http-status=200 user.name!=bob"),
        vec![
            Condition {
                field: "http-status".into(),
                op: ConditionOp::Compare(CompareOp::Equal),
                value: Operand::Number(Value::Integer(200)),
            },
            Condition {
                field: "user.name".into(),
                op: ConditionOp::Compare(CompareOp::NotEqual),
                value: Operand::Word("bob".into()),
            },
        ]
    );
}

#[test]
fn test_subsearch_is_not_supported() {
    let err = parse_query("[search a=1] | stats count").unwrap_err();
    assert!(matches!(err, SplError::Parse { .. }));
}

#[test]
fn test_search_errors_are_parse_errors() {
    for stage in ["city", r#"city="NYC"#, "age >"] {
        let err = parse_stage(stage).unwrap_err();
        assert!(matches!(err, SplError::Parse { .. }), "Expected parse error for: {}", stage);
    }
}

// ============================================================================
// Stats
// ============================================================================

#[test]
fn test_stats_with_aliases_and_group_by() {
    assert_eq!(
        parse_stage("stats count as total avg(age) as average by city").unwrap(),
        Command::Stats {
            aggregations: vec![
                agg(AggFunc::Count, None, Some("total")),
                agg(AggFunc::Avg, Some("age"), Some("average")),
            ],
            group_by: vec!["city".into()],
        }
    );
}

#[test]
fn test_comma_and_space_lists_are_equivalent() {
    let spaced = parse_stage("stats count sum(price) dc(category) by store region").unwrap();
    let commas = parse_stage("stats count, sum(price), dc(category) by store, region").unwrap();
    assert_eq!(spaced, commas);
}

#[test]
fn test_aggregation_aliases() {
    assert_eq!(
        parse_stage("stats mean(x) distinct_count(y) STDEVS(z)").unwrap(),
        Command::Stats {
            aggregations: vec![
                agg(AggFunc::Avg, Some("x"), None),
                agg(AggFunc::Dc, Some("y"), None),
                agg(AggFunc::StdevS, Some("z"), None),
            ],
            group_by: vec![],
        }
    );
}

#[test]
fn test_eventstats() {
    assert_eq!(
        parse_stage("eventstats avg(score) as city_avg by city").unwrap(),
        Command::EventStats {
            aggregations: vec![agg(AggFunc::Avg, Some("score"), Some("city_avg"))],
            group_by: vec!["city".into()],
        }
    );
}

#[test]
fn test_stats_errors() {
    let cases = [
        "stats",
        "stats median(x)",
        "stats avg",
        "stats sum()",
        "stats count by",
        "stats count as",
        "stats by city",
    ];
    for stage in cases {
        let err = parse_stage(stage).unwrap_err();
        assert!(matches!(err, SplError::Parse { .. }), "Expected parse error for: {}", stage);
    }
}

// ============================================================================
// Fields, Rename, Eval
// ============================================================================

#[test]
fn test_fields() {
    assert_eq!(
        parse_stage("fields name, age").unwrap(),
        Command::Fields {
            mode: FieldsMode::Include,
            fields: vec!["name".into(), "age".into()],
        }
    );
    assert_eq!(
        parse_stage("fields - score").unwrap(),
        Command::Fields {
            mode: FieldsMode::Exclude,
            fields: vec!["score".into()],
        }
    );
    assert_eq!(parse_stage("table name age").unwrap(), parse_stage("fields + name, age").unwrap());
    assert!(parse_stage("fields -").is_err());
}

#[test]
fn test_rename() {
    assert_eq!(
        parse_stage(r#"rename name as full_name, city AS "home city""#).unwrap(),
        Command::Rename(vec![
            ("name".into(), "full_name".into()),
            ("city".into(), "home city".into()),
        ])
    );
    assert!(parse_stage("rename name full_name").is_err());
}

#[test]
fn test_eval() {
    assert_eq!(
        parse_stage("eval total = price * quantity").unwrap(),
        Command::Eval {
            target: "total".into(),
            expr: Expr::binary(BinOp::Multiply, Expr::field("price"), Expr::field("quantity")),
        }
    );
}

#[test]
fn test_eval_errors_are_evaluation_errors() {
    for stage in ["eval x = (1 + 2", "eval x = 1 +", "eval = 5", "eval x = nope(1)"] {
        let err = parse_stage(stage).unwrap_err();
        assert!(
            matches!(err, SplError::Evaluation { .. }),
            "Expected evaluation error for: {}",
            stage
        );
    }
}

// ============================================================================
// Sort, Head, Tail
// ============================================================================

#[test]
fn test_sort() {
    let key = |field: &str, direction| SortKey {
        field: field.into(),
        direction,
    };
    assert_eq!(
        parse_stage("sort city, -age, +name, - score").unwrap(),
        Command::Sort(vec![
            key("city", Direction::Asc),
            key("age", Direction::Desc),
            key("name", Direction::Asc),
            key("score", Direction::Desc),
        ])
    );
    assert!(parse_stage("sort").is_err());
    assert!(parse_stage("sort city -").is_err());
}

#[test]
fn test_head_and_tail() {
    assert_eq!(parse_stage("head").unwrap(), Command::Head(10));
    assert_eq!(parse_stage("head 3").unwrap(), Command::Head(3));
    assert_eq!(parse_stage("tail").unwrap(), Command::Tail(None));
    assert_eq!(parse_stage("tail 0").unwrap(), Command::Tail(Some(0)));
    assert!(parse_stage("head -1").is_err());
    assert!(parse_stage("tail two").is_err());
}

// ============================================================================
// Whole Queries
// ============================================================================

#[test]
fn test_query_stages_keep_their_text() {
    let query = parse_query(r#" city="NYC" | stats avg(score) "#).unwrap();
    assert_eq!(query.len(), 2);
    assert_eq!(query.stages[0].text, r#"city="NYC""#);
    assert_eq!(query.stages[1].text, "stats avg(score)");
}

#[test]
fn test_one_bad_stage_fails_the_query() {
    let err = parse_query("head 5 | stats median(x) | tail 1").unwrap_err();
    assert_eq!(err.stage(), Some("stats median(x)"));
}
