// tests/stats_tests.rs

use serde_json::json;
use spl_lang::{Spl, Value, json::records_to_json};

fn sales() -> Spl {
    Spl::from_json(json!([
        {"store": "north", "category": "food", "price": 10, "qty": 2},
        {"store": "south", "category": "toys", "price": 25.5, "qty": 1},
        {"store": "north", "category": "toys", "price": 40, "qty": 1},
        {"store": "north", "category": "food", "price": 10, "qty": 5},
        {"store": "south", "category": "food", "price": "n/a"},
    ]))
    .unwrap()
}

fn one_row(query: &str) -> serde_json::Value {
    one_row_of(&sales(), query)
}

fn one_row_of(spl: &Spl, query: &str) -> serde_json::Value {
    let out = spl.search(query).unwrap();
    assert_eq!(out.len(), 1, "Expected one row for: {}", query);
    records_to_json(out)[0].clone()
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_count_variants() {
    assert_eq!(one_row("stats count count(qty) count(missing)"), json!({"count": 5, "count(qty)": 4, "count(missing)": 0}));
}

#[test]
fn test_sum_types() {
    assert_eq!(one_row("stats sum(qty)"), json!({"sum(qty)": 9}));
    // "n/a" does not contribute
    assert_eq!(one_row("stats sum(price)"), json!({"sum(price)": 85.5}));
}

#[test]
fn test_avg_and_mean() {
    assert_eq!(one_row("stats avg(qty) as a mean(qty) as m"), json!({"a": 2.25, "m": 2.25}));
    assert_eq!(one_row("stats avg(category)"), json!({"avg(category)": null}));
}

#[test]
fn test_min_max_mixed_values() {
    assert_eq!(
        one_row("stats min(price) max(price) min(category) max(category)"),
        json!({"min(price)": 10, "max(price)": "n/a", "min(category)": "food", "max(category)": "toys"})
    );
}

#[test]
fn test_values_list_dc() {
    assert_eq!(
        one_row("stats values(price) list(category) dc(price) distinct_count(category)"),
        json!({
            "values(price)": [10, 25.5, 40, "n/a"],
            "list(category)": ["food", "toys", "toys", "food", "food"],
            "dc(price)": 4,
            "dc(category)": 2,
        })
    );
}

#[test]
fn test_standard_deviations() {
    let spl = Spl::from_json(json!([{"x": 2}, {"x": 4}, {"x": 4}, {"x": 6}])).unwrap();
    let out = spl.search("stats stdev(x) stdevp(x) stdevs(x)").unwrap();

    let get = |name: &str| match out[0].get(name) {
        Some(Value::Float(f)) => *f,
        other => panic!("Expected a float for {}, got {:?}", name, other),
    };
    // mean 4, squared deviations sum to 8
    assert!((get("stdev(x)") - 2f64.sqrt()).abs() < 1e-9);
    assert!((get("stdevp(x)") - 2f64.sqrt()).abs() < 1e-9);
    assert!((get("stdevs(x)") - (8f64 / 3.0).sqrt()).abs() < 1e-9);
}

#[test]
fn test_undefined_statistics() {
    let spl = Spl::from_json(json!([{"x": 7}])).unwrap();
    assert_eq!(
        records_to_json(spl.search("stats stdev(x) stdevs(x) avg(y) min(y) sum(y)").unwrap()),
        json!([{"stdev(x)": 0.0, "stdevs(x)": null, "avg(y)": null, "min(y)": null, "sum(y)": 0}])
    );
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn test_groups_in_first_seen_order() {
    let out = records_to_json(sales().search("stats count sum(qty) as units by store").unwrap());
    assert_eq!(
        out,
        json!([
            {"store": "north", "count": 3, "units": 8},
            {"store": "south", "count": 2, "units": 1},
        ])
    );
}

#[test]
fn test_multi_field_groups() {
    let out = sales().search("stats count by store, category").unwrap();
    assert_eq!(out.len(), 4);
    assert_eq!(
        out[0].keys().collect::<Vec<_>>(),
        vec!["store", "category", "count"]
    );
}

#[test]
fn test_integer_and_float_keys_share_a_group() {
    let spl = Spl::from_json(json!([{"k": 1}, {"k": 1.0}, {"k": "1"}])).unwrap();
    let out = spl.search("stats count by k").unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].get("count"), Some(&Value::Integer(2)));
}

#[test]
fn test_snowflake_ids_stay_distinct() {
    // 2^53 and 2^53 + 1 collapse to the same f64
    let spl = Spl::from_json(json!([{"id": 9007199254740992i64}, {"id": 9007199254740993i64}])).unwrap();

    assert_eq!(spl.search("stats count by id").unwrap().len(), 2);
    assert_eq!(one_row_of(&spl, "stats dc(id) max(id)"), json!({"dc(id)": 2, "max(id)": 9007199254740993i64}));
    assert_eq!(
        records_to_json(spl.search("id=9007199254740993").unwrap()),
        json!([{"id": 9007199254740993i64}])
    );
    assert_eq!(spl.search("id>9007199254740992").unwrap().len(), 1);
}

#[test]
fn test_missing_group_field_is_null_group() {
    let spl = Spl::from_json(json!([{"k": "a"}, {"other": 1}, {"k": null}])).unwrap();
    assert_eq!(
        records_to_json(spl.search("stats count by k").unwrap()),
        json!([{"k": "a", "count": 1}, {"k": null, "count": 2}])
    );
}

#[test]
fn test_empty_input() {
    let spl = Spl::new(vec![]);
    assert_eq!(
        records_to_json(spl.search("stats count avg(x)").unwrap()),
        json!([{"count": 0, "avg(x)": null}])
    );
    assert!(spl.search("stats count by k").unwrap().is_empty());
    assert!(spl.search("eventstats count by k").unwrap().is_empty());
}

// ============================================================================
// Eventstats
// ============================================================================

#[test]
fn test_eventstats_without_group() {
    let out = sales().search("eventstats sum(qty) as total_qty | fields store, total_qty").unwrap();
    assert_eq!(out.len(), 5);
    assert!(out.iter().all(|r| r.get("total_qty") == Some(&Value::Integer(9))));
}

#[test]
fn test_eventstats_overwrites_same_named_field() {
    let spl = Spl::from_json(json!([{"g": "a", "n": 1}, {"g": "a", "n": 3}])).unwrap();
    assert_eq!(
        records_to_json(spl.search("eventstats max(n) as n by g").unwrap()),
        json!([{"g": "a", "n": 3}, {"g": "a", "n": 3}])
    );
}

#[test]
fn test_eventstats_for_anomaly_detection() {
    let spl = Spl::from_json(json!([
        {"host": "a", "ms": 100}, {"host": "a", "ms": 110}, {"host": "a", "ms": 400},
        {"host": "b", "ms": 50},
    ]))
    .unwrap();
    let out = spl
        .search("eventstats avg(ms) as mean by host | eval ratio = ms / mean | where ratio > 1.5 | fields host, ms")
        .unwrap();
    assert_eq!(records_to_json(out), json!([{"host": "a", "ms": 400}]));
}
