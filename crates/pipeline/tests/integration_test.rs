//! Integration tests for the query engine.
//!
//! These tests run full queries over a realistic player roster and check
//! the algebraic properties the engine promises: identity under inert
//! input, subset and union laws for filters, and sort stability.

use pipeline::{
    FilterConfig, FilterDefinition, FilterState, FilterType, FilterValue, SortSpec, compare, query,
};
use records::{Record, parse_dataset};
use serde_json::json;

fn roster() -> Vec<Record> {
    let raw = json!([
        {"id": 1, "name": "Ana Souza", "username": "ana", "platform": "gg",
         "balance": 1200, "role": "admin", "created_at": "2024-01-10", "active": true},
        {"id": 2, "name": "Bruno Lima", "username": "bruno", "platform": "ps",
         "balance": "800", "role": "player", "created_at": "2024-02-05T14:00:00Z", "active": false},
        {"id": 3, "name": "Carla Dias", "username": "carla_admin", "platform": "luxon",
         "balance": 300, "role": "player", "created_at": "2024-03-20", "active": true},
        {"id": 4, "name": "Diego Reis", "username": "diego", "platform": "gg",
         "balance": 45.5, "role": "player", "created_at": "not recorded"},
        {"id": 5, "name": "Elisa Prado", "username": "elisa", "platform": "ps",
         "role": "player", "created_at": "2023-12-31", "active": true}
    ]);
    parse_dataset(&raw, "roster").unwrap()
}

fn config() -> FilterConfig {
    FilterConfig::from_json_str(
        r#"{
            "filters": [
                {"key": "platform", "type": "multiselect", "label": "Platform"},
                {"key": "role", "type": "select", "label": "Role"},
                {"key": "balance", "type": "range", "label": "Balance"},
                {"key": "created_at", "type": "date_range", "label": "Created"},
                {"key": "active", "type": "boolean", "label": "Active"},
                {"key": "username", "label": "Username"}
            ]
        }"#,
    )
    .unwrap()
}

fn ids(result: &[&Record]) -> Vec<i64> {
    result.iter().map(|r| r["id"].as_i64().unwrap()).collect()
}

fn run(state: &FilterState, search: &str, sort: &SortSpec) -> Vec<i64> {
    let data = roster();
    ids(&query(&data, &config(), state, search, sort).result)
}

#[test]
fn test_inert_configuration_returns_dataset_unchanged() {
    let data = roster();
    let state = FilterState::new()
        .with("role", FilterValue::scalar("all"))
        .with("platform", FilterValue::Many(vec![]))
        .with("active", FilterValue::scalar(false));

    let output = query(&data, &config(), &state, "", &SortSpec::none());
    let expected: Vec<&Record> = data.iter().collect();
    assert_eq!(output.result, expected);
    assert!(output.active_filters.is_empty());
}

#[test]
fn test_select_yields_matching_subset() {
    let data = roster();
    let state = FilterState::new().with("role", FilterValue::scalar("player"));
    let output = query(&data, &config(), &state, "", &SortSpec::none());

    assert_eq!(ids(&output.result), vec![2, 3, 4, 5]);
    for record in &output.result {
        assert_eq!(record["role"], "player");
        assert!(data.contains(record));
    }
}

#[test]
fn test_multiselect_is_union_of_single_selections() {
    let only = |platform: &str| FilterState::new().with("platform", FilterValue::many([platform]));
    let gg = run(&only("gg"), "", &SortSpec::none());
    let ps = run(&only("ps"), "", &SortSpec::none());
    let both = run(
        &FilterState::new().with("platform", FilterValue::many(["gg", "ps"])),
        "",
        &SortSpec::none(),
    );

    let mut union: Vec<i64> = gg.into_iter().chain(ps).collect();
    union.sort();
    assert_eq!(both, union);
    assert_eq!(both, vec![1, 2, 4, 5]);
}

#[test]
fn test_range_bounds_intersect() {
    let min_only = run(
        &FilterState::new().with("balance", FilterValue::range(Some(300.0), None)),
        "",
        &SortSpec::none(),
    );
    assert_eq!(min_only, vec![1, 2, 3]);

    let bounded = run(
        &FilterState::new().with("balance", FilterValue::range(Some(300.0), Some(1000.0))),
        "",
        &SortSpec::none(),
    );
    assert_eq!(bounded, vec![2, 3]);

    let unbounded = run(
        &FilterState::new().with("balance", FilterValue::range(None, None)),
        "",
        &SortSpec::none(),
    );
    assert_eq!(unbounded, run(&FilterState::new(), "", &SortSpec::none()));
}

#[test]
fn test_date_range_and_boolean() {
    let state = FilterState::new().with(
        "created_at",
        FilterValue::date_range(Some("2024-01-01"), Some("2024-02-05")),
    );
    assert_eq!(run(&state, "", &SortSpec::none()), vec![1, 2]);

    let state = FilterState::new().with("active", FilterValue::scalar(true));
    assert_eq!(run(&state, "", &SortSpec::none()), vec![1, 3, 5]);
}

#[test]
fn test_filters_combine_with_and() {
    let state = FilterState::new()
        .with("platform", FilterValue::many(["gg", "luxon"]))
        .with("role", FilterValue::scalar("player"))
        .with("balance", FilterValue::range(Some(100.0), None));
    assert_eq!(run(&state, "", &SortSpec::none()), vec![3]);
}

#[test]
fn test_search_defaults_and_text_filter() {
    assert_eq!(run(&FilterState::new(), "ADMIN", &SortSpec::none()), vec![3]);
    assert_eq!(run(&FilterState::new(), "souza", &SortSpec::none()), vec![1]);

    let state = FilterState::new().with("username", FilterValue::scalar("AN"));
    assert_eq!(run(&state, "", &SortSpec::none()), vec![1]);
}

#[test]
fn test_sorting_is_idempotent_and_reversible() {
    let asc = run(&FilterState::new(), "", &SortSpec::asc("balance"));
    assert_eq!(asc, vec![4, 3, 2, 1, 5]);

    // Re-sorting an already sorted view changes nothing
    let data = roster();
    let sorted: Vec<Record> =
        query(&data, &config(), &FilterState::new(), "", &SortSpec::asc("balance"))
            .result
            .into_iter()
            .cloned()
            .collect();
    let again = query(&sorted, &config(), &FilterState::new(), "", &SortSpec::asc("balance"));
    assert_eq!(ids(&again.result), asc);

    // Without ties (and without absent values) desc is the exact reverse
    let state = FilterState::new().with("balance", FilterValue::range(Some(0.0), None));
    let asc = run(&state, "", &SortSpec::asc("balance"));
    let mut desc = run(&state, "", &SortSpec::desc("balance"));
    desc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn test_numeric_balances_sort_numerically_beside_text() {
    let raw = json!([
        {"id": 1, "balance": 10},
        {"id": 2, "balance": 9},
        {"id": 3, "balance": "n/a"}
    ]);
    let data = parse_dataset(&raw, "balances").unwrap();

    let output = query(&data, &config(), &FilterState::new(), "", &SortSpec::asc("balance"));
    assert_eq!(ids(&output.result), vec![2, 1, 3]);

    let a = json!(9);
    let b = json!(10);
    assert_eq!(compare(Some(&a), Some(&b), "balance"), std::cmp::Ordering::Less);
}

#[test]
fn test_sort_by_date_puts_invalid_first() {
    assert_eq!(
        run(&FilterState::new(), "", &SortSpec::asc("created_at")),
        vec![4, 5, 1, 2, 3]
    );
}

#[test]
fn test_active_filter_summary() {
    let data = roster();
    let state = FilterState::new().with("balance", FilterValue::range(Some(50.0), None));
    let output = query(&data, &config(), &state, "admin", &SortSpec::none());

    assert_eq!(output.active_filters.len(), 2);
    assert!(output.active_filters[0].label.contains("admin"));
    assert_eq!(output.active_filters[1].label, "Balance: 50 - ∞");
    assert_eq!(ids(&output.result), vec![3]);
}

#[test]
fn test_unknown_keys_and_partial_config_are_ignored() {
    let config = FilterConfig::from_json_str(
        r#"{"filters": [{"type": "select"}, {"key": "role", "type": "select", "label": "Role"}]}"#,
    )
    .unwrap();
    let state = FilterState::new()
        .with("role", FilterValue::scalar("admin"))
        .with("tier", FilterValue::scalar("gold"));

    let data = roster();
    let output = query(&data, &config, &state, "", &SortSpec::none());
    assert_eq!(ids(&output.result), vec![1]);
    assert_eq!(output.active_filters.len(), 1);

    let error = parse_dataset(&json!({"players": []}), "dataset").unwrap_err();
    assert!(error.to_string().contains("dataset must be an array"));
}

#[test]
fn test_custom_search_fields() {
    let config = FilterConfig::new()
        .with_search_fields(["platform"])
        .with_filter(FilterDefinition::new("role", FilterType::Select, "Role"));
    let data = roster();

    let output = query(&data, &config, &FilterState::new(), "lux", &SortSpec::none());
    assert_eq!(ids(&output.result), vec![3]);
}
