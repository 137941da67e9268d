//! Property-based tests for the transformation steps.
//!
//! Properties checked:
//! 1. **Filter count**: dropping null keys removes exactly the null-key rows
//! 2. **Idempotence**: normalizing twice equals normalizing once
//! 3. **Round-trip**: loading a written table reproduces it
//! 4. **Split shape**: first + rest reconstruct the original name

use proptest::prelude::*;

use tabmerge::transform::{drop_null_rows, split_value, strip_leading_zeros, strip_value};
use tabmerge::input::COMMON_NULL_TOKENS;
use tabmerge::{Loader, PipelineConfig, Table, Value, Writer, concat};

// =============================================================================
// Test Strategies
// =============================================================================

/// Optional full names, `None` standing for a null key.
fn maybe_name() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None::<String>),
        3 => "[A-Z][a-z]{1,8}( [A-Z][a-z]{1,8}){0,2}".prop_map(Some),
    ]
}

/// Like [`maybe_name`], but sometimes a missing-data marker used as real text.
fn maybe_name_or_marker() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => maybe_name(),
        1 => prop::sample::select(COMMON_NULL_TOKENS).prop_map(|t| Some(t.to_string())),
        1 => prop::sample::select(COMMON_NULL_TOKENS).prop_map(|t| Some(format!("Jo {}", t))),
    ]
}

/// Price-like text, often with leading zeros.
fn price_text() -> impl Strategy<Value = String> {
    "0{0,4}[0-9]{0,4}(\\.[0-9]{1,2})?"
}

fn price_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        price_text().prop_map(Value::Text),
        (0i64..10_000).prop_map(Value::Integer),
        Just(Value::Null),
    ]
}

fn name_price_table(rows: Vec<(Option<String>, Value)>) -> Table {
    Table::from_rows(
        vec!["name".to_string(), "price".to_string()],
        rows.into_iter()
            .map(|(name, price)| vec![Value::from(name), price])
            .collect(),
    )
    .unwrap()
}

// =============================================================================
// Row Filter
// =============================================================================

proptest! {
    #[test]
    fn filter_removes_exactly_null_keys(rows in prop::collection::vec((maybe_name(), price_value()), 0..50)) {
        let nulls = rows.iter().filter(|(n, _)| n.is_none()).count();
        let kept: Vec<String> = rows.iter().filter_map(|(n, _)| n.clone()).collect();
        let input = rows.len();

        let table = drop_null_rows(name_price_table(rows), "name").unwrap();

        prop_assert_eq!(table.row_count(), input - nulls);
        let names: Vec<String> = table
            .column_values("name")
            .unwrap()
            .map(|v| v.as_text().unwrap().to_string())
            .collect();
        prop_assert_eq!(names, kept);
    }
}

// =============================================================================
// Numeric Normalizer
// =============================================================================

proptest! {
    #[test]
    fn strip_is_idempotent(value in price_value()) {
        let once = strip_value(value);
        let twice = strip_value(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn strip_never_starts_with_zero(text in price_text()) {
        let stripped = strip_value(Value::Text(text.clone()));
        let stripped = stripped.as_text().unwrap();
        prop_assert!(!stripped.starts_with('0'));
        prop_assert!(text.ends_with(stripped));
    }

    #[test]
    fn strip_column_is_idempotent(rows in prop::collection::vec((maybe_name(), price_value()), 0..30)) {
        let once = strip_leading_zeros(name_price_table(rows), "price").unwrap();
        let twice = strip_leading_zeros(once.clone(), "price").unwrap();
        prop_assert_eq!(once, twice);
    }
}

// =============================================================================
// Field Splitter
// =============================================================================

proptest! {
    #[test]
    fn split_reconstructs_name(name in "[A-Za-z]{1,8}( [A-Za-z]{1,8}){0,3}") {
        let (first, rest) = split_value(&Value::text(name.clone()));
        let first = first.as_text().unwrap().to_string();

        match rest {
            Value::Null => prop_assert_eq!(first, name),
            Value::Text(rest) => prop_assert_eq!(format!("{} {}", first, rest), name),
            other => prop_assert!(false, "unexpected rest {:?}", other),
        }
    }
}

// =============================================================================
// Round-trip and merge
// =============================================================================

proptest! {
    #[test]
    fn write_then_load_round_trips(rows in prop::collection::vec((maybe_name_or_marker(), price_text()), 1..30)) {
        let table = name_price_table(
            rows.into_iter()
                .map(|(n, p)| (n, if p.is_empty() { Value::Null } else { Value::Text(p) }))
                .collect(),
        );

        let bytes = Writer::new().to_bytes(&table).unwrap();
        let config = PipelineConfig::default().loader_config();
        let reloaded = Loader::with_config(config).load_bytes(&bytes, "memory").unwrap();

        prop_assert_eq!(reloaded, table);
    }

    #[test]
    fn concat_preserves_row_counts(
        a in prop::collection::vec((maybe_name(), price_value()), 0..20),
        b in prop::collection::vec((maybe_name(), price_value()), 0..20),
    ) {
        let (len_a, len_b) = (a.len(), b.len());
        let merged = concat([name_price_table(a), name_price_table(b)]);
        prop_assert_eq!(merged.row_count(), len_a + len_b);
        prop_assert_eq!(merged.index().collect::<Vec<_>>(), (0..len_a + len_b).collect::<Vec<_>>());
    }
}
