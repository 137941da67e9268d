//! Column-level transformation steps.
//!
//! Every step consumes its input table and returns the transformed table.

use crate::error::{Result, TabmergeError};
use crate::input::Table;
use crate::schema::Value;

/// Split a text value on its first space.
///
/// `"Jane Doe"` gives `("Jane", "Doe")`, a value without a space gives
/// `(value, Null)`, and null or non-text values give `(Null, Null)`.
pub fn split_value(value: &Value) -> (Value, Value) {
    match value.as_text() {
        Some(text) => match text.split_once(' ') {
            Some((first, rest)) => (Value::text(first), Value::text(rest)),
            None => (Value::text(text), Value::Null),
        },
        None => (Value::Null, Value::Null),
    }
}

/// Strip leading `'0'` characters from a text value.
///
/// `"0"` becomes the empty string. Non-text values are returned unchanged.
pub fn strip_value(value: Value) -> Value {
    match value {
        Value::Text(text) => Value::Text(text.trim_start_matches('0').to_string()),
        other => other,
    }
}

/// Numeric reading of a value for threshold comparison.
///
/// `Ok(None)` for null. Text must parse as a float after trimming.
pub fn numeric_value(value: &Value) -> std::result::Result<Option<f64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(*i as f64)),
        Value::Float(f) => Ok(Some(*f)),
        Value::Boolean(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Value::Text(text) => text.trim().parse().map(Some).map_err(|_| text.clone()),
    }
}

fn require_column(table: &Table, column: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| TabmergeError::MissingColumn(column.to_string()))
}

/// Derive `first` and `rest` columns from the text in `source`.
pub fn split_column(table: Table, source: &str, first: &str, rest: &str) -> Result<Table> {
    let col = require_column(&table, source)?;

    let (firsts, rests): (Vec<Value>, Vec<Value>) =
        table.rows().map(|row| split_value(&row[col])).unzip();

    table.with_column(first, firsts)?.with_column(rest, rests)
}

/// Strip leading zeros from every text value in `column`.
pub fn strip_leading_zeros(table: Table, column: &str) -> Result<Table> {
    let col = require_column(&table, column)?;
    Ok(table.map_column(col, strip_value))
}

/// Drop rows whose `key` value is null, preserving the order of the rest.
pub fn drop_null_rows(table: Table, key: &str) -> Result<Table> {
    let col = require_column(&table, key)?;
    Ok(table.retain_rows(|row| !row[col].is_null()))
}

/// Add a boolean `flag` column: `source > threshold`.
///
/// Null sources are not flagged. Text that does not read as a number fails
/// with [`TabmergeError::TypeConversion`].
pub fn flag_above(table: Table, source: &str, flag: &str, threshold: f64) -> Result<Table> {
    let col = require_column(&table, source)?;

    let flags = table
        .rows()
        .enumerate()
        .map(|(idx, row)| match numeric_value(&row[col]) {
            Ok(number) => Ok(Value::Boolean(number.is_some_and(|n| n > threshold))),
            Err(value) => Err(TabmergeError::TypeConversion {
                column: source.to_string(),
                row: idx,
                value,
                target: "float".to_string(),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    table.with_column(flag, flags)
}
