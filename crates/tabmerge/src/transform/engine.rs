//! Transformation engine that applies operations to tables.

use tracing::debug;

use crate::error::Result;
use crate::input::Table;
use crate::schema::Value;

use super::operations::{TransformChange, TransformOperation, TransformResult};
use super::steps;

/// Engine for applying transformation operations to tables.
pub struct TransformEngine;

impl TransformEngine {
    /// Create a new transform engine.
    pub fn new() -> Self {
        Self
    }

    /// Apply operations in order, stopping at the first failure.
    ///
    /// Conversion errors report the row's position in the input table, even
    /// after earlier operations removed rows.
    pub fn apply_all(
        &self,
        mut table: Table,
        operations: &[TransformOperation],
    ) -> Result<(Table, TransformResult)> {
        let mut result = TransformResult::new();
        let mut origin: Vec<usize> = table.index().collect();

        for op in operations {
            let kept = match op {
                TransformOperation::DropNulls { column } => table
                    .column_values(column)
                    .map(|values| values.map(|v| !v.is_null()).collect::<Vec<_>>()),
                _ => None,
            };

            let (next, change) = self
                .apply(table, op)
                .map_err(|e| e.at_source_rows(&origin))?;

            if let Some(kept) = kept {
                origin = origin
                    .into_iter()
                    .zip(kept)
                    .filter_map(|(row, keep)| keep.then_some(row))
                    .collect();
            }
            result.add_change(change);
            table = next;
        }

        Ok((table, result))
    }

    /// Apply a single operation.
    pub fn apply(&self, table: Table, operation: &TransformOperation) -> Result<(Table, TransformChange)> {
        let columns_before = table.column_count();
        let rows_before = table.row_count();

        let (table, column, values_changed) = match operation {
            TransformOperation::SplitName {
                column,
                first,
                rest,
            } => {
                let table = steps::split_column(table, column, first, rest)?;
                let derived = count(&table, first, |v| !v.is_null());
                (table, first.clone(), derived)
            }
            TransformOperation::StripLeadingZeros { column } => {
                let stripped = count(&table, column, |v| {
                    v.as_text().is_some_and(|t| t.starts_with('0'))
                });
                let table = steps::strip_leading_zeros(table, column)?;
                (table, column.clone(), stripped)
            }
            TransformOperation::DropNulls { column } => {
                let table = steps::drop_null_rows(table, column)?;
                (table, column.clone(), 0)
            }
            TransformOperation::FlagAbove {
                column,
                flag_column,
                threshold,
            } => {
                let table = steps::flag_above(table, column, flag_column, *threshold)?;
                let flagged = count(&table, flag_column, |v| *v == Value::Boolean(true));
                (table, flag_column.clone(), flagged)
            }
        };

        let change = TransformChange {
            operation: operation.kind().to_string(),
            description: operation.description(),
            column,
            values_changed,
            rows_removed: rows_before - table.row_count(),
            columns_added: table.column_count() - columns_before,
        };

        debug!(
            operation = %change.operation,
            column = %change.column,
            values_changed = change.values_changed,
            rows_removed = change.rows_removed,
            "applied transform"
        );

        Ok((table, change))
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn count(table: &Table, column: &str, pred: impl Fn(&Value) -> bool) -> usize {
    table
        .column_values(column)
        .map(|values| values.filter(|v| pred(v)).count())
        .unwrap_or(0)
}
