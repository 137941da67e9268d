//! Transformation operations that can be applied to a table.

use serde::{Deserialize, Serialize};

/// A transformation operation to apply to a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOperation {
    /// Split a text column on its first space into two derived columns.
    SplitName {
        column: String,
        first: String,
        rest: String,
    },

    /// Strip leading zero characters from text values.
    StripLeadingZeros { column: String },

    /// Remove rows whose key column is null.
    DropNulls { column: String },

    /// Add a boolean column: source value strictly above a threshold.
    FlagAbove {
        column: String,
        flag_column: String,
        threshold: f64,
    },
}

impl TransformOperation {
    /// Short machine-friendly name of the operation.
    pub fn kind(&self) -> &'static str {
        match self {
            TransformOperation::SplitName { .. } => "split_name",
            TransformOperation::StripLeadingZeros { .. } => "strip_leading_zeros",
            TransformOperation::DropNulls { .. } => "drop_nulls",
            TransformOperation::FlagAbove { .. } => "flag_above",
        }
    }

    /// One-line summary for logs and reports.
    pub fn description(&self) -> String {
        match self {
            TransformOperation::SplitName {
                column,
                first,
                rest,
            } => format!("Split '{}' → '{}', '{}'", column, first, rest),
            TransformOperation::StripLeadingZeros { column } => {
                format!("Strip leading zeros in '{}'", column)
            }
            TransformOperation::DropNulls { column } => {
                format!("Drop rows with null '{}'", column)
            }
            TransformOperation::FlagAbove {
                column,
                flag_column,
                threshold,
            } => format!("Flag '{}' > {} → '{}'", column, threshold, flag_column),
        }
    }
}

/// Totals over a sequence of applied operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformResult {
    pub operations_applied: usize,

    /// Total number of values changed or derived.
    pub values_changed: usize,

    /// Total number of rows removed.
    pub rows_removed: usize,

    pub columns_added: usize,

    /// Per-operation changes, in application order.
    pub changes: Vec<TransformChange>,
}

/// What one operation did to a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformChange {
    /// Operation kind.
    pub operation: String,

    pub description: String,

    /// Column affected.
    pub column: String,

    /// Number of values changed (or set, for derived columns).
    pub values_changed: usize,

    pub rows_removed: usize,

    pub columns_added: usize,
}

impl TransformResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one operation's change and fold it into the totals.
    pub fn add_change(&mut self, change: TransformChange) {
        self.operations_applied += 1;
        self.values_changed += change.values_changed;
        self.rows_removed += change.rows_removed;
        self.columns_added += change.columns_added;
        self.changes.push(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_serializes_with_tag() {
        let op = TransformOperation::DropNulls {
            column: "name".to_string(),
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "drop_nulls");
        assert_eq!(json["column"], "name");
    }

    #[test]
    fn test_result_accumulates() {
        let mut result = TransformResult::new();
        result.add_change(TransformChange {
            operation: "drop_nulls".to_string(),
            description: String::new(),
            column: "name".to_string(),
            values_changed: 0,
            rows_removed: 2,
            columns_added: 0,
        });
        result.add_change(TransformChange {
            operation: "flag_above".to_string(),
            description: String::new(),
            column: "above_100".to_string(),
            values_changed: 3,
            rows_removed: 0,
            columns_added: 1,
        });

        assert_eq!(result.operations_applied, 2);
        assert_eq!(result.rows_removed, 2);
        assert_eq!(result.values_changed, 3);
        assert_eq!(result.columns_added, 1);
    }
}
