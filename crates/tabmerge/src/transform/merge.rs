//! Row-wise concatenation of tables.

use indexmap::IndexSet;
use tracing::warn;

use crate::input::Table;
use crate::schema::Value;

/// Concatenate tables row-wise.
///
/// Columns are the union of all input columns in order of first appearance.
/// Rows keep input order; cells for columns a table lacks are `Null`. The
/// result has a fresh sequential index.
pub fn concat(tables: impl IntoIterator<Item = Table>) -> Table {
    let parts: Vec<(Vec<String>, Vec<Vec<Value>>)> =
        tables.into_iter().map(Table::into_parts).collect();

    let columns: IndexSet<String> = parts
        .iter()
        .flat_map(|(cols, _)| cols.iter().cloned())
        .collect();

    for (idx, (cols, _)) in parts.iter().enumerate() {
        let missing: Vec<&str> = columns
            .iter()
            .filter(|c| !cols.contains(c))
            .map(|c| c.as_str())
            .collect();
        if !missing.is_empty() {
            warn!(table = idx, ?missing, "columns absent from input, filling with null");
        }
    }

    let mut merged = Vec::new();
    for (cols, rows) in parts {
        let positions: Vec<usize> = cols
            .iter()
            .filter_map(|c| columns.get_index_of(c))
            .collect();

        for row in rows {
            let mut out = vec![Value::Null; columns.len()];
            for (value, &pos) in row.into_iter().zip(&positions) {
                out[pos] = value;
            }
            merged.push(out);
        }
    }

    Table::from_parts(columns.into_iter().collect(), merged)
}

impl Table {
    /// Append `other`'s rows after this table's rows. See [`concat`].
    pub fn concat(self, other: Table) -> Table {
        concat([self, other])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_keeps_row_order() {
        let a = Table::from_records(vec![vec![("name", "Ann")], vec![("name", "Bo")]]);
        let b = Table::from_records(vec![vec![("name", "Cy")]]);

        let merged = a.concat(b);
        assert_eq!(merged.row_count(), 3);
        assert_eq!(merged.get(2, "name"), Some(&Value::text("Cy")));
        assert_eq!(merged.index(), 0..3);
    }

    #[test]
    fn test_concat_unions_columns() {
        let a = Table::from_records(vec![vec![("name", Value::from("Ann")), ("qty", 1i64.into())]]);
        let b = Table::from_records(vec![vec![
            ("colour", Value::from("red")),
            ("name", Value::from("Bo")),
        ]]);

        let merged = concat([a, b]);
        assert_eq!(merged.columns(), ["name", "qty", "colour"]);
        assert_eq!(merged.get(0, "colour"), Some(&Value::Null));
        assert_eq!(merged.get(1, "qty"), Some(&Value::Null));
        assert_eq!(merged.get(1, "name"), Some(&Value::text("Bo")));
    }

    #[test]
    fn test_concat_empty_inputs() {
        let merged = concat(Vec::<Table>::new());
        assert_eq!(merged.column_count(), 0);
        assert!(merged.is_empty());
    }
}
