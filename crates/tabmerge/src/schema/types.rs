//! Column types and cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared or inferred data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Text/string values.
    Text,
    /// Boolean values (true/false).
    Boolean,
}

impl ColumnType {
    /// Infer the narrowest type that fits every non-null cell.
    ///
    /// Integer beats Float beats Boolean beats Text. An all-null column is Text.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> ColumnType {
        let mut seen = false;
        let mut integer = true;
        let mut float = true;
        let mut boolean = true;

        for cell in cells {
            seen = true;
            let cell = cell.trim();
            integer = integer && cell.parse::<i64>().is_ok();
            float = float && cell.parse::<f64>().is_ok();
            boolean = boolean && parse_bool(cell).is_some();
            if !(integer || float || boolean) {
                break;
            }
        }

        match (seen, integer, float, boolean) {
            (false, ..) => ColumnType::Text,
            (true, true, _, _) => ColumnType::Integer,
            (true, _, true, _) => ColumnType::Float,
            (true, _, _, true) => ColumnType::Boolean,
            _ => ColumnType::Text,
        }
    }

    /// Parse a raw, non-null cell into a value of this type.
    ///
    /// Returns `None` when the cell does not fit the type.
    pub fn parse(&self, cell: &str) -> Option<Value> {
        match self {
            ColumnType::Text => Some(Value::Text(cell.to_string())),
            ColumnType::Integer => cell.trim().parse().ok().map(Value::Integer),
            ColumnType::Float => cell.trim().parse().ok().map(Value::Float),
            ColumnType::Boolean => parse_bool(cell.trim()).map(Value::Boolean),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Build a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value the way it is written to a delimited file.
    ///
    /// Null renders as the empty string.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_integer() {
        assert_eq!(ColumnType::infer(["1", "2", "300"]), ColumnType::Integer);
    }

    #[test]
    fn test_infer_float() {
        assert_eq!(ColumnType::infer(["1", "2.5", "99.99"]), ColumnType::Float);
    }

    #[test]
    fn test_infer_boolean() {
        assert_eq!(ColumnType::infer(["true", "FALSE"]), ColumnType::Boolean);
    }

    #[test]
    fn test_infer_text() {
        assert_eq!(ColumnType::infer(["1", "two"]), ColumnType::Text);
        assert_eq!(ColumnType::infer(Vec::<&str>::new()), ColumnType::Text);
    }

    #[test]
    fn test_parse_rejects_mismatch() {
        assert_eq!(ColumnType::Integer.parse("12"), Some(Value::Integer(12)));
        assert_eq!(ColumnType::Integer.parse("1.5"), None);
        assert_eq!(ColumnType::Boolean.parse("yes"), None);
        assert_eq!(ColumnType::Text.parse("0099"), Some(Value::text("0099")));
    }

    #[test]
    fn test_render() {
        assert_eq!(Value::Null.render(), "");
        assert_eq!(Value::Float(150.0).render(), "150");
        assert_eq!(Value::Float(99.99).render(), "99.99");
        assert_eq!(Value::Boolean(true).render(), "true");
        assert_eq!(Value::from(Some("x")).render(), "x");
        assert_eq!(Value::from(None::<&str>), Value::Null);
    }
}
