//! Column type inference shared by the tabular readers.
//!
//! Readers first collect [`RawCell`]s, then [`infer_dataset`] decides per column whether it is
//! numeric ([`DataType::Float64`]) or text ([`DataType::Utf8`]):
//!
//! - a column is numeric iff every non-missing cell is a number, or a token matching the number
//!   grammar ([`parse_number`])
//! - otherwise every non-missing cell keeps its original text

use std::collections::HashSet;

use crate::types::{DataSet, DataType, Field, Schema, Value};

/// A cell as read from the source, before its column type is known.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// Missing value.
    Missing,
    /// A value the source already typed as a number (e.g. a numeric spreadsheet cell).
    Number(f64),
    /// Untyped text that becomes a number if its whole column is numeric.
    Token(String),
    /// Text that never counts as a number (e.g. a boolean or date spreadsheet cell).
    Text(String),
}

impl RawCell {
    /// Classify a raw text field: empty or a configured marker is missing, anything else is a
    /// token.
    pub fn from_field(raw: &str, na_values: &[String]) -> Self {
        if raw.is_empty() || na_values.iter().any(|na| na == raw) {
            RawCell::Missing
        } else {
            RawCell::Token(raw.to_owned())
        }
    }

    fn is_numeric(&self) -> bool {
        match self {
            RawCell::Missing | RawCell::Number(_) => true,
            RawCell::Token(s) => parse_number(s).is_some(),
            RawCell::Text(_) => false,
        }
    }

    fn into_value(self, data_type: DataType) -> Value {
        match (self, data_type) {
            (RawCell::Missing, _) => Value::Null,
            (RawCell::Number(v), DataType::Float64) => Value::Float64(v),
            (RawCell::Token(s), DataType::Float64) => parse_number(&s).map_or(Value::Utf8(s), Value::Float64),
            (RawCell::Number(v), DataType::Utf8) => Value::Utf8(Value::Float64(v).to_string()),
            (RawCell::Token(s) | RawCell::Text(s), _) => Value::Utf8(s),
        }
    }
}

/// Number grammar used for inference.
///
/// Accepts anything Rust parses as a finite `f64` (after trimming) that also contains an ASCII
/// digit, so words such as `inf` or `NaN` stay text, as do literals like `1e400` that overflow.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Make header names unique and non-empty.
///
/// - a blank header becomes `Unnamed: <index>`
/// - a repeated header becomes `<name>.1`, `<name>.2`, ... (skipping names already taken)
pub fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut out = Vec::with_capacity(headers.len());
    for (idx, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header
        };

        let mut name = base.clone();
        let mut suffix = 1usize;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

/// Build a typed [`DataSet`] from normalized headers and raw rows.
///
/// Rows shorter than the header are padded with missing values; callers reject longer rows
/// before calling this.
pub fn infer_dataset(headers: Vec<String>, rows: Vec<Vec<RawCell>>) -> DataSet {
    let width = headers.len();
    let rows: Vec<Vec<RawCell>> = rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, RawCell::Missing);
            row
        })
        .collect();

    let types: Vec<DataType> = (0..width)
        .map(|idx| {
            if rows.iter().all(|row| row[idx].is_numeric()) {
                DataType::Float64
            } else {
                DataType::Utf8
            }
        })
        .collect();

    let schema = Schema::new(
        headers
            .into_iter()
            .zip(types.iter())
            .map(|(name, data_type)| Field::new(name, *data_type))
            .collect(),
    );
    let rows = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(types.iter())
                .map(|(cell, data_type)| cell.into_value(*data_type))
                .collect()
        })
        .collect();

    DataSet::new(schema, rows)
}

#[cfg(test)]
mod tests {
    use super::{infer_dataset, normalize_headers, parse_number, RawCell};
    use crate::types::{DataType, Value};

    fn token(s: &str) -> RawCell {
        RawCell::Token(s.to_string())
    }

    #[test]
    fn number_grammar_requires_a_digit() {
        assert_eq!(parse_number("1"), Some(1.0));
        assert_eq!(parse_number(" -2.5e3 "), Some(-2500.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("1,000"), None);
        assert_eq!(parse_number("12abc"), None);
    }

    #[test]
    fn overflowing_literals_are_not_numbers() {
        assert_eq!(parse_number("1e400"), None);
        assert_eq!(parse_number("-1e400"), None);
        assert_eq!(parse_number("1e308"), Some(1e308));

        let ds = infer_dataset(
            vec!["a".to_string()],
            vec![
                vec![RawCell::Token("1e400".to_string())],
                vec![RawCell::Token("2".to_string())],
            ],
        );
        assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
        assert_eq!(ds.rows[0][0], Value::Utf8("1e400".to_string()));
    }

    #[test]
    fn column_is_numeric_only_if_every_value_parses() {
        let ds = infer_dataset(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![token("1"), token("x")],
                vec![RawCell::Missing, token("2")],
                vec![token("3.5"), RawCell::Missing],
            ],
        );

        assert_eq!(ds.schema.fields[0].data_type, DataType::Float64);
        assert_eq!(ds.schema.fields[1].data_type, DataType::Utf8);
        assert_eq!(
            ds.rows,
            vec![
                vec![Value::Float64(1.0), Value::Utf8("x".to_string())],
                vec![Value::Null, Value::Utf8("2".to_string())],
                vec![Value::Float64(3.5), Value::Null],
            ]
        );
    }

    #[test]
    fn typed_text_cells_force_a_text_column() {
        let ds = infer_dataset(
            vec!["flag".to_string()],
            vec![vec![RawCell::Number(1.0)], vec![RawCell::Text("true".to_string())]],
        );
        assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
        assert_eq!(ds.rows[0][0], Value::Utf8("1".to_string()));
    }

    #[test]
    fn short_rows_are_padded_with_missing_values() {
        let ds = infer_dataset(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![token("1")]],
        );
        assert_eq!(ds.rows[0], vec![Value::Float64(1.0), Value::Null]);
        assert_eq!(ds.schema.fields[1].data_type, DataType::Float64);
    }

    #[test]
    fn headers_are_made_unique_and_non_empty() {
        let headers = normalize_headers(vec![
            "a".to_string(),
            "a".to_string(),
            "".to_string(),
            "a.1".to_string(),
            "a".to_string(),
        ]);
        assert_eq!(headers, vec!["a", "a.1", "Unnamed: 2", "a.1.1", "a.2"]);
    }

    #[test]
    fn configured_markers_are_missing() {
        let na = vec!["NA".to_string()];
        assert_eq!(RawCell::from_field("NA", &na), RawCell::Missing);
        assert_eq!(RawCell::from_field("", &na), RawCell::Missing);
        assert_eq!(RawCell::from_field("na", &na), token("na"));
    }
}
