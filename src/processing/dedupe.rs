//! Duplicate row removal.

use std::collections::HashSet;

use crate::types::{DataSet, Value};

/// Hashable view of a cell. Numbers compare by value: `-0.0` equals `0.0` and all NaNs are equal.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Null,
    Number(u64),
    Text(&'a str),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => CellKey::Null,
            Value::Float64(v) if v.is_nan() => CellKey::Number(f64::NAN.to_bits()),
            Value::Float64(v) if *v == 0.0 => CellKey::Number(0.0_f64.to_bits()),
            Value::Float64(v) => CellKey::Number(v.to_bits()),
            Value::Utf8(s) => CellKey::Text(s),
        }
    }
}

/// Returns a new [`DataSet`] without rows that exactly repeat an earlier row.
///
/// The first occurrence of every row is kept and survivors keep their relative order, so the
/// operation is idempotent.
pub fn drop_duplicates(dataset: &DataSet) -> DataSet {
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(dataset.row_count());
    let rows = dataset
        .rows
        .iter()
        .filter(|row| seen.insert(row.iter().map(CellKey::from).collect()))
        .cloned()
        .collect();
    DataSet::new(dataset.schema.clone(), rows)
}
