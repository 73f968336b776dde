//! Reduction operations for [`crate::types::DataSet`].

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count non-missing values.
    Count,
    /// Sum numeric values, ignoring missing values.
    Sum,
    /// Arithmetic mean of numeric values, ignoring missing values.
    Mean,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For `Sum`/`Mean`, returns `Some(Value::Null)` for text columns and when there are no
///   non-missing values.
/// - For `Count`, returns the number of non-missing values as a number.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;
    Some(reduce_at(dataset, idx, op))
}

/// Same as [`reduce`], addressing the column by index.
pub(crate) fn reduce_at(dataset: &DataSet, idx: usize, op: ReduceOp) -> Value {
    if op == ReduceOp::Count {
        let n = dataset.reduce_rows(0usize, |n, row| match row.get(idx) {
            Some(Value::Null) | None => n,
            Some(_) => n + 1,
        });
        return Value::Float64(n as f64);
    }

    match dataset.schema.fields.get(idx).map(|f| f.data_type) {
        Some(DataType::Float64) => {}
        Some(DataType::Utf8) | None => return Value::Null,
    }

    let (sum, n) = dataset.reduce_rows((0.0_f64, 0usize), |(sum, n), row| match row.get(idx) {
        Some(Value::Float64(v)) => (sum + v, n + 1),
        _ => (sum, n),
    });
    match (op, n) {
        (_, 0) => Value::Null,
        (ReduceOp::Sum, _) => Value::Float64(sum),
        (ReduceOp::Mean, _) => Value::Float64(sum / n as f64),
        (ReduceOp::Count, _) => unreachable!("count handled earlier"),
    }
}
