//! Column projection.

use crate::error::{ConversionError, ConversionResult};
use crate::types::{DataSet, Schema};

/// Returns a new [`DataSet`] holding only `columns`, in the given order.
///
/// Row values and row order are unchanged. An empty selection yields a zero-column dataset with
/// the same row count. A name repeated in `columns` is kept once, at its first position.
///
/// # Errors
///
/// [`ConversionError::InvalidColumn`] if a name is not a column of `dataset`.
pub fn select_columns<S: AsRef<str>>(dataset: &DataSet, columns: &[S]) -> ConversionResult<DataSet> {
    let mut idxs: Vec<usize> = Vec::with_capacity(columns.len());
    for column in columns {
        let column = column.as_ref();
        let idx = dataset
            .schema
            .index_of(column)
            .ok_or_else(|| ConversionError::InvalidColumn {
                column: column.to_owned(),
                available: dataset.column_names(),
            })?;
        if !idxs.contains(&idx) {
            idxs.push(idx);
        }
    }
    Ok(project(dataset, &idxs))
}

/// Project onto known-valid column indexes.
pub(crate) fn project(dataset: &DataSet, idxs: &[usize]) -> DataSet {
    let schema = Schema::new(
        idxs.iter()
            .filter_map(|&idx| dataset.schema.fields.get(idx).cloned())
            .collect(),
    );
    let rows = dataset
        .rows
        .iter()
        .map(|row| idxs.iter().filter_map(|&idx| row.get(idx).cloned()).collect())
        .collect();
    DataSet::new(schema, rows)
}
