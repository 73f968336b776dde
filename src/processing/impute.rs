//! Mean imputation for numeric columns.

use crate::types::{DataSet, Value};

use super::reduce::{reduce_at, ReduceOp};

/// Returns a new [`DataSet`] where every missing cell of a numeric column holds that column's
/// mean.
///
/// Means are taken over the non-missing values at call time. Text columns and present values are
/// untouched. A numeric column without any value has no mean and keeps its missing cells.
pub fn fill_missing_with_mean(dataset: &DataSet) -> DataSet {
    let means: Vec<(usize, f64)> = dataset
        .schema
        .numeric_indexes()
        .into_iter()
        .filter(|&idx| dataset.null_count(idx) > 0)
        .filter_map(|idx| reduce_at(dataset, idx, ReduceOp::Mean).as_f64().map(|mean| (idx, mean)))
        .collect();
    if means.is_empty() {
        return dataset.clone();
    }

    dataset.map_rows(|row| {
        let mut out = row.to_vec();
        for &(idx, mean) in &means {
            if let Some(cell) = out.get_mut(idx) {
                if cell.is_null() {
                    *cell = Value::Float64(mean);
                }
            }
        }
        out
    })
}
