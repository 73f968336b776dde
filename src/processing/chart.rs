//! Data behind the optional bar chart.

use crate::types::DataSet;

use super::select::project;

/// Maximum number of series plotted.
pub const MAX_CHART_SERIES: usize = 2;

/// The first [`MAX_CHART_SERIES`] numeric columns of `dataset`, in column order.
///
/// Returns a zero-column dataset when there is nothing numeric to plot.
pub fn bar_chart_data(dataset: &DataSet) -> DataSet {
    let idxs: Vec<usize> = dataset
        .schema
        .numeric_indexes()
        .into_iter()
        .take(MAX_CHART_SERIES)
        .collect();
    project(dataset, &idxs)
}

#[cfg(test)]
mod tests {
    use super::bar_chart_data;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    #[test]
    fn picks_first_two_numeric_columns() {
        let schema = Schema::new(vec![
            Field::new("name", DataType::Utf8),
            Field::new("x", DataType::Float64),
            Field::new("y", DataType::Float64),
            Field::new("z", DataType::Float64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![vec![
                Value::Utf8("a".to_string()),
                Value::Float64(1.0),
                Value::Float64(2.0),
                Value::Float64(3.0),
            ]],
        );

        let chart = bar_chart_data(&ds);
        assert_eq!(chart.column_names(), vec!["x", "y"]);
        assert_eq!(chart.rows[0], vec![Value::Float64(1.0), Value::Float64(2.0)]);
    }

    #[test]
    fn text_only_dataset_has_no_series() {
        let schema = Schema::new(vec![Field::new("name", DataType::Utf8)]);
        let ds = DataSet::new(schema, vec![vec![Value::Utf8("a".to_string())]]);
        let chart = bar_chart_data(&ds);
        assert_eq!(chart.column_count(), 0);
        assert_eq!(chart.row_count(), 1);
    }
}
