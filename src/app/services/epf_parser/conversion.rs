//! Conversion of decoded rows into Polars DataFrames
//!
//! Column order follows the header and column dtypes follow the declared
//! types: `BIGINT` and `INTEGER` become Int64, `BOOLEAN` becomes Boolean
//! and everything else is a String column. Missing and null values become
//! nulls.

use polars::prelude::*;

use super::field_parsers::ColumnType;
use crate::Result;
use crate::app::models::{Metadata, Row, Value};

/// Build a DataFrame from rows decoded with `metadata`
pub fn rows_to_dataframe(metadata: &Metadata, rows: &[Row]) -> Result<DataFrame> {
    let columns = metadata
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| build_column(field, metadata.column_type(index), rows))
        .collect::<Vec<Column>>();

    Ok(DataFrame::new(columns)?)
}

/// Polars dtype used for a declared column type
pub fn polars_dtype(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::BigInt | ColumnType::Integer => DataType::Int64,
        ColumnType::Boolean => DataType::Boolean,
        ColumnType::Text => DataType::String,
    }
}

fn build_column(name: &str, column_type: ColumnType, rows: &[Row]) -> Column {
    let values = rows.iter().map(|row| row.get(name));

    let series = match polars_dtype(column_type) {
        DataType::Int64 => {
            let data: Vec<Option<i64>> = values.map(|v| v.and_then(Value::as_i64)).collect();
            Series::new(name.into(), data)
        }
        DataType::Boolean => {
            let data: Vec<Option<bool>> = values.map(|v| v.and_then(Value::as_bool)).collect();
            Series::new(name.into(), data)
        }
        _ => {
            let data: Vec<Option<String>> = values
                .map(|v| match v {
                    None | Some(Value::Null) => None,
                    Some(Value::Text(text)) => Some(text.clone()),
                    Some(other) => Some(other.to_string()),
                })
                .collect();
            Series::new(name.into(), data)
        }
    };

    series.into()
}
