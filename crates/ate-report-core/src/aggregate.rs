use polars::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::schema::{self, is_numeric_dtype, GROUP_KEYS};

/// Names of the integer/float columns of `df`, excluding the grouping keys.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|column| is_numeric_dtype(column.dtype()))
        .map(|column| column.name().to_string())
        .filter(|name| !GROUP_KEYS.contains(&name.as_str()))
        .collect()
}

/// Collapses `df` to one row per (treatment variable, treatment level, target variable),
/// holding the mean of every numeric column. Rows come back sorted by the key triple; rows
/// with a missing key are dropped. Non-numeric, non-key columns do not survive.
pub fn aggregate_means(df: &DataFrame) -> Result<DataFrame> {
    schema::check_numeric_columns(df)?;
    let numeric = numeric_columns(df);

    let aggregations: Vec<Expr> = numeric
        .iter()
        .map(|name| col(name.as_str()).mean())
        .collect();

    let keys_present = GROUP_KEYS
        .iter()
        .map(|key| col(*key).is_not_null())
        .reduce(|acc, expr| acc.and(expr))
        .unwrap_or_else(|| lit(true));

    let averages = df
        .clone()
        .lazy()
        .with_columns(GROUP_KEYS.map(|key| col(key).cast(DataType::String)))
        .filter(keys_present)
        .group_by_stable(GROUP_KEYS.map(|key| col(key)))
        .agg(aggregations)
        .sort(
            GROUP_KEYS,
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    debug!(
        groups = averages.height(),
        numeric_columns = numeric.len(),
        "Aggregated results by treatment and target"
    );
    Ok(averages)
}
