use polars::prelude::{DataFrame, DataType};

use crate::error::{ReportError, Result};

pub const TREATMENT_VARIABLE: &str = "Treatment Variable";
pub const TREATMENT_LEVEL: &str = "Treatment Level";
pub const TARGET_VARIABLE: &str = "Target Variable";
pub const ATE: &str = "ATE";
pub const LOWER_BOUND: &str = "Lower Bound";
pub const UPPER_BOUND: &str = "Upper Bound";

/// Key triple every aggregated row is unique on.
pub const GROUP_KEYS: [&str; 3] = [TREATMENT_VARIABLE, TREATMENT_LEVEL, TARGET_VARIABLE];

pub const REQUIRED_NUMERIC_COLUMNS: [&str; 3] = [ATE, LOWER_BOUND, UPPER_BOUND];

pub const REQUIRED_COLUMNS: [&str; 6] = [
    TREATMENT_VARIABLE,
    TREATMENT_LEVEL,
    TARGET_VARIABLE,
    ATE,
    LOWER_BOUND,
    UPPER_BOUND,
];

pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int32
            | DataType::Int64
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Checks a header row against [`REQUIRED_COLUMNS`], reporting every absent column at once.
pub fn check_header<'a, I>(header: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = header.into_iter().map(str::trim).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !present.contains(*required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReportError::MissingColumns { missing })
    }
}

/// Verifies that the loaded table exposes the required numeric columns as numbers.
pub fn check_numeric_columns(df: &DataFrame) -> Result<()> {
    for name in REQUIRED_NUMERIC_COLUMNS {
        let column = df.column(name)?;
        if !is_numeric_dtype(column.dtype()) {
            return Err(ReportError::NonNumericColumn {
                column: name.to_string(),
                dtype: column.dtype().to_string(),
            });
        }
    }
    Ok(())
}
