use polars::prelude::*;

use crate::error::Result;
use crate::schema::{ATE, LOWER_BOUND, TARGET_VARIABLE, TREATMENT_LEVEL, TREATMENT_VARIABLE, UPPER_BOUND};

/// One point of an error-bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRow {
    pub treatment_variable: String,
    pub treatment_level: String,
    pub target_variable: String,
    pub ate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl EffectRow {
    /// Category label used on the chart's x axis.
    pub fn label(&self) -> String {
        format!("{} {}", self.treatment_variable, self.treatment_level)
    }

    pub fn error_below(&self) -> f64 {
        self.ate - self.lower_bound
    }

    pub fn error_above(&self) -> f64 {
        self.upper_bound - self.ate
    }
}

/// Shortens multi-word levels to their initials ("Heavy Drinking" -> "HD").
/// Single-word values are returned untouched.
pub fn abbreviate_if_needed(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > 1 {
        words
            .iter()
            .filter_map(|word| word.chars().next())
            .collect()
    } else {
        name.to_string()
    }
}

/// Rows of `averages` for one target variable, ordered by descending ATE (ties keep their
/// incoming order), with abbreviated treatment levels.
pub fn select_target(averages: &DataFrame, target: &str) -> Result<DataFrame> {
    let mut subset = averages
        .clone()
        .lazy()
        .filter(col(TARGET_VARIABLE).eq(lit(target)))
        .sort(
            [ATE],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let levels = subset.column(TREATMENT_LEVEL)?.cast(&DataType::String)?;
    let abbreviated: Vec<Option<String>> = levels
        .str()?
        .into_iter()
        .map(|level| level.map(abbreviate_if_needed))
        .collect();
    subset.with_column(Series::new(TREATMENT_LEVEL.into(), abbreviated))?;

    Ok(subset)
}

/// Projects a selected subset into typed rows, preserving row order.
pub fn effect_rows(df: &DataFrame) -> Result<Vec<EffectRow>> {
    let variables = df.column(TREATMENT_VARIABLE)?.cast(&DataType::String)?;
    let levels = df.column(TREATMENT_LEVEL)?.cast(&DataType::String)?;
    let targets = df.column(TARGET_VARIABLE)?.cast(&DataType::String)?;
    let ate = df.column(ATE)?.cast(&DataType::Float64)?;
    let lower = df.column(LOWER_BOUND)?.cast(&DataType::Float64)?;
    let upper = df.column(UPPER_BOUND)?.cast(&DataType::Float64)?;

    let (variables, levels, targets) = (variables.str()?, levels.str()?, targets.str()?);
    let (ate, lower, upper) = (ate.f64()?, lower.f64()?, upper.f64()?);

    let rows = (0..df.height())
        .map(|idx| EffectRow {
            treatment_variable: variables.get(idx).unwrap_or_default().to_string(),
            treatment_level: levels.get(idx).unwrap_or_default().to_string(),
            target_variable: targets.get(idx).unwrap_or_default().to_string(),
            ate: ate.get(idx).unwrap_or(f64::NAN),
            lower_bound: lower.get(idx).unwrap_or(f64::NAN),
            upper_bound: upper.get(idx).unwrap_or(f64::NAN),
        })
        .collect();

    Ok(rows)
}
