use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::schema::{self, GROUP_KEYS, REQUIRED_NUMERIC_COLUMNS};

/// Row counts observed while deduplicating a results file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupSummary {
    pub rows_before: usize,
    pub rows_after: usize,
}

impl DedupSummary {
    pub fn removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Reads an estimation results CSV, rejecting files that lack the required columns.
pub fn load_results(path: &Path) -> Result<DataFrame> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    schema::check_header(reader.headers()?.iter())?;

    // Keys are read as text so a numeric-coded level followed by a worded one still parses.
    let key_schema: Schema = GROUP_KEYS
        .iter()
        .map(|key| Field::new((*key).into(), DataType::String))
        .collect();

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_schema_overwrite(Some(Arc::new(key_schema)))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    // A header-only file carries no type information.
    if df.height() == 0 {
        df = df
            .lazy()
            .with_columns(
                REQUIRED_NUMERIC_COLUMNS
                    .map(|name| col(name).cast(DataType::Float64))
                    .to_vec(),
            )
            .collect()?;
    }

    schema::check_numeric_columns(&df)?;
    debug!(path = %path.display(), rows = df.height(), "Loaded results table");
    Ok(df)
}

/// Drops rows identical across every column, keeping first occurrences in their original order.
pub fn deduplicate(df: &DataFrame) -> Result<DataFrame> {
    let deduped = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(deduped)
}

pub fn write_results(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

/// Deduplicates `path` in place and returns the cleaned table.
///
/// The input file is overwritten without a backup.
pub fn dedup_file(path: &Path) -> Result<(DataFrame, DedupSummary)> {
    let raw = load_results(path)?;
    let mut deduped = deduplicate(&raw)?;
    write_results(&mut deduped, path)?;

    let summary = DedupSummary {
        rows_before: raw.height(),
        rows_after: deduped.height(),
    };
    info!(
        path = %path.display(),
        rows_before = summary.rows_before,
        rows_after = summary.rows_after,
        "Removed duplicate rows"
    );
    Ok((deduped, summary))
}
