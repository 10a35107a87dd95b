use std::fs;

use ate_report_core::table::{dedup_file, deduplicate, load_results};
use ate_report_core::{ReportError, Result};
use polars::prelude::*;
use tempfile::tempdir;

const HEADER: &str =
    "Treatment Variable,Treatment Level,Target Variable,ATE,Lower Bound,Upper Bound,Method";

fn write_fixture(dir: &std::path::Path, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.join("output.csv");
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(&path, content).expect("failed to write fixture");
    path
}

#[test]
fn dedup_keeps_first_occurrence_in_original_order() -> Result<()> {
    let dir = tempdir()?;
    let path = write_fixture(
        dir.path(),
        &[
            "ACEDRINK,Heavy Drinking,ADDEPEV3,0.5,0.1,0.9,dml",
            "ACEDRINK,No Drinking,ADDEPEV3,0.3,0.0,0.6,dml",
            "ACEDRINK,Heavy Drinking,ADDEPEV3,0.5,0.1,0.9,dml",
            "_SEX,Female,MENTHLTH,1.2,0.8,1.6,dml",
            "ACEDRINK,Heavy Drinking,ADDEPEV3,0.5,0.1,0.9,forest",
        ],
    );

    let (deduped, summary) = dedup_file(&path)?;

    assert_eq!(summary.rows_before, 5);
    assert_eq!(summary.rows_after, 4);
    assert_eq!(summary.removed(), 1);

    let levels: Vec<Option<&str>> = deduped.column("Treatment Level")?.str()?.into_iter().collect();
    assert_eq!(
        levels,
        vec![
            Some("Heavy Drinking"),
            Some("No Drinking"),
            Some("Female"),
            Some("Heavy Drinking"),
        ]
    );
    let methods: Vec<Option<&str>> = deduped.column("Method")?.str()?.into_iter().collect();
    assert_eq!(methods[3], Some("forest"));
    Ok(())
}

#[test]
fn dedup_overwrites_the_input_and_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    let path = write_fixture(
        dir.path(),
        &[
            "A,Heavy Drinking,X,0.5,0.1,0.9,dml",
            "A,Heavy Drinking,X,0.5,0.1,0.9,dml",
            "A,No Drinking,X,0.3,0.0,0.6,dml",
        ],
    );

    dedup_file(&path)?;
    let once = fs::read_to_string(&path)?;
    let reloaded = load_results(&path)?;
    assert_eq!(reloaded.height(), 2);
    assert!(once.starts_with(HEADER));

    let (_, second) = dedup_file(&path)?;
    let twice = fs::read_to_string(&path)?;
    assert_eq!(second.rows_before, 2);
    assert_eq!(second.removed(), 0);
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn deduplicate_is_idempotent_in_memory() -> Result<()> {
    let df = DataFrame::new(vec![
        Series::new("Treatment Variable".into(), vec!["A", "A", "B", "A"]).into(),
        Series::new("ATE".into(), vec![0.5, 0.5, 0.2, 0.5]).into(),
    ])?;

    let once = deduplicate(&df)?;
    let twice = deduplicate(&once)?;

    assert_eq!(once.height(), 2);
    assert!(once.equals(&twice));
    Ok(())
}

#[test]
fn missing_columns_are_reported_together() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("output.csv");
    fs::write(&path, "Treatment Variable,Treatment Level,ATE\nA,B,0.1\n")?;

    match load_results(&path) {
        Err(ReportError::MissingColumns { missing }) => {
            assert_eq!(missing, vec!["Target Variable", "Lower Bound", "Upper Bound"]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
    Ok(())
}

#[test]
fn non_numeric_effect_column_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    let path = write_fixture(dir.path(), &["A,Heavy Drinking,X,high,0.1,0.9,dml"]);

    let err = load_results(&path).unwrap_err();
    assert!(matches!(err, ReportError::NonNumericColumn { ref column, .. } if column == "ATE"));
    Ok(())
}

#[test]
fn missing_input_file_fails() {
    let dir = tempdir().expect("tempdir");
    assert!(dedup_file(&dir.path().join("absent.csv")).is_err());
}

#[test]
fn header_only_file_loads_as_empty_table() -> Result<()> {
    let dir = tempdir()?;
    let path = write_fixture(dir.path(), &[]);

    let df = load_results(&path)?;
    assert_eq!(df.height(), 0);
    assert_eq!(df.column("ATE")?.dtype(), &DataType::Float64);
    Ok(())
}

#[test]
fn late_worded_levels_and_late_floats_load_from_large_files() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("output.csv");

    let mut content = String::from(
        "Treatment Variable,Treatment Level,Target Variable,ATE,Lower Bound,Upper Bound,Samples\n",
    );
    for i in 0..150 {
        content.push_str(&format!("GENHLTH,{},ADDEPEV3,0.{i:03},0.0,1.0,{i}\n", i % 5));
    }
    content.push_str("GENHLTH,Very Good,ADDEPEV3,0.5,0.1,0.9,12.5\n");
    content.push_str("ACEDRINK,Heavy Drinking,ADDEPEV3,0.4,0.2,0.6,7\n");
    fs::write(&path, content)?;

    let (deduped, summary) = dedup_file(&path)?;
    assert_eq!(summary.rows_before, 152);
    assert_eq!(summary.rows_after, 152);

    assert_eq!(deduped.column("Treatment Level")?.dtype(), &DataType::String);
    let levels: Vec<Option<&str>> = deduped.column("Treatment Level")?.str()?.into_iter().collect();
    assert_eq!(levels[0], Some("0"));
    assert_eq!(levels[150], Some("Very Good"));
    assert_eq!(levels[151], Some("Heavy Drinking"));

    let samples = deduped.column("Samples")?.cast(&DataType::Float64)?;
    assert_eq!(samples.f64()?.get(150), Some(12.5));

    assert_eq!(load_results(&path)?.height(), 152);
    Ok(())
}
