use std::path::PathBuf;

use ate_report_core::{ChartSpec, ErrorBarPolicy, ReportConfig, ReportError};

#[test]
fn defaults_cover_both_targets() {
    let config = ReportConfig::default();
    assert_eq!(config.input, PathBuf::from("output.csv"));
    assert_eq!(config.dpi, 100);
    assert_eq!(config.error_bars, ErrorBarPolicy::Clamp);
    assert_eq!(
        config.charts,
        vec![
            ChartSpec::for_target("ADDEPEV3", 12.0, 6.0),
            ChartSpec::for_target("MENTHLTH", 10.0, 6.0),
        ]
    );
    assert_eq!(config.charts[0].file_name, "average_ate_addepev3.png");
    assert_eq!(config.charts[1].title(), "Average ATE for MENTHLTH");
}

#[test]
fn empty_toml_yields_defaults() {
    let config = ReportConfig::from_toml_str("").unwrap();
    assert_eq!(config, ReportConfig::default());
}

#[test]
fn toml_overrides_charts_and_policy() {
    let config = ReportConfig::from_toml_str(
        r#"
input = "results/ate.csv"
output_dir = "figures"
dpi = 200
error_bars = "reject"

[[charts]]
target = "GENHLTH"
file_name = "genhlth.svg"
width_in = 8.0
height_in = 4.0
"#,
    )
    .unwrap();

    assert_eq!(config.input, PathBuf::from("results/ate.csv"));
    assert_eq!(config.dpi, 200);
    assert_eq!(config.error_bars, ErrorBarPolicy::Reject);
    assert_eq!(config.charts.len(), 1);
    assert_eq!(config.charts[0].target, "GENHLTH");
    assert_eq!(
        config.output_path(&config.charts[0].file_name),
        PathBuf::from("figures").join("genhlth.svg")
    );
    assert_eq!(config.dictionary_file, "variable_names_labels.png");
}

#[test]
fn toml_dictionary_with_unequal_arrays_is_rejected() {
    let config = ReportConfig::from_toml_str(
        r#"
[dictionary]
codes = ["A", "B"]
labels = ["only one"]
"#,
    )
    .unwrap();

    let err = config.variable_dictionary().unwrap_err();
    assert!(matches!(
        err,
        ReportError::DictionaryLengthMismatch { codes: 2, labels: 1 }
    ));
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let err = ReportConfig::from_toml_str(r#"error_bars = "ignore""#).unwrap_err();
    assert!(matches!(err, ReportError::Toml(_)));
}
