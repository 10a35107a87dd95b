use ate_report_core::config::{DictionarySource, ReportConfig};
use ate_report_core::dictionary::{VariableDictionary, HEADER, LABELS, VARIABLE_NAMES};
use ate_report_core::ReportError;

#[test]
fn builtin_dictionary_is_sorted_by_code() {
    let dictionary = VariableDictionary::builtin();
    assert_eq!(dictionary.len(), VARIABLE_NAMES.len());
    assert_eq!(VARIABLE_NAMES.len(), LABELS.len());

    let codes: Vec<&str> = dictionary.entries().iter().map(|e| e.code.as_str()).collect();
    let mut sorted = codes.clone();
    sorted.sort();
    assert_eq!(codes, sorted);
    assert_eq!(codes.first(), Some(&"ACEDEPRS"));
    assert_eq!(codes.last(), Some(&"_SEX"));
}

#[test]
fn labels_follow_their_codes_through_the_sort() {
    let dictionary = VariableDictionary::builtin();
    let entry = dictionary
        .entries()
        .iter()
        .find(|e| e.code == "ADDEPEV3")
        .expect("ADDEPEV3 present");
    assert_eq!(entry.label, "(Ever told) you had a depressive disorder");
}

#[test]
fn table_rows_start_with_the_header() {
    let dictionary = VariableDictionary::from_parallel(&["MENTHLTH", "GENHLTH"], &[
        "Number of Days Mental Health Not Good",
        "General Health",
    ])
    .unwrap();

    let rows = dictionary.table_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], [HEADER.0, HEADER.1]);
    assert_eq!(rows[1], ["GENHLTH", "General Health"]);
}

#[test]
fn mismatched_lengths_fail_fast() {
    let err = VariableDictionary::from_parallel(&["A", "B", "C"], &["a", "b"]).unwrap_err();
    assert!(matches!(
        err,
        ReportError::DictionaryLengthMismatch { codes: 3, labels: 2 }
    ));
}

#[test]
fn config_dictionary_overrides_builtin() {
    let config = ReportConfig {
        dictionary: Some(DictionarySource {
            codes: vec!["ZED".into(), "ALPHA".into()],
            labels: vec!["Last".into(), "First".into()],
        }),
        ..ReportConfig::default()
    };

    let dictionary = config.variable_dictionary().unwrap();
    assert_eq!(dictionary.len(), 2);
    assert_eq!(dictionary.entries()[0].code, "ALPHA");
    assert_eq!(dictionary.entries()[0].label, "First");
}
