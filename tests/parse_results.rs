// tests/parse_results.rs

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use netuno_batch::errors::NetunoBatchError;
use netuno_batch::results::parse_results;

fn artifact(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn parses_semicolon_separated_series() {
    let file = artifact(
        "Date;Precipitation (mm);Potable savings (%)\n\
         01/01/2006;12.5;38.2\n\
         02/01/2006;0;35.1\n",
    );

    let records = parse_results(file.path()).unwrap();

    assert_eq!(
        records.columns,
        vec!["Date", "Precipitation (mm)", "Potable savings (%)"]
    );
    assert_eq!(records.rows.len(), 2);
    assert_eq!(records.rows[0].date, "01/01/2006");
    assert_eq!(records.rows[0].values, vec![12.5, 38.2]);
}

#[test]
fn normalizes_brazilian_decimal_commas() {
    let file = artifact("Date;Volume (l)\n01/01/2006;1234,75\n");

    let records = parse_results(file.path()).unwrap();

    assert_eq!(records.rows[0].values, vec![1234.75]);
}

#[test]
fn skips_blank_lines() {
    let file = artifact("Date;Volume (l)\n\n01/01/2006;1\n\n02/01/2006;2\n");

    let records = parse_results(file.path()).unwrap();

    assert_eq!(records.rows.len(), 2);
}

#[test]
fn a_missing_artifact_is_a_parse_error() {
    let err = parse_results(Path::new("/nonexistent/output.csv")).unwrap_err();
    assert!(matches!(err, NetunoBatchError::ResultParse { .. }));
}

#[test]
fn an_empty_artifact_is_a_parse_error() {
    let file = artifact("");
    let err = parse_results(file.path()).unwrap_err();
    assert!(matches!(err, NetunoBatchError::ResultParse { .. }));
}

#[test]
fn a_header_only_artifact_is_a_parse_error() {
    let file = artifact("Date;Volume (l)\n");
    let err = parse_results(file.path()).unwrap_err();
    assert!(matches!(err, NetunoBatchError::ResultParse { .. }));
}

#[test]
fn a_non_numeric_field_names_the_line() {
    let file = artifact("Date;Volume (l)\n01/01/2006;ok\n");

    match parse_results(file.path()).unwrap_err() {
        NetunoBatchError::ResultParse { reason, .. } => {
            assert!(reason.contains("line 2"), "unexpected reason: {reason}");
        }
        other => panic!("expected ResultParse, got {other:?}"),
    }
}

#[test]
fn a_short_row_is_a_parse_error() {
    let file = artifact("Date;A;B\n01/01/2006;1\n");
    let err = parse_results(file.path()).unwrap_err();
    assert!(matches!(err, NetunoBatchError::ResultParse { .. }));
}
