// tests/export_roundtrip.rs

use netuno_batch::export::Exporter;
use netuno_batch::results::{ResultRow, ResultSet, parse_results};

fn sample_records() -> ResultSet {
    ResultSet {
        columns: vec![
            "Date".to_string(),
            "Precipitation (mm)".to_string(),
            "Potable savings (%)".to_string(),
        ],
        rows: vec![
            ResultRow {
                date: "01/01/2006".to_string(),
                values: vec![12.5, 38.2],
            },
            ResultRow {
                date: "02/01/2006".to_string(),
                values: vec![0.0, 35.1],
            },
            ResultRow {
                date: "03/01/2006".to_string(),
                values: vec![3.25, 36.0],
            },
        ],
    }
}

#[test]
fn exported_results_parse_back_identically() {
    let tmp = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(tmp.path());
    let records = sample_records();

    let path = exporter
        .save_results("CityA", "ModelB", "rcp45", &records)
        .unwrap();
    assert_eq!(path, tmp.path().join("CityA").join("ModelB").join("rcp45.csv"));

    let read_back = parse_results(&path).unwrap();
    assert_eq!(read_back, records);
}

#[test]
fn re_exporting_the_same_key_overwrites() {
    let tmp = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(tmp.path());

    let mut records = sample_records();
    exporter
        .save_results("CityA", "ModelB", "rcp45", &records)
        .unwrap();

    records.rows.truncate(1);
    let path = exporter
        .save_results("CityA", "ModelB", "rcp45", &records)
        .unwrap();

    let read_back = parse_results(&path).unwrap();
    assert_eq!(read_back.rows.len(), 1);
    assert_eq!(read_back, records);
}

#[test]
fn keys_map_to_distinct_paths() {
    let tmp = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(tmp.path());
    let records = sample_records();

    exporter
        .save_results("CityA", "ModelB", "rcp45", &records)
        .unwrap();
    exporter
        .save_results("CityA", "ModelB", "rcp85", &records)
        .unwrap();
    exporter
        .save_results("CityB", "ModelB", "rcp45", &records)
        .unwrap();

    assert!(exporter.result_path("CityA", "ModelB", "rcp45").is_file());
    assert!(exporter.result_path("CityA", "ModelB", "rcp85").is_file());
    assert!(exporter.result_path("CityB", "ModelB", "rcp45").is_file());
}
