// tests/metadata.rs

use std::path::Path;

use netuno_batch::errors::NetunoBatchError;
use netuno_batch::meta::InputFile;

#[test]
fn parses_city_model_scenario_from_file_name() {
    let file = InputFile::from_path(Path::new("/data/CityA_ModelB_ScenarioC.csv")).unwrap();

    assert_eq!(file.city, "CityA");
    assert_eq!(file.model, "ModelB");
    assert_eq!(file.scenario, "ScenarioC");
    assert_eq!(file.path, Path::new("/data/CityA_ModelB_ScenarioC.csv"));
}

#[test]
fn hyphenated_model_names_are_preserved() {
    let file = InputFile::from_path(Path::new("Florianopolis_HadGEM2-ES_rcp45.csv")).unwrap();

    assert_eq!(file.city, "Florianopolis");
    assert_eq!(file.model, "HadGEM2-ES");
    assert_eq!(file.scenario, "rcp45");
}

#[test]
fn rejects_names_with_missing_tokens() {
    let err = InputFile::from_path(Path::new("CityOnly.csv")).unwrap_err();
    assert!(matches!(err, NetunoBatchError::UnparsableFileName(_)));

    let err = InputFile::from_path(Path::new("City_Model.csv")).unwrap_err();
    assert!(matches!(err, NetunoBatchError::UnparsableFileName(_)));
}

#[test]
fn rejects_names_with_extra_separators() {
    let err = InputFile::from_path(Path::new("City_Model_Scenario_Extra.csv")).unwrap_err();
    assert!(matches!(err, NetunoBatchError::UnparsableFileName(_)));
}

#[test]
fn rejects_empty_tokens() {
    let err = InputFile::from_path(Path::new("City__Scenario.csv")).unwrap_err();
    assert!(matches!(err, NetunoBatchError::UnparsableFileName(_)));
}
