// tests/property_metadata.rs

use std::path::Path;

use proptest::prelude::*;

use netuno_batch::meta::InputFile;

proptest! {
    /// Any well-formed triple survives the name round trip exactly.
    #[test]
    fn well_formed_names_round_trip(
        city in "[A-Za-z0-9-]{1,12}",
        model in "[A-Za-z0-9-]{1,12}",
        scenario in "[A-Za-z0-9-]{1,12}",
    ) {
        let name = format!("{city}_{model}_{scenario}.csv");
        let file = InputFile::from_path(Path::new(&name)).unwrap();

        prop_assert_eq!(file.city, city);
        prop_assert_eq!(file.model, model);
        prop_assert_eq!(file.scenario, scenario);
    }

    /// A stem without any separator never parses.
    #[test]
    fn names_without_separators_fail(stem in "[A-Za-z0-9-]{1,24}") {
        let name = format!("{stem}.csv");
        prop_assert!(InputFile::from_path(Path::new(&name)).is_err());
    }
}
