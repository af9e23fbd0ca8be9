//! Loader degradation tests: every failure mode substitutes an empty dataset
//! and keeps the rest of the load intact.

use watchdog_api::config::DatasetsConfig;
use watchdog_api::congress::ReferenceData;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn fixture_datasets() -> DatasetsConfig {
    DatasetsConfig {
        legislators: fixture("legislators-current.yaml"),
        committees: fixture("committees-current.yaml"),
        membership: fixture("committee-membership-current.yaml"),
        committee_names: fixture("committee-names.yaml"),
    }
}

#[test]
fn loads_all_fixture_datasets() {
    let data = ReferenceData::load(&fixture_datasets());

    assert_eq!(data.load_failures, 0);
    assert_eq!(data.legislators.len(), 7);
    assert_eq!(data.committees.len(), 4);
    assert_eq!(data.membership.len(), 6);
    assert_eq!(
        data.committee_names.get("HSAS").map(String::as_str),
        Some("Armed Services Committee")
    );
}

#[test]
fn missing_files_degrade_to_empty_datasets() {
    let datasets = DatasetsConfig {
        legislators: fixture("does-not-exist.yaml"),
        committees: fixture("also-missing.yaml"),
        membership: fixture("gone.yaml"),
        committee_names: fixture("nope.yaml"),
    };

    let data = ReferenceData::load(&datasets);
    assert_eq!(data.load_failures, 4);
    assert!(data.legislators.is_empty());
    assert!(data.committees.is_empty());
    assert!(data.membership.is_empty());
    assert!(data.committee_names.is_empty());
}

#[test]
fn malformed_file_only_empties_its_own_dataset() {
    let mut datasets = fixture_datasets();
    datasets.legislators = fixture("malformed.yaml");

    let data = ReferenceData::load(&datasets);
    assert_eq!(data.load_failures, 1);
    assert!(data.legislators.is_empty());
    // The other sources still load.
    assert_eq!(data.committees.len(), 4);
    assert_eq!(data.membership.len(), 6);
}
