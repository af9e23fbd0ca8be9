//! Reference dataset loading.
//!
//! One-shot synchronous load of the reference files, intended to run once at
//! process start (or on an explicit reload). The loader never fails: a
//! missing or malformed file degrades to an empty dataset of the expected
//! shape with a logged diagnostic, so a partial data drop produces a smaller
//! directory instead of taking the service down.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::DatasetsConfig;

use super::types::{CommitteeDefinition, CommitteeNames, LegislatorRecord, MembershipRoster};

/// The three raw reference datasets plus the curated name table.
#[derive(Debug, Default)]
pub struct ReferenceData {
    pub legislators: Vec<LegislatorRecord>,
    pub committees: Vec<CommitteeDefinition>,
    pub membership: MembershipRoster,
    pub committee_names: CommitteeNames,
    /// How many of the four sources failed to load this round.
    pub load_failures: usize,
}

impl ReferenceData {
    /// Load every dataset from the configured paths.
    ///
    /// Each source loads independently; one unreadable file does not empty
    /// the others.
    #[must_use]
    pub fn load(datasets: &DatasetsConfig) -> Self {
        let mut load_failures = 0;
        let legislators = load_dataset(&datasets.legislators, "legislators", &mut load_failures);
        let committees = load_dataset(&datasets.committees, "committees", &mut load_failures);
        let membership = load_dataset(&datasets.membership, "membership", &mut load_failures);
        let committee_names = load_dataset(
            &datasets.committee_names,
            "committee-names",
            &mut load_failures,
        );

        Self {
            legislators,
            committees,
            membership,
            committee_names,
            load_failures,
        }
    }
}

/// Read and parse one YAML dataset, degrading to `T::default()` on any
/// failure. A wrong top-level shape (scalar where a list was expected) is
/// treated the same as a missing file.
fn load_dataset<T>(path: impl AsRef<Path>, dataset: &str, load_failures: &mut usize) -> T
where
    T: DeserializeOwned + Default,
{
    let path = path.as_ref();
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(
                dataset,
                path = %path.display(),
                error = %err,
                "reference file unreadable, substituting empty dataset"
            );
            *load_failures += 1;
            return T::default();
        }
    };

    match serde_yaml::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(
                dataset,
                path = %path.display(),
                error = %err,
                "reference file malformed, substituting empty dataset"
            );
            *load_failures += 1;
            T::default()
        }
    }
}
