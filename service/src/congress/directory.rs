//! Directory assembly and the lookup surface served to the HTTP layer.
//!
//! `CongressDirectory::build` runs the whole reconciliation pipeline over
//! the loaded reference data and produces an immutable snapshot: two ordered
//! member collections plus the committee hierarchy. A bad record is skipped
//! and counted, never fatal; the worst case for bad input is a smaller but
//! internally consistent directory.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::DatasetsConfig;

use super::assignments::{assignments_for, CommitteeAssignment};
use super::committees::{CommitteeMap, CommitteeSummary};
use super::ident::{image_key, synthesize_id};
use super::loader::ReferenceData;
use super::states::{full_state_name, state_name};
use super::term::{Chamber, CurrentTerm, ResolveError, AT_LARGE};
use super::types::{LegislatorRecord, MembershipRoster, NameRecord};

/// District sort sentinel: At-Large seats order after every numbered district.
const AT_LARGE_SORT: i64 = 9_999;
const SENIOR: &str = "senior";
const JUNIOR: &str = "junior";

/// A fully resolved member of Congress.
///
/// Owned by the directory's output collections and read-only to consumers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Member {
    /// Synthetic identifier derived from name, state, and district.
    pub congress_id: String,
    /// Dataset-provided unique key, distinct from `congress_id`.
    pub bioguide_id: String,
    pub name: String,
    /// Full state name, never a two-letter code.
    pub state: String,
    /// Normalized district, representatives only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// "senior" or "junior", senators only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority: Option<String>,
    /// Senate class, senators only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_form: Option<String>,
    pub image_filename: String,
    /// Sorted committee assignments; empty (not absent) when none.
    pub committees: Vec<CommitteeAssignment>,
}

/// Counters from one directory build, kept for operational visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct BuildStats {
    pub representatives: usize,
    pub senators: usize,
    pub skipped: usize,
    /// Skip-reason label to count.
    pub skip_reasons: BTreeMap<String, usize>,
    /// Reference files that failed to load this round.
    pub load_failures: usize,
}

/// Synthetic identifiers resolved for a registering user's state/district.
///
/// Absent matches are simply `None`/empty; there is no internal error the
/// caller needs to distinguish from a miss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DistrictLink {
    pub representative: Option<String>,
    /// Up to two senator identifiers.
    pub senators: Vec<String>,
}

impl DistrictLink {
    /// True when neither a representative nor any senator matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.representative.is_none() && self.senators.is_empty()
    }
}

/// The reconciled congressional directory: one immutable snapshot.
#[derive(Debug, Default, PartialEq)]
pub struct CongressDirectory {
    pub representatives: Vec<Member>,
    pub senators: Vec<Member>,
    committees: CommitteeMap,
    stats: BuildStats,
}

impl CongressDirectory {
    /// Run the full reconciliation pipeline over loaded reference data.
    #[must_use]
    pub fn build(data: &ReferenceData) -> Self {
        let committees =
            CommitteeMap::build(&data.committees, &data.membership, &data.committee_names);

        let mut representatives = Vec::new();
        let mut senators = Vec::new();
        let mut stats = BuildStats {
            load_failures: data.load_failures,
            ..BuildStats::default()
        };

        for record in &data.legislators {
            match resolve_member(record, &data.membership, &committees) {
                Ok((Chamber::Representative, member)) => representatives.push(member),
                Ok((Chamber::Senator, member)) => senators.push(member),
                Err(err) => {
                    stats.skipped += 1;
                    *stats
                        .skip_reasons
                        .entry(err.label().to_string())
                        .or_insert(0) += 1;
                    tracing::debug!(
                        bioguide = record.id.bioguide.as_deref().unwrap_or("<unknown>"),
                        reason = %err,
                        "skipping legislator record"
                    );
                }
            }
        }

        representatives.sort_by(|a, b| {
            a.state.cmp(&b.state).then_with(|| {
                district_sort_key(a.district.as_deref())
                    .cmp(&district_sort_key(b.district.as_deref()))
            })
        });
        senators.sort_by(|a, b| {
            a.state.cmp(&b.state).then_with(|| {
                seniority_sort_key(a.seniority.as_deref())
                    .cmp(&seniority_sort_key(b.seniority.as_deref()))
            })
        });

        stats.representatives = representatives.len();
        stats.senators = senators.len();
        tracing::info!(
            representatives = stats.representatives,
            senators = stats.senators,
            skipped = stats.skipped,
            committees = committees.len(),
            load_failures = stats.load_failures,
            "congressional directory assembled"
        );

        Self {
            representatives,
            senators,
            committees,
            stats,
        }
    }

    #[must_use]
    pub const fn stats(&self) -> &BuildStats {
        &self.stats
    }

    #[must_use]
    pub const fn committee_map(&self) -> &CommitteeMap {
        &self.committees
    }

    /// All main committees for dropdown use, sorted by name.
    #[must_use]
    pub fn committees(&self) -> Vec<CommitteeSummary> {
        self.committees.summaries()
    }

    /// Find a representative by state (code or full name) and district.
    ///
    /// An absent district matches the state's At-Large seat, mirroring how
    /// single-representative states are looked up at registration time.
    #[must_use]
    pub fn find_representative(&self, state: &str, district: Option<&str>) -> Option<&Member> {
        let target_state = full_state_name(state);
        let target_district = district
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| {
                if d.eq_ignore_ascii_case(AT_LARGE) {
                    AT_LARGE.to_string()
                } else {
                    d.to_string()
                }
            });

        self.representatives.iter().find(|rep| {
            if !rep.state.eq_ignore_ascii_case(&target_state) {
                return false;
            }
            match (&target_district, rep.district.as_deref()) {
                (Some(want), Some(have)) => have.eq_ignore_ascii_case(want),
                (None, Some(have)) => have == AT_LARGE,
                _ => false,
            }
        })
    }

    /// All senators for a state (code or full name).
    #[must_use]
    pub fn find_senators(&self, state: &str) -> Vec<&Member> {
        let target_state = full_state_name(state);
        self.senators
            .iter()
            .filter(|sen| sen.state.eq_ignore_ascii_case(&target_state))
            .collect()
    }

    /// Find any member, either chamber, by synthetic identifier.
    #[must_use]
    pub fn find_member_by_id(&self, congress_id: &str) -> Option<&Member> {
        self.representatives
            .iter()
            .chain(self.senators.iter())
            .find(|member| member.congress_id == congress_id)
    }

    /// Resolve the identifiers a registering user should be linked to.
    #[must_use]
    pub fn link_district(&self, state: &str, district: Option<&str>) -> DistrictLink {
        DistrictLink {
            representative: self
                .find_representative(state, district)
                .map(|m| m.congress_id.clone()),
            senators: self
                .find_senators(state)
                .into_iter()
                .take(2)
                .map(|m| m.congress_id.clone())
                .collect(),
        }
    }
}

fn resolve_member(
    record: &LegislatorRecord,
    membership: &MembershipRoster,
    committees: &CommitteeMap,
) -> Result<(Chamber, Member), ResolveError> {
    let current = CurrentTerm::resolve(record)?;
    let name = display_name(record.name.as_ref()).ok_or(ResolveError::EmptyName)?;
    let state = state_name(&current.state_code)
        .ok_or_else(|| ResolveError::UnknownStateCode(current.state_code.clone()))?;

    let congress_id = synthesize_id(&name, &current.state_code, current.district.as_deref());
    let bioguide_id = record.id.bioguide.clone().unwrap_or_default();
    let committee_assignments = if bioguide_id.is_empty() {
        Vec::new()
    } else {
        assignments_for(&bioguide_id, membership, committees)
    };

    let seniority = match current.chamber {
        Chamber::Senator => Some(normalize_seniority(current.state_rank.as_deref())),
        Chamber::Representative => None,
    };
    let class = match current.chamber {
        Chamber::Senator => current.class,
        Chamber::Representative => None,
    };

    let member = Member {
        congress_id,
        bioguide_id,
        image_filename: image_key(&name),
        name,
        state: state.to_string(),
        district: current.district,
        seniority,
        class,
        party: current.party,
        website: current.url,
        phone: current.phone,
        office: current.office,
        contact_form: current.contact_form,
        committees: committee_assignments,
    };

    Ok((current.chamber, member))
}

/// Prefer the dataset's official full name, falling back to "first last".
fn display_name(name: Option<&NameRecord>) -> Option<String> {
    let name = name?;
    if let Some(full) = name.official_full.as_deref() {
        let trimmed = full.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    let joined = [name.first.as_deref(), name.last.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn district_sort_key(district: Option<&str>) -> i64 {
    district
        .and_then(|d| d.parse::<i64>().ok())
        .unwrap_or(AT_LARGE_SORT)
}

/// Missing or unrecognized ranks are treated as junior for determinism.
fn normalize_seniority(state_rank: Option<&str>) -> String {
    if state_rank.is_some_and(|rank| rank.eq_ignore_ascii_case(SENIOR)) {
        SENIOR.to_string()
    } else {
        JUNIOR.to_string()
    }
}

fn seniority_sort_key(seniority: Option<&str>) -> u8 {
    u8::from(!seniority.is_some_and(|rank| rank == SENIOR))
}

/// Shared handle to the current directory snapshot.
///
/// A reload builds a complete replacement off to the side and swaps one
/// `Arc`, so concurrent readers never observe a partially rebuilt directory.
#[derive(Clone)]
pub struct DirectoryHandle {
    current: Arc<RwLock<Arc<CongressDirectory>>>,
    datasets: DatasetsConfig,
}

impl DirectoryHandle {
    #[must_use]
    pub fn new(directory: CongressDirectory, datasets: DatasetsConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(directory))),
            datasets,
        }
    }

    /// The current immutable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CongressDirectory> {
        Arc::clone(
            &self
                .current
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Rebuild the directory from the configured datasets and swap it in.
    pub fn reload(&self) -> BuildStats {
        let data = ReferenceData::load(&self.datasets);
        let rebuilt = Arc::new(CongressDirectory::build(&data));
        let stats = rebuilt.stats().clone();
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = rebuilt;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::congress::types::{
        District, LegislatorIds, LegislatorRecord, MemberStub, MembershipRoster, NameRecord,
        TermRecord,
    };

    fn rep_record(
        bioguide: &str,
        first: &str,
        last: &str,
        state: &str,
        district: District,
    ) -> LegislatorRecord {
        LegislatorRecord {
            id: LegislatorIds {
                bioguide: Some(bioguide.to_string()),
            },
            name: Some(NameRecord {
                first: Some(first.to_string()),
                last: Some(last.to_string()),
                official_full: None,
            }),
            terms: vec![TermRecord {
                term_type: Some("rep".to_string()),
                state: Some(state.to_string()),
                district: Some(district),
                party: Some("Republican".to_string()),
                end: Some("2025-01-03".to_string()),
                ..TermRecord::default()
            }],
        }
    }

    fn sen_record(
        bioguide: &str,
        first: &str,
        last: &str,
        state: &str,
        state_rank: Option<&str>,
    ) -> LegislatorRecord {
        LegislatorRecord {
            id: LegislatorIds {
                bioguide: Some(bioguide.to_string()),
            },
            name: Some(NameRecord {
                first: Some(first.to_string()),
                last: Some(last.to_string()),
                official_full: None,
            }),
            terms: vec![TermRecord {
                term_type: Some("sen".to_string()),
                state: Some(state.to_string()),
                state_rank: state_rank.map(ToString::to_string),
                class: Some(2),
                end: Some("2027-01-03".to_string()),
                ..TermRecord::default()
            }],
        }
    }

    fn data(legislators: Vec<LegislatorRecord>) -> ReferenceData {
        ReferenceData {
            legislators,
            ..ReferenceData::default()
        }
    }

    #[test]
    fn representatives_sort_numeric_before_at_large_within_state() {
        let directory = CongressDirectory::build(&data(vec![
            rep_record("T000001", "Pat", "Abbott", "TX", District::Text(AT_LARGE.into())),
            rep_record("T000002", "Lee", "Baker", "TX", District::Number(10)),
            rep_record("T000003", "Sam", "Carter", "TX", District::Number(2)),
            rep_record("A000001", "Ann", "Dalton", "AL", District::Number(1)),
        ]));

        let order: Vec<(&str, &str)> = directory
            .representatives
            .iter()
            .map(|m| (m.state.as_str(), m.district.as_deref().unwrap_or("")))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Alabama", "1"),
                ("Texas", "2"),
                ("Texas", "10"),
                ("Texas", AT_LARGE),
            ]
        );
    }

    #[test]
    fn senators_sort_senior_before_junior() {
        let directory = CongressDirectory::build(&data(vec![
            sen_record("B000001", "Kay", "Beta", "AL", Some("junior")),
            sen_record("A000001", "Al", "Alpha", "AL", Some("senior")),
            sen_record("C000001", "Jo", "Gamma", "AK", None),
        ]));

        let order: Vec<(&str, &str)> = directory
            .senators
            .iter()
            .map(|m| (m.state.as_str(), m.seniority.as_deref().unwrap_or("")))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Alabama", "senior"),
                ("Alabama", "junior"),
                ("Alaska", "junior"),
            ]
        );
    }

    #[test]
    fn bad_records_are_skipped_and_counted() {
        let mut no_terms = rep_record("X000001", "No", "Terms", "AL", District::Number(1));
        no_terms.terms.clear();

        let mut bad_chamber = rep_record("X000002", "Bad", "Chamber", "AL", District::Number(1));
        bad_chamber.terms[0].term_type = Some("prez".to_string());

        let territory = rep_record("X000003", "Far", "Away", "PR", District::Number(1));

        let mut nameless = rep_record("X000004", "", "", "AL", District::Number(2));
        nameless.name = Some(NameRecord::default());

        let good = rep_record("X000005", "Okay", "Fine", "AL", District::Number(3));

        let directory = CongressDirectory::build(&data(vec![
            no_terms,
            bad_chamber,
            territory,
            nameless,
            good,
        ]));

        assert_eq!(directory.representatives.len(), 1);
        let stats = directory.stats();
        assert_eq!(stats.skipped, 4);
        assert_eq!(stats.skip_reasons["no-current-term"], 1);
        assert_eq!(stats.skip_reasons["unknown-chamber"], 1);
        assert_eq!(stats.skip_reasons["unknown-state"], 1);
        assert_eq!(stats.skip_reasons["empty-name"], 1);
    }

    #[test]
    fn official_full_name_is_preferred() {
        let mut record = rep_record("P000619", "Mary", "Peltola", "AK", District::Text(AT_LARGE.into()));
        if let Some(name) = record.name.as_mut() {
            name.official_full = Some("Mary Sattler Peltola".to_string());
        }

        let directory = CongressDirectory::build(&data(vec![record]));
        assert_eq!(directory.representatives[0].name, "Mary Sattler Peltola");
    }

    #[test]
    fn member_with_no_roster_entries_gets_empty_committees() {
        let directory = CongressDirectory::build(&data(vec![rep_record(
            "C001054",
            "Jerry",
            "Carl",
            "AL",
            District::Number(1),
        )]));
        assert!(directory.representatives[0].committees.is_empty());
    }

    #[test]
    fn roster_entry_for_unknown_legislator_is_harmless() {
        let mut reference = data(vec![rep_record(
            "C001054",
            "Jerry",
            "Carl",
            "AL",
            District::Number(1),
        )]);
        let roster: MembershipRoster = [(
            "HSAS".to_string(),
            vec![MemberStub {
                bioguide: Some("Z999999".to_string()),
                title: None,
                rank: None,
            }],
        )]
        .into();
        reference.membership = roster;

        let directory = CongressDirectory::build(&reference);
        assert_eq!(directory.representatives.len(), 1);
        assert!(directory.find_member_by_id("Z999999").is_none());
    }

    #[test]
    fn find_representative_matches_code_name_and_at_large() {
        let directory = CongressDirectory::build(&data(vec![
            rep_record("C001054", "Jerry", "Carl", "AL", District::Number(1)),
            rep_record("P000619", "Mary", "Peltola", "AK", District::Text(AT_LARGE.into())),
        ]));

        assert!(directory.find_representative("AL", Some("1")).is_some());
        assert!(directory.find_representative("Alabama", Some("1")).is_some());
        assert!(directory.find_representative("alabama", Some("1")).is_some());
        assert!(directory.find_representative("AL", Some("2")).is_none());
        // At-Large seat matches both the explicit label and no district.
        assert!(directory
            .find_representative("AK", Some("at-large"))
            .is_some());
        assert!(directory.find_representative("AK", None).is_some());
        assert!(directory.find_representative("AL", None).is_none());
    }

    #[test]
    fn link_district_resolves_rep_and_two_senators() {
        let directory = CongressDirectory::build(&data(vec![
            rep_record("C001054", "Jerry", "Carl", "AL", District::Number(1)),
            sen_record("T000278", "Tommy", "Tuberville", "AL", Some("senior")),
            sen_record("B001319", "Katie", "Britt", "AL", Some("junior")),
        ]));

        let link = directory.link_district("AL", Some("1"));
        assert_eq!(link.representative.as_deref(), Some("ALD1_JERRY"));
        assert_eq!(link.senators, vec!["AL_TOMMY", "AL_KATIE"]);

        let miss = directory.link_district("WY", Some("1"));
        assert!(miss.is_empty());
    }

    #[test]
    fn snapshot_swap_replaces_directory_atomically() {
        let directory = CongressDirectory::build(&data(vec![rep_record(
            "C001054",
            "Jerry",
            "Carl",
            "AL",
            District::Number(1),
        )]));
        let missing = crate::config::DatasetsConfig {
            legislators: "/nonexistent/legislators.yaml".into(),
            committees: "/nonexistent/committees.yaml".into(),
            membership: "/nonexistent/membership.yaml".into(),
            committee_names: "/nonexistent/names.yaml".into(),
        };
        let handle = DirectoryHandle::new(directory, missing);

        let before = handle.snapshot();
        assert_eq!(before.representatives.len(), 1);

        // The reload paths do not exist, so the rebuild degrades to an empty
        // directory; the old snapshot stays valid for its holders.
        let stats = handle.reload();
        assert_eq!(stats.representatives, 0);
        assert_eq!(stats.load_failures, 4);
        assert_eq!(before.representatives.len(), 1);
        assert_eq!(handle.snapshot().representatives.len(), 0);
    }
}
