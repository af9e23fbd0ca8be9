//! Raw record shapes for the reference datasets.
//!
//! These mirror the upstream YAML documents loosely: nearly every field is
//! optional because the three datasets are maintained independently and
//! disagree on completeness. Records are immutable once loaded; everything
//! derived from them is rebuilt from scratch on each load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// External identifiers attached to a legislator record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegislatorIds {
    /// Bioguide ID, the dataset-provided unique key (e.g. "C001054").
    #[serde(default)]
    pub bioguide: Option<String>,
}

/// Name structure of a legislator record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameRecord {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    /// Preferred display form when present (e.g. "Mary Sattler Peltola").
    #[serde(default)]
    pub official_full: Option<String>,
}

/// One entry in a legislator's historical term list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermRecord {
    /// Chamber marker: "rep"/"representative" or "sen"/"senator".
    #[serde(rename = "type", default)]
    pub term_type: Option<String>,
    /// Two-letter state code.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<District>,
    #[serde(default)]
    pub party: Option<String>,
    /// ISO-8601 date string.
    #[serde(default)]
    pub start: Option<String>,
    /// ISO-8601 date string. Terms are compared by this field when picking
    /// the current one.
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub office: Option<String>,
    #[serde(default)]
    pub contact_form: Option<String>,
    /// Senate class (1-3), senators only.
    #[serde(default)]
    pub class: Option<u8>,
    /// "senior" or "junior", senators only.
    #[serde(default)]
    pub state_rank: Option<String>,
}

/// District values arrive as integers or free-form strings depending on the
/// dataset vintage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum District {
    Number(i64),
    Text(String),
}

/// A raw legislator record: bioguide identity, name, and term history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegislatorRecord {
    #[serde(default)]
    pub id: LegislatorIds,
    #[serde(default)]
    pub name: Option<NameRecord>,
    #[serde(default)]
    pub terms: Vec<TermRecord>,
}

/// An embedded subcommittee definition; `thomas_id` here is only the numeric
/// suffix, the full code is the parent's code plus this suffix.
#[derive(Debug, Clone, Deserialize)]
pub struct SubcommitteeDefinition {
    pub thomas_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A raw committee definition from the definitions dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitteeDefinition {
    #[serde(default)]
    pub thomas_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// "house", "senate", or "joint" when present.
    #[serde(rename = "type", default)]
    pub committee_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub subcommittees: Vec<SubcommitteeDefinition>,
}

/// A single roster entry naming a legislator on a committee.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberStub {
    #[serde(default)]
    pub bioguide: Option<String>,
    /// Role on the committee ("Chairman", "Ranking Member", ...). Absent
    /// means plain membership.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub rank: Option<Rank>,
}

/// Raw rank value, preserved in whichever form the roster used.
///
/// The roster mixes integers and strings; the value is parsed into this sum
/// type once at the load boundary so sorting never re-sniffs types, and the
/// original form survives into the output unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Rank {
    Number(i64),
    Text(String),
}

impl Rank {
    /// Sentinel sort position for anything that is not a plain decimal rank.
    pub const UNRANKED: u64 = 999;

    /// Numeric sort key: decimal-digit values order ascending, every
    /// non-numeric, negative, or absent rank collapses to [`Self::UNRANKED`].
    #[must_use]
    pub fn sort_key(rank: Option<&Self>) -> u64 {
        match rank {
            Some(Self::Number(n)) if *n >= 0 => {
                u64::try_from(*n).unwrap_or(Self::UNRANKED)
            }
            Some(Self::Text(s))
                if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) =>
            {
                s.parse().unwrap_or(Self::UNRANKED)
            }
            _ => Self::UNRANKED,
        }
    }
}

/// Membership roster: committee or subcommittee code to member stubs.
///
/// A `BTreeMap` keeps iteration deterministic, which the hierarchy builder
/// and assignment resolver rely on for reproducible output.
pub type MembershipRoster = BTreeMap<String, Vec<MemberStub>>;

/// Authoritative committee-name table, supplied as configuration data.
pub type CommitteeNames = BTreeMap<String, String>;
