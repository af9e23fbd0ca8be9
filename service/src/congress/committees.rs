//! Committee hierarchy reconstruction.
//!
//! The membership roster is the authority on which committee codes exist;
//! the definitions dataset and the curated name table only contribute
//! naming, typing, and URLs. Parent/child relationships are not explicit in
//! the data; they are inferred from the code convention: a 4-character main
//! committee code, optionally followed by an all-digit subcommittee suffix.
//!
//! Naming follows a three-tier precedence, implemented as an ordered
//! resolver chain so each tier stays independently testable:
//!
//! 1. the authoritative name table (curated configuration data),
//! 2. the name field of the matching definition entry,
//! 3. a `"Committee {code}"` placeholder.
//!
//! A placeholder created early (say, by a subcommittee key seen before any
//! better source) is upgraded in place when a real name turns up; a resolved
//! name is never downgraded back to a placeholder. The result is identical
//! no matter what order the roster keys are processed in.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::types::{CommitteeDefinition, CommitteeNames, MembershipRoster};

/// Length of a main-committee code; longer codes carry a subcommittee suffix.
pub const MAIN_CODE_LEN: usize = 4;

/// Committee code classification, parsed once at the boundary instead of
/// re-deriving it by string length at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitteeCode<'a> {
    Main(&'a str),
    Sub { parent: &'a str, suffix: &'a str },
}

impl<'a> CommitteeCode<'a> {
    /// Classify a roster code. Non-digit suffixes are treated as main
    /// committee codes, a convention carried over from the source data.
    #[must_use]
    pub fn parse(code: &'a str) -> Self {
        if code.len() > MAIN_CODE_LEN && code.is_char_boundary(MAIN_CODE_LEN) {
            let (parent, suffix) = code.split_at(MAIN_CODE_LEN);
            if suffix.bytes().all(|b| b.is_ascii_digit()) {
                return Self::Sub { parent, suffix };
            }
        }
        Self::Main(code)
    }
}

/// Chamber classification of a committee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommitteeType {
    House,
    Senate,
    Joint,
}

impl std::fmt::Display for CommitteeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::House => write!(f, "house"),
            Self::Senate => write!(f, "senate"),
            Self::Joint => write!(f, "joint"),
        }
    }
}

/// A reconciled main committee and its named subcommittees.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitteeNode {
    pub code: String,
    pub name: String,
    pub committee_type: CommitteeType,
    pub url: Option<String>,
    /// Subcommittee suffix to short name.
    pub subcommittees: BTreeMap<String, String>,
    /// True while the name is a tier-3 placeholder, eligible for upgrade.
    placeholder: bool,
}

impl CommitteeNode {
    /// Full display name of a subcommittee, derived fresh from the parent's
    /// final name so it can never embed a stale placeholder.
    #[must_use]
    pub fn subcommittee_full_name(&self, suffix: &str) -> Option<String> {
        self.subcommittees
            .get(suffix)
            .map(|short| format!("{} - {}", self.name, short))
    }

    /// Whether the name came from the placeholder tier.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// Entry in the all-committees dropdown listing.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CommitteeSummary {
    pub code: String,
    pub name: String,
    pub committee_type: CommitteeType,
}

// ─── Name resolver chain ─────────────────────────────────────────────────────

struct ResolvedName {
    name: String,
    placeholder: bool,
}

/// Tier 1: the curated authoritative table.
fn authoritative_name(code: &str, names: &CommitteeNames) -> Option<String> {
    names.get(code).cloned()
}

/// Tier 2: the name field of the definition entry with the same code.
fn definition_name(definition: Option<&CommitteeDefinition>) -> Option<String> {
    definition.and_then(|d| d.name.clone())
}

/// Tier 3: last-resort placeholder.
fn placeholder_name(code: &str) -> String {
    format!("Committee {code}")
}

fn resolve_name(
    code: &str,
    names: &CommitteeNames,
    definition: Option<&CommitteeDefinition>,
) -> ResolvedName {
    if let Some(name) = authoritative_name(code, names) {
        return ResolvedName {
            name,
            placeholder: false,
        };
    }
    if let Some(name) = definition_name(definition) {
        tracing::debug!(code, "committee name taken from definitions file");
        return ResolvedName {
            name,
            placeholder: false,
        };
    }
    tracing::debug!(code, "no name found for committee code, using placeholder");
    ResolvedName {
        name: placeholder_name(code),
        placeholder: true,
    }
}

fn infer_type(code: &str, definition: Option<&CommitteeDefinition>) -> CommitteeType {
    if let Some(declared) = definition.and_then(|d| d.committee_type.as_deref()) {
        match declared.to_ascii_lowercase().as_str() {
            "house" => return CommitteeType::House,
            "senate" => return CommitteeType::Senate,
            "joint" => return CommitteeType::Joint,
            _ => {}
        }
    }
    match code.chars().next() {
        Some('H') => CommitteeType::House,
        Some('S') => CommitteeType::Senate,
        _ => CommitteeType::Joint,
    }
}

// ─── Hierarchy builder ───────────────────────────────────────────────────────

/// The reconciled two-level committee hierarchy, keyed by main code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitteeMap {
    nodes: BTreeMap<String, CommitteeNode>,
}

impl CommitteeMap {
    /// Cross-reference the membership roster against the definitions dataset
    /// and the authoritative name table.
    #[must_use]
    pub fn build(
        definitions: &[CommitteeDefinition],
        membership: &MembershipRoster,
        names: &CommitteeNames,
    ) -> Self {
        let defs_by_code: BTreeMap<&str, &CommitteeDefinition> = definitions
            .iter()
            .filter_map(|d| d.thomas_id.as_deref().map(|id| (id, d)))
            .collect();

        let mut nodes: BTreeMap<String, CommitteeNode> = BTreeMap::new();
        for code in membership.keys() {
            match CommitteeCode::parse(code) {
                CommitteeCode::Main(main) => {
                    upsert_main(&mut nodes, main, names, &defs_by_code);
                }
                CommitteeCode::Sub { parent, suffix } => {
                    upsert_main(&mut nodes, parent, names, &defs_by_code);
                    let short_name = defs_by_code
                        .get(parent)
                        .and_then(|d| d.subcommittees.iter().find(|s| s.thomas_id == suffix))
                        .and_then(|s| s.name.clone())
                        .unwrap_or_else(|| format!("Subcommittee {suffix}"));
                    if let Some(node) = nodes.get_mut(parent) {
                        node.subcommittees.insert(suffix.to_string(), short_name);
                    }
                }
            }
        }

        Self { nodes }
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CommitteeNode> {
        self.nodes.get(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dropdown-style listing of all main committees, sorted by name.
    #[must_use]
    pub fn summaries(&self) -> Vec<CommitteeSummary> {
        let mut list: Vec<CommitteeSummary> = self
            .nodes
            .values()
            .map(|node| CommitteeSummary {
                code: node.code.clone(),
                name: node.name.clone(),
                committee_type: node.committee_type,
            })
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        list
    }
}

/// Create or upgrade the node for a main committee code.
///
/// Upgrades only move placeholder names to resolved ones; a resolved name is
/// never overwritten, so processing order cannot worsen the final name.
fn upsert_main(
    nodes: &mut BTreeMap<String, CommitteeNode>,
    code: &str,
    names: &CommitteeNames,
    defs_by_code: &BTreeMap<&str, &CommitteeDefinition>,
) {
    let definition = defs_by_code.get(code).copied();
    let resolved = resolve_name(code, names, definition);

    if let Some(existing) = nodes.get_mut(code) {
        if existing.placeholder && !resolved.placeholder {
            existing.name = resolved.name;
            existing.placeholder = false;
        }
        return;
    }

    nodes.insert(
        code.to_string(),
        CommitteeNode {
            code: code.to_string(),
            name: resolved.name,
            committee_type: infer_type(code, definition),
            url: definition.and_then(|d| d.url.clone()),
            subcommittees: BTreeMap::new(),
            placeholder: resolved.placeholder,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::congress::types::{MemberStub, SubcommitteeDefinition};

    fn definition(code: &str, name: &str, subs: &[(&str, &str)]) -> CommitteeDefinition {
        CommitteeDefinition {
            thomas_id: Some(code.to_string()),
            name: Some(name.to_string()),
            committee_type: None,
            url: Some(format!("https://{}.example.gov", code.to_lowercase())),
            subcommittees: subs
                .iter()
                .map(|(suffix, sub_name)| SubcommitteeDefinition {
                    thomas_id: (*suffix).to_string(),
                    name: Some((*sub_name).to_string()),
                })
                .collect(),
        }
    }

    fn roster(codes: &[&str]) -> MembershipRoster {
        codes
            .iter()
            .map(|code| ((*code).to_string(), vec![MemberStub::default()]))
            .collect()
    }

    #[test]
    fn code_classification() {
        let cases = [
            ("HSAS", CommitteeCode::Main("HSAS"), "exactly four chars"),
            (
                "HSAS25",
                CommitteeCode::Sub {
                    parent: "HSAS",
                    suffix: "25",
                },
                "digit suffix",
            ),
            ("HSAG", CommitteeCode::Main("HSAG"), "another main"),
            ("SSJU", CommitteeCode::Main("SSJU"), "senate main"),
            // Non-digit suffixes stay main codes by convention.
            ("HSASAB", CommitteeCode::Main("HSASAB"), "alpha suffix"),
            ("HSAS2B", CommitteeCode::Main("HSAS2B"), "mixed suffix"),
            ("HS", CommitteeCode::Main("HS"), "short code"),
        ];

        for (code, expected, desc) in cases {
            assert_eq!(CommitteeCode::parse(code), expected, "case '{desc}'");
        }
    }

    #[test]
    fn authoritative_table_outranks_definitions() {
        let names: CommitteeNames =
            [("HSAS".to_string(), "Armed Services Committee".to_string())].into();
        let defs = vec![definition("HSAS", "House Committee on Armed Services", &[])];

        let map = CommitteeMap::build(&defs, &roster(&["HSAS"]), &names);
        assert_eq!(map.get("HSAS").map(|n| n.name.as_str()), Some("Armed Services Committee"));
    }

    #[test]
    fn definitions_fill_in_when_table_is_silent() {
        let defs = vec![definition("HSAG", "House Committee on Agriculture", &[])];

        let map = CommitteeMap::build(&defs, &roster(&["HSAG"]), &CommitteeNames::new());
        let node = map.get("HSAG").expect("node");
        assert_eq!(node.name, "House Committee on Agriculture");
        assert!(!node.is_placeholder());
    }

    #[test]
    fn unknown_codes_get_placeholders() {
        let map = CommitteeMap::build(&[], &roster(&["JXYZ"]), &CommitteeNames::new());
        let node = map.get("JXYZ").expect("node");
        assert_eq!(node.name, "Committee JXYZ");
        assert!(node.is_placeholder());
    }

    #[test]
    fn type_inference_table() {
        let cases = [
            ("HSAS", CommitteeType::House),
            ("SSJU", CommitteeType::Senate),
            ("JSEC", CommitteeType::Joint),
        ];
        for (code, expected) in cases {
            let map = CommitteeMap::build(&[], &roster(&[code]), &CommitteeNames::new());
            assert_eq!(map.get(code).map(|n| n.committee_type), Some(expected), "code {code}");
        }
    }

    #[test]
    fn declared_type_outranks_code_inference() {
        let mut def = definition("HJPR", "Printing", &[]);
        def.committee_type = Some("joint".to_string());

        let map = CommitteeMap::build(&[def], &roster(&["HJPR"]), &CommitteeNames::new());
        assert_eq!(map.get("HJPR").map(|n| n.committee_type), Some(CommitteeType::Joint));
    }

    #[test]
    fn subcommittee_names_come_from_the_parent_definition() {
        let defs = vec![definition(
            "HSAS",
            "House Committee on Armed Services",
            &[("25", "Tactical Air and Land Forces")],
        )];

        let map = CommitteeMap::build(&defs, &roster(&["HSAS", "HSAS25"]), &CommitteeNames::new());
        let node = map.get("HSAS").expect("node");
        assert_eq!(
            node.subcommittee_full_name("25").as_deref(),
            Some("House Committee on Armed Services - Tactical Air and Land Forces")
        );
    }

    #[test]
    fn undefined_subcommittee_gets_suffix_placeholder() {
        let defs = vec![definition("HSAS", "House Committee on Armed Services", &[])];

        let map = CommitteeMap::build(&defs, &roster(&["HSAS29"]), &CommitteeNames::new());
        let node = map.get("HSAS").expect("parent created for orphan sub key");
        assert_eq!(
            node.subcommittee_full_name("29").as_deref(),
            Some("House Committee on Armed Services - Subcommittee 29")
        );
    }

    #[test]
    fn subcommittee_with_unknown_parent_yields_placeholder_parent() {
        let map = CommitteeMap::build(&[], &roster(&["HQQQ07"]), &CommitteeNames::new());
        let node = map.get("HQQQ").expect("placeholder parent");
        assert!(node.is_placeholder());
        assert_eq!(
            node.subcommittee_full_name("07").as_deref(),
            Some("Committee HQQQ - Subcommittee 07")
        );
    }

    #[test]
    fn resolved_names_are_never_downgraded() {
        // The sub key sorts before the main key, so the parent node is first
        // created while resolving "HSAS25"; the authoritative name must hold
        // either way and full names reflect the final parent name.
        let names: CommitteeNames =
            [("HSAS".to_string(), "Armed Services Committee".to_string())].into();

        let map = CommitteeMap::build(&[], &roster(&["HSAS25", "HSAS"]), &names);
        let node = map.get("HSAS").expect("node");
        assert_eq!(node.name, "Armed Services Committee");
        assert!(!node.is_placeholder());
        assert_eq!(
            node.subcommittee_full_name("25").as_deref(),
            Some("Armed Services Committee - Subcommittee 25")
        );
    }

    #[test]
    fn summaries_sort_by_name() {
        let names: CommitteeNames = [
            ("SSGA".to_string(), "Homeland Security".to_string()),
            ("HSAG".to_string(), "Agriculture".to_string()),
            ("HSWM".to_string(), "Ways and Means".to_string()),
        ]
        .into();

        let map = CommitteeMap::build(&[], &roster(&["SSGA", "HSWM", "HSAG"]), &names);
        let summaries = map.summaries();
        let listed: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(listed, vec!["Agriculture", "Homeland Security", "Ways and Means"]);
    }
}
