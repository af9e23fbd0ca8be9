//! Committee assignment resolution and ordering.
//!
//! Assignments are collected by scanning every roster entry for the target
//! legislator. Multiple entries for the same code under different titles are
//! kept as distinct assignments, matching the roster's cardinality.
//!
//! The ordering decides which committee shows up first in any UI consuming
//! the directory, so it is pinned down exactly: leadership roles before
//! everything else, then numeric rank ascending with unranked entries last.

use serde::Serialize;
use utoipa::ToSchema;

use super::committees::{CommitteeCode, CommitteeMap};
use super::types::{MembershipRoster, Rank};

/// Role recorded when the roster entry carries no title.
pub const DEFAULT_ROLE: &str = "Member";

/// Roles that sort ahead of plain membership.
const LEADERSHIP_ROLES: &[&str] = &["Chairman", "Ranking Member", "Vice Chairman"];

/// A legislator's seat on a committee or subcommittee.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CommitteeAssignment {
    /// Committee or subcommittee code as it appears in the roster.
    pub committee_id: String,
    /// Resolved display name; subcommittees use "{parent} - {short name}".
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub role: String,
    /// Raw roster rank, preserved as given (a string rank stays a string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    pub is_subcommittee: bool,
    /// Parent committee name, subcommittees only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_committee: Option<String>,
}

/// All committee assignments for one legislator, deterministically sorted.
#[must_use]
pub fn assignments_for(
    bioguide: &str,
    membership: &MembershipRoster,
    committees: &CommitteeMap,
) -> Vec<CommitteeAssignment> {
    let mut assignments = Vec::new();

    for (code, stubs) in membership {
        for stub in stubs {
            if stub.bioguide.as_deref() != Some(bioguide) {
                continue;
            }
            let role = stub
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_ROLE.to_string());

            let assignment = match CommitteeCode::parse(code) {
                CommitteeCode::Main(main) => {
                    let node = committees.get(main);
                    CommitteeAssignment {
                        committee_id: code.clone(),
                        name: node.map_or_else(|| format!("Committee {main}"), |n| n.name.clone()),
                        url: node.and_then(|n| n.url.clone()),
                        role,
                        rank: stub.rank.clone(),
                        is_subcommittee: false,
                        parent_committee: None,
                    }
                }
                CommitteeCode::Sub { parent, suffix } => {
                    let node = committees.get(parent);
                    let name = node
                        .and_then(|n| n.subcommittee_full_name(suffix))
                        .unwrap_or_else(|| format!("Committee {parent} - Subcommittee {suffix}"));
                    CommitteeAssignment {
                        committee_id: code.clone(),
                        name,
                        // Subcommittees have no URL of their own in the data.
                        url: node.and_then(|n| n.url.clone()),
                        role,
                        rank: stub.rank.clone(),
                        is_subcommittee: true,
                        parent_committee: node.map(|n| n.name.clone()),
                    }
                }
            };
            assignments.push(assignment);
        }
    }

    sort_assignments(&mut assignments);
    assignments
}

/// Stable two-key ordering: leadership priority, then numeric rank.
fn sort_assignments(assignments: &mut [CommitteeAssignment]) {
    assignments.sort_by_key(|a| {
        (
            leadership_priority(&a.role),
            Rank::sort_key(a.rank.as_ref()),
        )
    });
}

fn leadership_priority(role: &str) -> u8 {
    u8::from(!LEADERSHIP_ROLES.contains(&role))
}
