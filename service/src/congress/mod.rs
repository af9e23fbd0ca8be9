//! Congressional directory reconciliation pipeline.
//!
//! Builds a normalized, query-ready directory of legislators and their
//! committee assignments from three independently-maintained reference
//! datasets that disagree on naming, identifiers, and completeness.
//!
//! # Architecture
//!
//! Data flows one way through small, separately testable stages:
//!
//! - [`loader::ReferenceData`] - tolerant one-shot load of the raw datasets
//! - [`term::CurrentTerm`] - picks and normalizes each legislator's current term
//! - [`ident`] - synthetic `congress_id` and image-key derivation
//! - [`committees::CommitteeMap`] - reconstructs the two-level committee
//!   hierarchy from the roster's code convention
//! - [`assignments`] - per-legislator committee assignments, deterministically
//!   sorted
//! - [`directory::CongressDirectory`] - the assembled immutable snapshot and
//!   its lookup surface
//!
//! The term resolver and hierarchy builder are independent; the assignment
//! resolver needs both. Everything is rebuilt from scratch on each load, and
//! a running service swaps complete snapshots via
//! [`directory::DirectoryHandle`] so readers never see a partial rebuild.

pub mod assignments;
pub mod committees;
pub mod directory;
pub mod ident;
pub mod loader;
pub mod states;
pub mod term;
pub mod types;

pub use assignments::{assignments_for, CommitteeAssignment};
pub use committees::{CommitteeCode, CommitteeMap, CommitteeNode, CommitteeSummary, CommitteeType};
pub use directory::{BuildStats, CongressDirectory, DirectoryHandle, DistrictLink, Member};
pub use ident::{image_key, synthesize_id};
pub use loader::ReferenceData;
pub use term::{normalize_district, Chamber, CurrentTerm, ResolveError, AT_LARGE};
