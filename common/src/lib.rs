//! GSoC Guide Common Library
//!
//! サービス本体とCLIで共有される型とカタログ処理

pub mod types;
pub mod catalog;
pub mod error;

pub use types::{
    is_proposal_file, DirectoryEntry, EntryKind, Organization, Project, ProposalRecord,
    ProposalSummary, PROPOSAL_EXTENSION,
};
pub use catalog::{Facets, OrganizationQuery, SortBy};
pub use error::{Error, Result};
