//! GSoC Guide
//!
//! GSoC参加組織のディレクトリと、過去の採択提案書（PDF）のアーカイブ配信。
//! 提案書はGitHubリポジトリの年度別ブランチから集約し、取れなければローカルミラーを使う。

pub mod aggregator;
pub mod app;
pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod listing;
pub mod logging;
pub mod metadata;
pub mod mirror;
pub mod remote;
pub mod resolver;
pub mod server;

pub use aggregator::ProposalAggregator;
pub use app::Guide;
pub use error::{GuideError, Result};
pub use listing::OrganizationListing;
pub use resolver::{CaseIndex, NameResolver};
