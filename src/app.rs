//! サービス一式の組み立て
//!
//! 設定からリモートクライアント・ローカルミラー・解決器・集約・一覧を作り、
//! CLIとHTTPサーバの両方から使う。

use crate::aggregator::ProposalAggregator;
use crate::config::Config;
use crate::directory::Directory;
use crate::error::Result;
use crate::listing::OrganizationListing;
use crate::metadata::MetadataClient;
use crate::mirror::LocalMirror;
use crate::remote::{GitHubClient, RemoteDirectory};
use crate::resolver::{CaseIndex, NameResolver};
use std::sync::Arc;
use tracing::info;

pub struct Guide {
    pub config: Config,
    pub mirror: Arc<LocalMirror>,
    pub case_index: Arc<CaseIndex>,
    pub resolver: Arc<NameResolver>,
    pub aggregator: Arc<ProposalAggregator>,
    pub listing: Arc<OrganizationListing>,
    pub directory: Arc<Directory>,
}

impl Guide {
    /// GitHub API とメタデータAPIを使う本番構成
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let remote: Arc<dyn RemoteDirectory> = Arc::new(GitHubClient::from_config(&config)?);
        let metadata = MetadataClient::from_config(&config)?;

        info!(
            repo = %format!("{}/{}", config.repo_owner, config.repo_name),
            authenticated = config.github_token().is_some(),
            mirror = %config.mirror_path().display(),
            "サービスを初期化"
        );
        Ok(Self::with_clients(config, remote, metadata))
    }

    /// クライアントを差し替えて組み立てる（テスト用のリモート等）
    pub fn with_clients(
        config: Config,
        remote: Arc<dyn RemoteDirectory>,
        metadata: MetadataClient,
    ) -> Self {
        let mirror = Arc::new(LocalMirror::new(config.mirror_path()));
        let case_index = Arc::new(CaseIndex::new());
        let resolver = Arc::new(NameResolver::new(
            Arc::clone(&mirror),
            Arc::clone(&remote),
            config.locations(),
            Arc::clone(&case_index),
        ));
        let aggregator = Arc::new(ProposalAggregator::new(Arc::clone(&remote), Arc::clone(&resolver)));
        let listing = Arc::new(OrganizationListing::new(
            Arc::clone(&remote),
            Arc::clone(&aggregator),
            config.listing_concurrency,
        ));
        let directory = Arc::new(Directory::new(
            Arc::new(metadata),
            Arc::clone(&listing),
            Arc::clone(&aggregator),
        ));

        Self {
            config,
            mirror,
            case_index,
            resolver,
            aggregator,
            listing,
            directory,
        }
    }
}
