//! 組織ディレクトリ
//!
//! メタデータAPIの組織一覧に提案書有無のフラグを付け、検索条件を適用する。

use crate::aggregator::ProposalAggregator;
use crate::error::{GuideError, Result};
use crate::listing::OrganizationListing;
use crate::metadata::MetadataClient;
use gsoc_guide_common::catalog::{self, with_proposal_flags};
use gsoc_guide_common::{Facets, Organization, OrganizationQuery, ProposalRecord};
use serde::Serialize;
use std::sync::Arc;

/// 組織メタデータ + 提案書一覧
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationDetail {
    #[serde(flatten)]
    pub organization: Organization,
    pub proposals: Vec<ProposalRecord>,
}

pub struct Directory {
    metadata: Arc<MetadataClient>,
    listing: Arc<OrganizationListing>,
    aggregator: Arc<ProposalAggregator>,
}

impl Directory {
    pub fn new(
        metadata: Arc<MetadataClient>,
        listing: Arc<OrganizationListing>,
        aggregator: Arc<ProposalAggregator>,
    ) -> Self {
        Self {
            metadata,
            listing,
            aggregator,
        }
    }

    /// フラグ付きの全組織（メタデータと集計は並行に取得）
    pub async fn flagged_organizations(&self) -> Result<Vec<Organization>> {
        let (orgs, flags) = tokio::join!(
            self.metadata.fetch_organizations(),
            self.listing.list_all_with_proposal_flag()
        );
        Ok(with_proposal_flags(orgs?, &flags))
    }

    pub async fn search(&self, query: &OrganizationQuery) -> Result<Vec<Organization>> {
        let orgs = self.flagged_organizations().await?;
        Ok(query.apply(&orgs))
    }

    pub async fn facets(&self) -> Result<Facets> {
        let orgs = self.metadata.fetch_organizations().await?;
        Ok(catalog::facets(&orgs))
    }

    /// 組織1件の詳細。メタデータに無ければ `OrganizationNotFound`
    pub async fn organization_detail(&self, name: &str) -> Result<OrganizationDetail> {
        let (organization, proposals) = tokio::join!(
            self.metadata.fetch_organization(name),
            self.aggregator.list_proposals(name)
        );
        let mut organization =
            organization?.ok_or_else(|| GuideError::OrganizationNotFound(name.to_string()))?;
        organization.has_proposals = !proposals.is_empty();

        Ok(OrganizationDetail {
            organization,
            proposals,
        })
    }
}
