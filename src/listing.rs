//! 組織一覧サービス
//!
//! 全保存場所とローカルミラーの組織フォルダ名を小文字で集め、
//! 各組織について提案書の集約を行い、有無と件数を記録する。

use crate::aggregator::ProposalAggregator;
use crate::remote::{list_folders, RemoteDirectory};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use gsoc_guide_common::catalog::flags_from_summaries;
use gsoc_guide_common::ProposalSummary;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::info;

/// 集計結果全体（`/api/proposals/summary` のレスポンス）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalsOverview {
    pub generated_at: String,
    pub total_organizations: usize,
    pub organizations_with_proposals: usize,
    pub total_proposals: usize,
    pub organizations: BTreeMap<String, ProposalSummary>,
}

impl ProposalsOverview {
    pub fn from_summaries(organizations: BTreeMap<String, ProposalSummary>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_organizations: organizations.len(),
            organizations_with_proposals: organizations.values().filter(|s| s.has_proposals).count(),
            total_proposals: organizations.values().map(|s| s.proposal_count).sum(),
            organizations,
        }
    }
}

pub struct OrganizationListing {
    remote: Arc<dyn RemoteDirectory>,
    aggregator: Arc<ProposalAggregator>,
    concurrency: usize,
}

impl OrganizationListing {
    pub fn new(
        remote: Arc<dyn RemoteDirectory>,
        aggregator: Arc<ProposalAggregator>,
        concurrency: usize,
    ) -> Self {
        Self {
            remote,
            aggregator,
            concurrency: concurrency.max(1),
        }
    }

    /// 全保存場所 + ローカルミラーの組織名（小文字、重複なし）
    pub async fn organization_names(&self) -> BTreeSet<String> {
        let resolver = self.aggregator.resolver();
        let remote = join_all(
            resolver
                .locations()
                .iter()
                .map(|location| list_folders(self.remote.as_ref(), location)),
        )
        .await;

        remote
            .into_iter()
            .flatten()
            .chain(resolver.mirror().organizations())
            .map(|name| name.to_lowercase())
            .collect()
    }

    /// 組織名（小文字） → 提案書の有無と件数
    pub async fn summaries(&self) -> BTreeMap<String, ProposalSummary> {
        let names = self.organization_names().await;
        info!(count = names.len(), "組織の提案書を集計");

        // 各組織は独立。完了順は問わず、キーごとに書き込む
        stream::iter(names)
            .map(|name| async move {
                let count = self.aggregator.list_proposals(&name).await.len();
                (name, ProposalSummary::from_count(count))
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await
    }

    /// 組織名（小文字） → 提案書が1件以上あるか
    pub async fn list_all_with_proposal_flag(&self) -> BTreeMap<String, bool> {
        flags_from_summaries(&self.summaries().await)
    }

    pub async fn overview(&self) -> ProposalsOverview {
        ProposalsOverview::from_summaries(self.summaries().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_totals() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), ProposalSummary::from_count(3));
        map.insert("b".to_string(), ProposalSummary::from_count(0));
        map.insert("c".to_string(), ProposalSummary::from_count(2));

        let overview = ProposalsOverview::from_summaries(map);
        assert_eq!(overview.total_organizations, 3);
        assert_eq!(overview.organizations_with_proposals, 2);
        assert_eq!(overview.total_proposals, 5);
        assert!(!overview.generated_at.is_empty());
    }
}
