//! 提案書の集約
//!
//! 1組織について、フォルダ名の候補 × 保存場所（最新年度 + 過去年度）の
//! 全組み合わせをリモートに問い合わせ、PDFを年度タグ付きで1つの一覧にまとめる。
//!
//! - 候補の優先順: 小文字の入力 → 入力そのまま → インデックスの表記 → ローカルの実フォルダ名
//! - ファイル名で重複排除し、優先順で先に出たものを残す（内容ハッシュは見ない）
//! - 問い合わせは並行に出すが、結果は優先順に並べてから重複排除する
//! - リモートが全滅ならローカルミラーを最新年度として返す
//! - 組織フォルダ直下のPDFのみ対象。入れ子のパスやファイルを指す名前は空扱い

use crate::mirror::is_safe_segment;
use crate::remote::{list_or_empty, RemoteDirectory, SourceLocation};
use crate::resolver::NameResolver;
use futures::future::join_all;
use gsoc_guide_common::{DirectoryEntry, ProposalRecord};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ProposalAggregator {
    remote: Arc<dyn RemoteDirectory>,
    resolver: Arc<NameResolver>,
}

impl ProposalAggregator {
    pub fn new(remote: Arc<dyn RemoteDirectory>, resolver: Arc<NameResolver>) -> Self {
        Self { remote, resolver }
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// 問い合わせるフォルダ名の候補（優先順、重複なし）
    pub async fn candidate_folders(&self, org_name: &str) -> Vec<String> {
        let lower = org_name.to_lowercase();
        let mut candidates = Vec::new();

        candidates.push(lower.clone());
        candidates.push(org_name.to_string());
        candidates.extend(self.resolver.case_variants(&lower).await);
        candidates.extend(self.resolver.mirror().find_folder(&lower));

        // 1階層のフォルダ名として使えないもの（区切り文字入り等）は問い合わせない
        candidates.retain(|c| is_safe_segment(c));
        dedup_in_order(candidates)
    }

    /// 組織の提案書一覧
    ///
    /// 失敗は全て空扱い。リモートにもローカルにも無ければ空の一覧。
    pub async fn list_proposals(&self, org_name: &str) -> Vec<ProposalRecord> {
        let candidates = self.candidate_folders(org_name).await;
        let locations = self.resolver.locations();

        // 候補 × 保存場所の順序を保ったまま並行に問い合わせる
        let queries = candidates.iter().flat_map(|folder| {
            locations
                .iter()
                .map(move |location| self.query(location, folder))
        });
        let per_location = join_all(queries).await;

        let remote = dedup_by_file_name(per_location.into_iter().flatten());
        if !remote.is_empty() {
            info!(org = org_name, count = remote.len(), "リモートの提案書");
            return remote;
        }

        let current_year = locations.first().map(|l| l.year).unwrap_or_default();
        let local = self
            .resolver
            .mirror()
            .proposals(&org_name.to_lowercase(), current_year);
        info!(org = org_name, count = local.len(), "リモートに無いためローカルミラーを使用");
        local
    }

    /// ファイル名が一致する提案書1件
    pub async fn find_proposal(&self, org_name: &str, file_name: &str) -> Option<ProposalRecord> {
        self.list_proposals(org_name)
            .await
            .into_iter()
            .find(|p| p.file_name == file_name)
    }

    async fn query(&self, location: &SourceLocation, folder: &str) -> Vec<ProposalRecord> {
        let entries = list_or_empty(self.remote.as_ref(), location, Some(folder)).await;
        let records: Vec<ProposalRecord> = entries
            .into_iter()
            .filter(DirectoryEntry::is_proposal)
            .map(|entry| to_record(entry, location.year))
            .collect();

        if !records.is_empty() {
            debug!(location = %location, folder, count = records.len(), "PDFを検出");
        }
        records
    }
}

fn to_record(entry: DirectoryEntry, year: u16) -> ProposalRecord {
    ProposalRecord {
        file_name: entry.name,
        path: entry.download_url.unwrap_or_default(),
        size_bytes: Some(entry.size),
        content_hash: Some(entry.content_hash).filter(|h| !h.is_empty()),
        source_year: year,
    }
}

fn dedup_in_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// 先に出たファイル名を残す
fn dedup_by_file_name(records: impl IntoIterator<Item = ProposalRecord>) -> Vec<ProposalRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.file_name.clone()))
        .collect()
}
