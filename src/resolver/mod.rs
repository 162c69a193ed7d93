//! 組織名の解決
//!
//! 利用者が入力した組織名（大文字小文字は任意）から、実際のフォルダ名を決める。
//! 1. ローカルミラーに大文字小文字を無視して一致するフォルダがあればそれ
//! 2. 表記ゆれインデックスを使う場合は、その最初の表記
//! 3. どれも無ければ `None`（呼び出し側は入力をそのまま使う）

pub mod case_index;

pub use case_index::{CaseIndex, CaseVariants};

use crate::mirror::LocalMirror;
use crate::remote::{list_folders, RemoteDirectory, SourceLocation};
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;

pub struct NameResolver {
    mirror: Arc<LocalMirror>,
    remote: Arc<dyn RemoteDirectory>,
    /// 最新年度 → 過去年度の順
    locations: Vec<SourceLocation>,
    case_index: Arc<CaseIndex>,
}

impl NameResolver {
    pub fn new(
        mirror: Arc<LocalMirror>,
        remote: Arc<dyn RemoteDirectory>,
        locations: Vec<SourceLocation>,
        case_index: Arc<CaseIndex>,
    ) -> Self {
        Self {
            mirror,
            remote,
            locations,
            case_index,
        }
    }

    pub fn mirror(&self) -> &LocalMirror {
        &self.mirror
    }

    pub fn locations(&self) -> &[SourceLocation] {
        &self.locations
    }

    /// 実際のフォルダ名を返す。見つからなければ `None`
    pub async fn resolve(&self, input: &str, use_case_index: bool) -> Option<String> {
        if let Some(local) = self.mirror.find_folder(input) {
            return Some(local);
        }
        if !use_case_index {
            return None;
        }

        let resolved = self.case_variants(input).await.into_iter().next();
        debug!(input, resolved = ?resolved, "表記ゆれインデックスで解決");
        resolved
    }

    /// インデックスに記録された表記（出現順）。未構築なら構築する
    pub async fn case_variants(&self, input: &str) -> Vec<String> {
        let index = self
            .case_index
            .get_or_populate(|| self.populate_case_index())
            .await;
        index.get(&input.to_lowercase()).cloned().unwrap_or_default()
    }

    /// 全保存場所の直下フォルダ名を集めてインデックスを作る
    async fn populate_case_index(&self) -> CaseVariants {
        let listings = join_all(
            self.locations
                .iter()
                .map(|location| list_folders(self.remote.as_ref(), location)),
        )
        .await;

        let index = CaseIndex::build(listings.into_iter().flatten());
        debug!(keys = index.len(), "表記ゆれインデックスを構築");
        index
    }
}
