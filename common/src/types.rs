//! 組織・提案書の型定義
//!
//! サービスとCLIで共有される型:
//! - Organization / Project: 組織メタデータAPIのレスポンス
//! - DirectoryEntry: リモートのディレクトリ一覧の1要素
//! - ProposalRecord: 集約済みの提案書（年度タグ付き）
//! - ProposalSummary: 組織ごとの提案書有無と件数

use serde::{Deserialize, Serialize};

/// 提案書として扱う拡張子（大文字小文字を区別しない）
pub const PROPOSAL_EXTENSION: &str = ".pdf";

/// ファイル名が提案書（PDF）かどうか
pub fn is_proposal_file(name: &str) -> bool {
    name.to_lowercase().ends_with(PROPOSAL_EXTENSION)
}

/// GSoC参加組織
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub name: String,
    pub image_url: String,
    pub image_background_color: String,
    pub description: String,
    pub url: String,
    pub num_projects: u32,
    pub category: String,
    pub projects_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub irc_channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_url: Option<String>,

    pub topics: Vec<String>,
    pub technologies: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,

    /// 提案書アーカイブに1件以上あるか（メタデータAPIには無く、後から付与する）
    #[serde(rename = "hasProposals")]
    pub has_proposals: bool,
}

/// 採択プロジェクト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub short_description: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
}

/// ディレクトリエントリの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// リモートのディレクトリ一覧の1要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
    pub download_url: Option<String>,
    pub size: u64,
    pub content_hash: String,
}

impl DirectoryEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// ファイルかつ拡張子が .pdf
    pub fn is_proposal(&self) -> bool {
        self.kind == EntryKind::File && is_proposal_file(&self.name)
    }
}

/// 提案書（PDF）1件
///
/// `file_name` が組織内の重複排除キー。リモート由来なら `path` はダウンロードURL、
/// ローカルミラー由来なら配信エンドポイントのURL。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    #[serde(rename = "fileName")]
    pub file_name: String,

    pub path: String,

    #[serde(rename = "size", default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,

    #[serde(rename = "sha", default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,

    #[serde(rename = "year")]
    pub source_year: u16,
}

/// 組織ごとの提案書集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    pub has_proposals: bool,
    pub proposal_count: usize,
}

impl ProposalSummary {
    pub fn from_count(proposal_count: usize) -> Self {
        Self {
            has_proposals: proposal_count > 0,
            proposal_count,
        }
    }
}
