//! 組織カタログの検索・絞り込み・並び替え
//!
//! 一覧画面のフィルタ条件を純粋関数として扱う。
//! - テキスト検索: 名前または説明の部分一致（大文字小文字を区別しない）
//! - 技術・トピック: 選択したもののどれかを含めば残す
//! - 提案書あり: `has_proposals` の組織のみ
//! - 並び順: 提案書ありの組織を先頭に、各グループ内を名前またはプロジェクト数で

use crate::error::{Error, Result};
use crate::types::{Organization, ProposalSummary};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

/// 並び替えキー
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    /// プロジェクト数の降順
    Projects,
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortBy::Name),
            "projects" | "projectcount" | "project_count" => Ok(SortBy::Projects),
            _ => Err(Error::UnknownSort(s.to_string())),
        }
    }
}

/// 絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationQuery {
    pub query: Option<String>,
    pub technologies: Vec<String>,
    pub topics: Vec<String>,
    pub has_proposals_only: bool,
    pub sort: SortBy,
}

impl OrganizationQuery {
    /// 1組織が条件を満たすか
    pub fn matches(&self, org: &Organization) -> bool {
        if let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            if !org.name.to_lowercase().contains(&query)
                && !org.description.to_lowercase().contains(&query)
            {
                return false;
            }
        }

        if !self.technologies.is_empty()
            && !self.technologies.iter().any(|t| org.technologies.contains(t))
        {
            return false;
        }

        if !self.topics.is_empty() && !self.topics.iter().any(|t| org.topics.contains(t)) {
            return false;
        }

        !self.has_proposals_only || org.has_proposals
    }

    /// 絞り込みと並び替えを適用
    pub fn apply(&self, orgs: &[Organization]) -> Vec<Organization> {
        let filtered: Vec<Organization> = orgs.iter().filter(|o| self.matches(o)).cloned().collect();
        sort_organizations(filtered, self.sort)
    }
}

/// 提案書ありの組織を先頭に並べ、各グループ内を `sort` で並べる
pub fn sort_organizations(orgs: Vec<Organization>, sort: SortBy) -> Vec<Organization> {
    let (mut with, mut without): (Vec<_>, Vec<_>) = orgs.into_iter().partition(|o| o.has_proposals);

    for group in [&mut with, &mut without] {
        match sort {
            SortBy::Name => group.sort_by_key(|o| o.name.to_lowercase()),
            SortBy::Projects => group.sort_by(|a, b| b.num_projects.cmp(&a.num_projects)),
        }
    }

    with.extend(without);
    with
}

/// メタデータに提案書有無のフラグを付与（キーは小文字の組織名）
pub fn with_proposal_flags(
    orgs: Vec<Organization>,
    summaries: &BTreeMap<String, bool>,
) -> Vec<Organization> {
    orgs.into_iter()
        .map(|mut org| {
            org.has_proposals = summaries
                .get(&org.name.to_lowercase())
                .copied()
                .unwrap_or(false);
            org
        })
        .collect()
}

/// 集計値から有無だけのマップを作る
pub fn flags_from_summaries(summaries: &BTreeMap<String, ProposalSummary>) -> BTreeMap<String, bool> {
    summaries
        .iter()
        .map(|(name, s)| (name.clone(), s.has_proposals))
        .collect()
}

/// 絞り込み候補（技術・トピック）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub technologies: Vec<String>,
    pub topics: Vec<String>,
}

/// 全組織から技術とトピックの候補を出現順に重複なく集める
pub fn facets(orgs: &[Organization]) -> Facets {
    let mut seen_tech = HashSet::new();
    let mut seen_topic = HashSet::new();
    let mut facets = Facets::default();

    for org in orgs {
        for tech in &org.technologies {
            if seen_tech.insert(tech.as_str()) {
                facets.technologies.push(tech.clone());
            }
        }
        for topic in &org.topics {
            if seen_topic.insert(topic.as_str()) {
                facets.topics.push(topic.clone());
            }
        }
    }

    facets
}

/// 組織名で1件探す（大文字小文字を区別しない）
pub fn find_by_name<'a>(orgs: &'a [Organization], name: &str) -> Option<&'a Organization> {
    let name = name.to_lowercase();
    orgs.iter().find(|o| o.name.to_lowercase() == name)
}

/// メタデータAPIのレスポンス本体 `{"organizations": [...]}` をパース
///
/// `organizations` 配列が無い場合は `InvalidPayload`。
pub fn parse_organizations(json: &str) -> Result<Vec<Organization>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value.get("organizations") {
        Some(list @ serde_json::Value::Array(_)) => Ok(serde_json::from_value(list.clone())?),
        _ => Err(Error::InvalidPayload("organizations 配列がありません".to_string())),
    }
}
