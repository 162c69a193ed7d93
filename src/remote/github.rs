//! GitHub Contents API クライアント
//!
//! `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}` を叩いて
//! ディレクトリ一覧を `DirectoryEntry` に変換する。
//! トークンがあれば `Authorization: token ...` を付け、無ければ匿名で呼ぶ。

use super::{RemoteDirectory, SourceLocation};
use crate::config::Config;
use crate::error::{GuideError, Result};
use crate::mirror::is_safe_segment;
use async_trait::async_trait;
use gsoc_guide_common::{DirectoryEntry, EntryKind};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

/// Contents API のレスポンス要素（必要なフィールドのみ）
#[derive(Debug, Clone, Deserialize)]
struct ContentItem {
    name: String,
    #[serde(rename = "type")]
    item_type: String,
    download_url: Option<String>,
    #[serde(default)]
    sha: String,
    #[serde(default)]
    size: u64,
}

impl ContentItem {
    /// symlink / submodule は対象外
    fn into_entry(self) -> Option<DirectoryEntry> {
        let kind = match self.item_type.as_str() {
            "dir" => EntryKind::Directory,
            "file" => EntryKind::File,
            _ => return None,
        };
        Some(DirectoryEntry {
            name: self.name,
            kind,
            download_url: self.download_url,
            size: self.size,
            content_hash: self.sha,
        })
    }
}

pub struct GitHubClient {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
}

impl GitHubClient {
    pub fn new(
        api_base: &str,
        owner: &str,
        repo: &str,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        headers.insert(USER_AGENT, HeaderValue::from_static("gsoc-guide"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("token {}", token))
                .map_err(|_| GuideError::Config("GitHubトークンに使用できない文字が含まれています".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config.github_token();
        Self::new(
            GITHUB_API_BASE,
            &config.repo_owner,
            &config.repo_name,
            token.as_deref(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// パスの各セグメントはパーセントエンコードされる（組織名に空白等を含むため）
    pub fn contents_url(&self, location: &SourceLocation, folder: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| GuideError::Config(format!("APIベースURLが不正: {}", e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| GuideError::Config(format!("APIベースURLが不正: {}", self.api_base)))?;
            segments.pop_if_empty();
            segments.extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"]);
            segments.extend(location.path.split('/').filter(|s| !s.is_empty()));
            if let Some(folder) = folder {
                segments.push(folder);
            }
        }
        url.query_pairs_mut().append_pair("ref", &location.branch);
        Ok(url)
    }
}

#[async_trait]
impl RemoteDirectory for GitHubClient {
    async fn list(&self, location: &SourceLocation, folder: Option<&str>) -> Result<Vec<DirectoryEntry>> {
        // 組織フォルダは保存場所直下の1階層のみ
        if let Some(name) = folder.filter(|f| !is_safe_segment(f)) {
            return Err(GuideError::RemoteNotFound(format!("{}:{}", location.branch, name)));
        }
        let url = self.contents_url(location, folder)?;
        debug!(%url, "GitHub APIから一覧を取得");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(GuideError::RemoteNotFound(format!(
                "{}:{}",
                location.branch,
                location.folder_path(folder)
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GuideError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        // パスがファイルを指す場合は配列ではなく単一オブジェクトが返る（ディレクトリではない）
        let payload: serde_json::Value = response.json().await?;
        if !payload.is_array() {
            debug!(location = %location, folder = folder.unwrap_or(""), "ディレクトリではありません");
            return Err(GuideError::RemoteNotFound(format!(
                "{}:{}",
                location.branch,
                location.folder_path(folder)
            )));
        }
        let items: Vec<ContentItem> = serde_json::from_value(payload)?;

        Ok(items.into_iter().filter_map(ContentItem::into_entry).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitHubClient {
        GitHubClient::new(GITHUB_API_BASE, "owner", "repo", None, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_contents_url_root() {
        let loc = SourceLocation::new(2025, "main", "");
        let url = client().contents_url(&loc, None).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/owner/repo/contents?ref=main");
    }

    #[test]
    fn test_contents_url_encodes_folder() {
        let loc = SourceLocation::new(2024, "2024", "archive");
        let url = client().contents_url(&loc, Some("My Org")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/owner/repo/contents/archive/My%20Org?ref=2024"
        );
    }

    #[test]
    fn test_content_item_mapping() {
        let json = r#"[
            {"name": "a.pdf", "path": "Org/a.pdf", "type": "file", "download_url": "https://raw/a.pdf", "sha": "s1", "size": 10},
            {"name": "sub", "path": "Org/sub", "type": "dir", "download_url": null, "sha": "s2", "size": 0},
            {"name": "link", "path": "Org/link", "type": "symlink", "download_url": null, "sha": "s3", "size": 0}
        ]"#;
        let items: Vec<ContentItem> = serde_json::from_str(json).unwrap();
        let entries: Vec<DirectoryEntry> = items.into_iter().filter_map(ContentItem::into_entry).collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].download_url.as_deref(), Some("https://raw/a.pdf"));
        assert_eq!(entries[0].content_hash, "s1");
        assert_eq!(entries[1].kind, EntryKind::Directory);
    }

    #[test]
    fn test_rejects_invalid_token_header() {
        let result = GitHubClient::new(
            GITHUB_API_BASE,
            "o",
            "r",
            Some("bad\ntoken"),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(GuideError::Config(_))));
    }
}
