mod github;
mod location;

pub use github::{GitHubClient, GITHUB_API_BASE};
pub use location::SourceLocation;

use crate::error::Result;
use async_trait::async_trait;
use gsoc_guide_common::DirectoryEntry;
use tracing::{debug, warn};

/// リモートのディレクトリ一覧を返すもの
///
/// 存在しないパスは `GuideError::RemoteNotFound`、それ以外の失敗は各種エラーで返す。
/// 呼び出し側は [`list_or_empty`] で空結果に落とす。
#[async_trait]
pub trait RemoteDirectory: Send + Sync {
    async fn list(&self, location: &SourceLocation, folder: Option<&str>) -> Result<Vec<DirectoryEntry>>;
}

/// 失敗を空の一覧として扱う
///
/// 404相当はdebug、それ以外はwarnでログに残す。
pub async fn list_or_empty(
    remote: &dyn RemoteDirectory,
    location: &SourceLocation,
    folder: Option<&str>,
) -> Vec<DirectoryEntry> {
    match remote.list(location, folder).await {
        Ok(entries) => entries,
        Err(e) if e.is_not_found() => {
            debug!(location = %location, folder = folder.unwrap_or(""), "リモートに存在しません");
            Vec::new()
        }
        Err(e) => {
            warn!(location = %location, folder = folder.unwrap_or(""), error = %e, "リモート一覧の取得に失敗");
            Vec::new()
        }
    }
}

/// 保存場所直下のディレクトリ名（= 組織フォルダ名）
pub async fn list_folders(remote: &dyn RemoteDirectory, location: &SourceLocation) -> Vec<String> {
    list_or_empty(remote, location, None)
        .await
        .into_iter()
        .filter(|e| e.is_dir())
        .map(|e| e.name)
        .collect()
}
