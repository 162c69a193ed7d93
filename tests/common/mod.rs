//! テスト共通: ネットワークを使わないリモートとローカルミラーのフィクスチャ

#![allow(dead_code)]

use async_trait::async_trait;
use gsoc_guide::config::Config;
use gsoc_guide::error::{GuideError, Result};
use gsoc_guide::remote::{RemoteDirectory, SourceLocation};
use gsoc_guide_common::{DirectoryEntry, EntryKind};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// 1パス分の応答
#[derive(Clone)]
pub enum Reply {
    Entries(Vec<DirectoryEntry>),
    Status(u16),
}

/// (ブランチ, パス) → 応答。登録の無いパスは404
#[derive(Default)]
pub struct FakeRemote {
    replies: Mutex<HashMap<(String, String), Reply>>,
    delays: Mutex<HashMap<(String, String), Duration>>,
    fail_all: Option<u16>,
    calls: AtomicUsize,
    root_calls: AtomicUsize,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全パスで指定ステータスを返す
    pub fn failing(status: u16) -> Self {
        Self {
            fail_all: Some(status),
            ..Self::default()
        }
    }

    pub fn with_dir(self, branch: &str, path: &str, entries: Vec<DirectoryEntry>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert((branch.to_string(), path.to_string()), Reply::Entries(entries));
        self
    }

    pub fn with_status(self, branch: &str, path: &str, status: u16) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert((branch.to_string(), path.to_string()), Reply::Status(status));
        self
    }

    /// 指定パスの応答を遅らせる（到着順と優先順をずらす）
    pub fn with_delay(self, branch: &str, path: &str, millis: u64) -> Self {
        self.delays
            .lock()
            .unwrap()
            .insert((branch.to_string(), path.to_string()), Duration::from_millis(millis));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 保存場所ルート（組織フォルダ一覧）への問い合わせ回数
    pub fn root_calls(&self) -> usize {
        self.root_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteDirectory for FakeRemote {
    async fn list(&self, location: &SourceLocation, folder: Option<&str>) -> Result<Vec<DirectoryEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if folder.is_none() {
            self.root_calls.fetch_add(1, Ordering::SeqCst);
        }

        let path = location.folder_path(folder);
        let key = (location.branch.clone(), path.clone());
        let delay = self.delays.lock().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(status) = self.fail_all {
            return Err(GuideError::RemoteStatus {
                status,
                body: "fake failure".into(),
            });
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(&key)
            .cloned();
        match reply {
            Some(Reply::Entries(entries)) => Ok(entries),
            Some(Reply::Status(404)) | None => Err(GuideError::RemoteNotFound(path)),
            Some(Reply::Status(status)) => Err(GuideError::RemoteStatus {
                status,
                body: "fake failure".into(),
            }),
        }
    }
}

pub fn dir(name: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        kind: EntryKind::Directory,
        download_url: None,
        size: 0,
        content_hash: String::new(),
    }
}

pub fn file(name: &str, branch: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        kind: EntryKind::File,
        download_url: Some(format!("https://raw.example/{}/{}", branch, name)),
        size: 1024,
        content_hash: format!("sha-{}-{}", branch, name),
    }
}

/// ローカルミラーに組織フォルダとファイルを作る
pub fn write_mirror(base: &Path, org: &str, files: &[&str]) {
    let org_dir = base.join(org);
    std::fs::create_dir_all(&org_dir).unwrap();
    for f in files {
        std::fs::write(org_dir.join(f), b"%PDF-1.4 local").unwrap();
    }
}

/// 最新年度 main(2025) + 過去年度 2024 / 2023 の構成
pub fn test_config(mirror: &Path) -> Config {
    Config {
        current: SourceLocation::new(2025, "main", ""),
        archives: vec![
            SourceLocation::new(2024, "2024", ""),
            SourceLocation::new(2023, "2023", ""),
        ],
        local_mirror_path: mirror.to_path_buf(),
        listing_concurrency: 4,
        ..Config::default()
    }
}

/// フェイクのリモートで組み立てたサービス一式（メタデータAPIは使わない）
pub fn guide_with(remote: std::sync::Arc<FakeRemote>, mirror: &Path) -> gsoc_guide::Guide {
    let metadata = gsoc_guide::metadata::MetadataClient::new(
        "http://127.0.0.1:9",
        2025,
        std::time::Duration::from_secs(1),
    )
    .unwrap();
    gsoc_guide::Guide::with_clients(test_config(mirror), remote, metadata)
}
