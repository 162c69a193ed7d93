//! ローカルミラー読み込みモジュール
//!
//! リモートと同じ構成をローカルに置いたディレクトリを読む。
//! 直下のサブディレクトリが組織フォルダ、その直下の `.pdf` が提案書。
//! リモートから何も取れなかったときのフォールバック専用。

use crate::error::{GuideError, Result};
use gsoc_guide_common::{is_proposal_file, ProposalRecord};
use regex::Regex;
use reqwest::Url;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// ミラーのPDFを配信するエンドポイント
pub const PDF_ENDPOINT: &str = "/api/pdf";

lazy_static::lazy_static! {
    // 1階層分のパス要素として安全な名前（区切り文字・制御文字なし）
    static ref SAFE_SEGMENT_RE: Regex = Regex::new(r"^[^/\\\x00-\x1f]+$").unwrap();
    static ref SERVING_BASE: Url = Url::parse("http://localhost").unwrap().join(PDF_ENDPOINT).unwrap();
}

/// パス要素として使ってよい名前か
pub fn is_safe_segment(name: &str) -> bool {
    SAFE_SEGMENT_RE.is_match(name) && name != "." && name != ".."
}

/// ミラーのPDFを配信するURL（`/api/pdf?org=...&file=...`）
pub fn serving_url(org_folder: &str, file_name: &str) -> String {
    let mut url = SERVING_BASE.clone();
    url.query_pairs_mut()
        .append_pair("org", org_folder)
        .append_pair("file", file_name);
    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct LocalMirror {
    base: PathBuf,
}

impl LocalMirror {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// 直下のディレクトリ名（名前順）
    ///
    /// ミラーが無い・読めない場合は空。
    pub fn organizations(&self) -> Vec<String> {
        if !self.base.is_dir() {
            debug!(base = %self.base.display(), "ローカルミラーがありません");
            return Vec::new();
        }

        let mut dirs = Vec::new();
        for entry in WalkDir::new(&self.base).min_depth(1).max_depth(1) {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => {
                    dirs.push(entry.file_name().to_string_lossy().to_string());
                }
                Ok(_) => {}
                Err(e) => warn!(base = %self.base.display(), error = %e, "ローカルミラーの読み込みに失敗"),
            }
        }

        dirs.sort();
        dirs
    }

    /// 大文字小文字を無視して実際のフォルダ名を探す
    pub fn find_folder(&self, name: &str) -> Option<String> {
        let wanted = name.to_lowercase();
        let found = self
            .organizations()
            .into_iter()
            .find(|dir| dir.to_lowercase() == wanted);

        if let Some(dir) = &found {
            debug!(input = name, folder = %dir, "ローカルの組織フォルダに一致");
        }
        found
    }

    /// 組織フォルダ直下のPDFを `year` 付きで返す（ファイル名順）
    pub fn proposals(&self, org_name: &str, year: u16) -> Vec<ProposalRecord> {
        let Some(folder) = self.find_folder(org_name) else {
            debug!(org = org_name, "ローカルに組織フォルダがありません");
            return Vec::new();
        };

        let org_path = self.base.join(&folder);
        let mut proposals = Vec::new();

        for entry in WalkDir::new(&org_path).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(path = %org_path.display(), error = %e, "ローカルミラーの読み込みに失敗");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_string();
            if !is_proposal_file(&file_name) {
                continue;
            }

            let size_bytes = entry.metadata().ok().map(|m| m.len());
            proposals.push(ProposalRecord {
                path: serving_url(&folder, &file_name),
                file_name,
                size_bytes,
                content_hash: None,
                source_year: year,
            });
        }

        proposals.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        debug!(org = %folder, count = proposals.len(), "ローカルの提案書");
        proposals
    }

    /// 配信するPDFの実パス
    ///
    /// 組織名は大文字小文字を無視して解決し、見つからなければそのまま使う。
    pub fn pdf_path(&self, org: &str, file: &str) -> Result<PathBuf> {
        if !is_safe_segment(org) {
            return Err(GuideError::InvalidFileName(org.to_string()));
        }
        if !is_safe_segment(file) || !is_proposal_file(file) {
            return Err(GuideError::InvalidFileName(file.to_string()));
        }

        let folder = self.find_folder(org).unwrap_or_else(|| org.to_string());
        let path = self.base.join(&folder).join(file);
        if !path.is_file() {
            return Err(GuideError::ProposalNotFound {
                org: org.to_string(),
                file: file.to_string(),
            });
        }
        Ok(path)
    }

    /// PDFの中身を読み込む
    pub fn read_pdf(&self, org: &str, file: &str) -> Result<Vec<u8>> {
        let path = self.pdf_path(org, file)?;
        std::fs::read(&path).map_err(|source| GuideError::LocalRead {
            path: path.display().to_string(),
            source,
        })
    }
}
