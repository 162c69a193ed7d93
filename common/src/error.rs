//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown sort option: {0} (use name or projects)")]
    UnknownSort(String),

    #[error("Invalid organization payload: {0}")]
    InvalidPayload(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
