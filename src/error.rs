use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("リモートにパスが存在しません: {0}")]
    RemoteNotFound(String),

    #[error("リモートAPIエラー ({status}): {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ローカルミラー読み込みエラー: {path}: {source}")]
    LocalRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("不正なファイル名: {0}")]
    InvalidFileName(String),

    #[error("組織が見つかりません: {0}")]
    OrganizationNotFound(String),

    #[error("提案書が見つかりません: {org}/{file}")]
    ProposalNotFound { org: String, file: String },

    #[error("組織メタデータ取得エラー: {0}")]
    Metadata(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] gsoc_guide_common::Error),
}

impl GuideError {
    /// 404相当（呼び出し側で空結果として扱う）
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GuideError::RemoteNotFound(_)
                | GuideError::OrganizationNotFound(_)
                | GuideError::ProposalNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GuideError>;
