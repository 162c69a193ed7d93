use serde::{Deserialize, Serialize};

/// 年度ごとの保存場所（ブランチ + ルートからのパス）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub year: u16,
    pub branch: String,
    /// 組織フォルダを並べているディレクトリ。空ならリポジトリ直下
    #[serde(default)]
    pub path: String,
}

impl SourceLocation {
    pub fn new(year: u16, branch: &str, path: &str) -> Self {
        Self {
            year,
            branch: branch.to_string(),
            path: path.trim_matches('/').to_string(),
        }
    }

    /// 組織フォルダのリポジトリ内パス。`None` なら保存場所のルート
    pub fn folder_path(&self, folder: Option<&str>) -> String {
        let base = self.path.trim_matches('/');
        match folder.map(|f| f.trim_matches('/')).filter(|f| !f.is_empty()) {
            Some(f) if base.is_empty() => f.to_string(),
            Some(f) => format!("{}/{}", base, f),
            None => base.to_string(),
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}@{}", self.year, self.branch)
        } else {
            write!(f, "{}@{}:{}", self.year, self.branch, self.path)
        }
    }
}
