use crate::error::{GuideError, Result};
use crate::remote::SourceLocation;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const TOKEN_ENV: &str = "GITHUB_TOKEN";
const MIRROR_ENV: &str = "GSOC_GUIDE_MIRROR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub github_token: Option<String>,
    pub repo_owner: String,
    pub repo_name: String,
    /// 最新年度の保存場所
    pub current: SourceLocation,
    /// 過去年度の保存場所（年度ごとに1つ）
    pub archives: Vec<SourceLocation>,
    pub local_mirror_path: PathBuf,
    pub metadata_api_base: String,
    pub metadata_year: u16,
    pub bind_addr: String,
    pub timeout_seconds: u64,
    /// 組織一覧の集約を同時に何件走らせるか
    pub listing_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GuideError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("gsoc-guide").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            github_token: None,
            repo_owner: "SammanSarkar".into(),
            repo_name: "GSoC_archive_2025".into(),
            current: SourceLocation::new(2025, "main", ""),
            archives: [2024, 2023, 2022]
                .into_iter()
                .map(|year| SourceLocation::new(year, &year.to_string(), ""))
                .collect(),
            local_mirror_path: PathBuf::from("..").join("Proposals"),
            metadata_api_base: "https://api.gsocorganizations.dev".into(),
            metadata_year: 2025,
            bind_addr: "127.0.0.1:3000".into(),
            timeout_seconds: 30,
            listing_concurrency: 8,
        }
    }

    /// 環境変数を優先。どちらも無ければ匿名でアクセスする
    pub fn github_token(&self) -> Option<String> {
        match std::env::var(TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Some(token),
            _ => self.github_token.clone().filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn set_github_token(&mut self, token: String) -> Result<()> {
        self.github_token = Some(token);
        self.save()
    }

    pub fn mirror_path(&self) -> PathBuf {
        match std::env::var(MIRROR_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => self.local_mirror_path.clone(),
        }
    }

    /// 最新年度 → 過去年度の順に並べた保存場所
    pub fn locations(&self) -> Vec<SourceLocation> {
        std::iter::once(self.current.clone())
            .chain(self.archives.iter().cloned())
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.repo_owner.trim().is_empty() || self.repo_name.trim().is_empty() {
            return Err(GuideError::Config("repoOwner / repoName が空です".into()));
        }
        if self.listing_concurrency == 0 {
            return Err(GuideError::Config("listingConcurrency は1以上にしてください".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locations_order() {
        let config = Config::default();
        let years: Vec<u16> = config.locations().iter().map(|l| l.year).collect();
        assert_eq!(years, vec![2025, 2024, 2023, 2022]);
        assert_eq!(config.current.branch, "main");
        assert_eq!(config.archives[0].branch, "2024");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"repoOwner": "someone"}"#).unwrap();
        assert_eq!(config.repo_owner, "someone");
        assert_eq!(config.repo_name, "GSoC_archive_2025");
        assert_eq!(config.listing_concurrency, 8);
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = Config {
            listing_concurrency: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(GuideError::Config(_))));
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(Config::default().validate().is_ok());
    }
}
