//! 組織メタデータAPIクライアント
//!
//! `GET {base}/{year}.json` → `{"organizations": [...]}`

use crate::config::Config;
use crate::error::{GuideError, Result};
use gsoc_guide_common::catalog::{find_by_name, parse_organizations};
use gsoc_guide_common::{Error as CommonError, Organization};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

pub struct MetadataClient {
    client: Client,
    base_url: String,
    year: u16,
}

impl MetadataClient {
    pub fn new(base_url: &str, year: u16, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            year,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.metadata_api_base,
            config.metadata_year,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn url(&self) -> String {
        format!("{}/{}.json", self.base_url, self.year)
    }

    /// 年度の全組織
    ///
    /// `organizations` 配列が無いレスポンスは空の一覧として扱う。
    pub async fn fetch_organizations(&self) -> Result<Vec<Organization>> {
        let url = self.url();
        debug!(%url, "組織メタデータを取得");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| GuideError::Metadata(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GuideError::Metadata(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GuideError::Metadata(e.to_string()))?;

        match parse_organizations(&body) {
            Ok(orgs) => Ok(orgs),
            Err(CommonError::InvalidPayload(reason)) => {
                error!(%url, %reason, "想定外のレスポンス形式");
                Ok(Vec::new())
            }
            Err(e) => Err(GuideError::Metadata(e.to_string())),
        }
    }

    /// 組織名（大文字小文字を区別しない）で1件
    pub async fn fetch_organization(&self, name: &str) -> Result<Option<Organization>> {
        let orgs = self.fetch_organizations().await?;
        Ok(find_by_name(&orgs, name).cloned())
    }
}
