use super::response::ApiError;
use crate::app::Guide;
use crate::directory::OrganizationDetail;
use crate::error::GuideError;
use crate::listing::ProposalsOverview;
use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use gsoc_guide_common::{Facets, Organization, OrganizationQuery, ProposalRecord, SortBy};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

type AppState = State<Arc<Guide>>;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn proposals_map(State(guide): AppState) -> Json<BTreeMap<String, bool>> {
    Json(guide.listing.list_all_with_proposal_flag().await)
}

pub async fn proposals_summary(State(guide): AppState) -> Json<ProposalsOverview> {
    Json(guide.listing.overview().await)
}

pub async fn org_proposals(
    State(guide): AppState,
    Path(org): Path<String>,
) -> Json<Vec<ProposalRecord>> {
    Json(guide.aggregator.list_proposals(&org).await)
}

pub async fn org_proposal(
    State(guide): AppState,
    Path((org, file)): Path<(String, String)>,
) -> Result<Json<ProposalRecord>, ApiError> {
    guide
        .aggregator
        .find_proposal(&org, &file)
        .await
        .map(Json)
        .ok_or_else(|| GuideError::ProposalNotFound { org, file }.into())
}

#[derive(Debug, Deserialize)]
pub struct PdfParams {
    org: Option<String>,
    file: Option<String>,
}

/// ローカルミラーのPDFを返す
pub async fn serve_pdf(
    State(guide): AppState,
    Query(params): Query<PdfParams>,
) -> Result<Response, ApiError> {
    let (Some(org), Some(file)) = (params.org, params.file) else {
        return Err(ApiError::bad_request("Missing org or file parameter"));
    };

    let mirror = Arc::clone(&guide.mirror);
    let read_file = file.clone();
    let bytes = tokio::task::spawn_blocking(move || mirror.read_pdf(&org, &read_file))
        .await
        .map_err(|e| GuideError::Io(std::io::Error::other(e)))??;

    let disposition = format!("inline; filename=\"{}\"", file.replace('"', ""));
    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// 組織検索のクエリ。技術・トピックはカンマ区切り
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationParams {
    q: Option<String>,
    technology: Option<String>,
    topic: Option<String>,
    has_proposals: Option<bool>,
    sort: Option<String>,
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl OrganizationParams {
    pub fn into_query(self) -> Result<OrganizationQuery, GuideError> {
        let sort = match self.sort.as_deref() {
            Some(s) => s.parse::<SortBy>()?,
            None => SortBy::default(),
        };
        Ok(OrganizationQuery {
            technologies: split_list(self.technology.as_deref()),
            topics: split_list(self.topic.as_deref()),
            query: self.q,
            has_proposals_only: self.has_proposals.unwrap_or(false),
            sort,
        })
    }
}

pub async fn organizations(
    State(guide): AppState,
    Query(params): Query<OrganizationParams>,
) -> Result<Json<Vec<Organization>>, ApiError> {
    let query = params.into_query()?;
    Ok(Json(guide.directory.search(&query).await?))
}

pub async fn organization_facets(State(guide): AppState) -> Result<Json<Facets>, ApiError> {
    Ok(Json(guide.directory.facets().await?))
}

pub async fn organization_detail(
    State(guide): AppState,
    Path(name): Path<String>,
) -> Result<Json<OrganizationDetail>, ApiError> {
    Ok(Json(guide.directory.organization_detail(&name).await?))
}
