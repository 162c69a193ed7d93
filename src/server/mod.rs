//! HTTP API
//!
//! | ルート | 内容 |
//! |---|---|
//! | `GET /health` | 死活確認 |
//! | `GET /api/proposals` | 組織名 → 提案書の有無 |
//! | `GET /api/proposals/summary` | 件数付きの集計 |
//! | `GET /api/proposals/:org` | 組織の提案書一覧 |
//! | `GET /api/proposals/:org/:file` | 提案書1件 |
//! | `GET /api/pdf?org=&file=` | ローカルミラーのPDF |
//! | `GET /api/organizations` | 組織検索（q / technology / topic / hasProposals / sort） |
//! | `GET /api/organizations/facets` | 技術・トピックの候補 |
//! | `GET /api/organizations/:name` | 組織詳細 + 提案書 |
//!
//! `/api/proposals/summary` は静的ルートが優先されるため、`summary` という名前の
//! 組織フォルダの一覧はこのパスでは引けない。件数は集計結果の `organizations.summary` に含まれる。

pub mod handlers;
pub mod response;

use crate::app::Guide;
use crate::error::Result;
use crate::mirror::PDF_ENDPOINT;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub fn router(guide: Arc<Guide>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/proposals", get(handlers::proposals_map))
        .route("/api/proposals/summary", get(handlers::proposals_summary))
        .route("/api/proposals/:org", get(handlers::org_proposals))
        .route("/api/proposals/:org/:file", get(handlers::org_proposal))
        .route(PDF_ENDPOINT, get(handlers::serve_pdf))
        .route("/api/organizations", get(handlers::organizations))
        .route("/api/organizations/facets", get(handlers::organization_facets))
        .route("/api/organizations/:name", get(handlers::organization_detail))
        .with_state(guide)
}

/// 待ち受け済みのリスナーで配信する
pub async fn serve_on(listener: TcpListener, guide: Arc<Guide>) -> Result<()> {
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "HTTPサーバを起動");
    axum::serve(listener, router(guide)).await?;
    Ok(())
}

pub async fn serve(bind: &str, guide: Arc<Guide>) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    serve_on(listener, guide).await
}
