//! 組織一覧サービスの統合テスト

mod common;

use common::{dir, file, guide_with, write_mirror, FakeRemote};
use std::sync::Arc;
use tempfile::tempdir;

fn sample_remote() -> FakeRemote {
    FakeRemote::new()
        .with_dir("main", "", vec![dir("Alpha"), dir("beta"), file("README.md", "main")])
        .with_dir("2024", "", vec![dir("alpha"), dir("Gamma")])
        .with_dir("main", "Alpha", vec![file("a1.pdf", "main")])
        .with_dir("2024", "alpha", vec![file("a1.pdf", "2024"), file("a2.pdf", "2024")])
        .with_dir("main", "beta", vec![file("notes.txt", "main")])
        .with_dir("2024", "Gamma", vec![file("g.pdf", "2024")])
}

/// 全保存場所とローカルの組織名を小文字でまとめる
#[tokio::test]
async fn test_organization_names_union_lowercased() {
    let mirror = tempdir().unwrap();
    write_mirror(mirror.path(), "LocalOnly", &[]);

    let guide = guide_with(Arc::new(sample_remote()), mirror.path());
    let names: Vec<String> = guide.listing.organization_names().await.into_iter().collect();

    assert_eq!(names, vec!["alpha", "beta", "gamma", "localonly"]);
}

/// 提案書の有無フラグ
#[tokio::test]
async fn test_list_all_with_proposal_flag() {
    let mirror = tempdir().unwrap();
    write_mirror(mirror.path(), "LocalOnly", &["l.pdf"]);
    write_mirror(mirror.path(), "Empty", &["readme.txt"]);

    let guide = guide_with(Arc::new(sample_remote()), mirror.path());
    let flags = guide.listing.list_all_with_proposal_flag().await;

    assert_eq!(flags.len(), 5);
    assert_eq!(flags.get("alpha"), Some(&true));
    assert_eq!(flags.get("beta"), Some(&false));
    assert_eq!(flags.get("gamma"), Some(&true));
    // ローカルにだけある組織もフォールバックで数える
    assert_eq!(flags.get("localonly"), Some(&true));
    assert_eq!(flags.get("empty"), Some(&false));
    // どこにも無い組織は含まれない
    assert!(!flags.contains_key("nobody"));
}

/// 件数は重複排除後の数
#[tokio::test]
async fn test_summaries_count_after_dedup() {
    let mirror = tempdir().unwrap();
    let guide = guide_with(Arc::new(sample_remote()), mirror.path());

    let summaries = guide.listing.summaries().await;
    let alpha = &summaries["alpha"];
    assert!(alpha.has_proposals);
    // a1.pdf は2025と2024の両方にあるが1件
    assert_eq!(alpha.proposal_count, 2);
    assert_eq!(summaries["beta"].proposal_count, 0);
    assert_eq!(summaries["gamma"].proposal_count, 1);
}

/// 同じ状態なら何度呼んでも同じ結果
#[tokio::test]
async fn test_listing_is_idempotent() {
    let mirror = tempdir().unwrap();
    let guide = guide_with(Arc::new(sample_remote()), mirror.path());

    let first = guide.listing.list_all_with_proposal_flag().await;
    let second = guide.listing.list_all_with_proposal_flag().await;
    assert_eq!(first, second);
}

/// 集計の合計値
#[tokio::test]
async fn test_overview_totals() {
    let mirror = tempdir().unwrap();
    let guide = guide_with(Arc::new(sample_remote()), mirror.path());

    let overview = guide.listing.overview().await;
    assert_eq!(overview.total_organizations, 3);
    assert_eq!(overview.organizations_with_proposals, 2);
    assert_eq!(overview.total_proposals, 3);

    let json = serde_json::to_value(&overview).unwrap();
    assert_eq!(json["totalProposals"], 3);
    assert_eq!(json["organizations"]["alpha"]["proposalCount"], 2);
    assert_eq!(json["organizations"]["beta"]["hasProposals"], false);
}

/// リモートが全滅してもローカルの組織は一覧に出る
#[tokio::test]
async fn test_listing_with_failing_remote() {
    let mirror = tempdir().unwrap();
    write_mirror(mirror.path(), "Offline", &["o.pdf"]);

    let guide = guide_with(Arc::new(FakeRemote::failing(503)), mirror.path());
    let flags = guide.listing.list_all_with_proposal_flag().await;

    assert_eq!(flags.len(), 1);
    assert_eq!(flags.get("offline"), Some(&true));
}
