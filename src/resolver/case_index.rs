//! 組織名の表記ゆれインデックス
//!
//! 小文字の組織名 → 各保存場所で見つかったフォルダ名（出現順）。
//! プロセス内で一度だけ構築し、以降は読み取り専用として扱う。
//! テスト用に `clear` で空に戻せる。

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type CaseVariants = HashMap<String, Vec<String>>;

#[derive(Debug, Default)]
pub struct CaseIndex {
    entries: Mutex<Option<Arc<CaseVariants>>>,
}

impl CaseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// フォルダ名の列からインデックスを作る
    ///
    /// 同じ小文字キーの表記は最初に出たものから順に並び、重複は入れない。
    pub fn build<I, S>(names: I) -> CaseVariants
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index: CaseVariants = HashMap::new();
        for name in names {
            let name: String = name.into();
            let variants = index.entry(name.to_lowercase()).or_default();
            if !variants.contains(&name) {
                variants.push(name);
            }
        }
        index
    }

    /// 未構築なら `populate` で構築してから返す
    ///
    /// 構築中はロックを保持するので、同時に来た初回リクエストが
    /// リモートへ重複して問い合わせることはない。
    pub async fn get_or_populate<F, Fut>(&self, populate: F) -> Arc<CaseVariants>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CaseVariants>,
    {
        let mut guard = self.entries.lock().await;
        if let Some(index) = guard.as_ref() {
            return Arc::clone(index);
        }

        let index = Arc::new(populate().await);
        *guard = Some(Arc::clone(&index));
        index
    }

    pub async fn is_populated(&self) -> bool {
        self.entries.lock().await.is_some()
    }

    /// 空に戻す
    pub async fn clear(&self) {
        *self.entries.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_build_merges_case_variants_in_order() {
        let index = CaseIndex::build(["MyOrg", "other", "myorg", "MyOrg", "MYORG"]);
        assert_eq!(index["myorg"], vec!["MyOrg", "myorg", "MYORG"]);
        assert_eq!(index["other"], vec!["other"]);
        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn test_populate_once() {
        let index = CaseIndex::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let built = index
                .get_or_populate(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    CaseIndex::build(["A"])
                })
                .await;
            assert_eq!(built["a"], vec!["A"]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(index.is_populated().await);
    }

    #[tokio::test]
    async fn test_clear_allows_repopulate() {
        let index = CaseIndex::new();
        index.get_or_populate(|| async { CaseIndex::build(["A"]) }).await;
        index.clear().await;
        assert!(!index.is_populated().await);

        let rebuilt = index.get_or_populate(|| async { CaseIndex::build(["B"]) }).await;
        assert!(rebuilt.contains_key("b"));
        assert!(!rebuilt.contains_key("a"));
    }

    #[tokio::test]
    async fn test_concurrent_first_requests_populate_once() {
        let index = Arc::new(CaseIndex::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let index = Arc::clone(&index);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    index
                        .get_or_populate(|| async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::task::yield_now().await;
                            CaseIndex::build(["Org"])
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            let built = task.await.unwrap();
            assert_eq!(built["org"], vec!["Org"]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
