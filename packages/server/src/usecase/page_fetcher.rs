//! UseCase: ページ計画と取得
//!
//! ストアの未読数・総数からページ計画を立て、1 ページ分の画像 ID を取得します。
//! ページサイズはウィンドウの容量（memory size）と同じです。

use std::sync::Arc;

use utsushie_shared::random::RandomSource;

use crate::domain::{
    FolderPath, PagePlan, PageTransition, PictureId, PictureStore, StoreError, plan_pages,
};

pub struct PageFetcher {
    store: Arc<dyn PictureStore>,
    random: Arc<dyn RandomSource>,
    memory_size: usize,
}

impl PageFetcher {
    pub fn new(
        store: Arc<dyn PictureStore>,
        random: Arc<dyn RandomSource>,
        memory_size: usize,
    ) -> Self {
        Self {
            store,
            random,
            memory_size,
        }
    }

    pub fn memory_size(&self) -> usize {
        self.memory_size
    }

    /// Plan which page of `path` to load.
    ///
    /// `current_page == None` means the room is being created and picks a
    /// random entry page (unless unread pictures force page 0).
    pub async fn plan_pages(
        &self,
        path: &FolderPath,
        current_page: Option<u64>,
        transition: PageTransition,
    ) -> Result<PagePlan, StoreError> {
        let unread_count = self.store.unread_count(path).await?;
        let total_count = self.store.total_count(path).await?;
        let plan = plan_pages(
            unread_count,
            total_count,
            self.memory_size,
            current_page,
            transition,
            self.random.as_ref(),
        );
        tracing::debug!(
            "Planned page {}/{} for '{}' (unread: {}, total: {})",
            plan.page,
            plan.total_pages,
            path,
            unread_count,
            total_count
        );
        Ok(plan)
    }

    pub async fn fetch_page(
        &self,
        path: &FolderPath,
        page: u64,
    ) -> Result<Vec<PictureId>, StoreError> {
        self.store.page(path, page, self.memory_size).await
    }

    pub async fn mark_read(&self, id: &PictureId) -> Result<(), StoreError> {
        self.store.mark_seen(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockPictureStore;
    use crate::usecase::test_support::{folder, picture};
    use utsushie_shared::random::FixedRandom;

    fn mock_store(unread: u64, total: u64) -> MockPictureStore {
        let mut store = MockPictureStore::new();
        store
            .expect_unread_count()
            .returning(move |_| Ok(unread));
        store.expect_total_count().returning(move |_| Ok(total));
        store
    }

    fn create_fetcher(store: MockPictureStore, memory_size: usize, random: f64) -> PageFetcher {
        PageFetcher::new(
            Arc::new(store),
            Arc::new(FixedRandom::new(random)),
            memory_size,
        )
    }

    #[tokio::test]
    async fn test_plan_wraps_previous_to_last_page() {
        // テスト項目: 1001 枚・未読なし・容量 10 で前ページへ戻るとページ 100 になる
        // given (前提条件):
        let fetcher = create_fetcher(mock_store(0, 1001), 10, 0.0);

        // when (操作):
        let plan = fetcher
            .plan_pages(&folder("/photos"), Some(0), PageTransition::Previous)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(plan.total_pages, 101);
        assert_eq!(plan.page, 100);
    }

    #[tokio::test]
    async fn test_plan_forces_first_page_with_unread() {
        // テスト項目: 未読 99 / 全体 999・容量 10 ではページ 0・全 10 ページに固定される
        // given (前提条件):
        let fetcher = create_fetcher(mock_store(99, 999), 10, 0.8);

        // when (操作):
        let created = fetcher
            .plan_pages(&folder("/photos"), None, PageTransition::Stay)
            .await
            .unwrap();
        let moved = fetcher
            .plan_pages(&folder("/photos"), Some(7), PageTransition::Next)
            .await
            .unwrap();

        // then (期待する結果):
        for plan in [created, moved] {
            assert_eq!(plan.total_pages, 10);
            assert_eq!(plan.page, 0);
            assert_eq!(plan.unread_count, 99);
            assert_eq!(plan.total_count, 999);
        }
    }

    #[tokio::test]
    async fn test_plan_propagates_store_error() {
        // テスト項目: ストアの問い合わせ失敗はそのまま呼び出し元に返る
        // given (前提条件):
        let mut store = MockPictureStore::new();
        store
            .expect_unread_count()
            .returning(|_| Err(StoreError::QueryFailed("connection reset".to_string())));
        let fetcher = create_fetcher(store, 10, 0.0);

        // when (操作):
        let result = fetcher
            .plan_pages(&folder("/photos"), None, PageTransition::Stay)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(StoreError::QueryFailed("connection reset".to_string()))
        );
    }

    #[tokio::test]
    async fn test_fetch_page_uses_memory_size() {
        // テスト項目: ページ取得はウィンドウ容量をページサイズとして問い合わせる
        // given (前提条件):
        let mut store = MockPictureStore::new();
        store
            .expect_page()
            .withf(|path, page, page_size| path.as_str() == "/photos" && *page == 3 && *page_size == 25)
            .times(1)
            .returning(|_, _, _| Ok(vec![picture("/photos/a.jpg")]));
        let fetcher = create_fetcher(store, 25, 0.0);

        // when (操作):
        let window = fetcher.fetch_page(&folder("/photos"), 3).await.unwrap();

        // then (期待する結果):
        assert_eq!(window, vec![picture("/photos/a.jpg")]);
    }

    #[tokio::test]
    async fn test_mark_read_delegates_to_store() {
        // テスト項目: 既読化はストアに委譲される
        // given (前提条件):
        let mut store = MockPictureStore::new();
        store
            .expect_mark_seen()
            .withf(|id| id.as_str() == "/photos/a.jpg")
            .times(1)
            .returning(|_| Ok(()));
        let fetcher = create_fetcher(store, 10, 0.0);

        // when (操作):
        let result = fetcher.mark_read(&picture("/photos/a.jpg")).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
