//! InMemory Picture Store 実装
//!
//! ドメイン層が定義する `PictureStore` / `LatestPictureSetter` trait の具体的な実装。
//! 画像ごとの既読フラグ、フォルダごとの既読カウンタと「最新の画像」を保持します。
//!
//! ## 並び順
//!
//! ページは「未読が先」、次に ID の SHA-256 の先頭 8 バイトの昇順で並べます。
//! アルファベット順ではない擬似シャッフルですが、同じ ID なら常に同じ位置になります。

use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::domain::{FolderPath, LatestPictureSetter, PictureId, PictureStore, StoreError};

struct PictureRecord {
    id: PictureId,
    seen: bool,
    order_key: u64,
}

#[derive(Default)]
struct StoreState {
    pictures: HashMap<PictureId, PictureRecord>,
    folder_seen: HashMap<FolderPath, u64>,
    latest: HashMap<FolderPath, PictureId>,
}

/// インメモリ Picture Store 実装
#[derive(Default)]
pub struct InMemoryPictureStore {
    state: RwLock<StoreState>,
}

impl InMemoryPictureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未読の画像で初期化
    pub fn with_pictures(ids: impl IntoIterator<Item = PictureId>) -> Self {
        let mut state = StoreState::default();
        for id in ids {
            let record = PictureRecord {
                order_key: order_key(&id),
                id: id.clone(),
                seen: false,
            };
            state.pictures.insert(id, record);
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// 画像を追加（既に存在する場合は既読フラグだけ更新）
    pub async fn insert(&self, id: PictureId, seen: bool) {
        let mut state = self.state.write().await;
        state
            .pictures
            .entry(id.clone())
            .and_modify(|record| record.seen = seen)
            .or_insert_with(|| PictureRecord {
                order_key: order_key(&id),
                id,
                seen,
            });
    }

    /// 画像数
    pub async fn len(&self) -> usize {
        self.state.read().await.pictures.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// 既読フラグ（存在しない画像は `None`）
    pub async fn is_seen(&self, id: &PictureId) -> Option<bool> {
        self.state.read().await.pictures.get(id).map(|r| r.seen)
    }

    /// フォルダの既読カウンタ
    pub async fn seen_count(&self, folder: &FolderPath) -> u64 {
        self.state
            .read()
            .await
            .folder_seen
            .get(folder)
            .copied()
            .unwrap_or(0)
    }

    /// フォルダの最新の画像
    pub async fn latest_of(&self, folder: &FolderPath) -> Option<PictureId> {
        self.state.read().await.latest.get(folder).cloned()
    }
}

/// ID の安定ハッシュ（SHA-256 の先頭 8 バイト）
fn order_key(id: &PictureId) -> u64 {
    let digest = Sha256::digest(id.as_str().as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

#[async_trait]
impl PictureStore for InMemoryPictureStore {
    async fn unread_count(&self, path: &FolderPath) -> Result<u64, StoreError> {
        let state = self.state.read().await;
        let count = state
            .pictures
            .values()
            .filter(|r| !r.seen && path.contains(&r.id))
            .count();
        Ok(count as u64)
    }

    async fn total_count(&self, path: &FolderPath) -> Result<u64, StoreError> {
        let state = self.state.read().await;
        let count = state
            .pictures
            .values()
            .filter(|r| path.contains(&r.id))
            .count();
        Ok(count as u64)
    }

    async fn page(
        &self,
        path: &FolderPath,
        page: u64,
        page_size: usize,
    ) -> Result<Vec<PictureId>, StoreError> {
        let state = self.state.read().await;
        let mut records: Vec<&PictureRecord> = state
            .pictures
            .values()
            .filter(|r| path.contains(&r.id))
            .collect();
        records.sort_by(|a, b| {
            a.seen
                .cmp(&b.seen)
                .then(a.order_key.cmp(&b.order_key))
                .then_with(|| a.id.cmp(&b.id))
        });

        let offset = usize::try_from(page)
            .ok()
            .and_then(|p| p.checked_mul(page_size))
            .unwrap_or(usize::MAX);

        Ok(records
            .into_iter()
            .skip(offset)
            .take(page_size)
            .map(|r| r.id.clone())
            .collect())
    }

    async fn mark_seen(&self, id: &PictureId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let already_seen = match state.pictures.get(id) {
            Some(record) => record.seen,
            None => return Err(StoreError::PictureNotFound(id.as_str().to_string())),
        };
        if already_seen {
            return Ok(());
        }

        for folder in id.ancestors() {
            *state.folder_seen.entry(folder).or_insert(0) += 1;
        }
        if let Some(record) = state.pictures.get_mut(id) {
            record.seen = true;
        }
        tracing::debug!("Picture '{}' marked as seen", id);

        Ok(())
    }
}

#[async_trait]
impl LatestPictureSetter for InMemoryPictureStore {
    async fn set_latest(&self, id: &PictureId) -> Result<FolderPath, StoreError> {
        let mut state = self.state.write().await;
        if !state.pictures.contains_key(id) {
            return Err(StoreError::PictureNotFound(id.as_str().to_string()));
        }
        let folder = id.folder();
        state.latest.insert(folder.clone(), id.clone());
        tracing::debug!("Latest picture of '{}' set to '{}'", folder, id);
        Ok(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 件数（未読・全体）がフォルダ配下で数えられること
    // - ページの並び順（未読が先、次に安定ハッシュ順）とオフセット
    // - 既読化で祖先フォルダのカウンタが 1 回だけ増えること
    // - 最新の画像の記録
    // ========================================

    fn picture(id: &str) -> PictureId {
        PictureId::new(id.to_string()).unwrap()
    }

    fn folder(path: &str) -> FolderPath {
        FolderPath::new(path.to_string()).unwrap()
    }

    fn create_test_store(count: usize) -> InMemoryPictureStore {
        InMemoryPictureStore::with_pictures(
            (0..count).map(|i| picture(&format!("/photos/{:04}.jpg", i))),
        )
    }

    #[tokio::test]
    async fn test_counts_include_descendants_only() {
        // テスト項目: 件数はフォルダ配下（子孫を含む）の画像だけを数える
        // given (前提条件):
        let store = InMemoryPictureStore::with_pictures([
            picture("/photos/a.jpg"),
            picture("/photos/2020/b.jpg"),
            picture("/other/c.jpg"),
        ]);
        store.insert(picture("/photos/2020/d.jpg"), true).await;

        // when (操作):
        let total = store.total_count(&folder("/photos")).await.unwrap();
        let unread = store.unread_count(&folder("/photos")).await.unwrap();
        let all = store.total_count(&FolderPath::root()).await.unwrap();

        // then (期待する結果):
        assert_eq!(total, 3);
        assert_eq!(unread, 2);
        assert_eq!(all, 4);
    }

    #[tokio::test]
    async fn test_page_puts_unread_first() {
        // テスト項目: ページは未読の画像が先に並ぶ
        // given (前提条件):
        let store = create_test_store(20);
        for i in 0..15 {
            store
                .insert(picture(&format!("/photos/{:04}.jpg", i)), true)
                .await;
        }

        // when (操作):
        let first_page = store.page(&folder("/photos"), 0, 5).await.unwrap();

        // then (期待する結果): 未読の 5 枚（15〜19）がちょうど先頭ページになる
        let mut names: Vec<String> = first_page.into_iter().map(|p| p.into_string()).collect();
        names.sort();
        let expected: Vec<String> = (15..20).map(|i| format!("/photos/{:04}.jpg", i)).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_pages_are_stable_and_disjoint() {
        // テスト項目: ページの内容は安定しており、ページ同士は重ならず全体を覆う
        // given (前提条件):
        let store = create_test_store(25);
        let photos = folder("/photos");

        // when (操作):
        let mut all = Vec::new();
        for page in 0..3 {
            all.extend(store.page(&photos, page, 10).await.unwrap());
        }
        let again = store.page(&photos, 1, 10).await.unwrap();

        // then (期待する結果):
        assert_eq!(all.len(), 25);
        assert_eq!(&all[10..20], again.as_slice());
        let mut unique = all.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 25);
    }

    #[tokio::test]
    async fn test_page_is_not_alphabetical() {
        // テスト項目: 並び順はアルファベット順ではなくハッシュ順
        // given (前提条件):
        let store = create_test_store(50);

        // when (操作):
        let page = store.page(&folder("/photos"), 0, 50).await.unwrap();

        // then (期待する結果):
        let mut sorted = page.clone();
        sorted.sort();
        assert_ne!(page, sorted);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        // テスト項目: 範囲外のページは空になる
        // given (前提条件):
        let store = create_test_store(5);

        // when (操作):
        let page = store.page(&folder("/photos"), 3, 10).await.unwrap();

        // then (期待する結果):
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_mark_seen_bumps_every_ancestor_once() {
        // テスト項目: 既読化で祖先フォルダすべての既読カウンタが 1 回だけ増える
        // given (前提条件):
        let store = InMemoryPictureStore::with_pictures([picture("/a/b/c.jpg")]);
        let id = picture("/a/b/c.jpg");

        // when (操作):
        store.mark_seen(&id).await.unwrap();
        store.mark_seen(&id).await.unwrap();

        // then (期待する結果):
        assert_eq!(store.is_seen(&id).await, Some(true));
        assert_eq!(store.seen_count(&folder("/a/b")).await, 1);
        assert_eq!(store.seen_count(&folder("/a")).await, 1);
        assert_eq!(store.seen_count(&FolderPath::root()).await, 1);
        assert_eq!(store.unread_count(&folder("/a")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mark_seen_unknown_picture() {
        // テスト項目: 存在しない画像の既読化はエラーになる
        // given (前提条件):
        let store = InMemoryPictureStore::new();

        // when (操作):
        let result = store.mark_seen(&picture("/missing.jpg")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(StoreError::PictureNotFound(_))));
    }

    #[tokio::test]
    async fn test_set_latest_returns_parent_folder() {
        // テスト項目: 最新の画像を記録すると、その画像のフォルダが返される
        // given (前提条件):
        let store = InMemoryPictureStore::with_pictures([picture("/a/b/c.jpg")]);

        // when (操作):
        let folder_path = store.set_latest(&picture("/a/b/c.jpg")).await.unwrap();

        // then (期待する結果):
        assert_eq!(folder_path, folder("/a/b"));
        assert_eq!(
            store.latest_of(&folder("/a/b")).await,
            Some(picture("/a/b/c.jpg"))
        );
    }
}
