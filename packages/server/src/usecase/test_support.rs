//! Helpers shared by the usecase tests.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use utsushie_shared::{random::FixedRandom, time::FixedClock};

use crate::{
    domain::{FolderPath, PictureId, PictureStore, StoreError},
    infrastructure::repository::{InMemoryPictureStore, InMemoryRoomRepository},
};

use super::{Navigator, PageFetcher};

pub const TEST_COUNTDOWN: i64 = 20;
pub const TEST_CREATED_AT: i64 = 1672531200000;

pub fn picture(id: &str) -> PictureId {
    PictureId::new(id.to_string()).unwrap()
}

pub fn folder(path: &str) -> FolderPath {
    FolderPath::new(path.to_string()).unwrap()
}

/// `count` pictures named `<prefix>/NNNN.jpg`, all already seen
pub async fn seen_store(prefix: &str, count: usize) -> Arc<InMemoryPictureStore> {
    let store = Arc::new(InMemoryPictureStore::new());
    for i in 0..count {
        store
            .insert(picture(&format!("{}/{:04}.jpg", prefix, i)), true)
            .await;
    }
    store
}

/// `count` unread pictures named `<prefix>/NNNN.jpg`
pub fn unread_store(prefix: &str, count: usize) -> Arc<InMemoryPictureStore> {
    Arc::new(InMemoryPictureStore::with_pictures(
        (0..count).map(|i| picture(&format!("{}/{:04}.jpg", prefix, i))),
    ))
}

pub fn create_navigator(
    store: Arc<dyn PictureStore>,
    memory_size: usize,
    random: f64,
) -> (Arc<Navigator>, Arc<InMemoryRoomRepository>) {
    let rooms = Arc::new(InMemoryRoomRepository::new());
    let fetcher = PageFetcher::new(store, Arc::new(FixedRandom::new(random)), memory_size);
    let navigator = Arc::new(Navigator::new(
        rooms.clone(),
        fetcher,
        Arc::new(FixedClock::new(TEST_CREATED_AT)),
        TEST_COUNTDOWN,
    ));
    (navigator, rooms)
}

/// Store whose queries under one folder never resolve once `hang` is called
pub struct HangingStore {
    inner: Arc<InMemoryPictureStore>,
    path: FolderPath,
    hanging: AtomicBool,
}

impl HangingStore {
    pub fn new(inner: Arc<InMemoryPictureStore>, path: FolderPath) -> Self {
        Self {
            inner,
            path,
            hanging: AtomicBool::new(false),
        }
    }

    pub fn hang(&self) {
        self.hanging.store(true, Ordering::SeqCst);
    }

    async fn stall_if(&self, affected: bool) {
        if affected && self.hanging.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl PictureStore for HangingStore {
    async fn unread_count(&self, path: &FolderPath) -> Result<u64, StoreError> {
        self.stall_if(path == &self.path).await;
        self.inner.unread_count(path).await
    }

    async fn total_count(&self, path: &FolderPath) -> Result<u64, StoreError> {
        self.stall_if(path == &self.path).await;
        self.inner.total_count(path).await
    }

    async fn page(
        &self,
        path: &FolderPath,
        page: u64,
        page_size: usize,
    ) -> Result<Vec<PictureId>, StoreError> {
        self.stall_if(path == &self.path).await;
        self.inner.page(path, page, page_size).await
    }

    async fn mark_seen(&self, id: &PictureId) -> Result<(), StoreError> {
        self.stall_if(self.path.contains(id)).await;
        self.inner.mark_seen(id).await
    }
}
