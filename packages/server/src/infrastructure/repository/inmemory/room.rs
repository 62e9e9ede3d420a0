//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## ロック
//!
//! マップ全体のロックはマップ操作の間だけ保持し、ストアへの問い合わせ中には保持しません。
//! 個々のルームはそれぞれの `Mutex` で保護されます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{FolderPath, Room, RoomHandle, RoomRepository};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// Key: folder path, Value: room handle
    rooms: Mutex<HashMap<FolderPath, RoomHandle>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn find(&self, path: &FolderPath) -> Option<RoomHandle> {
        let rooms = self.rooms.lock().await;
        rooms.get(path).cloned()
    }

    async fn insert_if_absent(&self, room: Room) -> (RoomHandle, bool) {
        let mut rooms = self.rooms.lock().await;
        if let Some(existing) = rooms.get(room.path()) {
            return (existing.clone(), false);
        }
        let path = room.path().clone();
        let handle = Arc::new(Mutex::new(room));
        rooms.insert(path.clone(), handle.clone());
        tracing::info!("Room '{}' created", path);
        (handle, true)
    }

    async fn remove(&self, path: &FolderPath) -> bool {
        let mut rooms = self.rooms.lock().await;
        let removed = rooms.remove(path).is_some();
        if removed {
            tracing::info!("Room '{}' removed", path);
        }
        removed
    }

    async fn all(&self) -> Vec<(FolderPath, RoomHandle)> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .map(|(path, handle)| (path.clone(), handle.clone()))
            .collect()
    }

    async fn count(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}
