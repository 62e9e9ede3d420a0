//! UseCase: ルーム一覧の取得

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomRepository, RoomSnapshot};

pub struct GetRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetRoomsUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            rooms,
            message_pusher,
        }
    }

    /// 全ルームのスナップショット（パス順）
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        let mut snapshots = Vec::new();
        for (path, handle) in self.rooms.all().await {
            let members = self
                .message_pusher
                .members_of(&path)
                .await
                .map_or(0, |m| m.len());
            snapshots.push(handle.lock().await.snapshot(members));
        }
        snapshots.sort_by(|a, b| a.path.cmp(&b.path));
        snapshots
    }
}
