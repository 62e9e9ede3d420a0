//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - ルームのメンバーシップ（フォルダパス → 接続 ID の集合）を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 1 つの接続は同時に 1 つのルームにだけ所属します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, FolderPath, MessagePushError, MessagePusher, PusherChannel, ServerEvent},
    infrastructure::dto::conversion::encode_server_event,
};

#[derive(Default)]
struct Connections {
    /// Key: connection id, Value: outbound channel
    senders: HashMap<ConnectionId, PusherChannel>,
    /// Key: folder path, Value: members (never empty)
    rooms: HashMap<FolderPath, HashSet<ConnectionId>>,
    /// Key: connection id, Value: joined folder path
    joined: HashMap<ConnectionId, FolderPath>,
}

impl Connections {
    fn leave_current_room(&mut self, connection_id: &ConnectionId) {
        let Some(path) = self.joined.remove(connection_id) else {
            return;
        };
        if let Some(members) = self.rooms.get_mut(&path) {
            members.remove(connection_id);
            if members.is_empty() {
                self.rooms.remove(&path);
            }
        }
    }
}

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    connections: Mutex<Connections>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

fn encode(event: &ServerEvent) -> Result<String, MessagePushError> {
    encode_server_event(event).map_err(|e| MessagePushError::PushFailed(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        connections.senders.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.leave_current_room(connection_id);
        connections.senders.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn join_room(&self, connection_id: &ConnectionId, path: &FolderPath) {
        let mut connections = self.connections.lock().await;
        connections.leave_current_room(connection_id);
        connections
            .rooms
            .entry(path.clone())
            .or_default()
            .insert(connection_id.clone());
        connections
            .joined
            .insert(connection_id.clone(), path.clone());
        tracing::debug!("Connection '{}' joined room '{}'", connection_id, path);
    }

    async fn members_of(&self, path: &FolderPath) -> Option<Vec<ConnectionId>> {
        let connections = self.connections.lock().await;
        connections
            .rooms
            .get(path)
            .filter(|members| !members.is_empty())
            .map(|members| members.iter().cloned().collect())
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content = encode(event)?;
        let connections = self.connections.lock().await;

        if let Some(sender) = connections.senders.get(connection_id) {
            sender
                .send(content)
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to connection '{}'", connection_id);
            Ok(())
        } else {
            Err(MessagePushError::ClientNotFound(
                connection_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast(
        &self,
        path: &FolderPath,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content = encode(event)?;
        let connections = self.connections.lock().await;

        let Some(members) = connections.rooms.get(path) else {
            return Ok(());
        };
        for member in members {
            if let Some(sender) = connections.senders.get(member) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.clone()) {
                    tracing::warn!("Failed to push message to connection '{}': {}", member, e);
                }
            } else {
                tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    member
                );
            }
        }
        tracing::debug!("Broadcasted message to {} member(s) of '{}'", members.len(), path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisplayId;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定の接続への送信
    // - broadcast: ルームのメンバー全員への送信
    // - メンバーシップ: join / 別ルームへの join / 切断
    // ========================================

    fn folder(path: &str) -> FolderPath {
        FolderPath::new(path.to_string()).unwrap()
    }

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn new_image(display_id: &str) -> ServerEvent {
        ServerEvent::NewImage(DisplayId::encode(
            &crate::domain::PictureId::new(display_id.to_string()).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にメッセージを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = connection("alice");
        pusher.register_client(alice.clone(), tx).await;

        // when (操作):
        let result = pusher.push_to(&alice, &new_image("/a.jpg")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            rx.recv().await,
            Some(r#"{"type":"new-image","display_id":"/a.jpg"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しない接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.push_to(&connection("ghost"), &new_image("/a.jpg")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_room_members_only() {
        // テスト項目: ブロードキャストは同じルームのメンバーだけに届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        let (alice, bob, carol) = (connection("alice"), connection("bob"), connection("carol"));
        pusher.register_client(alice.clone(), tx1).await;
        pusher.register_client(bob.clone(), tx2).await;
        pusher.register_client(carol.clone(), tx3).await;
        pusher.join_room(&alice, &folder("/photos")).await;
        pusher.join_room(&bob, &folder("/photos")).await;
        pusher.join_room(&carol, &folder("/other")).await;

        // when (操作):
        let result = pusher.broadcast(&folder("/photos"), &new_image("/photos/a.jpg")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(rx1.recv().await.is_some());
        assert!(rx2.recv().await.is_some());
        assert!(rx3.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_join_other_room_leaves_previous() {
        // テスト項目: 別のルームに join すると以前のルームから抜け、空のルームは消える
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let alice = connection("alice");
        pusher.register_client(alice.clone(), tx).await;
        pusher.join_room(&alice, &folder("/photos")).await;

        // when (操作):
        pusher.join_room(&alice, &folder("/other")).await;

        // then (期待する結果):
        assert_eq!(pusher.members_of(&folder("/photos")).await, None);
        assert_eq!(pusher.members_of(&folder("/other")).await, Some(vec![alice]));
    }

    #[tokio::test]
    async fn test_unregister_removes_membership() {
        // テスト項目: 切断した接続はルームのメンバーから外れる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (alice, bob) = (connection("alice"), connection("bob"));
        pusher.register_client(alice.clone(), tx1).await;
        pusher.register_client(bob.clone(), tx2).await;
        pusher.join_room(&alice, &folder("/photos")).await;
        pusher.join_room(&bob, &folder("/photos")).await;

        // when (操作):
        pusher.unregister_client(&alice).await;

        // then (期待する結果):
        assert_eq!(pusher.members_of(&folder("/photos")).await, Some(vec![bob.clone()]));
        pusher.unregister_client(&bob).await;
        assert_eq!(pusher.members_of(&folder("/photos")).await, None);
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_closed_channel() {
        // テスト項目: 受信側が閉じた接続があってもブロードキャストは成功する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (alice, bob) = (connection("alice"), connection("bob"));
        pusher.register_client(alice.clone(), tx1).await;
        pusher.register_client(bob.clone(), tx2).await;
        pusher.join_room(&alice, &folder("/photos")).await;
        pusher.join_room(&bob, &folder("/photos")).await;
        drop(rx1);

        // when (操作):
        let result = pusher.broadcast(&folder("/photos"), &new_image("/photos/a.jpg")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(rx2.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_broadcast_to_unknown_room_is_noop() {
        // テスト項目: メンバーのいないルームへのブロードキャストはエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.broadcast(&folder("/empty"), &new_image("/a.jpg")).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
