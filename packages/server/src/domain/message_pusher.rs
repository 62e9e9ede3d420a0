//! MessagePusher trait 定義
//!
//! 接続中のクライアントへの通知と、ルームのメンバーシップ（どの接続がどのフォルダを
//! 見ているか）を抽象化します。具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, DisplayId, FolderPath, MessagePushError};

/// Outbound channel of one connection
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Server → client events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// The picture a room is showing
    NewImage(DisplayId),
    /// Answer to a client request carrying an ack id
    Ack { ack: u64, value: Option<String> },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を削除（すべてのルームからも抜ける）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 接続をルームのメンバーにする（以前のルームからは抜ける）
    async fn join_room(&self, connection_id: &ConnectionId, path: &FolderPath);

    /// ルームのメンバー一覧。メンバーがいなければ `None`
    async fn members_of(&self, path: &FolderPath) -> Option<Vec<ConnectionId>>;

    /// 特定の接続にだけ送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// ルームの全メンバーに送信（一部の送信失敗は許容）
    async fn broadcast(&self, path: &FolderPath, event: &ServerEvent)
    -> Result<(), MessagePushError>;
}
