//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! - `PictureStore`: 画像コレクション（既読フラグ・祖先フォルダの既読カウンタを持つ）
//! - `LatestPictureSetter`: フォルダの「最新の画像」ブックマークを記録する外部協調者
//! - `RoomRepository`: プロセス全体のルーム一覧（ルームの生成・破棄はここだけ）

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{FolderPath, PictureId, Room, StoreError};

/// Shared handle to one room; holding the lock makes the holder the room's
/// only writer.
pub type RoomHandle = Arc<Mutex<Room>>;

/// Backing picture store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PictureStore: Send + Sync {
    /// 未読の画像数（フォルダ配下すべて）
    async fn unread_count(&self, path: &FolderPath) -> Result<u64, StoreError>;

    /// 画像の総数（フォルダ配下すべて）
    async fn total_count(&self, path: &FolderPath) -> Result<u64, StoreError>;

    /// 1 ページ分の画像 ID を取得
    ///
    /// 未読が先、次に ID の安定ハッシュ順（擬似シャッフル）で並べ、
    /// `page * page_size` から最大 `page_size` 件を返す。
    async fn page(
        &self,
        path: &FolderPath,
        page: u64,
        page_size: usize,
    ) -> Result<Vec<PictureId>, StoreError>;

    /// 画像を既読にする
    ///
    /// 未読だった場合のみ、すべての祖先フォルダの既読カウンタを増やしてから
    /// 既読フラグを立てる。既読なら何もしない。
    async fn mark_seen(&self, id: &PictureId) -> Result<(), StoreError>;
}

/// "Set latest picture" collaborator owned by the browsing layer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LatestPictureSetter: Send + Sync {
    /// 画像をフォルダの最新の画像として記録し、そのフォルダを返す
    async fn set_latest(&self, id: &PictureId) -> Result<FolderPath, StoreError>;
}

/// Room registry
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを取得
    async fn find(&self, path: &FolderPath) -> Option<RoomHandle>;

    /// ルームが存在しなければ追加
    ///
    /// 戻り値は登録済みのハンドルと、今回追加したかどうか。
    /// 既に同じパスのルームがあれば `room` は破棄される。
    async fn insert_if_absent(&self, room: Room) -> (RoomHandle, bool);

    /// ルームを削除（存在しなければ false）
    async fn remove(&self, path: &FolderPath) -> bool;

    /// 全ルームを取得
    async fn all(&self) -> Vec<(FolderPath, RoomHandle)>;

    /// ルーム数を取得
    async fn count(&self) -> usize;
}
