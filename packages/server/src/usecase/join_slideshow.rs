//! UseCase: スライドショーへの参加
//!
//! 接続をルームのメンバーにし、ルームを（なければ）生成して、
//! 現在の display_id を参加した接続にだけ送ります。カーソルは動かしません。

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayId, FolderPath, MessagePusher, ServerEvent};

use super::{error::JoinSlideshowError, navigator::Navigator};

pub struct JoinSlideshowUseCase {
    navigator: Arc<Navigator>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinSlideshowUseCase {
    pub fn new(navigator: Arc<Navigator>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            navigator,
            message_pusher,
        }
    }

    /// 参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(DisplayId)` - 参加した接続に送った display_id
    /// * `Err(JoinSlideshowError)` - ルームの生成または返信に失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        path: &FolderPath,
    ) -> Result<DisplayId, JoinSlideshowError> {
        self.message_pusher.join_room(connection_id, path).await;

        let handle = self.navigator.get_or_create_room(path).await?;
        let display_id = handle.lock().await.display_id().clone();

        self.message_pusher
            .push_to(connection_id, &ServerEvent::NewImage(display_id.clone()))
            .await?;

        Ok(display_id)
    }
}
