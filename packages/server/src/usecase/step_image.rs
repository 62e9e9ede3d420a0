//! UseCase: 前の画像・次の画像
//!
//! ルームのカーソルを 1 つ動かし、新しい display_id をルームの全メンバーに
//! ブロードキャストします（操作した接続だけではありません）。

use std::sync::Arc;

use crate::domain::{DisplayId, FolderPath, MessagePusher, ServerEvent};

use super::{
    error::StepImageError,
    navigator::{Navigator, StepDirection},
};

pub struct StepImageUseCase {
    navigator: Arc<Navigator>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl StepImageUseCase {
    pub fn new(navigator: Arc<Navigator>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            navigator,
            message_pusher,
        }
    }

    pub async fn execute(
        &self,
        path: &FolderPath,
        direction: StepDirection,
    ) -> Result<DisplayId, StepImageError> {
        let display_id = self.navigator.navigate(path, direction).await?;

        self.message_pusher
            .broadcast(path, &ServerEvent::NewImage(display_id.clone()))
            .await?;

        Ok(display_id)
    }
}
