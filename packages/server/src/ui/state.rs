//! Shared state handed to every handler.

use std::sync::Arc;

use crate::{
    domain::{LaunchId, MessagePusher},
    usecase::{GetRoomsUseCase, GotoImageUseCase, JoinSlideshowUseCase, StepImageUseCase},
};

/// Shared application state
pub struct AppState {
    /// 起動ごとに生成される ID
    pub launch_id: LaunchId,
    /// MessagePusher（接続の登録と通知）
    pub message_pusher: Arc<dyn MessagePusher>,
    pub join_slideshow_usecase: Arc<JoinSlideshowUseCase>,
    pub step_image_usecase: Arc<StepImageUseCase>,
    pub goto_image_usecase: Arc<GotoImageUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
}
