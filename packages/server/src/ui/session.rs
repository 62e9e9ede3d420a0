//! Per-connection event dispatch.
//!
//! 接続ごとに `Unjoined → Joined(path)` の状態を持ち、クライアントからの
//! イベントを対応する UseCase に振り分けます。失敗はログに残し、接続は維持します。

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, FolderPath, ServerEvent},
    infrastructure::dto::websocket::ClientMessage,
    usecase::StepDirection,
};

use super::state::AppState;

/// Join state of one connection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unjoined,
    Joined(FolderPath),
}

pub struct ConnectionSession {
    connection_id: ConnectionId,
    state: SessionState,
    app: Arc<AppState>,
}

impl ConnectionSession {
    pub fn new(connection_id: ConnectionId, app: Arc<AppState>) -> Self {
        Self {
            connection_id,
            state: SessionState::Unjoined,
            app,
        }
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub async fn handle(&mut self, message: ClientMessage) {
        match message {
            ClientMessage::GetLaunchId { ack } => {
                let value = Some(self.app.launch_id.as_str().to_string());
                self.reply(ack, value).await;
            }
            ClientMessage::JoinSlideshow { path } => self.join(path).await,
            ClientMessage::PrevImage => self.step(StepDirection::Previous).await,
            ClientMessage::NextImage => self.step(StepDirection::Next).await,
            ClientMessage::GotoImage { ack } => self.goto(ack).await,
        }
    }

    async fn join(&mut self, path: String) {
        let path = match FolderPath::new(path) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("'{}' sent an invalid path: {}", self.connection_id, e);
                return;
            }
        };

        self.state = SessionState::Joined(path.clone());
        match self
            .app
            .join_slideshow_usecase
            .execute(&self.connection_id, &path)
            .await
        {
            Ok(display_id) => {
                tracing::info!(
                    "'{}' joined '{}' at '{}'",
                    self.connection_id,
                    path,
                    display_id
                );
            }
            Err(e) => {
                tracing::error!("'{}' failed to join '{}': {}", self.connection_id, path, e);
            }
        }
    }

    async fn step(&self, direction: StepDirection) {
        let SessionState::Joined(path) = &self.state else {
            tracing::debug!("'{}' stepped before joining", self.connection_id);
            return;
        };

        if let Err(e) = self.app.step_image_usecase.execute(path, direction).await {
            tracing::error!("Failed to step '{}' ({:?}): {}", path, direction, e);
        }
    }

    async fn goto(&self, ack: u64) {
        let value = match &self.state {
            SessionState::Unjoined => None,
            SessionState::Joined(path) => match self.app.goto_image_usecase.execute(path).await {
                Ok(folder) => folder.map(FolderPath::into_string),
                Err(e) => {
                    tracing::error!("Failed to resolve goto for '{}': {}", path, e);
                    None
                }
            },
        };
        self.reply(ack, value).await;
    }

    async fn reply(&self, ack: u64, value: Option<String>) {
        let event = ServerEvent::Ack { ack, value };
        if let Err(e) = self
            .app
            .message_pusher
            .push_to(&self.connection_id, &event)
            .await
        {
            tracing::warn!("Failed to answer ack {}: {}", ack, e);
        }
    }
}
