//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    domain::{LaunchId, MessagePusher},
    usecase::{
        GetRoomsUseCase, GotoImageUseCase, JoinSlideshowUseCase, StepImageUseCase,
        TickRoomsUseCase,
    },
};

use super::{
    handler::{get_launch_id, get_rooms, health_check, websocket_handler},
    scheduler::{TICK_PERIOD, spawn_tick_scheduler},
    signal::shutdown_signal,
    state::AppState,
};

/// Slideshow server
///
/// Serves the WebSocket gateway and the HTTP API, and drives the room tick
/// loop while it runs.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     launch_id,
///     message_pusher,
///     join_slideshow_usecase,
///     step_image_usecase,
///     goto_image_usecase,
///     get_rooms_usecase,
///     tick_rooms_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    launch_id: LaunchId,
    /// MessagePusher（接続の登録と通知）
    message_pusher: Arc<dyn MessagePusher>,
    /// JoinSlideshowUseCase（スライドショー参加のユースケース）
    join_slideshow_usecase: Arc<JoinSlideshowUseCase>,
    /// StepImageUseCase（前後の画像への移動のユースケース）
    step_image_usecase: Arc<StepImageUseCase>,
    /// GotoImageUseCase（表示中の画像のフォルダへの移動のユースケース）
    goto_image_usecase: Arc<GotoImageUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// TickRoomsUseCase（1 秒ごとのルーム更新のユースケース）
    tick_rooms_usecase: Arc<TickRoomsUseCase>,
}

impl Server {
    pub fn new(
        launch_id: LaunchId,
        message_pusher: Arc<dyn MessagePusher>,
        join_slideshow_usecase: Arc<JoinSlideshowUseCase>,
        step_image_usecase: Arc<StepImageUseCase>,
        goto_image_usecase: Arc<GotoImageUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        tick_rooms_usecase: Arc<TickRoomsUseCase>,
    ) -> Self {
        Self {
            launch_id,
            message_pusher,
            join_slideshow_usecase,
            step_image_usecase,
            goto_image_usecase,
            get_rooms_usecase,
            tick_rooms_usecase,
        }
    }

    /// Run the slideshow server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Slideshow server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app_state = Arc::new(AppState {
            launch_id: self.launch_id,
            message_pusher: self.message_pusher,
            join_slideshow_usecase: self.join_slideshow_usecase,
            step_image_usecase: self.step_image_usecase,
            goto_image_usecase: self.goto_image_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
        });

        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/launch-id", get(get_launch_id))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let scheduler = spawn_tick_scheduler(self.tick_rooms_usecase, TICK_PERIOD);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        scheduler.abort();
        tracing::info!("Server shutdown complete");

        result.map_err(Into::into)
    }
}
