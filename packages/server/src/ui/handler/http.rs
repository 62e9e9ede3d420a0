//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{LaunchIdDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Launch id of this process
pub async fn get_launch_id(State(state): State<Arc<AppState>>) -> Json<LaunchIdDto> {
    Json(LaunchIdDto {
        launch_id: state.launch_id.as_str().to_string(),
    })
}

/// Get list of live rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let snapshots = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let summaries = snapshots.iter().map(RoomSummaryDto::from).collect();

    Json(summaries)
}
