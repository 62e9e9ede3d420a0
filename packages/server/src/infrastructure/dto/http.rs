//! HTTP API response DTOs.

use serde::Serialize;

/// Summary of a live room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummaryDto {
    pub path: String,
    pub display_id: String,
    pub page: u64,
    pub total_pages: u64,
    pub unread_count: u64,
    pub total_count: u64,
    pub cursor: usize,
    pub window_len: usize,
    pub countdown: i64,
    pub members: usize,
    /// RFC 3339
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchIdDto {
    pub launch_id: String,
}
