//! Conversion logic between DTOs and domain types.

use utsushie_shared::time::timestamp_to_rfc3339;

use crate::domain::{RoomSnapshot, ServerEvent};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → DTO
// ========================================

impl From<&RoomSnapshot> for http::RoomSummaryDto {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            path: snapshot.path.as_str().to_string(),
            display_id: snapshot.display_id.as_str().to_string(),
            page: snapshot.page_plan.page,
            total_pages: snapshot.page_plan.total_pages,
            unread_count: snapshot.page_plan.unread_count,
            total_count: snapshot.page_plan.total_count,
            cursor: snapshot.cursor,
            window_len: snapshot.window_len,
            countdown: snapshot.countdown,
            members: snapshot.member_count,
            created_at: timestamp_to_rfc3339(snapshot.created_at),
        }
    }
}

/// Serialize a server event into the JSON text frame sent to clients.
pub fn encode_server_event(event: &ServerEvent) -> Result<String, serde_json::Error> {
    match event {
        ServerEvent::NewImage(display_id) => serde_json::to_string(&dto::NewImageMessage {
            r#type: dto::MessageType::NewImage,
            display_id: display_id.as_str().to_string(),
        }),
        ServerEvent::Ack { ack, value } => serde_json::to_string(&dto::AckMessage {
            r#type: dto::MessageType::Ack,
            ack: *ack,
            value: value.clone(),
        }),
    }
}
