//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};

/// Client → server events, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "get-launchId")]
    GetLaunchId { ack: u64 },
    #[serde(rename = "join-slideshow")]
    JoinSlideshow { path: String },
    #[serde(rename = "prev-image")]
    PrevImage,
    #[serde(rename = "next-image")]
    NextImage,
    #[serde(rename = "goto-image")]
    GotoImage { ack: u64 },
}

/// Server → client message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    NewImage,
    Ack,
}

/// Picture a room is now showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewImageMessage {
    pub r#type: MessageType,
    pub display_id: String,
}

/// Answer to a request carrying an ack id (`value` is `null` when absent)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AckMessage {
    pub r#type: MessageType,
    pub ack: u64,
    pub value: Option<String>,
}
