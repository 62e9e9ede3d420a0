//! Route handlers.

mod http;
mod websocket;

pub use http::{get_launch_id, get_rooms, health_check};
pub use websocket::websocket_handler;
