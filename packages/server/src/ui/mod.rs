//! Transport layer: axum router, WebSocket gateway and the tick scheduler.

mod handler;
mod scheduler;
mod server;
mod session;
mod signal;
pub mod state;

pub use scheduler::{TICK_PERIOD, spawn_tick_scheduler};
pub use server::Server;
pub use session::{ConnectionSession, SessionState};
