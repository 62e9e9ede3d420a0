//! Domain layer: value objects, entities, paging rules and the interfaces
//! the engine needs from the outside world.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod paging;
pub mod repository;
pub mod value_object;

pub use entity::{PagePlan, Room, RoomSnapshot, WindowAnchor};
pub use error::{MessagePushError, StoreError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel, ServerEvent};
pub use paging::{PageTransition, plan_pages, total_pages};
pub use repository::{LatestPictureSetter, PictureStore, RoomHandle, RoomRepository};
pub use value_object::{ConnectionId, DisplayId, FolderPath, LaunchId, PictureId};
