//! インメモリ実装

pub mod picture;
pub mod room;
pub mod scanner;

pub use picture::InMemoryPictureStore;
pub use room::InMemoryRoomRepository;
pub use scanner::scan_pictures;
