//! UseCase layer
//!
//! ドメインモデルとインターフェースを組み合わせて、アプリケーションの操作を実装します。
//!
//! - `PageFetcher`: ストアの件数からページ計画を立て、1 ページ分を取得する
//! - `Navigator`: ルームの生成と、ウィンドウ内のカーソル移動・ページ送り
//! - `JoinSlideshowUseCase` / `StepImageUseCase` / `GotoImageUseCase`: 接続からの操作
//! - `TickRoomsUseCase`: 1 秒ごとのカウントダウン・自動送り・アイドルなルームの削除
//! - `GetRoomsUseCase`: ルーム一覧の取得

pub mod error;
pub mod get_rooms;
pub mod goto_image;
pub mod join_slideshow;
pub mod navigator;
pub mod page_fetcher;
pub mod step_image;
pub mod tick_rooms;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{GotoImageError, JoinSlideshowError, NavigateError, StepImageError, TickError};
pub use get_rooms::GetRoomsUseCase;
pub use goto_image::GotoImageUseCase;
pub use join_slideshow::JoinSlideshowUseCase;
pub use navigator::{Navigator, StepDirection};
pub use page_fetcher::PageFetcher;
pub use step_image::StepImageUseCase;
pub use tick_rooms::{RoomTick, TickReport, TickRoomsUseCase};
