//! UseCase: ルームの生成とウィンドウの回転
//!
//! ## ウィンドウの回転
//!
//! カーソルは 1 回の操作で 1 つだけ動きます。
//!
//! - ウィンドウ内に収まる場合: カーソルを動かすだけ（再取得なし）
//! - 先頭より前に出た場合: 前のページを取得し、カーソルをその末尾に置く
//! - 末尾より後に出た場合: 次のページを取得し、カーソルをその先頭に置く
//!
//! ページ送りは 1 回の操作につき必ず 1 回だけで、複数ページをまたぐ追従はしません。
//! 移動後に表示中の画像を既読にします。

use std::sync::Arc;

use utsushie_shared::time::Clock;

use crate::domain::{
    DisplayId, FolderPath, PageTransition, Room, RoomHandle, RoomRepository, WindowAnchor,
};

use super::{error::NavigateError, page_fetcher::PageFetcher};

/// Single-position cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Previous,
    Stay,
    Next,
}

impl StepDirection {
    pub fn delta(self) -> i64 {
        match self {
            Self::Previous => -1,
            Self::Stay => 0,
            Self::Next => 1,
        }
    }
}

pub struct Navigator {
    rooms: Arc<dyn RoomRepository>,
    fetcher: PageFetcher,
    clock: Arc<dyn Clock>,
    countdown_duration: i64,
}

impl Navigator {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        fetcher: PageFetcher,
        clock: Arc<dyn Clock>,
        countdown_duration: i64,
    ) -> Self {
        Self {
            rooms,
            fetcher,
            clock,
            countdown_duration,
        }
    }

    pub fn countdown_duration(&self) -> i64 {
        self.countdown_duration
    }

    /// Look the room up, seeding it from a random entry page when absent.
    pub async fn get_or_create_room(&self, path: &FolderPath) -> Result<RoomHandle, NavigateError> {
        let (handle, _) = self.find_or_create(path).await?;
        Ok(handle)
    }

    /// Move the room's cursor by one position and return the new display id.
    ///
    /// A room created by this call is only seeded: the direction is ignored.
    pub async fn navigate(
        &self,
        path: &FolderPath,
        direction: StepDirection,
    ) -> Result<DisplayId, NavigateError> {
        let (handle, created) = self.find_or_create(path).await?;
        let mut room = handle.lock().await;
        if !created {
            self.step(&mut room, direction.delta()).await?;
        }
        Ok(room.display_id().clone())
    }

    /// Rotate the window by `delta` (expected in `-1..=1`).
    ///
    /// On a store failure the room is left untouched.
    pub async fn step(&self, room: &mut Room, delta: i64) -> Result<(), NavigateError> {
        let target = room.cursor() as i64 + delta;
        let len = room.window().len() as i64;

        if (0..len).contains(&target) {
            room.move_to(target as usize);
        } else {
            let (transition, anchor) = if target < 0 {
                (PageTransition::Previous, WindowAnchor::Last)
            } else {
                (PageTransition::Next, WindowAnchor::First)
            };
            let plan = self
                .fetcher
                .plan_pages(room.path(), Some(room.page_plan().page), transition)
                .await?;
            let window = self.fetcher.fetch_page(room.path(), plan.page).await?;
            tracing::debug!(
                "Room '{}' rotated to page {}/{} ({} pictures)",
                room.path(),
                plan.page,
                plan.total_pages,
                window.len()
            );
            room.load_window(plan, window, anchor);
        }

        if let Some(current) = room.current_picture() {
            // the cursor already moved; a failed mark only loses the seen flag
            if let Err(e) = self.fetcher.mark_read(current).await {
                tracing::warn!("Failed to mark '{}' as seen: {}", current, e);
            }
        }

        Ok(())
    }

    async fn find_or_create(&self, path: &FolderPath) -> Result<(RoomHandle, bool), NavigateError> {
        if let Some(handle) = self.rooms.find(path).await {
            return Ok((handle, false));
        }

        let plan = self
            .fetcher
            .plan_pages(path, None, PageTransition::Stay)
            .await?;
        let window = self.fetcher.fetch_page(path, plan.page).await?;
        let room = Room::new(
            path.clone(),
            plan,
            window,
            self.countdown_duration,
            self.clock.now_millis(),
        );

        Ok(self.rooms.insert_if_absent(room).await)
    }
}
