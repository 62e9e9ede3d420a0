//! Entities
//!
//! ルーム（スライドショーのセッション）とページ計画を定義します。

use super::value_object::{DisplayId, FolderPath, PictureId};

/// Which page is loaded into a room and the totals it was derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagePlan {
    pub page: u64,
    pub total_pages: u64,
    pub unread_count: u64,
    pub total_count: u64,
}

/// Where the cursor lands after a new window is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAnchor {
    First,
    Last,
}

/// Per-folder slideshow session shared by every viewer of the folder.
///
/// The window and cursor are only mutated through methods that recompute the
/// display id in the same call, so `display_id` always encodes
/// `window[cursor]` (or is empty for an empty window).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    path: FolderPath,
    window: Vec<PictureId>,
    cursor: usize,
    countdown: i64,
    page_plan: PagePlan,
    display_id: DisplayId,
    created_at: i64,
}

impl Room {
    /// Create a room showing the first picture of `window`.
    pub fn new(
        path: FolderPath,
        page_plan: PagePlan,
        window: Vec<PictureId>,
        countdown: i64,
        created_at: i64,
    ) -> Self {
        let mut room = Self {
            path,
            window,
            cursor: 0,
            countdown,
            page_plan,
            display_id: DisplayId::empty(),
            created_at,
        };
        room.refresh_display_id();
        room
    }

    pub fn path(&self) -> &FolderPath {
        &self.path
    }

    pub fn window(&self) -> &[PictureId] {
        &self.window
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn countdown(&self) -> i64 {
        self.countdown
    }

    pub fn page_plan(&self) -> PagePlan {
        self.page_plan
    }

    pub fn display_id(&self) -> &DisplayId {
        &self.display_id
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Picture currently on display, `None` for an empty window.
    pub fn current_picture(&self) -> Option<&PictureId> {
        self.window.get(self.cursor)
    }

    /// Move the cursor inside the current window.
    ///
    /// Positions past the end are clamped to the last picture.
    pub fn move_to(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.window.len().saturating_sub(1));
        self.refresh_display_id();
    }

    /// Replace the window with a freshly fetched page.
    pub fn load_window(&mut self, page_plan: PagePlan, window: Vec<PictureId>, anchor: WindowAnchor) {
        self.cursor = match anchor {
            WindowAnchor::First => 0,
            WindowAnchor::Last => window.len().saturating_sub(1),
        };
        self.window = window;
        self.page_plan = page_plan;
        self.refresh_display_id();
    }

    pub fn tick_down(&mut self) {
        self.countdown -= 1;
    }

    pub fn reset_countdown(&mut self, countdown: i64) {
        self.countdown = countdown;
    }

    /// Read-only copy of the observable state
    pub fn snapshot(&self, member_count: usize) -> RoomSnapshot {
        RoomSnapshot {
            path: self.path.clone(),
            display_id: self.display_id.clone(),
            page_plan: self.page_plan,
            cursor: self.cursor,
            window_len: self.window.len(),
            countdown: self.countdown,
            member_count,
            created_at: self.created_at,
        }
    }

    fn refresh_display_id(&mut self) {
        self.display_id = self
            .current_picture()
            .map(DisplayId::encode)
            .unwrap_or_else(DisplayId::empty);
    }
}

/// Observable state of a room at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub path: FolderPath,
    pub display_id: DisplayId,
    pub page_plan: PagePlan,
    pub cursor: usize,
    pub window_len: usize,
    pub countdown: i64,
    pub member_count: usize,
    pub created_at: i64,
}
