//! UseCase: 1 秒ごとのルームの更新
//!
//! 全ルームについて次の処理を行います。
//!
//! 1. カウントダウンがアイドル期限を下回ったルームは、メンバーを確認せずに削除
//! 2. メンバーがいないルームはカウントダウンを 1 減らすだけ（取得もブロードキャストもしない）
//! 3. メンバーがいてカウントダウンが 0 以下なら、次の画像へ進めて全メンバーにブロードキャストし、
//!    カウントダウンをリセット
//! 4. それ以外はカウントダウンを 1 減らす
//!
//! ルームごとに別のタスクで処理するため、ストアの応答が遅いルームが他のルームを
//! 止めることはありません。前回の処理（または接続からの操作）がまだルームを
//! 保持している場合、そのルームはこの tick ではスキップします。
//! 1 つのルームの失敗はログに残し、他のルームの処理は続けます。

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::domain::{FolderPath, MessagePusher, RoomHandle, RoomRepository, ServerEvent};

use super::{
    error::TickError,
    navigator::{Navigator, StepDirection},
};

/// What happened to one room during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomTick {
    /// Removed after staying idle too long
    Evicted,
    /// Nobody watching; countdown decremented
    Unwatched,
    /// Watched; countdown decremented
    CountedDown,
    /// Watched and expired; advanced one picture and broadcast
    Advanced,
    /// Still held by an earlier tick or a viewer's step; left alone
    Busy,
}

/// Per-tick counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub evicted: usize,
    pub unwatched: usize,
    pub counted_down: usize,
    pub advanced: usize,
    pub busy: usize,
    pub failed: usize,
}

pub struct TickRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
    navigator: Arc<Navigator>,
    message_pusher: Arc<dyn MessagePusher>,
    idle_expiry_threshold: i64,
}

impl TickRoomsUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        navigator: Arc<Navigator>,
        message_pusher: Arc<dyn MessagePusher>,
        idle_expiry_threshold: i64,
    ) -> Self {
        Self {
            rooms,
            navigator,
            message_pusher,
            idle_expiry_threshold,
        }
    }

    /// Run one tick over every room, each room in its own task.
    ///
    /// Resolves once every room task has finished.
    pub async fn execute(self: Arc<Self>) -> TickReport {
        let mut tasks = JoinSet::new();
        for (path, handle) in self.rooms.all().await {
            let usecase = self.clone();
            tasks.spawn(async move {
                let outcome = usecase.tick_room(&path, &handle).await;
                (path, outcome)
            });
        }

        let mut report = TickReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(RoomTick::Evicted))) => report.evicted += 1,
                Ok((_, Ok(RoomTick::Unwatched))) => report.unwatched += 1,
                Ok((_, Ok(RoomTick::CountedDown))) => report.counted_down += 1,
                Ok((_, Ok(RoomTick::Advanced))) => report.advanced += 1,
                Ok((_, Ok(RoomTick::Busy))) => report.busy += 1,
                Ok((path, Err(e))) => {
                    tracing::error!("Tick failed for room '{}': {}", path, e);
                    report.failed += 1;
                }
                Err(e) => {
                    tracing::error!("Room tick task failed: {}", e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    pub async fn tick_room(
        &self,
        path: &FolderPath,
        handle: &RoomHandle,
    ) -> Result<RoomTick, TickError> {
        let Ok(mut room) = handle.try_lock() else {
            tracing::debug!("Room '{}' is busy, skipping this tick", path);
            return Ok(RoomTick::Busy);
        };

        if room.countdown() < self.idle_expiry_threshold {
            drop(room);
            self.rooms.remove(path).await;
            tracing::info!("Room '{}' evicted after staying idle", path);
            return Ok(RoomTick::Evicted);
        }

        let watched = self
            .message_pusher
            .members_of(path)
            .await
            .is_some_and(|members| !members.is_empty());
        if !watched {
            room.tick_down();
            return Ok(RoomTick::Unwatched);
        }
        if room.countdown() > 0 {
            room.tick_down();
            return Ok(RoomTick::CountedDown);
        }

        self.navigator
            .step(&mut room, StepDirection::Next.delta())
            .await?;
        room.reset_countdown(self.navigator.countdown_duration());
        let display_id = room.display_id().clone();
        drop(room);

        self.message_pusher
            .broadcast(path, &ServerEvent::NewImage(display_id))
            .await?;
        tracing::debug!("Room '{}' advanced automatically", path);

        Ok(RoomTick::Advanced)
    }
}
