//! Periodic room tick.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::{JoinHandle, JoinSet},
    time::{MissedTickBehavior, interval},
};

use crate::usecase::{TickReport, TickRoomsUseCase};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawn the loop running `usecase` once per `period`.
///
/// Ticks are started on schedule without waiting for the previous one, so a
/// room stuck on a slow store query never holds back the others. A panicking
/// tick is logged and the loop keeps going. Aborting the returned handle also
/// aborts every tick still in flight.
pub fn spawn_tick_scheduler(usecase: Arc<TickRoomsUseCase>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight = JoinSet::new();
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            while let Some(finished) = in_flight.try_join_next() {
                log_tick(finished);
            }
            in_flight.spawn(usecase.clone().execute());
        }
    })
}

fn log_tick(finished: Result<TickReport, tokio::task::JoinError>) {
    match finished {
        Ok(report) if report != TickReport::default() => {
            tracing::trace!("Tick finished: {:?}", report);
        }
        Ok(_) => {}
        Err(e) => tracing::error!("Tick task failed: {}", e),
    }
}
