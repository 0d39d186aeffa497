use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// One countdown second, tagged with the timer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub timer: u64,
}

/// Owned handle to a running tick task.
///
/// Dropping or cancelling the handle aborts the task, so no tick is produced
/// after the owner lets go of it.
#[derive(Debug)]
pub struct TimerHandle {
    id: u64,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub const PERIOD: Duration = Duration::from_secs(1);

    /// Spawn a task sending `TimerTick { timer: id }` to `sink` every `period`.
    ///
    /// The first tick fires one full period after spawning. Must be called
    /// from within a tokio runtime.
    #[must_use]
    pub fn spawn(id: u64, period: Duration, sink: mpsc::UnboundedSender<TimerTick>) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sink.send(TimerTick { timer: id }).is_err() {
                    break;
                }
            }
        });
        Self { id, task }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
