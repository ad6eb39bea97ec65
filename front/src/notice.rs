//! Self-expiring success notice.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{runtime::Handle, task::AbortHandle, time};
use tracing::debug;

pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Default)]
struct Slot {
    text: Option<String>,
    generation: u64,
}

/// Text shown after a successful mutation, cleared [`NOTICE_TTL`] after it
/// was last set.
///
/// Showing a new notice replaces the text and restarts the timer. The pending
/// expiry is aborted when the notice is dropped.
#[derive(Debug, Default)]
pub struct SuccessNotice {
    slot: Arc<Mutex<Slot>>,
    timer: Option<AbortHandle>,
}

impl SuccessNotice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, text: impl Into<String>) {
        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.text = Some(text.into());
            slot.generation
        };

        self.cancel_timer();

        let Ok(runtime) = Handle::try_current() else {
            debug!("no runtime, notice will not expire");
            return;
        };

        let slot = Arc::clone(&self.slot);
        let task = runtime.spawn(async move {
            time::sleep(NOTICE_TTL).await;

            let mut slot = lock(&slot);
            // a newer notice owns the slot now
            if slot.generation == generation {
                slot.text = None;
            }
        });

        self.timer = Some(task.abort_handle());
    }

    pub fn text(&self) -> Option<String> {
        lock(&self.slot).text.clone()
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for SuccessNotice {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
