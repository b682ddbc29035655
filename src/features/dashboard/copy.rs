//! Per-card "copied" indicator. Marking a card starts a timer that clears it
//! after [`COPIED_INDICATOR`]; marking it again restarts that card's timer
//! without touching the others.

use crate::app_lib::AppError;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, PoisonError,
};
use std::time::Duration;
use tokio::runtime::Handle;

pub const COPIED_INDICATOR: Duration = Duration::from_millis(2000);

#[derive(Clone, Default)]
pub struct CopyTracker {
    // card id -> generation of the timer allowed to clear it
    active: Arc<Mutex<HashMap<u32, u64>>>,
    generation: Arc<AtomicU64>,
}

impl CopyTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the indicator on `id` and schedules its reset.
    ///
    /// # Errors
    /// Returns `AppError::Config` outside a tokio runtime; the card stays
    /// unmarked.
    pub fn mark(&self, id: u32) -> Result<(), AppError> {
        let handle = Handle::try_current().map_err(|err| {
            AppError::Config(format!("Copy indicator needs a tokio runtime: {err}"))
        })?;
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, generation);

        let active = Arc::clone(&self.active);
        handle.spawn(async move {
            tokio::time::sleep(COPIED_INDICATOR).await;
            let mut active = active.lock().unwrap_or_else(PoisonError::into_inner);
            if active.get(&id) == Some(&generation) {
                active.remove(&id);
            }
        });
        Ok(())
    }

    #[must_use]
    pub fn is_copied(&self, id: u32) -> bool {
        self.lock().contains_key(&id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u32, u64>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
