//! Home screen controller.
//!
//! Wraps a [`TaskStore`] with the interaction rules of the Home screen:
//! `add`, `delete` and `clear_completed` hold a busy gate for a fixed delay
//! before mutating, destructive actions go through a [`Confirmer`], and
//! `toggle` is applied immediately. Every started operation runs to
//! completion; there is no queue and no cancellation.

use crate::confirm::{ConfirmRequest, Confirmer};
use crate::error::AppError;
use crate::model::{FilterMode, Task, TaskId};
use crate::store::{Snapshot, TaskStore};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Result of an operation that may be skipped or turned down by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    /// The user answered no; nothing changed.
    Declined,
    /// There was nothing to act on; nothing changed.
    Skipped,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Called with the busy snapshot once an operation takes the gate, before its delay.
pub type BusyListener = Arc<dyn Fn(&Snapshot) + Send + Sync>;

#[derive(Clone)]
pub struct HomeController {
    store: Arc<Mutex<TaskStore>>,
    confirmer: Arc<dyn Confirmer>,
    delay: Duration,
    busy_listener: Option<BusyListener>,
}

/// Clears the busy flag when the operation that raised it finishes.
struct BusyGate {
    store: Arc<Mutex<TaskStore>>,
}

impl Drop for BusyGate {
    fn drop(&mut self) {
        lock(&self.store).set_busy(false);
    }
}

fn lock(store: &Mutex<TaskStore>) -> MutexGuard<'_, TaskStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

impl HomeController {
    pub fn new(confirmer: Arc<dyn Confirmer>) -> Self {
        Self {
            store: Arc::new(Mutex::new(TaskStore::new())),
            confirmer,
            delay: DEFAULT_DELAY,
            busy_listener: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_busy_listener(mut self, listener: BusyListener) -> Self {
        self.busy_listener = Some(listener);
        self
    }

    pub fn with_filter(self, filter: FilterMode) -> Self {
        lock(&self.store).set_filter(filter);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn store(&self) -> MutexGuard<'_, TaskStore> {
        lock(&self.store)
    }

    fn ensure_idle(&self, operation: &str) -> Result<(), AppError> {
        if self.store().is_busy() {
            warn!(operation, "rejected while another operation is pending");
            return Err(AppError::busy(format!(
                "cannot {operation} while another operation is pending"
            )));
        }
        Ok(())
    }

    fn acquire(&self, operation: &str) -> Result<BusyGate, AppError> {
        let busy_snapshot = {
            let mut store = self.store();
            if store.is_busy() {
                warn!(operation, "rejected while another operation is pending");
                return Err(AppError::busy(format!(
                    "cannot {operation} while another operation is pending"
                )));
            }
            store.set_busy(true);
            self.busy_listener.as_ref().map(|_| store.snapshot())
        };
        debug!(operation, delay_ms = self.delay.as_millis() as u64, "busy");

        let gate = BusyGate {
            store: Arc::clone(&self.store),
        };
        // Store lock is released here; the listener may read the controller.
        if let (Some(listener), Some(snapshot)) = (&self.busy_listener, busy_snapshot) {
            listener(&snapshot);
        }
        Ok(gate)
    }

    pub async fn add(&self, text: &str) -> Result<Task, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::invalid_input("task text is required"));
        }

        let _gate = self.acquire("add")?;
        tokio::time::sleep(self.delay).await;

        let task = self.store().add(text)?;
        info!(id = %task.id, text = %task.text, "task added");
        Ok(task)
    }

    /// Adds whatever is currently typed in the draft.
    pub async fn submit_draft(&self) -> Result<Task, AppError> {
        let draft = self.store().draft().to_string();
        self.add(&draft).await
    }

    pub fn toggle(&self, id: TaskId) -> Option<Task> {
        let toggled = self.store().toggle(id);
        match toggled.as_ref() {
            Some(task) => info!(id = %task.id, completed = task.completed, "task toggled"),
            None => debug!(id = %id, "toggle ignored, no such task"),
        }
        toggled
    }

    pub async fn delete(&self, id: TaskId) -> Result<Outcome<Task>, AppError> {
        self.ensure_idle("delete")?;

        let text = self.store().get(id).map(|task| task.text.clone());
        let Some(text) = text else {
            debug!(id = %id, "delete ignored, no such task");
            return Ok(Outcome::Skipped);
        };

        if !self.confirmer.confirm(&ConfirmRequest::DeleteTask { id, text }) {
            debug!(id = %id, "delete declined");
            return Ok(Outcome::Declined);
        }

        let _gate = self.acquire("delete")?;
        tokio::time::sleep(self.delay).await;

        let removed = self.store().delete(id);
        Ok(match removed {
            Some(task) => {
                info!(id = %task.id, "task deleted");
                Outcome::Applied(task)
            }
            None => Outcome::Skipped,
        })
    }

    pub async fn clear_completed(&self) -> Result<Outcome<Vec<Task>>, AppError> {
        self.ensure_idle("clear completed tasks")?;

        let count = self.store().completed_count();
        if count == 0 {
            return Ok(Outcome::Skipped);
        }

        if !self.confirmer.confirm(&ConfirmRequest::ClearCompleted { count }) {
            debug!(count, "clear completed declined");
            return Ok(Outcome::Declined);
        }

        let _gate = self.acquire("clear completed tasks")?;
        tokio::time::sleep(self.delay).await;

        let removed = self.store().clear_completed();
        info!(count = removed.len(), "completed tasks cleared");
        Ok(Outcome::Applied(removed))
    }

    pub fn set_filter(&self, mode: FilterMode) {
        self.store().set_filter(mode);
        debug!(filter = %mode, "filter changed");
    }

    pub fn set_draft(&self, text: &str) {
        self.store().set_draft(text);
    }

    pub fn is_busy(&self) -> bool {
        self.store().is_busy()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store().snapshot()
    }

    pub fn filtered_view(&self, mode: FilterMode) -> Vec<Task> {
        self.store()
            .filtered_view(mode)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn remaining_count(&self) -> usize {
        self.store().remaining_count()
    }

    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }
}
