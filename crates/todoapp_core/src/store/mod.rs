//! In-memory task list owned by the Home screen.
//!
//! Every operation here is synchronous and side-effect free outside the
//! store itself. Busy gating and the artificial delay live in
//! [`crate::controller`].

use crate::error::AppError;
use crate::model::{FilterMode, IdGenerator, Task, TaskId};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Read-only view handed to the presentation layer after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub remaining: usize,
    pub busy: bool,
    pub filter: FilterMode,
    pub draft: String,
    pub has_completed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdGenerator,
    draft: String,
    filter: FilterMode,
    busy: bool,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: FilterMode) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn add(&mut self, text: &str) -> Result<Task, AppError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("task text is required"));
        }

        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;

        let task = Task {
            id: self.ids.next_id(),
            text: trimmed.to_string(),
            completed: false,
            created_at,
        };

        self.tasks.push(task.clone());
        self.draft.clear();

        Ok(task)
    }

    /// Flips `completed` on the matching task. Unknown ids are a no-op.
    pub fn toggle(&mut self, id: TaskId) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        Some(task.clone())
    }

    /// Removes the matching task. Unknown ids are a no-op.
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Removes every completed task and returns them in their original order.
    pub fn clear_completed(&mut self) -> Vec<Task> {
        let (removed, kept): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.completed);
        self.tasks = kept;
        removed
    }

    pub fn filtered_view(&self, mode: FilterMode) -> Vec<&Task> {
        self.tasks.iter().filter(|task| mode.matches(task)).collect()
    }

    /// Tasks matching the active filter.
    pub fn visible(&self) -> Vec<&Task> {
        self.filtered_view(self.filter)
    }

    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.len() - self.remaining_count()
    }

    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|task| task.completed)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.visible().into_iter().cloned().collect(),
            remaining: self.remaining_count(),
            busy: self.busy,
            filter: self.filter,
            draft: self.draft.clone(),
            has_completed: self.has_completed(),
        }
    }
}
