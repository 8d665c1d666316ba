use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ID_PREFIX: &str = "task-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(u64);

impl TaskId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ID_PREFIX}{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = AppError;

    /// Accepts `task-<n>` as well as a bare `<n>`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("id is required"));
        }

        let digits = trimmed.strip_prefix(ID_PREFIX).unwrap_or(trimmed);
        digits
            .parse::<u64>()
            .map(TaskId)
            .map_err(|_| AppError::invalid_input(format!("invalid task id '{trimmed}'")))
    }
}

impl TryFrom<String> for TaskId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}

/// Hands out strictly increasing ids; a value is never handed out twice.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, Task, TaskId};

    #[test]
    fn id_generator_is_monotonic() {
        let mut ids = IdGenerator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        let third = ids.next_id();

        assert!(first < second && second < third);
        assert_eq!(first.to_string(), "task-1");
        assert_eq!(third.value(), 3);
    }

    #[test]
    fn task_id_parses_prefixed_and_bare_forms() {
        assert_eq!("task-7".parse::<TaskId>().unwrap().value(), 7);
        assert_eq!(" 12 ".parse::<TaskId>().unwrap().value(), 12);
    }

    #[test]
    fn task_id_rejects_garbage() {
        let err = "task-abc".parse::<TaskId>().unwrap_err();
        assert_eq!(err.code(), "invalid_input");

        let err = "   ".parse::<TaskId>().unwrap_err();
        assert_eq!(err.message(), "id is required");
    }

    #[test]
    fn task_serializes_id_as_string() {
        let mut ids = IdGenerator::new();
        let task = Task {
            id: ids.next_id(),
            text: "demo".to_string(),
            completed: false,
            created_at: "2025-12-20T00:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "task-1");
        assert_eq!(json["completed"], false);

        let parsed: Task = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, task);
    }
}
