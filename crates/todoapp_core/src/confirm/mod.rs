use crate::model::TaskId;

/// A destructive action waiting on the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRequest {
    DeleteTask { id: TaskId, text: String },
    ClearCompleted { count: usize },
}

impl ConfirmRequest {
    pub fn prompt(&self) -> String {
        match self {
            Self::DeleteTask { text, .. } => format!("Delete task \"{text}\"?"),
            Self::ClearCompleted { count: 1 } => "Clear 1 completed task?".to_string(),
            Self::ClearCompleted { count } => format!("Clear {count} completed tasks?"),
        }
    }
}

pub trait Confirmer: Send + Sync {
    /// Returns `true` only when the user explicitly accepts.
    fn confirm(&self, request: &ConfirmRequest) -> bool;
}

pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _request: &ConfirmRequest) -> bool {
        true
    }
}

pub struct NeverConfirm;

impl Confirmer for NeverConfirm {
    fn confirm(&self, _request: &ConfirmRequest) -> bool {
        false
    }
}

/// Shared parsing for line-based answers: `y` or `yes`, any case.
pub fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
