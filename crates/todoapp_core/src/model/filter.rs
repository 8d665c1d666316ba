use super::Task;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Active, FilterMode::Completed];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" | "done" => Ok(Self::Completed),
            other => Err(AppError::invalid_input(format!(
                "unknown filter '{other}' (expected all, active or completed)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FilterMode;

    #[test]
    fn filter_mode_parses_case_insensitively() {
        assert_eq!("ALL".parse::<FilterMode>().unwrap(), FilterMode::All);
        assert_eq!(" Active ".parse::<FilterMode>().unwrap(), FilterMode::Active);
        assert_eq!("completed".parse::<FilterMode>().unwrap(), FilterMode::Completed);
    }

    #[test]
    fn filter_mode_rejects_unknown_names() {
        let err = "someday".parse::<FilterMode>().unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn filter_mode_serializes_snake_case() {
        let json = serde_json::to_string(&FilterMode::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        assert_eq!(FilterMode::default(), FilterMode::All);
    }
}
