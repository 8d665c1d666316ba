use clap::{Parser, Subcommand};
use todoapp_core::config::{ConfigOverrides, canonical_name};
use todoapp_core::error::AppError;
use todoapp_core::model::{FilterMode, TaskId};
use todoapp_core::navigation::Screen;

// Process-level flags, read once at launch.
#[derive(Parser, Debug)]
#[command(name = "todoapp", author, version, about, long_about = None)]
pub struct LaunchArgs {
    /// Render screens as JSON
    #[arg(long)]
    pub json: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Delay applied to add, delete and clear-completed, in milliseconds
    #[arg(long = "delay-ms", value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE")]
    pub config_override: Vec<String>,

    /// Log filter, e.g. `info` or `todoapp_core=debug` (defaults to $TODOAPP_LOG)
    #[arg(long = "log-level", value_name = "FILTER")]
    pub log_level: Option<String>,
}

// One line typed into the running app.
#[derive(Parser, Debug)]
#[command(
    name = "todoapp",
    about = "Commands available while the app is running",
    disable_version_flag = true
)]
pub struct Input {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Continue to the next screen
    ///
    /// Example: start
    Start,
    /// Return to the previous screen
    ///
    /// Example: back
    Back,
    /// Jump to a screen by name (welcome, instructions, home)
    ///
    /// Example: go home
    Go { screen: Screen },
    /// Add a task; without text, submits the current draft
    ///
    /// Example: add "Buy milk"
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Type into the new-task field without submitting
    ///
    /// Example: draft Walk the dog
    Draft {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Mark a task completed, or active again
    ///
    /// Example: toggle task-1
    Toggle { id: TaskId },
    /// Delete a task (asks for confirmation)
    ///
    /// Example: delete task-1
    Delete { id: TaskId },
    /// Remove every completed task (asks for confirmation)
    ///
    /// Example: clear-completed
    ClearCompleted,
    /// Choose which tasks are listed (all, active, completed)
    ///
    /// Example: filter active
    Filter { mode: FilterMode },
    /// Redraw the current screen
    ///
    /// Example: show
    Show,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    Alias(String),
    DelayMs,
    DefaultFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, AppError> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| AppError::invalid_input("override must be in KEY=VALUE format"))?;

    let value = value_raw.trim().to_string();
    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    let canonical_field = Some(canonical_name(field))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::invalid_input("override key cannot be empty"))?;

    let target = match canonical_field.as_str() {
        "aliases" | "alias" => {
            let alias_name = remainder
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| AppError::invalid_input("aliases override requires an alias name"))?;
            return Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Alias(alias_name.to_string()),
                value,
            });
        }
        "theme" => ConfigOverrideTarget::Theme,
        "delay_ms" | "delay" => ConfigOverrideTarget::DelayMs,
        "default_filter" | "filter" => ConfigOverrideTarget::DefaultFilter,
        other => {
            return Err(AppError::invalid_input(format!(
                "unknown config field '{other}'"
            )));
        }
    };

    if remainder.is_some() {
        return Err(AppError::invalid_input(format!(
            "{canonical_field} override cannot have subfields"
        )));
    }

    Ok(ParsedConfigOverride { target, value })
}

/// Fold every `--config-override` value into one set of overrides; later values win.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();

    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::Alias(name) => {
                overrides.aliases.insert(name, parsed.value);
            }
            ConfigOverrideTarget::DelayMs => {
                let millis = parsed.value.parse::<u64>().map_err(|_| {
                    AppError::invalid_input(format!(
                        "delay_ms must be a whole number of milliseconds, got '{}'",
                        parsed.value
                    ))
                })?;
                overrides.delay_ms = Some(millis);
            }
            ConfigOverrideTarget::DefaultFilter => {
                overrides.default_filter = Some(parsed.value.parse()?);
            }
        }
    }

    Ok(overrides)
}

/// Split a typed line into arguments, honouring double quotes and `\"` escapes.
pub fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

/// Collapse clap's multi-line rendering into `invalid_input` with its first line.
pub fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}
