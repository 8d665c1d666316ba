use super::{Format, header};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use todoapp_core::config::Palette;
use todoapp_core::model::{FilterMode, Task};
use todoapp_core::navigation::Screen;
use todoapp_core::store::Snapshot;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl TaskRow {
    fn from_task(task: &Task, offset: UtcOffset, palette: &Palette) -> Self {
        let text = if task.completed {
            palette.mutedize(&task.text)
        } else {
            task.text.clone()
        };
        Self {
            id: task.id.to_string(),
            done: if task.completed { "[x]" } else { "[ ]" },
            text,
            created: display_time(&task.created_at, offset),
        }
    }
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Falls back to the stored text when it is not RFC 3339.
fn display_time(raw: &str, offset: UtcOffset) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|value| value.to_offset(offset).format(format).ok())
        .unwrap_or_else(|| raw.to_string())
}

fn filter_bar(active: FilterMode, palette: &Palette) -> String {
    FilterMode::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                palette.accentize(&format!("[{mode}]"))
            } else {
                palette.mutedize(&format!(" {mode} "))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn empty_message(filter: FilterMode) -> &'static str {
    match filter {
        FilterMode::All => "No tasks yet. Type `add <text>` to create one.",
        FilterMode::Active => "Nothing left to do.",
        FilterMode::Completed => "No completed tasks.",
    }
}

fn footer(snapshot: &Snapshot, palette: &Palette) -> String {
    let noun = if snapshot.remaining == 1 { "item" } else { "items" };
    let mut out = format!("{} {noun} left", snapshot.remaining);
    if snapshot.has_completed {
        out.push_str(&palette.mutedize("  ·  `clear-completed` removes finished tasks"));
    }
    out
}

pub fn render_home(snapshot: &Snapshot, palette: &Palette, format: Format) -> String {
    match format {
        Format::Json => serde_json::json!({
            "screen": "home",
            "title": Screen::Home.title(),
            "snapshot": snapshot,
        })
        .to_string(),
        Format::Plain => {
            let mut out = header(Screen::Home, palette);
            let draft = if snapshot.draft.is_empty() {
                palette.mutedize("Add new todo")
            } else {
                snapshot.draft.clone()
            };
            out.push_str(&format!("New: {draft}\n"));
            out.push_str(&format!("Show: {}\n\n", filter_bar(snapshot.filter, palette)));

            if snapshot.tasks.is_empty() {
                out.push_str(empty_message(snapshot.filter));
                out.push('\n');
            } else {
                let offset = local_offset();
                let rows = snapshot
                    .tasks
                    .iter()
                    .map(|task| TaskRow::from_task(task, offset, palette));
                let mut table = Table::new(rows);
                table.with(Style::sharp());
                out.push_str(&table.to_string());
                out.push('\n');
            }

            out.push('\n');
            out.push_str(&footer(snapshot, palette));
            out.push('\n');
            if snapshot.busy {
                out.push_str("working...\n");
            }
            out
        }
    }
}
