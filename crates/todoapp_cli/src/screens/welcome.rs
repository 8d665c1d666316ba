use super::Format;
use todoapp_core::config::Palette;

pub const TITLE: &str = "Welcome to TodoApp!";
pub const SUBTITLE: &str = "Your personal task manager";
pub const ACTION: &str = "Get Started";

pub fn render_welcome(palette: &Palette, format: Format) -> String {
    match format {
        Format::Json => serde_json::json!({
            "screen": "welcome",
            "title": TITLE,
            "subtitle": SUBTITLE,
            "action": { "label": ACTION, "command": "start" },
        })
        .to_string(),
        Format::Plain => format!(
            "\n  {}\n  {}\n\n  [ {} ]  (type `start`)\n",
            palette.accentize(TITLE),
            palette.mutedize(SUBTITLE),
            ACTION
        ),
    }
}
