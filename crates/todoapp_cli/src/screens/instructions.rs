use super::Format;
use todoapp_core::config::Palette;

pub const HEADING: &str = "How to Use";
pub const ACTION: &str = "Let's Get Started!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub glyph: &'static str,
    pub text: &'static str,
    pub command: &'static str,
}

pub const INSTRUCTIONS: [Instruction; 3] = [
    Instruction {
        glyph: "+",
        text: "Add tasks easily with the plus button",
        command: "add <text>",
    },
    Instruction {
        glyph: "✓",
        text: "Tap tasks to mark them as completed",
        command: "toggle <id>",
    },
    Instruction {
        glyph: "✗",
        text: "Swipe or press delete to remove tasks",
        command: "delete <id>",
    },
];

pub fn render_instructions(palette: &Palette, format: Format) -> String {
    match format {
        Format::Json => serde_json::json!({
            "screen": "instructions",
            "title": HEADING,
            "instructions": INSTRUCTIONS
                .iter()
                .map(|item| serde_json::json!({ "text": item.text, "command": item.command }))
                .collect::<Vec<_>>(),
            "action": { "label": ACTION, "command": "start" },
        })
        .to_string(),
        Format::Plain => {
            let mut out = format!("\n  {}\n\n", palette.accentize(HEADING));
            for item in &INSTRUCTIONS {
                out.push_str(&format!(
                    "  {}  {}  {}\n",
                    palette.accentize(item.glyph),
                    item.text,
                    palette.mutedize(&format!("({})", item.command))
                ));
            }
            out.push_str(&format!("\n  [ {ACTION} ]  (type `start`)\n"));
            out
        }
    }
}
