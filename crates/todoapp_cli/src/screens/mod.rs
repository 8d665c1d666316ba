//! Terminal presenters for the three screens.
//!
//! Presenters are pure: they turn static content or a Home [`Snapshot`]
//! into text and never touch the store.

mod home;
mod instructions;
mod welcome;

pub use home::render_home;
pub use instructions::{INSTRUCTIONS, Instruction, render_instructions};
pub use welcome::render_welcome;

use std::sync::Arc;
use todoapp_core::config::Palette;
use todoapp_core::controller::BusyListener;
use todoapp_core::error::AppError;
use todoapp_core::navigation::Screen;
use todoapp_core::store::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Plain,
    Json,
}

pub fn render(
    screen: Screen,
    home: Option<&Snapshot>,
    palette: &Palette,
    format: Format,
) -> Result<String, AppError> {
    match screen {
        Screen::Welcome => Ok(render_welcome(palette, format)),
        Screen::Instructions => Ok(render_instructions(palette, format)),
        Screen::Home => {
            let snapshot =
                home.ok_or_else(|| AppError::invalid_data("home screen is not mounted"))?;
            Ok(render_home(snapshot, palette, format))
        }
    }
}

/// Prints the Home screen to stdout while an add, delete or clear is pending.
pub fn busy_printer(palette: Palette, format: Format) -> BusyListener {
    Arc::new(move |snapshot: &Snapshot| {
        println!("{}", render_home(snapshot, &palette, format));
    })
}

fn header(screen: Screen, palette: &Palette) -> String {
    let title = screen.title();
    let rule = "=".repeat(title.chars().count() + 6);
    format!("{rule}\n{}\n{rule}\n", palette.accentize(&format!("== {title} ==")))
}

#[cfg(test)]
mod tests {
    use super::{Format, render};
    use todoapp_core::config::Palette;
    use todoapp_core::navigation::Screen;

    #[test]
    fn render_home_without_snapshot_is_an_error() {
        let palette = Palette::PLAIN;
        let err = render(Screen::Home, None, &palette, Format::Plain).unwrap_err();
        assert_eq!(err.code(), "invalid_data");
    }

    #[test]
    fn render_welcome_needs_no_snapshot() {
        let palette = Palette::PLAIN;
        let text = render(Screen::Welcome, None, &palette, Format::Plain).unwrap();
        assert!(text.contains("Welcome to TodoApp!"));
    }
}
