//! Drives one run of the app: the navigation stack, the Home controller
//! while Home is mounted, and dispatch of typed commands.

use crate::cli::Command;
use crate::screens::{self, Format};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use todoapp_core::config::{Config, Palette};
use todoapp_core::confirm::{ConfirmRequest, Confirmer, parse_answer};
use todoapp_core::controller::{BusyListener, DEFAULT_DELAY, HomeController, Outcome};
use todoapp_core::error::AppError;
use todoapp_core::model::FilterMode;
use todoapp_core::navigation::{Navigator, Screen, Transition};
use tracing::{debug, info};

/// Asks on stdout and reads the answer from stdin; end of input declines.
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, request: &ConfirmRequest) -> bool {
        print!("{} [y/N] ", request.prompt());
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(0) | Err(_) => {
                println!();
                false
            }
            Ok(_) => parse_answer(&answer),
        }
    }
}

pub struct Settings {
    pub delay: Duration,
    pub default_filter: FilterMode,
    pub confirmer: Arc<dyn Confirmer>,
    pub palette: Palette,
    pub format: Format,
    /// Handed to every mounted Home controller.
    pub busy_listener: Option<BusyListener>,
}

impl Settings {
    pub fn from_config(config: &Config, confirmer: Arc<dyn Confirmer>, format: Format) -> Self {
        Self {
            delay: config.delay().unwrap_or(DEFAULT_DELAY),
            default_filter: config.filter(),
            confirmer,
            palette: config.palette(),
            format,
            busy_listener: None,
        }
    }
}

pub struct Session {
    navigator: Navigator,
    home: Option<HomeController>,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            navigator: Navigator::new(),
            home: None,
            settings,
        }
    }

    pub fn current(&self) -> Screen {
        self.navigator.current()
    }

    pub fn home(&self) -> Option<&HomeController> {
        self.home.as_ref()
    }

    fn home_for(&self, command: &str) -> Result<&HomeController, AppError> {
        self.home.as_ref().ok_or_else(|| {
            AppError::invalid_input(format!("'{command}' is only available on the Home screen"))
        })
    }

    /// Drops the Home store when Home leaves the stack and creates a fresh one when it enters.
    fn apply(&mut self, transition: &Transition) {
        if transition.unmounts(Screen::Home)
            && let Some(home) = self.home.take()
        {
            info!(discarded = home.len(), "home unmounted, tasks discarded");
        }

        if transition.mounted() == Some(Screen::Home) {
            let mut controller = HomeController::new(Arc::clone(&self.settings.confirmer))
                .with_delay(self.settings.delay)
                .with_filter(self.settings.default_filter);
            if let Some(listener) = &self.settings.busy_listener {
                controller = controller.with_busy_listener(Arc::clone(listener));
            }
            self.home = Some(controller);
            debug!("home mounted with an empty store");
        }
    }

    pub fn navigate_to(&mut self, screen: Screen) {
        let transition = self.navigator.navigate_to(screen);
        self.apply(&transition);
    }

    pub fn render(&self) -> Result<String, AppError> {
        let snapshot = self.home.as_ref().map(HomeController::snapshot);
        screens::render(
            self.current(),
            snapshot.as_ref(),
            &self.settings.palette,
            self.settings.format,
        )
    }

    /// Runs one command. Returns a one-line notice for the user, if any.
    pub async fn handle(&mut self, command: Command) -> Result<Option<String>, AppError> {
        match command {
            Command::Start => {
                let next = match self.current() {
                    Screen::Welcome => Screen::Instructions,
                    Screen::Instructions => Screen::Home,
                    Screen::Home => {
                        return Err(AppError::invalid_input("already on the Home screen"));
                    }
                };
                self.navigate_to(next);
                Ok(None)
            }
            Command::Back => {
                let transition = self
                    .navigator
                    .go_back()
                    .ok_or_else(|| AppError::invalid_input("nothing to go back to"))?;
                self.apply(&transition);
                Ok(None)
            }
            Command::Go { screen } => {
                self.navigate_to(screen);
                Ok(None)
            }
            Command::Add { text } => {
                let home = self.home_for("add")?;
                if !text.is_empty() {
                    home.set_draft(&text.join(" "));
                }
                let task = home.submit_draft().await?;
                Ok(Some(format!("Added task: {} ({})", task.text, task.id)))
            }
            Command::Draft { text } => {
                self.home_for("draft")?.set_draft(&text.join(" "));
                Ok(None)
            }
            Command::Toggle { id } => {
                let toggled = self.home_for("toggle")?.toggle(id);
                Ok(toggled.map(|task| {
                    let verb = if task.completed { "Completed" } else { "Reopened" };
                    format!("{verb} task: {} ({})", task.text, task.id)
                }))
            }
            Command::Delete { id } => {
                let outcome = self.home_for("delete")?.delete(id).await?;
                Ok(match outcome {
                    Outcome::Applied(task) => {
                        Some(format!("Deleted task: {} ({})", task.text, task.id))
                    }
                    Outcome::Declined => Some("Delete cancelled".to_string()),
                    Outcome::Skipped => None,
                })
            }
            Command::ClearCompleted => {
                let outcome = self.home_for("clear-completed")?.clear_completed().await?;
                Ok(match outcome {
                    Outcome::Applied(removed) => {
                        let noun = if removed.len() == 1 { "task" } else { "tasks" };
                        Some(format!("Cleared {} completed {noun}", removed.len()))
                    }
                    Outcome::Declined => Some("Clear cancelled".to_string()),
                    Outcome::Skipped => Some("No completed tasks to clear".to_string()),
                })
            }
            Command::Filter { mode } => {
                self.home_for("filter")?.set_filter(mode);
                Ok(None)
            }
            Command::Show => Ok(None),
        }
    }
}
