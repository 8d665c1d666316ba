use crate::error::AppError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Welcome,
    Instructions,
    Home,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Instructions => "Instructions",
            Self::Home => "Home",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "My Todo App",
            other => other.name(),
        }
    }

    /// Only Home carries a header bar; the onboarding screens are full-bleed.
    pub fn shows_header(self) -> bool {
        matches!(self, Self::Home)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Screen {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "welcome" => Ok(Self::Welcome),
            "instructions" => Ok(Self::Instructions),
            "home" => Ok(Self::Home),
            other => Err(AppError::invalid_input(format!("unknown screen '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
    /// Screens popped off the stack, topmost first.
    pub unmounted: Vec<Screen>,
}

impl Transition {
    /// The screen newly pushed by this transition, if any.
    pub fn mounted(&self) -> Option<Screen> {
        (self.from != self.to && self.unmounted.is_empty()).then_some(self.to)
    }

    pub fn unmounts(&self, screen: Screen) -> bool {
        self.unmounted.contains(&screen)
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::starting_at(Screen::Welcome)
    }

    pub fn starting_at(screen: Screen) -> Self {
        Self {
            stack: vec![screen],
        }
    }

    pub fn current(&self) -> Screen {
        // The root entry is never popped.
        self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    /// Pushes `screen`, or pops back to it when it is already on the stack.
    pub fn navigate_to(&mut self, screen: Screen) -> Transition {
        let from = self.current();
        let mut unmounted = Vec::new();

        if let Some(index) = self.stack.iter().position(|entry| *entry == screen) {
            while self.stack.len() > index + 1 {
                if let Some(popped) = self.stack.pop() {
                    unmounted.push(popped);
                }
            }
        } else {
            self.stack.push(screen);
        }

        info!(from = %from, to = %screen, "navigate");
        Transition {
            from,
            to: screen,
            unmounted,
        }
    }

    pub fn go_back(&mut self) -> Option<Transition> {
        if !self.can_go_back() {
            return None;
        }

        let from = self.stack.pop()?;
        let to = self.current();
        info!(from = %from, to = %to, "back");
        Some(Transition {
            from,
            to,
            unmounted: vec![from],
        })
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
