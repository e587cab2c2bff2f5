//! Slash commands understood by the REPL.

/// Every command, as offered by completion and hints.
pub const COMMAND_NAMES: &[&str] = &["/next", "/restart", "/history", "/help", "/quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Restart,
    History,
    Help,
    Quit,
}

impl Command {
    /// Parses a trimmed input line.
    ///
    /// Returns `None` for anything that is not a command, including unknown
    /// slash words, which the caller reports separately.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "/next" => Some(Self::Next),
            "/restart" => Some(Self::Restart),
            "/history" => Some(Self::History),
            "/help" | "/?" => Some(Self::Help),
            "/quit" | "/exit" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }

    /// Commands answered without disturbing a half-typed or pending entry.
    ///
    /// `/next` is included because during a round it only reports that the
    /// round is still open.
    pub fn keeps_entry(self) -> bool {
        matches!(self, Self::Next | Self::History | Self::Help)
    }

    /// True when the line looks like a command attempt.
    pub fn looks_like_command(input: &str) -> bool {
        let trimmed = input.trim();
        trimmed.starts_with('/') && !trimmed.contains(char::is_whitespace)
    }
}

pub fn help_text() -> String {
    [
        "/next     start the next round after an accepted submission",
        "/restart  start over with a new base ingredient",
        "/history  show every judged round of this game",
        "/help     show this list",
        "/quit     leave the game (Ctrl-D works too)",
    ]
    .join("\n")
}
