use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::debug;

use recipe_core::session::GameState;
use recipe_core::Session;

use crate::app::App;
use crate::commands::{COMMAND_NAMES, Command, help_text};
use crate::display;

/// Completion, highlighting and hints for slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMAND_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Result of reading one round's worth of fields.
enum Entry {
    Submit(Vec<String>),
    Command(Command),
    Cancelled,
    Exit,
}

/// Result of reading a single line.
enum Line {
    Text(String),
    Cancelled,
    Exit,
}

struct Repl {
    app: App,
    session: Session,
    editor: Editor<CliHelper, DefaultHistory>,
    /// Ingredients kept after a judge-side failure, resent on a bare Enter.
    pending: Option<Vec<String>>,
}

pub async fn run(mut app: App) -> Result<()> {
    let mut editor: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CliHelper::new()));

    let session = app.game.new_session(&mut app.rng);
    let mut repl = Repl {
        app,
        session,
        editor,
        pending: None,
    };

    display::banner();
    repl.run().await
}

impl Repl {
    async fn run(&mut self) -> Result<()> {
        // (session id, round) whose header was last printed
        let mut announced: Option<(String, u32)> = None;

        loop {
            let keep_going = match self.session.state() {
                GameState::Active => {
                    let current = (self.session.id().to_string(), self.session.round());
                    if announced.as_ref() != Some(&current) {
                        display::round_header(&self.session);
                        announced = Some(current);
                    }
                    self.play_round().await?
                }
                GameState::AwaitingNext => self.between_rounds("next> ")?,
                GameState::Inactive => self.between_rounds("game over> ")?,
            };

            if !keep_going {
                println!("{}", "Goodbye!".bright_green());
                return Ok(());
            }
        }
    }

    /// Reads and submits one round. Returns false when the player leaves.
    async fn play_round(&mut self) -> Result<bool> {
        let ingredients = match self.pending.take() {
            Some(pending) => match self.read_line(">> ")? {
                Line::Text(text) if text.trim().is_empty() => pending,
                Line::Text(text) => match Command::parse(&text) {
                    Some(command) => {
                        if command.keeps_entry() {
                            self.pending = Some(pending);
                        }
                        return self.handle_command(command);
                    }
                    None => {
                        display::info("Starting the round over.");
                        return Ok(true);
                    }
                },
                Line::Cancelled => {
                    display::info("Entry cancelled.");
                    return Ok(true);
                }
                Line::Exit => return Ok(false),
            },
            None => match self.read_entry()? {
                Entry::Submit(ingredients) => ingredients,
                Entry::Command(command) => return self.handle_command(command),
                Entry::Cancelled => {
                    display::info("Entry cancelled.");
                    return Ok(true);
                }
                Entry::Exit => return Ok(false),
            },
        };

        println!("{}", "Asking the judge...".bright_black());
        match self.app.game.submit(&mut self.session, &ingredients).await {
            Ok(resolution) => display::resolution(&resolution),
            Err(err) => {
                display::submission_error(&err);
                if err.is_retryable() {
                    self.pending = Some(ingredients);
                }
            }
        }
        Ok(true)
    }

    /// Prompts for each field of the current round in turn.
    ///
    /// Commands that keep the entry are answered in place and the same field
    /// is asked again. `/restart` and `/quit` interrupt it.
    fn read_entry(&mut self) -> Result<Entry> {
        let required = self.session.required_ingredients();
        let mut fields = Vec::with_capacity(required);

        while fields.len() < required {
            let prompt = format!("Ingredient {}/{required}: ", fields.len() + 1);
            let text = match self.read_line(&prompt)? {
                Line::Text(text) => text,
                Line::Cancelled => return Ok(Entry::Cancelled),
                Line::Exit => return Ok(Entry::Exit),
            };

            if let Some(command) = Command::parse(&text) {
                if !command.keeps_entry() {
                    return Ok(Entry::Command(command));
                }
                self.handle_command(command)?;
                continue;
            }
            if Command::looks_like_command(&text) {
                display::warning(&format!("Unknown command: {}", text.trim()));
                continue;
            }

            fields.push(text);
        }

        Ok(Entry::Submit(fields))
    }

    /// Handles input while the session waits for /next or /restart.
    fn between_rounds(&mut self, prompt: &str) -> Result<bool> {
        let text = match self.read_line(prompt)? {
            Line::Text(text) => text,
            Line::Cancelled => {
                display::info("Type 'quit' to exit.");
                return Ok(true);
            }
            Line::Exit => return Ok(false),
        };

        if text.trim().is_empty() && self.session.is_awaiting_next() {
            return self.handle_command(Command::Next);
        }
        match Command::parse(&text) {
            Some(command) => self.handle_command(command),
            None => {
                let hint = if self.session.is_awaiting_next() {
                    "Press Enter or type /next to continue."
                } else {
                    "The game is over. Type /restart to play again."
                };
                display::warning(hint);
                Ok(true)
            }
        }
    }

    fn handle_command(&mut self, command: Command) -> Result<bool> {
        debug!(?command, state = %self.session.state(), "command");
        match command {
            Command::Next => {
                match self.app.game.advance(&mut self.session, &mut self.app.rng) {
                    Ok(base) => debug!(%base, "next round"),
                    Err(err) => display::warning(&err.to_string()),
                }
            }
            Command::Restart => {
                self.pending = None;
                self.app.game.restart(&mut self.session, &mut self.app.rng);
                display::info("New game started.");
            }
            Command::History => display::history(self.session.history()),
            Command::Help => println!("{}", help_text()),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn read_line(&mut self, prompt: &str) -> Result<Line> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Line::Text(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Line::Cancelled),
            Err(ReadlineError::Eof) => Ok(Line::Exit),
            Err(err) => Err(err.into()),
        }
    }
}
