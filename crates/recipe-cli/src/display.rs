//! Colored terminal output for the REPL.

use colored::Colorize;
use recipe_core::session::{RoundRecord, SubmissionError};
use recipe_core::{RoundResolution, Session};

pub fn banner() {
    println!("{}", "=== Infinity Recipe ===".bright_magenta().bold());
    println!(
        "{}",
        "Add ingredients to the dish. Each round needs one more than the last.".bright_black()
    );
    println!("{}", "Type '/help' for commands, or 'quit' to exit.".bright_black());
    println!();
}

pub fn round_header(session: &Session) {
    println!(
        "{}",
        format!(
            "Round {}: the base is `{}`. Add {} ingredient(s).",
            session.round(),
            session.current_base(),
            session.required_ingredients()
        )
        .bright_cyan()
        .bold()
    );
}

pub fn resolution(resolution: &RoundResolution) {
    match resolution {
        RoundResolution::Accepted(record) => {
            println!("{}", format!("✅ {}", record.feedback).green());
            println!(
                "{}",
                "Press Enter or type /next for the next round.".bright_black()
            );
        }
        RoundResolution::GameOver(record) => {
            println!("{}", format!("❌ {}", record.feedback).red());
            println!(
                "{}",
                format!("Game over after {} round(s). Type /restart to play again.", record.round)
                    .red()
                    .bold()
            );
        }
    }
}

pub fn submission_error(err: &SubmissionError) {
    println!("{}", err.to_string().yellow());
    if err.is_retryable() {
        println!(
            "{}",
            "Press Enter to ask the judge again, or type anything else to start the round over."
                .bright_black()
        );
    }
}

pub fn history(records: &[RoundRecord]) {
    if records.is_empty() {
        println!("{}", "No rounds judged yet.".bright_black());
        return;
    }
    for record in records {
        println!("{}", history_line(record));
    }
}

fn history_line(record: &RoundRecord) -> String {
    format!("Round {}: {record}", record.round)
}

pub fn warning(message: &str) {
    println!("{}", message.yellow());
}

pub fn info(message: &str) {
    println!("{}", message.bright_black());
}
