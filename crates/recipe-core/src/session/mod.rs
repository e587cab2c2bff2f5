//! Session domain module.
//!
//! This module contains the per-playthrough state, the round state machine
//! and the game runner that ties validation and judgment together.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `RoundRecord` and the state transitions
//! - `error`: `SubmissionError`, the recoverable failure taxonomy
//! - `game`: `RecipeGame`, one round end to end
//!
//! # Usage
//!
//! ```ignore
//! use recipe_core::session::{RecipeGame, Session, RoundResolution};
//!
//! let game = RecipeGame::new(&config, agent)?;
//! let mut session = game.new_session(&mut rand::thread_rng());
//! match game.submit(&mut session, &["basil", "mozzarella"]).await {
//!     Ok(RoundResolution::Accepted(record)) => { /* show record, offer next round */ }
//!     Ok(RoundResolution::GameOver(record)) => { /* offer restart */ }
//!     Err(err) => { /* show warning, nothing changed */ }
//! }
//! ```

mod error;
mod game;
mod model;

// Re-export public API
pub use error::SubmissionError;
pub use game::RecipeGame;
pub use model::{GameState, RoundOutcome, RoundRecord, RoundResolution, Session};
