//! Session domain model and its round state machine.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::error::SubmissionError;
use crate::judgment::JudgmentResult;
use crate::validation::normalize;

/// Where a session stands between player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Accepting ingredients for the current round.
    Active,
    /// The last submission was accepted; waiting for the player to advance.
    AwaitingNext,
    /// The last submission was rejected. Only a restart leaves this state.
    Inactive,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Active => write!(f, "active"),
            GameState::AwaitingNext => write!(f, "waiting for the next round"),
            GameState::Inactive => write!(f, "over"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Accepted,
    Rejected,
}

/// Snapshot of one resolved round. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub base: String,
    pub ingredients: Vec<String>,
    pub outcome: RoundOutcome,
    pub feedback: String,
    pub judged_at: DateTime<Utc>,
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.base)?;
        for ingredient in &self.ingredients {
            write!(f, ", `{ingredient}`")?;
        }
        let mark = match self.outcome {
            RoundOutcome::Accepted => "✅",
            RoundOutcome::Rejected => "❌",
        };
        write!(f, " → {mark} — {}", self.feedback)
    }
}

/// How a judged submission resolved the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundResolution {
    /// The dish works; the session now waits for [`Session::advance`].
    Accepted(RoundRecord),
    /// The dish does not work; the session is over.
    GameOver(RoundRecord),
}

/// The single mutable context of one playthrough.
///
/// Fields are private so the invariants hold: every accepted ingredient and
/// every base ever used is in `used_ingredients`, and after an advance the
/// base is one of the last accepted ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: String,
    round: u32,
    state: GameState,
    current_base: String,
    used_ingredients: BTreeSet<String>,
    last_accepted: Vec<String>,
    history: Vec<RoundRecord>,
}

impl Session {
    /// Starts round 1 with the given base.
    pub fn with_base(base: impl Into<String>) -> Self {
        let base = base.into().trim().to_string();
        let mut used_ingredients = BTreeSet::new();
        used_ingredients.insert(normalize(&base));
        Self {
            id: Uuid::new_v4().to_string(),
            round: 1,
            state: GameState::Active,
            current_base: base,
            used_ingredients,
            last_accepted: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Starts round 1 with a base drawn uniformly from `starters`.
    ///
    /// Returns `None` when `starters` is empty.
    pub fn start<R: Rng + ?Sized>(starters: &[String], rng: &mut R) -> Option<Self> {
        starters.choose(rng).map(|base| Self::with_base(base.as_str()))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == GameState::Active
    }

    pub fn is_awaiting_next(&self) -> bool {
        self.state == GameState::AwaitingNext
    }

    pub fn current_base(&self) -> &str {
        &self.current_base
    }

    /// Normalized names of every ingredient used so far, bases included.
    pub fn used_ingredients(&self) -> &BTreeSet<String> {
        &self.used_ingredients
    }

    pub fn last_accepted(&self) -> &[String] {
        &self.last_accepted
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Number of ingredient fields this round asks for.
    pub fn required_ingredients(&self) -> usize {
        self.round as usize + 1
    }

    /// Everything a new submission must not repeat.
    pub fn prior_ingredients(&self) -> impl Iterator<Item = &str> {
        self.used_ingredients
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.current_base.as_str()))
    }

    /// Checks that the session accepts a submission of `count` ingredients.
    pub fn ensure_accepting(&self, count: usize) -> Result<(), SubmissionError> {
        if self.state != GameState::Active {
            return Err(SubmissionError::NotAccepting { state: self.state });
        }
        let expected = self.required_ingredients();
        if count != expected {
            return Err(SubmissionError::IngredientCount {
                round: self.round,
                expected,
                actual: count,
            });
        }
        Ok(())
    }

    /// Folds a judgment into the session.
    ///
    /// Viable and non-viable results resolve the round. Unparseable replies
    /// and transport errors leave the session untouched and come back as
    /// retryable errors.
    pub fn apply_judgment(
        &mut self,
        ingredients: Vec<String>,
        judgment: JudgmentResult,
    ) -> Result<RoundResolution, SubmissionError> {
        self.ensure_accepting(ingredients.len())?;

        let (outcome, feedback) = match judgment {
            JudgmentResult::Viable(explanation) => (RoundOutcome::Accepted, explanation),
            JudgmentResult::NotViable(explanation) => (RoundOutcome::Rejected, explanation),
            JudgmentResult::Unparseable(raw) => {
                return Err(SubmissionError::JudgmentUnparseable { raw });
            }
            JudgmentResult::TransportError(message) => {
                return Err(SubmissionError::JudgmentTransport { message });
            }
        };

        let ingredients: Vec<String> = ingredients
            .into_iter()
            .map(|ingredient| ingredient.trim().to_string())
            .collect();

        let record = RoundRecord {
            round: self.round,
            base: self.current_base.clone(),
            ingredients: ingredients.clone(),
            outcome,
            feedback,
            judged_at: Utc::now(),
        };
        self.history.push(record.clone());

        match outcome {
            RoundOutcome::Accepted => {
                self.used_ingredients
                    .extend(ingredients.iter().map(|ingredient| normalize(ingredient)));
                self.last_accepted = ingredients;
                self.state = GameState::AwaitingNext;
                info!(session = %self.id, round = self.round, "round accepted");
                Ok(RoundResolution::Accepted(record))
            }
            RoundOutcome::Rejected => {
                self.state = GameState::Inactive;
                info!(session = %self.id, round = self.round, "round rejected, game over");
                Ok(RoundResolution::GameOver(record))
            }
        }
    }

    /// Moves to the next round with a base drawn from the last accepted set.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&str, SubmissionError> {
        if self.state != GameState::AwaitingNext {
            return Err(SubmissionError::NotAdvancing { state: self.state });
        }
        let Some(next_base) = self.last_accepted.choose(rng).cloned() else {
            return Err(SubmissionError::NotAdvancing { state: self.state });
        };

        self.round += 1;
        self.used_ingredients.insert(normalize(&next_base));
        self.current_base = next_base;
        self.state = GameState::Active;
        info!(session = %self.id, round = self.round, base = %self.current_base, "advanced");
        Ok(&self.current_base)
    }
}
