//! Runs one round end to end: local checks, judgment, state transition.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use super::error::SubmissionError;
use super::model::{RoundResolution, Session};
use crate::config::GameConfig;
use crate::error::{RecipeError, Result};
use crate::judgment::{JudgeAgent, JudgmentClient};
use crate::validation::{IngredientValidator, IngredientWhitelist, UniquenessChecker};

/// The game rules plus the judge, shared by every session.
///
/// Holds no per-session state; each operation takes the [`Session`] it acts on.
#[derive(Clone)]
pub struct RecipeGame {
    starter_bases: Vec<String>,
    validator: IngredientValidator,
    uniqueness: UniquenessChecker,
    judge: JudgmentClient,
}

impl RecipeGame {
    pub fn new(config: &GameConfig, agent: Arc<dyn JudgeAgent>) -> Result<Self> {
        let starter_bases: Vec<String> = config
            .starter_bases
            .iter()
            .map(|base| base.trim().to_string())
            .filter(|base| !base.is_empty())
            .collect();
        if starter_bases.is_empty() {
            return Err(RecipeError::config("starter_bases must not be empty"));
        }

        Ok(Self {
            starter_bases,
            validator: IngredientValidator::new(&config.rules),
            uniqueness: UniquenessChecker::new(&config.uniqueness),
            judge: JudgmentClient::new(agent, &config.judge)?,
        })
    }

    /// Only ingredients on `whitelist` will be accepted.
    pub fn with_whitelist(mut self, whitelist: Arc<IngredientWhitelist>) -> Self {
        self.validator = self.validator.with_whitelist(whitelist);
        self
    }

    pub fn starter_bases(&self) -> &[String] {
        &self.starter_bases
    }

    /// A fresh session on a random starter base.
    pub fn new_session<R: Rng + ?Sized>(&self, rng: &mut R) -> Session {
        match Session::start(&self.starter_bases, rng) {
            Some(session) => session,
            // starter_bases is checked non-empty in `new`
            None => Session::with_base(self.starter_bases[0].as_str()),
        }
    }

    /// Runs every local check without contacting the judge.
    ///
    /// Returns the trimmed ingredients ready for judgment.
    pub fn precheck<S: AsRef<str>>(
        &self,
        session: &Session,
        ingredients: &[S],
    ) -> std::result::Result<Vec<String>, SubmissionError> {
        session.ensure_accepting(ingredients.len())?;

        if let Some((index, failure)) = self.validator.first_failure(ingredients) {
            return Err(SubmissionError::Validation {
                index,
                ingredient: ingredients[index].as_ref().to_string(),
                failure,
            });
        }

        self.uniqueness
            .check(ingredients, session.prior_ingredients())?;

        Ok(ingredients
            .iter()
            .map(|ingredient| ingredient.as_ref().trim().to_string())
            .collect())
    }

    /// Submits one round of ingredients.
    ///
    /// Local failures return before the judge is contacted. Judge-side
    /// failures return a retryable error. In both cases `session` is
    /// unchanged.
    pub async fn submit<S: AsRef<str>>(
        &self,
        session: &mut Session,
        ingredients: &[S],
    ) -> std::result::Result<RoundResolution, SubmissionError> {
        let ingredients = match self.precheck(session, ingredients) {
            Ok(ingredients) => ingredients,
            Err(err) => {
                debug!(session = %session.id(), round = session.round(), error = %err, "submission refused locally");
                return Err(err);
            }
        };

        info!(
            session = %session.id(),
            round = session.round(),
            base = %session.current_base(),
            judge = self.judge.agent_name(),
            "judging submission"
        );
        let judgment = self
            .judge
            .judge(session.current_base(), &ingredients)
            .await;

        let resolution = session.apply_judgment(ingredients, judgment);
        if let Err(err) = &resolution {
            warn!(session = %session.id(), error = %err, "judgment not applied");
        }
        resolution
    }

    /// Starts the next round after an accepted submission.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        session: &mut Session,
        rng: &mut R,
    ) -> std::result::Result<String, SubmissionError> {
        session.advance(rng).map(str::to_string)
    }

    /// Throws the session away and starts over on a new starter base.
    pub fn restart<R: Rng + ?Sized>(&self, session: &mut Session, rng: &mut R) {
        *session = self.new_session(rng);
        info!(session = %session.id(), base = %session.current_base(), "session restarted");
    }
}
