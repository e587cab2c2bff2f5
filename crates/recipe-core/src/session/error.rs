use thiserror::Error;

use super::model::GameState;
use crate::validation::{UniquenessConflict, ValidationFailure};

/// Why a player action was refused.
///
/// Every variant is recoverable: the session is left exactly as it was and
/// no round is consumed. Losing the game is not an error, see
/// [`super::RoundResolution::GameOver`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("no ingredients accepted while the game is {state}")]
    NotAccepting { state: GameState },

    #[error("cannot start the next round while the game is {state}")]
    NotAdvancing { state: GameState },

    #[error("round {round} needs {expected} ingredients, got {actual}")]
    IngredientCount {
        round: u32,
        expected: usize,
        actual: usize,
    },

    #[error("ingredient {} (\"{ingredient}\"): {failure}", .index + 1)]
    Validation {
        index: usize,
        ingredient: String,
        failure: ValidationFailure,
    },

    #[error("{0}")]
    Uniqueness(#[from] UniquenessConflict),

    #[error("the judge gave an unexpected response, please try again (reply: {raw:?})")]
    JudgmentUnparseable { raw: String },

    #[error("could not reach the judge: {message}")]
    JudgmentTransport { message: String },
}

impl SubmissionError {
    /// True for failures on the judge side; resubmitting the same
    /// ingredients may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::JudgmentUnparseable { .. } | Self::JudgmentTransport { .. }
        )
    }

    /// True when the submission itself was refused before any judge call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::IngredientCount { .. } | Self::Validation { .. } | Self::Uniqueness(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_one_based() {
        let err = SubmissionError::Validation {
            index: 1,
            ingredient: "cheese and crackers".to_string(),
            failure: ValidationFailure::MultipleItems,
        };
        assert_eq!(
            err.to_string(),
            "ingredient 2 (\"cheese and crackers\"): multiple items"
        );
        assert!(err.is_local());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_judge_failures_are_retryable() {
        let err = SubmissionError::JudgmentTransport {
            message: "timeout".to_string(),
        };
        assert!(err.is_retryable());
        assert!(!err.is_local());
    }

    #[test]
    fn test_unparseable_message_shows_the_reply() {
        let err = SubmissionError::JudgmentUnparseable {
            raw: "Sounds yummy!\nTrust me.".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Sounds yummy!"));
        // Multi-line replies stay on one line
        assert!(!message.contains('\n'));
        assert!(err.is_retryable());
    }
}
