//! Pre-judgment checks for submitted ingredients.
//!
//! Everything here is local and cheap: a submission that fails any check is
//! bounced back to the player before the remote judge is contacted.
//!
//! # Module Structure
//!
//! - `lexical`: per-ingredient predicates (`IngredientValidator`)
//! - `uniqueness`: cross-round repeat and near-duplicate detection
//! - `whitelist`: optional list of known ingredient names

mod lexical;
mod uniqueness;
mod whitelist;

pub use lexical::{IngredientValidator, ValidationFailure, ValidationOutcome};
pub use uniqueness::{UniquenessChecker, UniquenessConflict};
pub use whitelist::IngredientWhitelist;

/// Canonical form used for every comparison: trimmed, lower-cased, inner
/// whitespace collapsed to single spaces.
pub fn normalize(ingredient: &str) -> String {
    ingredient
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-cased words with surrounding punctuation stripped.
pub(crate) fn word_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}
