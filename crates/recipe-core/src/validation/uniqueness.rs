//! Cross-round repeat and near-duplicate detection.

use std::collections::HashSet;

use thiserror::Error;

use super::{normalize, word_tokens};
use crate::config::UniquenessConfig;

/// Why a submission was refused as a repeat.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UniquenessConflict {
    #[error("\"{ingredient}\" has already been used")]
    Repeated { ingredient: String },

    #[error("\"{ingredient}\" was entered more than once")]
    DuplicateInSubmission { ingredient: String },

    #[error("\"{ingredient}\" shares the word \"{word}\" with an earlier ingredient")]
    SharedWord { ingredient: String, word: String },

    #[error("\"{first}\" and \"{second}\" are too similar ({score:.2})")]
    TooSimilar {
        first: String,
        second: String,
        score: f64,
    },
}

/// Compares a submission with the ingredients already in play.
#[derive(Debug, Clone)]
pub struct UniquenessChecker {
    token_overlap: bool,
    similarity_threshold: Option<f64>,
}

impl UniquenessChecker {
    pub fn new(config: &UniquenessConfig) -> Self {
        Self {
            token_overlap: config.token_overlap,
            similarity_threshold: config.similarity_threshold,
        }
    }

    /// Checks `candidates` against `prior` (every earlier ingredient plus the
    /// current base). Exact repeats are reported before near-duplicates.
    pub fn check<'a, S, I>(&self, candidates: &[S], prior: I) -> Result<(), UniquenessConflict>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = &'a str>,
    {
        let prior: HashSet<String> = prior.into_iter().map(normalize).collect();
        let submitted: Vec<String> = candidates.iter().map(|c| normalize(c.as_ref())).collect();

        if let Some(repeat) = submitted.iter().find(|item| prior.contains(*item)) {
            return Err(UniquenessConflict::Repeated {
                ingredient: repeat.clone(),
            });
        }

        let mut seen = HashSet::new();
        for item in &submitted {
            if !seen.insert(item.as_str()) {
                return Err(UniquenessConflict::DuplicateInSubmission {
                    ingredient: item.clone(),
                });
            }
        }

        if self.token_overlap {
            let prior_words: HashSet<String> =
                prior.iter().flat_map(|item| word_tokens(item)).collect();
            for item in &submitted {
                if let Some(word) = word_tokens(item)
                    .into_iter()
                    .find(|word| prior_words.contains(word))
                {
                    return Err(UniquenessConflict::SharedWord {
                        ingredient: item.clone(),
                        word,
                    });
                }
            }
        }

        if let Some(threshold) = self.similarity_threshold {
            for (i, first) in submitted.iter().enumerate() {
                for second in &submitted[i + 1..] {
                    let score = strsim::normalized_levenshtein(first, second);
                    if score >= threshold {
                        return Err(UniquenessConflict::TooSimilar {
                            first: first.clone(),
                            second: second.clone(),
                            score,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> UniquenessChecker {
        UniquenessChecker::new(&UniquenessConfig::default())
    }

    #[test]
    fn test_fresh_ingredients_pass() {
        assert_eq!(
            checker().check(&["basil", "mozzarella"], ["tomato"]),
            Ok(())
        );
    }

    #[test]
    fn test_exact_repeat_ignores_case_and_whitespace() {
        let result = checker().check(&["  BASIL ", "garlic"], ["tomato", "basil"]);
        assert_eq!(
            result,
            Err(UniquenessConflict::Repeated {
                ingredient: "basil".to_string()
            })
        );
    }

    #[test]
    fn test_repeating_the_base_is_rejected() {
        let result = checker().check(&["Tomato", "garlic"], ["tomato"]);
        assert!(matches!(result, Err(UniquenessConflict::Repeated { .. })));
    }

    #[test]
    fn test_duplicate_within_submission() {
        let result = checker().check(&["garlic", "Garlic"], ["tomato"]);
        assert!(matches!(
            result,
            Err(UniquenessConflict::DuplicateInSubmission { .. })
        ));
    }

    #[test]
    fn test_shared_word_with_prior_corpus() {
        let result = checker().check(&["basil", "tomato paste"], ["tomato"]);
        assert_eq!(
            result,
            Err(UniquenessConflict::SharedWord {
                ingredient: "tomato paste".to_string(),
                word: "tomato".to_string(),
            })
        );
    }

    #[test]
    fn test_token_overlap_can_be_disabled() {
        let checker = UniquenessChecker::new(&UniquenessConfig {
            token_overlap: false,
            similarity_threshold: Some(0.85),
        });
        assert_eq!(checker.check(&["basil", "tomato paste"], ["tomato"]), Ok(()));
    }

    #[test]
    fn test_similar_submissions_are_rejected() {
        let result = checker().check(&["mozzarella", "mozarella"], ["tomato"]);
        match result {
            Err(UniquenessConflict::TooSimilar { first, second, score }) => {
                assert_eq!(first, "mozzarella");
                assert_eq!(second, "mozarella");
                assert!(score >= 0.85);
            }
            other => panic!("Expected TooSimilar, got {other:?}"),
        }
    }

    #[test]
    fn test_similarity_check_can_be_disabled() {
        let checker = UniquenessChecker::new(&UniquenessConfig {
            token_overlap: true,
            similarity_threshold: None,
        });
        assert_eq!(checker.check(&["mozzarella", "mozarella"], ["tomato"]), Ok(()));
    }

    #[test]
    fn test_conflict_messages_are_descriptive() {
        let conflict = UniquenessConflict::TooSimilar {
            first: "feta".to_string(),
            second: "fetta".to_string(),
            score: 0.8,
        };
        assert_eq!(
            conflict.to_string(),
            "\"feta\" and \"fetta\" are too similar (0.80)"
        );
    }
}
