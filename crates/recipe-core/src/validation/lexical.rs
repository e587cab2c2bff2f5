//! Per-ingredient lexical checks.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::word_tokens;
use super::whitelist::IngredientWhitelist;
use crate::config::RuleConfig;

/// Why a single ingredient was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationFailure {
    #[error("missing ingredient")]
    Missing,
    #[error("multiple items")]
    MultipleItems,
    #[error("too verbose")]
    TooVerbose,
    #[error("subjective descriptor")]
    SubjectiveDescriptor,
    #[error("suspicious phrasing")]
    SuspiciousPhrasing,
    #[error("unrecognized ingredient")]
    UnrecognizedIngredient,
}

/// Result of running every lexical check on one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Pass,
    Fail(ValidationFailure),
}

impl ValidationOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Runs the lexical checks in a fixed order and stops at the first failure.
///
/// Word lists come from [`RuleConfig`] and are folded to lower case once at
/// construction.
#[derive(Debug, Clone)]
pub struct IngredientValidator {
    max_words: usize,
    connective_words: HashSet<String>,
    connective_symbols: Vec<char>,
    subjective_adjectives: HashSet<String>,
    injection_phrases: Vec<Vec<String>>,
    meta_words: HashSet<String>,
    whitelist: Option<Arc<IngredientWhitelist>>,
}

fn folded_set(words: &[String]) -> HashSet<String> {
    words.iter().map(|w| w.trim().to_lowercase()).collect()
}

impl IngredientValidator {
    pub fn new(rules: &RuleConfig) -> Self {
        Self {
            max_words: rules.max_words,
            connective_words: folded_set(&rules.connective_words),
            connective_symbols: rules.connective_symbols.clone(),
            subjective_adjectives: folded_set(&rules.subjective_adjectives),
            injection_phrases: rules
                .injection_phrases
                .iter()
                .map(|phrase| word_tokens(phrase))
                .filter(|tokens| !tokens.is_empty())
                .collect(),
            meta_words: folded_set(&rules.meta_words),
            whitelist: None,
        }
    }

    /// Restricts accepted ingredients to the given list.
    pub fn with_whitelist(mut self, whitelist: Arc<IngredientWhitelist>) -> Self {
        self.whitelist = Some(whitelist);
        self
    }

    pub fn validate(&self, candidate: &str) -> ValidationOutcome {
        match self.check(candidate) {
            Ok(()) => ValidationOutcome::Pass,
            Err(failure) => ValidationOutcome::Fail(failure),
        }
    }

    /// Validates every field and returns the first failing one, if any.
    pub fn first_failure<S: AsRef<str>>(
        &self,
        candidates: &[S],
    ) -> Option<(usize, ValidationFailure)> {
        candidates
            .iter()
            .enumerate()
            .find_map(|(index, candidate)| match self.validate(candidate.as_ref()) {
                ValidationOutcome::Pass => None,
                ValidationOutcome::Fail(failure) => Some((index, failure)),
            })
    }

    fn check(&self, candidate: &str) -> Result<(), ValidationFailure> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(ValidationFailure::Missing);
        }

        let tokens = word_tokens(trimmed);

        if self.is_multiple_items(trimmed, &tokens) {
            return Err(ValidationFailure::MultipleItems);
        }
        if trimmed.split_whitespace().count() > self.max_words {
            return Err(ValidationFailure::TooVerbose);
        }
        if tokens
            .iter()
            .any(|token| self.subjective_adjectives.contains(token))
        {
            return Err(ValidationFailure::SubjectiveDescriptor);
        }
        if self.is_suspicious(&tokens) {
            return Err(ValidationFailure::SuspiciousPhrasing);
        }
        if let Some(whitelist) = &self.whitelist {
            if !whitelist.contains(trimmed) {
                return Err(ValidationFailure::UnrecognizedIngredient);
            }
        }
        Ok(())
    }

    fn is_multiple_items(&self, candidate: &str, tokens: &[String]) -> bool {
        candidate
            .chars()
            .any(|c| self.connective_symbols.contains(&c))
            || tokens
                .iter()
                .any(|token| self.connective_words.contains(token))
    }

    fn is_suspicious(&self, tokens: &[String]) -> bool {
        if tokens.iter().any(|token| self.meta_words.contains(token)) {
            return true;
        }
        self.injection_phrases.iter().any(|phrase| {
            phrase.len() <= tokens.len()
                && tokens
                    .windows(phrase.len())
                    .any(|window| window == phrase.as_slice())
        })
    }
}
