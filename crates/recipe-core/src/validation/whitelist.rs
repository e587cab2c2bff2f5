use std::collections::HashSet;

use super::normalize;

/// Set of known ingredient names loaded from a newline-delimited list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientWhitelist {
    names: HashSet<String>,
}

impl IngredientWhitelist {
    /// Parses one name per line; lines are trimmed and lower-cased, blanks skipped.
    pub fn parse(text: &str) -> Self {
        let names = text
            .lines()
            .map(normalize)
            .filter(|line| !line.is_empty())
            .collect();
        Self { names }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.names.contains(&normalize(candidate))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        let whitelist = IngredientWhitelist::parse("Tomato\r\n\n  basil  \n\nRed Onion\n");
        assert_eq!(whitelist.len(), 3);
        assert!(whitelist.contains("tomato"));
        assert!(whitelist.contains("BASIL"));
        assert!(whitelist.contains("red  onion"));
        assert!(!whitelist.contains("onion"));
    }

    #[test]
    fn test_empty_source() {
        assert!(IngredientWhitelist::parse("").is_empty());
    }
}
