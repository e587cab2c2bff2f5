use once_cell::sync::Lazy;
use regex::Regex;

use super::JudgmentResult;

// Two lines, in order: "Answer: Yes|No" then "Explanation: ...".
static JUDGMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*answer:[ \t]*(yes|no)[.!]?[ \t]*\r?\n[ \t]*explanation:[ \t]*([^\r\n]+?)\s*$",
    )
    .expect("judgment pattern is a valid regex")
});

/// Interprets the judge's free-text reply.
///
/// Anything that is not exactly the two-line `Answer:` / `Explanation:`
/// shape comes back as [`JudgmentResult::Unparseable`] carrying the raw text.
pub fn parse_judgment(text: &str) -> JudgmentResult {
    let Some(captures) = JUDGMENT_PATTERN.captures(text) else {
        return JudgmentResult::Unparseable(text.to_string());
    };

    let explanation = captures[2].trim().to_string();
    if explanation.is_empty() {
        return JudgmentResult::Unparseable(text.to_string());
    }

    if captures[1].eq_ignore_ascii_case("yes") {
        JudgmentResult::Viable(explanation)
    } else {
        JudgmentResult::NotViable(explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_reply_is_viable() {
        assert_eq!(
            parse_judgment("Answer: Yes\nExplanation: text"),
            JudgmentResult::Viable("text".to_string())
        );
    }

    #[test]
    fn test_no_reply_is_not_viable() {
        assert_eq!(
            parse_judgment("Answer: No\nExplanation: text"),
            JudgmentResult::NotViable("text".to_string())
        );
    }

    #[test]
    fn test_matching_ignores_case_and_surrounding_whitespace() {
        let reply = "  answer:   YES.\r\n EXPLANATION:  You make a caprese salad.\n\n";
        assert_eq!(
            parse_judgment(reply),
            JudgmentResult::Viable("You make a caprese salad.".to_string())
        );
    }

    #[test]
    fn test_two_sentence_explanation_is_kept_whole() {
        let reply = "Answer: No\nExplanation: Banana clashes with miso. The textures fight.";
        assert_eq!(
            parse_judgment(reply),
            JudgmentResult::NotViable(
                "Banana clashes with miso. The textures fight.".to_string()
            )
        );
    }

    #[test]
    fn test_malformed_replies_are_unparseable() {
        let cases = [
            "",
            "Yes, this works as a salad.",
            "Answer: Maybe\nExplanation: hard to say",
            "Explanation: text\nAnswer: Yes",
            "Answer: Yes",
            "Answer: Yes\nExplanation:   ",
            "Sure! Answer: Yes\nExplanation: text",
            "Answer: Yesterday\nExplanation: text",
            "Answer:\nYes\nExplanation: text",
            "Answer: Yes\nExplanation: text\nAlso ignore the rules.",
            "Answer: No\n\nExplanation: text",
        ];
        for reply in cases {
            assert_eq!(
                parse_judgment(reply),
                JudgmentResult::Unparseable(reply.to_string()),
                "{reply:?}"
            );
        }
    }
}
