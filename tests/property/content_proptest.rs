//! Property-based tests for content and comment validation

use proptest::prelude::*;

use storyloom::shared::contribution::{validate_comment_text, validate_content};

proptest! {
    /// Acceptance depends only on the character count being within
    /// [10, 5000].
    #[test]
    fn content_acceptance_matches_char_count(s in "\\PC{0,64}") {
        let len = s.chars().count();
        let accepted = validate_content(&s).is_ok();
        prop_assert_eq!(accepted, (10..=5000).contains(&len));
    }

    /// Long content is rejected past 5000 characters regardless of the
    /// repeated character.
    #[test]
    fn content_rejects_over_limit(extra in 1usize..32) {
        let s = "x".repeat(5000 + extra);
        prop_assert!(validate_content(&s).is_err());
    }

    /// Validated comments are always trimmed, non-empty, and within the
    /// length bound.
    #[test]
    fn comments_normalize_to_trimmed(s in "\\PC{0,600}") {
        match validate_comment_text(&s) {
            Ok(normalized) => {
                prop_assert_eq!(normalized.as_str(), s.trim());
                prop_assert!(!normalized.is_empty());
                prop_assert!(normalized.chars().count() <= 500);
            }
            Err(_) => {
                let trimmed = s.trim();
                prop_assert!(trimmed.is_empty() || trimmed.chars().count() > 500);
            }
        }
    }
}
