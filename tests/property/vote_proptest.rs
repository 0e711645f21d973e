//! Property-based tests for the vote transition rules
//!
//! A model vote set is maintained alongside the counter arithmetic; after
//! any sequence of votes by any users, the counters must equal the counts
//! derived from the model.

use std::collections::HashMap;

use proptest::prelude::*;

use storyloom::shared::contribution::VoteCounts;
use storyloom::shared::vote::{VoteTransition, VoteType};

fn vote_type_strategy() -> impl Strategy<Value = VoteType> {
    prop_oneof![Just(VoteType::Upvote), Just(VoteType::Downvote)]
}

proptest! {
    /// Counters derived by applying transitions always equal the counts
    /// of the model vote set.
    #[test]
    fn counters_match_vote_set(
        actions in proptest::collection::vec((0usize..5, vote_type_strategy()), 0..64)
    ) {
        let mut model: HashMap<usize, VoteType> = HashMap::new();
        let mut counts = VoteCounts::default();

        for (user, requested) in actions {
            let existing = model.get(&user).copied();
            let transition = VoteTransition::resolve(existing, requested);
            counts = transition.apply(counts);

            match transition {
                VoteTransition::Created(t) => {
                    model.insert(user, t);
                }
                VoteTransition::Removed(_) => {
                    model.remove(&user);
                }
                VoteTransition::Switched { to, .. } => {
                    model.insert(user, to);
                }
            }
        }

        let upvotes = model.values().filter(|t| **t == VoteType::Upvote).count() as i64;
        let downvotes = model.values().filter(|t| **t == VoteType::Downvote).count() as i64;
        prop_assert_eq!(counts.upvotes, upvotes);
        prop_assert_eq!(counts.downvotes, downvotes);
    }

    /// Counters never go negative under any vote sequence.
    #[test]
    fn counters_never_negative(
        actions in proptest::collection::vec((0usize..3, vote_type_strategy()), 0..48)
    ) {
        let mut model: HashMap<usize, VoteType> = HashMap::new();
        let mut counts = VoteCounts::default();

        for (user, requested) in actions {
            let transition = VoteTransition::resolve(model.get(&user).copied(), requested);
            counts = transition.apply(counts);
            prop_assert!(counts.upvotes >= 0);
            prop_assert!(counts.downvotes >= 0);

            match transition {
                VoteTransition::Created(t) | VoteTransition::Switched { to: t, .. } => {
                    model.insert(user, t);
                }
                VoteTransition::Removed(_) => {
                    model.remove(&user);
                }
            }
        }
    }

    /// Toggling the same direction twice is an identity on the counters.
    #[test]
    fn double_toggle_is_identity(
        up in 0i64..1000,
        down in 0i64..1000,
        requested in vote_type_strategy()
    ) {
        let start = VoteCounts { upvotes: up, downvotes: down };
        let after_on = VoteTransition::resolve(None, requested).apply(start);
        let after_off = VoteTransition::resolve(Some(requested), requested).apply(after_on);
        prop_assert_eq!(after_off, start);
    }
}
