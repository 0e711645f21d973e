//! Property-based tests over the pure domain rules

pub mod content_proptest;
pub mod vote_proptest;
