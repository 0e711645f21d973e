//! Voting Engine
//!
//! The three-way vote state machine: a first vote creates, a repeated
//! same-direction vote toggles off, an opposite vote switches direction.
//! The transition is resolved by the pure
//! [`crate::shared::vote::VoteTransition`] and applied here in a single
//! transaction so the denormalized counters never drift from the vote set.

/// Database operations for votes
pub mod db;

/// HTTP handlers for vote endpoints
pub mod handlers;
