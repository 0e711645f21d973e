//! Contribution Engine
//!
//! Owns the lifecycle of a contribution: creation with append-only
//! position sequencing, content updates, comment attachment, selection as
//! the canonical continuation, and deletion. Voting lives in
//! `crate::backend::votes`.
//!
//! # Invariants
//!
//! - Positions per story are strictly increasing and never reused, even
//!   after deletions (gaps are intentional).
//! - At most one contribution per (story, position) holds
//!   `is_selected = true`; selection clears siblings and sets the target
//!   in a single transaction.
//! - A contribution insert and the contributor-set append commit together.

/// Database operations for contributions
pub mod db;

/// HTTP handlers for contribution endpoints
pub mod handlers;
