//! Collaborator Invites
//!
//! Token-based invites to join a story as a collaborator. Invites expire
//! after seven days; acceptance requires the logged-in email to match and
//! adds the user to the story's collaborator set idempotently.

/// Database operations for invites and collaborators
pub mod db;

/// HTTP handlers for invite endpoints
pub mod handlers;
