//! Notification Storage
//!
//! Activity fan-out written by the contribution, vote and comment
//! handlers after their own writes succeed. Notification failures are
//! logged and never fail the triggering operation.

/// Database operations for notifications
pub mod db;

/// HTTP handlers for notification endpoints
pub mod handlers;
