//! Test suite for Storyloom
//!
//! This module organizes all tests:
//!
//! - `common` - shared fixtures (test database, auth helpers, assertions)
//! - `integration` - API and engine tests; database-backed flows are
//!   `#[ignore]`d and run with `cargo test -- --ignored` against
//!   `DATABASE_URL`
//! - `property` - proptest suites over the pure domain rules

pub mod common;
mod integration;
mod property;
