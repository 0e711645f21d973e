//! Real-time layer tests

pub mod broadcast_test;
