//! API integration tests

pub mod auth_flow_test;
pub mod router_test;
