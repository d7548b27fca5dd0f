//! Shared building blocks for the travel workspace: logging setup and
//! small HTTP payload types reused by the server crate and its tests.

pub mod types;
pub mod utils;
