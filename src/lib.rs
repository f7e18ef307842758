//! sf-license-check library
//!
//! The CLI binary in main.rs is a thin wrapper; everything else lives here
//! so integration tests can drive the client and pipeline directly.

pub mod api;
pub mod check;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
