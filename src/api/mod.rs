//! Org query API client

mod client;
mod queries;

pub use client::OrgClient;
