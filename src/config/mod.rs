//! Configuration management for the license check CLI

mod paths;
mod settings;

pub use paths::ConfigPaths;
pub use settings::{Config, OrgConnection};
