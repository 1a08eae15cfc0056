//! Configuration for the matching service

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX};
pub use types::{Backend, Limits, MatchConfig};
