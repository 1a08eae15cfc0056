//! Domain Errors
//!
//! One enum per failure family. Every limit breach is reported as a value;
//! nothing here aborts the process. "No match" is not an error and has no
//! variant.

use std::fmt;

use thiserror::Error;

/// The bounded resource a [`CapacityError`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Text,
    Pattern,
    Records,
    Output,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Text => write!(f, "input text length"),
            Resource::Pattern => write!(f, "pattern length"),
            Resource::Records => write!(f, "match record count"),
            Resource::Output => write!(f, "output length"),
        }
    }
}

/// A buffer or length limit was exceeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("search text for substitution is empty")]
    EmptySearch,

    #[error("{resource} exceeds limit of {limit} (needed {actual})")]
    Exceeded {
        resource: Resource,
        limit: usize,
        actual: usize,
    },
}

impl CapacityError {
    pub fn exceeded(resource: Resource, limit: usize, actual: usize) -> Self {
        CapacityError::Exceeded { resource, limit, actual }
    }

    pub fn resource(&self) -> Option<Resource> {
        match self {
            CapacityError::EmptySearch => None,
            CapacityError::Exceeded { resource, .. } => Some(*resource),
        }
    }
}

/// Compiling a pattern failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("regular expression pattern is empty")]
    EmptyPattern,

    #[error("pattern length {len} exceeds maximum length of {max}")]
    PatternTooLong { len: usize, max: usize },

    /// The matcher rejected the pattern; code and message are its own.
    #[error("syntax error{}: {message}", .code.map(|c| format!(" (code {c})")).unwrap_or_default())]
    Syntax { code: Option<i32>, message: String },

    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

/// Running a compiled pattern failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("matcher fault: {message}")]
    Fault { message: String },

    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

/// Loading or validating configuration failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Load error: {0}")]
    Load(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Any failure the crate can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
