//! Rematch Core Library
//!
//! This crate compiles byte patterns, drives a single-shot matcher across an
//! input to collect every match and capture group, and replaces matches with
//! templates that may reference those groups.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  Consumers (CLI, formatters, etc.)  │
//! ├─────────────────────────────────────┤
//! │  Application Layer                  │  ← Engines, Matcher port, service
//! ├─────────────────────────────────────┤
//! │  Domain Layer                       │  ← Flags, records, sessions, errors
//! ├─────────────────────────────────────┤
//! │  Infrastructure                     │  ← PCRE2 and `regex` adapters
//! └─────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Explicit Limits**: every capacity limit lives in a [`MatchConfig`]
//! - **Typed Failures**: limit breaches are errors, never truncation
//! - **Ports & Adapters**: engines only see the [`Matcher`] trait
//!
//! # Modules
//!
//! - [`domain`] - Flags, value objects, match sessions and errors
//! - [`application`] - Substitution, normalization, aggregation, replacement
//! - [`infrastructure`] - Matcher backends
//! - [`config`] - Limits, defaults and loading
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rematch_core::{CapabilityFlags, RegexService};
//!
//! let service = RegexService::with_defaults();
//! let session = service.match_text(b"123 444 567", b"(\\d)\\d*\\1\\d*\\1", CapabilityFlags::new())?;
//! assert_eq!(session.records()[0].text(), b"444");
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types at crate root for convenience
pub use domain::{
    // Flags
    CapabilityFlags, ResolvedFlags, FlagWarning,
    // Value Objects
    Pattern, Span,
    // Aggregates
    MatchRecord, MatchSession, SessionStatus,
    // Errors
    CapacityError, CompileError, ConfigError, Error, MatchError, Resource, Result,
};

pub use application::{
    // Ports
    Matcher, MatcherFault,
    // Engines
    CompiledPattern, Replacement,
    // Services
    RegexService, RegexServiceBuilder,
};

pub use config::{Backend, ConfigLoader, Limits, MatchConfig};
