//! Application Layer - Engines and Ports
//!
//! This module contains the matching and substitution engines, the
//! [`Matcher`] port they drive, and the [`RegexService`] facade that wires
//! them to a configuration.

pub mod aggregator;
pub mod compiler;
pub mod normalizer;
pub mod ports;
pub mod replacer;
pub mod services;
pub mod substitute;

pub use aggregator::MatchAggregator;
pub use compiler::{CompiledPattern, PatternCompiler};
pub use normalizer::PatternNormalizer;
pub use ports::{Matcher, MatcherFault};
pub use replacer::{Replacement, ReplacementCoordinator};
pub use services::{RegexService, RegexServiceBuilder};
pub use substitute::{BracketMode, Scope, SubstitutionEngine};
