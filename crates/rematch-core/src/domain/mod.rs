//! Domain Layer - Pure Types
//!
//! This module contains the value types every engine exchanges:
//! - Flags: requested and resolved capability options
//! - Value Objects: patterns and byte spans
//! - Aggregates: match records and the session that owns them
//! - Errors: one enum per failure family
//!
//! Nothing here performs matching or I/O.

pub mod flags;
pub mod value_objects;
pub mod aggregates;
pub mod errors;

pub use flags::*;
pub use value_objects::*;
pub use aggregates::*;
pub use errors::*;
