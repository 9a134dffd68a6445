//! Submodule defining the errors used across the crate.
//!
//! Parsing and editing never fail; these errors only come from the fallible
//! edges of the crate, such as reading a dialect name picked in a selector
//! or building a generation request.

use alloc::string::String;

/// Errors returned by the conversions and builders of this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The provided name does not match any supported database dialect.
    #[error("Unknown database dialect '{0}'")]
    UnknownDialect(String),
    /// The provided label does not match any semantic type.
    #[error("Unknown semantic type '{0}'")]
    UnknownSemanticType(String),
    /// The provided label does not match any output format.
    #[error("Unknown output format '{0}'")]
    UnknownOutputFormat(String),
    /// A generation request must ask for at least one row.
    #[error("Invalid row count {0}, at least one row must be requested")]
    InvalidRowCount(u64),
    /// The request payload could not be serialized.
    #[cfg(feature = "request")]
    #[error("Failed to serialize request: {0}")]
    Serialization(String),
}
