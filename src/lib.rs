#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;
#[cfg(feature = "testing")]
extern crate std;

pub mod dialect;
pub mod editor;
pub mod errors;
pub mod output;
pub mod parser;
#[cfg(feature = "request")]
pub mod request;
#[cfg(feature = "testing")]
pub mod testing;
pub mod types;

// Re-export main types
pub use dialect::Dialect;
pub use editor::SchemaEditor;
pub use output::OutputFormat;
pub use parser::{Column, ParseOptions, Parser, SplitStrategy, TableDefinition, parse};
pub use types::{ColumnType, SemanticType, TypeMapping, TypeResolution};

#[cfg(feature = "request")]
pub use request::{ColumnInfo, GenerationRequest};

// Re-export errors
pub use errors::Error;
