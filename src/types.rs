//! Semantic column types and the per-dialect tables that produce them.
mod mapping;
mod semantic;

pub use mapping::{TypeMapping, TypeResolution};
pub use semantic::{ColumnType, SemanticType};
