//! Parser for `CREATE TABLE` statements.
//!
//! The parser extracts the column list of the first `CREATE TABLE` statement
//! it finds and maps every column type to a [`ColumnType`] through the
//! [`TypeMapping`] of a [`Dialect`].
//!
//! Parsing never fails: text without a `CREATE TABLE <name> ( ... )` shape
//! yields no columns, and column fragments that cannot be split into a name
//! and a type yield the sentinel column returned by [`Column::unknown`].
//!
//! ```text
//! CREATE TABLE users (id SERIAL PRIMARY KEY, name VARCHAR(100), tags TEXT[])
//!                     ├─ id    Numeric   "PRIMARY KEY"
//!                     ├─ name  String    ""
//!                     └─ tags  String[]  ""
//! ```

mod column;
mod scanner;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::dialect::Dialect;
use crate::types::{ColumnType, TypeMapping, TypeResolution};

/// Name of the sentinel column produced for undecomposable fragments.
const SENTINEL_NAME: &str = "Unknown";

/// A column extracted from a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "request", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Column name as written, with surrounding quotes removed.
    pub name: String,
    /// Semantic type inferred from the raw type.
    pub column_type: ColumnType,
    /// Raw constraint text following the type, trimmed.
    pub modifier: String,
}

impl Column {
    /// Create a column.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType, modifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type,
            modifier: modifier.into(),
        }
    }

    /// The placeholder produced for a fragment that is not a column.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(SENTINEL_NAME, ColumnType::unknown(), String::new())
    }

    /// Whether this is the placeholder returned by [`Column::unknown`].
    ///
    /// Sentinel rows are kept in parse results so indices line up with the
    /// column list, but they are not shown or sent for generation.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.name == SENTINEL_NAME
            && self.column_type == ColumnType::unknown()
            && self.modifier.is_empty()
    }
}

/// A parsed `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableDefinition {
    /// Table name without quotes or schema qualifier.
    pub table: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
}

/// How the column list is cut into column fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
pub enum SplitStrategy {
    /// Split on every comma, including those of `NUMERIC(10,2)`.
    Naive,
    /// Split only on commas outside parentheses and quoted text.
    #[default]
    DepthAware,
}

/// Tunable parser behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
pub struct ParseOptions {
    /// How the column list is split.
    pub split: SplitStrategy,
    /// Order of family canonicalization and keyword lookup.
    pub resolution: TypeResolution,
    /// Whether table-level constraints such as `PRIMARY KEY (id)` are
    /// dropped instead of being parsed as columns.
    pub skip_table_constraints: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            split: SplitStrategy::DepthAware,
            resolution: TypeResolution::CanonicalFirst,
            skip_table_constraints: true,
        }
    }
}

impl ParseOptions {
    /// Options reproducing the behavior of the web UI this parser replaces:
    /// naive comma split and no constraint skipping.
    #[must_use]
    pub const fn reference() -> Self {
        Self {
            split: SplitStrategy::Naive,
            resolution: TypeResolution::CanonicalFirst,
            skip_table_constraints: false,
        }
    }

    /// Set the split strategy.
    #[must_use]
    pub const fn with_split(mut self, split: SplitStrategy) -> Self {
        self.split = split;
        self
    }

    /// Set the type resolution order.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: TypeResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set whether table-level constraints are skipped.
    #[must_use]
    pub const fn with_skip_table_constraints(mut self, skip: bool) -> Self {
        self.skip_table_constraints = skip;
        self
    }
}

/// A reusable `CREATE TABLE` parser bound to one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parser {
    dialect: Dialect,
    mapping: TypeMapping,
    options: ParseOptions,
}

impl Parser {
    /// Create a parser using the built-in mapping of `dialect`.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            mapping: dialect.type_mapping(),
            options: ParseOptions::default(),
        }
    }

    /// Replace the parser options.
    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the type mapping, for example with an extended copy of the
    /// built-in one.
    #[must_use]
    pub fn with_mapping(mut self, mapping: TypeMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Dialect this parser was created for.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Type mapping used to resolve column types.
    #[must_use]
    pub fn mapping(&self) -> &TypeMapping {
        &self.mapping
    }

    /// Parse the columns of the first `CREATE TABLE` statement in `ddl`.
    ///
    /// Returns an empty vector when no statement is found.
    #[must_use]
    pub fn parse(&self, ddl: &str) -> Vec<Column> {
        self.parse_statement(ddl)
            .map(|definition| definition.columns)
            .unwrap_or_default()
    }

    /// Parse the first `CREATE TABLE` statement in `ddl`, keeping the table
    /// name.
    #[must_use]
    pub fn parse_statement(&self, ddl: &str) -> Option<TableDefinition> {
        let Some(span) = scanner::locate_create_table(ddl) else {
            tracing::debug!(dialect = %self.dialect, "no CREATE TABLE statement found");
            return None;
        };

        let fragments = match self.options.split {
            SplitStrategy::Naive => scanner::split_naive(span.body),
            SplitStrategy::DepthAware => scanner::split_top_level(span.body),
        };

        let resolution = self.options.resolution;
        let columns = fragments
            .into_iter()
            .map(str::trim)
            .filter(|fragment| {
                !(self.options.skip_table_constraints
                    && column::is_table_constraint(fragment, &self.mapping, resolution))
            })
            .map(|fragment| column::parse_column(fragment, &self.mapping, resolution))
            .collect();

        Some(TableDefinition {
            table: span.table.to_string(),
            columns,
        })
    }
}

/// Parse the columns of the first `CREATE TABLE` statement in `ddl` with the
/// default options of `dialect`.
///
/// The defaults split only on top-level commas, canonicalize type families
/// before the lookup and drop table-level constraints such as
/// `PRIMARY KEY (a, b)`. Use [`Parser::with_options`] with
/// [`ParseOptions::reference`] to keep one entry per comma-separated
/// fragment.
#[must_use]
pub fn parse(ddl: &str, dialect: Dialect) -> Vec<Column> {
    Parser::new(dialect).parse(ddl)
}
