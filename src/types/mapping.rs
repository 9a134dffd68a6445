//! Raw type keyword to semantic type tables.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::DefaultHashBuilder;
use indexmap::{IndexMap, IndexSet};

use super::{ColumnType, SemanticType};
use crate::dialect::Dialect;

/// Built-in PostgreSQL keywords.
const POSTGRES_TYPES: &[(&str, SemanticType)] = &[
    ("SERIAL", SemanticType::Numeric),
    ("SMALLSERIAL", SemanticType::Numeric),
    ("BIGSERIAL", SemanticType::Numeric),
    ("INTEGER", SemanticType::Numeric),
    ("SMALLINT", SemanticType::Numeric),
    ("BIGINT", SemanticType::Numeric),
    ("DECIMAL", SemanticType::Numeric),
    ("NUMERIC", SemanticType::Numeric),
    ("REAL", SemanticType::Numeric),
    ("DOUBLE PRECISION", SemanticType::Numeric),
    ("FLOAT4", SemanticType::Numeric),
    ("FLOAT8", SemanticType::Numeric),
    ("MONEY", SemanticType::Numeric),
    ("CHAR", SemanticType::String),
    ("CHARACTER", SemanticType::String),
    ("VARCHAR", SemanticType::String),
    ("CHARACTER VARYING", SemanticType::String),
    ("TEXT", SemanticType::String),
    ("CITEXT", SemanticType::String),
    ("BYTEA", SemanticType::Binary),
    ("BIT", SemanticType::Binary),
    ("VARBIT", SemanticType::Binary),
    ("DATE", SemanticType::DateTime),
    ("TIME", SemanticType::DateTime),
    ("TIMETZ", SemanticType::DateTime),
    ("TIME WITH TIME ZONE", SemanticType::DateTime),
    ("TIME WITHOUT TIME ZONE", SemanticType::DateTime),
    ("TIMESTAMP", SemanticType::DateTime),
    ("TIMESTAMPTZ", SemanticType::DateTime),
    ("INTERVAL", SemanticType::DateTime),
    ("BOOLEAN", SemanticType::Boolean),
    ("BOOL", SemanticType::Boolean),
    ("UUID", SemanticType::Uuid),
    ("ARRAY", SemanticType::Array),
    ("JSON", SemanticType::Json),
    ("JSONB", SemanticType::Json),
    ("POINT", SemanticType::Geometric),
    ("LINE", SemanticType::Geometric),
    ("LSEG", SemanticType::Geometric),
    ("BOX", SemanticType::Geometric),
    ("PATH", SemanticType::Geometric),
    ("POLYGON", SemanticType::Geometric),
    ("CIRCLE", SemanticType::Geometric),
    ("CIDR", SemanticType::Network),
    ("INET", SemanticType::Network),
    ("MACADDR", SemanticType::Network),
    ("MACADDR8", SemanticType::Network),
    ("TSVECTOR", SemanticType::TextSearch),
    ("TSQUERY", SemanticType::TextSearch),
    ("XML", SemanticType::Xml),
    ("HSTORE", SemanticType::KeyValue),
];

/// Built-in MySQL keywords.
const MYSQL_TYPES: &[(&str, SemanticType)] = &[
    ("TINYINT", SemanticType::Numeric),
    ("SMALLINT", SemanticType::Numeric),
    ("MEDIUMINT", SemanticType::Numeric),
    ("INT", SemanticType::Numeric),
    ("INTEGER", SemanticType::Numeric),
    ("BIGINT", SemanticType::Numeric),
    ("DECIMAL", SemanticType::Numeric),
    ("NUMERIC", SemanticType::Numeric),
    ("FLOAT", SemanticType::Numeric),
    ("DOUBLE", SemanticType::Numeric),
    ("DOUBLE PRECISION", SemanticType::Numeric),
    ("REAL", SemanticType::Numeric),
    ("BIT", SemanticType::Numeric),
    ("CHAR", SemanticType::String),
    ("NCHAR", SemanticType::String),
    ("VARCHAR", SemanticType::String),
    ("NVARCHAR", SemanticType::String),
    ("TINYTEXT", SemanticType::String),
    ("TEXT", SemanticType::String),
    ("MEDIUMTEXT", SemanticType::String),
    ("LONGTEXT", SemanticType::String),
    ("BINARY", SemanticType::Binary),
    ("VARBINARY", SemanticType::Binary),
    ("BLOB", SemanticType::Binary),
    ("TINYBLOB", SemanticType::Binary),
    ("MEDIUMBLOB", SemanticType::Binary),
    ("LONGBLOB", SemanticType::Binary),
    ("ENUM", SemanticType::String),
    ("SET", SemanticType::String),
    ("DATE", SemanticType::DateTime),
    ("TIME", SemanticType::DateTime),
    ("DATETIME", SemanticType::DateTime),
    ("TIMESTAMP", SemanticType::DateTime),
    ("YEAR", SemanticType::DateTime),
    ("BOOLEAN", SemanticType::Boolean),
    ("BOOL", SemanticType::Boolean),
    ("JSON", SemanticType::Json),
    ("POINT", SemanticType::Geometric),
    ("LINESTRING", SemanticType::Geometric),
    ("POLYGON", SemanticType::Geometric),
    ("MULTIPOINT", SemanticType::Geometric),
    ("MULTILINESTRING", SemanticType::Geometric),
    ("MULTIPOLYGON", SemanticType::Geometric),
    ("GEOMETRY", SemanticType::Geometric),
    ("GEOMETRYCOLLECTION", SemanticType::Geometric),
];

/// Order in which type-family canonicalization and table lookup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
pub enum TypeResolution {
    /// Canonicalize the family first, then look the result up.
    ///
    /// Any keyword containing `INT` becomes `INTEGER` before the lookup, so
    /// `POINT` and `INTERVAL` resolve as numeric.
    #[default]
    CanonicalFirst,
    /// Look the base keyword up first and canonicalize only on a miss.
    ///
    /// Keywords that merely contain `INT`, such as `POINT`, keep their own
    /// mapping.
    ExactFirst,
}

/// A mapping from raw DDL type keywords to semantic types.
///
/// Keywords are stored uppercase, without any `(...)` size or precision
/// suffix, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeMapping {
    entries: IndexMap<String, SemanticType, DefaultHashBuilder>,
}

impl TypeMapping {
    /// An empty mapping, which resolves every keyword to `Unknown`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in mapping of `dialect`.
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        let table = match dialect {
            Dialect::PostgreSql => POSTGRES_TYPES,
            Dialect::MySql => MYSQL_TYPES,
        };
        table.iter().copied().collect()
    }

    /// Add or replace the semantic type of `keyword`.
    ///
    /// The keyword is normalized the same way parsed types are, so
    /// `"double   precision"` and `"DOUBLE PRECISION"` are the same entry.
    /// Returns the previous mapping of the keyword, if any.
    pub fn insert(&mut self, keyword: &str, semantic: SemanticType) -> Option<SemanticType> {
        self.entries.insert(normalize(keyword), semantic)
    }

    /// The semantic type of an already normalized base keyword.
    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<SemanticType> {
        self.entries.get(keyword).copied()
    }

    /// Number of keywords in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no keywords.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(keyword, semantic type)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SemanticType)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The distinct semantic types this mapping can produce, in order of
    /// first appearance.
    ///
    /// These are the options a type selector offers for the dialect.
    #[must_use]
    pub fn semantic_types(&self) -> Vec<SemanticType> {
        let distinct: IndexSet<SemanticType, DefaultHashBuilder> =
            self.entries.values().copied().collect();
        distinct.into_iter().collect()
    }

    /// Resolve a raw type as written in a column definition.
    ///
    /// The raw type is uppercased and whitespace-collapsed; a trailing `[]`
    /// marks an array. The base keyword is what precedes the first `(`.
    #[must_use]
    pub fn resolve(&self, raw_type: &str, resolution: TypeResolution) -> ColumnType {
        let mut upper = normalize(raw_type);
        let is_array = upper.ends_with("[]");
        if is_array {
            upper.truncate(upper.len() - 2);
        }

        let base = match resolution {
            TypeResolution::CanonicalFirst => {
                self.lookup(canonical_family(&upper).unwrap_or(upper.as_str()))
            }
            TypeResolution::ExactFirst => self
                .entries
                .get(base_keyword(&upper))
                .copied()
                .unwrap_or_else(|| {
                    canonical_family(&upper).map_or(SemanticType::Unknown, |family| self.lookup(family))
                }),
        };

        ColumnType { base, is_array }
    }

    fn lookup(&self, canonical: &str) -> SemanticType {
        self.entries
            .get(base_keyword(canonical))
            .copied()
            .unwrap_or(SemanticType::Unknown)
    }
}

impl<K: AsRef<str>> FromIterator<(K, SemanticType)> for TypeMapping {
    fn from_iter<I: IntoIterator<Item = (K, SemanticType)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (keyword, semantic) in iter {
            mapping.insert(keyword.as_ref(), semantic);
        }
        mapping
    }
}

/// Uppercase and collapse runs of whitespace into single spaces.
fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out.make_ascii_uppercase();
    out
}

/// The family a raw type belongs to, for types whose exact spelling varies.
fn canonical_family(upper: &str) -> Option<&'static str> {
    if upper.contains("INT") {
        Some("INTEGER")
    } else if upper == "NUMERIC" || upper == "DECIMAL" {
        Some("NUMERIC")
    } else if upper.starts_with("SERIAL") {
        Some("SERIAL")
    } else if upper.contains("BOOLEAN") {
        Some("BOOLEAN")
    } else if upper.contains("TIMESTAMP") {
        Some("TIMESTAMP")
    } else if upper.contains("UUID") {
        Some("UUID")
    } else {
        None
    }
}

/// The keyword before any `(...)` suffix.
fn base_keyword(upper: &str) -> &str {
    let head = upper.split('(').next().unwrap_or_default().trim();
    head.strip_suffix("[]").unwrap_or(head).trim_end()
}
