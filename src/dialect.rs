//! Database dialects whose type vocabulary the parser understands.

use alloc::string::ToString;
use core::fmt::{self, Display};
use core::str::FromStr;

use crate::errors::Error;
use crate::types::TypeMapping;

/// The database system a `CREATE TABLE` statement is written for.
///
/// The dialect only decides which [`TypeMapping`] turns raw type keywords
/// into semantic types; the statement shape accepted by the parser is the
/// same for every dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "request", derive(serde::Serialize, serde::Deserialize))]
pub enum Dialect {
    /// PostgreSQL.
    #[default]
    #[cfg_attr(feature = "request", serde(rename = "PostgreSQL"))]
    PostgreSql,
    /// MySQL.
    #[cfg_attr(feature = "request", serde(rename = "MySQL"))]
    MySql,
}

impl Dialect {
    /// Every supported dialect, in the order a selector lists them.
    pub const ALL: [Dialect; 2] = [Dialect::PostgreSql, Dialect::MySql];

    /// The display name of the dialect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::MySql => "MySQL",
        }
    }

    /// The built-in type mapping of the dialect.
    #[must_use]
    pub fn type_mapping(self) -> TypeMapping {
        TypeMapping::for_dialect(self)
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if ["postgresql", "postgres", "pg"]
            .iter()
            .any(|alias| trimmed.eq_ignore_ascii_case(alias))
        {
            Ok(Dialect::PostgreSql)
        } else if trimmed.eq_ignore_ascii_case("mysql") {
            Ok(Dialect::MySql)
        } else {
            Err(Error::UnknownDialect(trimmed.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(Dialect::PostgreSql.to_string(), "PostgreSQL");
        assert_eq!(Dialect::MySql.to_string(), "MySQL");
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("PostgreSQL".parse::<Dialect>(), Ok(Dialect::PostgreSql));
        assert_eq!(" postgres ".parse::<Dialect>(), Ok(Dialect::PostgreSql));
        assert_eq!("PG".parse::<Dialect>(), Ok(Dialect::PostgreSql));
        assert_eq!("mysql".parse::<Dialect>(), Ok(Dialect::MySql));
        assert_eq!(
            "oracle".parse::<Dialect>(),
            Err(Error::UnknownDialect("oracle".into()))
        );
    }

    #[test]
    fn test_default_is_first_listed() {
        assert_eq!(Dialect::default(), Dialect::ALL[0]);
    }
}
