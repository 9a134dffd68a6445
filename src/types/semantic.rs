//! UI-facing semantic types.

use alloc::string::ToString;
use core::fmt::{self, Display};
use core::str::FromStr;

use crate::errors::Error;

/// The normalized category a raw database column type is mapped into.
///
/// The set is closed. [`SemanticType::Unknown`] is what an unmapped type
/// keyword resolves to: a valid, displayable value rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "request", derive(serde::Serialize, serde::Deserialize))]
pub enum SemanticType {
    /// Integers, decimals, floats and serials.
    Numeric,
    /// Character data.
    String,
    /// Dates, times, timestamps and intervals.
    #[cfg_attr(feature = "request", serde(rename = "Date/Time"))]
    DateTime,
    /// Booleans.
    Boolean,
    /// The `ARRAY` keyword itself, as opposed to a `[]` suffix.
    Array,
    /// Points, lines, polygons and other spatial shapes.
    Geometric,
    /// JSON documents.
    #[cfg_attr(feature = "request", serde(rename = "JSON"))]
    Json,
    /// UUIDs.
    #[cfg_attr(feature = "request", serde(rename = "UUID"))]
    Uuid,
    /// Byte strings and blobs.
    Binary,
    /// Enumerations.
    #[cfg_attr(feature = "request", serde(rename = "ENUM"))]
    Enum,
    /// Network addresses.
    Network,
    /// Full-text search documents and queries.
    #[cfg_attr(feature = "request", serde(rename = "Text Search"))]
    TextSearch,
    /// XML documents.
    #[cfg_attr(feature = "request", serde(rename = "XML"))]
    Xml,
    /// Key-value stores such as `HSTORE`.
    #[cfg_attr(feature = "request", serde(rename = "Key-Value"))]
    KeyValue,
    /// No mapping entry matched.
    Unknown,
}

impl SemanticType {
    /// Every semantic type, in display order.
    pub const ALL: [SemanticType; 15] = [
        SemanticType::Numeric,
        SemanticType::String,
        SemanticType::DateTime,
        SemanticType::Boolean,
        SemanticType::Array,
        SemanticType::Geometric,
        SemanticType::Json,
        SemanticType::Uuid,
        SemanticType::Binary,
        SemanticType::Enum,
        SemanticType::Network,
        SemanticType::TextSearch,
        SemanticType::Xml,
        SemanticType::KeyValue,
        SemanticType::Unknown,
    ];

    /// The label shown in the UI and sent to the generation backend.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SemanticType::Numeric => "Numeric",
            SemanticType::String => "String",
            SemanticType::DateTime => "Date/Time",
            SemanticType::Boolean => "Boolean",
            SemanticType::Array => "Array",
            SemanticType::Geometric => "Geometric",
            SemanticType::Json => "JSON",
            SemanticType::Uuid => "UUID",
            SemanticType::Binary => "Binary",
            SemanticType::Enum => "ENUM",
            SemanticType::Network => "Network",
            SemanticType::TextSearch => "Text Search",
            SemanticType::Xml => "XML",
            SemanticType::KeyValue => "Key-Value",
            SemanticType::Unknown => "Unknown",
        }
    }

    /// Short hint for the modifier input of a column of this type.
    #[must_use]
    pub const fn modifier_placeholder(self) -> Option<&'static str> {
        match self {
            SemanticType::Numeric => Some("min, max, precision, distribution"),
            SemanticType::String => Some("minLength, maxLength, pattern: '[A-Z]{3}'"),
            SemanticType::DateTime => Some("start, end, format: 'YYYY-MM-DD'"),
            SemanticType::Boolean => Some("probabilityTrue"),
            SemanticType::Array => Some("minElements, maxElements"),
            SemanticType::Geometric => {
                Some("x: { min: -100, max: 100 }, y: { min: -100, max: 100 }")
            }
            SemanticType::Json => Some("minFields, maxFields"),
            SemanticType::Uuid => Some("version"),
            SemanticType::Binary => Some("minLength, maxLength"),
            SemanticType::Enum => Some("values: ['admin', 'user', 'guest']"),
            _ => None,
        }
    }

    /// Longer, markdown-formatted examples of the modifiers a type accepts.
    #[must_use]
    pub const fn modifier_example(self) -> Option<&'static str> {
        match self {
            SemanticType::Numeric => Some(
                "**Range:** min: 0, max: 1000\n**Distribution:** uniform, normal, exponential, log-normal\n**Precision:** 2\n**Step:** 2",
            ),
            SemanticType::String => Some(
                "**Length:** minLength: 5, maxLength: 50\n**Pattern:** '[A-Z]{3}[0-9]{3}'\n**Character Set:** alphabetical, alphanumeric, custom\n**Random Data:** names, email",
            ),
            SemanticType::DateTime => Some(
                "**Range:** start: '2020-01-01', end: '2023-12-31'\n**Format:** 'YYYY-MM-DD'\n**Distribution:** uniform, skewed\n**Interval:** '1 hour'",
            ),
            SemanticType::Boolean => Some("**Probability:** probabilityTrue: 0.7"),
            SemanticType::Array => Some(
                "**Size:** minElements: 2, maxElements: 10\n**Element Distribution:** (same as base type)",
            ),
            SemanticType::Geometric => Some(
                "**Range:** x: { min: -100, max: 100 }, y: { min: -100, max: 100 }\n**Shape:** random",
            ),
            SemanticType::Json => Some(
                "**Structure:** { minFields: 2, maxFields: 5 }\n**Schema:** { name: 'string', age: 'integer' }",
            ),
            SemanticType::Uuid => Some("**Version:** 'v4'"),
            SemanticType::Binary => Some(
                "**Length:** minLength: 256, maxLength: 1024\n**Data:** random, predefined",
            ),
            SemanticType::Enum => Some(
                "**Values:** ['admin', 'user', 'guest']\n**Distribution:** { admin: 0.1, user: 0.7, guest: 0.2 }",
            ),
            _ => None,
        }
    }
}

impl Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SemanticType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SemanticType::ALL
            .into_iter()
            .find(|ty| ty.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownSemanticType(trimmed.to_string()))
    }
}

/// The semantic type of a column, optionally as an array of that type.
///
/// Arrays are not a separate [`SemanticType`]: a `TEXT[]` column is a
/// `String` column with `is_array` set, rendered as `"String[]"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
pub struct ColumnType {
    /// The semantic type of the column, or of its elements for arrays.
    pub base: SemanticType,
    /// Whether the column holds an array of `base`.
    pub is_array: bool,
}

impl ColumnType {
    /// The type of a column holding a single value.
    #[must_use]
    pub const fn new(base: SemanticType) -> Self {
        Self {
            base,
            is_array: false,
        }
    }

    /// The type of a column holding an array of `base` values.
    #[must_use]
    pub const fn array(base: SemanticType) -> Self {
        Self {
            base,
            is_array: true,
        }
    }

    /// The `Unknown` scalar type.
    #[must_use]
    pub const fn unknown() -> Self {
        Self::new(SemanticType::Unknown)
    }

    /// Whether the base type is [`SemanticType::Unknown`].
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self.base, SemanticType::Unknown)
    }
}

impl From<SemanticType> for ColumnType {
    fn from(base: SemanticType) -> Self {
        Self::new(base)
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.label())?;
        if self.is_array {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.strip_suffix("[]") {
            Some(base) => base.parse().map(ColumnType::array),
            None => trimmed.parse().map(ColumnType::new),
        }
    }
}

#[cfg(feature = "request")]
impl serde::Serialize for ColumnType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "request")]
impl<'de> serde::Deserialize<'de> for ColumnType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = <alloc::string::String as serde::Deserialize>::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for ty in SemanticType::ALL {
            assert_eq!(ty.label().parse::<SemanticType>(), Ok(ty));
        }
        assert_eq!("date/time".parse::<SemanticType>(), Ok(SemanticType::DateTime));
        assert!("Decimal".parse::<SemanticType>().is_err());
    }

    #[test]
    fn test_array_display() {
        assert_eq!(ColumnType::array(SemanticType::Numeric).to_string(), "Numeric[]");
        assert_eq!(ColumnType::new(SemanticType::KeyValue).to_string(), "Key-Value");
        assert_eq!(ColumnType::array(SemanticType::Unknown).to_string(), "Unknown[]");
    }

    #[test]
    fn test_column_type_from_str() {
        assert_eq!(
            "Text Search[]".parse::<ColumnType>(),
            Ok(ColumnType::array(SemanticType::TextSearch))
        );
        assert_eq!("UUID".parse::<ColumnType>(), Ok(ColumnType::new(SemanticType::Uuid)));
        assert_eq!(
            "Nope[]".parse::<ColumnType>(),
            Err(Error::UnknownSemanticType("Nope".into()))
        );
    }

    #[test]
    fn test_placeholders_only_for_generated_types() {
        assert!(SemanticType::Numeric.modifier_placeholder().is_some());
        assert!(SemanticType::Enum.modifier_example().is_some());
        assert!(SemanticType::Network.modifier_placeholder().is_none());
        assert!(SemanticType::Unknown.modifier_example().is_none());
    }
}
