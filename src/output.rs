//! Output formats generated data can be requested in.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::{self, Display};
use core::str::FromStr;

use crate::errors::Error;

/// Stem of the name of every downloaded file.
const FILE_STEM: &str = "generated_data";

/// A file format for generated rows.
///
/// With the `request` feature, formats serialize as their
/// [label](OutputFormat::label), which is what the generation backend
/// expects in a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "request", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputFormat {
    /// `INSERT` statements.
    #[default]
    #[cfg_attr(feature = "request", serde(rename = "SQL (Insert Statements)"))]
    Sql,
    /// Comma-separated values.
    #[cfg_attr(feature = "request", serde(rename = "CSV"))]
    Csv,
    /// A JSON array of row objects.
    #[cfg_attr(feature = "request", serde(rename = "JSON"))]
    Json,
    /// Apache Parquet.
    Parquet,
    /// Apache Avro.
    Avro,
}

impl OutputFormat {
    /// Every format, in the order a selector lists them.
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Sql,
        OutputFormat::Csv,
        OutputFormat::Json,
        OutputFormat::Parquet,
        OutputFormat::Avro,
    ];

    /// The label shown in the format selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            OutputFormat::Sql => "SQL (Insert Statements)",
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
            OutputFormat::Parquet => "Parquet",
            OutputFormat::Avro => "Avro",
        }
    }

    /// The short name of the format.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            OutputFormat::Sql => "SQL",
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
            OutputFormat::Parquet => "Parquet",
            OutputFormat::Avro => "Avro",
        }
    }

    /// The file extension, without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            OutputFormat::Sql => "sql",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Parquet => "parquet",
            OutputFormat::Avro => "avro",
        }
    }

    /// Name of the downloaded file, such as `generated_data.csv`.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{FILE_STEM}.{}", self.extension())
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    /// Accepts the label, the short name or the extension of a format,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        OutputFormat::ALL
            .into_iter()
            .find(|format| {
                [format.label(), format.short_name(), format.extension()]
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| Error::UnknownOutputFormat(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(OutputFormat::Sql.file_name(), "generated_data.sql");
        assert_eq!(OutputFormat::Parquet.file_name(), "generated_data.parquet");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("SQL (Insert Statements)".parse(), Ok(OutputFormat::Sql));
        assert_eq!("sql".parse(), Ok(OutputFormat::Sql));
        assert_eq!(" Json ".parse(), Ok(OutputFormat::Json));
        assert_eq!("AVRO".parse(), Ok(OutputFormat::Avro));
        assert_eq!(
            "xlsx".parse::<OutputFormat>(),
            Err(Error::UnknownOutputFormat("xlsx".into()))
        );
    }

    #[test]
    fn test_labels_parse_back() {
        for format in OutputFormat::ALL {
            assert_eq!(format.to_string().parse(), Ok(format));
        }
    }
}
