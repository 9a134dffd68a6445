//! Decomposition of a single column definition fragment.

use super::scanner::{is_quote, is_word, read_quoted_identifier, skip_whitespace};
use super::Column;
use crate::types::{ColumnType, TypeMapping, TypeResolution};

/// Keywords that end the type of a column definition.
const CONSTRAINT_KEYWORDS: &[&str] = &[
    "PRIMARY",
    "NOT",
    "NULL",
    "DEFAULT",
    "UNIQUE",
    "REFERENCES",
    "CHECK",
    "CONSTRAINT",
    "AUTO_INCREMENT",
    "AUTOINCREMENT",
    "GENERATED",
    "COLLATE",
    "COMMENT",
    "ON",
];

fn is_constraint_keyword(word: &str) -> bool {
    CONSTRAINT_KEYWORDS
        .iter()
        .any(|keyword| word.eq_ignore_ascii_case(keyword))
}

/// Split a trimmed fragment into name, raw type and modifier text.
///
/// Fragments without a name followed by whitespace, or whose name is
/// followed by something that is neither a type nor a constraint, become
/// the sentinel column.
pub(super) fn parse_column(
    fragment: &str,
    mapping: &TypeMapping,
    resolution: TypeResolution,
) -> Column {
    let bytes = fragment.as_bytes();

    let Some((name, after_name)) = read_column_name(fragment) else {
        return Column::unknown();
    };
    let type_start = skip_whitespace(bytes, after_name);
    if type_start == after_name {
        return Column::unknown();
    }

    let (type_end, stopped_at_keyword) = scan_type(fragment, type_start);
    let raw_type = fragment[type_start..type_end].trim();
    if raw_type.is_empty() && !stopped_at_keyword {
        return Column::unknown();
    }

    let (is_array, modifier_start) = scan_array_suffix(bytes, type_end);
    let mut column_type = if raw_type.is_empty() {
        ColumnType::unknown()
    } else {
        mapping.resolve(raw_type, resolution)
    };
    column_type.is_array |= is_array;

    tracing::trace!(column = name, raw_type, %column_type, "resolved column");

    Column::new(name, column_type, fragment[modifier_start..].trim())
}

/// Read the column name, allowing quoted names that contain spaces.
fn read_column_name(fragment: &str) -> Option<(&str, usize)> {
    let bytes = fragment.as_bytes();
    let quoted_len = bytes
        .first()
        .filter(|&&b| is_quote(b))
        .and_then(|&quote| bytes[1..].iter().position(|&b| b == quote))
        .filter(|&len| len > 0);
    match quoted_len {
        Some(len) => Some((&fragment[1..=len], len + 2)),
        None => read_quoted_identifier(fragment, 0),
    }
}

/// Find where the raw type ends.
///
/// At depth 0 the type is made of words, whitespace and parentheses and
/// stops before the first constraint keyword. Inside parentheses anything
/// goes, including commas and quoted literals. Returns the end position and
/// whether a constraint keyword ended the scan.
fn scan_type(fragment: &str, start: usize) -> (usize, bool) {
    let bytes = fragment.as_bytes();
    let mut pos = start;
    let mut end = start;
    let mut depth = 0usize;

    while pos < bytes.len() {
        let b = bytes[pos];
        if depth > 0 {
            match b {
                b'(' => depth += 1,
                b')' => depth -= 1,
                _ if is_quote(b) => pos = closing_quote(bytes, pos),
                _ => {}
            }
            pos += 1;
            end = pos;
            continue;
        }

        match b {
            _ if b.is_ascii_whitespace() => pos += 1,
            b'(' => {
                depth = 1;
                pos += 1;
                end = pos;
            }
            b')' => {
                pos += 1;
                end = pos;
            }
            _ if is_word(b) => {
                let word_start = pos;
                while pos < bytes.len() && is_word(bytes[pos]) {
                    pos += 1;
                }
                if is_constraint_keyword(&fragment[word_start..pos]) {
                    return (end, true);
                }
                end = pos;
            }
            _ => break,
        }
    }

    (end, false)
}

/// Position of the quote closing the one at `open`, or the last byte.
fn closing_quote(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    bytes[open + 1..]
        .iter()
        .position(|&b| b == quote)
        .map_or(bytes.len() - 1, |offset| open + 1 + offset)
}

/// Detect `[]` or `[n]` suffixes right after the type.
///
/// Returns whether an array suffix was found and where the modifier text
/// starts.
fn scan_array_suffix(bytes: &[u8], type_end: usize) -> (bool, usize) {
    let mut pos = skip_whitespace(bytes, type_end);
    let mut is_array = false;
    while bytes.get(pos) == Some(&b'[') {
        let mut close = pos + 1;
        while bytes.get(close).is_some_and(u8::is_ascii_digit) {
            close += 1;
        }
        if bytes.get(close) != Some(&b']') {
            break;
        }
        is_array = true;
        pos = close + 1;
    }
    if is_array { (true, pos) } else { (false, type_end) }
}

/// Whether a trimmed fragment is a table-level constraint rather than a
/// column.
///
/// `KEY`, `INDEX` and friends double as plausible column names, so they
/// only count as constraints when followed by a column list, possibly after
/// an index name that is not itself a type.
pub(super) fn is_table_constraint(
    fragment: &str,
    mapping: &TypeMapping,
    resolution: TypeResolution,
) -> bool {
    let bytes = fragment.as_bytes();
    if bytes.first().copied().is_some_and(is_quote) {
        return false;
    }
    let mut words = WordCursor::new(fragment);
    let Some(first) = words.next_word() else {
        return false;
    };
    let first = first.to_ascii_uppercase();

    match first.as_str() {
        "CONSTRAINT" => true,
        "PRIMARY" | "FOREIGN" => words
            .next_word()
            .is_some_and(|w| w.eq_ignore_ascii_case("KEY")),
        "UNIQUE" | "CHECK" | "EXCLUDE" | "KEY" | "INDEX" | "FULLTEXT" | "SPATIAL" => {
            if words.at_open_paren() {
                return true;
            }
            let Some(second) = words.next_word() else {
                return false;
            };
            if second.eq_ignore_ascii_case("KEY") || second.eq_ignore_ascii_case("INDEX") {
                return true;
            }
            words.at_open_paren() && mapping.resolve(second, resolution).is_unknown()
        }
        _ => false,
    }
}

/// Minimal word iterator over a fragment, aware of what follows each word.
struct WordCursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> WordCursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn next_word(&mut self) -> Option<&'a str> {
        let bytes = self.input.as_bytes();
        let start = skip_whitespace(bytes, self.pos);
        let mut end = start;
        while bytes.get(end).copied().is_some_and(is_word) {
            end += 1;
        }
        if end == start {
            return None;
        }
        self.pos = end;
        Some(&self.input[start..end])
    }

    fn at_open_paren(&self) -> bool {
        let bytes = self.input.as_bytes();
        bytes.get(skip_whitespace(bytes, self.pos)) == Some(&b'(')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::types::SemanticType;

    fn column(fragment: &str) -> Column {
        parse_column(
            fragment,
            &TypeMapping::for_dialect(Dialect::PostgreSql),
            TypeResolution::ExactFirst,
        )
    }

    fn constraint(fragment: &str) -> bool {
        is_table_constraint(
            fragment,
            &TypeMapping::for_dialect(Dialect::MySql),
            TypeResolution::ExactFirst,
        )
    }

    #[test]
    fn test_type_stops_at_constraint_keyword() {
        let col = column("id SERIAL PRIMARY KEY");
        assert_eq!(col.name, "id");
        assert_eq!(col.column_type, ColumnType::new(SemanticType::Numeric));
        assert_eq!(col.modifier, "PRIMARY KEY");

        let col = column("email VARCHAR(100) NOT NULL UNIQUE");
        assert_eq!(col.column_type.base, SemanticType::String);
        assert_eq!(col.modifier, "NOT NULL UNIQUE");
    }

    #[test]
    fn test_multi_word_type_is_kept_whole() {
        let col = column("ratio double precision default 0.5");
        assert_eq!(col.column_type.base, SemanticType::Numeric);
        assert_eq!(col.modifier, "default 0.5");
    }

    #[test]
    fn test_quoted_name_is_stripped() {
        let col = column("\"Created At\" TIMESTAMP");
        assert_eq!(col.name, "Created At");
        assert_eq!(col.column_type.base, SemanticType::DateTime);

        let col = column("`createdAt` timestamptz");
        assert_eq!(col.name, "createdAt");
        assert_eq!(col.column_type.base, SemanticType::DateTime);
    }

    #[test]
    fn test_array_suffixes() {
        assert_eq!(
            column("tags TEXT[]").column_type,
            ColumnType::array(SemanticType::String)
        );
        let col = column("grid INTEGER [3][3] NOT NULL");
        assert_eq!(col.column_type, ColumnType::array(SemanticType::Numeric));
        assert_eq!(col.modifier, "NOT NULL");
    }

    #[test]
    fn test_bracket_inside_default_is_not_an_array() {
        let col = column("tags TEXT DEFAULT '[]'");
        assert_eq!(col.column_type, ColumnType::new(SemanticType::String));
        assert_eq!(col.modifier, "DEFAULT '[]'");
    }

    #[test]
    fn test_missing_type_before_constraint() {
        let col = column("id PRIMARY KEY");
        assert_eq!(col.name, "id");
        assert!(col.column_type.is_unknown());
        assert_eq!(col.modifier, "PRIMARY KEY");
    }

    #[test]
    fn test_undecomposable_fragments_are_sentinels() {
        assert!(column("").is_sentinel());
        assert!(column("id").is_sentinel());
        assert!(column("2)").is_sentinel());
        assert!(column("x 'literal'").is_sentinel());
        assert!(column("(a, b)").is_sentinel());
    }

    #[test]
    fn test_unbalanced_parenthesis_keeps_type() {
        let col = column("amount NUMERIC(10");
        assert_eq!(col.name, "amount");
        assert_eq!(col.column_type.base, SemanticType::Numeric);
        assert_eq!(col.modifier, "");
    }

    #[test]
    fn test_table_constraints() {
        assert!(constraint("PRIMARY KEY (id)"));
        assert!(constraint("primary key(a, b)"));
        assert!(constraint("FOREIGN KEY (user_id) REFERENCES users(id)"));
        assert!(constraint("CONSTRAINT fk_user FOREIGN KEY (user_id) REFERENCES users(id)"));
        assert!(constraint("UNIQUE (email)"));
        assert!(constraint("UNIQUE KEY uq_email (email)"));
        assert!(constraint("KEY idx_name (name)"));
        assert!(constraint("INDEX (created_at)"));
        assert!(constraint("CHECK (price > 0)"));
    }

    #[test]
    fn test_keyword_named_columns_are_not_constraints() {
        assert!(!constraint("key VARCHAR(10)"));
        assert!(!constraint("index INT"));
        assert!(!constraint("`primary` BOOLEAN"));
        assert!(!constraint("unique_code CHAR(8)"));
    }
}
