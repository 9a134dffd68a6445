//! Editable schema state layered over parse results.
//!
//! A [`SchemaEditor`] owns the DDL source text, the dialect, the columns
//! parsed from the text and a working copy of those columns that accepts
//! type overrides, modifier overrides and deletions. The working copy is
//! seeded from the first non-empty parse and is only thrown away when the
//! source text changes.

use alloc::string::String;
use alloc::vec::Vec;

use crate::dialect::Dialect;
use crate::parser::{Column, ParseOptions, Parser};
use crate::types::{ColumnType, SemanticType};

/// Parse results plus the user's edits on top of them.
///
/// # Example
///
/// ```
/// use datafactory_schema::{ColumnType, Dialect, SchemaEditor, SemanticType};
///
/// let mut editor = SchemaEditor::new(Dialect::PostgreSql);
/// editor.set_source("CREATE TABLE t (a INT, b TEXT)");
/// assert!(editor.set_type(1, ColumnType::new(SemanticType::Json)));
/// assert_eq!(editor.columns()[1].column_type.to_string(), "JSON");
/// assert_eq!(editor.parsed()[1].column_type.to_string(), "String");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEditor {
    parser: Parser,
    source: String,
    parsed: Vec<Column>,
    edited: Option<Vec<Column>>,
}

impl SchemaEditor {
    /// Create an empty editor for `dialect` with default parser options.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self::with_parser(Parser::new(dialect))
    }

    /// Create an empty editor using a configured parser.
    #[must_use]
    pub fn with_parser(parser: Parser) -> Self {
        Self {
            parser,
            source: String::new(),
            parsed: Vec::new(),
            edited: None,
        }
    }

    /// Current dialect.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.parser.dialect()
    }

    /// Current DDL source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Columns parsed from the current source, without edits.
    #[must_use]
    pub fn parsed(&self) -> &[Column] {
        &self.parsed
    }

    /// The edited working copy, or nothing before it is seeded.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.edited.as_deref().unwrap_or_default()
    }

    /// Edited columns that are real columns, with their index in
    /// [`SchemaEditor::columns`].
    ///
    /// Edits are addressed by that index, so it is kept even though sentinel
    /// rows are skipped.
    pub fn valid_columns(&self) -> impl Iterator<Item = (usize, &Column)> {
        self.columns()
            .iter()
            .enumerate()
            .filter(|(_, column)| !column.is_sentinel())
    }

    /// Whether a working copy exists.
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        self.edited.is_some()
    }

    /// The semantic types a column of the current dialect can be set to.
    #[must_use]
    pub fn selectable_types(&self) -> Vec<SemanticType> {
        self.parser.mapping().semantic_types()
    }

    /// Replace the source text.
    ///
    /// When the text differs from the current one, it is re-parsed, every
    /// edit is discarded and the working copy is reseeded from the new parse
    /// if it has columns. Returns whether the text changed.
    pub fn set_source(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if source == self.source {
            return false;
        }
        self.source = source;
        self.parsed = self.parser.parse(&self.source);
        self.edited = None;
        self.seed();
        true
    }

    /// Switch to another dialect.
    ///
    /// The source is re-parsed with the new dialect's built-in mapping and
    /// the current options. An existing working copy is kept as it is, so
    /// edits survive the switch; an unseeded editor is seeded from the new
    /// parse.
    pub fn set_dialect(&mut self, dialect: Dialect) {
        if dialect == self.dialect() {
            return;
        }
        self.parser = Parser::new(dialect).with_options(self.parser.options());
        self.parsed = self.parser.parse(&self.source);
        self.seed();
    }

    /// Current parser options.
    #[must_use]
    pub fn options(&self) -> ParseOptions {
        self.parser.options()
    }

    /// Override the type of the column at `index`.
    ///
    /// Returns `false` and changes nothing when `index` is out of range.
    pub fn set_type(&mut self, index: usize, column_type: ColumnType) -> bool {
        match self.column_mut(index) {
            Some(column) => {
                column.column_type = column_type;
                true
            }
            None => false,
        }
    }

    /// Override the modifier text of the column at `index`.
    ///
    /// Returns `false` and changes nothing when `index` is out of range.
    pub fn set_modifier(&mut self, index: usize, modifier: impl Into<String>) -> bool {
        match self.column_mut(index) {
            Some(column) => {
                column.modifier = modifier.into();
                true
            }
            None => false,
        }
    }

    /// Remove the column at `index`, shifting later columns down by one.
    ///
    /// Returns `false` and changes nothing when `index` is out of range.
    pub fn delete_column(&mut self, index: usize) -> bool {
        match self.edited.as_mut() {
            Some(columns) if index < columns.len() => {
                columns.remove(index);
                true
            }
            _ => {
                tracing::debug!(index, "ignoring deletion of missing column");
                false
            }
        }
    }

    /// Clear the source, parse results and edits. The dialect is kept.
    pub fn reset(&mut self) {
        self.source.clear();
        self.parsed.clear();
        self.edited = None;
    }

    fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        let column = self
            .edited
            .as_mut()
            .and_then(|columns| columns.get_mut(index));
        if column.is_none() {
            tracing::debug!(index, "ignoring edit of missing column");
        }
        column
    }

    fn seed(&mut self) {
        if self.edited.is_none() && !self.parsed.is_empty() {
            tracing::debug!(
                dialect = %self.dialect(),
                columns = self.parsed.len(),
                "seeding schema working copy"
            );
            self.edited = Some(self.parsed.clone());
        }
    }
}

impl Default for SchemaEditor {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeMapping;

    const DDL: &str = "CREATE TABLE t (a INT, b TEXT, c BOOLEAN)";

    fn seeded() -> SchemaEditor {
        let mut editor = SchemaEditor::new(Dialect::PostgreSql);
        assert!(editor.set_source(DDL));
        editor
    }

    fn names(editor: &SchemaEditor) -> Vec<&str> {
        editor.columns().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_unseeded_editor_ignores_edits() {
        let mut editor = SchemaEditor::default();
        assert!(!editor.is_seeded());
        assert!(!editor.set_type(0, ColumnType::new(SemanticType::Json)));
        assert!(!editor.set_modifier(0, "x"));
        assert!(!editor.delete_column(0));
        assert!(editor.columns().is_empty());

        editor.set_source("not ddl");
        assert!(!editor.is_seeded());
    }

    #[test]
    fn test_delete_shifts_indices() {
        let mut editor = seeded();
        assert!(editor.delete_column(1));
        assert_eq!(names(&editor), ["a", "c"]);
        assert!(!editor.delete_column(2));
        assert_eq!(editor.parsed().len(), 3);
    }

    #[test]
    fn test_set_type_touches_one_row() {
        let mut editor = seeded();
        let before = editor.columns().to_vec();
        assert!(editor.set_type(0, ColumnType::new(SemanticType::Boolean)));
        assert_eq!(editor.columns()[0].column_type.base, SemanticType::Boolean);
        assert_eq!(editor.columns()[0].name, before[0].name);
        assert_eq!(editor.columns()[0].modifier, before[0].modifier);
        assert_eq!(editor.columns()[1..], before[1..]);
    }

    #[test]
    fn test_same_source_keeps_edits() {
        let mut editor = seeded();
        editor.set_modifier(2, "probabilityTrue: 0.7");
        assert!(!editor.set_source(DDL));
        assert_eq!(editor.columns()[2].modifier, "probabilityTrue: 0.7");
    }

    #[test]
    fn test_new_source_drops_edits() {
        let mut editor = seeded();
        editor.set_modifier(0, "min: 1");
        editor.delete_column(2);
        assert!(editor.set_source("CREATE TABLE t (a INT, b TEXT, c BOOLEAN) "));
        assert_eq!(editor.columns(), editor.parsed());
        assert_eq!(editor.columns().len(), 3);

        assert!(editor.set_source("garbage"));
        assert!(!editor.is_seeded());
    }

    #[test]
    fn test_dialect_switch_keeps_edits() {
        let mut editor = seeded();
        editor.set_type(1, ColumnType::new(SemanticType::Xml));
        editor.set_dialect(Dialect::MySql);
        assert_eq!(editor.dialect(), Dialect::MySql);
        assert_eq!(editor.columns()[1].column_type.base, SemanticType::Xml);
        assert_eq!(editor.parsed()[1].column_type.base, SemanticType::String);
    }

    #[test]
    fn test_dialect_switch_uses_builtin_mapping() {
        let mut editor = SchemaEditor::with_parser(
            Parser::new(Dialect::PostgreSql).with_mapping(TypeMapping::new()),
        );
        editor.set_source("CREATE TABLE t (x TINYINT)");
        // An empty mapping still yields a column, typed Unknown.
        assert!(editor.is_seeded());
        assert!(editor.columns()[0].column_type.is_unknown());

        editor.set_dialect(Dialect::MySql);
        assert!(editor.columns()[0].column_type.is_unknown());
        assert_eq!(editor.parsed()[0].column_type.base, SemanticType::Numeric);
    }

    #[test]
    fn test_valid_columns_skip_sentinels() {
        let mut editor = SchemaEditor::with_parser(
            Parser::new(Dialect::PostgreSql).with_options(ParseOptions::reference()),
        );
        editor.set_source("CREATE TABLE t (amount NUMERIC(10,2), note TEXT)");
        assert_eq!(editor.columns().len(), 3);
        let valid: Vec<usize> = editor.valid_columns().map(|(index, _)| index).collect();
        assert_eq!(valid, [0, 2]);
    }

    #[test]
    fn test_selectable_types_follow_dialect() {
        let mut editor = SchemaEditor::new(Dialect::PostgreSql);
        assert!(editor.selectable_types().contains(&SemanticType::KeyValue));
        editor.set_dialect(Dialect::MySql);
        assert!(!editor.selectable_types().contains(&SemanticType::KeyValue));
    }

    #[test]
    fn test_reset_keeps_dialect() {
        let mut editor = seeded();
        editor.set_dialect(Dialect::MySql);
        editor.reset();
        assert_eq!(editor.source(), "");
        assert!(editor.parsed().is_empty());
        assert!(!editor.is_seeded());
        assert_eq!(editor.dialect(), Dialect::MySql);
    }
}
