//! Shared invariant checks for fuzz harnesses and regression tests.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`check_parse_invariants`]: parse arbitrary text and assert the
//!   properties every parse result must have
//! - [`EditOp`] and [`check_editor_ops`]: replay arbitrary edit sequences on
//!   a [`SchemaEditor`] against a plain model of the working copy
//!
//! Every helper returns silently for uninteresting input and panics on a
//! broken invariant, so the same function can drive a honggfuzz target and
//! a regression test.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::dialect::Dialect;
use crate::editor::SchemaEditor;
use crate::parser::{Column, ParseOptions, Parser, SplitStrategy};
use crate::types::ColumnType;

/// Parse `ddl` with `options` and check the result.
///
/// # Panics
///
/// Panics if parsing is not deterministic, if [`Parser::parse`] and
/// [`Parser::parse_statement`] disagree, if a column has an empty name or an
/// untrimmed modifier, if a column type does not survive a display round
/// trip, or if the depth-aware split produces more columns than the naive
/// one.
pub fn check_parse_invariants(dialect: Dialect, options: ParseOptions, ddl: &str) {
    let parser = Parser::new(dialect).with_options(options);
    let columns = parser.parse(ddl);

    assert_eq!(columns, parser.parse(ddl), "parse is not deterministic");
    match parser.parse_statement(ddl) {
        Some(definition) => {
            assert_eq!(definition.columns, columns);
            assert!(!definition.table.is_empty(), "empty table name");
        }
        None => assert!(columns.is_empty(), "columns without a statement"),
    }

    for column in &columns {
        assert!(!column.name.is_empty(), "empty column name in {column:?}");
        assert_eq!(column.modifier, column.modifier.trim(), "untrimmed modifier");
        let rendered = column.column_type.to_string();
        assert_eq!(rendered.parse::<ColumnType>(), Ok(column.column_type));
    }

    let unskipped = options.with_skip_table_constraints(false);
    let naive = Parser::new(dialect)
        .with_options(unskipped.with_split(SplitStrategy::Naive))
        .parse(ddl);
    let aware = Parser::new(dialect)
        .with_options(unskipped.with_split(SplitStrategy::DepthAware))
        .parse(ddl);
    assert!(
        aware.len() <= naive.len(),
        "depth-aware split produced {} columns, naive {}",
        aware.len(),
        naive.len()
    );
}

/// One user action on a [`SchemaEditor`].
#[derive(Debug, Clone, PartialEq, Eq, arbitrary::Arbitrary)]
pub enum EditOp {
    /// Replace the source text.
    SetSource(String),
    /// Switch dialect.
    SetDialect(Dialect),
    /// Override a column type.
    SetType(u8, ColumnType),
    /// Override a modifier.
    SetModifier(u8, String),
    /// Delete a column.
    Delete(u8),
    /// Clear everything but the dialect.
    Reset,
}

/// Apply `ops` to a fresh editor and to a model of its working copy,
/// comparing them after every step.
///
/// # Panics
///
/// Panics if the editor diverges from the model or reports an edit outcome
/// that does not match the index range.
pub fn check_editor_ops(dialect: Dialect, ops: &[EditOp]) {
    let mut editor = SchemaEditor::new(dialect);
    let mut model_dialect = dialect;
    let mut model_source = String::new();
    let mut model: Option<Vec<Column>> = None;

    for op in ops {
        match op {
            EditOp::SetSource(text) => {
                let changed = editor.set_source(text.as_str());
                assert_eq!(changed, *text != model_source);
                if changed {
                    model_source.clone_from(text);
                    let parsed = Parser::new(model_dialect).parse(text);
                    model = (!parsed.is_empty()).then_some(parsed);
                }
            }
            EditOp::SetDialect(next) => {
                editor.set_dialect(*next);
                if *next != model_dialect {
                    model_dialect = *next;
                    if model.is_none() {
                        let parsed = Parser::new(model_dialect).parse(&model_source);
                        model = (!parsed.is_empty()).then_some(parsed);
                    }
                }
            }
            EditOp::SetType(index, column_type) => {
                let index = usize::from(*index);
                let target = model.as_mut().and_then(|columns| columns.get_mut(index));
                let expected = target.is_some();
                if let Some(column) = target {
                    column.column_type = *column_type;
                }
                assert_eq!(editor.set_type(index, *column_type), expected);
            }
            EditOp::SetModifier(index, modifier) => {
                let index = usize::from(*index);
                let target = model.as_mut().and_then(|columns| columns.get_mut(index));
                let expected = target.is_some();
                if let Some(column) = target {
                    column.modifier.clone_from(modifier);
                }
                assert_eq!(editor.set_modifier(index, modifier.as_str()), expected);
            }
            EditOp::Delete(index) => {
                let index = usize::from(*index);
                let expected = model.as_ref().is_some_and(|columns| index < columns.len());
                if let Some(columns) = model.as_mut().filter(|_| expected) {
                    columns.remove(index);
                }
                assert_eq!(editor.delete_column(index), expected);
            }
            EditOp::Reset => {
                editor.reset();
                model_source.clear();
                model = None;
            }
        }

        assert_eq!(editor.dialect(), model_dialect);
        assert_eq!(editor.source(), model_source);
        assert_eq!(editor.is_seeded(), model.is_some());
        assert_eq!(editor.columns(), model.as_deref().unwrap_or_default());
    }
}
