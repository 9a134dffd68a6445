//! Byte-level scanning of `CREATE TABLE` statements.
//!
//! The scanner only finds the statement shape and cuts the column list
//! into fragments; it never interprets types.

use alloc::vec::Vec;

/// The pieces of a located `CREATE TABLE` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct CreateTableSpan<'a> {
    /// Table name with quoting stripped; the last part of a qualified name.
    pub table: &'a str,
    /// Everything between the opening parenthesis and the last `)`.
    pub body: &'a str,
}

/// Find the first `CREATE TABLE <name> ( ... )` in `input`.
///
/// The body is greedy: it runs to the last `)` of the input, so trailing
/// statements after the first one are swallowed into it.
pub(super) fn locate_create_table(input: &str) -> Option<CreateTableSpan<'_>> {
    let bytes = input.as_bytes();
    let body_end = input.rfind(')')?;
    let mut from = 0;
    while let Some(start) = find_keyword(bytes, from, b"CREATE") {
        if let Some(span) = match_from(input, start + b"CREATE".len(), body_end) {
            return Some(span);
        }
        from = start + 1;
    }
    None
}

/// Try to match the rest of the statement right after a `CREATE` keyword,
/// with `body_end` the position of the last `)` of the input.
fn match_from(input: &str, mut pos: usize, body_end: usize) -> Option<CreateTableSpan<'_>> {
    let bytes = input.as_bytes();

    pos = skip_required_whitespace(bytes, pos)?;
    pos = expect_keyword(bytes, pos, b"TABLE")?;
    pos = skip_required_whitespace(bytes, pos)?;

    // Optional IF NOT EXISTS
    if let Some(after) = expect_keyword(bytes, pos, b"IF")
        .and_then(|p| skip_required_whitespace(bytes, p))
        .and_then(|p| expect_keyword(bytes, p, b"NOT"))
        .and_then(|p| skip_required_whitespace(bytes, p))
        .and_then(|p| expect_keyword(bytes, p, b"EXISTS"))
        .and_then(|p| skip_required_whitespace(bytes, p))
    {
        pos = after;
    }

    let (mut table, mut after_name) = read_quoted_identifier(input, pos)?;
    // Schema-qualified name: keep the last part.
    while bytes.get(after_name) == Some(&b'.') {
        let (part, next) = read_quoted_identifier(input, after_name + 1)?;
        table = part;
        after_name = next;
    }

    pos = skip_whitespace(bytes, after_name);
    if bytes.get(pos) != Some(&b'(') {
        return None;
    }
    let body_start = pos + 1;
    if body_end <= body_start {
        return None;
    }

    Some(CreateTableSpan {
        table,
        body: &input[body_start..body_end],
    })
}

/// Split a column list on every comma.
pub(super) fn split_naive(body: &str) -> Vec<&str> {
    body.split(',').collect()
}

/// Split a column list on commas outside parentheses and quoted text.
pub(super) fn split_top_level(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut fragments = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut start = 0;

    for (pos, &b) in bytes.iter().enumerate() {
        if let Some(q) = quote {
            // A doubled quote closes and reopens, which leaves us inside.
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                fragments.push(&body[start..pos]);
                start = pos + 1;
            }
            _ if is_quote(b) => quote = Some(b),
            _ => {}
        }
    }
    fragments.push(&body[start..]);
    fragments
}

/// Case-insensitive search for `keyword` starting at `from`.
fn find_keyword(bytes: &[u8], from: usize, keyword: &[u8]) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(keyword.len())
        .position(|window| window.eq_ignore_ascii_case(keyword))
        .map(|offset| from + offset)
}

/// Match `keyword` at `pos` as a whole word, returning the position after it.
fn expect_keyword(bytes: &[u8], pos: usize, keyword: &[u8]) -> Option<usize> {
    let end = pos.checked_add(keyword.len())?;
    let candidate = bytes.get(pos..end)?;
    if !candidate.eq_ignore_ascii_case(keyword) {
        return None;
    }
    if bytes.get(end).copied().is_some_and(is_word) {
        return None;
    }
    Some(end)
}

/// Read an identifier optionally wrapped in quotes.
///
/// Returns the identifier without quotes and the position after it.
pub(super) fn read_quoted_identifier(input: &str, mut pos: usize) -> Option<(&str, usize)> {
    let bytes = input.as_bytes();
    if bytes.get(pos).copied().is_some_and(is_quote) {
        pos += 1;
    }
    let start = pos;
    while bytes.get(pos).copied().is_some_and(is_word) {
        pos += 1;
    }
    if pos == start {
        return None;
    }
    let ident = &input[start..pos];
    if bytes.get(pos).copied().is_some_and(is_quote) {
        pos += 1;
    }
    Some((ident, pos))
}

pub(super) fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    pos
}

fn skip_required_whitespace(bytes: &[u8], pos: usize) -> Option<usize> {
    let after = skip_whitespace(bytes, pos);
    (after > pos).then_some(after)
}

/// Check if a byte belongs to an unquoted identifier.
pub(super) fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Check if a byte opens or closes a quoted identifier or literal.
pub(super) fn is_quote(b: u8) -> bool {
    matches!(b, b'\'' | b'"' | b'`')
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_locate_simple() {
        let span = locate_create_table("CREATE TABLE users (id INT, name TEXT);").unwrap();
        assert_eq!(span.table, "users");
        assert_eq!(span.body, "id INT, name TEXT");
    }

    #[test]
    fn test_locate_is_case_insensitive_and_quote_tolerant() {
        let span = locate_create_table("create   table `orders`(\n  id int\n)").unwrap();
        assert_eq!(span.table, "orders");
        assert_eq!(span.body, "\n  id int\n");

        let span = locate_create_table("CREATE TABLE 'odd' (a INT)").unwrap();
        assert_eq!(span.table, "odd");
    }

    #[test]
    fn test_locate_if_not_exists_and_qualified_name() {
        let span =
            locate_create_table(r#"CREATE TABLE IF NOT EXISTS "public"."users" (id INT)"#).unwrap();
        assert_eq!(span.table, "users");
        assert_eq!(span.body, "id INT");
    }

    #[test]
    fn test_locate_body_is_greedy() {
        let span = locate_create_table(
            "CREATE TABLE a (x INT); CREATE TABLE b (y INT);",
        )
        .unwrap();
        assert_eq!(span.table, "a");
        assert_eq!(span.body, "x INT); CREATE TABLE b (y INT");
    }

    #[test]
    fn test_locate_skips_malformed_first_occurrence() {
        let span = locate_create_table("CREATE TABLE; CREATE TABLE t (a INT)").unwrap();
        assert_eq!(span.table, "t");
    }

    #[test]
    fn test_locate_many_unterminated_statements() {
        let unterminated = "CREATE TABLE t (".repeat(20_000);
        assert_eq!(locate_create_table(&unterminated), None);

        // A lone `)` before every candidate rejects each one.
        let closed_early = alloc::format!("){unterminated}");
        assert_eq!(locate_create_table(&closed_early), None);

        // Every candidate shares the single closing parenthesis at the end.
        let terminated = alloc::format!("{unterminated}a INT)");
        let span = locate_create_table(&terminated).unwrap();
        assert_eq!(span.table, "t");
        assert!(span.body.ends_with("CREATE TABLE t (a INT"));
    }

    #[test]
    fn test_locate_rejects_garbage() {
        assert_eq!(locate_create_table(""), None);
        assert_eq!(locate_create_table("SELECT 1"), None);
        assert_eq!(locate_create_table("CREATE TABLE t"), None);
        assert_eq!(locate_create_table("CREATE TABLE t ()"), None);
        assert_eq!(locate_create_table("CREATE TABLE (a INT)"), None);
        assert_eq!(locate_create_table("CREATE TABLEt (a INT)"), None);
    }

    #[test]
    fn test_split_naive_cuts_inside_parentheses() {
        assert_eq!(
            split_naive("amount NUMERIC(10,2), note TEXT"),
            vec!["amount NUMERIC(10", "2)", " note TEXT"]
        );
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(
            split_top_level("amount NUMERIC(10,2), kind ENUM('a,b','c'), note TEXT"),
            vec!["amount NUMERIC(10,2)", " kind ENUM('a,b','c')", " note TEXT"]
        );
        assert_eq!(
            split_top_level("s TEXT DEFAULT 'it''s, fine', n INT"),
            vec!["s TEXT DEFAULT 'it''s, fine'", " n INT"]
        );
    }

    #[test]
    fn test_split_top_level_tolerates_unbalanced_input() {
        assert_eq!(split_top_level("a INT), b INT"), vec!["a INT)", " b INT"]);
        assert_eq!(split_top_level("a CHAR('x, b INT"), vec!["a CHAR('x, b INT"]);
    }
}
