//! Keyword-based detection of SQL that can change the catalog.
//!
//! This is not a parser. Each statement is reduced to its leading keyword
//! and compared with a fixed list of verbs. Anything that starts with one of
//! them counts as mutating even if it would fail to parse; a spurious cache
//! refresh is cheap, a stale schema is not.

use serde::{Deserialize, Serialize};

/// Statement verbs whose execution invalidates a captured catalog snapshot.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Debug)]
pub enum CatalogVerb {
    Attach,
    Detach,
    Create,
    Drop,
    Alter,
    Insert,
    Update,
    Delete,
    Copy,
}

impl CatalogVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attach => "ATTACH",
            Self::Detach => "DETACH",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Alter => "ALTER",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Copy => "COPY",
        }
    }

    /// Case-insensitive keyword lookup.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let verb = match keyword.to_ascii_uppercase().as_str() {
            "ATTACH" => Self::Attach,
            "DETACH" => Self::Detach,
            "CREATE" => Self::Create,
            "DROP" => Self::Drop,
            "ALTER" => Self::Alter,
            "INSERT" => Self::Insert,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            "COPY" => Self::Copy,
            _ => return None,
        };
        Some(verb)
    }
}

impl std::fmt::Display for CatalogVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns `true` if running `sql` could change tables, schemas, attached
/// databases or row counts.
///
/// Batches are mutating if any one statement is.
pub fn has_updates_to_datasource(sql: &str) -> bool {
    !mutating_verbs(sql).is_empty()
}

/// The verb of every mutating statement in `sql`, in order.
pub fn mutating_verbs(sql: &str) -> Vec<CatalogVerb> {
    split_statements(sql)
        .into_iter()
        .filter_map(leading_keyword)
        .filter_map(CatalogVerb::from_keyword)
        .collect()
}

/// First word of a statement after whitespace and comments.
fn leading_keyword(statement: &str) -> Option<&str> {
    let body = skip_trivia(statement);
    let end = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    let keyword = &body[..end];
    (!keyword.is_empty()).then_some(keyword)
}

fn skip_trivia(mut s: &str) -> &str {
    loop {
        s = s.trim_start();
        if let Some(rest) = s.strip_prefix("--") {
            s = rest.find('\n').map_or("", |i| &rest[i + 1..]);
        } else if let Some(rest) = s.strip_prefix("/*") {
            s = rest.find("*/").map_or("", |i| &rest[i + 2..]);
        } else {
            return s;
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lexical {
    Code,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment,
}

/// Splits on `;` outside literals, quoted identifiers and comments.
/// Unterminated quotes or comments run to the end of the text.
fn split_statements(sql: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut state = Lexical::Code;
    let mut start = 0;
    let mut chars = sql.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        state = match (state, c) {
            (Lexical::Code, ';') => {
                statements.push(&sql[start..i]);
                start = i + 1;
                Lexical::Code
            }
            (Lexical::Code, '\'') => Lexical::SingleQuoted,
            (Lexical::Code, '"') => Lexical::DoubleQuoted,
            (Lexical::Code, '-') if next == Some('-') => {
                chars.next();
                Lexical::LineComment
            }
            (Lexical::Code, '/') if next == Some('*') => {
                chars.next();
                Lexical::BlockComment
            }
            // A doubled quote is an escaped quote and keeps us inside.
            (Lexical::SingleQuoted, '\'') if next == Some('\'') => {
                chars.next();
                Lexical::SingleQuoted
            }
            (Lexical::SingleQuoted, '\'') | (Lexical::DoubleQuoted, '"') => Lexical::Code,
            (Lexical::LineComment, '\n') => Lexical::Code,
            (Lexical::BlockComment, '*') if next == Some('/') => {
                chars.next();
                Lexical::Code
            }
            (state, _) => state,
        };
    }
    statements.push(&sql[start..]);
    statements
}
