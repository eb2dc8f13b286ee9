//! Constant value types for CQLog queries.

use crate::{Lexeme, ParserError, Result, Rule};
use pest::iterators::Pair;
use std::cmp::Ordering;
use std::fmt;

/// A literal constant in a conjunctive query or a relation record.
///
/// Constants may appear in atom arguments and in comparison predicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    /// 64-bit signed integer constant.
    Integer(i64),

    /// UTF-8 string constant.
    Text(String),
}

impl Constant {
    /// The integer value, when this constant is an integer.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Human-readable kind name, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Text(_) => "string",
        }
    }

    /// Ordering between two constants of the same kind: integers compare
    /// numerically, text compares lexicographically by codepoint.
    ///
    /// Returns `None` for mismatched kinds; ordering across kinds is a type
    /// error that callers must surface.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Constant {
    /// Prints the canonical form: integers as written, text WITHOUT quotes.
    ///
    /// Equality predicates compare this canonical printed form, so
    /// `Integer(5)` and `Text("5")` are equal under `=`. That is a semantic
    /// property of the engine, not a formatting convenience.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Lexeme for Constant {
    /// Parses a constant from the grammar.
    ///
    /// String literals are stripped of their surrounding single quotes.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self> {
        let inner = parsed_rule
            .into_inner()
            .next()
            .ok_or(ParserError::MissingToken("constant value"))?;
        match inner.as_rule() {
            Rule::integer => {
                let s = inner.as_str();
                s.parse::<i64>()
                    .map(Self::Integer)
                    .map_err(|_| ParserError::IntegerOutOfRange(s.to_string()))
            }
            Rule::string => Ok(Self::Text(inner.as_str().trim_matches('\'').to_string())),
            other => Err(ParserError::UnexpectedRule(
                "constant",
                format!("{other:?}"),
            )),
        }
    }
}
