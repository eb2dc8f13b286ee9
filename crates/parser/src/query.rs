//! Parsed conjunctive queries.
//!
//! A query is a head plus an ordered body of relational and comparison
//! atoms. Queries are immutable once parsed; the planner and minimizer build
//! new atoms rather than mutating these.

use crate::logic::{Atom, Head};
use crate::{Lexeme, ParserError, QueryParser, Result, Rule};
use itertools::Itertools;
use pest::iterators::Pair;
use pest::Parser;
use std::fmt;
use std::fs;
use std::path::Path;

/// A complete conjunctive query: `Head :- atom1, atom2, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    head: Head,
    body: Vec<Atom>,
}

impl Query {
    /// Create a query from parts.
    #[must_use]
    pub fn new(head: Head, body: Vec<Atom>) -> Self {
        Self { head, body }
    }

    /// Query head.
    #[must_use]
    #[inline]
    pub fn head(&self) -> &Head {
        &self.head
    }

    /// Query body, in source order.
    #[must_use]
    #[inline]
    pub fn body(&self) -> &[Atom] {
        &self.body
    }

    /// Parse a query from text.
    pub fn parse(input: &str) -> Result<Self> {
        let parsed = QueryParser::parse(Rule::query, input)?
            .next()
            .ok_or(ParserError::MissingToken("query"))?;
        Self::from_parsed_rule(parsed)
    }

    /// Parse a query from a file.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }
}

impl fmt::Display for Query {
    /// Formats as `Head :- atom1, atom2, ...` with no trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :- {}", self.head, self.body.iter().join(", "))
    }
}

impl Lexeme for Query {
    /// Parse `head ~ ":-" ~ body`.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self> {
        let mut inner = parsed_rule.into_inner();

        let head_pair = inner.next().ok_or(ParserError::MissingToken("head"))?;
        let head = Head::from_parsed_rule(head_pair)?;

        let body_pair = inner.next().ok_or(ParserError::MissingToken("body"))?;
        let body: Vec<Atom> = body_pair
            .into_inner()
            .filter(|pair| pair.as_rule() == Rule::body_atom)
            .map(Atom::from_parsed_rule)
            .collect::<Result<_>>()?;

        Ok(Self::new(head, body))
    }
}
