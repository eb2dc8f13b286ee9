//! Atoms: the building blocks of query bodies.
//!
//! - [`RelationalAtom`]: `name(t1, ..., tN)`
//! - [`Atom`]: a body atom, either relational or a comparison predicate

use super::{ComparisonAtom, Term};
use crate::{Lexeme, ParserError, Result, Rule};
use itertools::Itertools;
use pest::iterators::Pair;
use std::fmt;

/// `name(t1, ..., tN)` over a stored relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationalAtom {
    name: String,
    terms: Vec<Term>,
}

impl RelationalAtom {
    /// Create a new relational atom.
    #[must_use]
    pub fn new(name: &str, terms: Vec<Term>) -> Self {
        Self {
            name: name.to_string(),
            terms,
        }
    }

    /// Relation name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Terms (as a slice).
    #[must_use]
    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of terms.
    #[must_use]
    #[inline]
    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// Variable names in argument order, duplicates kept.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().filter_map(Term::as_variable)
    }
}

impl fmt::Display for RelationalAtom {
    /// Formats as `name(a, b, 5)`, always including parentheses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.terms.iter().join(", "))
    }
}

impl Lexeme for RelationalAtom {
    /// Parse `relation_name "(" (term ("," term)*)? ")"`.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self> {
        let mut inner = parsed_rule.into_inner();

        let name = inner
            .next()
            .ok_or(ParserError::MissingToken("relation name"))?
            .as_str()
            .to_string();

        let mut terms = Vec::new();
        for pair in inner {
            if pair.as_rule() == Rule::term {
                terms.push(Term::from_parsed_rule(pair)?);
            }
        }

        Ok(Self { name, terms })
    }
}

/// A body atom: a relational atom or a comparison predicate.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    Relational(RelationalAtom),
    Comparison(ComparisonAtom),
}

impl Atom {
    #[must_use]
    pub fn is_relational(&self) -> bool {
        matches!(self, Self::Relational(_))
    }

    /// The relational atom, when this is one.
    #[must_use]
    pub fn as_relational(&self) -> Option<&RelationalAtom> {
        match self {
            Self::Relational(atom) => Some(atom),
            Self::Comparison(_) => None,
        }
    }

    /// The comparison atom, when this is one.
    #[must_use]
    pub fn as_comparison(&self) -> Option<&ComparisonAtom> {
        match self {
            Self::Comparison(atom) => Some(atom),
            Self::Relational(_) => None,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relational(atom) => write!(f, "{atom}"),
            Self::Comparison(atom) => write!(f, "{atom}"),
        }
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate Debug to Display
        fmt::Display::fmt(self, f)
    }
}

impl Lexeme for Atom {
    /// Parse a `body_atom`: either alternative of the grammar choice.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self> {
        let inner = parsed_rule
            .into_inner()
            .next()
            .ok_or(ParserError::MissingToken("body atom"))?;
        match inner.as_rule() {
            Rule::relational_atom => Ok(Self::Relational(RelationalAtom::from_parsed_rule(inner)?)),
            Rule::comparison_atom => Ok(Self::Comparison(ComparisonAtom::from_parsed_rule(inner)?)),
            other => Err(ParserError::UnexpectedRule(
                "body atom",
                format!("{other:?}"),
            )),
        }
    }
}
