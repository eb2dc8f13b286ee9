//! Comparison predicates.
//!
//! - [`ComparisonOperator`]: `= | != | > | >= | < | <=`
//! - [`ComparisonAtom`]: `{left} {op} {right}`

use super::Term;
use crate::{Lexeme, ParserError, Result, Rule};
use pest::iterators::Pair;
use std::fmt;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterEqualThan,
    LessThan,
    LessEqualThan,
}

impl ComparisonOperator {
    /// Whether this operator compares by printed-form equality rather than
    /// by ordering.
    #[must_use]
    #[inline]
    pub fn is_equality(&self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterEqualThan => ">=",
            Self::LessThan => "<",
            Self::LessEqualThan => "<=",
        };
        write!(f, "{sym}")
    }
}

impl Lexeme for ComparisonOperator {
    /// Parse a comparison operator from the grammar.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self> {
        let op = parsed_rule
            .into_inner()
            .next()
            .ok_or(ParserError::MissingToken("comparison operator"))?;
        match op.as_rule() {
            Rule::equal => Ok(Self::Equal),
            Rule::not_equal => Ok(Self::NotEqual),
            Rule::greater_than => Ok(Self::GreaterThan),
            Rule::greater_equal => Ok(Self::GreaterEqualThan),
            Rule::less_than => Ok(Self::LessThan),
            Rule::less_equal => Ok(Self::LessEqualThan),
            other => Err(ParserError::UnexpectedRule(
                "comparison operator",
                format!("{other:?}"),
            )),
        }
    }
}

/// `{left} {op} {right}` boolean predicate over two terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparisonAtom {
    left: Term,
    operator: ComparisonOperator,
    right: Term,
}

impl ComparisonAtom {
    /// Create a new comparison.
    #[must_use]
    pub fn new(left: Term, operator: ComparisonOperator, right: Term) -> Self {
        Self {
            left,
            operator,
            right,
        }
    }

    /// Left-hand term.
    #[must_use]
    #[inline]
    pub fn left(&self) -> &Term {
        &self.left
    }

    /// Operator.
    #[must_use]
    #[inline]
    pub fn operator(&self) -> &ComparisonOperator {
        &self.operator
    }

    /// Right-hand term.
    #[must_use]
    #[inline]
    pub fn right(&self) -> &Term {
        &self.right
    }

    /// Variable names among the operands (order preserved).
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        [&self.left, &self.right]
            .into_iter()
            .filter_map(Term::as_variable)
    }
}

impl fmt::Display for ComparisonAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

impl Lexeme for ComparisonAtom {
    /// Parse `term ~ comparison_operator ~ term`.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self> {
        let mut inner = parsed_rule.into_inner();

        let left_pair = inner
            .next()
            .ok_or(ParserError::MissingToken("comparison left operand"))?;
        let op_pair = inner
            .next()
            .ok_or(ParserError::MissingToken("comparison operator"))?;
        let right_pair = inner
            .next()
            .ok_or(ParserError::MissingToken("comparison right operand"))?;

        Ok(Self::new(
            Term::from_parsed_rule(left_pair)?,
            ComparisonOperator::from_parsed_rule(op_pair)?,
            Term::from_parsed_rule(right_pair)?,
        ))
    }
}
