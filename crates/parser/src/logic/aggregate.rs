//! Aggregate expressions for query heads.
//!
//! - [`AggregateOperator`]: `SUM | AVG`
//! - [`SumAggregate`]: `op(t1 * ... * tN)` (e.g. `SUM(x * y)`)

use super::Term;
use crate::{Lexeme, ParserError, Result, Rule};
use itertools::Itertools;
use pest::iterators::Pair;
use std::fmt;

/// Supported aggregate operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOperator {
    Sum,
    Avg,
}

impl fmt::Display for AggregateOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => write!(f, "SUM"),
            Self::Avg => write!(f, "AVG"),
        }
    }
}

impl Lexeme for AggregateOperator {
    /// Parse an aggregate operator from the grammar.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self> {
        let op = parsed_rule
            .into_inner()
            .next()
            .ok_or(ParserError::MissingToken("aggregate operator"))?;
        match op.as_rule() {
            Rule::sum => Ok(Self::Sum),
            Rule::avg => Ok(Self::Avg),
            other => Err(ParserError::UnexpectedRule(
                "aggregate operator",
                format!("{other:?}"),
            )),
        }
    }
}

/// `op(t1 * ... * tN)` aggregate over a product of terms.
///
/// Only the first product term is actually aggregated by the engine; the
/// remaining factors are carried for display. That simplification is part of
/// the engine's contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SumAggregate {
    operator: AggregateOperator,
    product_terms: Vec<Term>,
}

impl SumAggregate {
    /// Create a new aggregate expression.
    #[must_use]
    pub fn new(operator: AggregateOperator, product_terms: Vec<Term>) -> Self {
        Self {
            operator,
            product_terms,
        }
    }

    /// Aggregate operator.
    #[must_use]
    #[inline]
    pub fn operator(&self) -> &AggregateOperator {
        &self.operator
    }

    /// Product terms (as a slice).
    #[must_use]
    #[inline]
    pub fn product_terms(&self) -> &[Term] {
        &self.product_terms
    }

    /// The term whose values are aggregated: the first product term.
    ///
    /// # Panics
    /// Panics if constructed with an empty product; the grammar requires at
    /// least one term.
    #[must_use]
    pub fn aggregated_term(&self) -> &Term {
        &self.product_terms[0]
    }
}

impl fmt::Display for SumAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.operator, self.product_terms.iter().join(" * "))
    }
}

impl Lexeme for SumAggregate {
    /// Parse `aggregate_operator "(" term ("*" term)* ")"`.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self> {
        let mut inner = parsed_rule.into_inner();

        let op_pair = inner
            .next()
            .ok_or(ParserError::MissingToken("aggregate operator"))?;
        let operator = AggregateOperator::from_parsed_rule(op_pair)?;

        let mut product_terms = Vec::new();
        for pair in inner {
            if pair.as_rule() == Rule::term {
                product_terms.push(Term::from_parsed_rule(pair)?);
            }
        }
        if product_terms.is_empty() {
            return Err(ParserError::MissingToken("aggregate product term"));
        }

        Ok(Self::new(operator, product_terms))
    }
}
