//! Query heads.
//!
//! A head is `name(v1, ..., vN)` with an optional trailing SUM/AVG
//! aggregate: `Q(x, SUM(y))`.

use super::SumAggregate;
use crate::{Lexeme, ParserError, Result, Rule};
use itertools::Itertools;
use pest::iterators::Pair;
use std::fmt;

/// `name(v1, ..., vN [, aggregate])`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Head {
    name: String,
    variables: Vec<String>,
    aggregate: Option<SumAggregate>,
}

impl Head {
    /// Create a new query head.
    #[must_use]
    pub fn new(name: String, variables: Vec<String>, aggregate: Option<SumAggregate>) -> Self {
        Self {
            name,
            variables,
            aggregate,
        }
    }

    /// Output relation name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output variables, in order, excluding the aggregate.
    #[must_use]
    #[inline]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The trailing aggregate, if the query has one.
    #[must_use]
    #[inline]
    pub fn aggregate(&self) -> Option<&SumAggregate> {
        self.aggregate.as_ref()
    }

    /// Arity (output variables plus the aggregate column, if any).
    #[must_use]
    pub fn arity(&self) -> usize {
        self.variables.len() + usize::from(self.aggregate.is_some())
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vars = self.variables.iter().join(", ");
        match &self.aggregate {
            Some(agg) if self.variables.is_empty() => write!(f, "{}({agg})", self.name),
            Some(agg) => write!(f, "{}({vars}, {agg})", self.name),
            None => write!(f, "{}({vars})", self.name),
        }
    }
}

impl Lexeme for Head {
    /// Parse `relation_name "(" (head_term ("," head_term)*)? ")"`.
    ///
    /// The aggregate, when present, must be the final head term.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self> {
        let span = parsed_rule.as_str().to_string();
        let mut inner = parsed_rule.into_inner();

        let name = inner
            .next()
            .ok_or(ParserError::MissingToken("head relation name"))?
            .as_str()
            .to_string();

        let mut variables = Vec::new();
        let mut aggregate = None;
        for pair in inner {
            if pair.as_rule() != Rule::head_term {
                continue;
            }
            if aggregate.is_some() {
                // Anything after an aggregate is out of place.
                return Err(ParserError::MisplacedAggregate(span));
            }
            let term = pair
                .into_inner()
                .next()
                .ok_or(ParserError::MissingToken("head term"))?;
            match term.as_rule() {
                Rule::variable => variables.push(term.as_str().to_string()),
                Rule::aggregate => aggregate = Some(SumAggregate::from_parsed_rule(term)?),
                other => {
                    return Err(ParserError::UnexpectedRule(
                        "head term",
                        format!("{other:?}"),
                    ))
                }
            }
        }

        Ok(Self::new(name, variables, aggregate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{AggregateOperator, Term};

    fn agg(name: &str) -> SumAggregate {
        SumAggregate::new(AggregateOperator::Sum, vec![Term::Variable(name.into())])
    }

    #[test]
    fn head_basics() {
        let h = Head::new("Q".into(), vec!["x".into(), "y".into()], None);
        assert_eq!(h.name(), "Q");
        assert_eq!(h.arity(), 2);
        assert_eq!(h.to_string(), "Q(x, y)");
    }

    #[test]
    fn head_with_aggregate() {
        let h = Head::new("Q".into(), vec!["x".into()], Some(agg("y")));
        assert_eq!(h.arity(), 2);
        assert_eq!(h.to_string(), "Q(x, SUM(y))");
    }

    #[test]
    fn head_aggregate_only() {
        let h = Head::new("Q".into(), vec![], Some(agg("y")));
        assert_eq!(h.arity(), 1);
        assert_eq!(h.to_string(), "Q(SUM(y))");
    }

    #[test]
    fn head_nullary() {
        let h = Head::new("Flag".into(), vec![], None);
        assert_eq!(h.arity(), 0);
        assert_eq!(h.to_string(), "Flag()");
    }
}
