//! Terms: the arguments of atoms.

use crate::primitive::Constant;
use crate::{Lexeme, ParserError, Result, Rule};
use pest::iterators::Pair;
use std::fmt;

/// An argument to an atom: a variable or a literal constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(String),
    Constant(Constant),
}

impl Term {
    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    #[must_use]
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    /// The variable name, when this term is a variable.
    #[must_use]
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            Self::Constant(_) => None,
        }
    }

    /// The constant, when this term is a constant.
    #[must_use]
    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Self::Constant(c) => Some(c),
            Self::Variable(_) => None,
        }
    }

    /// Equality by canonical printed form.
    ///
    /// This is the `=`/`!=` semantics of the engine: `5` and `'5'` are
    /// equal because they print identically.
    #[must_use]
    pub fn print_eq(&self, other: &Term) -> bool {
        self.to_string() == other.to_string()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => write!(f, "{name}"),
            Self::Constant(c) => write!(f, "{c}"),
        }
    }
}

impl Lexeme for Term {
    /// Parse a term from the grammar.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self> {
        let inner = parsed_rule
            .into_inner()
            .next()
            .ok_or(ParserError::MissingToken("term value"))?;
        match inner.as_rule() {
            Rule::variable => Ok(Self::Variable(inner.as_str().to_string())),
            Rule::constant => Ok(Self::Constant(Constant::from_parsed_rule(inner)?)),
            other => Err(ParserError::UnexpectedRule("term", format!("{other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Term {
        Term::Variable(name.into())
    }
    fn int(v: i64) -> Term {
        Term::Constant(Constant::Integer(v))
    }
    fn text(s: &str) -> Term {
        Term::Constant(Constant::Text(s.into()))
    }

    #[test]
    fn accessors() {
        let v = var("x");
        assert!(v.is_variable());
        assert_eq!(v.as_variable(), Some("x"));
        assert_eq!(v.as_constant(), None);

        let c = int(42);
        assert!(c.is_constant());
        assert_eq!(c.as_variable(), None);
        assert_eq!(c.as_constant(), Some(&Constant::Integer(42)));
    }

    #[test]
    fn display_golden() {
        assert_eq!(var("x").to_string(), "x");
        assert_eq!(int(5).to_string(), "5");
        assert_eq!(text("abc").to_string(), "abc");
    }

    #[test]
    fn print_eq_across_kinds() {
        assert!(int(5).print_eq(&text("5")));
        assert!(!int(5).print_eq(&int(6)));
        // A variable and a constant with the same printed form also compare
        // equal under print_eq; predicates only ever see constants.
        assert!(var("5").print_eq(&int(5)));
    }
}
