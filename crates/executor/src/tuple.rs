//! Result tuples flowing between operators.

use itertools::Itertools;
use parser::Term;
use std::fmt;

/// One row produced by an operator: an origin tag plus an ordered term list.
///
/// Positional meaning is carried by the producing operator's variable mask,
/// never by the tuple itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    origin: String,
    terms: Vec<Term>,
}

impl Tuple {
    /// Create a tuple tagged with the operator or relation that produced it.
    #[must_use]
    pub fn new(origin: &str, terms: Vec<Term>) -> Self {
        Self {
            origin: origin.to_string(),
            terms,
        }
    }

    /// Name of the relation or operator this tuple came from.
    #[must_use]
    #[inline]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Terms (as a slice).
    #[must_use]
    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of fields.
    #[must_use]
    #[inline]
    pub fn arity(&self) -> usize {
        self.terms.len()
    }
}

impl fmt::Display for Tuple {
    /// Formats fields comma-and-space separated: `1, abc, 5`.
    ///
    /// This printed form doubles as the dedup and grouping key upstream, so
    /// it must stay in sync with [`Term`]'s canonical printing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.terms.iter().join(", "))
    }
}
