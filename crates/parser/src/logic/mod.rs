//! Logic components of a conjunctive query.
//!
//! - [`term`]: variables and constants
//! - [`atom`]: relational atoms and the body-atom sum type
//! - [`comparison`]: comparison operators and predicates
//! - [`aggregate`]: SUM/AVG aggregate expressions
//! - [`head`]: query heads

pub mod aggregate;
pub mod atom;
pub mod comparison;
pub mod head;
pub mod term;

// Re-exports for a convenient public surface.
pub use aggregate::{AggregateOperator, SumAggregate};
pub use atom::{Atom, RelationalAtom};
pub use comparison::{ComparisonAtom, ComparisonOperator};
pub use head::Head;
pub use term::Term;
