//! CQLog Parser Library
//!
//! A parser for CQLog conjunctive queries. Provides the typed query model
//! (terms, atoms, heads, aggregates) shared by the planner, the execution
//! engine, and the minimizer, plus the text parser producing [`Query`]
//! values from query files.

pub mod error;
pub mod logic;
pub mod primitive;
pub mod query;


// Re-export core types for convenient access
pub use error::ParserError;
pub use logic::{
    AggregateOperator, Atom, ComparisonAtom, ComparisonOperator, Head, RelationalAtom,
    SumAggregate, Term,
};
pub use primitive::{Constant, DataType};
pub use query::Query;

use pest::iterators::Pair;
use pest_derive::Parser;

/// The query parser is powered by Pest, a PEG parser framework.
#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct QueryParser;

pub type Result<T> = std::result::Result<T, ParserError>;

/// Trait for converting Pest parse trees into CQLog types.
///
/// All query constructs implement this trait to enable conversion from
/// parse trees to structured types.
pub trait Lexeme {
    /// Converts a Pest parse rule into a structured CQLog type.
    fn from_parsed_rule(parsed_rule: Pair<Rule>) -> Result<Self>
    where
        Self: Sized;
}
