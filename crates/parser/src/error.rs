use crate::Rule;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Parser error: {0}")]
    Syntax(Box<pest::error::Error<Rule>>),
    #[error("Parser error: Missing '{0}' token")]
    MissingToken(&'static str),
    #[error("Parser error: unexpected rule in {0}: {1}")]
    UnexpectedRule(&'static str, String),
    #[error("Parser error: integer literal '{0}' is out of range")]
    IntegerOutOfRange(String),
    #[error("Parser error: aggregate must be the final head term in '{0}'")]
    MisplacedAggregate(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<pest::error::Error<Rule>> for ParserError {
    fn from(e: pest::error::Error<Rule>) -> Self {
        Self::Syntax(Box::new(e))
    }
}

impl From<std::io::Error> for ParserError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
