use catalog::CatalogError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Executor error: data file for relation '{relation}' not found at {path}: {source}")]
    RelationDataNotFound {
        relation: String,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Executor error: variable '{0}' has no binding site")]
    UnboundVariable(String),
    #[error("Executor error: cannot order '{left}' against '{right}': operands must be constants of the same kind")]
    TypeMismatch { left: String, right: String },
    #[error("Executor error: malformed record in relation '{relation}': {reason}")]
    MalformedRecord { relation: String, reason: String },
    #[error("Executor error: cannot aggregate non-integer value '{0}'")]
    NonIntegerAggregate(String),
    #[error("Executor error: query body contains no relational atoms")]
    EmptyBody,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
