use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog error: schema file not found at {path}: {source}")]
    SchemaNotFound {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Catalog error: relation '{0}' is not declared in the schema")]
    UnknownRelation(String),
}
