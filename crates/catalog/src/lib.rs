//! CQLog Catalog Library
//!
//! Maps relation names to column schemas and backing data files for one
//! database directory:
//!
//! ```text
//! <root>/schema.txt        one line per relation: name, then column kinds
//! <root>/files/<name>.csv  one record per line
//! ```
//!
//! A [`Catalog`] is loaded once per evaluation run and read-only afterwards;
//! scans share it by reference.

pub mod error;

pub use error::CatalogError;

use parser::DataType;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Relation name to schema and data-location mapping for one database
/// directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    schemas: HashMap<String, Vec<DataType>>,
}

impl Catalog {
    /// Load the catalog from a database directory by reading its
    /// `schema.txt`.
    ///
    /// Blank lines are skipped; a repeated relation name keeps the last
    /// declaration.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let root = root.into();
        let schema_path = root.join("schema.txt");
        let contents =
            fs::read_to_string(&schema_path).map_err(|source| CatalogError::SchemaNotFound {
                path: schema_path,
                source,
            })?;

        let mut schemas = HashMap::new();
        for line in contents.lines() {
            let mut tokens = line.split_whitespace();
            let Some(name) = tokens.next() else {
                continue;
            };
            let columns = tokens.map(DataType::from).collect();
            schemas.insert(name.to_string(), columns);
        }

        Ok(Self { root, schemas })
    }

    /// Ordered column kinds of a relation.
    pub fn schema(&self, relation: &str) -> Result<&[DataType], CatalogError> {
        self.schemas
            .get(relation)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::UnknownRelation(relation.to_string()))
    }

    /// Path of the CSV file backing a relation.
    #[must_use]
    pub fn data_path(&self, relation: &str) -> PathBuf {
        self.root.join("files").join(format!("{relation}.csv"))
    }

    /// Database directory this catalog was loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Declared relation names, in no particular order.
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database(schema: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("schema.txt"), schema).unwrap();
        dir
    }

    #[test]
    fn open_parses_column_kinds() {
        let dir = database("R int int\nS int string int\n");
        let catalog = Catalog::open(dir.path()).unwrap();
        assert_eq!(
            catalog.schema("R").unwrap(),
            &[DataType::Integer, DataType::Integer]
        );
        assert_eq!(
            catalog.schema("S").unwrap(),
            &[DataType::Integer, DataType::Text, DataType::Integer]
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = database("R int\n\n\nS string\n");
        let catalog = Catalog::open(dir.path()).unwrap();
        assert_eq!(catalog.relations().count(), 2);
    }

    #[test]
    fn unknown_relation_is_an_error() {
        let dir = database("R int\n");
        let catalog = Catalog::open(dir.path()).unwrap();
        assert!(matches!(
            catalog.schema("T"),
            Err(CatalogError::UnknownRelation(name)) if name == "T"
        ));
    }

    #[test]
    fn missing_schema_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Catalog::open(dir.path()),
            Err(CatalogError::SchemaNotFound { .. })
        ));
    }

    #[test]
    fn data_path_layout() {
        let dir = database("R int\n");
        let catalog = Catalog::open(dir.path()).unwrap();
        assert_eq!(
            catalog.data_path("R"),
            dir.path().join("files").join("R.csv")
        );
    }
}
