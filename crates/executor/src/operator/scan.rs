//! Scan: the leaf operator reading one relation's CSV file.

use super::{Operator, VariableMask};
use crate::error::ExecutorError;
use crate::tuple::Tuple;
use catalog::Catalog;
use parser::{Constant, DataType, RelationalAtom, Term};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::rc::Rc;

/// Reads a relation's backing file record by record, typing each field
/// against the catalog schema.
///
/// The variable mask mirrors the atom's term list: a variable's name where
/// the atom had a variable, an unnamed column where it had a literal. The
/// planner only ever hands Scan constant-free atoms, but literal positions
/// are supported for direct use.
pub struct Scan {
    relation: String,
    catalog: Rc<Catalog>,
    variable_mask: VariableMask,
    lines: Lines<BufReader<File>>,
}

impl std::fmt::Debug for Scan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scan")
            .field("relation", &self.relation)
            .field("variable_mask", &self.variable_mask)
            .finish_non_exhaustive()
    }
}

impl Scan {
    /// Open a scan over the relation named by `atom`.
    ///
    /// Fails fast: an undeclared relation or a missing data file is
    /// reported here, before any tuple is pulled.
    pub fn new(atom: &RelationalAtom, catalog: Rc<Catalog>) -> Result<Self, ExecutorError> {
        catalog.schema(atom.name())?;
        let variable_mask = atom
            .terms()
            .iter()
            .map(|term| term.as_variable().map(str::to_string))
            .collect();
        let lines = Self::open(&catalog, atom.name())?;
        Ok(Self {
            relation: atom.name().to_string(),
            catalog,
            variable_mask,
            lines,
        })
    }

    fn open(
        catalog: &Catalog,
        relation: &str,
    ) -> Result<Lines<BufReader<File>>, ExecutorError> {
        let path = catalog.data_path(relation);
        let file = File::open(&path).map_err(|source| ExecutorError::RelationDataNotFound {
            relation: relation.to_string(),
            path,
            source,
        })?;
        Ok(BufReader::new(file).lines())
    }

    fn parse_record(&self, line: &str) -> Result<Tuple, ExecutorError> {
        let schema = self.catalog.schema(&self.relation)?;
        // Any run of non-alphanumeric characters separates fields, so
        // `1,abc` and `1, abc` tokenize identically.
        let fields: Vec<&str> = line
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|field| !field.is_empty())
            .collect();
        if fields.len() != schema.len() {
            return Err(ExecutorError::MalformedRecord {
                relation: self.relation.clone(),
                reason: format!(
                    "expected {} field(s), found {} in '{line}'",
                    schema.len(),
                    fields.len()
                ),
            });
        }

        let mut terms = Vec::with_capacity(fields.len());
        for (field, kind) in fields.iter().zip(schema) {
            let term = match kind {
                DataType::Integer => {
                    let value =
                        field
                            .parse::<i64>()
                            .map_err(|_| ExecutorError::MalformedRecord {
                                relation: self.relation.clone(),
                                reason: format!("field '{field}' is not an integer"),
                            })?;
                    Term::Constant(Constant::Integer(value))
                }
                DataType::Text => Term::Constant(Constant::Text((*field).to_string())),
            };
            terms.push(term);
        }
        Ok(Tuple::new(&self.relation, terms))
    }
}

impl Operator for Scan {
    fn next_tuple(&mut self) -> Result<Option<Tuple>, ExecutorError> {
        match self.lines.next() {
            Some(line) => {
                let line = line?;
                Ok(Some(self.parse_record(&line)?))
            }
            None => Ok(None),
        }
    }

    fn reset(&mut self) -> Result<(), ExecutorError> {
        self.lines = Self::open(&self.catalog, &self.relation)?;
        Ok(())
    }

    fn variable_mask(&self) -> &[Option<String>] {
        &self.variable_mask
    }
}
