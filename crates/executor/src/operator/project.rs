//! Project: reorders columns and suppresses duplicate result tuples.

use super::{position_of, Operator, VariableMask};
use crate::error::ExecutorError;
use crate::tuple::Tuple;
use std::collections::HashSet;

/// Projects the child's tuples onto a named column list.
///
/// Duplicates are suppressed by printed form: the seen-set grows for the
/// lifetime of one full pass and is cleared on `reset()`.
pub struct Project {
    child: Box<dyn Operator>,
    output_name: String,
    indices: Vec<usize>,
    variable_mask: VariableMask,
    seen: HashSet<String>,
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("output_name", &self.output_name)
            .field("indices", &self.indices)
            .field("variable_mask", &self.variable_mask)
            .finish_non_exhaustive()
    }
}

impl Project {
    /// Resolve `columns` against the child's mask. A column the child does
    /// not produce is a construction-time error.
    pub fn new(
        child: Box<dyn Operator>,
        output_name: &str,
        columns: &[String],
    ) -> Result<Self, ExecutorError> {
        let child_mask = child.variable_mask();
        let mut indices = Vec::with_capacity(columns.len());
        let mut variable_mask = Vec::with_capacity(columns.len());
        for column in columns {
            let index = position_of(child_mask, column)
                .ok_or_else(|| ExecutorError::UnboundVariable(column.clone()))?;
            indices.push(index);
            variable_mask.push(Some(column.clone()));
        }
        Ok(Self {
            child,
            output_name: output_name.to_string(),
            indices,
            variable_mask,
            seen: HashSet::new(),
        })
    }
}

impl Operator for Project {
    fn next_tuple(&mut self) -> Result<Option<Tuple>, ExecutorError> {
        while let Some(tuple) = self.child.next_tuple()? {
            let terms = self
                .indices
                .iter()
                .map(|index| tuple.terms()[*index].clone())
                .collect();
            let projected = Tuple::new(&self.output_name, terms);
            if self.seen.insert(projected.to_string()) {
                return Ok(Some(projected));
            }
        }
        Ok(None)
    }

    fn reset(&mut self) -> Result<(), ExecutorError> {
        self.child.reset()?;
        self.seen.clear();
        Ok(())
    }

    fn variable_mask(&self) -> &[Option<String>] {
        &self.variable_mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::testing::{collect, int, text, Rows};

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn reorders_and_selects_columns() {
        let rows = Rows::new(&["x", "y", "z"], vec![vec![int(1), int(2), int(3)]]);
        let mut project = Project::new(Box::new(rows), "Q", &columns(&["z", "x"])).unwrap();
        assert_eq!(collect(&mut project), vec!["3, 1"]);
    }

    #[test]
    fn duplicates_are_suppressed() {
        let rows = Rows::new(
            &["x", "y"],
            vec![
                vec![int(1), int(10)],
                vec![int(1), int(20)],
                vec![int(2), int(30)],
                vec![int(1), int(40)],
            ],
        );
        let mut project = Project::new(Box::new(rows), "Q", &columns(&["x"])).unwrap();
        assert_eq!(collect(&mut project), vec!["1", "2"]);
    }

    #[test]
    fn dedup_uses_printed_forms() {
        // 5 and '5' print identically, so only the first survives.
        let rows = Rows::new(&["x"], vec![vec![int(5)], vec![text("5")]]);
        let mut project = Project::new(Box::new(rows), "Q", &columns(&["x"])).unwrap();
        assert_eq!(collect(&mut project), vec!["5"]);
    }

    #[test]
    fn reset_clears_the_seen_set() {
        let rows = Rows::new(&["x"], vec![vec![int(1)], vec![int(1)]]);
        let mut project = Project::new(Box::new(rows), "Q", &columns(&["x"])).unwrap();
        assert_eq!(collect(&mut project), vec!["1"]);
        project.reset().unwrap();
        assert_eq!(collect(&mut project), vec!["1"]);
    }

    #[test]
    fn unknown_column_fails_construction() {
        let rows = Rows::new(&["x"], vec![]);
        let err = Project::new(Box::new(rows), "Q", &columns(&["nope"])).unwrap_err();
        assert!(matches!(err, ExecutorError::UnboundVariable(name) if name == "nope"));
    }
}
