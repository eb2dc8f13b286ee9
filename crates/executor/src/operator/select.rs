//! Select: filters a child's tuples through comparison predicates.

use super::condition::SelectCondition;
use super::{Operator, VariableMask};
use crate::error::ExecutorError;
use crate::tuple::Tuple;
use parser::ComparisonAtom;

/// Passes through only tuples satisfying every predicate. The variable mask
/// is the child's, unchanged.
pub struct Select {
    child: Box<dyn Operator>,
    conditions: Vec<SelectCondition>,
    variable_mask: VariableMask,
}

impl std::fmt::Debug for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select")
            .field("conditions", &self.conditions)
            .field("variable_mask", &self.variable_mask)
            .finish_non_exhaustive()
    }
}

impl Select {
    /// Bind `predicates` against the child's columns. A predicate variable
    /// the child does not produce is a construction-time error.
    pub fn new(
        child: Box<dyn Operator>,
        predicates: &[ComparisonAtom],
    ) -> Result<Self, ExecutorError> {
        let variable_mask = child.variable_mask().to_vec();
        let conditions = predicates
            .iter()
            .map(|atom| SelectCondition::new(atom, &variable_mask))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            child,
            conditions,
            variable_mask,
        })
    }
}

impl Operator for Select {
    fn next_tuple(&mut self) -> Result<Option<Tuple>, ExecutorError> {
        'pull: while let Some(tuple) = self.child.next_tuple()? {
            for condition in &self.conditions {
                if !condition.check(&tuple)? {
                    continue 'pull;
                }
            }
            return Ok(Some(tuple));
        }
        Ok(None)
    }

    fn reset(&mut self) -> Result<(), ExecutorError> {
        self.child.reset()
    }

    fn variable_mask(&self) -> &[Option<String>] {
        &self.variable_mask
    }
}
