//! Join: nested-loop equi+theta join of two operator subtrees.

use super::condition::JoinCondition;
use super::{position_of, Operator, VariableMask};
use crate::error::ExecutorError;
use crate::tuple::Tuple;
use parser::ComparisonAtom;

/// Nested-loop join.
///
/// Columns shared by name between the two children are *implicit join keys*:
/// they are compared for printed-form equality on every candidate pair, and
/// the right-side copy is dropped from the output. Additional predicates
/// spanning both sides are bound at construction and checked per pair.
///
/// The current left tuple is held across `next_tuple` calls so that each
/// left tuple meets every right tuple exactly once; the right child is reset
/// whenever it is exhausted under the current left tuple.
pub struct Join {
    left: Box<dyn Operator>,
    right: Box<dyn Operator>,
    /// Implicit equality keys: left column index to right column index.
    key_indices: Vec<(usize, usize)>,
    /// Right-side column positions dropped from the output.
    duplicate_columns: Vec<usize>,
    conditions: Vec<JoinCondition>,
    current_left: Option<Tuple>,
    variable_mask: VariableMask,
}

impl Join {
    pub fn new(
        left: Box<dyn Operator>,
        right: Box<dyn Operator>,
        predicates: &[ComparisonAtom],
    ) -> Result<Self, ExecutorError> {
        let left_mask = left.variable_mask().to_vec();
        let right_mask = right.variable_mask().to_vec();

        let mut variable_mask: VariableMask = Vec::new();
        let mut key_indices = Vec::new();
        let mut duplicate_columns = Vec::new();
        for (left_index, column) in left_mask.iter().enumerate() {
            variable_mask.push(column.clone());
            if let Some(name) = column {
                if let Some(right_index) = position_of(&right_mask, name) {
                    key_indices.push((left_index, right_index));
                    duplicate_columns.push(right_index);
                }
            }
        }
        for column in &right_mask {
            match column {
                None => variable_mask.push(None),
                Some(name) => {
                    if position_of(&variable_mask, name).is_none() {
                        variable_mask.push(column.clone());
                    }
                }
            }
        }

        let conditions = predicates
            .iter()
            .map(|atom| JoinCondition::new(atom, &left_mask, &right_mask))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            left,
            right,
            key_indices,
            duplicate_columns,
            conditions,
            current_left: None,
            variable_mask,
        })
    }

    fn matches(&self, left: &Tuple, right: &Tuple) -> Result<bool, ExecutorError> {
        for (left_index, right_index) in &self.key_indices {
            if !left.terms()[*left_index].print_eq(&right.terms()[*right_index]) {
                return Ok(false);
            }
        }
        for condition in &self.conditions {
            if !condition.check(left, right)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn merge(&self, left: &Tuple, right: &Tuple) -> Tuple {
        let mut terms = left.terms().to_vec();
        for (index, term) in right.terms().iter().enumerate() {
            if !self.duplicate_columns.contains(&index) {
                terms.push(term.clone());
            }
        }
        Tuple::new("Join", terms)
    }
}

impl Operator for Join {
    fn next_tuple(&mut self) -> Result<Option<Tuple>, ExecutorError> {
        if self.current_left.is_none() {
            self.current_left = self.left.next_tuple()?;
        }
        while let Some(left_tuple) = self.current_left.take() {
            while let Some(right_tuple) = self.right.next_tuple()? {
                if self.matches(&left_tuple, &right_tuple)? {
                    let merged = self.merge(&left_tuple, &right_tuple);
                    self.current_left = Some(left_tuple);
                    return Ok(Some(merged));
                }
            }
            self.right.reset()?;
            self.current_left = self.left.next_tuple()?;
        }
        Ok(None)
    }

    fn reset(&mut self) -> Result<(), ExecutorError> {
        self.left.reset()?;
        self.right.reset()?;
        self.current_left = None;
        Ok(())
    }

    fn variable_mask(&self) -> &[Option<String>] {
        &self.variable_mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::testing::{collect, int, Rows};
    use parser::{ComparisonOperator, Term};

    fn var(name: &str) -> Term {
        Term::Variable(name.into())
    }

    #[test]
    fn implicit_key_join_drops_duplicate_column() {
        // R(x, y) join S(y, z) on shared y
        let left = Rows::new(
            &["x", "y"],
            vec![vec![int(1), int(10)], vec![int(2), int(20)]],
        );
        let right = Rows::new(
            &["y", "z"],
            vec![vec![int(10), int(100)], vec![int(20), int(200)]],
        );
        let mut join = Join::new(Box::new(left), Box::new(right), &[]).unwrap();
        assert_eq!(
            join.variable_mask(),
            &[
                Some("x".to_string()),
                Some("y".to_string()),
                Some("z".to_string())
            ]
        );
        assert_eq!(collect(&mut join), vec!["1, 10, 100", "2, 20, 200"]);
    }

    #[test]
    fn no_shared_columns_is_a_cross_product() {
        let left = Rows::new(&["x"], vec![vec![int(1)], vec![int(2)]]);
        let right = Rows::new(&["y"], vec![vec![int(3)], vec![int(4)]]);
        let mut join = Join::new(Box::new(left), Box::new(right), &[]).unwrap();
        assert_eq!(
            collect(&mut join),
            vec!["1, 3", "1, 4", "2, 3", "2, 4"]
        );
    }

    #[test]
    fn explicit_predicate_filters_pairs() {
        // x < y as a theta predicate across sides
        let left = Rows::new(&["x"], vec![vec![int(1)], vec![int(4)]]);
        let right = Rows::new(&["y"], vec![vec![int(2)], vec![int(5)]]);
        let predicates = vec![ComparisonAtom::new(
            var("x"),
            ComparisonOperator::LessThan,
            var("y"),
        )];
        let mut join = Join::new(Box::new(left), Box::new(right), &predicates).unwrap();
        assert_eq!(collect(&mut join), vec!["1, 2", "1, 5", "4, 5"]);
    }

    #[test]
    fn unnamed_right_columns_are_kept() {
        let left = Rows::new(&["x"], vec![vec![int(1)]]);
        let right = Rows::with_mask(
            vec![Some("y".to_string()), None],
            vec![vec![int(9), int(7)]],
        );
        let mut join = Join::new(Box::new(left), Box::new(right), &[]).unwrap();
        assert_eq!(
            join.variable_mask(),
            &[Some("x".to_string()), Some("y".to_string()), None]
        );
        assert_eq!(collect(&mut join), vec!["1, 9, 7"]);
    }

    #[test]
    fn reset_restarts_the_full_product() {
        let left = Rows::new(&["x"], vec![vec![int(1)], vec![int(2)]]);
        let right = Rows::new(&["y"], vec![vec![int(3)]]);
        let mut join = Join::new(Box::new(left), Box::new(right), &[]).unwrap();
        assert_eq!(collect(&mut join), vec!["1, 3", "2, 3"]);
        join.reset().unwrap();
        assert_eq!(collect(&mut join), vec!["1, 3", "2, 3"]);
    }

    #[test]
    fn multiple_shared_columns_all_act_as_keys() {
        let left = Rows::new(
            &["x", "y"],
            vec![vec![int(1), int(2)], vec![int(1), int(3)]],
        );
        let right = Rows::new(
            &["x", "y"],
            vec![vec![int(1), int(2)], vec![int(1), int(9)]],
        );
        let mut join = Join::new(Box::new(left), Box::new(right), &[]).unwrap();
        assert_eq!(collect(&mut join), vec!["1, 2"]);
    }
}
