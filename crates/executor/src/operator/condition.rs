//! Comparison predicates bound to operator columns.
//!
//! A [`ComparisonAtom`] references variables by name; operators resolve each
//! operand to a column index (or a literal) once, at construction, against
//! their children's variable masks. Resolution failures surface immediately
//! as [`ExecutorError::UnboundVariable`] rather than at pull time.

use super::position_of;
use crate::error::ExecutorError;
use crate::tuple::Tuple;
use parser::{ComparisonAtom, ComparisonOperator, Term};
use std::cmp::Ordering;

/// Evaluate `left op right` over two resolved terms.
///
/// `=`/`!=` compare canonical printed forms (so `5` equals `'5'`).
/// Ordering operators require two constants of the same kind; anything else
/// is a [`ExecutorError::TypeMismatch`].
pub fn evaluate(
    operator: &ComparisonOperator,
    left: &Term,
    right: &Term,
) -> Result<bool, ExecutorError> {
    if operator.is_equality() {
        let equal = left.print_eq(right);
        return Ok(match operator {
            ComparisonOperator::Equal => equal,
            _ => !equal,
        });
    }

    let ordering = left
        .as_constant()
        .zip(right.as_constant())
        .and_then(|(a, b)| a.compare(b))
        .ok_or_else(|| ExecutorError::TypeMismatch {
            left: left.to_string(),
            right: right.to_string(),
        })?;

    Ok(match operator {
        ComparisonOperator::GreaterThan => ordering == Ordering::Greater,
        ComparisonOperator::GreaterEqualThan => ordering != Ordering::Less,
        ComparisonOperator::LessThan => ordering == Ordering::Less,
        ComparisonOperator::LessEqualThan => ordering != Ordering::Greater,
        // Equality operators returned above.
        ComparisonOperator::Equal | ComparisonOperator::NotEqual => unreachable!(),
    })
}

/// A predicate operand resolved against a single child mask.
#[derive(Debug, Clone)]
enum Operand {
    /// Tuple field at this index.
    Column(usize),
    /// Literal from the predicate itself.
    Literal(Term),
}

impl Operand {
    fn bind(term: &Term, mask: &[Option<String>]) -> Result<Self, ExecutorError> {
        match term.as_variable() {
            Some(name) => position_of(mask, name)
                .map(Self::Column)
                .ok_or_else(|| ExecutorError::UnboundVariable(name.to_string())),
            None => Ok(Self::Literal(term.clone())),
        }
    }

    fn resolve<'a>(&'a self, tuple: &'a Tuple) -> &'a Term {
        match self {
            Self::Column(index) => &tuple.terms()[*index],
            Self::Literal(term) => term,
        }
    }
}

/// A selection predicate with both operands resolved against one child.
#[derive(Debug, Clone)]
pub struct SelectCondition {
    left: Operand,
    operator: ComparisonOperator,
    right: Operand,
}

impl SelectCondition {
    pub fn new(atom: &ComparisonAtom, mask: &[Option<String>]) -> Result<Self, ExecutorError> {
        Ok(Self {
            left: Operand::bind(atom.left(), mask)?,
            operator: *atom.operator(),
            right: Operand::bind(atom.right(), mask)?,
        })
    }

    /// Whether `tuple` satisfies this predicate.
    pub fn check(&self, tuple: &Tuple) -> Result<bool, ExecutorError> {
        evaluate(
            &self.operator,
            self.left.resolve(tuple),
            self.right.resolve(tuple),
        )
    }
}

/// A predicate operand resolved against a join's two children, recording
/// which side holds it.
#[derive(Debug, Clone)]
enum SidedOperand {
    Left(usize),
    Right(usize),
    Literal(Term),
}

impl SidedOperand {
    fn bind(
        term: &Term,
        left_mask: &[Option<String>],
        right_mask: &[Option<String>],
    ) -> Result<Self, ExecutorError> {
        match term.as_variable() {
            Some(name) => position_of(left_mask, name)
                .map(Self::Left)
                .or_else(|| position_of(right_mask, name).map(Self::Right))
                .ok_or_else(|| ExecutorError::UnboundVariable(name.to_string())),
            None => Ok(Self::Literal(term.clone())),
        }
    }

    fn resolve<'a>(&'a self, left: &'a Tuple, right: &'a Tuple) -> &'a Term {
        match self {
            Self::Left(index) => &left.terms()[*index],
            Self::Right(index) => &right.terms()[*index],
            Self::Literal(term) => term,
        }
    }
}

/// A join predicate spanning both children, operands bound at construction.
#[derive(Debug, Clone)]
pub struct JoinCondition {
    left: SidedOperand,
    operator: ComparisonOperator,
    right: SidedOperand,
}

impl JoinCondition {
    pub fn new(
        atom: &ComparisonAtom,
        left_mask: &[Option<String>],
        right_mask: &[Option<String>],
    ) -> Result<Self, ExecutorError> {
        Ok(Self {
            left: SidedOperand::bind(atom.left(), left_mask, right_mask)?,
            operator: *atom.operator(),
            right: SidedOperand::bind(atom.right(), left_mask, right_mask)?,
        })
    }

    /// Whether the pair of child tuples satisfies this predicate.
    pub fn check(&self, left: &Tuple, right: &Tuple) -> Result<bool, ExecutorError> {
        evaluate(
            &self.operator,
            self.left.resolve(left, right),
            self.right.resolve(left, right),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::testing::{int, text};
    use parser::ComparisonOperator::*;

    fn mask(names: &[&str]) -> Vec<Option<String>> {
        names.iter().map(|n| Some((*n).to_string())).collect()
    }

    fn atom(left: Term, op: ComparisonOperator, right: Term) -> ComparisonAtom {
        ComparisonAtom::new(left, op, right)
    }

    #[test]
    fn equality_compares_printed_forms() {
        assert!(evaluate(&Equal, &int(5), &text("5")).unwrap());
        assert!(evaluate(&NotEqual, &int(5), &text("6")).unwrap());
        assert!(!evaluate(&NotEqual, &int(5), &text("5")).unwrap());
    }

    #[test]
    fn ordering_same_kind() {
        assert!(evaluate(&LessThan, &int(3), &int(9)).unwrap());
        assert!(evaluate(&GreaterEqualThan, &int(9), &int(9)).unwrap());
        assert!(evaluate(&GreaterThan, &text("b"), &text("a")).unwrap());
        assert!(evaluate(&LessEqualThan, &text("a"), &text("a")).unwrap());
    }

    #[test]
    fn ordering_across_kinds_is_a_type_error() {
        assert!(matches!(
            evaluate(&LessThan, &int(5), &text("5")),
            Err(ExecutorError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn select_condition_binds_columns_and_literals() {
        let m = mask(&["x", "y"]);
        let cond =
            SelectCondition::new(&atom(Term::Variable("y".into()), LessThan, int(5)), &m).unwrap();
        let pass = Tuple::new("t", vec![int(0), int(3)]);
        let fail = Tuple::new("t", vec![int(0), int(8)]);
        assert!(cond.check(&pass).unwrap());
        assert!(!cond.check(&fail).unwrap());
    }

    #[test]
    fn select_condition_rejects_unknown_variable() {
        let m = mask(&["x"]);
        let err =
            SelectCondition::new(&atom(Term::Variable("q".into()), Equal, int(1)), &m).unwrap_err();
        assert!(matches!(err, ExecutorError::UnboundVariable(name) if name == "q"));
    }

    #[test]
    fn join_condition_resolves_either_side_in_either_order() {
        let lm = mask(&["a"]);
        let rm = mask(&["b"]);
        let lt = Tuple::new("l", vec![int(2)]);
        let rt = Tuple::new("r", vec![int(7)]);

        // a < b, with a on the left child
        let forward = JoinCondition::new(
            &atom(Term::Variable("a".into()), LessThan, Term::Variable("b".into())),
            &lm,
            &rm,
        )
        .unwrap();
        assert!(forward.check(&lt, &rt).unwrap());

        // b > a, first operand lives on the right child
        let reversed = JoinCondition::new(
            &atom(Term::Variable("b".into()), GreaterThan, Term::Variable("a".into())),
            &lm,
            &rm,
        )
        .unwrap();
        assert!(reversed.check(&lt, &rt).unwrap());
    }
}
