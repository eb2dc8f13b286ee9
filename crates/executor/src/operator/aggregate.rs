//! Aggregate: blocking SUM/AVG grouping over the projected head columns.

use super::{position_of, Operator, VariableMask};
use crate::error::ExecutorError;
use crate::tuple::Tuple;
use itertools::Itertools;
use parser::{AggregateOperator, Constant, SumAggregate, Term};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// The fold applied to each finished group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Sum,
    Avg,
}

impl AggregateFunction {
    /// Final value of a group. AVG uses truncating integer division; that
    /// truncation is part of the engine's contract (7/2 is 3, never 3.5
    /// or 4).
    #[must_use]
    pub fn finish(&self, sum: i64, count: i64) -> i64 {
        match self {
            Self::Sum => sum,
            Self::Avg => sum / count,
        }
    }
}

impl From<&AggregateOperator> for AggregateFunction {
    fn from(op: &AggregateOperator) -> Self {
        match op {
            AggregateOperator::Sum => Self::Sum,
            AggregateOperator::Avg => Self::Avg,
        }
    }
}

/// One group under construction: its key terms plus the running fold state.
struct Group {
    terms: Vec<Term>,
    sum: i64,
    count: i64,
}

/// Blocking grouping aggregate.
///
/// Group key = the projected columns minus the aggregated one, compared by
/// printed form. The whole child is drained on the first `next_tuple` call;
/// afterwards one finished group is popped per call, in first-seen order.
///
/// When the aggregated operand is the literal `1` the operator counts rows
/// instead: it emits exactly one single-field tuple with the row count and
/// ignores grouping entirely.
pub struct Aggregate {
    child: Box<dyn Operator>,
    output_name: String,
    function: AggregateFunction,
    group_indices: Vec<usize>,
    /// Child column holding the aggregated value; `None` in count-rows mode.
    aggregated_index: Option<usize>,
    variable_mask: VariableMask,
    groups: Option<Vec<Group>>,
    cursor: usize,
    counted: bool,
}

impl std::fmt::Debug for Aggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregate")
            .field("output_name", &self.output_name)
            .field("function", &self.function)
            .field("group_indices", &self.group_indices)
            .field("aggregated_index", &self.aggregated_index)
            .field("variable_mask", &self.variable_mask)
            .finish_non_exhaustive()
    }
}

impl Aggregate {
    /// Resolve the group columns and the aggregated operand against the
    /// child's mask.
    pub fn new(
        child: Box<dyn Operator>,
        output_name: &str,
        group_columns: &[String],
        aggregate: &SumAggregate,
    ) -> Result<Self, ExecutorError> {
        let child_mask = child.variable_mask();
        let mut group_indices = Vec::with_capacity(group_columns.len());
        let mut variable_mask: VariableMask = Vec::with_capacity(group_columns.len() + 1);
        for column in group_columns {
            let index = position_of(child_mask, column)
                .ok_or_else(|| ExecutorError::UnboundVariable(column.clone()))?;
            group_indices.push(index);
            variable_mask.push(Some(column.clone()));
        }
        variable_mask.push(Some(aggregate.to_string()));

        let aggregated_index = match aggregate.aggregated_term() {
            term if term.to_string() == "1" => None,
            Term::Variable(name) => Some(
                position_of(child_mask, name)
                    .ok_or_else(|| ExecutorError::UnboundVariable(name.clone()))?,
            ),
            term => return Err(ExecutorError::UnboundVariable(term.to_string())),
        };

        Ok(Self {
            child,
            output_name: output_name.to_string(),
            function: AggregateFunction::from(aggregate.operator()),
            group_indices,
            aggregated_index,
            variable_mask,
            groups: None,
            cursor: 0,
            counted: false,
        })
    }

    /// Count-rows mode: drain the child once and emit the row count.
    fn count_rows(&mut self) -> Result<Option<Tuple>, ExecutorError> {
        if self.counted {
            return Ok(None);
        }
        self.counted = true;
        let mut count = 0;
        while self.child.next_tuple()?.is_some() {
            count += 1;
        }
        Ok(Some(Tuple::new(
            &self.output_name,
            vec![Term::Constant(Constant::Integer(count))],
        )))
    }

    /// Drain the child, folding every tuple into its group.
    fn aggregate(&mut self, aggregated_index: usize) -> Result<Vec<Group>, ExecutorError> {
        let mut groups: Vec<Group> = Vec::new();
        let mut index_of: HashMap<String, usize> = HashMap::new();
        while let Some(tuple) = self.child.next_tuple()? {
            let value = match &tuple.terms()[aggregated_index] {
                Term::Constant(Constant::Integer(v)) => *v,
                other => return Err(ExecutorError::NonIntegerAggregate(other.to_string())),
            };
            let terms: Vec<Term> = self
                .group_indices
                .iter()
                .map(|index| tuple.terms()[*index].clone())
                .collect();
            let key = terms.iter().join(", ");
            match index_of.entry(key) {
                Entry::Occupied(entry) => {
                    let group = &mut groups[*entry.get()];
                    group.sum += value;
                    group.count += 1;
                }
                Entry::Vacant(entry) => {
                    entry.insert(groups.len());
                    groups.push(Group {
                        terms,
                        sum: value,
                        count: 1,
                    });
                }
            }
        }
        Ok(groups)
    }
}

impl Operator for Aggregate {
    fn next_tuple(&mut self) -> Result<Option<Tuple>, ExecutorError> {
        let Some(aggregated_index) = self.aggregated_index else {
            return self.count_rows();
        };

        if self.groups.is_none() {
            let groups = self.aggregate(aggregated_index)?;
            self.groups = Some(groups);
            self.cursor = 0;
        }

        let groups = self.groups.as_ref().map(Vec::as_slice).unwrap_or_default();
        let Some(group) = groups.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;

        let mut terms = group.terms.clone();
        terms.push(Term::Constant(Constant::Integer(
            self.function.finish(group.sum, group.count),
        )));
        Ok(Some(Tuple::new(&self.output_name, terms)))
    }

    fn reset(&mut self) -> Result<(), ExecutorError> {
        self.child.reset()?;
        self.groups = None;
        self.cursor = 0;
        self.counted = false;
        Ok(())
    }

    fn variable_mask(&self) -> &[Option<String>] {
        &self.variable_mask
    }
}
