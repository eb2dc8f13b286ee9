//! Query planner: turns a parsed query into an operator tree.
//!
//! The plan is left-deep in body-atom order; there is no join reordering.
//! Two passes:
//!
//! 1. **Rewrite**: every constant inside a relational atom is replaced by a
//!    fresh variable plus a `fresh = constant` equality predicate, so the
//!    operators below only ever deal with variable positions and constant
//!    checks become ordinary selections pushed all the way down.
//! 2. **Build**: fold the relational atoms left to right. Each atom becomes
//!    a Scan wrapped in a Select carrying every predicate bound by that atom
//!    alone; every further atom joins the accumulated tree, attaching the
//!    predicates that only become evaluable once both sides are in scope.
//!
//! The root is a Project over the head variables, or an Aggregate when the
//! head carries one.

use crate::error::ExecutorError;
use crate::operator::{Aggregate, Join, Operator, Project, Scan, Select};
use catalog::Catalog;
use parser::{Atom, ComparisonAtom, ComparisonOperator, Query, RelationalAtom, Term};
use std::rc::Rc;
use tracing::debug;

/// Build the operator tree for `query` against `catalog`.
///
/// Fails fast on an empty relational body, on head variables or comparison
/// predicates without a binding site, and on relations missing from the
/// catalog or the file system.
pub fn build_query_plan(
    query: &Query,
    catalog: &Rc<Catalog>,
) -> Result<Box<dyn Operator>, ExecutorError> {
    let (relational, comparisons) = normalize_body(query.body());
    if relational.is_empty() {
        return Err(ExecutorError::EmptyBody);
    }
    debug!(
        "normalized body: {} relational atom(s), {} comparison(s)",
        relational.len(),
        comparisons.len()
    );

    let mut attached = vec![false; comparisons.len()];
    let mut root: Option<Box<dyn Operator>> = None;
    let mut bound_vars: Vec<String> = Vec::new();

    for atom in &relational {
        let atom_vars: Vec<String> = atom.variables().map(str::to_string).collect();

        let scan = Scan::new(atom, Rc::clone(catalog))?;
        let select_predicates: Vec<ComparisonAtom> = comparisons
            .iter()
            .enumerate()
            .filter(|&(_, predicate)| all_bound(predicate, &atom_vars))
            .map(|(i, predicate)| {
                attached[i] = true;
                predicate.clone()
            })
            .collect();
        let subtree: Box<dyn Operator> = Box::new(Select::new(Box::new(scan), &select_predicates)?);

        root = Some(match root.take() {
            None => subtree,
            Some(accumulated) => {
                let mut merged_vars = bound_vars.clone();
                merged_vars.extend(atom_vars.iter().cloned());
                let join_predicates: Vec<ComparisonAtom> = comparisons
                    .iter()
                    .enumerate()
                    .filter(|&(_, predicate)| {
                        !all_bound(predicate, &bound_vars)
                            && !all_bound(predicate, &atom_vars)
                            && all_bound(predicate, &merged_vars)
                    })
                    .map(|(i, predicate)| {
                        attached[i] = true;
                        predicate.clone()
                    })
                    .collect();
                Box::new(Join::new(accumulated, subtree, &join_predicates)?)
            }
        });
        bound_vars.extend(atom_vars);
    }

    // A predicate never attached anywhere references a variable with no
    // binding site.
    if let Some((_, predicate)) = attached
        .iter()
        .zip(&comparisons)
        .find(|(attached, _)| !**attached)
    {
        let unbound = predicate
            .variables()
            .find(|name| !bound_vars.iter().any(|v| v == name))
            .unwrap_or_else(|| predicate.variables().next().unwrap_or_default());
        return Err(ExecutorError::UnboundVariable(unbound.to_string()));
    }

    let root = match root {
        Some(root) => root,
        None => return Err(ExecutorError::EmptyBody),
    };

    let head = query.head();
    match head.aggregate() {
        Some(aggregate) => Ok(Box::new(Aggregate::new(
            root,
            head.name(),
            head.variables(),
            aggregate,
        )?)),
        None => Ok(Box::new(Project::new(root, head.name(), head.variables())?)),
    }
}

/// Rewrite pass: constant-free relational atoms plus the full comparison
/// list, in body order. Pure; the input atoms are never mutated.
pub fn normalize_body(body: &[Atom]) -> (Vec<RelationalAtom>, Vec<ComparisonAtom>) {
    // Fresh names must avoid every variable already present in the body.
    let mut taken: Vec<String> = Vec::new();
    for atom in body {
        if let Atom::Relational(rel) = atom {
            for name in rel.variables() {
                if !taken.iter().any(|v| v == name) {
                    taken.push(name.to_string());
                }
            }
        }
    }

    let mut relational = Vec::new();
    let mut comparisons = Vec::new();
    for atom in body {
        match atom {
            Atom::Relational(rel) => {
                let mut terms = Vec::with_capacity(rel.arity());
                for term in rel.terms() {
                    if term.is_constant() {
                        let fresh = fresh_variable(&mut taken);
                        comparisons.push(ComparisonAtom::new(
                            Term::Variable(fresh.clone()),
                            ComparisonOperator::Equal,
                            term.clone(),
                        ));
                        terms.push(Term::Variable(fresh));
                    } else {
                        terms.push(term.clone());
                    }
                }
                relational.push(RelationalAtom::new(rel.name(), terms));
            }
            Atom::Comparison(comparison) => comparisons.push(comparison.clone()),
        }
    }
    (relational, comparisons)
}

/// Mint a variable name (`var0`, `var1`, ...) colliding with nothing in
/// `taken`, and reserve it.
fn fresh_variable(taken: &mut Vec<String>) -> String {
    let mut n = 0;
    loop {
        let candidate = format!("var{n}");
        if !taken.iter().any(|v| v == &candidate) {
            taken.push(candidate.clone());
            return candidate;
        }
        n += 1;
    }
}

/// Whether every variable operand of `predicate` is bound by `vars`.
/// Constant operands are always bound.
fn all_bound(predicate: &ComparisonAtom, vars: &[String]) -> bool {
    if let Some(name) = predicate.left().as_variable() {
        if !vars.iter().any(|v| v == name) {
            return false;
        }
    }
    if let Some(name) = predicate.right().as_variable() {
        return vars.iter().any(|v| v == name);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser::Constant;

    fn parse(src: &str) -> Query {
        Query::parse(src).expect("parse")
    }

    #[test]
    fn normalize_replaces_constants_with_fresh_equalities() {
        let query = parse("Q(x) :- R(x, 5)");
        let (relational, comparisons) = normalize_body(query.body());
        assert_eq!(relational.len(), 1);
        assert_eq!(relational[0].to_string(), "R(x, var0)");
        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].to_string(), "var0 = 5");
    }

    #[test]
    fn normalize_avoids_existing_variable_names() {
        let query = parse("Q(var0) :- R(var0, 5)");
        let (relational, comparisons) = normalize_body(query.body());
        assert_eq!(relational[0].to_string(), "R(var0, var1)");
        assert_eq!(comparisons[0].to_string(), "var1 = 5");
    }

    #[test]
    fn normalize_keeps_body_comparisons_in_order() {
        let query = parse("Q(x) :- R(x, 4), S(x, y), y < 9");
        let (relational, comparisons) = normalize_body(query.body());
        assert_eq!(relational.len(), 2);
        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0].to_string(), "var0 = 4");
        assert_eq!(comparisons[1].to_string(), "y < 9");
    }

    #[test]
    fn normalize_rewrites_text_constants_too() {
        let query = parse("Q(x) :- R(x, 'abc')");
        let (_, comparisons) = normalize_body(query.body());
        assert_eq!(
            comparisons[0].right(),
            &Term::Constant(Constant::Text("abc".into()))
        );
    }

    #[test]
    fn all_bound_requires_every_variable_operand() {
        let vars = vec!["x".to_string(), "y".to_string()];
        let both = ComparisonAtom::new(
            Term::Variable("x".into()),
            ComparisonOperator::LessThan,
            Term::Variable("y".into()),
        );
        assert!(all_bound(&both, &vars));

        let half = ComparisonAtom::new(
            Term::Variable("x".into()),
            ComparisonOperator::LessThan,
            Term::Variable("z".into()),
        );
        assert!(!all_bound(&half, &vars));

        let with_constant = ComparisonAtom::new(
            Term::Variable("x".into()),
            ComparisonOperator::Equal,
            Term::Constant(Constant::Integer(3)),
        );
        assert!(all_bound(&with_constant, &vars));

        // Two constant operands are bound under any variable set.
        let constants_only = ComparisonAtom::new(
            Term::Constant(Constant::Integer(1)),
            ComparisonOperator::LessThan,
            Term::Constant(Constant::Integer(2)),
        );
        assert!(all_bound(&constants_only, &[]));
    }
}
