//! CQLog Minimizer Library
//!
//! Removes redundant body atoms from a conjunctive query, producing an
//! equivalent query: an atom is redundant when a homomorphism (containment
//! mapping) folds the whole body into itself without it. Constants and head
//! variables are *distinguished* and must map to themselves; every other
//! body variable is existential and free to be remapped.
//!
//! The search is a single left-to-right sweep over a shrinking body: when
//! the atom under the pointer is removable it is deleted and the pointer
//! stays, otherwise the pointer advances. The sweep runs for (original body
//! size) opportunities and never restarts, which is the engine's observable
//! contract; it is greedy, not a fixed point.

pub mod error;

pub use error::MinimizerError;

use parser::{Atom, Query, RelationalAtom, Term};
use std::collections::HashMap;
use tracing::debug;

/// Minimize `query`, returning the original head over the reduced body.
///
/// The body must be purely relational; head variables must occur in it.
pub fn minimize(query: &Query) -> Result<Query, MinimizerError> {
    let mut body: Vec<RelationalAtom> = Vec::with_capacity(query.body().len());
    for atom in query.body() {
        match atom {
            Atom::Relational(rel) => body.push(rel.clone()),
            Atom::Comparison(cmp) => {
                return Err(MinimizerError::UnsupportedComparison(cmp.to_string()))
            }
        }
    }

    let distinguished: Vec<String> = query.head().variables().to_vec();
    for name in &distinguished {
        let bound = body
            .iter()
            .any(|atom| atom.variables().any(|v| v == name));
        if !bound {
            return Err(MinimizerError::UnboundVariable(name.clone()));
        }
    }

    let opportunities = body.len();
    let mut index = 0;
    for _ in 0..opportunities {
        if has_homomorphism(index, &body, &distinguished) {
            let removed = body.remove(index);
            debug!("removed redundant atom {removed}");
        } else {
            index += 1;
        }
    }

    Ok(Query::new(
        query.head().clone(),
        body.into_iter().map(Atom::Relational).collect(),
    ))
}

/// A term is distinguished when it is a constant or prints as a head
/// variable. Distinguished terms must map to themselves.
fn is_distinguished(term: &Term, distinguished: &[String]) -> bool {
    term.is_constant() || distinguished.iter().any(|name| *name == term.to_string())
}

/// Whether some other body atom witnesses that the atom at `remove_index`
/// is redundant.
fn has_homomorphism(remove_index: usize, body: &[RelationalAtom], distinguished: &[String]) -> bool {
    let atom_to_remove = &body[remove_index];
    for (i, target) in body.iter().enumerate() {
        if i == remove_index
            || target.name() != atom_to_remove.name()
            || target.arity() != atom_to_remove.arity()
        {
            continue;
        }
        if !compatible(atom_to_remove, target, distinguished) {
            continue;
        }
        let substitution = build_substitution(atom_to_remove, target, distinguished);
        let mapped: Vec<RelationalAtom> = body
            .iter()
            .map(|atom| apply(atom, &substitution))
            .collect();
        if contained(&mapped, body) {
            return true;
        }
    }
    false
}

/// Per-position compatibility: every distinguished term of `source` must
/// print-equal the `target` term at the same position; existential
/// positions are free.
fn compatible(source: &RelationalAtom, target: &RelationalAtom, distinguished: &[String]) -> bool {
    source
        .terms()
        .iter()
        .zip(target.terms())
        .all(|(s, t)| !is_distinguished(s, distinguished) || s.print_eq(t))
}

/// Map every existential variable of `source` to the `target` term at the
/// same position. A variable repeated within the atom keeps its last
/// mapping.
fn build_substitution(
    source: &RelationalAtom,
    target: &RelationalAtom,
    distinguished: &[String],
) -> HashMap<String, Term> {
    let mut mapping = HashMap::new();
    for (s, t) in source.terms().iter().zip(target.terms()) {
        if let Term::Variable(name) = s {
            if !is_distinguished(s, distinguished) {
                mapping.insert(name.clone(), t.clone());
            }
        }
    }
    mapping
}

/// Apply a substitution, producing a new atom. Unmapped terms are copied.
fn apply(atom: &RelationalAtom, mapping: &HashMap<String, Term>) -> RelationalAtom {
    let terms = atom
        .terms()
        .iter()
        .map(|term| match term {
            Term::Variable(name) => mapping.get(name).unwrap_or(term).clone(),
            constant => constant.clone(),
        })
        .collect();
    RelationalAtom::new(atom.name(), terms)
}

/// Containment check: every mapped atom must occur in the original body
/// (same relation, same arity, every position print-equal). The match need
/// not be a bijection; several mapped atoms may land on the same original
/// atom, but the tally of matched mapped atoms must equal the body size,
/// meaning no mapped atom is left unmatched.
fn contained(mapped: &[RelationalAtom], body: &[RelationalAtom]) -> bool {
    let matched = mapped
        .iter()
        .filter(|mapped_atom| {
            body.iter().any(|body_atom| {
                mapped_atom.name() == body_atom.name()
                    && mapped_atom.arity() == body_atom.arity()
                    && mapped_atom
                        .terms()
                        .iter()
                        .zip(body_atom.terms())
                        .all(|(m, b)| m.print_eq(b))
            })
        })
        .count();
    matched == body.len()
}
