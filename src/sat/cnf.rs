//! CNF formula primitives: clauses, formulas, and partial models
//!
//! Literals are non-zero `i32`s; the sign carries the polarity (a positive
//! literal asserts the cell is a trap, a negative one a gem). Clauses keep
//! their literals sorted and deduplicated, and a formula is an ordered set of
//! clauses, so identical inputs always produce byte-identical formulas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A disjunction of literals
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Clause {
    literals: Vec<i32>,
}

impl Clause {
    /// Create a clause, sorting and deduplicating its literals
    pub fn new(mut literals: Vec<i32>) -> Self {
        literals.sort_unstable();
        literals.dedup();
        Self { literals }
    }

    /// Create a unit clause
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// The clause's literals in sorted order
    pub fn literals(&self) -> &[i32] {
        &self.literals
    }

    /// Number of literals
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The empty clause is unsatisfiable under any model
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Whether the clause holds exactly one literal
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Whether the clause contains the literal
    pub fn contains(&self, literal: i32) -> bool {
        self.literals.binary_search(&literal).is_ok()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", literal)?;
        }
        write!(f, ")")
    }
}

/// A CNF formula as a deduplicated, canonically ordered clause set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cnf {
    clauses: BTreeSet<Clause>,
}

impl Cnf {
    /// Create an empty formula
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a clause; duplicates are absorbed
    pub fn insert(&mut self, clause: Clause) {
        self.clauses.insert(clause);
    }

    /// Absorb every clause of another formula
    pub fn merge(&mut self, other: &Cnf) {
        for clause in &other.clauses {
            self.clauses.insert(clause.clone());
        }
    }

    /// Iterate the clauses in canonical order
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Number of distinct clauses
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the formula has no clauses (trivially satisfiable)
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether the formula contains the empty clause
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// The referenced variable indices in increasing order
    pub fn variables(&self) -> Vec<i32> {
        let vars: BTreeSet<i32> = self
            .clauses
            .iter()
            .flat_map(|clause| clause.literals().iter().map(|lit| lit.abs()))
            .collect();
        vars.into_iter().collect()
    }

    /// The largest referenced variable index, or 0 for an empty formula
    pub fn max_variable(&self) -> i32 {
        self.variables().last().copied().unwrap_or(0)
    }
}

/// A partial assignment as a set of asserted literals.
///
/// A variable is true if its positive literal is present, false if its
/// negative literal is, and unassigned if neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    literals: BTreeSet<i32>,
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from an iterator of literals
    pub fn from_literals<I: IntoIterator<Item = i32>>(literals: I) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// Assert a literal. The caller must not assert both polarities of one
    /// variable.
    pub fn assign(&mut self, literal: i32) {
        debug_assert!(
            !self.literals.contains(&-literal),
            "conflicting assignment for variable {}",
            literal.abs()
        );
        self.literals.insert(literal);
    }

    /// Whether the literal is asserted true
    pub fn is_true(&self, literal: i32) -> bool {
        self.literals.contains(&literal)
    }

    /// Whether the literal's negation is asserted
    pub fn is_false(&self, literal: i32) -> bool {
        self.literals.contains(&-literal)
    }

    /// Whether the literal's variable has either polarity asserted
    pub fn is_assigned(&self, literal: i32) -> bool {
        self.is_true(literal) || self.is_false(literal)
    }

    /// The truth value of a variable, if assigned
    pub fn value_of(&self, var: i32) -> Option<bool> {
        let var = var.abs();
        if self.literals.contains(&var) {
            Some(true)
        } else if self.literals.contains(&-var) {
            Some(false)
        } else {
            None
        }
    }

    /// Whether some literal of the clause is asserted true
    pub fn satisfies(&self, clause: &Clause) -> bool {
        clause.literals().iter().any(|&lit| self.is_true(lit))
    }

    /// Whether every literal of the clause is asserted false
    pub fn falsifies(&self, clause: &Clause) -> bool {
        clause.literals().iter().all(|&lit| self.is_false(lit))
    }

    /// Iterate the asserted literals in increasing order
    pub fn literals(&self) -> impl Iterator<Item = i32> + '_ {
        self.literals.iter().copied()
    }

    /// Number of asserted literals
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Whether no literal is asserted
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_sorts_and_dedups() {
        let clause = Clause::new(vec![3, -1, 3, 2, -1]);
        assert_eq!(clause.literals(), &[-1, 2, 3]);
        assert_eq!(clause.len(), 3);
        assert!(clause.contains(-1));
        assert!(!clause.contains(1));
    }

    #[test]
    fn test_clause_classification() {
        assert!(Clause::new(vec![]).is_empty());
        assert!(Clause::unit(-4).is_unit());
        assert!(!Clause::new(vec![1, 2]).is_unit());
    }

    #[test]
    fn test_clause_display() {
        assert_eq!(Clause::new(vec![2, -1]).to_string(), "(-1 | 2)");
        assert_eq!(Clause::new(vec![]).to_string(), "()");
    }

    #[test]
    fn test_cnf_dedups_clauses() {
        let mut cnf = Cnf::new();
        cnf.insert(Clause::new(vec![1, 2]));
        cnf.insert(Clause::new(vec![2, 1]));
        assert_eq!(cnf.len(), 1);
    }

    #[test]
    fn test_cnf_canonical_order() {
        let mut a = Cnf::new();
        a.insert(Clause::new(vec![3]));
        a.insert(Clause::new(vec![-1, 2]));

        let mut b = Cnf::new();
        b.insert(Clause::new(vec![-1, 2]));
        b.insert(Clause::new(vec![3]));

        assert_eq!(a, b);
        let clauses: Vec<_> = a.clauses().cloned().collect();
        assert_eq!(clauses, vec![Clause::new(vec![-1, 2]), Clause::unit(3)]);
    }

    #[test]
    fn test_cnf_variables() {
        let mut cnf = Cnf::new();
        cnf.insert(Clause::new(vec![-4, 2]));
        cnf.insert(Clause::new(vec![2, 7]));
        assert_eq!(cnf.variables(), vec![2, 4, 7]);
        assert_eq!(cnf.max_variable(), 7);
        assert_eq!(Cnf::new().max_variable(), 0);
    }

    #[test]
    fn test_cnf_empty_clause_detection() {
        let mut cnf = Cnf::new();
        assert!(!cnf.has_empty_clause());
        cnf.insert(Clause::new(vec![]));
        assert!(cnf.has_empty_clause());
    }

    #[test]
    fn test_model_assignment_queries() {
        let mut model = Model::new();
        model.assign(1);
        model.assign(-3);

        assert_eq!(model.value_of(1), Some(true));
        assert_eq!(model.value_of(3), Some(false));
        assert_eq!(model.value_of(-3), Some(false));
        assert_eq!(model.value_of(2), None);
        assert!(model.is_assigned(3));
        assert!(!model.is_assigned(2));
    }

    #[test]
    fn test_model_clause_evaluation() {
        let model = Model::from_literals([1, -2]);
        assert!(model.satisfies(&Clause::new(vec![1, 3])));
        assert!(!model.satisfies(&Clause::new(vec![2, 3])));
        assert!(model.falsifies(&Clause::new(vec![-1, 2])));
        assert!(!model.falsifies(&Clause::new(vec![-1, 3])));
    }
}
