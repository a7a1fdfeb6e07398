//! External SAT oracle backed by CaDiCaL
//!
//! Treated as an opaque capability: clauses in, a satisfying assignment or
//! unsatisfiability out. The oracle may return a partial assignment;
//! unassigned variables are simply absent from the model.

use super::{AbortReason, Cnf, Model, Verdict};
use anyhow::Result;
use cadical::Solver;

/// Ground-truth SAT oracle
#[derive(Debug, Default, Clone)]
pub struct OracleSolver;

impl OracleSolver {
    /// Create an oracle instance
    pub fn new() -> Self {
        Self
    }

    /// Hand the formula to CaDiCaL and translate its answer.
    ///
    /// The binding cannot express an empty clause, so a formula containing
    /// one short-circuits to unsatisfiable without invoking the backend.
    pub fn solve(&self, cnf: &Cnf) -> Result<Verdict> {
        if cnf.has_empty_clause() {
            return Ok(Verdict::Unsatisfiable);
        }

        let mut solver: Solver = Solver::new();
        for clause in cnf.clauses() {
            solver.add_clause(clause.literals().iter().copied());
        }

        match solver.solve() {
            Some(true) => {
                let max_var = cnf.max_variable();
                let literals = (1..=max_var).filter_map(|var| {
                    solver.value(var).map(|value| if value { var } else { -var })
                });
                Ok(Verdict::Satisfiable(Model::from_literals(literals)))
            }
            Some(false) => Ok(Verdict::Unsatisfiable),
            None => Ok(Verdict::Aborted(AbortReason::Inconclusive)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::Clause;

    fn cnf_of(clauses: &[&[i32]]) -> Cnf {
        let mut cnf = Cnf::new();
        for literals in clauses {
            cnf.insert(Clause::new(literals.to_vec()));
        }
        cnf
    }

    #[test]
    fn test_simple_satisfiable() {
        let cnf = cnf_of(&[&[1, 2], &[-1, 2]]);
        let verdict = OracleSolver::new().solve(&cnf).unwrap();

        let Verdict::Satisfiable(model) = verdict else {
            panic!("expected a model");
        };
        assert_eq!(model.value_of(2), Some(true));
    }

    #[test]
    fn test_contradiction_is_unsatisfiable() {
        let cnf = cnf_of(&[&[1], &[-1]]);
        let verdict = OracleSolver::new().solve(&cnf).unwrap();
        assert_eq!(verdict, Verdict::Unsatisfiable);
    }

    #[test]
    fn test_empty_clause_short_circuits() {
        let cnf = cnf_of(&[&[], &[1, 2]]);
        let verdict = OracleSolver::new().solve(&cnf).unwrap();
        assert_eq!(verdict, Verdict::Unsatisfiable);
    }

    #[test]
    fn test_model_covers_clause_variables() {
        let cnf = cnf_of(&[&[1, -3], &[2]]);
        let Verdict::Satisfiable(model) = OracleSolver::new().solve(&cnf).unwrap() else {
            panic!("expected a model");
        };
        for clause in cnf.clauses() {
            assert!(model.satisfies(clause));
        }
    }
}
