//! DPLL backtracking search over CNF formulas
//!
//! A pure recursive search: every call owns its copy of the unassigned
//! symbol list and the partial model, so sibling branches share nothing and
//! backtracking is just return-value propagation. Heuristic order per call:
//! success check, conflict check, pure literal, unit clause, then a branching
//! decision on the first unassigned symbol trying `+` before `-`.
//!
//! Recursion is bounded by the symbol count, with an explicit configurable
//! depth bound on top; exceeding it yields an aborted verdict, which is kept
//! distinct from a proven unsatisfiable result.

use super::{AbortReason, Clause, Cnf, Model, Verdict};
use std::collections::BTreeMap;

/// Default recursion depth bound, comfortably above any grid this crate
/// targets (depth never exceeds the variable count plus one)
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// From-scratch DPLL solver
#[derive(Debug, Clone)]
pub struct DpllSolver {
    max_depth: usize,
}

/// Counters describing one search run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DpllStats {
    /// Branching decisions (both-polarity tries)
    pub decisions: u64,
    /// Assignments forced by unit clauses
    pub unit_propagations: u64,
    /// Assignments of pure literals
    pub pure_assignments: u64,
    /// Deepest recursion reached
    pub peak_depth: usize,
}

/// Verdict plus search counters
#[derive(Debug, Clone)]
pub struct DpllOutcome {
    pub verdict: Verdict,
    pub stats: DpllStats,
}

/// Internal search result; `DepthLimit` poisons sibling unsat proofs because
/// an unexplored subtree means nothing was proven.
enum Search {
    Sat(Model),
    Exhausted,
    DepthLimit,
}

impl Default for DpllSolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl DpllSolver {
    /// Create a solver with the given recursion depth bound
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Search the formula for a satisfying model.
    ///
    /// Deterministic: identical formulas produce identical outcomes. Symbols
    /// are the formula's referenced variables in increasing index order.
    pub fn solve(&self, cnf: &Cnf) -> DpllOutcome {
        let clauses: Vec<&Clause> = cnf.clauses().collect();
        let symbols = cnf.variables();
        let mut stats = DpllStats::default();

        let verdict = match self.search(&clauses, symbols, Model::new(), 0, &mut stats) {
            Search::Sat(model) => Verdict::Satisfiable(model),
            Search::Exhausted => Verdict::Unsatisfiable,
            Search::DepthLimit => Verdict::Aborted(AbortReason::DepthLimit),
        };

        DpllOutcome { verdict, stats }
    }

    fn search(
        &self,
        clauses: &[&Clause],
        symbols: Vec<i32>,
        model: Model,
        depth: usize,
        stats: &mut DpllStats,
    ) -> Search {
        stats.peak_depth = stats.peak_depth.max(depth);
        if depth > self.max_depth {
            return Search::DepthLimit;
        }

        if clauses.iter().all(|clause| model.satisfies(clause)) {
            return Search::Sat(model);
        }
        if clauses.iter().any(|clause| model.falsifies(clause)) {
            return Search::Exhausted;
        }

        if let Some(literal) = find_pure_literal(clauses, &model) {
            stats.pure_assignments += 1;
            return self.extend(clauses, symbols, model, literal, depth, stats);
        }

        if let Some(literal) = find_unit_literal(clauses, &model) {
            stats.unit_propagations += 1;
            return self.extend(clauses, symbols, model, literal, depth, stats);
        }

        let Some(&var) = symbols.first() else {
            // Every symbol assigned without satisfying all clauses.
            return Search::Exhausted;
        };
        stats.decisions += 1;
        let rest = symbols[1..].to_vec();

        let mut positive = model.clone();
        positive.assign(var);
        match self.search(clauses, rest.clone(), positive, depth + 1, stats) {
            Search::Sat(found) => Search::Sat(found),
            first => {
                let mut negative = model;
                negative.assign(-var);
                match self.search(clauses, rest, negative, depth + 1, stats) {
                    Search::Sat(found) => Search::Sat(found),
                    second => match (first, second) {
                        (Search::DepthLimit, _) | (_, Search::DepthLimit) => Search::DepthLimit,
                        _ => Search::Exhausted,
                    },
                }
            }
        }
    }

    /// Assign a forced literal and recurse without branching
    fn extend(
        &self,
        clauses: &[&Clause],
        symbols: Vec<i32>,
        mut model: Model,
        literal: i32,
        depth: usize,
        stats: &mut DpllStats,
    ) -> Search {
        let var = literal.abs();
        let symbols = symbols.into_iter().filter(|&s| s != var).collect();
        model.assign(literal);
        self.search(clauses, symbols, model, depth + 1, stats)
    }
}

/// Find the lowest-index variable that occurs with only one polarity among
/// unassigned occurrences across all clauses
fn find_pure_literal(clauses: &[&Clause], model: &Model) -> Option<i32> {
    let mut polarity: BTreeMap<i32, (bool, bool)> = BTreeMap::new();
    for clause in clauses {
        for &literal in clause.literals() {
            if model.is_assigned(literal) {
                continue;
            }
            let entry = polarity.entry(literal.abs()).or_default();
            if literal > 0 {
                entry.0 = true;
            } else {
                entry.1 = true;
            }
        }
    }

    polarity.into_iter().find_map(|(var, (pos, neg))| match (pos, neg) {
        (true, false) => Some(var),
        (false, true) => Some(-var),
        _ => None,
    })
}

/// Find the forced literal of the first unsatisfied clause with exactly one
/// unassigned literal, scanning clauses in formula order
fn find_unit_literal(clauses: &[&Clause], model: &Model) -> Option<i32> {
    for clause in clauses {
        if model.satisfies(clause) {
            continue;
        }
        let mut unassigned = clause
            .literals()
            .iter()
            .copied()
            .filter(|&lit| !model.is_assigned(lit));
        if let (Some(literal), None) = (unassigned.next(), unassigned.next()) {
            return Some(literal);
        }
    }
    None
}
