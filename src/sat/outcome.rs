//! Solve verdicts and timing reports

use super::Model;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Reserved timing value for a solve abandoned at its deadline.
///
/// Reports never carry a measured negative duration, so the sentinel is
/// unambiguous in timing tables and serialized results.
pub const TIMEOUT_SENTINEL_MS: f64 = -1.0;

/// Why a solver gave up without an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// DPLL exceeded its recursion depth bound
    DepthLimit,
    /// Brute force refused a search space above its cell bound
    SearchSpaceTooLarge,
    /// The external oracle returned without deciding the formula
    Inconclusive,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AbortReason::DepthLimit => "recursion depth limit reached",
            AbortReason::SearchSpaceTooLarge => "search space too large",
            AbortReason::Inconclusive => "solver returned no decision",
        };
        write!(f, "{}", text)
    }
}

/// The answer a solver produced for one formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// A satisfying model was found
    Satisfiable(Model),
    /// The formula was proven unsatisfiable
    Unsatisfiable,
    /// The solver gave up; neither a model nor a proof exists
    Aborted(AbortReason),
    /// The solve was abandoned at its wall-clock deadline
    TimedOut,
}

impl Verdict {
    /// Short label for tables and log lines
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Satisfiable(_) => "sat",
            Verdict::Unsatisfiable => "unsat",
            Verdict::Aborted(_) => "aborted",
            Verdict::TimedOut => "timeout",
        }
    }

    /// Whether the verdict decides the formula
    pub fn is_conclusive(&self) -> bool {
        matches!(self, Verdict::Satisfiable(_) | Verdict::Unsatisfiable)
    }
}

/// One solve's verdict plus its wall-clock cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub verdict: Verdict,
    /// Milliseconds spent solving, or [`TIMEOUT_SENTINEL_MS`]
    pub elapsed_ms: f64,
}

impl SolveReport {
    /// Report a completed solve with its measured duration
    pub fn new(verdict: Verdict, elapsed: Duration) -> Self {
        Self {
            verdict,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }

    /// Report a solve abandoned at its deadline
    pub fn timed_out() -> Self {
        Self {
            verdict: Verdict::TimedOut,
            elapsed_ms: TIMEOUT_SENTINEL_MS,
        }
    }

    /// The satisfying model, if the verdict carries one
    pub fn model(&self) -> Option<&Model> {
        match &self.verdict {
            Verdict::Satisfiable(model) => Some(model),
            _ => None,
        }
    }

    /// Whether the verdict is satisfiable
    pub fn is_satisfiable(&self) -> bool {
        matches!(self.verdict, Verdict::Satisfiable(_))
    }
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            Verdict::TimedOut => write!(f, "timeout"),
            Verdict::Aborted(reason) => {
                write!(f, "aborted ({}) in {:.2} ms", reason, self.elapsed_ms)
            }
            verdict => write!(f, "{} in {:.2} ms", verdict.label(), self.elapsed_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::Satisfiable(Model::new()).label(), "sat");
        assert_eq!(Verdict::Unsatisfiable.label(), "unsat");
        assert_eq!(Verdict::Aborted(AbortReason::DepthLimit).label(), "aborted");
        assert_eq!(Verdict::TimedOut.label(), "timeout");

        assert!(Verdict::Unsatisfiable.is_conclusive());
        assert!(!Verdict::TimedOut.is_conclusive());
        assert!(!Verdict::Aborted(AbortReason::Inconclusive).is_conclusive());
    }

    #[test]
    fn test_report_timing() {
        let report = SolveReport::new(Verdict::Unsatisfiable, Duration::from_millis(250));
        assert!((report.elapsed_ms - 250.0).abs() < 1.0);
        assert!(!report.is_satisfiable());

        let timed_out = SolveReport::timed_out();
        assert_eq!(timed_out.elapsed_ms, TIMEOUT_SENTINEL_MS);
        assert_eq!(timed_out.verdict, Verdict::TimedOut);
    }

    #[test]
    fn test_report_display() {
        let report = SolveReport::new(Verdict::Unsatisfiable, Duration::from_millis(3));
        assert!(report.to_string().starts_with("unsat in "));
        assert_eq!(SolveReport::timed_out().to_string(), "timeout");
    }
}
