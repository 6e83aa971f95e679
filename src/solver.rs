use crate::error::SimplexError;
use crate::problem::{Direction, Problem};
use crate::simplex::phase::{PhaseController, PhaseTransition};
use crate::tableau::Tableau;
use crate::trace::{Trace, TraceEvent};
use crate::util::{DEFAULT_MAX_ITER, EPS};

use log::info;

pub type SolveResult = Result<Report, SimplexError>;

/// Where the terminal tableau's values are read from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Readout {
    /// Optimal value is the objective-row RHS as stored; a variable's value is
    /// its objective-row entry when that entry is positive.
    ObjectiveRow,

    /// A variable's value is the RHS of the row it is basic in (0 when
    /// nonbasic); the optimal value is the objective-row RHS, negated when
    /// minimizing.
    BasicRhs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    obj: f64,
    values: Vec<(String, f64)>,
}

impl Solution {
    pub fn new(obj: f64, values: Vec<(String, f64)>) -> Self {
        Self { obj, values }
    }

    pub fn obj(&self) -> f64 {
        self.obj
    }

    /// Every decision variable in column order.
    pub fn values(&self) -> &[(String, f64)] {
        self.values.as_slice()
    }

    pub fn value(&self, var: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == var)
            .map(|(_, v)| *v)
    }

    /// The variables listed in a report: those with a value above zero.
    pub fn positive_values(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values
            .iter()
            .filter(|(_, v)| *v > 0.)
            .map(|(name, v)| (name.as_str(), *v))
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Optimal value: {:.2}", self.obj + 0.)?;

        for (name, v) in self.positive_values() {
            writeln!(f, "{}: {:.2}", name, v)?;
        }

        Ok(())
    }
}

/// Reads the optimal value and the decision variables from a terminal
/// tableau.
pub fn extract_solution(prob: &Problem, tableau: &Tableau, readout: Readout) -> Solution {
    let obj_row = tableau.obj_row();
    let vars = prob.vars();

    match readout {
        Readout::ObjectiveRow => {
            let values = vars
                .iter()
                .enumerate()
                .map(|(j, name)| {
                    let r_j = tableau.get(obj_row, j);
                    (name.clone(), if r_j > 0. { r_j } else { 0. })
                })
                .collect();

            Solution::new(tableau.obj_value(), values)
        }

        Readout::BasicRhs => {
            let basis = tableau.basis();

            let values = vars
                .iter()
                .enumerate()
                .map(|(j, name)| {
                    let v = basis
                        .iter()
                        .position(|&basic| basic == Some(j))
                        .map(|i| tableau.rhs(i))
                        .unwrap_or(0.);

                    (name.clone(), if v.abs() < EPS { 0. } else { v })
                })
                .collect();

            let obj = match prob.direction() {
                Direction::Maximize => tableau.obj_value(),
                Direction::Minimize => -tableau.obj_value(),
            };

            Solution::new(obj, values)
        }
    }
}

/// Outcome of a successful solve.
#[derive(Debug, Clone)]
pub struct Report {
    pub trace: Trace,
    pub solution: Solution,
}

/// Two-phase tableau simplex solver.
///
/// The default configuration carries the phase 1 basis into phase 2 and reads
/// values from the basic rows. [`SimplexSolver::compatible`] rebuilds phase 2
/// from scratch and reads values from the objective row instead.
#[derive(Debug, Clone)]
pub struct SimplexSolver {
    max_iter: u64,
    transition: PhaseTransition,
    readout: Readout,
}

impl std::default::Default for SimplexSolver {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            transition: PhaseTransition::CarryBasis,
            readout: Readout::BasicRhs,
        }
    }
}

impl SimplexSolver {
    pub fn new(max_iter: Option<u64>) -> Self {
        Self {
            max_iter: max_iter.unwrap_or(DEFAULT_MAX_ITER),
            ..Default::default()
        }
    }

    pub fn compatible() -> Self {
        Self {
            transition: PhaseTransition::Rebuild,
            readout: Readout::ObjectiveRow,
            ..Default::default()
        }
    }

    pub fn with_transition(mut self, transition: PhaseTransition) -> Self {
        self.transition = transition;
        self
    }

    pub fn with_readout(mut self, readout: Readout) -> Self {
        self.readout = readout;
        self
    }

    pub fn max_iter(&self) -> u64 {
        self.max_iter
    }

    /// Solves `direction objective` subject to `constraints`.
    ///
    /// Input is expected to be normalized (ASCII comparators, no whitespace).
    pub fn solve<S: AsRef<str>>(
        &self,
        objective: &str,
        constraints: &[S],
        direction: Direction,
    ) -> SolveResult {
        let mut controller = PhaseController::new(self.transition, self.max_iter);
        let terminal = controller.run(objective, constraints, direction)?;

        let solution = extract_solution(&terminal.problem, &terminal.tableau, self.readout);

        info!("found optimal point with objective value {}", solution.obj());

        let mut trace = controller.into_trace();
        trace.push(TraceEvent::FinalReport(solution.clone()));

        Ok(Report { trace, solution })
    }
}
