use super::pivot::{iterate, pivot};
use crate::error::SimplexError;
use crate::problem::{Direction, Problem};
use crate::standard_form::{build_tableau, objective_costs};
use crate::tableau::{Phase, Tableau};
use crate::trace::{Trace, TraceEvent};
use crate::util::EPS;

use log::{debug, info};

/// How the phase 2 tableau is obtained once phase 1 is optimal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PhaseTransition {
    /// Discard phase 1 and build phase 2 from the parsed problem. Phase 1
    /// iterates the unpriced artificial row, and the phase 2 start is the
    /// slack/artificial layout, not the basis phase 1 reached.
    Rebuild,

    /// Keep the phase 1 basis: the artificial row is priced out before
    /// phase 1, a positive artificial sum afterwards is reported as
    /// infeasible, artificial columns are dropped, and the real objective row
    /// is priced out against the carried basis.
    CarryBasis,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SolveState {
    ParsingInput,
    BuildingPhase1,
    IteratingPhase1,
    BuildingPhase2,
    IteratingPhase2,
    Done,
    Error,
}

/// Terminal output of a successful run.
#[derive(Debug, Clone)]
pub struct Terminal {
    pub problem: Problem,
    pub tableau: Tableau,
}

pub struct PhaseController {
    transition: PhaseTransition,
    max_iter: u64,
    state: SolveState,
    trace: Trace,
}

impl PhaseController {
    pub fn new(transition: PhaseTransition, max_iter: u64) -> Self {
        Self {
            transition,
            max_iter,
            state: SolveState::ParsingInput,
            trace: Trace::new(),
        }
    }

    pub fn state(&self) -> SolveState {
        self.state
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn into_trace(self) -> Trace {
        self.trace
    }

    fn enter(&mut self, state: SolveState) {
        debug!("{:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn run<S: AsRef<str>>(
        &mut self,
        objective: &str,
        constraints: &[S],
        direction: Direction,
    ) -> Result<Terminal, SimplexError> {
        let result = self.run_phases(objective, constraints, direction);

        if let Err(err) = &result {
            debug!("solve failed: {}", err);
            self.enter(SolveState::Error);
        }

        result
    }

    fn run_phases<S: AsRef<str>>(
        &mut self,
        objective: &str,
        constraints: &[S],
        direction: Direction,
    ) -> Result<Terminal, SimplexError> {
        self.enter(SolveState::ParsingInput);

        self.trace.push(TraceEvent::Objective(objective.to_string()));

        for (i, text) in constraints.iter().enumerate() {
            self.trace.push(TraceEvent::Constraint {
                position: i + 1,
                text: text.as_ref().to_string(),
            });
        }

        self.trace.push(TraceEvent::Direction(direction));

        let prob = Problem::parse(objective, constraints, direction)?;

        info!("PHASE 1");
        self.enter(SolveState::BuildingPhase1);

        let mut tableau = build_tableau(&prob, Phase::One)?;

        if self.transition == PhaseTransition::CarryBasis {
            let basis = starting_basis(&tableau);
            tableau = price_out(tableau, &basis);
        }

        self.trace.push(TraceEvent::InitialTableau {
            phase: Phase::One,
            tableau: tableau.clone(),
        });

        self.enter(SolveState::IteratingPhase1);
        let tableau = self.iterate_phase(tableau, Phase::One)?;

        self.trace.push(TraceEvent::PhaseOneComplete);

        info!("PHASE 2");
        self.enter(SolveState::BuildingPhase2);

        let tableau = match self.transition {
            PhaseTransition::Rebuild => build_tableau(&prob, Phase::Two)?,
            PhaseTransition::CarryBasis => carry_basis(&prob, tableau)?,
        };

        self.trace.push(TraceEvent::InitialTableau {
            phase: Phase::Two,
            tableau: tableau.clone(),
        });

        self.enter(SolveState::IteratingPhase2);
        let tableau = self.iterate_phase(tableau, Phase::Two)?;

        self.enter(SolveState::Done);

        Ok(Terminal {
            problem: prob,
            tableau,
        })
    }

    fn iterate_phase(&mut self, tableau: Tableau, phase: Phase) -> Result<Tableau, SimplexError> {
        let trace = &mut self.trace;

        let (tableau, iters) = iterate(tableau, phase, self.max_iter, |iteration, t| {
            trace.push(TraceEvent::Iteration {
                phase,
                iteration,
                tableau: t.clone(),
            })
        })?;

        info!("{} optimal after {} iterations", phase, iters);
        Ok(tableau)
    }
}

/// Slack (≤ rows) or artificial (≥ and = rows) column of every row of a
/// freshly built tableau.
fn starting_basis(tableau: &Tableau) -> Vec<Option<usize>> {
    let layout = tableau.layout();
    let slack = layout.slack_start()..layout.surplus_start();
    let artificial = layout.artificial_start()..layout.rhs();

    (0..tableau.obj_row())
        .map(|i| {
            slack
                .clone()
                .chain(artificial.clone())
                .find(|&j| tableau.get(i, j) == 1.)
        })
        .collect()
}

/// Zeroes the objective-row entry of every basic column by subtracting
/// multiples of its row.
fn price_out(mut tableau: Tableau, basis: &[Option<usize>]) -> Tableau {
    let obj_row = tableau.obj_row();

    for (i, basic) in basis.iter().enumerate() {
        let j = match basic {
            Some(j) => *j,
            None => continue,
        };

        let factor = tableau.get(obj_row, j);

        if factor == 0. {
            continue;
        }

        for k in 0..tableau.cols() {
            let delta = factor * tableau.get(i, k);
            tableau.matrix[(obj_row, k)] -= delta;
        }
    }

    tableau
}

fn carry_basis(prob: &Problem, phase_1: Tableau) -> Result<Tableau, SimplexError> {
    let layout = *phase_1.layout();

    //the priced phase 1 row holds minus the artificial sum
    let artificial_sum = -phase_1.obj_value();

    if artificial_sum > EPS {
        info!("problem is infeasible");
        return Err(SimplexError::Infeasible { artificial_sum });
    }

    let mut tableau = phase_1;

    //artificials still basic sit at zero, swap them for any real column
    for (row, basic) in tableau.basis().into_iter().enumerate() {
        match basic {
            Some(col) if layout.is_artificial(col) => (),
            _ => continue,
        }

        let replacement = (0..layout.artificial_start()).find(|&j| tableau.get(row, j).abs() > EPS);

        match replacement {
            Some(col) => {
                debug!("driving artificial out of row {} via column {}", row, col);
                tableau = pivot(&tableau, row, col);
            }
            None => debug!("row {} is redundant", row),
        }
    }

    let matrix = if layout.artificial > 0 {
        tableau
            .matrix
            .remove_columns(layout.artificial_start(), layout.artificial)
    } else {
        tableau.matrix
    };

    let tableau = Tableau::new(matrix, layout.without_artificial())?;
    let basis = tableau.basis();

    let mut tableau = tableau;
    let obj_row = tableau.obj_row();

    for k in 0..tableau.cols() {
        tableau.matrix[(obj_row, k)] = 0.;
    }

    for (j, c_j) in objective_costs(prob).into_iter().enumerate() {
        tableau.matrix[(obj_row, j)] = c_j;
    }

    Ok(price_out(tableau, &basis))
}
