mod error;
pub mod parse;
pub mod problem;
mod simplex;
pub mod solver;
mod standard_form;
pub mod tableau;
pub mod trace;
mod util;

pub use crate::error::{ErrorKind, SimplexError};
pub use crate::parse::{parse_constraint, parse_objective, parse_terms, sanitize_input};
pub use crate::problem::{Constraint, ConstraintOp, Direction, Objective, Problem, Term};
pub use crate::simplex::phase::{PhaseController, PhaseTransition, SolveState, Terminal};
pub use crate::simplex::pivot::{
    is_optimal, iterate, pivot, select_entering_column, select_leaving_row,
};
pub use crate::solver::{extract_solution, Readout, Report, SimplexSolver, Solution, SolveResult};
pub use crate::standard_form::{build_tableau, objective_costs};
pub use crate::tableau::{ColumnLayout, Phase, Tableau};
pub use crate::trace::{Trace, TraceEvent};
