#![allow(non_snake_case)]

use crate::error::SimplexError;
use crate::problem::{ConstraintOp, Direction, Problem};
use crate::tableau::{ColumnLayout, Phase, Tableau};

use log::{debug, trace};

impl std::convert::From<&Problem> for ColumnLayout {
    fn from(prob: &Problem) -> ColumnLayout {
        let mut layout = ColumnLayout {
            decision: prob.vars().len(),
            slack: 0,
            surplus: 0,
            artificial: 0,
        };

        for constraint in prob.constraints() {
            match constraint.op {
                ConstraintOp::Lte => layout.slack += 1,
                ConstraintOp::Gte => {
                    layout.surplus += 1;
                    layout.artificial += 1;
                }
                ConstraintOp::Eq => layout.artificial += 1,
            }
        }

        layout
    }
}

/// Phase-2 costs of the decision columns, negated when maximizing so the
/// tableau is always minimized.
pub fn objective_costs(prob: &Problem) -> Vec<f64> {
    let mut costs = vec![0.; prob.vars().len()];

    let sign = match prob.direction() {
        Direction::Maximize => -1.,
        Direction::Minimize => 1.,
    };

    for term in &prob.objective.terms {
        //every objective variable is in the universe
        if let Some(j) = prob.var_index(&term.var) {
            costs[j] += sign * term.coeff;
        }
    }

    costs
}

/// Builds the starting tableau of a phase.
///
/// Constraint rows carry the decision coefficients, one `+1` slack (≤), one
/// `-1` surplus and `+1` artificial (≥), or one `+1` artificial (=), and the
/// RHS. Slack, surplus and artificial columns are handed out in row order, so
/// each kind is contiguous. The phase 1 objective row is `+1` on every
/// artificial column; the phase 2 row holds [`objective_costs`].
pub fn build_tableau(prob: &Problem, phase: Phase) -> Result<Tableau, SimplexError> {
    let m = prob.constraints().len();

    if m == 0 {
        return Err(SimplexError::NoConstraints);
    }

    let layout = ColumnLayout::from(prob);
    let mut tableau = Tableau::zeros(m, layout);
    let rhs_col = layout.rhs();
    let obj_row = m;

    debug!(
        "building {} tableau: {} decision, {} slack, {} surplus, {} artificial columns",
        phase, layout.decision, layout.slack, layout.surplus, layout.artificial
    );

    let mut slack_col = layout.slack_start();
    let mut surplus_col = layout.surplus_start();
    let mut artificial_col = layout.artificial_start();

    let A = &mut tableau.matrix;

    for (i, constraint) in prob.constraints().iter().enumerate() {
        for term in &constraint.terms {
            if let Some(j) = prob.var_index(&term.var) {
                A[(i, j)] += term.coeff;
            }
        }

        match constraint.op {
            ConstraintOp::Lte => {
                A[(i, slack_col)] = 1.;
                slack_col += 1;
            }

            ConstraintOp::Gte => {
                A[(i, surplus_col)] = -1.;
                surplus_col += 1;
                A[(i, artificial_col)] = 1.;
                artificial_col += 1;
            }

            ConstraintOp::Eq => {
                A[(i, artificial_col)] = 1.;
                artificial_col += 1;
            }
        }

        A[(i, rhs_col)] = constraint.rhs;
    }

    assert_eq!(slack_col, layout.surplus_start());
    assert_eq!(surplus_col, layout.artificial_start());
    assert_eq!(artificial_col, rhs_col);

    match phase {
        Phase::One => {
            for j in layout.artificial_start()..rhs_col {
                A[(obj_row, j)] = 1.;
            }
        }

        Phase::Two => {
            for (j, c_j) in objective_costs(prob).into_iter().enumerate() {
                A[(obj_row, j)] = c_j;
            }
        }
    }

    trace!("initial {} tableau:\n{}", phase, tableau);

    Ok(tableau)
}
