use crate::error::SimplexError;
use crate::tableau::{Phase, Tableau};
use crate::util::{EPS, ITER_WIDTH};

use log::{debug, info, trace};

/// True when no objective-row entry (RHS excluded) is negative. Entries
/// within `EPS` of zero count as zero.
pub fn is_optimal(tableau: &Tableau) -> bool {
    tableau.reduced_costs().all(|r| r >= -EPS)
}

/// Column with the most negative objective-row entry; ties go to the
/// leftmost column.
pub fn select_entering_column(tableau: &Tableau) -> Option<usize> {
    let mut best = -EPS;
    let mut col = None;

    for (j, r_j) in tableau.reduced_costs().enumerate() {
        if r_j < best {
            best = r_j;
            col = Some(j);
        }
    }

    col
}

/// Minimum ratio test over rows with a strictly positive entry in `col`; ties
/// go to the topmost row.
///
/// Entries below `EPS` times the column's largest constraint entry count as
/// zero, so small coefficients still qualify when the whole column is small.
pub fn select_leaving_row(tableau: &Tableau, col: usize) -> Option<usize> {
    let scale = (0..tableau.obj_row())
        .map(|i| tableau.get(i, col).abs())
        .fold(0., f64::max);
    let threshold = EPS * scale;

    let mut min_ratio = f64::INFINITY;
    let mut row = None;

    for i in 0..tableau.obj_row() {
        let a_ij = tableau.get(i, col);

        if a_ij > 0. && a_ij > threshold {
            let ratio = tableau.rhs(i) / a_ij;

            if row.is_none() || ratio < min_ratio {
                min_ratio = ratio;
                row = Some(i);
            }
        }
    }

    row
}

/// Gauss-Jordan step on `(row, col)`, returning a new tableau in which `col`
/// is the unit vector of `row`. The input is left untouched.
pub fn pivot(tableau: &Tableau, row: usize, col: usize) -> Tableau {
    let pivot_val = tableau.get(row, col);
    let pivot_row = tableau.matrix.row(row) / pivot_val;

    let mut next = tableau.clone();

    for i in 0..tableau.rows() {
        if i == row {
            next.matrix.set_row(i, &pivot_row);
            continue;
        }

        let factor = tableau.get(i, col);

        for j in 0..tableau.cols() {
            next.matrix[(i, j)] -= factor * pivot_row[j];
        }
    }

    next
}

/// Pivots until the tableau is optimal.
///
/// `on_pivot` sees every intermediate tableau with its 1-based iteration
/// number. Returns the optimal tableau and the number of pivots taken.
pub fn iterate<F>(
    mut tableau: Tableau,
    phase: Phase,
    max_iter: u64,
    mut on_pivot: F,
) -> Result<(Tableau, u64), SimplexError>
where
    F: FnMut(u64, &Tableau),
{
    info!(
        "solving {} tableau with {} rows and {} columns",
        phase,
        tableau.rows(),
        tableau.cols()
    );
    info!("Iteration  |  Objective");

    let mut iter = 0u64;

    while !is_optimal(&tableau) {
        if iter >= max_iter {
            debug!("reached max iterations");
            return Err(SimplexError::IterationLimit {
                phase,
                limit: max_iter,
            });
        }

        let col = match select_entering_column(&tableau) {
            Some(col) => col,
            None => return Err(SimplexError::NoImprovingColumn { phase }),
        };

        let row = match select_leaving_row(&tableau, col) {
            Some(row) => row,
            None => return Err(SimplexError::NoValidPivotRow { phase, column: col }),
        };

        debug!("pivot on row {}, column {}", row, col);

        tableau = pivot(&tableau, row, col);
        iter += 1;

        info!(
            "{:it$}  |  {:.8E}",
            iter,
            tableau.obj_value(),
            it = ITER_WIDTH
        );
        trace!("tableau:\n{}", tableau);

        on_pivot(iter, &tableau);
    }

    Ok((tableau, iter))
}
