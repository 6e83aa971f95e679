use crate::error::SimplexError;
use crate::util::EPS;

use nalgebra::DMatrix;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    One,
    Two,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Phase::One => write!(f, "phase 1"),
            Phase::Two => write!(f, "phase 2"),
        }
    }
}

/// Column groups of a tableau, in their fixed order: decision, slack,
/// surplus, artificial, then the RHS column.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub decision: usize,
    pub slack: usize,
    pub surplus: usize,
    pub artificial: usize,
}

impl ColumnLayout {
    pub fn slack_start(&self) -> usize {
        self.decision
    }

    pub fn surplus_start(&self) -> usize {
        self.slack_start() + self.slack
    }

    pub fn artificial_start(&self) -> usize {
        self.surplus_start() + self.surplus
    }

    pub fn rhs(&self) -> usize {
        self.artificial_start() + self.artificial
    }

    pub fn cols(&self) -> usize {
        self.rhs() + 1
    }

    pub fn is_artificial(&self, col: usize) -> bool {
        col >= self.artificial_start() && col < self.rhs()
    }

    pub fn without_artificial(&self) -> ColumnLayout {
        ColumnLayout {
            artificial: 0,
            ..*self
        }
    }
}

/// Simplex tableau: one row per constraint plus the objective row (last), and
/// the RHS in the last column.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    pub(crate) matrix: DMatrix<f64>,
    layout: ColumnLayout,
}

impl Tableau {
    /// Wraps `matrix`, which needs at least the objective row and exactly
    /// `layout.cols()` columns.
    pub fn new(matrix: DMatrix<f64>, layout: ColumnLayout) -> Result<Self, SimplexError> {
        if matrix.nrows() == 0 || matrix.ncols() != layout.cols() {
            return Err(SimplexError::Shape {
                rows: matrix.nrows(),
                cols: matrix.ncols(),
                expected_cols: layout.cols(),
            });
        }

        Ok(Self { matrix, layout })
    }

    pub fn zeros(constraints: usize, layout: ColumnLayout) -> Self {
        Self {
            matrix: DMatrix::zeros(constraints + 1, layout.cols()),
            layout,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.matrix.ncols()
    }

    #[inline]
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn obj_row(&self) -> usize {
        self.rows() - 1
    }

    pub fn rhs_col(&self) -> usize {
        self.cols() - 1
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.matrix[(row, col)]
    }

    pub fn rhs(&self, row: usize) -> f64 {
        self.matrix[(row, self.rhs_col())]
    }

    /// The objective-row RHS entry.
    pub fn obj_value(&self) -> f64 {
        self.rhs(self.obj_row())
    }

    /// Objective-row entries, RHS excluded.
    pub fn reduced_costs(&self) -> impl Iterator<Item = f64> + '_ {
        let obj_row = self.obj_row();
        (0..self.rhs_col()).map(move |j| self.matrix[(obj_row, j)])
    }

    pub fn row_values(&self, row: usize) -> Vec<f64> {
        self.matrix.row(row).iter().copied().collect()
    }

    /// Row whose unit vector `col` holds, if `col` is a unit column: 1 in one
    /// row and 0 in every other row, the objective row included.
    pub fn unit_row(&self, col: usize) -> Option<usize> {
        let mut found = None;

        for (i, &v) in self.matrix.column(col).iter().enumerate() {
            if (v - 1.).abs() < EPS {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            } else if v.abs() >= EPS {
                return None;
            }
        }

        found.filter(|&row| row != self.obj_row())
    }

    /// For every constraint row, the first column that is basic in it.
    pub fn basis(&self) -> Vec<Option<usize>> {
        let mut basis = vec![None; self.obj_row()];

        for col in 0..self.rhs_col() {
            if let Some(row) = self.unit_row(col) {
                if basis[row].is_none() {
                    basis[row] = Some(col);
                }
            }
        }

        basis
    }
}

fn fixed_2(v: f64) -> String {
    //adding 0 turns -0 into 0
    format!("{:.2}", v + 0.)
}

impl std::fmt::Display for Tableau {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.matrix.row_iter() {
            let cells: Vec<String> = row.iter().map(|&v| fixed_2(v)).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }

        Ok(())
    }
}
