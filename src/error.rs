use crate::tableau::Phase;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimplexError {
    #[error("{}", parse_message(.constraint, .message))]
    Parse {
        constraint: Option<usize>,
        message: String,
    },

    #[error("iteration limit of {limit} reached in {phase}, possible unbounded problem")]
    IterationLimit { phase: Phase, limit: u64 },

    //the label is inherited, a missing improving column is not unboundedness
    #[error("unbounded solution ({phase} found no improving column)")]
    NoImprovingColumn { phase: Phase },

    //the label is inherited, a failed ratio test is not infeasibility
    #[error("no feasible solution ({phase} found no pivot row for column {column})")]
    NoValidPivotRow { phase: Phase, column: usize },

    #[error("no feasible solution, phase 1 ended with artificial sum {artificial_sum}")]
    Infeasible { artificial_sum: f64 },

    #[error("at least one constraint is required to build a tableau")]
    NoConstraints,

    #[error("a {rows}x{cols} matrix does not fit a layout of {expected_cols} columns")]
    Shape {
        rows: usize,
        cols: usize,
        expected_cols: usize,
    },
}

fn parse_message(constraint: &Option<usize>, message: &str) -> String {
    match constraint {
        Some(position) => format!("invalid constraint at position {}: {}", position, message),
        None => format!("invalid objective: {}", message),
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    IterationLimit,
    NoImprovingColumn,
    NoValidPivotRow,
    Infeasible,
    Structure,
}

impl SimplexError {
    pub fn parse(constraint: Option<usize>, message: impl Into<String>) -> Self {
        SimplexError::Parse {
            constraint,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SimplexError::Parse { .. } => ErrorKind::Parse,
            SimplexError::IterationLimit { .. } => ErrorKind::IterationLimit,
            SimplexError::NoImprovingColumn { .. } => ErrorKind::NoImprovingColumn,
            SimplexError::NoValidPivotRow { .. } => ErrorKind::NoValidPivotRow,
            SimplexError::Infeasible { .. } => ErrorKind::Infeasible,
            SimplexError::NoConstraints | SimplexError::Shape { .. } => ErrorKind::Structure,
        }
    }

    /// 1-based position of the offending constraint, for parse failures.
    pub fn constraint_position(&self) -> Option<usize> {
        match self {
            SimplexError::Parse { constraint, .. } => *constraint,
            _ => None,
        }
    }
}
