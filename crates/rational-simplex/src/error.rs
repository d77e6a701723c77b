use thiserror::Error;

use crate::problem::{Inequality, Sense};

/// Errors surfaced by the solver. Infeasibility is not one of them: it is a
/// regular [`Outcome`](crate::Outcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("invalid problem: {0}")]
    Validation(#[from] ValidationError),

    #[error("division by zero")]
    DivisionByZero,

    #[error("no terminal tableau reached after {iterations} pivots")]
    IterationLimit { iterations: usize },
}

/// A malformed [`Problem`](crate::Problem), detected before any tableau exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("objective has no coefficients")]
    EmptyObjective,

    #[error("expected {expected} bounds (one per constraint), found {found}")]
    BoundsLength { expected: usize, found: usize },

    #[error("expected {expected} inequality directions (one per constraint), found {found}")]
    InequalitiesLength { expected: usize, found: usize },

    #[error("constraint {row} has {found} coefficients, objective has {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("constraint {row} uses `{inequality}`, which cannot be modelled when the sense is {sense}")]
    UnsupportedInequality {
        row: usize,
        inequality: Inequality,
        sense: Sense,
    },
}
