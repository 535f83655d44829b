use thiserror::Error;

/// Rejected user input. The action that produced it leaves the editor untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("({x}, {y}) is outside the 0 to {max} range.")]
    OutOfDomain { x: f64, y: f64, max: f64 },
    #[error("({x}, {y}) is not a finite position.")]
    NotFinite { x: f64, y: f64 },
    #[error("Row {row} has invalid X or Y ({reason}).")]
    InvalidRow { row: usize, reason: RowError },
    #[error("Please enter at least 2 valid data points, found {found}.")]
    TooFewPoints { found: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("must be {0}")]
    OutsideDomain(String),
}
