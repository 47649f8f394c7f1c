use thiserror::Error;

/// Top-level error type for the Bankline embankment kernel.
#[derive(Debug, Error)]
pub enum BanklineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric inputs.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("a centerline requires at least 2 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("zero-length segment between ({x0}, {y0}) and ({x1}, {y1})")]
    ZeroLengthSegment { x0: f64, y0: f64, x1: f64, y1: f64 },
}

/// Errors related to embankment generation operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("offset distance {0} must be strictly positive")]
    NonPositiveDistance(f64),

    #[error("offset distance {value} exceeds the geometric validity bound {bound}")]
    DistanceTooLarge { value: f64, bound: f64 },

    #[error("no embankment could be generated: {0}")]
    NoOutput(String),
}

/// Convenience type alias for results using [`BanklineError`].
pub type Result<T> = std::result::Result<T, BanklineError>;
