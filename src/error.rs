// Error types for the math kernel

use thiserror::Error;

/// Degenerate input detected by one of the fallible kernel operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// Attempted to normalize a vector whose length is zero or not finite.
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    /// Attempted to invert a matrix with no inverse.
    #[error("matrix is singular (determinant: {determinant})")]
    Singular { determinant: f32 },
}

/// Convenience alias for `Result<T, MathError>`.
pub type MathResult<T> = Result<T, MathError>;
