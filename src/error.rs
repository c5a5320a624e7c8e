use crate::grid::Position;
use thiserror::Error;

/// Errors raised at the call boundary of the generator and the search engine.
///
/// An unreachable goal is not an error; searches report it as an empty path.
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("Position {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        position: Position,
        rows: usize,
        cols: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MazeError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        MazeError::InvalidParameter {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
