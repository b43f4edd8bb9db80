//! Error type shared by every fallible cube operation.

use thiserror::Error;

use crate::solver::Stage;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid move notation: {token:?}")]
    InvalidNotation { token: String },
    #[error("Not a valid sticker: {label:?}")]
    UnknownSticker { label: String },
    #[error("Unsupported cube size {0}, only 3 is supported")]
    UnsupportedSize(usize),
    #[error("Invalid facelet string: {0}")]
    InvalidFacelets(String),
    #[error("Cube state is not reachable from solved: {0}")]
    Unsolvable(String),
    #[error("Solver stage {stage} did not converge")]
    StageStalled { stage: Stage },
}

pub type Result<T> = std::result::Result<T, Error>;
