use thiserror::Error;

/// Contract violations from the embedding shell. Ordinary gameplay input
/// (revealing a flagged cell, flagging a revealed cell, acting after the
/// game ended) is never an error; those cases are no-op outcomes.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("coordinates ({x}, {y}) are outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("unknown difficulty '{0}', expected beginner, intermediate or expert")]
    InvalidDifficulty(String),
}
