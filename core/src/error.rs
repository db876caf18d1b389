use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Mines and items must leave at least one plain cell")]
    TooManyContents,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Content layout does not fit the board")]
    InvalidLayout,
    #[error("Stored score record could not be decoded")]
    MalformedRecord,
}

pub type Result<T> = core::result::Result<T, GameError>;
