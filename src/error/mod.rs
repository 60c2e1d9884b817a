use crate::comments::FixtureError;
use crate::state::StateError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error("failed to load seed comments: {0}")]
    Fixture(#[from] FixtureError),
    #[error("failed to serialize comments: {0}")]
    Serialize(#[from] serde_json::Error),
}
