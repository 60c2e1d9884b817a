use thiserror::Error;

use super::model::Comment;

const SEED_COMMENTS: &str = include_str!("seed_comments.json");

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to parse seed comments")]
    Parse(#[from] serde_json::Error),
}

/// Demonstration comments loaded into a fresh store.
pub fn seed_comments() -> Result<Vec<Comment>, FixtureError> {
    Ok(serde_json::from_str(SEED_COMMENTS)?)
}
