//! Error types shared across the crate.

use thiserror::Error;

use crate::types::MAX_REPOSITORIES;

/// Problems with what the user typed. Shown inline; never alter state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid GitHub URL: {0}")]
    InvalidUrl(String),
    #[error("Please enter valid GitHub URLs.")]
    NoValidUrls,
    #[error("All provided repositories are already added.")]
    AllDuplicates,
    #[error("You can only add up to {MAX_REPOSITORIES} repositories.")]
    CapacityExceeded,
    #[error("Please enter a name for the data set.")]
    EmptySaveName,
}

/// Failures that stop a whole fetch batch before any request is made.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("GitHub token is not set. Please add GITHUB_TOKEN to your .env file.")]
    MissingToken,
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Failures writing the saved collections file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write collections file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode collections: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a collection was not saved.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
