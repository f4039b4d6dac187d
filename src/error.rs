//! Error types for farmgate
//!
//! Domain-specific error types using thiserror. Fatal errors cross the
//! CLI edge as `anyhow::Error` via `?`; there is no aggregate error type.

use std::path::PathBuf;
use thiserror::Error;

/// Release index and manifest errors
#[derive(Error, Debug)]
pub enum IndexError {
    /// Network error while fetching an index document
    #[error("Network error fetching '{location}': {error}")]
    NetworkError { location: String, error: String },

    /// IO error while reading a local index document
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },

    /// Document could not be parsed
    #[error("Failed to parse '{location}': {error}")]
    ParseError { location: String, error: String },

    /// Distribution not listed in the release index
    #[error("Distribution '{name}' not found in release index")]
    DistributionNotFound { name: String },

    /// Build profile not listed for the distribution
    #[error("Build profile '{name}' not found for distribution '{distro}'")]
    ProfileNotFound { name: String, distro: String },
}

/// Build profile configuration errors
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Required setting missing from the build profile
    #[error("Build profile is missing required setting '{setting}'")]
    MissingSetting { setting: String },
}

/// Repository index errors
#[derive(Error, Debug)]
pub enum RepoIndexError {
    /// Network error while fetching a repository index file
    #[error("Network error fetching '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// IO error on the local index cache
    #[error("Cache IO error for '{path}': {error}")]
    CacheError { path: PathBuf, error: String },
}

/// Job dispatch errors
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Build backend could not be reached
    #[error("Cannot connect to build backend '{url}': {error}")]
    ConnectError { url: String, error: String },

    /// Trigger request failed below the HTTP layer
    #[error("Trigger request for job '{job}' failed: {error}")]
    RequestError { job: String, error: String },
}
