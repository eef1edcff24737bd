//! Error types and handling for autotag
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for autotag operations
#[derive(Error, Diagnostic, Debug)]
pub enum AutotagError {
    // Version errors
    #[error("Not a release version: {input}")]
    #[diagnostic(
        code(autotag::version::parse_failed),
        help("Versions are one to three dot-separated numbers, e.g. 6.2 or 6.2.1")
    )]
    VersionParseFailed { input: String },

    // Namespace / repository errors
    #[error("Could not find organization or user: {name}")]
    #[diagnostic(
        code(autotag::namespace::unknown),
        help("Check the remote table in the manifest and the --org fallback")
    )]
    UnknownNamespace { name: String },

    #[error("Could not find repository: {path}")]
    #[diagnostic(code(autotag::repo::not_found))]
    RepoNotFound { path: String },

    // Tag listing errors
    #[error("Failed to list tags for {url}: {reason}")]
    #[diagnostic(
        code(autotag::tags::listing_failed),
        help("Check that the repository URL is correct and reachable")
    )]
    TagListingFailed { url: String, reason: String },

    // Host API errors
    #[error("GitHub API request failed: {status} {message}")]
    #[diagnostic(code(autotag::api::request_failed))]
    ApiRequestFailed { status: u16, message: String },

    #[error("GitHub API transport error: {reason}")]
    #[diagnostic(code(autotag::api::transport))]
    ApiTransport { reason: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(autotag::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Failed to fetch from remote: {reason}")]
    #[diagnostic(code(autotag::git::fetch_failed))]
    GitFetchFailed { reason: String },

    #[error("Failed to push branch '{branch}': {reason}")]
    #[diagnostic(
        code(autotag::git::push_failed),
        help("Check that the bot token has push access to the fork")
    )]
    GitPushFailed { branch: String, reason: String },

    // Manifest errors
    #[error("Manifest file not found: {path}")]
    #[diagnostic(code(autotag::manifest::not_found))]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest: {path}")]
    #[diagnostic(code(autotag::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Invalid manifest: {message}")]
    #[diagnostic(code(autotag::manifest::invalid))]
    ManifestInvalid { message: String },

    #[error("Missing token: {which}")]
    #[diagnostic(
        code(autotag::auth::missing_token),
        help("Supply the token on the command line or through its environment variable")
    )]
    MissingToken { which: String },

    // IO and prompt errors
    #[error("IO error: {message}")]
    #[diagnostic(code(autotag::io::error))]
    IoError { message: String },

    #[error("Failed to read confirmation: {reason}")]
    #[diagnostic(code(autotag::prompt::failed))]
    PromptFailed { reason: String },
}

impl From<std::io::Error> for AutotagError {
    fn from(err: std::io::Error) -> Self {
        AutotagError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AutotagError {
    fn from(err: serde_yaml::Error) -> Self {
        AutotagError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AutotagError {
    fn from(err: serde_json::Error) -> Self {
        AutotagError::ApiTransport {
            reason: format!("invalid response body: {err}"),
        }
    }
}

impl From<git2::Error> for AutotagError {
    fn from(err: git2::Error) -> Self {
        AutotagError::GitOperationFailed {
            message: err.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for AutotagError {
    fn from(err: reqwest::Error) -> Self {
        AutotagError::ApiTransport {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AutotagError>;
