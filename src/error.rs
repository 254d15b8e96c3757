use crate::domain::validation::ValidationErrors;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Validation error: {} field(s) rejected", .0.len())]
    Validation(ValidationErrors),
    #[error("Missing configuration: {0} is not set")]
    MissingConfig(&'static str),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Upstream HTTP error: {0}")]
    UpstreamHttp(#[source] reqwest::Error),
    #[error("Corrupt message store at {}: {source}", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported message store version {version} at {}", .path.display())]
    UnsupportedStoreVersion { path: PathBuf, version: u32 },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse classification used to pick a response status and a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Upstream,
    Storage,
}

impl PortfolioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortfolioError::Validation(_) => ErrorCategory::Validation,
            PortfolioError::MissingConfig(_) => ErrorCategory::Configuration,
            PortfolioError::Upstream(_) | PortfolioError::UpstreamHttp(_) => {
                ErrorCategory::Upstream
            }
            PortfolioError::CorruptStore { .. }
            | PortfolioError::UnsupportedStoreVersion { .. }
            | PortfolioError::IoError(_)
            | PortfolioError::InternalError(_) => ErrorCategory::Storage,
        }
    }
}

// Request URLs carry credentials in their query string, so they are dropped.
impl From<reqwest::Error> for PortfolioError {
    fn from(err: reqwest::Error) -> Self {
        PortfolioError::UpstreamHttp(err.without_url())
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
