use thiserror::Error;

use crate::submission::Violation;

/// Failure talking to the data store or object storage
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("{operation} returned {status}: {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },
    #[error("could not decode {operation} response: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
}

/// One of the dependent writes made by a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStep {
    Listing,
    Images,
    Countries,
}

impl std::fmt::Display for WriteStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let step = match self {
            WriteStep::Listing => "listing",
            WriteStep::Images => "listing images",
            WriteStep::Countries => "listing countries",
        };
        f.write_str(step)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(#[from] Violation),
    #[error("failed to upload {file}: {source}")]
    Upload {
        file: String,
        #[source]
        source: StoreError,
    },
    #[error("failed to write {step}: {source}")]
    Write {
        step: WriteStep,
        #[source]
        source: StoreError,
    },
}

impl SubmitError {
    /// Message safe to show to the person posting the listing
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(violation) => violation.to_string(),
            SubmitError::Upload { .. } | SubmitError::Write { .. } => {
                "Failed to create listing".to_string()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
