use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error! status: {}", .0.as_u16())]
    Status(StatusCode),

    #[error("Failed to start upload runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Upload worker stopped before reporting a result")]
    WorkerStopped,

    #[error("Invalid server response")]
    InvalidResponse(#[source] serde_json::Error),
}

impl UploadError {
    /// True when the request never completed, as opposed to completing with
    /// a body we could not understand.
    pub fn is_transport(&self) -> bool {
        !matches!(self, UploadError::InvalidResponse(_))
    }
}
