use super::UploadError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A local file waiting to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let metadata = std::fs::metadata(path).map_err(|source| UploadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let content_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            content_type,
        })
    }
}

/// Body of a completed upload, as returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadOutcome {
    pub session_id: String,
    pub uploaded_files: Vec<UploadedFile>,
    pub failed_files: u64,
    pub total_files: u64,
    pub success_count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub original_name: String,
    pub file_size: u64,
    pub content_type: String,
    pub s3_url: String,
    pub upload_status: String,
    pub error_message: Option<String>,
    pub created_at: String,
}

impl UploadOutcome {
    pub fn parse(text: &str) -> Result<Self, UploadError> {
        serde_json::from_str(text).map_err(UploadError::InvalidResponse)
    }
}

/// A stored upload session with every file it recorded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadSession {
    pub id: String,
    pub created_at: String,
    pub total_files: u64,
    pub completed_files: u64,
    pub status: String,
    pub files: Vec<UploadedFile>,
}
