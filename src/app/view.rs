use super::UploadState;
use crate::upload::{SelectedFile, UploadSession, UploadedFile};
use crate::utils::file_size::format_size;

/// What the feedback region shows for a given state.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    None,
    Error(String),
    Outcome(OutcomeView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeView {
    pub session_id: String,
    pub summary: String,
    pub failed_warning: Option<String>,
    pub rows: Vec<FileRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileRow {
    pub id: String,
    pub name: String,
    pub details: String,
    pub status: String,
    pub url: String,
}

impl Feedback {
    pub fn from_state(state: &UploadState) -> Self {
        if let Some(error) = &state.error_message {
            return Feedback::Error(error.clone());
        }

        let Some(outcome) = &state.outcome else {
            return Feedback::None;
        };

        let failed_warning = (outcome.failed_files > 0)
            .then(|| format!("Failed Files: {}", outcome.failed_files));

        let rows = outcome.uploaded_files.iter().map(FileRow::from).collect();

        Feedback::Outcome(OutcomeView {
            session_id: outcome.session_id.clone(),
            summary: format!("{} of {}", outcome.success_count, outcome.total_files),
            failed_warning,
            rows,
        })
    }
}

impl From<&UploadedFile> for FileRow {
    fn from(file: &UploadedFile) -> Self {
        FileRow {
            id: file.id.clone(),
            name: file.original_name.clone(),
            details: format!("{} • {}", format_size(file.file_size), file.content_type),
            status: file.upload_status.clone(),
            url: file.s3_url.clone(),
        }
    }
}

/// One entry of the recent uploads list.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub total_size: String,
    pub rows: Vec<FileRow>,
}

impl From<&UploadSession> for SessionView {
    fn from(session: &UploadSession) -> Self {
        let total_size = session.files.iter().map(|file| file.file_size).sum();
        SessionView {
            id: session.id.clone(),
            title: format!("{} • {}", session.created_at, session.status),
            summary: format!(
                "{} of {} completed",
                session.completed_files, session.total_files
            ),
            total_size: format_size(total_size),
            rows: session.files.iter().map(FileRow::from).collect(),
        }
    }
}

pub fn session_views(state: &UploadState) -> Vec<SessionView> {
    state.sessions.iter().map(SessionView::from).collect()
}

/// Secondary line under a pending file's name.
pub fn selected_file_details(file: &SelectedFile) -> String {
    format!(
        "{} • {}",
        format_size(file.size),
        file.content_type.as_deref().unwrap_or("Unknown type")
    )
}
