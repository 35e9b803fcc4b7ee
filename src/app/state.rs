use crate::upload::{SelectedFile, UploadError, UploadOutcome, UploadSession};
use std::sync::mpsc::Receiver;
use tracing::{error, info, warn};

pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one file to upload.";

pub type UploadResult = Result<String, UploadError>;
pub type DeleteResult = (String, Result<(), UploadError>);

pub enum SessionsUpdate {
    List(Result<Vec<UploadSession>, UploadError>),
    Detail(String, Result<UploadSession, UploadError>),
}

#[derive(Default)]
pub struct UploadState {
    pub selected_files: Vec<SelectedFile>,
    pub is_uploading: bool,
    pub error_message: Option<String>,
    pub outcome: Option<UploadOutcome>,
    pub deleting_file: Option<String>,
    pub delete_error: Option<String>,
    pub sessions: Vec<UploadSession>,
    pub sessions_loading: bool,
    pub sessions_error: Option<String>,
    pub keep_selection_on_invalid_response: bool,
    pub upload_receiver: Option<Receiver<UploadResult>>,
    pub delete_receiver: Option<Receiver<DeleteResult>>,
    pub sessions_receiver: Option<Receiver<SessionsUpdate>>,
}

impl UploadState {
    pub fn new(keep_selection_on_invalid_response: bool) -> Self {
        Self {
            keep_selection_on_invalid_response,
            ..Self::default()
        }
    }

    /// Replaces the whole selection and drops any previous feedback.
    pub fn set_selection(&mut self, files: Vec<SelectedFile>) {
        info!("Selected {} file(s)", files.len());
        self.selected_files = files;
        self.error_message = None;
        self.outcome = None;
        self.reset_delete();
    }

    pub fn remove_at(&mut self, index: usize) {
        if index < self.selected_files.len() {
            let removed = self.selected_files.remove(index);
            info!("Removed {} from selection", removed.name);
        }
    }

    pub fn clear(&mut self) {
        self.selected_files.clear();
        self.outcome = None;
        self.error_message = None;
        self.reset_delete();
    }

    pub fn can_submit(&self) -> bool {
        !self.selected_files.is_empty() && !self.is_uploading
    }

    /// Marks the state busy and returns the files to send, or records the
    /// validation error when nothing is selected.
    pub fn begin_submit(&mut self) -> Option<Vec<SelectedFile>> {
        if self.is_uploading {
            return None;
        }

        if self.selected_files.is_empty() {
            self.error_message = Some(EMPTY_SELECTION_MESSAGE.to_string());
            return None;
        }

        self.is_uploading = true;
        self.error_message = None;
        Some(self.selected_files.clone())
    }

    pub fn finish_submit(&mut self, result: UploadResult) {
        self.is_uploading = false;
        self.upload_receiver = None;

        match result.and_then(|text| UploadOutcome::parse(&text)) {
            Ok(outcome) => {
                info!(
                    "Upload session {} finished: {}/{} succeeded",
                    outcome.session_id, outcome.success_count, outcome.total_files
                );
                self.outcome = Some(outcome);
                self.selected_files.clear();
                self.reset_delete();
            }
            Err(e) if e.is_transport() => {
                // The request did not complete, so the selection stays for another try.
                error!("Upload failed: {}", e);
                self.error_message = Some(format!("Upload failed: {}", e));
            }
            Err(e) => {
                error!("Could not parse upload response: {:?}", e);
                self.error_message = Some(format!("Upload failed: {}", e));
                // The server accepted the request, so the selection is treated as
                // submitted unless configured otherwise.
                if !self.keep_selection_on_invalid_response {
                    self.selected_files.clear();
                }
            }
        }
    }

    pub fn can_delete(&self) -> bool {
        self.deleting_file.is_none() && !self.is_uploading
    }

    pub fn begin_delete(&mut self, file_id: &str) -> bool {
        if !self.can_delete() {
            return false;
        }
        self.deleting_file = Some(file_id.to_string());
        self.delete_error = None;
        true
    }

    pub fn finish_delete(&mut self, file_id: &str, result: Result<(), UploadError>) {
        if self.deleting_file.as_deref() != Some(file_id) {
            info!("Ignoring delete result for {} from a previous outcome", file_id);
            return;
        }
        self.deleting_file = None;
        self.delete_receiver = None;

        match result {
            Ok(()) => {
                let Some(outcome) = &mut self.outcome else {
                    return;
                };
                let before = outcome.uploaded_files.len();
                outcome.uploaded_files.retain(|file| file.id != file_id);
                if outcome.uploaded_files.len() < before {
                    // Deleted files no longer count towards the submission.
                    outcome.success_count = outcome.success_count.saturating_sub(1);
                    outcome.total_files = outcome.total_files.saturating_sub(1);
                }
            }
            Err(e) => {
                warn!("Delete of {} failed: {}", file_id, e);
                self.delete_error = Some(format!("Delete failed: {}", e));
            }
        }
    }

    fn reset_delete(&mut self) {
        self.deleting_file = None;
        self.delete_receiver = None;
        self.delete_error = None;
    }

    pub fn begin_load_sessions(&mut self) -> bool {
        if self.sessions_loading {
            return false;
        }
        self.sessions_loading = true;
        self.sessions_error = None;
        true
    }

    pub fn finish_load_sessions(&mut self, update: SessionsUpdate) {
        self.sessions_loading = false;
        self.sessions_receiver = None;

        match update {
            SessionsUpdate::List(Ok(sessions)) => {
                info!("Loaded {} upload session(s)", sessions.len());
                self.sessions = sessions;
            }
            SessionsUpdate::Detail(session_id, Ok(session)) => {
                match self.sessions.iter_mut().find(|s| s.id == session_id) {
                    Some(existing) => *existing = session,
                    None => self.sessions.insert(0, session),
                }
            }
            SessionsUpdate::List(Err(e)) | SessionsUpdate::Detail(_, Err(e)) => {
                warn!("Loading upload sessions failed: {}", e);
                self.sessions_error = Some(format!("Could not load uploads: {}", e));
            }
        }
    }
}
