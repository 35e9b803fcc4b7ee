mod state;
mod ui;
mod view;

use crate::config::Config;
use crate::upload::{SelectedFile, UploadClient, UploadError};
use eframe::{egui, App};
use state::SessionsUpdate;
pub use state::UploadState;
use std::future::Future;
use std::path::PathBuf;
use std::sync::mpsc::{self as std_mpsc, Sender, TryRecvError};
use tracing::{error, info, warn};

pub struct FileUploader {
    client: UploadClient,
    state: UploadState,
}

impl FileUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &Config) -> Self {
        info!("Initializing file uploader against {}", config.api_base);
        Self {
            client: UploadClient::new(config.api_base.clone()),
            state: UploadState::new(config.keep_selection_on_invalid_response),
        }
    }

    pub fn select_paths(&mut self, paths: Vec<PathBuf>) {
        let files = paths
            .iter()
            .filter_map(|path| match SelectedFile::from_path(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    None
                }
            })
            .collect();
        self.state.set_selection(files);
    }

    pub fn pick_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new().pick_files() {
            self.select_paths(paths);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.state.is_uploading {
            return;
        }

        let paths: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });

        if !paths.is_empty() {
            self.select_paths(paths);
        }
    }

    pub fn start_upload(&mut self, ctx: &egui::Context) {
        let Some(files) = self.state.begin_submit() else {
            return;
        };

        info!("Starting upload of {} file(s)", files.len());
        let (sender, receiver) = std_mpsc::channel();
        self.state.upload_receiver = Some(receiver);

        let client = self.client.clone();
        spawn_worker(ctx.clone(), sender, async move {
            client.upload(&files).await
        });
    }

    pub fn start_delete(&mut self, ctx: &egui::Context, file_id: String) {
        if !self.state.begin_delete(&file_id) {
            return;
        }

        let (sender, receiver) = std_mpsc::channel();
        self.state.delete_receiver = Some(receiver);

        let client = self.client.clone();
        spawn_worker(ctx.clone(), sender, async move {
            let result = client.delete_file(&file_id).await;
            (file_id, result)
        });
    }

    pub fn refresh_sessions(&mut self, ctx: &egui::Context) {
        if !self.state.begin_load_sessions() {
            return;
        }

        let (sender, receiver) = std_mpsc::channel();
        self.state.sessions_receiver = Some(receiver);

        let client = self.client.clone();
        spawn_worker(ctx.clone(), sender, async move {
            SessionsUpdate::List(client.list_sessions().await)
        });
    }

    pub fn refresh_session(&mut self, ctx: &egui::Context, session_id: String) {
        if !self.state.begin_load_sessions() {
            return;
        }

        let (sender, receiver) = std_mpsc::channel();
        self.state.sessions_receiver = Some(receiver);

        let client = self.client.clone();
        spawn_worker(ctx.clone(), sender, async move {
            let result = client.get_session(&session_id).await;
            SessionsUpdate::Detail(session_id, result)
        });
    }

    pub fn update_state(&mut self) {
        if let Some(receiver) = &self.state.upload_receiver {
            match receiver.try_recv() {
                Ok(result) => self.state.finish_submit(result),
                Err(TryRecvError::Disconnected) => {
                    self.state.finish_submit(Err(UploadError::WorkerStopped))
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        if let Some(receiver) = &self.state.delete_receiver {
            match receiver.try_recv() {
                Ok((file_id, result)) => self.state.finish_delete(&file_id, result),
                Err(TryRecvError::Disconnected) => {
                    let file_id = self.state.deleting_file.clone().unwrap_or_default();
                    self.state
                        .finish_delete(&file_id, Err(UploadError::WorkerStopped));
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        if let Some(receiver) = &self.state.sessions_receiver {
            match receiver.try_recv() {
                Ok(update) => self.state.finish_load_sessions(update),
                Err(TryRecvError::Disconnected) => self
                    .state
                    .finish_load_sessions(SessionsUpdate::List(Err(UploadError::WorkerStopped))),
                Err(TryRecvError::Empty) => {}
            }
        }
    }
}

/// Runs `task` on its own thread and runtime, reporting the output through
/// `sender` and waking the UI afterwards.
fn spawn_worker<T, F>(ctx: egui::Context, sender: Sender<T>, task: F)
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    std::thread::spawn(move || {
        match tokio::runtime::Runtime::new() {
            Ok(rt) => {
                let output = rt.block_on(task);
                let _ = sender.send(output);
            }
            // Dropping the sender reports the worker as stopped.
            Err(e) => error!("{}", UploadError::Runtime(e)),
        }
        ctx.request_repaint();
    });
}

impl App for FileUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state();
        self.handle_dropped_files(ctx);
        self.render(ctx);
    }
}
