//! Backend Worker Thread Implementation
//!
//! This module contains the worker loop that runs in a separate thread and
//! handles every backend request. It communicates with the UI thread through
//! crossbeam channels.
//!
//! # Responsibilities
//!
//! - **Command processing**: Responds to UI commands (fetch, download, shutdown)
//! - **Request isolation**: Each HTTP operation runs on its own short-lived
//!   thread so a slow download never delays a chart reload
//! - **In-flight guards**: At most one fetch and one download at a time
//! - **Discarding results**: When the UI is gone, results are dropped

use crate::backend::client::DashboardApi;
use crate::backend::download::save_download;
use crate::backend::{BackendCommand, BackendMessage, RequestId};
use crate::config::DownloadConfig;
use crate::error::PassdownError;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How long the loop waits for a command before re-checking `running`
const COMMAND_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Clears an in-flight flag when the request thread finishes, even on panic
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The backend worker that processes UI commands
pub struct BackendWorker {
    /// Backend API
    api: Arc<dyn DashboardApi>,
    /// Where downloads are written
    downloads: DownloadConfig,
    /// Receiver for commands from the UI
    command_receiver: Receiver<BackendCommand>,
    /// Sender for messages to the UI
    message_sender: Sender<BackendMessage>,
    /// Running flag
    running: Arc<AtomicBool>,
    /// A repeatability fetch is in progress
    fetch_in_flight: Arc<AtomicBool>,
    /// A download is in progress
    download_in_flight: Arc<AtomicBool>,
}

impl BackendWorker {
    /// Create a new worker
    pub fn new(
        api: Arc<dyn DashboardApi>,
        downloads: DownloadConfig,
        command_receiver: Receiver<BackendCommand>,
        message_sender: Sender<BackendMessage>,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            api,
            downloads,
            command_receiver,
            message_sender,
            running,
            fetch_in_flight: Arc::new(AtomicBool::new(false)),
            download_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run the command loop until shutdown or until the UI disconnects
    pub fn run(&mut self) {
        tracing::info!("Backend worker started");

        while self.running.load(Ordering::SeqCst) {
            match self.command_receiver.recv_timeout(COMMAND_POLL_INTERVAL) {
                Ok(cmd) => self.handle_command(cmd),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::info!("Command channel closed, stopping backend worker");
                    break;
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        let _ = self.message_sender.send(BackendMessage::Shutdown);
        tracing::info!("Backend worker stopped");
    }

    /// Handle a single command
    pub fn handle_command(&mut self, cmd: BackendCommand) {
        match cmd {
            BackendCommand::FetchRepeatability { request_id } => self.start_fetch(request_id),
            BackendCommand::Download { filename } => self.start_download(filename),
            BackendCommand::Shutdown => {
                tracing::info!("Shutdown requested");
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    /// Whether a fetch is currently running
    pub fn is_fetching(&self) -> bool {
        self.fetch_in_flight.load(Ordering::SeqCst)
    }

    /// Whether a download is currently running
    pub fn is_downloading(&self) -> bool {
        self.download_in_flight.load(Ordering::SeqCst)
    }

    fn start_fetch(&self, request_id: RequestId) {
        if self.fetch_in_flight.swap(true, Ordering::SeqCst) {
            tracing::warn!("Ignoring fetch {:?}: another fetch is in flight", request_id);
            send_or_discard(
                &self.message_sender,
                BackendMessage::RepeatabilityFailed {
                    request_id,
                    error: PassdownError::Busy("Repeatability fetch".to_string()).to_string(),
                },
            );
            return;
        }

        let guard = InFlightGuard(self.fetch_in_flight.clone());
        let api = self.api.clone();
        let sender = self.message_sender.clone();

        let spawned = std::thread::Builder::new()
            .name("fetch-repeatability".to_string())
            .spawn(move || {
                let message = match api.fetch_repeatability() {
                    Ok(dataset) => {
                        tracing::info!(
                            "Fetched repeatability data: {} rows, {} parameters",
                            dataset.len(),
                            dataset.parameters.len()
                        );
                        BackendMessage::RepeatabilityLoaded {
                            request_id,
                            dataset,
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to fetch repeatability data: {}", e);
                        BackendMessage::RepeatabilityFailed {
                            request_id,
                            error: e.to_string(),
                        }
                    }
                };
                // Released before the result is visible, so a reload right after it is accepted
                drop(guard);
                send_or_discard(&sender, message);
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn fetch thread: {}", e);
            send_or_discard(
                &self.message_sender,
                BackendMessage::RepeatabilityFailed {
                    request_id,
                    error: e.to_string(),
                },
            );
        }
    }

    fn start_download(&self, filename: String) {
        if self.download_in_flight.swap(true, Ordering::SeqCst) {
            tracing::warn!("Ignoring download of {}: another download is in flight", filename);
            send_or_discard(
                &self.message_sender,
                BackendMessage::DownloadFailed {
                    filename,
                    error: PassdownError::Busy("Download".to_string()).to_string(),
                },
            );
            return;
        }

        let guard = InFlightGuard(self.download_in_flight.clone());
        let api = self.api.clone();
        let downloads = self.downloads.clone();
        let sender = self.message_sender.clone();
        let thread_filename = filename.clone();

        let spawned = std::thread::Builder::new()
            .name("download".to_string())
            .spawn(move || {
                let filename = thread_filename;
                let result = api.download_file(&filename).and_then(|bytes| {
                    let dir = downloads.target_dir()?;
                    let path = save_download(&dir, &filename, &bytes)?;
                    Ok((path, bytes.len() as u64))
                });

                let message = match result {
                    Ok((path, size)) => BackendMessage::DownloadComplete {
                        filename,
                        path,
                        size,
                    },
                    Err(e) => {
                        tracing::warn!("Download of {} failed: {}", filename, e);
                        BackendMessage::DownloadFailed {
                            filename,
                            error: e.to_string(),
                        }
                    }
                };
                drop(guard);
                send_or_discard(&sender, message);
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn download thread: {}", e);
            send_or_discard(
                &self.message_sender,
                BackendMessage::DownloadFailed {
                    filename,
                    error: e.to_string(),
                },
            );
        }
    }
}

/// Send a message to the UI; a closed channel means the UI is gone
fn send_or_discard(sender: &Sender<BackendMessage>, message: BackendMessage) {
    if sender.send(message).is_err() {
        tracing::debug!("UI channel closed, discarding backend result");
    }
}
