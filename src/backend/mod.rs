//! Backend module for talking to the passdown HTTP API
//!
//! All network and disk access happens off the UI thread. The UI sends
//! commands over a crossbeam channel and picks up results once per frame.
//!
//! # Architecture
//!
//! - [`BackendCommand`] - Messages sent from UI to backend (fetch, download, shutdown)
//! - [`BackendMessage`] - Messages sent from backend to UI (datasets, saved files, errors)
//! - [`FrontendReceiver`] - UI-side handle for sending commands and receiving messages
//! - [`DashboardBackend`] - Main backend entry point that owns the worker
//!
//! # Components
//!
//! - [`DashboardApi`] / [`HttpApiClient`] - HTTP requests against the backend
//! - [`BackendWorker`] - Command loop with one in-flight guard per operation
//! - [`save_download`] - Writes downloaded bytes without overwriting files
//!
//! # Example
//!
//! ```ignore
//! use passdown_vis::backend::{DashboardBackend, RequestId};
//! use passdown_vis::config::AppConfig;
//!
//! let (backend, frontend) = DashboardBackend::new(AppConfig::default())?;
//! std::thread::spawn(move || backend.run());
//!
//! frontend.fetch_repeatability(RequestId(1));
//! for msg in frontend.drain() {
//!     // Handle results
//! }
//! ```

pub mod client;
pub mod download;
pub mod worker;

pub use client::{parse_download_error, parse_repeatability_response, DashboardApi, HttpApiClient};
pub use download::{candidate_name, create_unique, sanitize_filename, save_download};
pub use worker::BackendWorker;

use crate::config::{AppConfig, DownloadConfig};
use crate::error::Result;
use crate::types::RepeatabilityDataset;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Identifies one repeatability fetch so late results can be recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl RequestId {
    /// The id that follows this one
    pub fn next(self) -> Self {
        RequestId(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Message sent from the UI to the backend
#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Fetch the repeatability dataset
    FetchRepeatability {
        /// Id echoed back in the result
        request_id: RequestId,
    },
    /// Download a file and save it locally
    Download {
        /// File name as known to the backend
        filename: String,
    },
    /// Shutdown the backend
    Shutdown,
}

/// Message sent from the backend to the UI
#[derive(Debug, Clone)]
pub enum BackendMessage {
    /// Repeatability data arrived
    RepeatabilityLoaded {
        request_id: RequestId,
        dataset: RepeatabilityDataset,
    },
    /// Repeatability fetch failed or returned nothing usable
    RepeatabilityFailed { request_id: RequestId, error: String },
    /// A file was downloaded and written to disk
    DownloadComplete {
        filename: String,
        path: PathBuf,
        size: u64,
    },
    /// A download failed
    DownloadFailed { filename: String, error: String },
    /// Backend is shutting down
    Shutdown,
}

/// Frontend receiver for backend messages
pub struct FrontendReceiver {
    /// Receiver for backend messages
    pub receiver: Receiver<BackendMessage>,
    /// Sender for commands to the backend
    pub command_sender: Sender<BackendCommand>,
}

impl FrontendReceiver {
    /// Try to receive a message without blocking
    pub fn try_recv(&self) -> Option<BackendMessage> {
        self.receiver.try_recv().ok()
    }

    /// Receive all pending messages
    pub fn drain(&self) -> Vec<BackendMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.receiver.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Send a command to the backend
    pub fn send_command(&self, cmd: BackendCommand) -> bool {
        self.command_sender.send(cmd).is_ok()
    }

    /// Request the repeatability dataset
    pub fn fetch_repeatability(&self, request_id: RequestId) -> bool {
        self.send_command(BackendCommand::FetchRepeatability { request_id })
    }

    /// Request a file download
    pub fn download(&self, filename: impl Into<String>) -> bool {
        self.send_command(BackendCommand::Download {
            filename: filename.into(),
        })
    }

    /// Request shutdown
    pub fn shutdown(&self) {
        let _ = self.command_sender.send(BackendCommand::Shutdown);
    }
}

/// The dashboard backend that runs in a separate thread
pub struct DashboardBackend {
    api: Arc<dyn DashboardApi>,
    downloads: DownloadConfig,
    command_receiver: Receiver<BackendCommand>,
    message_sender: Sender<BackendMessage>,
    running: Arc<AtomicBool>,
}

impl DashboardBackend {
    /// Create a backend using the HTTP client from `config`
    pub fn new(config: AppConfig) -> Result<(Self, FrontendReceiver)> {
        let api = HttpApiClient::new(config.api.clone())?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    /// Create a backend around any [`DashboardApi`] implementation
    pub fn with_api(config: AppConfig, api: Arc<dyn DashboardApi>) -> (Self, FrontendReceiver) {
        let (cmd_tx, cmd_rx) = bounded(64);
        let (msg_tx, msg_rx) = bounded(256);

        let backend = Self {
            api,
            downloads: config.downloads,
            command_receiver: cmd_rx,
            message_sender: msg_tx,
            running: Arc::new(AtomicBool::new(true)),
        };

        let frontend = FrontendReceiver {
            receiver: msg_rx,
            command_sender: cmd_tx,
        };

        (backend, frontend)
    }

    /// Run the backend loop
    pub fn run(self) {
        let mut worker = BackendWorker::new(
            self.api,
            self.downloads,
            self.command_receiver,
            self.message_sender,
            self.running,
        );
        worker.run();
    }

    /// Get a handle to stop the backend
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_backend_creation() {
        let (backend, frontend) = DashboardBackend::new(AppConfig::default()).unwrap();

        assert!(backend.stop_handle().load(Ordering::SeqCst));
        assert!(frontend.send_command(BackendCommand::Shutdown));
    }

    #[test]
    fn test_frontend_receiver_commands() {
        let (backend, frontend) = DashboardBackend::new(AppConfig::default()).unwrap();

        assert!(frontend.fetch_repeatability(RequestId(1)));
        assert!(frontend.download("BaseLine.xlsx"));
        frontend.shutdown();

        let received: Vec<_> = backend.command_receiver.try_iter().collect();
        assert_eq!(received.len(), 3);
        assert!(matches!(
            received[0],
            BackendCommand::FetchRepeatability {
                request_id: RequestId(1)
            }
        ));
        assert!(matches!(received[2], BackendCommand::Shutdown));
    }

    #[test]
    fn test_commands_fail_after_backend_dropped() {
        let (backend, frontend) = DashboardBackend::new(AppConfig::default()).unwrap();
        drop(backend);
        assert!(!frontend.fetch_repeatability(RequestId(1)));
        assert!(frontend.drain().is_empty());
    }

    #[test]
    fn test_request_id_sequence() {
        let id = RequestId(41);
        assert_eq!(id.next(), RequestId(42));
        assert_eq!(RequestId(u64::MAX).next(), RequestId(0));
        assert_eq!(id.to_string(), "#41");
    }
}
