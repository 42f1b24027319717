//! Mock construction helpers

use crossbeam_channel::{bounded, Receiver, Sender};
use passdown_vis::backend::DashboardApi;
use passdown_vis::error::{PassdownError, Result};
use passdown_vis::types::RepeatabilityDataset;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Create test channels with default size
pub fn create_test_channels<T, U>() -> (Sender<T>, Receiver<T>, Sender<U>, Receiver<U>) {
    let (tx1, rx1) = bounded(16);
    let (tx2, rx2) = bounded(16);
    (tx1, rx1, tx2, rx2)
}

/// In-memory [`DashboardApi`] with canned responses
pub struct FakeApi {
    dataset: Mutex<Option<RepeatabilityDataset>>,
    files: HashMap<String, Vec<u8>>,
    fetch_calls: AtomicUsize,
}

impl FakeApi {
    /// API whose fetch returns `dataset`
    pub fn with_dataset(dataset: RepeatabilityDataset) -> Self {
        Self {
            dataset: Mutex::new(Some(dataset)),
            files: HashMap::new(),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// API whose fetch always fails
    pub fn failing() -> Self {
        Self {
            dataset: Mutex::new(None),
            files: HashMap::new(),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// Serve `bytes` for `filename`
    pub fn with_file(mut self, filename: &str, bytes: &[u8]) -> Self {
        self.files.insert(filename.to_string(), bytes.to_vec());
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl DashboardApi for FakeApi {
    fn fetch_repeatability(&self) -> Result<RepeatabilityDataset> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.dataset
            .lock()
            .map_err(|_| PassdownError::Api("poisoned".to_string()))?
            .clone()
            .ok_or_else(|| PassdownError::Api("backend unavailable".to_string()))
    }

    fn download_file(&self, filename: &str) -> Result<Vec<u8>> {
        self.files.get(filename).cloned().ok_or_else(|| PassdownError::Status {
            status: 404,
            message: format!("File not found: {}", filename),
        })
    }
}
