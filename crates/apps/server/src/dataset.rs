//! One-shot boundary dataset loading with an explicit state.
//!
//! The handle starts in `Loading`, moves to `Ready` or `Failed` exactly
//! once, and never changes after. Handlers clone the `Arc<CarbonLookup>`
//! out of the lock and compute without holding it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use formats::{load_lookup_from_slice, BoundarySchema, CarbonLookup, FeatureCollectionError};
use parking_lot::RwLock;
use tracing::{error, info, warn};

use crate::config::DataLocation;

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<CarbonLookup>),
    Failed(String),
}

impl LoadState {
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "unavailable",
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    Http(String),
    Status(u16),
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(FeatureCollectionError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Http(msg) => write!(f, "dataset request failed: {msg}"),
            LoadError::Status(code) => write!(f, "dataset request returned HTTP {code}"),
            LoadError::Io { path, source } => write!(f, "failed to read {path}: {source}"),
            LoadError::Parse(err) => write!(f, "invalid boundary dataset: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FeatureCollectionError> for LoadError {
    fn from(err: FeatureCollectionError) -> Self {
        LoadError::Parse(err)
    }
}

#[derive(Debug)]
pub struct DatasetHandle {
    state: RwLock<LoadState>,
    started: AtomicBool,
}

impl Default for DatasetHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetHandle {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LoadState::Loading),
            started: AtomicBool::new(false),
        }
    }

    /// A handle that is already `Ready`.
    pub fn ready(lookup: CarbonLookup) -> Self {
        Self {
            state: RwLock::new(LoadState::Ready(Arc::new(lookup))),
            started: AtomicBool::new(true),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state.read().clone()
    }

    pub fn lookup(&self) -> Option<Arc<CarbonLookup>> {
        match &*self.state.read() {
            LoadState::Ready(lookup) => Some(lookup.clone()),
            _ => None,
        }
    }

    /// Fetches and parses the dataset, then settles the state.
    ///
    /// Only the first call does any work; later calls return immediately.
    pub async fn load_once(
        &self,
        client: &reqwest::Client,
        location: &DataLocation,
        schema: &BoundarySchema,
    ) {
        if self.started.swap(true, Ordering::AcqRel) {
            warn!(%location, "dataset load already started, ignoring");
            return;
        }

        let result = match fetch_bytes(client, location).await {
            Ok(bytes) => load_lookup_from_slice(&bytes, schema).map_err(LoadError::from),
            Err(err) => Err(err),
        };
        self.settle(location, result);
    }

    fn settle(&self, location: &DataLocation, result: Result<CarbonLookup, LoadError>) {
        let mut state = self.state.write();
        if !matches!(*state, LoadState::Loading) {
            return;
        }
        *state = match result {
            Ok(lookup) => {
                info!(
                    %location,
                    regions = lookup.len(),
                    skipped = lookup.skipped(),
                    "boundary dataset loaded"
                );
                LoadState::Ready(Arc::new(lookup))
            }
            Err(err) => {
                error!(%location, "boundary dataset unavailable: {err}");
                LoadState::Failed(err.to_string())
            }
        };
    }
}

pub async fn fetch_bytes(
    client: &reqwest::Client,
    location: &DataLocation,
) -> Result<Vec<u8>, LoadError> {
    match location {
        DataLocation::Url(url) => {
            let resp = client
                .get(url)
                .send()
                .await
                .map_err(|e| LoadError::Http(e.to_string()))?;
            if !resp.status().is_success() {
                return Err(LoadError::Status(resp.status().as_u16()));
            }
            let bytes = resp
                .bytes()
                .await
                .map_err(|e| LoadError::Http(e.to_string()))?;
            Ok(bytes.to_vec())
        }
        DataLocation::File(path) => tokio::fs::read(path).await.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DATASET: &str = include_str!("../../../../data/admin_boundaries.geojson");

    fn temp_dataset(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn starts_loading() {
        let handle = DatasetHandle::new();
        assert_eq!(handle.state().label(), "loading");
        assert!(handle.lookup().is_none());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let file = temp_dataset(DATASET);
        let handle = DatasetHandle::new();
        let location = DataLocation::File(file.path().to_path_buf());
        handle
            .load_once(&reqwest::Client::new(), &location, &BoundarySchema::default())
            .await;

        assert_eq!(handle.state().label(), "ready");
        let lookup = handle.lookup().unwrap();
        assert_eq!(lookup.len(), 5);
        assert_eq!(lookup.skipped(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let handle = DatasetHandle::new();
        let location = DataLocation::File("/nonexistent/admin.geojson".into());
        handle
            .load_once(&reqwest::Client::new(), &location, &BoundarySchema::default())
            .await;

        match handle.state() {
            LoadState::Failed(msg) => assert!(msg.contains("/nonexistent/admin.geojson")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_unavailable() {
        let file = temp_dataset(r#"{"type":"Feature"}"#);
        let handle = DatasetHandle::new();
        let location = DataLocation::File(file.path().to_path_buf());
        handle
            .load_once(&reqwest::Client::new(), &location, &BoundarySchema::default())
            .await;
        assert_eq!(handle.state().label(), "unavailable");
    }

    #[tokio::test]
    async fn second_load_is_ignored() {
        let good = temp_dataset(DATASET);
        let client = reqwest::Client::new();
        let schema = BoundarySchema::default();
        let handle = DatasetHandle::new();

        handle
            .load_once(&client, &DataLocation::File("/nonexistent".into()), &schema)
            .await;
        handle
            .load_once(&client, &DataLocation::File(good.path().to_path_buf()), &schema)
            .await;

        assert_eq!(handle.state().label(), "unavailable");
    }
}
