//! File-backed vector store.
//!
//! [`FileVectorStore`] keeps the same in-memory index as
//! [`InMemoryVectorStore`](crate::inmemory::InMemoryVectorStore) but
//! snapshots it to a JSON file after every mutation, so an index built by
//! `docqa ingest` survives to a later `docqa ask` invocation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::inmemory::{StoreState, search_state, upsert_into};
use crate::vectorstore::VectorStore;

/// On-disk snapshot of the store contents.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    dimensions: Option<usize>,
    chunks: Vec<Chunk>,
}

/// A vector store persisted as a JSON snapshot at a configurable path.
///
/// The whole index is held in memory; every `upsert` or `delete` rewrites
/// the snapshot. Suitable for the document volumes this tool targets
/// (directories of small text files), not for large indexes.
#[derive(Debug)]
pub struct FileVectorStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl FileVectorStore {
    /// Open a store at `path`, loading the existing snapshot if present.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::VectorStore`] if an existing snapshot cannot be
    /// read or parsed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: Snapshot =
                    serde_json::from_slice(&bytes).map_err(|e| RagError::VectorStore {
                        backend: "File".into(),
                        message: format!("corrupt snapshot at {}: {e}", path.display()),
                    })?;
                let chunks =
                    snapshot.chunks.into_iter().map(|c| (c.id.clone(), c)).collect();
                StoreState { chunks, dimensions: snapshot.dimensions }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreState::default(),
            Err(e) => {
                return Err(RagError::VectorStore {
                    backend: "File".into(),
                    message: format!("cannot read snapshot at {}: {e}", path.display()),
                });
            }
        };

        info!(path = %path.display(), chunk_count = state.chunks.len(), "opened file store");
        Ok(Self { path, state: RwLock::new(state) })
    }

    /// Serialize `state` and rewrite the snapshot file.
    async fn flush(&self, state: &StoreState) -> Result<()> {
        let snapshot = Snapshot {
            dimensions: state.dimensions,
            chunks: state.chunks.values().cloned().collect(),
        };
        let bytes = serde_json::to_vec(&snapshot).map_err(|e| RagError::VectorStore {
            backend: "File".into(),
            message: format!("failed to serialize snapshot: {e}"),
        })?;

        tokio::fs::write(&self.path, bytes).await.map_err(|e| RagError::VectorStore {
            backend: "File".into(),
            message: format!("failed to write snapshot at {}: {e}", self.path.display()),
        })
    }
}

#[async_trait]
impl VectorStore for FileVectorStore {
    async fn upsert(&self, chunks: &[Chunk]) -> Result<()> {
        let mut state = self.state.write().await;
        upsert_into(&mut state, chunks, "File")?;
        self.flush(&state).await
    }

    async fn delete(&self, ids: &[&str]) -> Result<()> {
        let mut state = self.state.write().await;
        for id in ids {
            state.chunks.remove(*id);
        }
        self.flush(&state).await
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let state = self.state.read().await;
        search_state(&state, embedding, top_k, "File")
    }

    async fn count(&self) -> Result<usize> {
        let state = self.state.read().await;
        Ok(state.chunks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, embedding: Vec<f32>) -> Chunk {
        Chunk {
            id: id.to_string(),
            text: format!("text for {id}"),
            embedding,
            document_id: "doc".to_string(),
        }
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");

        {
            let store = FileVectorStore::open(&path).await.unwrap();
            store.upsert(&[chunk("a", vec![1.0, 0.0]), chunk("b", vec![0.0, 1.0])]).await.unwrap();
        }

        let store = FileVectorStore::open(&path).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
        let results = store.search(&[1.0, 0.0], 1).await.unwrap();
        assert_eq!(results[0].chunk.id, "a");
    }

    #[tokio::test]
    async fn reopened_store_keeps_rejecting_mismatched_queries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");

        {
            let store = FileVectorStore::open(&path).await.unwrap();
            store.upsert(&[chunk("a", vec![1.0, 0.0])]).await.unwrap();
        }

        // Dimensionality is part of the snapshot, so a query embedded at
        // a different width fails even across a reopen.
        let store = FileVectorStore::open(&path).await.unwrap();
        let err = store.search(&[1.0, 0.0, 0.0], 1).await.unwrap_err();
        assert!(matches!(err, RagError::VectorStore { .. }));
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVectorStore::open(dir.path().join("none.json")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileVectorStore::open(&path).await.unwrap_err();
        assert!(matches!(err, RagError::VectorStore { .. }));
    }

    #[tokio::test]
    async fn delete_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");

        {
            let store = FileVectorStore::open(&path).await.unwrap();
            store.upsert(&[chunk("a", vec![1.0]), chunk("b", vec![2.0])]).await.unwrap();
            store.delete(&["a"]).await.unwrap();
        }

        let store = FileVectorStore::open(&path).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
