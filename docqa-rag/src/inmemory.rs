//! In-memory vector store using cosine similarity.
//!
//! This module provides [`InMemoryVectorStore`], a vector store backed by
//! a `HashMap` protected by a `tokio::sync::RwLock`. It is suitable for
//! development, testing, and single-run use where the index need not
//! outlive the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Chunk map plus the embedding dimensionality locked in by the first upsert.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) chunks: HashMap<String, Chunk>,
    pub(crate) dimensions: Option<usize>,
}

/// An in-memory vector store using cosine similarity for search.
///
/// All operations are async-safe via `tokio::sync::RwLock`. The first
/// upsert fixes the embedding dimensionality; later upserts with a
/// different dimensionality are rejected.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    state: RwLock<StoreState>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude or the lengths differ.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Validate and insert chunks into `state`, enforcing one dimensionality
/// across the whole store. Shared by the in-memory and file backends.
pub(crate) fn upsert_into(state: &mut StoreState, chunks: &[Chunk], backend: &str) -> Result<()> {
    for chunk in chunks {
        if chunk.embedding.is_empty() {
            return Err(RagError::VectorStore {
                backend: backend.to_string(),
                message: format!("chunk '{}' has no embedding", chunk.id),
            });
        }
        match state.dimensions {
            None => state.dimensions = Some(chunk.embedding.len()),
            Some(dims) if dims != chunk.embedding.len() => {
                return Err(RagError::VectorStore {
                    backend: backend.to_string(),
                    message: format!(
                        "chunk '{}' has dimensionality {} but the store holds {dims}",
                        chunk.id,
                        chunk.embedding.len()
                    ),
                });
            }
            Some(_) => {}
        }
        state.chunks.insert(chunk.id.clone(), chunk.clone());
    }
    Ok(())
}

/// Score every stored chunk against `embedding` and keep the best `top_k`.
///
/// A query embedding whose dimensionality differs from the one locked in
/// at upsert is rejected; it would score 0 against every chunk and
/// return arbitrary results. An empty store accepts any query and
/// returns nothing.
pub(crate) fn search_state(
    state: &StoreState,
    embedding: &[f32],
    top_k: usize,
    backend: &str,
) -> Result<Vec<SearchResult>> {
    if let Some(dims) = state.dimensions {
        if dims != embedding.len() {
            return Err(RagError::VectorStore {
                backend: backend.to_string(),
                message: format!(
                    "query has dimensionality {} but the store holds {dims}",
                    embedding.len()
                ),
            });
        }
    }

    let mut scored: Vec<SearchResult> = state
        .chunks
        .values()
        .map(|chunk| {
            let score = cosine_similarity(&chunk.embedding, embedding);
            SearchResult { chunk: chunk.clone(), score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    Ok(scored)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(&self, chunks: &[Chunk]) -> Result<()> {
        let mut state = self.state.write().await;
        upsert_into(&mut state, chunks, "InMemory")
    }

    async fn delete(&self, ids: &[&str]) -> Result<()> {
        let mut state = self.state.write().await;
        for id in ids {
            state.chunks.remove(*id);
        }
        Ok(())
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let state = self.state.read().await;
        search_state(&state, embedding, top_k, "InMemory")
    }

    async fn count(&self) -> Result<usize> {
        let state = self.state.read().await;
        Ok(state.chunks.len())
    }
}
