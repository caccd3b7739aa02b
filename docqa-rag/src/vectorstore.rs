//! Vector store trait for storing and searching vector embeddings.

use async_trait::async_trait;

use crate::document::{Chunk, SearchResult};
use crate::error::Result;

/// A storage backend for vector embeddings with similarity search.
///
/// Each store holds a single collection of [`Chunk`]s keyed by chunk ID.
/// Upsert replaces any existing entry with the same ID, so re-running an
/// ingestion over the same documents leaves exactly one entry per chunk
/// and never duplicates.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::{VectorStore, InMemoryVectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.upsert(&chunks).await?;
/// let results = store.search(&query_embedding, 2).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert or replace chunks by ID. Chunks must have embeddings set,
    /// all of the same dimensionality as any chunks already stored.
    async fn upsert(&self, chunks: &[Chunk]) -> Result<()>;

    /// Delete chunks by their IDs. Unknown IDs are ignored.
    async fn delete(&self, ids: &[&str]) -> Result<()>;

    /// Search for the `top_k` most similar chunks to the given embedding.
    ///
    /// Returns results ordered by descending similarity score; fewer than
    /// `top_k` results (or none) when the store holds fewer entries.
    /// A non-empty store rejects a query embedding whose dimensionality
    /// differs from the stored chunks'.
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;

    /// Return the number of stored chunks.
    async fn count(&self) -> Result<usize>;
}
