//! Data types for documents, chunks, and search results.

use serde::{Deserialize, Serialize};

/// A source document containing text content.
///
/// Documents are created by the [loader](crate::loader) — one per `.txt`
/// file, with the file name as the ID — and are immutable for the
/// duration of an ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document (the source file name).
    pub id: String,
    /// The text content of the document.
    pub text: String,
}

impl Document {
    /// Create a document from an ID and its text content.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// A segment of a [`Document`] with its vector embedding.
///
/// Chunk IDs take the form `{document_id}_chunk{n}` with `n` 1-based,
/// which makes them unique across an ingestion run. The embedding is
/// empty until the pipeline attaches one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text.
    pub embedding: Vec<f32>,
    /// The ID of the parent [`Document`].
    pub document_id: String,
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}
