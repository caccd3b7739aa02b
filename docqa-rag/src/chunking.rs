//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`FixedSizeChunker`],
//! which splits by character count with configurable overlap. Chunk IDs
//! are generated as `{document_id}_chunk{n}` with a 1-based index.

use crate::document::{Chunk, Document};
use crate::error::{RagError, Result};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text but no embeddings.
/// Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text.
    /// Each returned chunk has an empty embedding vector.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text into fixed-size windows by byte count with configurable overlap.
///
/// Window boundaries are clamped to `char` boundaries so slicing never
/// panics on multi-byte UTF-8; a chunk may therefore come out a few bytes
/// short of `chunk_size` on non-ASCII text.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(1000, 20)?;
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of bytes per chunk
    /// * `chunk_overlap` — number of overlapping bytes between consecutive chunks
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Chunking`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size` — either would prevent the split
    /// loop from making forward progress.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::Chunking("chunk_size must be greater than zero".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagError::Chunking(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }
}

/// Largest char boundary at or below `index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Smallest char boundary strictly above `index`.
fn next_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index + 1;
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index.min(text.len())
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        let text = &document.text;
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut chunk_index = 0;

        while start < text.len() {
            let mut end = floor_char_boundary(text, start.saturating_add(self.chunk_size));
            if end <= start {
                // chunk_size is smaller than the next char; take it whole
                end = next_char_boundary(text, start);
            }

            chunk_index += 1;
            chunks.push(Chunk {
                id: format!("{}_chunk{chunk_index}", document.id),
                text: text[start..end].to_string(),
                embedding: Vec::new(),
                document_id: document.id.clone(),
            });

            let step = self.chunk_size - self.chunk_overlap;
            let next = floor_char_boundary(text, start.saturating_add(step));
            // Snapping down must not stall the cursor on multi-byte text.
            start = if next > start { next } else { end };
        }

        chunks
    }
}
