//! RAG pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the full ingest-and-retrieve workflow
//! by composing an [`EmbeddingProvider`], a [`VectorStore`], and a
//! [`Chunker`].
//!
//! # Example
//!
//! ```rust,ignore
//! use docqa_rag::{RagPipeline, RagConfig, InMemoryVectorStore, FixedSizeChunker};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .chunker(Arc::new(FixedSizeChunker::new(1000, 20)?))
//!     .build()?;
//!
//! pipeline.ingest_directory("./news_articles").await?;
//! let context = pipeline.retrieve("what happened?", 2).await?;
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::chunking::Chunker;
use crate::config::{EmbedErrorPolicy, RagConfig};
use crate::document::{Document, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::loader::load_directory;
use crate::vectorstore::VectorStore;

/// Summary of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Number of documents processed.
    pub documents: usize,
    /// Number of chunks embedded and stored.
    pub chunks_ingested: usize,
    /// Number of chunks skipped under [`EmbedErrorPolicy::SkipChunk`].
    pub chunks_skipped: usize,
}

/// The RAG pipeline orchestrator.
///
/// Coordinates document ingestion (chunk → embed → upsert, one chunk at
/// a time so no chunk is stored before its own embedding exists) and
/// retrieval (embed the question → similarity search). Construct one via
/// [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the vector store.
    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }

    /// Ingest a single document: chunk, then embed and upsert each chunk.
    ///
    /// Upsert replaces by chunk ID, so re-ingesting the same document is
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Under the default [`EmbedErrorPolicy::Abort`], the first chunk
    /// whose embedding or upsert fails aborts the run with
    /// [`RagError::Ingestion`] naming that chunk. Under
    /// [`EmbedErrorPolicy::SkipChunk`] the failure is logged and the
    /// remaining chunks proceed.
    pub async fn ingest_document(&self, document: &Document) -> Result<IngestReport> {
        let chunks = self.chunker.chunk(document);
        if chunks.is_empty() {
            info!(document.id = %document.id, chunk_count = 0, "ingested document (empty)");
            return Ok(IngestReport { documents: 1, ..Default::default() });
        }

        let mut report = IngestReport { documents: 1, ..Default::default() };
        for mut chunk in chunks {
            let embedded = match self.embedding_provider.embed(&chunk.text).await {
                Ok(embedding) => {
                    chunk.embedding = embedding;
                    self.vector_store.upsert(std::slice::from_ref(&chunk)).await
                }
                Err(e) => Err(e),
            };

            match embedded {
                Ok(()) => {
                    debug!(chunk.id = %chunk.id, "stored chunk");
                    report.chunks_ingested += 1;
                }
                Err(e) => match self.config.embed_error_policy {
                    EmbedErrorPolicy::Abort => {
                        error!(chunk.id = %chunk.id, error = %e, "ingestion failed");
                        return Err(RagError::Ingestion {
                            chunk_id: chunk.id,
                            message: e.to_string(),
                        });
                    }
                    EmbedErrorPolicy::SkipChunk => {
                        warn!(chunk.id = %chunk.id, error = %e, "skipping failed chunk");
                        report.chunks_skipped += 1;
                    }
                },
            }
        }

        info!(
            document.id = %document.id,
            chunks_ingested = report.chunks_ingested,
            chunks_skipped = report.chunks_skipped,
            "ingested document"
        );
        Ok(report)
    }

    /// Ingest a batch of documents, accumulating one [`IngestReport`].
    pub async fn ingest_documents(&self, documents: &[Document]) -> Result<IngestReport> {
        let mut total = IngestReport::default();
        for document in documents {
            let report = self.ingest_document(document).await?;
            total.documents += report.documents;
            total.chunks_ingested += report.chunks_ingested;
            total.chunks_skipped += report.chunks_skipped;
        }
        Ok(total)
    }

    /// Load every `.txt` file under `path` and ingest it.
    ///
    /// An empty directory completes with an all-zero report and touches
    /// neither the embedding provider nor the store.
    pub async fn ingest_directory(&self, path: impl AsRef<Path>) -> Result<IngestReport> {
        let documents = load_directory(path).await?;
        self.ingest_documents(&documents).await
    }

    /// Query the store: embed the question, then similarity-search.
    ///
    /// Returns up to `config.top_k` results ordered by descending score.
    /// An empty store yields an empty result list, not an error.
    pub async fn query(&self, question: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedding_provider.embed(question).await.map_err(|e| {
            error!(error = %e, "embedding failed during query");
            RagError::Pipeline(format!("query embedding failed: {e}"))
        })?;

        let results =
            self.vector_store.search(&query_embedding, self.config.top_k).await.map_err(|e| {
                error!(error = %e, "vector store search failed");
                RagError::Pipeline(format!("search failed: {e}"))
            })?;

        info!(result_count = results.len(), "query completed");
        Ok(results)
    }

    /// Retrieve the texts of the `k` chunks most relevant to `question`,
    /// closest match first.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<String>> {
        let query_embedding = self.embedding_provider.embed(question).await.map_err(|e| {
            error!(error = %e, "embedding failed during retrieval");
            RagError::Pipeline(format!("query embedding failed: {e}"))
        })?;

        let results = self.vector_store.search(&query_embedding, k).await.map_err(|e| {
            error!(error = %e, "vector store search failed");
            RagError::Pipeline(format!("search failed: {e}"))
        })?;

        Ok(results.into_iter().map(|r| r.chunk.text).collect())
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// All fields are required. Call [`build()`](RagPipelineBuilder::build)
/// to validate and produce the pipeline.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`RagPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::Config("embedding_provider is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::Config("vector_store is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::Config("chunker is required".to_string()))?;

        Ok(RagPipeline { config, embedding_provider, vector_store, chunker })
    }
}
