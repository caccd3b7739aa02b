//! # docqa-rag
//!
//! Document chunking, embedding, and retrieval pipeline for docqa.
//!
//! ## Overview
//!
//! This crate implements the retrieval half of a RAG system:
//!
//! - [`loader`] — read a directory of `.txt` files into [`Document`]s
//! - [`chunking`] — split documents into overlapping [`Chunk`]s
//! - [`embedding`] — the [`EmbeddingProvider`] seam, with
//!   [`OllamaEmbeddingProvider`] and [`HfEmbeddingProvider`] backends
//! - [`vectorstore`] — the [`VectorStore`] seam, with
//!   [`InMemoryVectorStore`] and [`FileVectorStore`] backends
//! - [`pipeline`] — [`RagPipeline`], which wires the above together
//! - [`prompt`] — [`PromptBuilder`], which turns retrieved chunks and a
//!   question into the instruction handed to the chat model
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docqa_rag::{FixedSizeChunker, InMemoryVectorStore, RagConfig, RagPipeline};
//! use docqa_rag::ollama::OllamaEmbeddingProvider;
//!
//! let config = RagConfig::default(); // chunk_size 1000, overlap 20, top_k 2
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedding_provider(Arc::new(OllamaEmbeddingProvider::new()?))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .chunker(Arc::new(FixedSizeChunker::new(config.chunk_size, config.chunk_overlap)?))
//!     .build()?;
//!
//! pipeline.ingest_directory("./news_articles").await?;
//! let context = pipeline.retrieve("tell me about the writers strike", 2).await?;
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod filestore;
pub mod hf;
pub mod inmemory;
pub mod loader;
pub mod ollama;
pub mod pipeline;
pub mod prompt;
pub mod vectorstore;

pub use chunking::{Chunker, FixedSizeChunker};
pub use config::{EmbedErrorPolicy, RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use filestore::FileVectorStore;
pub use hf::HfEmbeddingProvider;
pub use inmemory::InMemoryVectorStore;
pub use loader::load_directory;
pub use ollama::OllamaEmbeddingProvider;
pub use pipeline::{IngestReport, RagPipeline, RagPipelineBuilder};
pub use prompt::PromptBuilder;
pub use vectorstore::VectorStore;
