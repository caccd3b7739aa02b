//! `docqa` — question answering over a directory of text files.
//!
//! Two subcommands:
//!
//! - `docqa ingest --dir ./news_articles` — chunk, embed, and index every
//!   `.txt` file into the vector store snapshot.
//! - `docqa ask "tell me about the writers strike"` — retrieve the most
//!   relevant chunks and ask the chat model, printing the answer.
//!
//! The chat model (and the optional Hugging Face embedder) needs a token
//! in `HF_API_KEY`. The default Ollama embedder talks to a local server
//! and needs none.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use docqa_model::{ChatModel, HfChatModel, Message};
use docqa_rag::{
    EmbedErrorPolicy, EmbeddingProvider, FileVectorStore, FixedSizeChunker, HfEmbeddingProvider,
    OllamaEmbeddingProvider, PromptBuilder, RagConfig, RagPipeline,
};

/// Name of the environment variable holding the Hugging Face token.
const HF_API_KEY_VAR: &str = "HF_API_KEY";

#[derive(Parser)]
#[command(name = "docqa", version, about = "Question answering over a local text corpus")]
struct Cli {
    /// Path of the vector store snapshot.
    #[arg(long, global = true, default_value = "docqa_index.json")]
    store: PathBuf,

    /// Which embedding backend to use.
    #[arg(long, global = true, value_enum, default_value_t = Embedder::Ollama)]
    embedder: Embedder,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Embedder {
    /// Local Ollama server (`nomic-embed-text`), no token required.
    Ollama,
    /// Hugging Face Inference API (`all-MiniLM-L6-v2`), needs HF_API_KEY.
    Hf,
}

#[derive(Subcommand)]
enum Command {
    /// Chunk, embed, and index every `.txt` file in a directory.
    Ingest {
        /// Directory containing the source `.txt` files.
        #[arg(long)]
        dir: PathBuf,

        /// Maximum chunk size in bytes.
        #[arg(long, default_value_t = 1000)]
        chunk_size: usize,

        /// Overlap between consecutive chunks in bytes.
        #[arg(long, default_value_t = 20)]
        chunk_overlap: usize,

        /// Log and skip chunks that fail to embed instead of aborting.
        #[arg(long)]
        skip_failed_chunks: bool,
    },

    /// Retrieve relevant chunks and ask the chat model a question.
    Ask {
        /// The question to answer.
        question: String,

        /// How many chunks to retrieve as context.
        #[arg(long, default_value_t = 2)]
        top_k: usize,

        /// Sentence cap the model is asked to respect.
        #[arg(long, default_value_t = 3)]
        max_sentences: usize,

        /// Chat model name on the Hugging Face router.
        #[arg(long, default_value = docqa_model::hf::DEFAULT_MODEL)]
        model: String,
    },
}

/// Read the Hugging Face token, failing with a clear message if unset.
fn hf_api_key() -> anyhow::Result<String> {
    match std::env::var(HF_API_KEY_VAR) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => bail!("{HF_API_KEY_VAR} is not set; export a Hugging Face access token first"),
    }
}

fn build_embedder(embedder: Embedder) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    match embedder {
        Embedder::Ollama => Ok(Arc::new(
            OllamaEmbeddingProvider::new().context("failed to set up the Ollama embedder")?,
        )),
        Embedder::Hf => Ok(Arc::new(
            HfEmbeddingProvider::new(hf_api_key()?)
                .context("failed to set up the Hugging Face embedder")?,
        )),
    }
}

async fn build_pipeline(cli: &Cli, config: RagConfig) -> anyhow::Result<RagPipeline> {
    let store = FileVectorStore::open(&cli.store)
        .await
        .with_context(|| format!("failed to open vector store at {}", cli.store.display()))?;

    let chunker = FixedSizeChunker::new(config.chunk_size, config.chunk_overlap)?;

    Ok(RagPipeline::builder()
        .config(config)
        .embedding_provider(build_embedder(cli.embedder)?)
        .vector_store(Arc::new(store))
        .chunker(Arc::new(chunker))
        .build()?)
}

async fn run_ingest(
    cli: &Cli,
    dir: &PathBuf,
    chunk_size: usize,
    chunk_overlap: usize,
    skip_failed_chunks: bool,
) -> anyhow::Result<()> {
    if !dir.is_dir() {
        bail!("source directory {} does not exist", dir.display());
    }

    let policy =
        if skip_failed_chunks { EmbedErrorPolicy::SkipChunk } else { EmbedErrorPolicy::Abort };
    let config = RagConfig::builder()
        .chunk_size(chunk_size)
        .chunk_overlap(chunk_overlap)
        .embed_error_policy(policy)
        .build()?;

    let pipeline = build_pipeline(cli, config).await?;
    let report =
        pipeline.ingest_directory(dir).await.context("ingestion failed")?;

    println!(
        "Ingested {} document(s): {} chunk(s) stored, {} skipped.",
        report.documents, report.chunks_ingested, report.chunks_skipped
    );
    Ok(())
}

async fn run_ask(
    cli: &Cli,
    question: &str,
    top_k: usize,
    max_sentences: usize,
    model: &str,
) -> anyhow::Result<()> {
    // Fail on a missing credential before touching the store.
    let api_key = hf_api_key()?;

    let config = RagConfig::builder().top_k(top_k).build()?;
    let pipeline = build_pipeline(cli, config).await?;

    let context_chunks =
        pipeline.retrieve(question, top_k).await.context("retrieval failed")?;
    if context_chunks.is_empty() {
        tracing::warn!("no stored chunks matched; answering without context");
    }

    let prompt = PromptBuilder::new().with_max_sentences(max_sentences).build(question, &context_chunks);

    let chat = HfChatModel::new(api_key)
        .context("failed to set up the chat model")?
        .with_model(model);
    let messages = [Message::system(prompt), Message::user(question)];
    let answer = chat.complete(&messages).await.context("completion failed")?;

    println!("{answer}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Ingest { dir, chunk_size, chunk_overlap, skip_failed_chunks } => {
            run_ingest(&cli, dir, *chunk_size, *chunk_overlap, *skip_failed_chunks).await
        }
        Command::Ask { question, top_k, max_sentences, model } => {
            run_ask(&cli, question, *top_k, *max_sentences, model).await
        }
    }
}
