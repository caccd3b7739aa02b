//! End-to-end question-answering flow: ingest → retrieve → prompt → complete.
//!
//! Uses the file-backed store, a deterministic embedder, and the mock chat
//! model, so the whole flow runs offline.

use std::sync::Arc;

use docqa_model::{ChatModel, Message, MockChatModel, Role};
use docqa_rag::{
    EmbeddingProvider, FileVectorStore, FixedSizeChunker, PromptBuilder, RagConfig, RagPipeline,
};

struct MockEmbeddingProvider;

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; 16];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        Ok(emb)
    }

    fn dimensions(&self) -> usize {
        16
    }
}

fn pipeline_with_store(store: FileVectorStore) -> RagPipeline {
    let config = RagConfig::default();
    RagPipeline::builder()
        .config(config.clone())
        .embedding_provider(Arc::new(MockEmbeddingProvider))
        .vector_store(Arc::new(store))
        .chunker(Arc::new(FixedSizeChunker::new(config.chunk_size, config.chunk_overlap).unwrap()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn answer_flow_sends_context_and_question() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("articles");
    std::fs::create_dir(&corpus).unwrap();
    std::fs::write(corpus.join("strike.txt"), "Writers went on strike over AI contracts.")
        .unwrap();
    let store_path = dir.path().join("index.json");

    // Ingest in one process...
    {
        let store = FileVectorStore::open(&store_path).await.unwrap();
        let pipeline = pipeline_with_store(store);
        let report = pipeline.ingest_directory(&corpus).await.unwrap();
        assert_eq!(report.chunks_ingested, 1);
    }

    // ...then answer from the snapshot in another.
    let store = FileVectorStore::open(&store_path).await.unwrap();
    let pipeline = pipeline_with_store(store);

    let question = "tell me about the writers strike";
    let context = pipeline.retrieve(question, 2).await.unwrap();
    assert_eq!(context.len(), 1);

    let prompt = PromptBuilder::new().build(question, &context);
    let chat = MockChatModel::new("They struck over AI.");
    let answer =
        chat.complete(&[Message::system(prompt), Message::user(question)]).await.unwrap();
    assert_eq!(answer, "They struck over AI.");

    let requests = chat.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0][0].role, Role::System);
    assert!(requests[0][0].content.contains("Writers went on strike"));
    assert_eq!(requests[0][1], Message::user(question));
}

#[tokio::test]
async fn empty_store_still_yields_well_formed_request() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileVectorStore::open(dir.path().join("index.json")).await.unwrap();
    let pipeline = pipeline_with_store(store);

    let question = "anything?";
    let context = pipeline.retrieve(question, 2).await.unwrap();
    assert!(context.is_empty());

    let prompt = PromptBuilder::new().build(question, &context);
    let chat = MockChatModel::new("I don't know.");
    chat.complete(&[Message::system(prompt), Message::user(question)]).await.unwrap();

    let requests = chat.requests().await;
    assert!(requests[0][0].content.contains("Context:\n\n"));
    assert!(requests[0][0].content.contains("Question:\nanything?"));
}
