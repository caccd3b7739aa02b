//! Property tests for the fixed-size chunker.

use docqa_rag::chunking::Chunker;
use docqa_rag::document::Document;
use docqa_rag::FixedSizeChunker;
use proptest::prelude::*;

/// Valid (chunk_size, chunk_overlap) pairs: size > 0, overlap < size.
fn arb_params() -> impl Strategy<Value = (usize, usize)> {
    (1usize..200).prop_flat_map(|size| (Just(size), 0usize..size))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Concatenating the first chunk with each later chunk's
    /// non-overlapping tail reconstructs the input exactly (ASCII input,
    /// so byte offsets and char offsets coincide).
    #[test]
    fn chunks_round_trip_to_original_text(
        text in "[ -~]{0,500}",
        (size, overlap) in arb_params(),
    ) {
        let chunker = FixedSizeChunker::new(size, overlap).unwrap();
        let chunks = chunker.chunk(&Document::new("t.txt", text.clone()));

        let mut rebuilt = String::new();
        for chunk in &chunks {
            let skip = overlap.min(chunk.text.len());
            if rebuilt.is_empty() {
                rebuilt.push_str(&chunk.text);
            } else {
                rebuilt.push_str(&chunk.text[skip..]);
            }
        }
        prop_assert_eq!(rebuilt, text);
    }

    /// Every chunk is non-empty and at most `chunk_size` bytes.
    #[test]
    fn chunk_lengths_are_bounded(
        text in "\\PC{0,300}",
        (size, overlap) in arb_params(),
    ) {
        let chunker = FixedSizeChunker::new(size, overlap).unwrap();
        for chunk in chunker.chunk(&Document::new("t.txt", text)) {
            prop_assert!(!chunk.text.is_empty());
            // A single char wider than chunk_size is taken whole.
            prop_assert!(chunk.text.len() <= size.max(4));
        }
    }

    /// Text no longer than `chunk_size` comes back as exactly one chunk.
    #[test]
    fn short_text_is_a_single_chunk(
        text in "[ -~]{1,50}",
        overlap in 0usize..50,
    ) {
        let size = text.len().max(overlap + 1);
        let chunker = FixedSizeChunker::new(size, overlap).unwrap();
        let chunks = chunker.chunk(&Document::new("t.txt", text.clone()));
        prop_assert_eq!(chunks.len(), 1);
        prop_assert_eq!(&chunks[0].text, &text);
    }

    /// Chunk ids are unique within a document.
    #[test]
    fn chunk_ids_are_unique(
        text in "[a-z]{0,400}",
        (size, overlap) in arb_params(),
    ) {
        let chunker = FixedSizeChunker::new(size, overlap).unwrap();
        let chunks = chunker.chunk(&Document::new("t.txt", text));
        let ids: std::collections::HashSet<&str> =
            chunks.iter().map(|c| c.id.as_str()).collect();
        prop_assert_eq!(ids.len(), chunks.len());
    }
}
