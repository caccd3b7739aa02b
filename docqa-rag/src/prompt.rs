//! Prompt assembly for question answering over retrieved context.

/// Builds the instruction prompt handed to the chat model.
///
/// The instruction tells the model to answer only from the supplied
/// context, to say it does not know when the context is insufficient,
/// and to keep the answer within a configurable number of sentences.
/// Downstream answer quality depends on these instruction semantics, so
/// treat them as part of the contract with the completion gateway.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    max_sentences: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self { max_sentences: 3 }
    }
}

impl PromptBuilder {
    /// Create a builder with the default three-sentence answer cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of sentences the model is asked to produce.
    pub fn with_max_sentences(mut self, max_sentences: usize) -> Self {
        self.max_sentences = max_sentences;
        self
    }

    /// Assemble the instruction prompt from a question and retrieved chunks.
    ///
    /// Chunks are joined with a blank line to form the context block. An
    /// empty chunk list yields an empty context block but still a
    /// well-formed prompt.
    pub fn build(&self, question: &str, context_chunks: &[String]) -> String {
        let context = context_chunks.join("\n\n");
        format!(
            "You are an assistant for question-answering tasks. Use the following pieces of \
             retrieved context to answer the question. If you don't know the answer, say that you \
             don't know. Use {} sentences maximum and keep the answer concise.\
             \n\nContext:\n{context}\n\nQuestion:\n{question}",
            self.max_sentences
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_chunks_with_blank_lines() {
        let prompt = PromptBuilder::new()
            .build("what?", &["first chunk".to_string(), "second chunk".to_string()]);
        assert!(prompt.contains("first chunk\n\nsecond chunk"));
        assert!(prompt.ends_with("Question:\nwhat?"));
    }

    #[test]
    fn empty_context_still_produces_well_formed_prompt() {
        let prompt = PromptBuilder::new().build("what?", &[]);
        assert!(prompt.contains("Context:\n\n"));
        assert!(prompt.contains("Question:\nwhat?"));
    }

    #[test]
    fn sentence_cap_is_configurable() {
        let prompt = PromptBuilder::new().with_max_sentences(5).build("q", &[]);
        assert!(prompt.contains("Use 5 sentences maximum"));
    }
}
