//! The chat-completion seam.

use async_trait::async_trait;

use crate::error::Result;
use crate::message::Message;

/// A hosted chat model reachable through a single request/response call.
///
/// Implementations send the full message list and return the generated
/// text of the first choice. No streaming, no conversation state.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// A short name identifying the backing model.
    fn name(&self) -> &str;

    /// Send `messages` to the model and return the generated text.
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}
