//! Mock chat model for tests and offline demos.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::chat::ChatModel;
use crate::error::Result;
use crate::message::Message;

/// A [`ChatModel`] that returns a canned response and records the
/// messages it was called with.
#[derive(Debug)]
pub struct MockChatModel {
    response: String,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockChatModel {
    /// Create a mock that always answers with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self { response: response.into(), requests: Mutex::new(Vec::new()) }
    }

    /// Return every message list this mock has been called with.
    pub async fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, messages: &[Message]) -> Result<String> {
        self.requests.lock().await.push(messages.to_vec());
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_requests_and_returns_canned_answer() {
        let mock = MockChatModel::new("the answer");
        let answer = mock.complete(&[Message::user("q")]).await.unwrap();
        assert_eq!(answer, "the answer");

        let requests = mock.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0][0].content, "q");
    }
}
