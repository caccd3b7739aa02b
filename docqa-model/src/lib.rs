//! # docqa-model
//!
//! Hosted chat-completion gateway for docqa.
//!
//! ## Overview
//!
//! This crate provides the [`ChatModel`] seam and two implementations:
//!
//! - [`HfChatModel`] — the Hugging Face Inference router's
//!   OpenAI-compatible chat-completions API
//! - [`MockChatModel`] — canned responses for tests and offline demos
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docqa_model::{ChatModel, HfChatModel, Message};
//!
//! let model = HfChatModel::new(std::env::var("HF_API_KEY")?)?;
//! let answer = model
//!     .complete(&[Message::system(prompt), Message::user(question)])
//!     .await?;
//! println!("{answer}");
//! ```

pub mod chat;
pub mod error;
pub mod hf;
pub mod message;
pub mod mock;

pub use chat::ChatModel;
pub use error::{ModelError, Result};
pub use hf::HfChatModel;
pub use message::{Message, Role};
pub use mock::MockChatModel;
