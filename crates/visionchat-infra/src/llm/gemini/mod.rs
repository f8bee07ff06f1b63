//! Google Gemini multimodal provider.
//!
//! [`GeminiProvider`] implements the
//! [`MultimodalProvider`](visionchat_core::llm::provider::MultimodalProvider)
//! trait over the `generateContent` REST endpoint, sending video inline.

pub mod client;
pub mod types;

pub use client::GeminiProvider;
