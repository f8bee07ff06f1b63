//! Business logic for VisionChat.
//!
//! - [`llm`]: the multimodal provider port and its boxed wrapper
//! - [`video`]: prompt templates and the two model operations
//! - [`actions`]: the in-process backend actions the client calls
//! - [`chat`]: transcript and the per-video client session
//! - [`media`]: the port used to read a selected video

pub mod actions;
pub mod chat;
pub mod llm;
pub mod media;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;
