//! Shared domain types for VisionChat.
//!
//! This crate contains the request/response contract of the two video
//! operations (summarize, chat), the data URI type used to carry video
//! inline, chat transcript messages, LLM request/response shapes,
//! configuration and the error enums shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, schemars, base64, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod schema;
