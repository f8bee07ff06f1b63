//! HTTP API layer for VisionChat.
//!
//! Axum router exposing `POST /api/infer` (multipart video + prompt, plain
//! text answer) and `GET /health`, with CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod router;
