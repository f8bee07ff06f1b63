//! Infrastructure implementations for VisionChat.
//!
//! Concrete adapters for the ports defined in `visionchat-core`: the Gemini
//! multimodal provider, the TOML configuration loader and the local
//! filesystem video reader.

pub mod config;
pub mod filesystem;
pub mod llm;
