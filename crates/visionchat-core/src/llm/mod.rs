//! Multimodal provider abstractions.
//!
//! - `MultimodalProvider`: RPITIT trait for concrete provider implementations
//! - `BoxMultimodalProvider`: object-safe wrapper for runtime selection

pub mod box_provider;
pub mod provider;
