//! Client-side chat: the transcript and the per-video session.

pub mod session;
pub mod transcript;
