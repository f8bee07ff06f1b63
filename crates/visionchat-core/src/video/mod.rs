//! Model operations over a whole video.

pub mod assistant;
pub mod prompt;
