//! Interactive terminal chat about a video.
//!
//! Processes the selected video behind a spinner, prints its summary, then
//! answers questions in a readline loop with slash commands.
//! Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
