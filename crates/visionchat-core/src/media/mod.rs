//! Access to the video files a client session selects.

pub mod reader;
