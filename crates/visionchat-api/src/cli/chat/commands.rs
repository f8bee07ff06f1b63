//! Slash command parsing for the chat loop.

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    /// Print the video summary again.
    Summary,
    /// Print the transcript so far.
    History,
    /// Select and process another video.
    Open(String),
    Clear,
    Exit,
    Unknown(String),
}

/// Parse input as a slash command. `None` when it is a question.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(' ') {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/summary" | "/s" => Some(ChatCommand::Summary),
        "/history" => Some(ChatCommand::History),
        "/open" | "/o" => {
            if arg.is_empty() {
                Some(ChatCommand::Unknown("/open requires a path".to_string()))
            } else {
                Some(ChatCommand::Open(arg.to_string()))
            }
        }
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}         {}", style("/help").cyan(), "Show this help message");
    println!("  {}      {}", style("/summary").cyan(), "Show the video summary");
    println!("  {}      {}", style("/history").cyan(), "Show the conversation so far");
    println!("  {} {}", style("/open <path>").cyan(), "Analyze a different video");
    println!("  {}        {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}         {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!("  {}", style("Anything else is asked about the current video.").dim());
    println!();
}
