//! Welcome banner for a chat session.

use console::style;

/// Print the banner shown once a video has been selected.
pub fn print_welcome_banner(video: &str, mime_type: &str, model: &str, session_id: &str) {
    println!();
    println!("  {} {}", style("▶").cyan(), style("VisionChat").cyan().bold());
    println!("  {}", style(video).dim());
    println!();
    println!("  {}   {}", style("Type:").bold(), style(mime_type).dim());
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!(
        "  {} {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
