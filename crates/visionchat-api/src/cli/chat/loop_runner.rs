//! Main chat loop orchestration.
//!
//! Selects and processes the video, prints the summary, then reads questions
//! until Ctrl+D or `/exit`. Request failures are printed and the loop goes on.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use console::style;
use tracing::info;

use visionchat_core::chat::session::{PROCESSING_STATUS, VideoSession};
use visionchat_core::llm::provider::MultimodalProvider;
use visionchat_infra::filesystem::LocalVideoReader;
use visionchat_types::chat::ChatRole;

use crate::cli::spinner;
use crate::state::{AppState, ConcreteAssistant};

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

type TerminalSession = VideoSession<Arc<ConcreteAssistant>, LocalVideoReader>;

/// Run the interactive chat loop for a video.
pub async fn run_chat_loop(state: &AppState, video: &Path) -> anyhow::Result<()> {
    let model = state.assistant.provider().model().to_string();
    let renderer = ChatRenderer::new();
    let mut session: TerminalSession =
        VideoSession::new(Arc::clone(&state.assistant), LocalVideoReader::new());

    open_video(&mut session, video, &model, &renderer).await;

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Summary => match session.summary() {
                            Some(summary) => {
                                println!();
                                println!("{}", renderer.render_final(summary).trim_end());
                                println!();
                            }
                            None => notify("No summary yet. Use /open <path> to analyze a video."),
                        },
                        ChatCommand::History => print_history(&session),
                        ChatCommand::Open(path) => {
                            open_video(&mut session, Path::new(&path), &model, &renderer).await;
                        }
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Unknown(name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(name).dim()
                            );
                        }
                    }
                    continue;
                }

                let progress = spinner("thinking...");
                let start = Instant::now();
                let result = session.ask(&text).await;
                progress.finish_and_clear();

                match result {
                    Ok(answer) => {
                        println!("\n  {}", style("VisionChat").cyan().bold());
                        println!("{}", renderer.render_final(&answer).trim_end());
                        renderer.print_stats_footer(start.elapsed().as_millis() as u64, &model);
                        println!();
                    }
                    Err(e) => {
                        eprintln!("\n  {} {e}", style("!").red().bold());
                        eprintln!("  {}", style("Ask again, /open another video, or /exit.").dim());
                    }
                }
            }
        }
    }

    chat_input.flush();
    info!(session_id = %session.id(), turns = session.transcript().len() / 2, "chat session ended");
    Ok(())
}

/// Select `path`, process it behind a spinner and print the summary.
async fn open_video(session: &mut TerminalSession, path: &Path, model: &str, renderer: &ChatRenderer) {
    let selected = match session.select_video(path) {
        Ok(selected) => selected.clone(),
        Err(e) => {
            notify(&format!("Could not open {}: {e}", path.display()));
            return;
        }
    };

    print_welcome_banner(
        &selected.preview_url,
        &selected.mime_type,
        model,
        &session.id().to_string(),
    );

    let progress = spinner(PROCESSING_STATUS);
    let result = session.process().await.map(str::to_string);
    progress.finish_and_clear();

    match result {
        Ok(summary) => {
            println!("  {}", style("Summary").bold());
            println!();
            println!("{}", renderer.render_final(&summary).trim_end());
            println!();
        }
        Err(e) => notify(&format!("Video processing failed: {e}. Use /open <path> to retry.")),
    }
}

fn print_history(session: &TerminalSession) {
    let messages = session.transcript().messages();
    println!();
    if messages.is_empty() {
        println!("  {}", style("No questions asked yet.").dim());
    }
    for msg in messages {
        let label = match msg.role {
            ChatRole::User => style("You").green(),
            ChatRole::Assistant => style("VisionChat").cyan(),
        };
        let preview = if msg.content.chars().count() > 100 {
            format!("{}...", msg.content.chars().take(97).collect::<String>())
        } else {
            msg.content.clone()
        };
        println!("  {} {}", label.bold(), preview);
    }
    println!();
}

fn notify(message: &str) {
    eprintln!("\n  {} {message}\n", style("!").yellow().bold());
}
