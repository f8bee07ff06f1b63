//! `visionchat analyze <video>`: one-shot summary.

use std::path::Path;
use std::sync::Arc;

use console::style;

use visionchat_core::chat::session::VideoSession;
use visionchat_core::llm::provider::MultimodalProvider;
use visionchat_infra::filesystem::LocalVideoReader;

use crate::state::AppState;

use super::chat::renderer::ChatRenderer;
use super::spinner;

pub async fn analyze_video(state: &AppState, video: &Path, json: bool) -> anyhow::Result<()> {
    let mut session = VideoSession::new(Arc::clone(&state.assistant), LocalVideoReader::new());
    let selected = session.select_video(video)?.clone();

    let progress = (!json).then(|| spinner("Analyzing video..."));
    let result = session.process().await.map(str::to_string);
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let summary = result?;

    if json {
        let out = serde_json::json!({
            "video": selected.path,
            "mimeType": selected.mime_type,
            "model": state.assistant.provider().model(),
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let renderer = ChatRenderer::new();
    println!();
    println!(
        "  {} {}",
        style("Summary of").bold(),
        style(selected.path.display()).cyan()
    );
    println!();
    println!("{}", renderer.render_final(&summary).trim_end());
    println!();
    Ok(())
}
