//! Build a complete prompt from in-memory collaborators and print it.
//!
//! ```sh
//! cargo run -p kodama-prompt --example build_prompt
//! ```

use kodama_core::{InteractionRequest, SceneKind};
use kodama_memory::{FileIdentity, KeywordRetriever, MemoryNote, SessionWorkingState};
use kodama_prompt::{PromptBuilder, PromptConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kodama_prompt=debug".into()),
        )
        .init();

    let identity = Arc::new(FileIdentity::from_static(
        "[Identity]\nYou are Kodama, a small forest spirit living on the desktop.",
    ));

    let working = Arc::new(SessionWorkingState::new());
    working.push_turn("user: morning, kodama").await;
    working.push_turn("kodama: morning! you're up early today").await;
    working.set_snapshot("mood: curious, energy: high").await;

    let retriever = Arc::new(KeywordRetriever::new(3));
    retriever
        .add_note(MemoryNote::new(
            "The user has a project deadline on Friday",
            vec!["work".into(), "deadline".into()],
        ))
        .await;

    let builder = PromptBuilder::new(PromptConfig::default())
        .with_identity(identity)
        .with_working_state(working)
        .with_retriever(retriever);
    builder.set_memory_volume(1);

    let request = InteractionRequest::conversation("how many days until my deadline?");
    let prompt = builder
        .build(SceneKind::Complex, &request, &["deadline".into()])
        .await?;

    println!("{prompt}");
    println!("\n--- cache stats ---");
    let stats = builder.cache_stats().await;
    println!(
        "entries: {}, estimated size: {}",
        stats.total_entries(),
        stats.total_estimated_size()
    );
    Ok(())
}
