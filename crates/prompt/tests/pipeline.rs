//! End-to-end pipeline tests with real collaborators from kodama-memory.

use kodama_core::{IdentitySource, InteractionRequest, SceneKind, WorkingState};
use kodama_memory::{FileIdentity, KeywordRetriever, MemoryNote, SessionWorkingState};
use kodama_prompt::{PromptBuilder, PromptConfig, PromptMode};
use std::fs;
use std::sync::Arc;
use tokio::time::{advance, Duration};

async fn wired_builder(tmp: &tempfile::TempDir) -> (PromptBuilder, Arc<SessionWorkingState>) {
    let prompt_file = tmp.path().join("system_prompt.txt");
    let profile_file = tmp.path().join("profile.json");
    fs::write(&prompt_file, "You are Kodama, a tiny forest spirit on the desktop.").unwrap();
    fs::write(
        &profile_file,
        r#"{"nickname": "Yuki", "custom_facts": ["works late on Fridays"]}"#,
    )
    .unwrap();

    let identity = Arc::new(FileIdentity::load(&prompt_file, Some(profile_file)));

    let working = Arc::new(SessionWorkingState::new());
    working.push_turn("user: good morning").await;
    working.push_turn("kodama: morning! sleep well?").await;
    working.set_snapshot("mood: cheerful, energy: high").await;

    let retriever = Arc::new(KeywordRetriever::new(3));
    retriever
        .add_note(MemoryNote::new(
            "Yuki mentioned a big project deadline next week",
            vec!["work".into(), "deadline".into()],
        ))
        .await;
    retriever
        .add_note(MemoryNote::new(
            "Yuki prefers tea over coffee",
            vec!["preference".into()],
        ))
        .await;

    let builder = PromptBuilder::new(PromptConfig::default())
        .with_identity(identity)
        .with_working_state(Arc::clone(&working) as Arc<dyn WorkingState>)
        .with_retriever(retriever);
    (builder, working)
}

#[tokio::test]
async fn full_prompt_contains_every_layer() {
    let tmp = tempfile::tempdir().unwrap();
    let (builder, _working) = wired_builder(&tmp).await;

    let request = InteractionRequest::conversation("how is my deadline looking?");
    let prompt = builder
        .build(SceneKind::Complex, &request, &["work".into(), "deadline".into()])
        .await
        .unwrap();

    assert!(prompt.contains("[Identity]"));
    assert!(prompt.contains("tiny forest spirit"));
    assert!(prompt.contains("Nickname: Yuki"));
    assert!(prompt.contains("- works late on Fridays"));
    assert!(prompt.contains("[Working Context]"));
    assert!(prompt.contains("- user: good morning"));
    assert!(prompt.contains("mood: cheerful"));
    assert!(prompt.contains("[Retrieved Memories]"));
    assert!(prompt.contains("project deadline"));
    assert!(prompt.contains("[Instructions]"));
    assert!(prompt.ends_with("User input: how is my deadline looking?"));
}

#[tokio::test]
async fn simple_scene_skips_retrieval_layer() {
    let tmp = tempfile::tempdir().unwrap();
    let (builder, _working) = wired_builder(&tmp).await;

    let request = InteractionRequest::event("pet_clicked");
    let prompt = builder
        .build(SceneKind::Simple, &request, &["work".into()])
        .await
        .unwrap();

    assert!(!prompt.contains("[Retrieved Memories]"));
    assert!(prompt.ends_with("User input: none"));
}

#[tokio::test]
async fn dynamic_layer_tracks_new_turns_between_builds() {
    let tmp = tempfile::tempdir().unwrap();
    let (builder, working) = wired_builder(&tmp).await;
    let request = InteractionRequest::conversation("anything new?");

    let first = builder.build(SceneKind::Simple, &request, &[]).await.unwrap();
    assert!(!first.contains("just remembered something"));

    working.push_turn("user: just remembered something").await;
    let second = builder.build(SceneKind::Simple, &request, &[]).await.unwrap();
    assert!(second.contains("- user: just remembered something"));
}

#[tokio::test(start_paused = true)]
async fn identity_reload_flows_through_after_invalidation() {
    let tmp = tempfile::tempdir().unwrap();
    let prompt_file = tmp.path().join("system_prompt.txt");
    fs::write(&prompt_file, "You are version one.").unwrap();

    let identity = Arc::new(FileIdentity::load(&prompt_file, None));
    let builder = PromptBuilder::new(PromptConfig::default())
        .with_identity(Arc::clone(&identity) as Arc<dyn IdentitySource>)
        .with_working_state(Arc::new(SessionWorkingState::new()));
    let request = InteractionRequest::conversation("hi");

    let before = builder.build(SceneKind::Simple, &request, &[]).await.unwrap();
    assert!(before.contains("version one"));

    fs::write(&prompt_file, "You are version two.").unwrap();
    identity.reload().await;

    // The static cache still serves the old content until invalidated.
    let stale = builder.build(SceneKind::Simple, &request, &[]).await.unwrap();
    assert!(stale.contains("version one"));

    builder.invalidate_identity().await;
    let fresh = builder.build(SceneKind::Simple, &request, &[]).await.unwrap();
    assert!(fresh.contains("version two"));
}

#[tokio::test(start_paused = true)]
async fn semi_static_layer_refreshes_after_ttl() {
    let tmp = tempfile::tempdir().unwrap();
    let (builder, _working) = wired_builder(&tmp).await;
    let request = InteractionRequest::conversation("hello");

    builder.build(SceneKind::Simple, &request, &[]).await.unwrap();
    let stats = builder.cache_stats().await;
    assert_eq!(stats.semi_static.entries, 1);

    advance(Duration::from_secs(601)).await;
    let stats = builder.cache_stats().await;
    assert_eq!(stats.semi_static.entries, 0); // expired and swept

    builder.build(SceneKind::Simple, &request, &[]).await.unwrap();
    assert_eq!(builder.cache_stats().await.semi_static.entries, 1);
}

#[tokio::test]
async fn deep_mode_budget_allows_more_content() {
    let lite = PromptMode::Lite.budget();
    let deep = PromptMode::Deep.budget();
    assert!(deep.available() > lite.available());

    // A prompt that fits Deep but not Lite gets cut only under Lite.
    let tmp = tempfile::tempdir().unwrap();
    let prompt_file = tmp.path().join("system_prompt.txt");
    let long_prompt = "word ".repeat(12_000); // estimate ~12000 vs Lite's 11000
    fs::write(&prompt_file, &long_prompt).unwrap();

    let identity = Arc::new(FileIdentity::load(&prompt_file, None));
    let working = Arc::new(SessionWorkingState::new());
    let request = InteractionRequest::conversation("hi");

    let lite_builder = PromptBuilder::new(PromptConfig {
        mode: PromptMode::Lite,
        auto_adjust: false,
        ..Default::default()
    })
    .with_identity(Arc::clone(&identity) as Arc<dyn IdentitySource>)
    .with_working_state(Arc::clone(&working) as Arc<dyn WorkingState>);
    let lite_out = lite_builder.build(SceneKind::Simple, &request, &[]).await.unwrap();
    assert!(!lite_out.ends_with("User input: hi")); // tail truncated away

    let deep_builder = PromptBuilder::new(PromptConfig {
        mode: PromptMode::Deep,
        auto_adjust: false,
        ..Default::default()
    })
    .with_identity(identity)
    .with_working_state(working);
    let deep_out = deep_builder.build(SceneKind::Simple, &request, &[]).await.unwrap();
    assert!(deep_out.ends_with("User input: hi")); // fits, untouched
}
