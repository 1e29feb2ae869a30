//! Working-state trait — the dynamic context collaborator.
//!
//! Working state is the only layer the pipeline refuses to cache: recent
//! conversation turns and the live state snapshot must be fresh on every
//! build.

use async_trait::async_trait;

/// Supplies the per-build dynamic context.
#[async_trait]
pub trait WorkingState: Send + Sync {
    /// The most recent conversation turns, oldest first, at most `limit`.
    async fn recent_conversations(&self, limit: usize) -> Vec<String>;

    /// A snapshot of live state (mood, activity, whatever the host tracks).
    async fn state_snapshot(&self) -> String;
}
