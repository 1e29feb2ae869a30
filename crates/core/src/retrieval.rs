//! Memory retrieval trait — the long-term memory collaborator.
//!
//! Retrieval is expensive, so the pipeline consults it only for scenes above
//! the lowest complexity tier and caches the result briefly. The returned
//! text is opaque to the core: whatever the retriever formats is injected
//! verbatim (or omitted entirely when empty).

use crate::interaction::InteractionRequest;
use crate::scene::SceneKind;
use async_trait::async_trait;

/// Searches long-term memory for context relevant to an interaction.
#[async_trait]
pub trait MemoryRetriever: Send + Sync {
    /// Retrieve formatted memory context. May return an empty string when
    /// nothing relevant is found.
    async fn retrieve(
        &self,
        scene: SceneKind,
        request: &InteractionRequest,
        hints: &[String],
    ) -> String;
}
