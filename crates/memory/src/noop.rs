//! No-op retriever — for hosts that run without long-term memory.

use kodama_core::{InteractionRequest, MemoryRetriever, SceneKind};
use async_trait::async_trait;

/// A `MemoryRetriever` that always comes back empty-handed.
pub struct NoopRetriever;

#[async_trait]
impl MemoryRetriever for NoopRetriever {
    async fn retrieve(
        &self,
        _scene: SceneKind,
        _request: &InteractionRequest,
        _hints: &[String],
    ) -> String {
        String::new()
    }
}
