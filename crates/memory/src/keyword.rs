//! Keyword-overlap retriever — a lightweight `MemoryRetriever`.
//!
//! Scores stored notes by case-insensitive keyword containment and returns
//! the best matches as a formatted memory block. A stand-in for a real
//! semantic search backend; the pipeline treats the output as opaque text
//! either way.

use kodama_core::{InteractionRequest, MemoryRetriever, SceneKind};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// A long-term memory note with tags for matching.
#[derive(Debug, Clone)]
pub struct MemoryNote {
    pub content: String,
    pub tags: Vec<String>,
}

impl MemoryNote {
    pub fn new(content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            content: content.into(),
            tags,
        }
    }
}

/// Retrieves notes whose content or tags overlap the interaction's hints.
pub struct KeywordRetriever {
    notes: RwLock<Vec<MemoryNote>>,
    limit: usize,
}

impl KeywordRetriever {
    /// `limit` caps the number of notes injected per retrieval.
    pub fn new(limit: usize) -> Self {
        Self {
            notes: RwLock::new(Vec::new()),
            limit,
        }
    }

    pub async fn add_note(&self, note: MemoryNote) {
        self.notes.write().await.push(note);
    }

    pub async fn note_count(&self) -> usize {
        self.notes.read().await.len()
    }

    fn score(note: &MemoryNote, terms: &[String]) -> usize {
        let content = note.content.to_lowercase();
        terms
            .iter()
            .filter(|t| {
                content.contains(t.as_str())
                    || note.tags.iter().any(|tag| tag.to_lowercase() == **t)
            })
            .count()
    }
}

#[async_trait]
impl MemoryRetriever for KeywordRetriever {
    async fn retrieve(
        &self,
        _scene: SceneKind,
        request: &InteractionRequest,
        hints: &[String],
    ) -> String {
        let mut terms: Vec<String> = hints.iter().map(|h| h.to_lowercase()).collect();
        if let Some(content) = &request.content {
            terms.extend(
                content
                    .split_whitespace()
                    .map(|w| w.to_lowercase()),
            );
        }
        if terms.is_empty() {
            return String::new();
        }

        let notes = self.notes.read().await;
        let mut scored: Vec<(usize, &MemoryNote)> = notes
            .iter()
            .map(|n| (Self::score(n, &terms), n))
            .filter(|(s, _)| *s > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(self.limit);

        if scored.is_empty() {
            return String::new();
        }
        debug!(matched = scored.len(), terms = terms.len(), "Keyword retrieval hit");

        let mut out = String::from("[Retrieved Memories]");
        for (_, note) in scored {
            out.push_str(&format!("\n- {}", note.content));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> InteractionRequest {
        InteractionRequest::conversation("work has been stressful")
    }

    #[tokio::test]
    async fn matches_by_hint() {
        let retriever = KeywordRetriever::new(5);
        retriever
            .add_note(MemoryNote::new("User mentioned a big deadline", vec!["work".into()]))
            .await;
        retriever
            .add_note(MemoryNote::new("User likes green tea", vec!["food".into()]))
            .await;

        let out = retriever
            .retrieve(SceneKind::Complex, &request(), &["work".into()])
            .await;
        assert!(out.contains("[Retrieved Memories]"));
        assert!(out.contains("deadline"));
        assert!(!out.contains("green tea"));
    }

    #[tokio::test]
    async fn no_match_returns_empty() {
        let retriever = KeywordRetriever::new(5);
        retriever
            .add_note(MemoryNote::new("User likes green tea", vec![]))
            .await;

        let out = retriever
            .retrieve(
                SceneKind::Medium,
                &InteractionRequest::event("poke"),
                &["astronomy".into()],
            )
            .await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn limit_caps_results() {
        let retriever = KeywordRetriever::new(2);
        for i in 0..5 {
            retriever
                .add_note(MemoryNote::new(format!("work note {}", i), vec![]))
                .await;
        }

        let out = retriever
            .retrieve(SceneKind::Complex, &request(), &["work".into()])
            .await;
        assert_eq!(out.lines().count(), 3); // header + 2 notes
    }
}
