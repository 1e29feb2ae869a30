//! Session working state — bounded conversation ring plus live snapshot.
//!
//! Holds the data the dynamic context layer pulls on every build: the most
//! recent conversation turns and a mutable state snapshot (mood, activity).
//! Session-scoped; nothing here persists across restarts.

use kodama_core::WorkingState;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// Default cap on retained conversation turns.
const DEFAULT_CAPACITY: usize = 50;

struct Inner {
    turns: VecDeque<String>,
    snapshot: String,
}

/// An in-process `WorkingState` shared between the host and the pipeline.
pub struct SessionWorkingState {
    inner: RwLock<Inner>,
    capacity: usize,
}

impl SessionWorkingState {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// `capacity` bounds the retained turn ring; oldest turns are evicted.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                turns: VecDeque::new(),
                snapshot: String::new(),
            }),
            capacity,
        }
    }

    /// Record a completed conversation turn, already formatted as one line
    /// (e.g. `"user: hello"` / `"kodama: hi!"`).
    pub async fn push_turn(&self, turn: impl Into<String>) {
        let mut inner = self.inner.write().await;
        if inner.turns.len() == self.capacity {
            inner.turns.pop_front();
        }
        inner.turns.push_back(turn.into());
    }

    /// Replace the live-state snapshot (mood, current activity, …).
    pub async fn set_snapshot(&self, snapshot: impl Into<String>) {
        self.inner.write().await.snapshot = snapshot.into();
    }

    /// Drop all turns and the snapshot (session reset).
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.turns.clear();
        inner.snapshot.clear();
    }

    pub async fn turn_count(&self) -> usize {
        self.inner.read().await.turns.len()
    }
}

impl Default for SessionWorkingState {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkingState for SessionWorkingState {
    async fn recent_conversations(&self, limit: usize) -> Vec<String> {
        let inner = self.inner.read().await;
        let skip = inner.turns.len().saturating_sub(limit);
        inner.turns.iter().skip(skip).cloned().collect()
    }

    async fn state_snapshot(&self) -> String {
        let inner = self.inner.read().await;
        if inner.snapshot.is_empty() {
            "idle".into()
        } else {
            inner.snapshot.clone()
        }
    }
}
