//! In-memory conversation store
//!
//! One `ConversationState` per identity for the lifetime of the process.
//! Entries are created lazily on first lookup and never evicted.

use crate::state_machine::ConversationState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared handle to the conversation map
///
/// Cloning shares the same map. All read-mutate-write sequences run under a
/// single lock so no request ever observes a half-applied update.
#[derive(Clone, Default)]
pub struct ConversationStore {
    conversations: Arc<Mutex<HashMap<String, ConversationState>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ConversationState>> {
        // Mutations are applied whole, so a poisoned map is still consistent
        self.conversations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the state for `id`, creating it if unseen
    pub fn get(&self, id: &str) -> ConversationState {
        let mut conversations = self.lock();
        entry(&mut conversations, id).clone()
    }

    /// Atomically apply `f` to the state for `id`, creating it if unseen
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut ConversationState) -> R) -> R {
        let mut conversations = self.lock();
        f(entry(&mut conversations, id))
    }

    /// Tracked identities, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

fn entry<'a>(
    conversations: &'a mut HashMap<String, ConversationState>,
    id: &str,
) -> &'a mut ConversationState {
    conversations.entry(id.to_string()).or_insert_with(|| {
        tracing::debug!(conversation_id = %id, "Creating conversation state");
        ConversationState::new(id)
    })
}
