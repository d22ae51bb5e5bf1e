//! In-memory conversation store backed by a sharded concurrent map.

use dashmap::DashMap;

use profit_types::{Conversation, ConversationStore, UserId};

/// Process-wide conversation storage. Lost on restart.
///
/// Only users with a calculation in progress occupy an entry; going idle
/// removes the entry.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: DashMap<UserId, Conversation>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn get(&self, user_id: UserId) -> Conversation {
        self.conversations
            .get(&user_id)
            .map(|entry| *entry.value())
            .unwrap_or_default()
    }

    fn set(&self, user_id: UserId, conversation: Conversation) {
        if conversation.is_idle() {
            self.conversations.remove(&user_id);
        } else {
            self.conversations.insert(user_id, conversation);
        }
    }

    fn clear(&self, user_id: UserId) {
        self.conversations.remove(&user_id);
    }

    fn update<T, F>(&self, user_id: UserId, f: F) -> T
    where
        F: FnOnce(&mut Conversation) -> T,
    {
        // The entry guard holds the shard lock for the whole read-modify-write.
        let mut entry = self.conversations.entry(user_id).or_default();
        let out = f(entry.value_mut());
        let idle = entry.is_idle();
        drop(entry);

        if idle {
            self.conversations
                .remove_if(&user_id, |_, conversation| conversation.is_idle());
        }
        out
    }

    fn active_conversations(&self) -> usize {
        self.conversations.len()
    }
}
