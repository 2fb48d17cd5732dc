#[cfg(test)]
#[path = "session_state_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;

use super::PersistentStore;
use crate::domain::models::Conversation;
use crate::domain::models::ConversationId;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Settings;

/// Sole in-memory owner of conversations and settings. Every mutation is
/// written through to the persistent store before returning.
pub struct SessionState {
    conversations: Vec<Conversation>,
    active_conversation_id: Option<ConversationId>,
    settings: Settings,
    store: PersistentStore,
}

impl SessionState {
    /// Loads stored state. The newest conversation becomes active.
    pub async fn load(store: PersistentStore) -> SessionState {
        let document = store.load().await.unwrap_or_default();
        let active_conversation_id = document.chats.first().map(|e| return e.id);

        return SessionState {
            conversations: document.chats,
            active_conversation_id,
            settings: document.settings,
            store,
        };
    }

    pub fn conversations(&self) -> &[Conversation] {
        return &self.conversations;
    }

    pub fn settings(&self) -> &Settings {
        return &self.settings;
    }

    pub fn active_conversation_id(&self) -> Option<ConversationId> {
        return self.active_conversation_id;
    }

    pub fn conversation(&self, id: ConversationId) -> Option<&Conversation> {
        return self.conversations.iter().find(|e| return e.id == id);
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        return self
            .active_conversation_id
            .and_then(|id| return self.conversation(id));
    }

    async fn persist(&self) {
        if let Err(err) = self.store.save(&self.conversations, &self.settings).await {
            tracing::error!(error = ?err, "Failed to save conversations");
        }
    }

    fn next_id(&self, now: DateTime<Utc>) -> ConversationId {
        let candidate = now.timestamp_millis();
        let max_id = self.conversations.iter().map(|e| return e.id).max();

        if let Some(max_id) = max_id {
            if candidate <= max_id {
                return max_id + 1;
            }
        }

        return candidate;
    }

    /// Creates a conversation at the top of the list and makes it active.
    pub async fn create_conversation_at(&mut self, now: DateTime<Utc>) -> ConversationId {
        let id = self.next_id(now);
        self.conversations.insert(0, Conversation::new(id, now));
        self.active_conversation_id = Some(id);

        tracing::debug!(id = id, "Created conversation");
        self.persist().await;

        return id;
    }

    pub async fn create_conversation(&mut self) -> ConversationId {
        return self.create_conversation_at(Utc::now()).await;
    }

    /// Returns the active conversation, creating one first when none is
    /// active.
    pub async fn ensure_active_conversation(&mut self) -> ConversationId {
        if let Some(conversation) = self.active_conversation() {
            return conversation.id;
        }

        return self.create_conversation().await;
    }

    pub fn select_conversation(&mut self, id: ConversationId) -> bool {
        if self.conversation(id).is_none() {
            return false;
        }

        self.active_conversation_id = Some(id);
        return true;
    }

    /// Moves the selection `offset` places through the list, clamped to the
    /// ends.
    pub fn select_relative(&mut self, offset: i64) -> bool {
        if self.conversations.is_empty() {
            return false;
        }

        let current = self
            .active_conversation_id
            .and_then(|id| return self.conversations.iter().position(|e| return e.id == id))
            .unwrap_or(0) as i64;
        let last = self.conversations.len() as i64 - 1;
        let target = (current + offset).clamp(0, last) as usize;

        let id = self.conversations[target].id;
        return self.select_conversation(id);
    }

    /// Renames a conversation. Blank titles are ignored.
    pub async fn rename_conversation(&mut self, id: ConversationId, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }

        let conversation = match self.conversations.iter_mut().find(|e| return e.id == id) {
            Some(conversation) => conversation,
            None => return false,
        };
        conversation.title = title.to_string();

        self.persist().await;
        return true;
    }

    /// Deletes a conversation. When it was active, the first remaining
    /// conversation becomes active, or none.
    pub async fn delete_conversation(&mut self, id: ConversationId) -> bool {
        let before = self.conversations.len();
        self.conversations.retain(|e| return e.id != id);
        if self.conversations.len() == before {
            return false;
        }

        if self.active_conversation_id == Some(id) {
            self.active_conversation_id = self.conversations.first().map(|e| return e.id);
        }

        tracing::debug!(id = id, "Deleted conversation");
        self.persist().await;
        return true;
    }

    /// Appends a message to a conversation. Returns false, changing nothing,
    /// when the conversation no longer exists.
    pub async fn append_message(&mut self, id: ConversationId, role: Role, content: &str) -> bool {
        let conversation = match self.conversations.iter_mut().find(|e| return e.id == id) {
            Some(conversation) => conversation,
            None => return false,
        };
        conversation.push(Message::new(role, content));

        self.persist().await;
        return true;
    }

    pub async fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.persist().await;
    }

    pub async fn delete_all(&mut self) {
        self.conversations.clear();
        self.active_conversation_id = None;
        self.persist().await;
    }
}
