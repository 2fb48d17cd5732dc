#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;
use super::Role;

pub type ConversationId = i64;

pub const DEFAULT_TITLE: &str = "New Chat";
pub const TITLE_MAX_CHARS: usize = 30;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

/// Shortens `text` to the title limit, appending an ellipsis when anything
/// was cut.
pub fn derive_title(text: &str) -> String {
    let trimmed = text.trim();
    let mut title = trimmed.chars().take(TITLE_MAX_CHARS).collect::<String>();
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        title += "...";
    }

    return title;
}

impl Conversation {
    pub fn new(id: ConversationId, created_at: DateTime<Utc>) -> Conversation {
        return Conversation {
            id,
            title: DEFAULT_TITLE.to_string(),
            messages: vec![],
            created_at,
        };
    }

    /// Appends a message. The first message of a conversation names it.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);

        if self.messages.len() == 1 {
            let title = derive_title(self.messages[0].display_text());
            if !title.is_empty() {
                self.title = title;
            }
        }
    }

    pub fn last_role(&self) -> Option<Role> {
        return self.messages.last().map(|message| return message.role);
    }
}
