#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Mode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    // Older documents stored assistant replies as "ai".
    #[serde(alias = "ai")]
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            role,
            content: content.to_string(),
        };
    }

    /// Text shown on screen. A leading mode token is part of the stored
    /// content but never displayed.
    pub fn display_text(&self) -> &str {
        if self.role == Role::User {
            return Mode::strip(&self.content);
        }

        return &self.content;
    }

    pub fn mode(&self) -> Option<Mode> {
        if self.role != Role::User {
            return None;
        }

        return Mode::detect(&self.content);
    }
}
