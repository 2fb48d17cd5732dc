#[cfg(test)]
#[path = "view_renderer_test.rs"]
mod tests;

use super::SessionState;
use crate::domain::models::ChatView;
use crate::domain::models::Composer;
use crate::domain::models::ConversationId;
use crate::domain::models::Message;
use crate::domain::models::MessageBlock;
use crate::domain::models::MessagePane;
use crate::domain::models::Mode;
use crate::domain::models::Role;
use crate::domain::models::Settings;
use crate::domain::models::SidebarItem;
use crate::domain::models::DEFAULT_TITLE;

pub const ASSISTANT_NAME: &str = "FHome AI";
pub const ASSISTANT_AVATAR: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Ccircle cx='50' cy='50' r='50' fill='%236366f1'/%3E%3Ctext x='50' y='50' font-size='36' text-anchor='middle' dy='.3em' fill='white' font-family='Arial'%3EAI%3C/text%3E%3C/svg%3E";

pub const WELCOME_TITLE: &str = "Welcome to FHome AI";
pub const WELCOME_BODY: &str = "Start a conversation by typing a message below.";

pub const PLACEHOLDER_READY: &str = "Type your message, Enter to send";
pub const PLACEHOLDER_WAITING: &str = "Waiting for FHome AI...";

/// Composer inputs that live outside the session: the live buffer, whether a
/// dispatch is in flight and the quota status at render time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposerInput<'a> {
    pub buffer: &'a str,
    pub waiting: bool,
    pub remaining: u32,
    pub countdown: String,
}

impl Default for ComposerInput<'_> {
    fn default() -> Self {
        return ComposerInput {
            buffer: "",
            waiting: false,
            remaining: 1,
            countdown: "00:00:00".to_string(),
        };
    }
}

pub fn quota_placeholder(countdown: &str) -> String {
    return format!("Daily limit reached. Resets in {countdown}");
}

fn message_block(message: &Message, settings: &Settings) -> MessageBlock {
    let (author, avatar) = match message.role {
        Role::User => (settings.display_name(), settings.avatar_source()),
        Role::Assistant => (ASSISTANT_NAME, ASSISTANT_AVATAR),
    };

    return MessageBlock {
        role: message.role,
        author: author.to_string(),
        avatar: avatar.to_string(),
        text: message.display_text().to_string(),
    };
}

fn sidebar(session: &SessionState) -> Vec<SidebarItem> {
    let active = session.active_conversation_id();
    return session
        .conversations()
        .iter()
        .map(|conversation| {
            return SidebarItem {
                id: conversation.id,
                title: conversation.title.to_string(),
                active: Some(conversation.id) == active,
            };
        })
        .collect();
}

fn pane(session: &SessionState, pending: Option<ConversationId>) -> MessagePane {
    let conversation = match session.active_conversation() {
        Some(conversation) => conversation,
        None => {
            return MessagePane::Empty {
                title: DEFAULT_TITLE.to_string(),
            };
        }
    };

    if conversation.messages.is_empty() {
        return MessagePane::Empty {
            title: conversation.title.to_string(),
        };
    }

    return MessagePane::Thread {
        title: conversation.title.to_string(),
        blocks: conversation
            .messages
            .iter()
            .map(|message| return message_block(message, session.settings()))
            .collect(),
        typing: pending == Some(conversation.id),
    };
}

fn composer(input: &ComposerInput) -> Composer {
    let mode = Mode::detect(input.buffer);

    if input.waiting {
        return Composer {
            enabled: false,
            placeholder: PLACEHOLDER_WAITING.to_string(),
            mode,
        };
    }

    if input.remaining == 0 {
        return Composer {
            enabled: false,
            placeholder: quota_placeholder(&input.countdown),
            mode,
        };
    }

    return Composer {
        enabled: true,
        placeholder: PLACEHOLDER_READY.to_string(),
        mode,
    };
}

/// Projects session state into everything the screen shows. `pending` is
/// the conversation with a dispatch in flight, which gets a typing block.
pub fn render_view(
    session: &SessionState,
    pending: Option<ConversationId>,
    input: &ComposerInput,
) -> ChatView {
    return ChatView {
        sidebar: sidebar(session),
        pane: pane(session, pending),
        composer: composer(input),
    };
}
