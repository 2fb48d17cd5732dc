use super::ConversationId;
use super::Mode;
use super::Role;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarItem {
    pub id: ConversationId,
    pub title: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageBlock {
    pub role: Role,
    pub author: String,
    pub avatar: String,
    /// Raw display text. Markup is produced by whichever projection draws it.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessagePane {
    Empty {
        title: String,
    },
    Thread {
        title: String,
        blocks: Vec<MessageBlock>,
        typing: bool,
    },
}

impl MessagePane {
    pub fn title(&self) -> &str {
        match self {
            MessagePane::Empty { title } => return title,
            MessagePane::Thread { title, .. } => return title,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composer {
    pub enabled: bool,
    pub placeholder: String,
    pub mode: Option<Mode>,
}

/// Everything the screen shows, derived from session state on every render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatView {
    pub sidebar: Vec<SidebarItem>,
    pub pane: MessagePane,
    pub composer: Composer,
}
