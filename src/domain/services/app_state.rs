#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use ratatui::prelude::Rect;
use syntect::highlighting::Theme;
use tokio::sync::mpsc;

use super::render_view;
use super::BubbleList;
use super::CodeBlocks;
use super::ComposerInput;
use super::CopyFeedback;
use super::PersistentStore;
use super::QuotaTracker;
use super::Scroll;
use super::SessionState;
use super::ASSISTANT_AVATAR;
use super::ASSISTANT_NAME;
use super::WELCOME_BODY;
use super::WELCOME_TITLE;
use crate::domain::models::Action;
use crate::domain::models::ChatView;
use crate::domain::models::ConversationId;
use crate::domain::models::DispatchRequest;
use crate::domain::models::DispatchResponse;
use crate::domain::models::MessageBlock;
use crate::domain::models::MessagePane;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::models::StorageBox;

pub const NOTICE_AUTHOR: &str = "FHome";
pub const TYPING_TEXT: &str = "Typing...";

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /new (/n) - Starts a new conversation.
- /select (/s) [POSITION] - Opens the conversation at POSITION in the sidebar, counting from 1.
- /rename (/r) [TITLE] - Renames the current conversation.
- /delete (/d) - Deletes the current conversation.
- /copy (/c) [CODE_BLOCK_NUMBER?] - Copies the whole conversation to your clipboard. When a CODE_BLOCK_NUMBER is used, only the specified code blocks are copied.
- /quit /exit (/q) - Exit FHome.
- /help (/h) - Provides this help menu.

MODES:
Start a message with /code, /creative, /explain or /concise to choose how the assistant answers. The mode is hidden in the chat but still sent along. ALT+1 to ALT+4 toggle the modes on the input.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+N - New conversation
- CTRL+K - Previous conversation
- CTRL+J - Next conversation
- CTRL+C - Exit

CODE BLOCKS:
Each code block is numbered with a (NUMBER) after its language, counting across the whole conversation. The CODE_BLOCK_NUMBER of /copy can be set as follows:
- `1` - Selects the first code block
- `1,3,5` - Selects code blocks 1, 3, and 5.
- `2..5`- Selects an inclusive range of code blocks between 2 and 5.
        "#;

    return text.trim().to_string();
}

fn notice_block(author: &str, text: &str) -> MessageBlock {
    return MessageBlock {
        role: Role::Assistant,
        author: author.to_string(),
        avatar: ASSISTANT_AVATAR.to_string(),
        text: text.to_string(),
    };
}

pub struct AppState<'a> {
    pub bubble_list: BubbleList<'a>,
    pub codeblocks: CodeBlocks,
    pub copy_feedback: CopyFeedback,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub notice: Option<String>,
    pub pending: Option<ConversationId>,
    pub quota: QuotaTracker,
    pub scroll: Scroll,
    pub session: SessionState,
    pub view: ChatView,
    shown_conversation_id: Option<ConversationId>,
}

impl<'a> AppState<'a> {
    /// Loads the session and quota from storage. When nothing is stored a
    /// fresh conversation is created so there is always one to type into.
    pub async fn new(storage: StorageBox, theme: Theme) -> Result<AppState<'a>> {
        let mut session = SessionState::load(PersistentStore::new(storage.clone())).await;
        session.ensure_active_conversation().await;
        let quota = QuotaTracker::load(storage).await;

        let view = render_view(&session, None, &ComposerInput::default());
        let mut app_state = AppState {
            bubble_list: BubbleList::new(theme),
            codeblocks: CodeBlocks::default(),
            copy_feedback: CopyFeedback::default(),
            last_known_height: 0,
            last_known_width: 0,
            notice: None,
            pending: None,
            quota,
            scroll: Scroll::default(),
            session,
            view,
            shown_conversation_id: None,
        };
        app_state.refresh("").await;

        return Ok(app_state);
    }

    pub fn waiting_for_backend(&self) -> bool {
        return self.pending.is_some();
    }

    /// Re-derives the view from the session, the quota record and the live
    /// input buffer, then re-lays out the bubbles.
    pub async fn refresh(&mut self, buffer: &str) {
        let now = Utc::now();
        let input = ComposerInput {
            buffer,
            waiting: self.waiting_for_backend(),
            remaining: self.quota.remaining(now).await,
            countdown: self.quota.countdown(now),
        };
        self.view = render_view(&self.session, self.pending, &input);

        let active_conversation_id = self.session.active_conversation_id();
        if self.shown_conversation_id != active_conversation_id {
            self.shown_conversation_id = active_conversation_id;
            self.copy_feedback.clear();
            self.sync_dependants();
            self.scroll.last();
            return;
        }

        self.sync_dependants();
    }

    fn thread_blocks(&self) -> Vec<MessageBlock> {
        match &self.view.pane {
            MessagePane::Empty { .. } => return vec![],
            MessagePane::Thread { blocks, .. } => return blocks.to_vec(),
        }
    }

    /// Blocks shown in the terminal: the thread, a typing placeholder while
    /// a reply is pending and the latest notice.
    pub fn display_blocks(&self) -> Vec<MessageBlock> {
        let mut blocks = match &self.view.pane {
            MessagePane::Empty { .. } => {
                vec![notice_block(
                    ASSISTANT_NAME,
                    &format!("{WELCOME_TITLE}\n\n{WELCOME_BODY}"),
                )]
            }
            MessagePane::Thread { blocks, typing, .. } => {
                let mut blocks = blocks.to_vec();
                if *typing {
                    blocks.push(notice_block(ASSISTANT_NAME, TYPING_TEXT));
                }
                blocks
            }
        };

        if let Some(notice) = &self.notice {
            blocks.push(notice_block(NOTICE_AUTHOR, notice));
        }

        return blocks;
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        let thread_blocks = self.thread_blocks();
        self.codeblocks.replace_from_blocks(&thread_blocks);

        let copied = self.copy_feedback.active(Instant::now()).to_vec();
        self.bubble_list.set_blocks(
            &self.display_blocks(),
            self.last_known_width.into(),
            &copied,
        );

        let was_last = self.scroll.is_last();
        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);

        if was_last || self.waiting_for_backend() {
            self.scroll.last();
        }
    }

    /// Handles an Enter press. Returns whether to exit and whether the input
    /// was consumed, so the composer can be cleared.
    pub async fn submit(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        if input.trim().is_empty() {
            return Ok((false, false));
        }

        let (should_break, handled) = self.handle_slash_commands(input, tx).await?;
        if handled {
            return Ok((should_break, true));
        }

        if self.waiting_for_backend() {
            return Ok((false, false));
        }

        let now = Utc::now();
        if !self.quota.can_send(now).await {
            tracing::debug!("Daily quota exhausted, send refused");
            return Ok((false, false));
        }

        self.notice = None;
        let conversation_id = self.session.ensure_active_conversation().await;
        self.session
            .append_message(conversation_id, Role::User, input)
            .await;
        self.quota.record_send(now).await;
        self.pending = Some(conversation_id);

        let messages = self
            .session
            .conversation(conversation_id)
            .map(|e| return e.messages.to_vec())
            .unwrap_or_default();

        tx.send(Action::BackendRequest(DispatchRequest {
            conversation_id,
            messages,
            settings: self.session.settings().clone(),
        }))?;

        return Ok((false, true));
    }

    /// Stores the reply, or its diagnostic, in the conversation it was asked
    /// for. Replies for conversations deleted in the meantime are dropped.
    pub async fn handle_backend_response(&mut self, response: DispatchResponse) {
        if self.pending == Some(response.conversation_id) {
            self.pending = None;
        }

        if let Err(err) = &response.result {
            tracing::error!(error = ?err, conversation_id = response.conversation_id, "Dispatch failed");
        }

        let appended = self
            .session
            .append_message(response.conversation_id, Role::Assistant, &response.content())
            .await;

        if !appended {
            tracing::warn!(
                conversation_id = response.conversation_id,
                "Discarding reply for a deleted conversation"
            );
        }
    }

    pub fn handle_clipboard_failed(&mut self, err: String) {
        self.copy_feedback.clear();
        self.notice = Some(format!("Copying to the clipboard failed: {err}"));
    }

    pub async fn new_conversation(&mut self) {
        self.notice = None;
        self.session.create_conversation().await;
    }

    pub fn select_relative(&mut self, offset: i64) {
        self.notice = None;
        self.session.select_relative(offset);
    }

    fn transcript(&self) -> String {
        return self
            .thread_blocks()
            .iter()
            .map(|block| return format!("{}: {}", block.author, block.text))
            .collect::<Vec<String>>()
            .join("\n\n");
    }

    /// Runs a slash command. Returns whether to exit and whether the input
    /// was a command at all.
    pub async fn handle_slash_commands(
        &mut self,
        input_str: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        let command = match SlashCommand::parse(input_str) {
            Some(command) => command,
            None => return Ok((false, false)),
        };

        if command.is_quit() {
            return Ok((true, true));
        }

        self.notice = None;

        if command.is_help() {
            self.notice = Some(help_text());
        } else if command.is_new() {
            self.session.create_conversation().await;
        } else if command.is_select() {
            let position = command.rest().trim().parse::<usize>().unwrap_or(0);
            let id = self
                .session
                .conversations()
                .get(position.wrapping_sub(1))
                .map(|e| return e.id);

            match id {
                Some(id) => {
                    self.session.select_conversation(id);
                }
                None => {
                    self.notice = Some(format!(
                        "There is no conversation at position {}.",
                        command.rest()
                    ));
                }
            }
        } else if command.is_rename() {
            let renamed = match self.session.active_conversation_id() {
                Some(id) => self.session.rename_conversation(id, &command.rest()).await,
                None => false,
            };

            if !renamed {
                self.notice = Some("Usage: /rename TITLE".to_string());
            }
        } else if command.is_delete() {
            if let Some(id) = self.session.active_conversation_id() {
                self.session.delete_conversation(id).await;
            }
        } else if command.is_copy_code_block() {
            match self.codeblocks.indexes_from_slash_command(&command) {
                Ok(indexes) => {
                    tx.send(Action::CopyToClipboard(
                        self.codeblocks.blocks_from_indexes(&indexes),
                    ))?;
                    self.copy_feedback.start(indexes, Instant::now());
                }
                Err(err) => {
                    self.notice = Some(err.to_string());
                }
            }
        } else if command.is_copy_chat() {
            tx.send(Action::CopyToClipboard(self.transcript()))?;
            self.notice = Some("Copied chat log to clipboard.".to_string());
        }

        return Ok((false, true));
    }
}
