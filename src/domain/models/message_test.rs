use anyhow::Result;

use super::Message;
use super::Role;
use crate::domain::models::Mode;

#[test]
fn it_executes_new() {
    let msg = Message::new(Role::User, "Hi there!");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "Hi there!");
}

#[test]
fn it_strips_mode_token_for_display() {
    let msg = Message::new(Role::User, "/code write a loop");
    assert_eq!(msg.display_text(), "write a loop");
    assert_eq!(msg.content, "/code write a loop");
    assert_eq!(msg.mode(), Some(Mode::Code));
}

#[test]
fn it_keeps_assistant_text_untouched() {
    let msg = Message::new(Role::Assistant, "/code is a mode token");
    assert_eq!(msg.display_text(), "/code is a mode token");
    assert_eq!(msg.mode(), None);
}

#[test]
fn it_serializes_roles_in_lowercase() -> Result<()> {
    let payload = serde_json::to_string(&Message::new(Role::Assistant, "Hello"))?;
    assert_eq!(payload, r#"{"role":"assistant","content":"Hello"}"#);
    return Ok(());
}

#[test]
fn it_reads_legacy_ai_role() -> Result<()> {
    let msg: Message = serde_json::from_str(r#"{"role":"ai","content":"Hello"}"#)?;
    assert_eq!(msg.role, Role::Assistant);
    return Ok(());
}
