use anyhow::Result;
use chrono::TimeZone;
use chrono::Utc;
use test_utils::long_first_message;

use super::derive_title;
use super::Conversation;
use crate::domain::models::Message;
use crate::domain::models::Role;

fn conversation() -> Conversation {
    return Conversation::new(1, Utc.timestamp_millis_opt(1).unwrap());
}

#[test]
fn it_starts_untitled() {
    let conversation = conversation();
    assert_eq!(conversation.title, "New Chat");
    assert!(conversation.messages.is_empty());
}

#[test]
fn it_derives_title_from_first_message() {
    let mut conversation = conversation();
    conversation.push(Message::new(Role::User, long_first_message()));

    assert_eq!(conversation.title, "Hello world, this is a long fi...");
}

#[test]
fn it_keeps_short_titles_whole() {
    let mut conversation = conversation();
    conversation.push(Message::new(Role::User, "Hi there"));

    assert_eq!(conversation.title, "Hi there");
}

#[test]
fn it_derives_title_only_once() {
    let mut conversation = conversation();
    conversation.push(Message::new(Role::User, "First question"));
    conversation.push(Message::new(Role::Assistant, "An answer"));
    conversation.push(Message::new(Role::User, "Second question"));

    assert_eq!(conversation.title, "First question");
    assert_eq!(conversation.last_role(), Some(Role::User));
}

#[test]
fn it_derives_title_without_mode_token() {
    let mut conversation = conversation();
    conversation.push(Message::new(Role::User, "/code write a loop"));

    assert_eq!(conversation.title, "write a loop");
}

#[test]
fn it_counts_characters_not_bytes() {
    let title = derive_title("ééééééééééééééééééééééééééééééééé");
    assert_eq!(title, format!("{}...", "é".repeat(30)));
}

#[test]
fn it_serializes_camel_case() -> Result<()> {
    let payload = serde_json::to_value(conversation())?;
    assert!(payload.get("createdAt").is_some());
    assert!(payload.get("created_at").is_none());
    return Ok(());
}

#[test]
fn it_reads_browser_documents() -> Result<()> {
    let conversation: Conversation = serde_json::from_str(
        r#"{"id":1700000000000,"title":"Hi","messages":[{"role":"user","content":"Hi"},{"role":"ai","content":"Hello!"}],"createdAt":"2023-11-14T22:13:20.000Z"}"#,
    )?;

    assert_eq!(conversation.id, 1700000000000);
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[1].role, Role::Assistant);
    return Ok(());
}
