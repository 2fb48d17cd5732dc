use std::time::Duration;
use std::time::Instant;

use anyhow::Result;
use test_utils::codeblock_fixture;

use super::CodeBlocks;
use super::CopyFeedback;
use crate::domain::models::MessageBlock;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;

fn codeblocks() -> CodeBlocks {
    let blocks = vec![
        MessageBlock {
            role: Role::User,
            author: "User".to_string(),
            avatar: "".to_string(),
            text: "Show me loops".to_string(),
        },
        MessageBlock {
            role: Role::Assistant,
            author: "FHome AI".to_string(),
            avatar: "".to_string(),
            text: codeblock_fixture().to_string(),
        },
    ];

    let mut codeblocks = CodeBlocks::default();
    codeblocks.replace_from_blocks(&blocks);
    return codeblocks;
}

fn from_slash_command(cmd_str: &str) -> Result<String> {
    let codeblocks = codeblocks();
    let command = SlashCommand::parse(cmd_str).unwrap();
    let indexes = codeblocks.indexes_from_slash_command(&command)?;
    return Ok(codeblocks.blocks_from_indexes(&indexes));
}

#[test]
fn it_replaces_blocks() {
    assert_eq!(codeblocks().len(), 4);
}

#[test]
fn it_provides_first_codeblock() -> Result<()> {
    let res = from_slash_command("/copy 1")?;
    assert!(res.starts_with("fn print_numbers() {"));
    assert!(res.ends_with("}\n"));
    return Ok(());
}

#[test]
fn it_provides_listed_codeblocks() -> Result<()> {
    let res = from_slash_command("/copy 3,4")?;
    assert_eq!(res, "abc123\n\n\nfor i in range(11):\n    print(i)\n");
    return Ok(());
}

#[test]
fn it_provides_codeblock_ranges() -> Result<()> {
    let command = SlashCommand::parse("/copy 2..4").unwrap();
    assert_eq!(codeblocks().indexes_from_slash_command(&command)?, vec![2, 3, 4]);
    return Ok(());
}

#[test]
fn it_throws_an_error_on_invalid_index() {
    let res = from_slash_command("/copy 1010101").unwrap_err().to_string();
    insta::assert_snapshot!(res, @"Code block index 1010101 is not valid");
}

#[test]
fn it_throws_an_error_on_zero_index() {
    assert!(from_slash_command("/copy 0").is_err());
}

#[test]
fn it_throws_an_error_without_codeblocks() {
    let command = SlashCommand::parse("/copy 1").unwrap();
    let res = CodeBlocks::default()
        .indexes_from_slash_command(&command)
        .unwrap_err()
        .to_string();
    insta::assert_snapshot!(res, @"There are no code blocks in this conversation");
}

#[test]
fn it_shows_feedback_for_a_short_while() {
    let now = Instant::now();
    let mut feedback = CopyFeedback::default();
    assert!(feedback.active(now).is_empty());

    feedback.start(vec![2], now);
    assert_eq!(feedback.active(now + Duration::from_millis(1499)), &[2]);
    assert!(feedback.active(now + Duration::from_millis(1500)).is_empty());
}

#[test]
fn it_clears_feedback() {
    let now = Instant::now();
    let mut feedback = CopyFeedback::default();
    feedback.start(vec![1], now);
    feedback.clear();

    assert!(feedback.active(now).is_empty());
}
