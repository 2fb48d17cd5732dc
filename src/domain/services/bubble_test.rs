use anyhow::Result;
use test_utils::codeblock_fixture;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::MessageBlock;
use crate::domain::models::Role;
use crate::domain::services::Themes;
use crate::domain::services::DEFAULT_THEME;

fn block(role: Role, author: &str, text: &str) -> MessageBlock {
    return MessageBlock {
        role,
        author: author.to_string(),
        avatar: "".to_string(),
        text: text.to_string(),
    };
}

fn create_lines(
    block: &MessageBlock,
    alignment: BubbleAlignment,
    codeblock_count: usize,
    copied: &[usize],
) -> Result<Vec<String>> {
    let theme = Themes::get(DEFAULT_THEME, "")?;
    let lines = Bubble::new(block, alignment, 50, codeblock_count, copied).as_lines(&theme);
    let lines_str = lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| {
                    return span.content.to_string();
                })
                .collect::<Vec<String>>()
                .join("")
                .trim_end()
                .to_string();
        })
        .collect::<Vec<String>>();

    return Ok(lines_str);
}

#[test]
fn it_creates_assistant_text() -> Result<()> {
    let message = block(Role::Assistant, "FHome AI", "Hi there!");
    let lines = create_lines(&message, BubbleAlignment::Left, 0, &[])?;

    assert_eq!(
        lines,
        vec!["╭FHome AI───╮", "│ Hi there! │", "╰───────────╯"]
    );
    return Ok(());
}

#[test]
fn it_creates_user_text_on_the_right() -> Result<()> {
    let message = block(Role::User, "User", "Hi");
    let lines = create_lines(&message, BubbleAlignment::Right, 0, &[])?;

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("    "));
    assert_eq!(lines[0].trim_start(), "╭User──╮");
    assert_eq!(lines[1].trim_start(), "│ Hi   │");
    assert_eq!(lines[2].trim_start(), "╰──────╯");
    return Ok(());
}

#[test]
fn it_wraps_long_text() -> Result<()> {
    let message = block(Role::Assistant, "FHome AI", "Hi there! This is a really long line that pushes the boundaries of 50 characters across the screen, resulting in a bubble where the line is wrapped to the next line. Cool right?");
    let lines = create_lines(&message, BubbleAlignment::Left, 0, &[])?;

    assert!(lines.len() > 3);
    for line in lines.iter() {
        assert!(line.chars().count() <= 50);
    }
    assert!(lines[1].starts_with("│ Hi there! This is a really long line"));
    return Ok(());
}

#[test]
fn it_numbers_code_blocks() -> Result<()> {
    let message = block(
        Role::Assistant,
        "FHome AI",
        "Sure:\n\n```rust\nfn main() {}\n```",
    );
    let lines = create_lines(&message, BubbleAlignment::Left, 0, &[])?;

    assert_eq!(
        lines,
        vec![
            "╭FHome AI──────╮",
            "│ Sure:        │",
            "│              │",
            "│ ```rust (1)  │",
            "│ fn main() {} │",
            "│ ```          │",
            "╰──────────────╯",
        ]
    );
    return Ok(());
}

#[test]
fn it_continues_numbering_from_earlier_messages() -> Result<()> {
    let message = block(Role::Assistant, "FHome AI", codeblock_fixture());
    let lines = create_lines(&message, BubbleAlignment::Left, 9, &[])?;

    let headers = lines
        .iter()
        .filter(|line| return line.contains("│ ```") && line.contains('('))
        .map(|line| return line.trim_matches(|c| return c == '│' || c == ' ').to_string())
        .collect::<Vec<String>>();
    assert_eq!(
        headers,
        vec![
            "```rust (10)",
            "```javascript (11)",
            "```text (12)",
            "```python (13)",
        ]
    );
    return Ok(());
}

#[test]
fn it_shows_copy_feedback_on_copied_block() -> Result<()> {
    let message = block(Role::Assistant, "FHome AI", codeblock_fixture());
    let lines = create_lines(&message, BubbleAlignment::Left, 0, &[2])?;

    let copied = lines
        .iter()
        .filter(|line| return line.contains("Copied!"))
        .collect::<Vec<&String>>();
    assert_eq!(copied.len(), 1);
    assert!(copied[0].contains("```javascript (2) Copied!"));
    return Ok(());
}

#[test]
fn it_hides_fence_prose_newlines() -> Result<()> {
    let message = block(Role::Assistant, "FHome AI", "```\nabc\n```\nDone");
    let lines = create_lines(&message, BubbleAlignment::Left, 0, &[])?;

    assert_eq!(lines[3].trim_end_matches(|c| return c == '│' || c == ' '), "│ ```");
    assert_eq!(lines[4].trim_end_matches(|c| return c == '│' || c == ' '), "│ Done");
    return Ok(());
}
