use super::render_message_pane;
use super::render_page;
use super::render_sidebar;
use crate::domain::models::ChatView;
use crate::domain::models::Composer;
use crate::domain::models::MessageBlock;
use crate::domain::models::MessagePane;
use crate::domain::models::Role;
use crate::domain::models::Settings;
use crate::domain::models::SidebarItem;

fn block(role: Role, text: &str) -> MessageBlock {
    return MessageBlock {
        role,
        author: role.to_string(),
        avatar: "avatar.png".to_string(),
        text: text.to_string(),
    };
}

#[test]
fn it_renders_sidebar_with_active_item() {
    let items = vec![
        SidebarItem {
            id: 2,
            title: "<b>Second</b>".to_string(),
            active: true,
        },
        SidebarItem {
            id: 1,
            title: "First".to_string(),
            active: false,
        },
    ];

    insta::assert_snapshot!(render_sidebar(&items), @r###"<ul class="chat-list"><li class="chat-item active" data-chat-id="2">&lt;b&gt;Second&lt;&#x2F;b&gt;</li><li class="chat-item" data-chat-id="1">First</li></ul>"###);
}

#[test]
fn it_renders_empty_state() {
    let html = render_message_pane(&MessagePane::Empty {
        title: "New Chat".to_string(),
    });

    assert!(html.contains("Welcome to FHome AI"));
    assert!(html.contains("<h1 class=\"chat-title\">New Chat</h1>"));
    assert!(!html.contains("class=\"message "));
}

#[test]
fn it_numbers_code_blocks_across_messages() {
    let pane = MessagePane::Thread {
        title: "Loops".to_string(),
        blocks: vec![
            block(Role::User, "Show me"),
            block(Role::Assistant, "```rust\nloop {}\n```"),
            block(Role::Assistant, "```python\nwhile True: pass\n```"),
        ],
        typing: false,
    };

    let html = render_message_pane(&pane);
    assert!(html.contains("<div class=\"code-block\" data-code-index=\"1\">"));
    assert!(html.contains("<div class=\"code-block\" data-code-index=\"2\">"));
    assert!(html.contains("<code class=\"language-python\">while True: pass\n</code>"));
    assert!(!html.contains("data-code-index=\"3\""));
}

#[test]
fn it_renders_markdown_in_messages() {
    let pane = MessagePane::Thread {
        title: "Chat".to_string(),
        blocks: vec![block(Role::Assistant, "**Hi** <there>")],
        typing: false,
    };

    let html = render_message_pane(&pane);
    assert!(html.contains("<div class=\"message assistant\">"));
    assert!(html.contains("<strong>Hi</strong> &lt;there&gt;"));
}

#[test]
fn it_appends_typing_block() {
    let pane = MessagePane::Thread {
        title: "Chat".to_string(),
        blocks: vec![block(Role::User, "Hi")],
        typing: true,
    };

    let html = render_message_pane(&pane);
    assert!(html.ends_with("<span></span><span></span><span></span></div></div></section>"));
    assert!(html.contains("message assistant typing"));
}

#[test]
fn it_emits_no_inline_handlers() {
    let pane = MessagePane::Thread {
        title: "Chat".to_string(),
        blocks: vec![block(Role::Assistant, test_utils::codeblock_fixture())],
        typing: false,
    };

    assert!(!render_message_pane(&pane).contains("onclick"));
}

#[test]
fn it_renders_page_with_corner_radius() {
    let view = ChatView {
        sidebar: vec![],
        pane: MessagePane::Empty {
            title: "Tom & Jerry".to_string(),
        },
        composer: Composer {
            enabled: true,
            placeholder: "".to_string(),
            mode: None,
        },
    };
    let settings = Settings {
        message_corner_radius: 6,
        ..Settings::default()
    };

    let html = render_page(&view, &settings);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Tom &amp; Jerry</title>"));
    assert!(html.contains(".message-content { border-radius: 6px; }"));
}
