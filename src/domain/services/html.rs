#[cfg(test)]
#[path = "html_test.rs"]
mod tests;

use super::markdown;
use super::markdown::escape_html;
use crate::domain::models::ChatView;
use crate::domain::models::MessageBlock;
use crate::domain::models::MessagePane;
use crate::domain::models::Settings;
use crate::domain::models::SidebarItem;
use crate::domain::services::WELCOME_BODY;
use crate::domain::services::WELCOME_TITLE;

pub fn render_sidebar(items: &[SidebarItem]) -> String {
    let entries = items
        .iter()
        .map(|item| {
            let class = if item.active {
                "chat-item active"
            } else {
                "chat-item"
            };
            return format!(
                "<li class=\"{class}\" data-chat-id=\"{}\">{}</li>",
                item.id,
                escape_html(&item.title)
            );
        })
        .collect::<Vec<String>>()
        .join("");

    return format!("<ul class=\"chat-list\">{entries}</ul>");
}

fn render_block(block: &MessageBlock, first_code_index: usize) -> (String, usize) {
    let (body, next_code_index) = markdown::render_numbered(&block.text, first_code_index);
    let html = format!(
        "<div class=\"message {role}\"><img class=\"avatar\" src=\"{avatar}\" alt=\"{author}\"><div class=\"message-body\"><div class=\"message-author\">{author}</div><div class=\"message-content\">{body}</div></div></div>",
        role = block.role,
        avatar = escape_html(&block.avatar),
        author = escape_html(&block.author),
    );

    return (html, next_code_index);
}

/// Renders the message pane. Code blocks are numbered across the whole
/// conversation starting at 1.
pub fn render_message_pane(pane: &MessagePane) -> String {
    let (title, blocks, typing) = match pane {
        MessagePane::Empty { title } => {
            return format!(
                "<section class=\"messages\"><h1 class=\"chat-title\">{}</h1><div class=\"empty-state\"><h2>{WELCOME_TITLE}</h2><p>{WELCOME_BODY}</p></div></section>",
                escape_html(title)
            );
        }
        MessagePane::Thread {
            title,
            blocks,
            typing,
        } => (title, blocks, *typing),
    };

    let mut code_index = 1;
    let mut rendered = vec![];
    for block in blocks {
        let (html, next_code_index) = render_block(block, code_index);
        rendered.push(html);
        code_index = next_code_index;
    }

    if typing {
        rendered.push(
            "<div class=\"message assistant typing\"><div class=\"typing-indicator\"><span></span><span></span><span></span></div></div>"
                .to_string(),
        );
    }

    return format!(
        "<section class=\"messages\"><h1 class=\"chat-title\">{}</h1>{}</section>",
        escape_html(title),
        rendered.join("")
    );
}

/// Renders a standalone HTML document for a view.
pub fn render_page(view: &ChatView, settings: &Settings) -> String {
    return format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>.message-content {{ border-radius: {radius}px; }}</style>\n</head>\n<body>\n<aside>{sidebar}</aside>\n<main>{pane}</main>\n</body>\n</html>\n",
        title = escape_html(view.pane.title()),
        radius = settings.message_corner_radius,
        sidebar = render_sidebar(&view.sidebar),
        pane = render_message_pane(&view.pane),
    );
}
