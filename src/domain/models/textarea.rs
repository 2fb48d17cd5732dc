use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use tui_textarea::CursorMove;

use super::Composer;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        return TextArea::from_text("");
    }

    /// Builds a composer holding `text` with the cursor at the end.
    pub fn from_text(text: &str) -> tui_textarea::TextArea<'a> {
        let lines = text
            .split('\n')
            .map(|line| return line.to_string())
            .collect::<Vec<String>>();

        let mut textarea = tui_textarea::TextArea::new(lines);
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);
        return textarea;
    }

    pub fn text(textarea: &tui_textarea::TextArea<'a>) -> String {
        return textarea.lines().join("\n");
    }

    pub fn apply_composer(textarea: &mut tui_textarea::TextArea<'a>, composer: &Composer) {
        let mut title = composer.placeholder.to_string();
        if let Some(mode) = composer.mode {
            title = format!("{title} [mode: {mode}]");
        }

        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(title)
                .padding(Padding::new(1, 1, 0, 0)),
        );
    }
}
