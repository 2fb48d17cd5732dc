use std::collections::HashMap;

use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::backend::Backend;
use ratatui::Frame;
use syntect::highlighting::Theme;

use super::markdown;
use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::MessageBlock;
use crate::domain::models::Role;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

struct BubbleCacheEntry<'a> {
    block: MessageBlock,
    codeblocks_count: usize,
    lines: Vec<Line<'a>>,
}

/// Rendered bubbles for the visible thread, cached per position until the
/// block, the width or the copy feedback changes.
pub struct BubbleList<'a> {
    cache: HashMap<usize, BubbleCacheEntry<'a>>,
    copied: Vec<usize>,
    line_width: usize,
    lines_len: usize,
    theme: Theme,
}

impl<'a> BubbleList<'a> {
    pub fn new(theme: Theme) -> BubbleList<'a> {
        return BubbleList {
            cache: HashMap::new(),
            copied: vec![],
            line_width: 0,
            lines_len: 0,
            theme,
        };
    }

    pub fn set_blocks(&mut self, blocks: &[MessageBlock], line_width: usize, copied: &[usize]) {
        if self.line_width != line_width || self.copied != copied {
            self.cache.clear();
            self.line_width = line_width;
            self.copied = copied.to_vec();
        }
        self.cache.retain(|idx, _| return *idx < blocks.len());

        let mut total_codeblock_counter = 0;
        self.lines_len = blocks
            .iter()
            .enumerate()
            .map(|(idx, block)| {
                if let Some(cache_entry) = self.cache.get(&idx) {
                    if &cache_entry.block == block {
                        total_codeblock_counter += cache_entry.codeblocks_count;
                        return cache_entry.lines.len();
                    }
                }

                let mut align = BubbleAlignment::Left;
                if block.role == Role::User {
                    align = BubbleAlignment::Right;
                }

                let bubble_lines = Bubble::new(
                    block,
                    align,
                    line_width,
                    total_codeblock_counter,
                    &self.copied,
                )
                .as_lines(&self.theme);
                let bubble_line_len = bubble_lines.len();

                let codeblocks_count = markdown::code_blocks(&block.text).len();
                total_codeblock_counter += codeblocks_count;

                self.cache.insert(
                    idx,
                    BubbleCacheEntry {
                        block: block.clone(),
                        codeblocks_count,
                        lines: bubble_lines,
                    },
                );

                return bubble_line_len;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();
        let lines: Vec<Line<'a>> = indexes
            .iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|entry| return entry.lines.to_owned())
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
