#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::Theme;

use super::markdown;
use super::markdown::Segment;
use super::Syntaxes;
use super::SYNTAX_SET;
use crate::domain::models::DispatchError;
use crate::domain::models::MessageBlock;
use crate::domain::models::Role;

pub const COPIED_LABEL: &str = "Copied!";

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'b> {
    alignment: BubbleAlignment,
    block: &'b MessageBlock,
    window_max_width: usize,
    codeblock_counter: usize,
    copied: &'b [usize],
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn repeat_from_subtractions(text: &str, subtractions: Vec<usize>) -> String {
    let count = subtractions
        .into_iter()
        .map(|e| return e as i64)
        .reduce(|a, b| return a - b)
        .unwrap_or(0);

    if count <= 0 {
        return "".to_string();
    }

    return text.repeat(count as usize);
}

fn text_width(text: &str) -> usize {
    return text.chars().count();
}

fn spans_width(spans: &[Span]) -> usize {
    return spans.iter().map(|e| return text_width(&e.content)).sum();
}

impl<'a, 'b> Bubble<'b> {
    /// `codeblock_counter` is the number of code blocks in earlier messages,
    /// so numbering runs across the whole conversation. `copied` lists the
    /// code block numbers currently showing copy feedback.
    pub fn new(
        block: &'b MessageBlock,
        alignment: BubbleAlignment,
        window_max_width: usize,
        codeblock_counter: usize,
        copied: &'b [usize],
    ) -> Bubble<'b> {
        return Bubble {
            alignment,
            block,
            window_max_width,
            codeblock_counter,
            copied,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 8,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&mut self, theme: &Theme) -> Vec<Line<'a>> {
        let logical_lines = self.logical_lines(theme);
        let max_line_length = self.get_max_line_length(&logical_lines);

        let lines = logical_lines
            .into_iter()
            .flat_map(|spans| return self.wrap_spans(spans, max_line_length))
            .map(|spans| return self.spans_to_line(spans, max_line_length))
            .collect::<Vec<Line<'a>>>();

        return self.wrap_lines_in_buddle(lines, max_line_length);
    }

    fn logical_lines(&mut self, theme: &Theme) -> Vec<Vec<Span<'a>>> {
        let mut res = vec![];
        let mut after_code = false;
        let block = self.block;

        for segment in markdown::segments(&block.text) {
            match segment {
                Segment::Prose(prose) => {
                    // The newline closing the previous fence is not a line of its own.
                    let mut prose = prose;
                    if after_code {
                        prose = prose.strip_prefix('\n').unwrap_or(prose);
                    }

                    for line in prose.lines() {
                        res.push(vec![Span::from(line.to_string())]);
                    }
                    after_code = false;
                }
                Segment::Code { lang, body } => {
                    self.codeblock_counter += 1;
                    res.push(self.code_header(lang));

                    let mut highlight = HighlightLines::new(Syntaxes::get(lang), theme);
                    for line in body.lines() {
                        res.push(self.highlight_code_line(&mut highlight, line));
                    }

                    res.push(vec![Span::from("```".to_string())]);
                    after_code = true;
                }
            }
        }

        if res.is_empty() {
            res.push(vec![Span::from("".to_string())]);
        }

        return res;
    }

    fn code_header(&self, lang: &str) -> Vec<Span<'a>> {
        let mut spans = vec![
            Span::from(format!("```{}", markdown::code_label(lang))),
            Span::styled(
                format!(" ({})", self.codeblock_counter),
                Style {
                    fg: Some(Color::White),
                    ..Style::default()
                },
            ),
        ];

        if self.copied.contains(&self.codeblock_counter) {
            spans.push(Span::styled(
                format!(" {COPIED_LABEL}"),
                Style {
                    fg: Some(Color::Green),
                    ..Style::default()
                },
            ));
        }

        return spans;
    }

    fn highlight_code_line(&self, highlight: &mut HighlightLines, line: &str) -> Vec<Span<'a>> {
        // Highlighting doesn't work accurately unless each line is postfixed with '\n',
        // especially when dealing with multi-line code comments.
        let line_nl = format!("{line}\n");
        let highlighted = match highlight.highlight_line(&line_nl, &SYNTAX_SET) {
            Ok(highlighted) => highlighted,
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to highlight code line");
                return vec![Span::from(line.to_string())];
            }
        };

        return highlighted
            .iter()
            .enumerate()
            .map(|(idx, (style, content))| {
                let mut text = content.to_string();
                if idx == highlighted.len() - 1 {
                    text = text.trim_end().to_string();
                }

                return Span::styled(
                    text,
                    Style {
                        fg: Syntaxes::translate_colour(style.foreground),
                        ..Style::default()
                    },
                );
            })
            .collect();
    }

    fn wrap_spans(&self, spans: Vec<Span<'a>>, max_line_length: usize) -> Vec<Vec<Span<'a>>> {
        let mut res = vec![];
        let mut split_spans = vec![];
        let mut line_char_count = 0;

        for span in spans {
            let span_width = text_width(&span.content);
            if span_width + line_char_count <= max_line_length {
                line_char_count += span_width;
                split_spans.push(span);
                continue;
            }

            let mut word_set: Vec<&str> = vec![];
            for word in span.content.split(' ') {
                let word_width = text_width(word);
                if word_width + line_char_count > max_line_length && line_char_count > 0 {
                    if !word_set.is_empty() {
                        split_spans.push(Span::styled(word_set.join(" "), span.style));
                    }
                    res.push(split_spans);

                    split_spans = vec![];
                    word_set = vec![];
                    line_char_count = 0;
                }

                word_set.push(word);
                line_char_count += word_width + 1;
            }

            split_spans.push(Span::styled(word_set.join(" "), span.style));
            line_char_count = line_char_count.saturating_sub(1);
        }

        res.push(split_spans);
        return res;
    }

    fn spans_to_line(&self, mut spans: Vec<Span<'a>>, max_line_length: usize) -> Line<'a> {
        let line_str_len = spans_width(&spans);
        let fill = repeat_from_subtractions(" ", vec![max_line_length, line_str_len]);
        let formatted_line_length =
            line_str_len + fill.len() + Bubble::style_config().bubble_padding;

        let mut wrapped_spans = vec![self.highlight_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.highlight_span(format!("{fill} │")));

        let outer_bubble_padding =
            repeat_from_subtractions(" ", vec![self.window_max_width, formatted_line_length]);

        if self.alignment == BubbleAlignment::Left {
            wrapped_spans.push(Span::from(outer_bubble_padding));
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self, logical_lines: &[Vec<Span<'a>>]) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let window_line_length = self.window_max_width.saturating_sub(line_border_width);

        let mut max_line_length = logical_lines
            .iter()
            .map(|spans| return spans_width(spans))
            .max()
            .unwrap_or(0)
            .min(window_line_length);

        let author_length = text_width(&self.block.author);
        if max_line_length < author_length {
            max_line_length = author_length;
        }

        return max_line_length;
    }

    fn wrap_lines_in_buddle(&self, lines: Vec<Line<'a>>, max_line_length: usize) -> Vec<Line<'a>> {
        let author_length = text_width(&self.block.author);
        // Add 2 for the vertical bars.
        let top_bar = format!(
            "╭{}{}╮",
            self.block.author,
            "─".repeat(max_line_length + 2 - author_length)
        );
        let bottom_bar = format!("╰{}╯", "─".repeat(max_line_length + 2));
        let bar_bubble_padding = repeat_from_subtractions(
            " ",
            vec![
                self.window_max_width,
                max_line_length,
                Bubble::style_config().bubble_padding,
            ],
        );

        if self.alignment == BubbleAlignment::Left {
            let mut res = vec![self.highlight_line(format!("{top_bar}{bar_bubble_padding}"))];
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
            return res;
        }

        let mut res = vec![self.highlight_line(format!("{bar_bubble_padding}{top_bar}"))];
        res.extend(lines);
        res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'a> {
        if self.block.role == Role::User {
            return Span::from(text);
        }

        if DispatchError::is_diagnostic(&self.block.text) {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Red),
                    ..Style::default()
                },
            );
        }

        return Span::styled(
            text,
            Style {
                fg: Some(Color::Rgb(52, 211, 153)),
                ..Style::default()
            },
        );
    }

    fn highlight_line(&self, text: String) -> Line<'a> {
        return Line::from(self.highlight_span(text));
    }
}
