#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE: Lazy<Regex> = Lazy::new(|| return Regex::new(r"```([^\s`]*)[ \t]*\r?\n((?s:.*?))```").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| return Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| return Regex::new(r"\*(.+?)\*").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| return Regex::new(r"`(.+?)`").unwrap());

pub const PLAIN_CODE_LABEL: &str = "text";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Prose(&'a str),
    Code { lang: &'a str, body: &'a str },
}

/// Splits text on fenced code blocks in a single pass. Empty prose between
/// adjacent blocks is dropped.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut res = vec![];
    let mut cursor = 0;

    for captures in FENCE.captures_iter(text) {
        let whole = match captures.get(0) {
            Some(whole) => whole,
            None => continue,
        };
        if whole.start() > cursor {
            res.push(Segment::Prose(&text[cursor..whole.start()]));
        }

        res.push(Segment::Code {
            lang: captures.get(1).map_or("", |e| return e.as_str()),
            body: captures.get(2).map_or("", |e| return e.as_str()),
        });
        cursor = whole.end();
    }

    if cursor < text.len() {
        res.push(Segment::Prose(&text[cursor..]));
    }

    return res;
}

pub fn code_blocks(text: &str) -> Vec<String> {
    return segments(text)
        .into_iter()
        .filter_map(|segment| {
            if let Segment::Code { body, .. } = segment {
                return Some(body.to_string());
            }
            return None;
        })
        .collect();
}

pub fn code_label(lang: &str) -> &str {
    if lang.is_empty() {
        return PLAIN_CODE_LABEL;
    }

    return lang;
}

pub fn escape_html(text: &str) -> String {
    let mut res = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            '/' => res.push_str("&#x2F;"),
            _ => res.push(c),
        }
    }

    return res;
}

/// Escapes prose, then applies bold, italic, inline code and line breaks in
/// that order.
fn render_prose(text: &str) -> String {
    let escaped = escape_html(text);
    let bold = BOLD.replace_all(&escaped, "<strong>$1</strong>");
    let italic = ITALIC.replace_all(&bold, "<em>$1</em>");
    let code = INLINE_CODE.replace_all(&italic, "<code>$1</code>");

    return code.replace('\n', "<br>");
}

fn render_code_block(lang: &str, body: &str, index: usize) -> String {
    let label = escape_html(code_label(lang));
    return format!(
        "<div class=\"code-block\" data-code-index=\"{index}\"><div class=\"code-header\"><span class=\"code-lang\">{label}</span><button type=\"button\" class=\"copy-btn\" data-code-index=\"{index}\">Copy</button></div><pre><code class=\"language-{label}\">{}</code></pre></div>",
        escape_html(body)
    );
}

/// Renders raw message text into HTML. Code blocks are numbered from
/// `first_code_index`; the next free index is returned with the markup so
/// several messages can share one numbering.
pub fn render_numbered(text: &str, first_code_index: usize) -> (String, usize) {
    let mut index = first_code_index;
    let html = segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Prose(prose) => return render_prose(prose),
            Segment::Code { lang, body } => {
                let block = render_code_block(lang, body, index);
                index += 1;
                return block;
            }
        })
        .collect::<Vec<String>>()
        .join("");

    return (html, index);
}

pub fn render(text: &str) -> String {
    return render_numbered(text, 1).0;
}
