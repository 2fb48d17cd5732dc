use test_utils::codeblock_fixture;

use super::code_blocks;
use super::escape_html;
use super::render;
use super::render_numbered;
use super::segments;
use super::Segment;

#[test]
fn it_escapes_every_significant_character() {
    let res = escape_html(r#"<a href="x">Tom & Jerry's</a>"#);
    insta::assert_snapshot!(res, @"&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;&#x2F;a&gt;");
}

#[test]
fn it_leaves_no_raw_markup_in_prose() {
    let res = render(r#"<script>alert("hi")</script> & 'quotes' / slashes"#);
    for c in ['<', '>', '"', '\'', '/'] {
        let stripped = res
            .replace("<br>", "")
            .replace("<strong>", "")
            .replace("</strong>", "")
            .replace("<em>", "")
            .replace("</em>", "")
            .replace("<code>", "")
            .replace("</code>", "");
        assert!(!stripped.contains(c), "found {c} in {res}");
    }
    let without_entities = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;", "&#x2F;"]
        .iter()
        .fold(res.to_string(), |acc, entity| return acc.replace(entity, ""));
    assert!(!without_entities.contains('&'));
}

#[test]
fn it_applies_inline_markup_in_order() {
    let res = render("**bold** and *italic* and `code`");
    insta::assert_snapshot!(res, @"<strong>bold</strong> and <em>italic</em> and <code>code</code>");
}

#[test]
fn it_matches_bold_before_italic() {
    let res = render("**bold**");
    insta::assert_snapshot!(res, @"<strong>bold</strong>");
}

#[test]
fn it_escapes_before_substituting() {
    let res = render("**<b>not html</b>**");
    insta::assert_snapshot!(res, @"<strong>&lt;b&gt;not html&lt;&#x2F;b&gt;</strong>");
}

#[test]
fn it_converts_newlines() {
    let res = render("line one\nline two");
    insta::assert_snapshot!(res, @"line one<br>line two");
}

#[test]
fn it_renders_one_python_block() {
    let res = render("Try this:\n```python\nprint(\"*not italic*\")\n```\nDone.");
    let expected = [
        "Try this:<br>",
        "<div class=\"code-block\" data-code-index=\"1\">",
        "<div class=\"code-header\"><span class=\"code-lang\">python</span>",
        "<button type=\"button\" class=\"copy-btn\" data-code-index=\"1\">Copy</button></div>",
        "<pre><code class=\"language-python\">print(&quot;*not italic*&quot;)\n</code></pre></div>",
        "<br>Done.",
    ]
    .join("");
    assert_eq!(res, expected);

    assert_eq!(res.matches("class=\"code-block\"").count(), 1);
    assert!(!res.contains("<em>"));
}

#[test]
fn it_labels_untagged_blocks() {
    let res = render("```\nabc\n```");
    assert!(res.contains("<span class=\"code-lang\">text</span>"));
}

#[test]
fn it_leaves_unclosed_fences_as_prose() {
    let res = render("```rust\nfn main() {}");
    assert!(!res.contains("code-block"));
    assert!(res.ends_with("rust<br>fn main() {}"));
}

#[test]
fn it_splits_segments() {
    let parts = segments("a\n```js\nx\n```\nb");
    assert_eq!(
        parts,
        vec![
            Segment::Prose("a\n"),
            Segment::Code {
                lang: "js",
                body: "x\n"
            },
            Segment::Prose("\nb"),
        ]
    );
}

#[test]
fn it_extracts_all_code_blocks() {
    let blocks = code_blocks(codeblock_fixture());
    assert_eq!(blocks.len(), 4);
    assert_eq!(blocks[2], "abc123\n");
}

#[test]
fn it_numbers_blocks_across_messages() {
    let (first, next) = render_numbered(codeblock_fixture(), 1);
    assert_eq!(next, 5);
    assert!(first.contains("data-code-index=\"4\""));

    let (second, next) = render_numbered("```sh\nls\n```", next);
    assert_eq!(next, 6);
    assert!(second.contains("data-code-index=\"5\""));
}

#[test]
fn it_is_pure() {
    let text = codeblock_fixture();
    assert_eq!(render(text), render(text));
}

#[test]
fn it_accepts_tags_beyond_word_characters() {
    let res = render("```c++\nint x = 1;\n```");
    assert!(res.contains("<span class=\"code-lang\">c++</span>"));
    assert!(res.contains("data-code-index=\"1\""));
    assert!(!res.contains("<code>"));

    assert_eq!(code_blocks("```objective-c \n[obj run];\n```"), vec!["[obj run];\n"]);
}

#[test]
fn it_accepts_crlf_fences() {
    let parts = segments("```python\r\nprint(1)\r\n```");
    assert_eq!(
        parts,
        vec![Segment::Code {
            lang: "python",
            body: "print(1)\r\n"
        }]
    );
}
