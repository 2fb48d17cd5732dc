use once_cell::sync::Lazy;
use ratatui::style::Color;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;

pub static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

pub struct Syntaxes {}

impl Syntaxes {
    /// Looks a syntax up by fence tag, falling back to plain text.
    pub fn get(name: &str) -> &'static SyntaxReference {
        return SYNTAX_SET
            .find_syntax_by_token(name.trim())
            .unwrap_or_else(|| return SYNTAX_SET.find_syntax_plain_text());
    }

    pub fn translate_colour(colour: syntect::highlighting::Color) -> Option<Color> {
        if colour.a == 0 {
            return None;
        }

        return Some(Color::Rgb(colour.r, colour.g, colour.b));
    }
}
