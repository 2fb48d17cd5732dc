#[cfg(test)]
#[path = "mode_test.rs"]
mod tests;

use std::str::FromStr;

use strum::EnumIter;
use strum::EnumString;

/// Assistant behaviour presets selected by a `/mode` prefix on the input.
/// Nothing about the active mode is stored; it is always read back from the
/// text itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Code,
    Creative,
    Explain,
    Concise,
}

impl Mode {
    pub fn token(&self) -> String {
        return format!("/{self}");
    }

    /// Splits a recognised mode token off the start of the input. The token
    /// must be followed by whitespace or the end of the text.
    fn split(input: &str) -> Option<(Mode, &str)> {
        let rest = input.strip_prefix('/')?;
        let word_end = rest
            .find(|c: char| return c.is_whitespace())
            .unwrap_or(rest.len());

        let mode = Mode::from_str(&rest[..word_end]).ok()?;
        return Some((mode, rest[word_end..].trim_start()));
    }

    pub fn detect(input: &str) -> Option<Mode> {
        return Mode::split(input).map(|(mode, _)| return mode);
    }

    pub fn strip(input: &str) -> &str {
        if let Some((_, body)) = Mode::split(input) {
            return body;
        }

        return input;
    }

    /// Applies `mode` to the buffer, replacing any other mode token. Toggling
    /// the mode that is already active removes it.
    pub fn toggle(input: &str, mode: Mode) -> String {
        let body = Mode::strip(input);
        if Mode::detect(input) == Some(mode) {
            return body.to_string();
        }

        return format!("{} {body}", mode.token());
    }
}
