#[cfg(test)]
#[path = "themes_test.rs"]
mod tests;

use std::fs::File;
use std::io::BufReader;

use anyhow::bail;
use anyhow::Result;
use once_cell::sync::Lazy;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

#[derive(Default)]
pub struct Themes {}

impl Themes {
    pub fn list() -> Vec<String> {
        let mut themes = THEME_SET
            .themes
            .keys()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        themes.sort();

        return themes;
    }

    fn get_from_memory(theme_name: &str) -> Result<Theme> {
        match THEME_SET.themes.get(theme_name) {
            Some(theme) => return Ok(theme.clone()),
            None => bail!(format!("Theme {theme_name} does not exist")),
        }
    }

    fn get_from_file(theme_file: &str) -> Result<Theme> {
        let file = File::open(theme_file)?;
        let mut reader = BufReader::new(file);
        let theme = ThemeSet::load_from_reader(&mut reader)?;

        return Ok(theme);
    }

    /// A `.tmTheme` file wins over a built in theme name when both are set.
    pub fn get(theme_name: &str, theme_file: &str) -> Result<Theme> {
        if !theme_file.is_empty() {
            return Themes::get_from_file(theme_file);
        }
        return Themes::get_from_memory(theme_name);
    }
}
