#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Deserializer;
use serde_derive::Serialize;

pub const DEFAULT_DISPLAY_NAME: &str = "User";
pub const DEFAULT_CORNER_RADIUS: u32 = 18;
pub const DEFAULT_AVATAR: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Ccircle cx='50' cy='50' r='50' fill='%2334d399'/%3E%3Ctext x='50' y='50' font-size='40' text-anchor='middle' dy='.3em' fill='white' font-family='Arial'%3EU%3C/text%3E%3C/svg%3E";

/// Treats an explicit `null` the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    return Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default());
}

fn null_as_display_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    return Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| return DEFAULT_DISPLAY_NAME.to_string()));
}

fn null_as_avatar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    return Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| return DEFAULT_AVATAR.to_string()));
}

fn null_as_corner_radius<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    return Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(DEFAULT_CORNER_RADIUS));
}

/// User profile and display preferences. Missing or `null` fields in stored
/// documents fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "userName", deserialize_with = "null_as_display_name")]
    pub display_name: String,
    #[serde(rename = "userAvatar", deserialize_with = "null_as_avatar")]
    pub avatar_source: String,
    #[serde(rename = "borderRadius", deserialize_with = "null_as_corner_radius")]
    pub message_corner_radius: u32,
    #[serde(rename = "userAge", deserialize_with = "null_as_default")]
    pub age: String,
    #[serde(rename = "userHobby", deserialize_with = "null_as_default")]
    pub hobby: String,
    #[serde(rename = "userBio", deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(rename = "userPreferences", deserialize_with = "null_as_default")]
    pub preferences: String,
}

impl Default for Settings {
    fn default() -> Settings {
        return Settings {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            avatar_source: DEFAULT_AVATAR.to_string(),
            message_corner_radius: DEFAULT_CORNER_RADIUS,
            age: "".to_string(),
            hobby: "".to_string(),
            bio: "".to_string(),
            preferences: "".to_string(),
        };
    }
}

impl Settings {
    pub fn display_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            return DEFAULT_DISPLAY_NAME;
        }

        return &self.display_name;
    }

    pub fn avatar_source(&self) -> &str {
        if self.avatar_source.trim().is_empty() {
            return DEFAULT_AVATAR;
        }

        return &self.avatar_source;
    }

    /// Profile lines handed to the assistant as context. Empty fields are
    /// left out.
    pub fn profile_lines(&self) -> Vec<String> {
        return [
            ("Name", self.display_name()),
            ("Age", self.age.as_str()),
            ("Hobby", self.hobby.as_str()),
            ("About user", self.bio.as_str()),
            ("Preferences", self.preferences.as_str()),
        ]
        .iter()
        .filter(|(_, value)| return !value.trim().is_empty())
        .map(|(label, value)| return format!("{label}: {}", value.trim()))
        .collect();
    }
}
