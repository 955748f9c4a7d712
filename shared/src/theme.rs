//! Display theme preference.
//!
//! Startup precedence is: explicitly stored preference, then the OS-level
//! dark scheme signal, then light.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        Self::from_dark(!self.is_dark())
    }

    /// Persisted token.
    pub fn as_token(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Unknown tokens are not an error: they just fall through to the next
    /// source in [`Theme::resolve`].
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    /// Decode the raw bytes read from the preference store.
    pub fn from_stored(bytes: &[u8]) -> Option<Self> {
        std::str::from_utf8(bytes).ok().and_then(Self::from_token)
    }

    pub fn resolve(stored: Option<Theme>, prefers_dark: bool) -> Self {
        stored.unwrap_or_else(|| Self::from_dark(prefers_dark))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_preference_wins_over_os_signal() {
        assert_eq!(Theme::resolve(Some(Theme::Light), true), Theme::Light);
        assert_eq!(Theme::resolve(Some(Theme::Dark), false), Theme::Dark);
    }

    #[test]
    fn os_signal_used_without_stored_preference() {
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
    }

    #[test]
    fn defaults_to_light() {
        assert_eq!(Theme::resolve(None, false), Theme::Light);
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn tokens() {
        assert_eq!(Theme::Dark.as_token(), "dark");
        assert_eq!(Theme::from_token("light"), Some(Theme::Light));
        assert_eq!(Theme::from_token("Dark"), None);
        assert_eq!(Theme::from_token("blue"), None);
    }

    #[test]
    fn stored_bytes() {
        assert_eq!(Theme::from_stored(b"dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_stored(&[0xff, 0xfe]), None);
    }

    #[test]
    fn toggled_flips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
