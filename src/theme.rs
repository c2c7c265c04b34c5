// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{StoreError, UnknownValue};
use crate::storage::SharedStore;

/// Storage key holding the theme preference
pub const THEME_KEY: &str = "themePreference";

/// UI color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownValue {
                kind: "theme",
                value: s.to_string(),
                expected: "light, dark",
            }),
        }
    }
}

/// The user's theme choice, persisted whenever it changes
pub struct ThemePreference {
    store: SharedStore,
    theme: Theme,
}

impl ThemePreference {
    /// Load the stored preference, falling back to `system_default`
    pub fn load(store: SharedStore, system_default: Theme) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored theme preference");
                system_default
            }),
            Ok(None) => system_default,
            Err(e) => {
                warn!(error = %e, "could not read theme preference");
                system_default
            }
        };

        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch to `theme` and persist it
    pub fn set(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.theme = theme;
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Flip between light and dark; returns the new theme
    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }
}

/// Best-effort guess of the terminal's appearance.
///
/// Reads `COLORFGBG` ("foreground;background"), which many terminals set;
/// a background color index of 0-6 or 8 means a dark background.
pub fn detect_system_theme() -> Theme {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| theme_from_colorfgbg(&value))
        .unwrap_or_default()
}

fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(if background <= 6 || background == 8 {
        Theme::Dark
    } else {
        Theme::Light
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};

    #[test]
    fn stored_preference_wins_over_system_default() {
        let store = MemoryStore::shared();
        store.set(THEME_KEY, "dark").unwrap();

        let preference = ThemePreference::load(store, Theme::Light);
        assert_eq!(preference.theme(), Theme::Dark);
    }

    #[test]
    fn missing_preference_uses_system_default() {
        let preference = ThemePreference::load(MemoryStore::shared(), Theme::Dark);
        assert_eq!(preference.theme(), Theme::Dark);
    }

    #[test]
    fn invalid_preference_uses_system_default() {
        let store = MemoryStore::shared();
        store.set(THEME_KEY, "purple").unwrap();

        let preference = ThemePreference::load(store, Theme::Light);
        assert_eq!(preference.theme(), Theme::Light);
    }

    #[test]
    fn toggle_persists() {
        let store = MemoryStore::shared();
        let mut preference = ThemePreference::load(store.clone(), Theme::Light);

        assert_eq!(preference.toggle().unwrap(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(preference.toggle().unwrap(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn set_persists() {
        let store = MemoryStore::shared();
        let mut preference = ThemePreference::load(store.clone(), Theme::Light);

        preference.set(Theme::Dark).unwrap();
        let reloaded = ThemePreference::load(store, Theme::Light);
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn colorfgbg_background_decides() {
        assert_eq!(theme_from_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(theme_from_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(theme_from_colorfgbg("12;8"), Some(Theme::Dark));
        assert_eq!(theme_from_colorfgbg("default;default"), None);
    }
}
