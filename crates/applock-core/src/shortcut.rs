//! Keyboard shortcut that locks the app
//!
//! Shortcuts are written as modifier names and a single key joined by `+`,
//! e.g. `ctrl+l` or `Ctrl+Shift+K`. Modifier names are case-insensitive and
//! the key is stored lowercase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default lock shortcut
pub const DEFAULT_LOCK_SHORTCUT: &str = "ctrl+l";

/// A key plus modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyCombo {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub key: char,
}

impl KeyCombo {
    /// Build a combo, normalising the key to lowercase
    pub fn new(key: char, ctrl: bool, alt: bool, shift: bool) -> Self {
        Self {
            ctrl,
            alt,
            shift,
            key: key.to_ascii_lowercase(),
        }
    }

    /// Ctrl + key
    pub fn ctrl(key: char) -> Self {
        Self::new(key, true, false, false)
    }
}

impl Default for KeyCombo {
    fn default() -> Self {
        Self::ctrl('l')
    }
}

impl FromStr for KeyCombo {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidShortcut(s.to_string());

        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key_part, modifiers) = parts.split_last().ok_or_else(invalid)?;

        let mut chars = key_part.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() && !c.is_control() => c,
            _ => return Err(invalid()),
        };

        let mut combo = KeyCombo::new(key, false, false, false);
        for modifier in modifiers {
            let flag = match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => &mut combo.ctrl,
                "alt" | "option" => &mut combo.alt,
                "shift" => &mut combo.shift,
                _ => return Err(invalid()),
            };
            if *flag {
                return Err(invalid());
            }
            *flag = true;
        }

        // A bare letter would fire while typing
        if !combo.ctrl && !combo.alt {
            return Err(invalid());
        }

        Ok(combo)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

impl TryFrom<String> for KeyCombo {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<KeyCombo> for String {
    fn from(combo: KeyCombo) -> Self {
        combo.to_string()
    }
}
