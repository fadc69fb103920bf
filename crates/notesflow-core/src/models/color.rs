//! Note color palette

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Background color of a note card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    Purple,
    Blue,
    Green,
    Orange,
    Pink,
    Yellow,
}

impl NoteColor {
    /// Every palette entry, in the order the creation form offers them
    pub const ALL: [Self; 6] = [
        Self::Purple,
        Self::Blue,
        Self::Green,
        Self::Orange,
        Self::Pink,
        Self::Yellow,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Yellow => "yellow",
        }
    }

    /// Read a color from an untrusted payload, falling back to the default
    /// for anything outside the palette.
    pub(crate) fn from_wire(value: &serde_json::Value) -> Self {
        value
            .as_str()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == normalized)
            .ok_or_else(|| Error::InvalidInput(format!("unknown note color '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Blue".parse::<NoteColor>().unwrap(), NoteColor::Blue);
        assert_eq!(" yellow ".parse::<NoteColor>().unwrap(), NoteColor::Yellow);
        assert!("teal".parse::<NoteColor>().is_err());
    }

    #[test]
    fn from_wire_falls_back_to_default() {
        assert_eq!(NoteColor::from_wire(&json!("green")), NoteColor::Green);
        assert_eq!(NoteColor::from_wire(&json!("magenta")), NoteColor::Purple);
        assert_eq!(NoteColor::from_wire(&json!(null)), NoteColor::Purple);
        assert_eq!(NoteColor::from_wire(&json!(3)), NoteColor::Purple);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&NoteColor::Orange).unwrap(), "\"orange\"");
    }
}
