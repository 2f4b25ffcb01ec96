// src/color.rs

//! Defines the `NamedColor` palette the effects draw with, plus the
//! darkening map used for cascade trails and name parsing for `--color=`.

use log::debug;
use serde::{Deserialize, Serialize};

/// The 16 console colors the engine knows about.
///
/// Order matches the classic console palette (dark variants first at the
/// low indices, vivid variants above), so `PALETTE[i]` round-trips with the
/// discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    DarkBlue = 1,
    DarkGreen = 2,
    DarkCyan = 3,
    DarkRed = 4,
    DarkMagenta = 5,
    DarkYellow = 6,
    Gray = 7,
    DarkGray = 8,
    Blue = 9,
    Green = 10,
    Cyan = 11,
    Red = 12,
    Magenta = 13,
    Yellow = 14,
    White = 15,
}

/// All palette entries, indexable by discriminant.
pub const PALETTE: [NamedColor; 16] = [
    NamedColor::Black,
    NamedColor::DarkBlue,
    NamedColor::DarkGreen,
    NamedColor::DarkCyan,
    NamedColor::DarkRed,
    NamedColor::DarkMagenta,
    NamedColor::DarkYellow,
    NamedColor::Gray,
    NamedColor::DarkGray,
    NamedColor::Blue,
    NamedColor::Green,
    NamedColor::Cyan,
    NamedColor::Red,
    NamedColor::Magenta,
    NamedColor::Yellow,
    NamedColor::White,
];

impl NamedColor {
    /// Returns the dimmed variant of this color, used for the cascade trail
    /// one row behind the head. Colors without a defined dark variant map to
    /// themselves; the mapping is total.
    pub fn darkened(self) -> NamedColor {
        match self {
            NamedColor::Blue => NamedColor::DarkBlue,
            NamedColor::Cyan => NamedColor::DarkCyan,
            NamedColor::Gray => NamedColor::DarkGray,
            NamedColor::Green => NamedColor::DarkGreen,
            NamedColor::Magenta => NamedColor::DarkMagenta,
            NamedColor::Red => NamedColor::DarkRed,
            NamedColor::Yellow => NamedColor::DarkYellow,
            NamedColor::White => NamedColor::Gray,
            other => other,
        }
    }

    /// Parses a palette name, case-insensitively and ignoring `-`/`_`
    /// separators (`"DarkGreen"`, `"dark-green"` and `"darkgreen"` are the
    /// same color). Returns `None` for unrecognized names; callers fall back
    /// to their default silently per the configuration-error policy.
    pub fn parse(name: &str) -> Option<NamedColor> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let color = match normalized.as_str() {
            "black" => NamedColor::Black,
            "darkblue" => NamedColor::DarkBlue,
            "darkgreen" => NamedColor::DarkGreen,
            "darkcyan" => NamedColor::DarkCyan,
            "darkred" => NamedColor::DarkRed,
            "darkmagenta" => NamedColor::DarkMagenta,
            "darkyellow" => NamedColor::DarkYellow,
            "gray" => NamedColor::Gray,
            "darkgray" => NamedColor::DarkGray,
            "blue" => NamedColor::Blue,
            "green" => NamedColor::Green,
            "cyan" => NamedColor::Cyan,
            "red" => NamedColor::Red,
            "magenta" => NamedColor::Magenta,
            "yellow" => NamedColor::Yellow,
            "white" => NamedColor::White,
            _ => {
                debug!("Unrecognized color name '{}'", name);
                return None;
            }
        };
        Some(color)
    }

    /// The SGR foreground parameter for this color. Dark variants use the
    /// normal-intensity codes (30-37), vivid variants the bright ones
    /// (90-97).
    pub fn sgr_foreground(self) -> u16 {
        match self {
            NamedColor::Black => 30,
            NamedColor::DarkRed => 31,
            NamedColor::DarkGreen => 32,
            NamedColor::DarkYellow => 33,
            NamedColor::DarkBlue => 34,
            NamedColor::DarkMagenta => 35,
            NamedColor::DarkCyan => 36,
            NamedColor::Gray => 37,
            NamedColor::DarkGray => 90,
            NamedColor::Red => 91,
            NamedColor::Green => 92,
            NamedColor::Yellow => 93,
            NamedColor::Blue => 94,
            NamedColor::Magenta => 95,
            NamedColor::Cyan => 96,
            NamedColor::White => 97,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darkening_is_total_over_the_palette() {
        for color in PALETTE {
            // Every entry must map somewhere inside the palette.
            assert!(PALETTE.contains(&color.darkened()));
        }
    }

    #[test]
    fn darkening_matches_the_defined_pairs() {
        assert_eq!(NamedColor::Blue.darkened(), NamedColor::DarkBlue);
        assert_eq!(NamedColor::Cyan.darkened(), NamedColor::DarkCyan);
        assert_eq!(NamedColor::Gray.darkened(), NamedColor::DarkGray);
        assert_eq!(NamedColor::Green.darkened(), NamedColor::DarkGreen);
        assert_eq!(NamedColor::Magenta.darkened(), NamedColor::DarkMagenta);
        assert_eq!(NamedColor::Red.darkened(), NamedColor::DarkRed);
        assert_eq!(NamedColor::Yellow.darkened(), NamedColor::DarkYellow);
        assert_eq!(NamedColor::White.darkened(), NamedColor::Gray);
    }

    #[test]
    fn colors_without_dark_variant_map_to_themselves() {
        for color in [
            NamedColor::Black,
            NamedColor::DarkBlue,
            NamedColor::DarkGreen,
            NamedColor::DarkCyan,
            NamedColor::DarkRed,
            NamedColor::DarkMagenta,
            NamedColor::DarkYellow,
            NamedColor::DarkGray,
        ] {
            assert_eq!(color.darkened(), color);
        }
    }

    #[test]
    fn parse_is_case_and_separator_insensitive() {
        assert_eq!(NamedColor::parse("green"), Some(NamedColor::Green));
        assert_eq!(NamedColor::parse("DarkGreen"), Some(NamedColor::DarkGreen));
        assert_eq!(NamedColor::parse("dark-green"), Some(NamedColor::DarkGreen));
        assert_eq!(NamedColor::parse("DARK_GRAY"), Some(NamedColor::DarkGray));
        assert_eq!(NamedColor::parse("chartreuse"), None);
        assert_eq!(NamedColor::parse(""), None);
    }
}
