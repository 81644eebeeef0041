//! Canonical color and class vocabularies for label tokens.
//!
//! The label format accepts colors as numeric ids, single letters, or full
//! names, and class tokens in a handful of legacy spellings. Historically the
//! synonym lists were duplicated across near-identical helpers with diverging
//! behavior; this module is the single normalization entry point.

use serde::{Deserialize, Serialize};

/// Class assigned to boxes committed before any edit result arrives.
pub const DEFAULT_CLASS: &str = "unknown";

/// Team color of an annotation.
///
/// On disk the color is a numeric id (`0..=3`); interactively it arrives as a
/// single letter (`B/R/G/P`) or a full name. Anything unrecognized
/// canonicalizes to [`ColorToken::Gray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorToken {
    Blue,
    Red,
    #[default]
    Gray,
    Purple,
}

impl ColorToken {
    /// Numeric id used in label files: 0=BLUE, 1=RED, 2=GRAY, 3=PURPLE.
    pub fn id(self) -> u8 {
        match self {
            ColorToken::Blue => 0,
            ColorToken::Red => 1,
            ColorToken::Gray => 2,
            ColorToken::Purple => 3,
        }
    }

    /// Map a numeric id back to a color; unknown ids default to Gray.
    pub fn from_id(id: i64) -> Self {
        match id {
            0 => ColorToken::Blue,
            1 => ColorToken::Red,
            2 => ColorToken::Gray,
            3 => ColorToken::Purple,
            _ => ColorToken::Gray,
        }
    }

    /// Single-letter form used by the edit dialog and overlay text.
    pub fn letter(self) -> &'static str {
        match self {
            ColorToken::Blue => "B",
            ColorToken::Red => "R",
            ColorToken::Gray => "G",
            ColorToken::Purple => "P",
        }
    }

    /// Full uppercase name.
    pub fn name(self) -> &'static str {
        match self {
            ColorToken::Blue => "BLUE",
            ColorToken::Red => "RED",
            ColorToken::Gray => "GRAY",
            ColorToken::Purple => "PURPLE",
        }
    }

    /// Canonicalize a numeric id, letter, or name; unrecognized input is Gray.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if let Ok(id) = trimmed.parse::<i64>() {
            return Self::from_id(id);
        }
        match trimmed.to_ascii_uppercase().as_str() {
            "B" | "BLUE" => ColorToken::Blue,
            "R" | "RED" => ColorToken::Red,
            "G" | "GRAY" => ColorToken::Gray,
            "P" | "PURPLE" => ColorToken::Purple,
            _ => ColorToken::Gray,
        }
    }

    /// All colors in id order.
    pub fn all() -> &'static [ColorToken] {
        &[
            ColorToken::Blue,
            ColorToken::Red,
            ColorToken::Gray,
            ColorToken::Purple,
        ]
    }
}

/// Normalize a class token to the canonical vocabulary.
///
/// `G`, `O`, and the digits `1`-`4` pass through uppercased; `BS`/`BB` are
/// case-corrected to `Bs`/`Bb`. The vocabulary is open: anything else passes
/// through verbatim (trimmed).
pub fn normalize_class_token(raw: &str) -> String {
    let s = raw.trim();
    let upper = s.to_ascii_uppercase();
    match upper.as_str() {
        "G" | "O" | "1" | "2" | "3" | "4" => upper,
        "BS" => "Bs".to_string(),
        "BB" => "Bb".to_string(),
        _ => s.to_string(),
    }
}
