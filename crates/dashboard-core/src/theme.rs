//! Theme tokens and their resolution.
//!
//! The four user-facing theme preferences (mode, accent, font scale,
//! density) are finite domains here. `ResolvedTokens` is what the stylesheet
//! generator consumes: it never sees raw preference strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Accent applied when nothing valid was chosen.
pub const DEFAULT_ACCENT: &str = "#3b82f6";

/// Parse a hex color string to an RGB tuple. Returns None if invalid.
///
/// Accepts `#rgb`, `#rrggbb` and the same forms without the leading `#`.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let color = color.trim().trim_start_matches('#');

    // Expand shorthand (e.g., "fff" -> "ffffff")
    let color = if color.len() == 3 {
        color.chars().flat_map(|c| [c, c]).collect::<String>()
    } else {
        color.to_string()
    };

    if color.len() != 6 || !color.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&color[0..2], 16).ok()?;
    let g = u8::from_str_radix(&color[2..4], 16).ok()?;
    let b = u8::from_str_radix(&color[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Theme strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the viewer's OS light/dark preference at render time.
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Auto, ThemeMode::Light, ThemeMode::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Auto => "auto",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Human label for settings forms.
    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Auto => "Auto (OS)",
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    /// Lenient lookup. Unknown keys yield `None`, which the stylesheet
    /// generator renders as the light palette with no override.
    pub fn from_key(key: &str) -> Option<Self> {
        key.parse().ok()
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(ThemeMode::Auto),
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(Error::InvalidValue {
                field: "theme mode",
                value: other.to_string(),
                expected: "auto, light, dark",
            }),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font size preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontScale {
    Xs,
    Sm,
    #[default]
    Base,
    Lg,
    Xl,
}

impl FontScale {
    pub const ALL: [FontScale; 5] = [
        FontScale::Xs,
        FontScale::Sm,
        FontScale::Base,
        FontScale::Lg,
        FontScale::Xl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FontScale::Xs => "xs",
            FontScale::Sm => "sm",
            FontScale::Base => "base",
            FontScale::Lg => "lg",
            FontScale::Xl => "xl",
        }
    }

    /// Multiplier applied to the base font size, as emitted into CSS.
    pub fn multiplier(self) -> &'static str {
        match self {
            FontScale::Xs => "0.90",
            FontScale::Sm => "0.95",
            FontScale::Base => "1.00",
            FontScale::Lg => "1.06",
            FontScale::Xl => "1.12",
        }
    }

    /// Lenient lookup: unknown keys fall back to `base`.
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl FromStr for FontScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontScale::ALL
            .into_iter()
            .find(|scale| scale.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidValue {
                field: "font scale",
                value: s.to_string(),
                expected: "xs, sm, base, lg, xl",
            })
    }
}

impl fmt::Display for FontScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical padding preset for interactive controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    #[default]
    Normal,
    Spacious,
}

impl Density {
    pub const ALL: [Density; 3] = [Density::Compact, Density::Normal, Density::Spacious];

    pub fn as_str(self) -> &'static str {
        match self {
            Density::Compact => "compact",
            Density::Normal => "normal",
            Density::Spacious => "spacious",
        }
    }

    /// Vertical padding in pixels.
    pub fn pad_y_px(self) -> u32 {
        match self {
            Density::Compact => 6,
            Density::Normal => 10,
            Density::Spacious => 14,
        }
    }

    /// Lenient lookup: unknown keys fall back to `normal`.
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl FromStr for Density {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Density::ALL
            .into_iter()
            .find(|density| density.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidValue {
                field: "density",
                value: s.to_string(),
                expected: "compact, normal, spacious",
            })
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated accent color: `#` followed by exactly 3 or 6 hex digits.
///
/// The original text is kept verbatim (case included); it is emitted into
/// the stylesheet unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Accent(String);

impl Accent {
    /// Validate free text as an accent. Surrounding whitespace is trimmed.
    pub fn parse(input: &str) -> Option<Self> {
        let candidate = input.trim();
        let well_formed = candidate.starts_with('#') && matches!(candidate.len(), 4 | 7);
        if well_formed && parse_hex_color(candidate).is_some() {
            Some(Self(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Accent {
    fn default() -> Self {
        Self(DEFAULT_ACCENT.to_string())
    }
}

impl TryFrom<String> for Accent {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Accent::parse(&value).ok_or(Error::InvalidValue {
            field: "accent",
            value,
            expected: "a hex color like '#3b82f6' or '#38f'",
        })
    }
}

impl From<Accent> for String {
    fn from(accent: Accent) -> Self {
        accent.0
    }
}

impl FromStr for Accent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Accent::try_from(s.to_string())
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The six named palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub bg_alt: &'static str,
    pub fg: &'static str,
    pub muted: &'static str,
    pub primary: &'static str,
    pub border: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        bg: "#ffffff",
        bg_alt: "#f6f7fb",
        fg: "#111111",
        muted: "#475569",
        primary: "#3b82f6",
        border: "#e5e7eb",
    };

    pub const DARK: Palette = Palette {
        bg: "#0E1117",
        bg_alt: "#151923",
        fg: "#E6E9EF",
        muted: "#a0a3ad",
        primary: "#60a5fa",
        border: "#2a2f3a",
    };

    /// CSS custom properties in declaration order.
    pub fn variables(&self) -> [(&'static str, &'static str); 6] {
        [
            ("--bg", self.bg),
            ("--bg-alt", self.bg_alt),
            ("--fg", self.fg),
            ("--muted", self.muted),
            ("--primary", self.primary),
            ("--border", self.border),
        ]
    }
}

/// Style variables resolved from preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTokens {
    pub accent: Accent,
    pub font_multiplier: &'static str,
    pub pad_y_px: u32,
}

impl ResolvedTokens {
    /// Table lookup for scale and density; the accent passes through.
    pub fn resolve(accent: &Accent, font_scale: FontScale, density: Density) -> Self {
        Self {
            accent: accent.clone(),
            font_multiplier: font_scale.multiplier(),
            pad_y_px: density.pad_y_px(),
        }
    }

    pub fn pad_y(&self) -> String {
        format!("{}px", self.pad_y_px)
    }
}
