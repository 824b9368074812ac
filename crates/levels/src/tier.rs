use std::fmt;
use std::str::FromStr;

use structure::candle::Timeframe;
use thiserror::Error;

/// Largest accepted instrument precision
pub const MAX_DIGITS: u32 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tier {
    Short,
    Medium,
    Long,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Short, Tier::Medium, Tier::Long];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Short => "short",
            Tier::Medium => "medium",
            Tier::Long => "long",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{tier} tier: invalid color '{value}'")]
    InvalidColor { tier: Tier, value: String },

    #[error("{tier} tier: thickness must be >= 1")]
    ZeroThickness { tier: Tier },

    #[error("price digits {digits} exceed maximum of {max}")]
    DigitsTooLarge { digits: u32, max: u32 },

    #[error("unknown line style '{0}'")]
    UnknownStyle(String),
}

/// ARGB color
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// `#RRGGBB`, `#AARRGGBB` or a named color (case-insensitive).
    /// Alpha is always forced to opaque.
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        let c = match s.strip_prefix('#') {
            Some(hex) => parse_hex(hex)?,
            None => named(s)?,
        };
        Some(Color { a: 255, ..c })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color {
            a: byte(0)?,
            r: byte(2)?,
            g: byte(4)?,
            b: byte(6)?,
        }),
        _ => None,
    }
}

fn named(name: &str) -> Option<Color> {
    let c = match name.to_ascii_lowercase().as_str() {
        "red" => Color::rgb(255, 0, 0),
        "yellow" => Color::rgb(255, 255, 0),
        "blue" => Color::rgb(0, 0, 255),
        "green" => Color::rgb(0, 128, 0),
        "lime" => Color::rgb(0, 255, 0),
        "white" => Color::rgb(255, 255, 255),
        "black" => Color::rgb(0, 0, 0),
        "orange" => Color::rgb(255, 165, 0),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "silver" => Color::rgb(192, 192, 192),
        "purple" => Color::rgb(128, 0, 128),
        "magenta" | "fuchsia" => Color::rgb(255, 0, 255),
        "cyan" | "aqua" => Color::rgb(0, 255, 255),
        "navy" => Color::rgb(0, 0, 128),
        "teal" => Color::rgb(0, 128, 128),
        "maroon" => Color::rgb(128, 0, 0),
        "olive" => Color::rgb(128, 128, 0),
        "gold" => Color::rgb(255, 215, 0),
        "pink" => Color::rgb(255, 192, 203),
        "brown" => Color::rgb(165, 42, 42),
        "crimson" => Color::rgb(220, 20, 60),
        "dodgerblue" => Color::rgb(30, 144, 255),
        _ => return None,
    };
    Some(c)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dots,
    DotsRare,
    DotsVeryRare,
    Lines,
    LinesDots,
}

impl FromStr for LineStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let style = match s.trim().to_ascii_lowercase().as_str() {
            "solid" => LineStyle::Solid,
            "dots" => LineStyle::Dots,
            "dotsrare" => LineStyle::DotsRare,
            "dotsveryrare" => LineStyle::DotsVeryRare,
            "lines" => LineStyle::Lines,
            "linesdots" => LineStyle::LinesDots,
            _ => return Err(ConfigError::UnknownStyle(s.to_string())),
        };
        Ok(style)
    }
}

/// How a tier's lines are drawn
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LineAppearance {
    pub color: Color,
    pub thickness: u32,
    pub style: LineStyle,
}

/// Raw per-tier input, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSettings {
    pub timeframe: Timeframe,
    pub color: String,
    pub thickness: u32,
    pub style: LineStyle,
}

impl TierSettings {
    /// Short = Daily/Red, Medium = Weekly/Yellow, Long = Monthly/Blue
    pub fn defaults(tier: Tier) -> Self {
        let (timeframe, color) = match tier {
            Tier::Short => (Timeframe::Daily, "Red"),
            Tier::Medium => (Timeframe::Weekly, "Yellow"),
            Tier::Long => (Timeframe::Monthly, "Blue"),
        };
        Self {
            timeframe,
            color: color.to_string(),
            thickness: 1,
            style: LineStyle::Solid,
        }
    }
}

/// Validated, immutable tier configuration
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TierConfig {
    pub tier: Tier,
    pub timeframe: Timeframe,
    pub appearance: LineAppearance,
}

impl TierConfig {
    pub fn from_settings(tier: Tier, settings: &TierSettings) -> Result<Self, ConfigError> {
        let color = Color::parse(&settings.color).ok_or_else(|| ConfigError::InvalidColor {
            tier,
            value: settings.color.clone(),
        })?;

        if settings.thickness == 0 {
            return Err(ConfigError::ZeroThickness { tier });
        }

        Ok(Self {
            tier,
            timeframe: settings.timeframe,
            appearance: LineAppearance {
                color,
                thickness: settings.thickness,
                style: settings.style,
            },
        })
    }

    /// Identifier embedded in line names. Lines are keyed by timeframe,
    /// so two tiers on the same timeframe share a namespace.
    pub fn tier_id(&self) -> &'static str {
        self.timeframe.label()
    }
}

/// Validates all three tiers and the price precision at once; nothing is
/// returned unless every part is valid.
pub fn validate_tiers(
    settings: &[TierSettings; 3],
    digits: u32,
) -> Result<[TierConfig; 3], ConfigError> {
    if digits > MAX_DIGITS {
        return Err(ConfigError::DigitsTooLarge {
            digits,
            max: MAX_DIGITS,
        });
    }

    Ok([
        TierConfig::from_settings(Tier::Short, &settings[0])?,
        TierConfig::from_settings(Tier::Medium, &settings[1])?,
        TierConfig::from_settings(Tier::Long, &settings[2])?,
    ])
}
