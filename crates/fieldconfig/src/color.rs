use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Opaque base color of a palette entry; opacity is applied per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GOLD: Color = Color::rgb(212, 175, 55);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts `#rrggbb`, `#rgb` and `rgb(r, g, b)`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| format!("invalid hex color '{trimmed}'"));
        }

        let lowered = trimmed.to_ascii_lowercase();
        if let Some(body) = lowered
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let channels: Vec<&str> = body.split(',').map(str::trim).collect();
            if channels.len() != 3 {
                return Err(format!("expected three channels in '{trimmed}'"));
            }
            let mut values = [0u8; 3];
            for (slot, channel) in values.iter_mut().zip(&channels) {
                *slot = channel
                    .parse()
                    .map_err(|_| format!("invalid channel '{channel}' in '{trimmed}'"))?;
            }
            return Ok(Color::rgb(values[0], values[1], values[2]));
        }

        Err(format!(
            "unrecognised color '{trimmed}'; expected #rrggbb, #rgb, or rgb(r, g, b)"
        ))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(Color::rgb(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let expand = |idx: usize| {
                u8::from_str_radix(&hex[idx..idx + 1], 16)
                    .ok()
                    .map(|v| v * 17)
            };
            Some(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_notations() {
        assert_eq!("#d4af37".parse::<Color>().unwrap(), Color::GOLD);
        assert_eq!("#FFF".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!(
            "rgb(139, 92, 246)".parse::<Color>().unwrap(),
            Color::rgb(139, 92, 246)
        );
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
        assert!("rgb(1, 2)".parse::<Color>().is_err());
        assert!("rgb(1, 2, 300)".parse::<Color>().is_err());
        assert!("gold".parse::<Color>().is_err());
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Color::rgb(0, 195, 255).to_string(), "#00c3ff");
    }
}
