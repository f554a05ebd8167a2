//! RGB/HSL color handling for ray tinting and UI accent derivation.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 24-bit sRGB color. Source of truth for all ray and glow tinting; every
/// gradient is expressed as this triple with a varying alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` string. The leading marker is optional and hex
    /// digits are case-insensitive. Returns `None` on anything malformed.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Lowercase `#rrggbb` form, the normalized representation used on the
    /// wire and in exported snippets.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Hex form without the leading marker, as stored in query strings.
    pub fn to_bare_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // achromatic
            return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        } / 6.0;

        Hsl { h: h * 360.0, s: s * 100.0, l: l * 100.0 }
    }

    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = hsl.h / 360.0;
        let s = hsl.s / 100.0;
        let l = hsl.l / 100.0;

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Self { r: v, g: v, b: v };
        }

        fn hue(p: f32, q: f32, mut t: f32) -> f32 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 1.0 / 2.0 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self {
            r: (hue(p, q, h + 1.0 / 3.0) * 255.0).round() as u8,
            g: (hue(p, q, h) * 255.0).round() as u8,
            b: (hue(p, q, h - 1.0 / 3.0) * 255.0).round() as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::parse(&s).ok_or_else(|| D::Error::custom(format!("invalid hex color `{s}`")))
    }
}

/// Hue in degrees [0, 360), saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Accent colors derived from the primary ray color, used only for the
/// surrounding page chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccentPalette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub muted: Rgb,
}

/// Hue-shift and desaturate the primary into secondary/muted accents.
pub fn accent_palette(primary: Rgb) -> AccentPalette {
    let hsl = primary.to_hsl();

    let secondary = Rgb::from_hsl(Hsl {
        h: (hsl.h + 30.0) % 360.0,
        s: (hsl.s * 1.2).min(100.0),
        l: hsl.l.clamp(30.0, 70.0),
    });
    let muted = Rgb::from_hsl(Hsl {
        h: hsl.h,
        s: (hsl.s * 0.4).max(20.0),
        l: (hsl.l * 0.7).clamp(25.0, 45.0),
    });

    AccentPalette { primary, secondary, muted }
}
