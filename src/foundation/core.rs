use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::foundation::error::{StudioError, StudioResult};

pub use kurbo::{Point, Size, Vec2};

/// Output frame dimensions in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> StudioResult<Self> {
        if width == 0 || height == 0 {
            return Err(StudioError::validation("frame width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// The larger of the two edges, in pixels.
    pub fn max_edge(self) -> u32 {
        self.width.max(self.height)
    }
}

/// An opaque sRGB color, serialized as a `#rrggbb` hex string.
///
/// Shorthand `#rgb` input is expanded per channel (`#abc` -> `#aabbcc`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pair the color with a straight-alpha opacity in `0..=1`.
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha.clamp(0.0, 1.0),
        }
    }
}

impl FromStr for Rgb {
    type Err = StudioError;

    fn from_str(s: &str) -> StudioResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(StudioError::validation("hex color must be ascii"));
        }

        fn hex_byte(pair: &str) -> StudioResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| StudioError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        fn expand_nibble(n: &str) -> String {
            format!("{n}{n}")
        }

        let full = match s.len() {
            3 => {
                let mut out = String::with_capacity(6);
                for i in 0..3 {
                    out.push_str(&expand_nibble(&s[i..i + 1]));
                }
                out
            }
            6 => s.to_owned(),
            _ => {
                return Err(StudioError::validation(
                    "hex color must be #rgb or #rrggbb (case-insensitive)",
                ));
            }
        };

        Ok(Self {
            r: hex_byte(&full[0..2])?,
            g: hex_byte(&full[2..4])?,
            b: hex_byte(&full[4..6])?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl serde::Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An sRGB color with straight alpha, as handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}
