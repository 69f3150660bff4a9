//! Tier badge colour helpers

use crate::types::HexColour;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Perceived luminance above which dark text is used
pub const LUMINANCE_THRESHOLD: f64 = 0.5;

/// A resolved 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceived luminance in [0, 1]
    pub fn luminance(&self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) / 255.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Text colour picked for legibility on a tier colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColour {
    Black,
    White,
}

impl TextColour {
    pub fn as_hex(&self) -> &'static str {
        match self {
            TextColour::Black => "#000000",
            TextColour::White => "#ffffff",
        }
    }

    pub fn rgb(&self) -> Rgb {
        match self {
            TextColour::Black => Rgb::new(0, 0, 0),
            TextColour::White => Rgb::new(255, 255, 255),
        }
    }
}

/// Lighten a colour by `percent` of full scale; every channel saturates at 255
pub fn lighten(colour: &HexColour, percent: f64) -> Rgb {
    let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    // 2.55 points per percent
    let amt = (percent * 255.0 / 100.0).round() as u16;
    let base = colour.rgb();
    let channel = |c: u8| (u16::from(c) + amt).min(255) as u8;
    Rgb::new(channel(base.r), channel(base.g), channel(base.b))
}

/// Black on light colours, white on dark ones
pub fn text_colour(colour: &HexColour) -> TextColour {
    if colour.rgb().luminance() > LUMINANCE_THRESHOLD {
        TextColour::Black
    } else {
        TextColour::White
    }
}
