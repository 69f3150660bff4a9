//! Shared type definitions and newtypes

use crate::colour::Rgb;
use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static HEX_COLOUR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hex colour pattern is valid")
});

/// Server-assigned identifier; the backend hands out either numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Numeric(i64),
    Text(String),
}

impl Id {
    /// Parse user input: all digits become a numeric id, anything else non-empty stays text
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidData("identifier must not be empty".to_string()));
        }
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<i64>() {
                return Ok(Id::Numeric(n));
            }
        }
        Ok(Id::Text(raw.to_string()))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Numeric(n) => write!(f, "{}", n),
            Id::Text(s) => f.write_str(s),
        }
    }
}

/// Tier identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(pub Id);

/// Coupon identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponId(pub Id);

/// Program identifier, supplied by whichever screen starts coupon creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(pub Id);

impl TierId {
    /// Placeholder for a tier the backend created without echoing its id
    pub fn unassigned() -> Self {
        TierId(Id::Text(String::new()))
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(&self.0, Id::Text(s) if s.is_empty())
    }
}

impl FromStr for TierId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Id::parse(s).map(TierId)
    }
}

impl FromStr for ProgramId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Id::parse(s).map(ProgramId)
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for CouponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Owning partner; always kept as text because it comes out of the client store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerId(String);

impl PartnerId {
    pub fn new(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidData("partner id must not be empty".to_string()));
        }
        Ok(PartnerId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `#`-prefixed hex colour with 3 or 6 hex digits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColour(String);

impl HexColour {
    pub fn parse(raw: &str) -> Result<Self> {
        if HEX_COLOUR.is_match(raw) {
            Ok(HexColour(raw.to_string()))
        } else {
            Err(Error::InvalidData(format!("'{}' is not a hex colour", raw)))
        }
    }

    /// Whether `raw` matches the accepted hex pattern
    pub fn is_valid(raw: &str) -> bool {
        HEX_COLOUR.is_match(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Channel values, expanding `#abc` shorthand to `#aabbcc`
    pub fn rgb(&self) -> Rgb {
        let digits = &self.0[1..];
        let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
        if digits.len() == 3 {
            let nibble = |i: usize| channel(&digits[i..=i]) * 17;
            Rgb::new(nibble(0), nibble(1), nibble(2))
        } else {
            Rgb::new(
                channel(&digits[0..2]),
                channel(&digits[2..4]),
                channel(&digits[4..6]),
            )
        }
    }
}

impl Default for HexColour {
    fn default() -> Self {
        HexColour("#FFFFFF".to_string())
    }
}

impl TryFrom<String> for HexColour {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        HexColour::parse(&value)
    }
}

impl From<HexColour> for String {
    fn from(colour: HexColour) -> Self {
        colour.0
    }
}

impl FromStr for HexColour {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HexColour::parse(s)
    }
}

impl fmt::Display for HexColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
