use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CueError;

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct XY {
    pub x: f64,
    pub y: f64,
}

impl XY {
    pub const D65_WHITE_POINT: Self = Self {
        x: 0.31271,
        y: 0.32902,
    };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }
}

impl Add for XY {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for XY {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for XY {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<[f64; 2]> for XY {
    fn from(value: [f64; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

impl From<XY> for [f64; 2] {
    fn from(value: XY) -> Self {
        [value.x, value.y]
    }
}

impl fmt::Display for XY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

/// A chromaticity coordinate together with its relative luminance.
///
/// Geometry only ever looks at `x` and `y`; `brightness` is carried along
/// untouched.
#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChromaticityPoint {
    pub x: f64,
    pub y: f64,
    pub brightness: f64,
}

impl ChromaticityPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64, brightness: f64) -> Self {
        Self { x, y, brightness }
    }

    #[must_use]
    pub const fn xy(&self) -> XY {
        XY::new(self.x, self.y)
    }

    #[must_use]
    pub const fn with_xy(self, xy: XY) -> Self {
        Self {
            x: xy.x,
            y: xy.y,
            ..self
        }
    }
}

impl fmt::Display for ChromaticityPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={:.4} y={:.4} brightness={:.4}",
            self.x, self.y, self.brightness
        )
    }
}

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn parse_hex(s: &str) -> Option<Self> {
        if s.len() != 6 || !s.bytes().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    fn parse_decimal(s: &str) -> Option<Self> {
        let mut parts = s.split(',').map(str::trim).map(|p| {
            if p.is_empty() || !p.bytes().all(|c| c.is_ascii_digit()) {
                return None;
            }
            p.parse::<u8>().ok()
        });
        let (Some(Some(r)), Some(Some(g)), Some(Some(b)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        Some(Self::new(r, g, b))
    }
}

impl FromStr for Rgb {
    type Err = CueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let res = if let Some(hex) = s.strip_prefix('#') {
            Self::parse_hex(hex)
        } else if s.contains(',') {
            Self::parse_decimal(s)
        } else {
            Self::parse_hex(s)
        };

        res.ok_or_else(|| CueError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
