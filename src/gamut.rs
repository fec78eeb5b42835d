use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CueError, CueResult};
use crate::types::{ChromaticityPoint, XY};

/// Edge distances closer than this are considered equal when projecting.
pub const TIE_TOLERANCE: f64 = 1e-12;

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColorGamut {
    pub red: XY,
    pub green: XY,
    pub blue: XY,
}

impl ColorGamut {
    pub const GAMUT_A: Self = Self {
        red: XY { x: 0.704, y: 0.296 },
        green: XY {
            x: 0.2151,
            y: 0.7106,
        },
        blue: XY { x: 0.138, y: 0.08 },
    };

    pub const GAMUT_B: Self = Self {
        red: XY { x: 0.675, y: 0.322 },
        green: XY {
            x: 0.4091,
            y: 0.518,
        },
        blue: XY { x: 0.167, y: 0.04 },
    };

    pub const GAMUT_C: Self = Self {
        red: XY {
            x: 0.6915,
            y: 0.3038,
        },
        green: XY {
            x: 0.1700,
            y: 0.7000,
        },
        blue: XY {
            x: 0.1532,
            y: 0.0475,
        },
    };

    pub const FULL: Self = Self {
        red: XY { x: 1.0, y: 0.0 },
        green: XY { x: 0.0, y: 1.0 },
        blue: XY { x: 0.0, y: 0.0 },
    };

    /// Triangle edges in projection order: red->green, green->blue, blue->red.
    #[must_use]
    pub const fn edges(&self) -> [(XY, XY); 3] {
        [
            (self.red, self.green),
            (self.green, self.blue),
            (self.blue, self.red),
        ]
    }

    fn longest_edge_squared(&self) -> f64 {
        self.edges()
            .iter()
            .map(|&(a, b)| (b - a).dot(b - a))
            .fold(0.0, f64::max)
    }

    #[allow(clippy::suboptimal_flops)]
    fn barycentric_denominator(&self) -> f64 {
        let Self { red, green, blue } = *self;
        (green.y - blue.y) * (red.x - blue.x) + (blue.x - green.x) * (red.y - blue.y)
    }
}

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GamutType {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
    #[serde(alias = "c")]
    C,
    #[serde(rename = "full", alias = "Full")]
    Full,
}

impl GamutType {
    #[must_use]
    pub const fn color_gamut(self) -> ColorGamut {
        match self {
            Self::A => ColorGamut::GAMUT_A,
            Self::B => ColorGamut::GAMUT_B,
            Self::C => ColorGamut::GAMUT_C,
            Self::Full => ColorGamut::FULL,
        }
    }
}

impl FromStr for GamutType {
    type Err = CueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "full" => Ok(Self::Full),
            _ => Err(CueError::UnknownGamut(s.to_string())),
        }
    }
}

impl fmt::Display for GamutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::Full => "full",
        };
        f.write_str(name)
    }
}

/// A color gamut that has been checked to span a non-degenerate triangle.
///
/// Validation happens once, in [`Gamut::new`], so per-color operations
/// never fail.
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct Gamut {
    vertices: ColorGamut,
    denominator: f64,
}

impl Gamut {
    pub fn new(vertices: ColorGamut) -> CueResult<Self> {
        let finite = [vertices.red, vertices.green, vertices.blue]
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite());

        let denominator = vertices.barycentric_denominator();

        // doubled area, relative to the triangle's own scale
        let tolerance = 4.0 * f64::EPSILON * vertices.longest_edge_squared();

        if !finite || denominator.abs() <= tolerance {
            return Err(CueError::DegenerateGamut {
                area: denominator.abs() / 2.0,
            });
        }

        Ok(Self {
            vertices,
            denominator,
        })
    }

    #[must_use]
    pub const fn vertices(&self) -> &ColorGamut {
        &self.vertices
    }

    /// Returns true if `xy` lies inside the triangle or on its boundary.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn contains(&self, xy: XY) -> bool {
        let ColorGamut { red, green, blue } = self.vertices;

        let l1 = ((green.y - blue.y) * (xy.x - blue.x) + (blue.x - green.x) * (xy.y - blue.y))
            / self.denominator;
        let l2 = ((blue.y - red.y) * (xy.x - blue.x) + (red.x - blue.x) * (xy.y - blue.y))
            / self.denominator;
        let l3 = 1.0 - l1 - l2;

        [l1, l2, l3].iter().all(|l| (0.0..=1.0).contains(l))
    }

    /// Returns `point` unchanged if it is inside the gamut, otherwise moves
    /// it to the nearest position on the triangle boundary.
    ///
    /// On equal distances the earlier edge wins, in the order given by
    /// [`ColorGamut::edges`].
    #[must_use]
    pub fn project(&self, point: ChromaticityPoint) -> ChromaticityPoint {
        if self.contains(point.xy()) {
            return point;
        }

        let res = point.with_xy(self.nearest_on_boundary(point.xy()));
        log::trace!("Color {} outside gamut, using {}", point.xy(), res.xy());
        res
    }

    /// Maps `point` to a reproducible color. Same as [`Gamut::project`].
    #[must_use]
    pub fn clamp(&self, point: ChromaticityPoint) -> ChromaticityPoint {
        self.project(point)
    }

    fn nearest_on_boundary(&self, xy: XY) -> XY {
        let [first, rest @ ..] = self.vertices.edges().map(|(a, b)| {
            let candidate = closest_on_segment(xy, a, b);
            (candidate, distance(xy, candidate))
        });

        let (closest, _) = rest.into_iter().fold(first, |best, cand| {
            if cand.1 < best.1 - TIE_TOLERANCE {
                cand
            } else {
                best
            }
        });

        closest
    }
}

impl From<GamutType> for Gamut {
    fn from(value: GamutType) -> Self {
        let vertices = value.color_gamut();
        Self {
            vertices,
            denominator: vertices.barycentric_denominator(),
        }
    }
}

impl TryFrom<ColorGamut> for Gamut {
    type Error = CueError;

    fn try_from(value: ColorGamut) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Closest point to `point` on the segment from `a` to `b`.
#[must_use]
pub fn closest_on_segment(point: XY, a: XY, b: XY) -> XY {
    let ab = b - a;
    let len2 = ab.dot(ab);

    // zero-length edge
    if len2 <= 0.0 {
        return a;
    }

    let t = ((point - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

#[must_use]
pub fn distance(a: XY, b: XY) -> f64 {
    let d = a - b;
    d.x.hypot(d.y)
}
