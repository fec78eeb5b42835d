//! sRGB to CIE 1931 xy conversion.
//!
//! Channels are gamma-decoded with the sRGB curve, mapped to XYZ through
//! the D65 sRGB matrix, and normalized to chromaticity. The Y component is
//! kept as brightness.

use crate::gamut::Gamut;
use crate::types::{ChromaticityPoint, Rgb};

/// sRGB to XYZ (D65), row-major.
pub const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];

/// Inverse sRGB transfer function, for `v` in `[0, 1]`.
#[must_use]
pub fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn rgb_to_xyz(rgb: Rgb) -> [f64; 3] {
    let lin = [rgb.r, rgb.g, rgb.b].map(|c| srgb_to_linear(f64::from(c) / 255.0));

    SRGB_TO_XYZ.map(|row| row[0] * lin[0] + row[1] * lin[1] + row[2] * lin[2])
}

/// Normalizes tristimulus values to xy, keeping Y as brightness.
///
/// Black (X+Y+Z = 0) maps to the origin.
#[must_use]
pub fn xyz_to_chromaticity(xyz: [f64; 3]) -> ChromaticityPoint {
    let [x, y, z] = xyz;
    let sum = x + y + z;

    if sum <= 0.0 {
        return ChromaticityPoint::new(0.0, 0.0, y);
    }

    ChromaticityPoint::new(x / sum, y / sum, y)
}

/// Chromaticity of `rgb`, without any gamut mapping.
#[must_use]
pub fn rgb_to_chromaticity(rgb: Rgb) -> ChromaticityPoint {
    xyz_to_chromaticity(rgb_to_xyz(rgb))
}

/// Chromaticity of `rgb`, clamped into `gamut`.
///
/// The black point is returned as-is, since it has no hue to preserve.
#[must_use]
pub fn rgb_to_xy(rgb: Rgb, gamut: &Gamut) -> ChromaticityPoint {
    let xyz = rgb_to_xyz(rgb);
    let point = xyz_to_chromaticity(xyz);

    if xyz.iter().sum::<f64>() <= 0.0 {
        return point;
    }

    let res = gamut.clamp(point);
    log::debug!("Converted {rgb} to {res}");
    res
}
