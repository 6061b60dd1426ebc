use std::fmt;

use rgb::{RGB, RGB8};
use serde::{Serialize, Serializer};

use super::error::ColorError;

// D65 reference white.
const XN: f64 = 0.950470;
const YN: f64 = 1.0;
const ZN: f64 = 1.088830;

const T0: f64 = 4. / 29.;
const T1: f64 = 6. / 29.;
const T2: f64 = 3. * T1 * T1;
const T3: f64 = T1 * T1 * T1;

/// A color in CIE L*a*b* (D65, sRGB primaries).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness, 0 to 100.
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

fn rgb_xyz(c: f64) -> f64 {
    let c = c / 255.;
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

fn xyz_lab(t: f64) -> f64 {
    if t > T3 { t.cbrt() } else { t / T2 + T0 }
}

fn lab_xyz(t: f64) -> f64 {
    if t > T1 { t * t * t } else { T2 * (t - T0) }
}

fn xyz_rgb(c: f64) -> f64 {
    255. * if c <= 0.00304 { 12.92 * c } else { 1.055 * c.powf(1. / 2.4) - 0.055 }
}

impl Lab {
    pub fn new(l: f64, a: f64, b: f64) -> Lab {
        Lab { l, a, b }
    }

    pub fn from_rgb(c: RGB8) -> Lab {
        let r = rgb_xyz(c.r as f64);
        let g = rgb_xyz(c.g as f64);
        let b = rgb_xyz(c.b as f64);
        let x = xyz_lab((0.4124564 * r + 0.3575761 * g + 0.1804375 * b) / XN);
        let y = xyz_lab((0.2126729 * r + 0.7151522 * g + 0.0721750 * b) / YN);
        let z = xyz_lab((0.0193339 * r + 0.1191920 * g + 0.9503041 * b) / ZN);
        Lab {
            l: f64::max(0., 116. * y - 16.),
            a: 500. * (x - y),
            b: 200. * (y - z),
        }
    }

    /// sRGB channels in \[0, 255\], not clipped: colors outside the gamut
    /// come back with channels outside that range.
    pub fn to_rgb(&self) -> RGB<f64> {
        let fy = (self.l + 16.) / 116.;
        let fx = fy + self.a / 500.;
        let fz = fy - self.b / 200.;
        let x = XN * lab_xyz(fx);
        let y = YN * lab_xyz(fy);
        let z = ZN * lab_xyz(fz);
        RGB {
            r: xyz_rgb(3.2404542 * x - 1.5371385 * y - 0.4985314 * z),
            g: xyz_rgb(-0.9692660 * x + 1.8760108 * y + 0.0415560 * z),
            b: xyz_rgb(0.0556434 * x - 0.2040259 * y + 1.0572252 * z),
        }
    }

    /// Display color: clipped to the gamut and rounded.
    pub fn to_rgb8(&self) -> RGB8 {
        let c = self.to_rgb();
        let q = |v: f64| v.clamp(0., 255.).round() as u8;
        RGB8 { r: q(c.r), g: q(c.g), b: q(c.b) }
    }

    /// Linear interpolation, `t == 0.` giving `start` and `t == 1.` `end`.
    pub fn mix(start: Lab, end: Lab, t: f64) -> Lab {
        Lab {
            l: start.l + t * (end.l - start.l),
            a: start.a + t * (end.a - start.a),
            b: start.b + t * (end.b - start.b),
        }
    }
}

impl From<RGB8> for Lab {
    fn from(c: RGB8) -> Lab {
        Lab::from_rgb(c)
    }
}

/// Parses `#rgb` or `#rrggbb` (the `#` is optional).
pub fn parse_hex(src: &str) -> Result<RGB8, ColorError> {
    let err = || ColorError::InvalidHex(src.to_owned());
    let digits = src.strip_prefix('#').unwrap_or(src);
    if !digits.is_ascii() {
        return Err(err());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
    match digits.len() {
        3 => {
            let c: Vec<u8> = digits
                .chars()
                .map(|d| d.to_digit(16).map(|v| v as u8 * 17).ok_or_else(err))
                .collect::<Result<_, _>>()?;
            Ok(RGB8::new(c[0], c[1], c[2]))
        }
        6 => Ok(RGB8::new(
            channel(&digits[0 .. 2])?,
            channel(&digits[2 .. 4])?,
            channel(&digits[4 .. 6])?,
        )),
        _ => Err(err()),
    }
}

pub fn to_hex(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

pub fn to_css(c: RGB8) -> String {
    format!("rgb({},{},{})", c.r, c.g, c.b)
}

/// The fill of one triangle. Displays and serializes as a CSS color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FillColor(pub RGB8);

impl FillColor {
    pub fn rgb(&self) -> RGB8 {
        self.0
    }
}

impl fmt::Display for FillColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_css(self.0))
    }
}

impl Serialize for FillColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
