use num_traits::clamp;
use rgb::RGB8;

use super::color::Lab;
use super::error::ConfigError;

/// Piecewise-linear color ramp over `[0, 1]`, interpolated in L*a*b*.
///
/// Stops are evenly spaced: with `n` colors, color `i` sits at
/// `i / (n - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<Lab>,
}

impl ColorScale {
    pub fn new(colors: &[RGB8]) -> Result<ColorScale, ConfigError> {
        if colors.len() < 2 {
            return Err(ConfigError::GradientStops(colors.len()));
        }
        Ok(ColorScale::from_display(colors))
    }

    pub(crate) fn from_display(colors: &[RGB8]) -> ColorScale {
        ColorScale { stops: colors.iter().map(|&c| Lab::from_rgb(c)).collect() }
    }

    /// Color at `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> Lab {
        let segments = self.stops.len() - 1;
        let tn = clamp(t, 0., 1.) * segments as f64;
        let i = tn.trunc() as usize;
        if i < segments {
            Lab::mix(self.stops[i], self.stops[i + 1], tn.fract())
        } else {
            self.stops[segments]
        }
    }

    pub fn sample_rgb8(&self, t: f64) -> RGB8 {
        self.sample(t).to_rgb8()
    }
}

/// Builds a [`ColorScale`] through `colors`.
pub fn build_color_scale(colors: &[RGB8]) -> Result<ColorScale, ConfigError> {
    ColorScale::new(colors)
}
