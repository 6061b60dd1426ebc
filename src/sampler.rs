use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::color::{FillColor, Lab};
use super::grid::Point;
use super::scale::ColorScale;

/// How a normalized centroid is turned into a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleMode {
    /// Color depends on horizontal position only. The vertical coordinate
    /// is computed but does not reach the result.
    #[default]
    OneAxis,
    /// Averages (in L*a*b*) the scale at the normalized x and at the
    /// normalized y.
    TwoAxis,
}

/// Arithmetic mean of the three vertices.
pub fn centroid(vertices: &[Point; 3]) -> Point2<f64> {
    let [a, b, c] = vertices;
    Point2::new(
        (a.x as f64 + b.x as f64 + c.x as f64) / 3.,
        (a.y as f64 + b.y as f64 + c.y as f64) / 3.,
    )
}

/// Colors triangles by where their centroid falls on the canvas.
#[derive(Debug, Clone)]
pub struct Sampler {
    pub scale: ColorScale,
    pub canvas: Bounds,
    pub mode: SampleMode,
}

impl Sampler {
    pub fn new(scale: ColorScale, canvas: Bounds, mode: SampleMode) -> Sampler {
        Sampler { scale, canvas, mode }
    }

    /// Color at an already normalized position.
    pub fn color_at(&self, x: f64, y: f64) -> Lab {
        let cx = self.scale.sample(x);
        match self.mode {
            SampleMode::OneAxis => Lab::mix(cx, cx, 0.5),
            SampleMode::TwoAxis => Lab::mix(cx, self.scale.sample(y), 0.5),
        }
    }

    pub fn fill(&self, vertices: &[Point; 3]) -> FillColor {
        let n = self.canvas.normalize(&centroid(vertices));
        FillColor(self.color_at(n.x, n.y).to_rgb8())
    }
}
