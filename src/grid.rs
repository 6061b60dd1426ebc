use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::random::UnitRandom;

/// A generated vertex. Coordinates are floored to whole canvas units.
pub type Point = Point2<i32>;

/// Upper bound on the points a single layout may generate.
pub const MAX_POINTS: usize = 1 << 20;

/// Quantities derived from the canvas size, cell size and variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
    pub cells_x: usize,
    pub cells_y: usize,
    /// Margin generated on each side, left and right.
    pub bleed_x: f64,
    /// Margin generated on each side, top and bottom.
    pub bleed_y: f64,
    /// Largest jitter applied along each axis.
    pub variance_point: f64,
}

impl GridLayout {
    /// Callers are expected to have validated that `width`, `height` and
    /// `cell_size` are positive.
    pub fn new(width: f64, height: f64, cell_size: f64, variance: f64) -> GridLayout {
        let cells_x = ((width + 4. * cell_size) / cell_size).floor();
        let cells_y = ((height + 4. * cell_size) / cell_size).floor();
        GridLayout {
            width,
            height,
            cell_size,
            cells_x: cells_x as usize,
            cells_y: cells_y as usize,
            bleed_x: (cells_x * cell_size - width) / 2.,
            bleed_y: (cells_y * cell_size - height) / 2.,
            variance_point: cell_size * variance / 2.,
        }
    }

    /// Point count before any float drift in the generation loop.
    pub fn point_count(&self) -> f64 {
        let cells = |size: f64| ((size + 4. * self.cell_size) / self.cell_size).floor();
        cells(self.width) * cells(self.height)
    }

    /// Largest coordinate magnitude a generated point can take, with a
    /// cell of slack for loop drift.
    pub fn reach(&self) -> f64 {
        let far = (self.width + self.bleed_x).max(self.height + self.bleed_y);
        far + self.cell_size + self.variance_point.abs()
    }

    pub fn points(&self, rand: &mut impl UnitRandom) -> Vec<Point> {
        generate_grid(
            self.width,
            self.height,
            self.bleed_x,
            self.bleed_y,
            self.cell_size,
            self.variance_point,
            rand,
        )
    }
}

/// Places one jittered point per cell over
/// `[-bleed_x, width + bleed_x) x [-bleed_y, height + bleed_y)`.
///
/// Columns are visited left to right and each column top to bottom. Each
/// point draws its x jitter, then its y jitter, both uniform in
/// `[-variance, variance)`.
pub fn generate_grid(
    width: f64,
    height: f64,
    bleed_x: f64,
    bleed_y: f64,
    cell_size: f64,
    variance: f64,
    rand: &mut impl UnitRandom,
) -> Vec<Point> {
    let w = width + bleed_x;
    let h = height + bleed_y;
    let half_cell = cell_size * 0.5;
    let double_v = variance * 2.;
    let negative_v = -variance;

    let mut points = Vec::new();
    let mut i = -bleed_x;
    while i < w {
        let mut j = -bleed_y;
        while j < h {
            let x = i + half_cell + (rand.next_unit() * double_v + negative_v);
            let y = j + half_cell + (rand.next_unit() * double_v + negative_v);
            points.push(Point::new(x.floor() as i32, y.floor() as i32));
            j += cell_size;
        }
        i += cell_size;
    }

    points
}
