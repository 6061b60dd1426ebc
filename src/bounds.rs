use nalgebra::Point2;
use num_traits::clamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Bounds { x_min, x_max, y_min, y_max }
    }

    /// The visible area `[0, width] x [0, height]`.
    pub fn canvas(width: f64, height: f64) -> Self {
        Bounds::new(0., width, 0., height)
    }

    pub fn contains(&self, p: &Point2<f64>) -> bool {
        let x = p[0];
        let y = p[1];
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Maps `p` into the unit square, clamping points that lie outside.
    pub fn normalize(&self, p: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            clamp((p[0] - self.x_min) / self.width(), 0., 1.),
            clamp((p[1] - self.y_min) / self.height(), 0., 1.),
        )
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds::canvas(600., 300.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps() {
        let b = Bounds::canvas(600., 300.);
        assert_eq!(b.normalize(&Point2::new(-50., 150.)), Point2::new(0., 0.5));
        assert_eq!(b.normalize(&Point2::new(10_000., -1.)), Point2::new(1., 0.));
        assert_eq!(b.normalize(&Point2::new(150., 300.)), Point2::new(0.25, 1.));
    }

    #[test]
    fn contains_edges() {
        let b = Bounds::new(-1., 1., -2., 2.);
        assert!(b.contains(&Point2::new(1., -2.)));
        assert!(!b.contains(&Point2::new(1.01, 0.)));
        assert_eq!((b.width(), b.height()), (2., 4.));
    }
}
