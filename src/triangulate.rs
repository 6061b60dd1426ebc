use delaunator::Point as DPoint;
use tracing::trace;

use super::error::DegenerateInputError;
use super::grid::Point;

/// Three indices into the point array a triangulation was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle(pub [usize; 3]);

impl Triangle {
    pub fn vertices(&self, points: &[Point]) -> [Point; 3] {
        self.0.map(|i| points[i])
    }

    /// Twice the signed area, positive when the vertices turn
    /// counter-clockwise in a y-up frame.
    pub fn doubled_area(&self, points: &[Point]) -> i64 {
        let [a, b, c] = self.vertices(points);
        orient(a, b, c)
    }

    /// Whether `p` lies strictly inside the circle through the three
    /// vertices. Exact for integer coordinates.
    pub fn circumcircle_contains(&self, points: &[Point], p: Point) -> bool {
        let [a, b, c] = self.vertices(points);
        let rows = [a, b, c].map(|v| {
            let dx = (v.x - p.x) as i128;
            let dy = (v.y - p.y) as i128;
            (dx, dy, dx * dx + dy * dy)
        });
        let [(ax, ay, al), (bx, by, bl), (cx, cy, cl)] = rows;
        let det = ax * (by * cl - bl * cy) - ay * (bx * cl - bl * cx) + al * (bx * cy - by * cx);
        match orient(a, b, c).signum() {
            1 => det > 0,
            -1 => det < 0,
            _ => false,
        }
    }
}

fn orient(a: Point, b: Point, c: Point) -> i64 {
    let (ax, ay) = (a.x as i64, a.y as i64);
    let (bx, by) = (b.x as i64, b.y as i64);
    let (cx, cy) = (c.x as i64, c.y as i64);
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

/// Turns a point set into triangles covering its convex hull.
pub trait Triangulator {
    fn triangulate(&self, points: &[Point]) -> Result<Vec<Triangle>, DegenerateInputError>;
}

/// Fails for fewer than three points, or when every point lies on one line.
pub fn check_triangulable(points: &[Point]) -> Result<(), DegenerateInputError> {
    if points.len() < 3 {
        return Err(DegenerateInputError::TooFewPoints(points.len()));
    }
    let a = points[0];
    let Some(&b) = points.iter().find(|&&p| p != a) else {
        return Err(DegenerateInputError::Collinear);
    };
    if points.iter().all(|&c| orient(a, b, c) == 0) {
        return Err(DegenerateInputError::Collinear);
    }
    Ok(())
}

/// Delaunay triangulation backed by the `delaunator` sweep-hull algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delaunay;

impl Triangulator for Delaunay {
    fn triangulate(&self, points: &[Point]) -> Result<Vec<Triangle>, DegenerateInputError> {
        check_triangulable(points)?;

        let coords: Vec<DPoint> = points
            .iter()
            .map(|p| DPoint { x: p.x as f64, y: p.y as f64 })
            .collect();
        let result = delaunator::triangulate(&coords);

        // Flat slivers along a collinear hull carry no area and are dropped.
        let triangles: Vec<Triangle> = result
            .triangles
            .chunks_exact(3)
            .map(|t| Triangle([t[0], t[1], t[2]]))
            .filter(|t| t.doubled_area(points) != 0)
            .collect();
        trace!(points = points.len(), triangles = triangles.len(), "triangulated");

        if triangles.is_empty() {
            return Err(DegenerateInputError::Collinear);
        }
        Ok(triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn square_gives_two_triangles() {
        let points = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
        let tris = Delaunay.triangulate(&points).unwrap();
        assert_eq!(tris.len(), 2);
        let area: i64 = tris.iter().map(|t| t.doubled_area(&points).abs()).sum();
        assert_eq!(area, 200);
    }

    #[test]
    fn empty_circumcircles() {
        let points = pts(&[(0, 0), (7, 1), (13, -2), (4, 9), (11, 8), (2, 15), (16, 14), (9, 4)]);
        let tris = Delaunay.triangulate(&points).unwrap();
        for t in &tris {
            assert_ne!(t.doubled_area(&points), 0);
            for (k, &p) in points.iter().enumerate() {
                if !t.0.contains(&k) {
                    assert!(!t.circumcircle_contains(&points, p), "{t:?} contains {p:?}");
                }
            }
        }
    }

    #[test]
    fn circumcircle_test() {
        let points = pts(&[(0, 0), (10, 0), (0, 10)]);
        let t = Triangle([0, 1, 2]);
        assert!(t.circumcircle_contains(&points, Point::new(5, 5)));
        assert!(t.circumcircle_contains(&points, Point::new(9, 9)));
        // On the circle.
        assert!(!t.circumcircle_contains(&points, Point::new(10, 10)));
        assert!(!t.circumcircle_contains(&points, Point::new(11, 11)));
        assert!(Triangle([0, 2, 1]).circumcircle_contains(&points, Point::new(5, 5)));
    }

    #[test]
    fn too_few_points() {
        assert_eq!(Delaunay.triangulate(&[]), Err(DegenerateInputError::TooFewPoints(0)));
        assert_eq!(
            Delaunay.triangulate(&pts(&[(0, 0), (1, 1)])),
            Err(DegenerateInputError::TooFewPoints(2))
        );
    }

    #[test]
    fn collinear_points() {
        let line = pts(&[(0, 0), (1, 2), (2, 4), (-3, -6)]);
        assert_eq!(Delaunay.triangulate(&line), Err(DegenerateInputError::Collinear));
        let same = pts(&[(5, 5), (5, 5), (5, 5)]);
        assert_eq!(Delaunay.triangulate(&same), Err(DegenerateInputError::Collinear));
    }
}
