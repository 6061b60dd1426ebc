use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use super::{
    bounds::*,
    color::*,
    error::*,
    grid::*,
    palette::*,
    random::*,
    sampler::*,
    triangulate::*,
};

/// One filled triangle, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub color: FillColor,
    pub vertices: [Point; 3],
}

/// Settings for one polytriangle image. Every field has a default, so a
/// config file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyTriangle {
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
    /// Jitter as a fraction of the cell size; `1.` lets a point wander half
    /// a cell in each direction.
    pub variance: f64,
    /// Only used when drawing.
    pub stroke_width: f64,
    /// `None` draws the palette from entropy and is not reproducible.
    pub color_seed: Option<String>,
    /// `None` draws the point field from entropy and is not reproducible.
    pub shape_seed: Option<String>,
    pub gradient_stops: usize,
    /// Let vertical position affect color too.
    pub two_axis: bool,
}

impl Default for PolyTriangle {
    fn default() -> PolyTriangle {
        PolyTriangle {
            width: 600.,
            height: 300.,
            cell_size: 100.,
            variance: 1.,
            stroke_width: 1.5,
            color_seed: None,
            shape_seed: None,
            gradient_stops: DEFAULT_STOPS,
            two_axis: false,
        }
    }
}

/// The geometry and palette of one generation, before coloring.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub layout: GridLayout,
    pub points: Vec<Point>,
    pub triangles: Vec<Triangle>,
    /// Index of the chosen entry in [`BASE_PALETTE`].
    pub palette_index: usize,
    pub gradient: Gradient,
}

impl Mesh {
    pub fn render_items(&self, mode: SampleMode) -> Vec<RenderItem> {
        let canvas = Bounds::canvas(self.layout.width, self.layout.height);
        let sampler = Sampler::new(self.gradient.scale(), canvas, mode);
        self.triangles
            .iter()
            .map(|t| {
                let vertices = t.vertices(&self.points);
                RenderItem { color: sampler.fill(&vertices), vertices }
            })
            .collect()
    }
}

impl PolyTriangle {
    /// Checks the configuration and derives the grid layout from it.
    pub fn validate(&self) -> Result<GridLayout, ConfigError> {
        // Written as negations so NaN is rejected too.
        if !(self.width > 0. && self.width.is_finite()) {
            return Err(ConfigError::Width(self.width));
        }
        if !(self.height > 0. && self.height.is_finite()) {
            return Err(ConfigError::Height(self.height));
        }
        if !(self.cell_size > 0. && self.cell_size.is_finite()) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if !self.variance.is_finite() {
            return Err(ConfigError::Variance(self.variance));
        }
        if self.gradient_stops < 2 {
            return Err(ConfigError::GradientStops(self.gradient_stops));
        }
        let layout = GridLayout::new(self.width, self.height, self.cell_size, self.variance);
        let count = layout.point_count();
        if count > MAX_POINTS as f64 {
            return Err(ConfigError::TooManyPoints(count));
        }
        // Points are stored as i32; anything further out would saturate.
        let reach = layout.reach();
        if reach >= i32::MAX as f64 {
            return Err(ConfigError::Extent(reach));
        }
        Ok(layout)
    }

    pub fn sample_mode(&self) -> SampleMode {
        if self.two_axis { SampleMode::TwoAxis } else { SampleMode::OneAxis }
    }

    pub fn color_stream(&self) -> SeededRandom {
        SeededRandom::new(&Seed::from(self.color_seed.clone()))
    }

    pub fn shape_stream(&self) -> SeededRandom {
        SeededRandom::new(&Seed::from(self.shape_seed.clone()))
    }

    pub fn generate(&self) -> Result<Vec<RenderItem>, GenerateError> {
        self.generate_with(&Delaunay)
    }

    pub fn generate_with(&self, triangulator: &impl Triangulator) -> Result<Vec<RenderItem>, GenerateError> {
        self.validate()?;
        self.generate_from_streams(&mut self.color_stream(), &mut self.shape_stream(), triangulator)
    }

    /// Generates from injected streams. The seeds in `self` are ignored.
    pub fn generate_from_streams(
        &self,
        color_rand: &mut impl UnitRandom,
        shape_rand: &mut impl UnitRandom,
        triangulator: &impl Triangulator,
    ) -> Result<Vec<RenderItem>, GenerateError> {
        let mesh = self.mesh_from_streams(color_rand, shape_rand, triangulator)?;
        let items = mesh.render_items(self.sample_mode());
        debug!(items = items.len(), "colored triangles");
        Ok(items)
    }

    pub fn mesh_with(&self, triangulator: &impl Triangulator) -> Result<Mesh, GenerateError> {
        self.validate()?;
        self.mesh_from_streams(&mut self.color_stream(), &mut self.shape_stream(), triangulator)
    }

    /// Picks a gradient with one draw from `color_rand`, then lays out and
    /// triangulates the point field with two draws per point from
    /// `shape_rand`.
    pub fn mesh_from_streams(
        &self,
        color_rand: &mut impl UnitRandom,
        shape_rand: &mut impl UnitRandom,
        triangulator: &impl Triangulator,
    ) -> Result<Mesh, GenerateError> {
        let layout = self.validate()?;
        let _span = debug_span!(
            "generate",
            width = self.width,
            height = self.height,
            cell_size = self.cell_size
        )
        .entered();
        debug!(?layout, "grid layout");

        let (palette_index, gradient) = if self.gradient_stops == DEFAULT_STOPS {
            let (i, g) = pick_from(&GRADIENTS, color_rand);
            (i, g.clone())
        } else {
            let table = precompute_gradients(self.gradient_stops)?;
            let (i, g) = pick_from(&table, color_rand);
            (i, g.clone())
        };
        debug!(palette_index, colors = ?gradient.hex(), "picked palette");

        let points = layout.points(shape_rand);
        debug!(points = points.len(), "generated point field");

        let triangles = triangulator.triangulate(&points)?;

        Ok(Mesh { layout, points, triangles, palette_index, gradient })
    }

    pub fn from_json(src: &str) -> serde_json::Result<PolyTriangle> {
        serde_json::from_str(src)
    }

    pub fn from_ron(src: &str) -> ron::error::SpannedResult<PolyTriangle> {
        ron::from_str(src)
    }

    pub fn from_yaml(src: &str) -> Result<PolyTriangle, serde_yaml::Error> {
        serde_yaml::from_str(src)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<PolyTriangle, PolyError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(match path.as_ref().extension().ok_or(PolyError::ExtensionError)?.to_str() {
            Some("json") => PolyTriangle::from_json(&contents)?,
            Some("ron") => PolyTriangle::from_ron(&contents)?,
            Some("yaml") | Some("yml") => PolyTriangle::from_yaml(&contents)?,
            _ => return Err(PolyError::ExtensionError),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting(usize);

    impl UnitRandom for Counting {
        fn next_unit(&mut self) -> f64 {
            self.0 += 1;
            0.5
        }
    }

    fn seeded() -> PolyTriangle {
        PolyTriangle {
            color_seed: Some("color".into()),
            shape_seed: Some("shape".into()),
            ..PolyTriangle::default()
        }
    }

    #[test]
    fn defaults() {
        let p = PolyTriangle::default();
        assert_eq!((p.width, p.height, p.cell_size), (600., 300., 100.));
        assert_eq!((p.variance, p.stroke_width), (1., 1.5));
        assert_eq!(p.sample_mode(), SampleMode::OneAxis);
        assert!(p.color_seed.is_none() && p.shape_seed.is_none());
    }

    #[test]
    fn invalid_configs() {
        let bad = |f: fn(&mut PolyTriangle)| {
            let mut p = PolyTriangle::default();
            f(&mut p);
            p.validate().unwrap_err()
        };
        assert_eq!(bad(|p| p.width = 0.), ConfigError::Width(0.));
        assert_eq!(bad(|p| p.height = -1.), ConfigError::Height(-1.));
        assert_eq!(bad(|p| p.cell_size = 0.), ConfigError::CellSize(0.));
        assert!(matches!(bad(|p| p.width = f64::NAN), ConfigError::Width(_)));
        assert!(matches!(bad(|p| p.variance = f64::INFINITY), ConfigError::Variance(_)));
        assert_eq!(bad(|p| p.gradient_stops = 1), ConfigError::GradientStops(1));
        assert!(matches!(bad(|p| p.variance = 1e300), ConfigError::Extent(_)));
    }

    #[test]
    fn canvas_beyond_integer_range() {
        let p = PolyTriangle {
            width: 3e9,
            height: 3e9,
            cell_size: 1e9,
            variance: 0.,
            ..seeded()
        };
        let (mut color, mut shape) = (Counting(0), Counting(0));
        let err = p.mesh_from_streams(&mut color, &mut shape, &Delaunay).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidConfiguration(ConfigError::Extent(_))));
        assert_eq!((color.0, shape.0), (0, 0));

        // A large canvas that still fits keeps every column apart.
        let p = PolyTriangle { width: 1e9, height: 1e9, cell_size: 2.5e8, variance: 0., ..seeded() };
        let mesh = p.mesh_with(&Delaunay).unwrap();
        let max_x = mesh.points.iter().map(|q| q.x).max().unwrap();
        assert!(max_x as f64 >= p.width, "{max_x}");
        let mut xs: Vec<i32> = mesh.points.iter().map(|q| q.x).collect();
        xs.sort();
        xs.dedup();
        assert_eq!(xs.len(), mesh.layout.cells_x);
    }

    #[test]
    fn point_count_is_bounded() {
        let p = PolyTriangle { width: 1e9, cell_size: 1., ..seeded() };
        assert!(matches!(p.validate(), Err(ConfigError::TooManyPoints(_))));
        assert!(matches!(p.generate(), Err(GenerateError::InvalidConfiguration(ConfigError::TooManyPoints(_)))));

        let p = PolyTriangle { width: 1000., height: 1000., cell_size: 1., ..seeded() };
        assert!(p.validate().unwrap().point_count() <= MAX_POINTS as f64);
    }

    #[test]
    fn invalid_config_draws_nothing() {
        let p = PolyTriangle { cell_size: -5., ..seeded() };
        let (mut color, mut shape) = (Counting(0), Counting(0));
        let err = p.generate_from_streams(&mut color, &mut shape, &Delaunay).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidConfiguration(ConfigError::CellSize(_))));
        assert_eq!((color.0, shape.0), (0, 0));
    }

    #[test]
    fn draw_counts() {
        let p = seeded();
        let (mut color, mut shape) = (Counting(0), Counting(0));
        let mesh = p.mesh_from_streams(&mut color, &mut shape, &Delaunay).unwrap();
        assert_eq!(color.0, 1);
        assert_eq!(shape.0, 2 * mesh.points.len());
        assert_eq!(mesh.palette_index, 56);
    }

    #[test]
    fn more_stops() {
        let p = PolyTriangle { gradient_stops: 4, ..seeded() };
        let mesh = p.mesh_with(&Delaunay).unwrap();
        assert_eq!(mesh.gradient.len(), 4);
        assert!(!p.generate().unwrap().is_empty());
    }

    #[test]
    fn config_formats() {
        let json = PolyTriangle::from_json(r#"{"width": 800, "shape_seed": "s"}"#).unwrap();
        assert_eq!(json.width, 800.);
        assert_eq!(json.shape_seed.as_deref(), Some("s"));
        assert_eq!(json.height, 300.);

        let ron = PolyTriangle::from_ron(r#"(cell_size: 50.0, two_axis: true)"#).unwrap();
        assert_eq!(ron.cell_size, 50.);
        assert!(ron.two_axis);

        let yaml = PolyTriangle::from_yaml("variance: 0.25\ncolor_seed: c\n").unwrap();
        assert_eq!(yaml.variance, 0.25);
        assert_eq!(yaml.color_seed.as_deref(), Some("c"));
    }

    #[test]
    fn unknown_extension() {
        let path = std::env::temp_dir().join("polytri-config.toml");
        std::fs::write(&path, "width = 1").unwrap();
        assert!(matches!(PolyTriangle::from_file(&path), Err(PolyError::ExtensionError)));
        std::fs::remove_file(&path).unwrap();
    }
}
