//! Seed-reproducible low-polygon backgrounds.
//!
//! A jittered grid of points is Delaunay-triangulated and every triangle is
//! filled from a lightness gradient, sampled at the triangle's centroid.
//!
//! ```no_run
//! use polytri::PolyTriangle;
//!
//! let cfg = PolyTriangle {
//!     color_seed: Some("sunset".into()),
//!     shape_seed: Some("dunes".into()),
//!     ..PolyTriangle::default()
//! };
//! for item in cfg.generate()? {
//!     println!("{} {:?}", item.color, item.vertices);
//! }
//! # Ok::<(), polytri::GenerateError>(())
//! ```

mod bounds;
pub use bounds::*;

mod color;
pub use color::*;

mod error;
pub use error::*;

mod grid;
pub use grid::*;

mod palette;
pub use palette::*;

mod poly;
pub use poly::*;

mod random;
pub use random::*;

pub mod render;

mod sampler;
pub use sampler::*;

mod scale;
pub use scale::*;

mod triangulate;
pub use triangulate::*;
