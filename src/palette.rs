use lazy_static::lazy_static;
use rgb::RGB8;
use tracing::debug;

use super::color::{Lab, to_hex};
use super::error::ConfigError;
use super::random::UnitRandom;
use super::scale::ColorScale;

const fn c(hex: u32) -> RGB8 {
    RGB8 { r: (hex >> 16) as u8, g: (hex >> 8) as u8, b: hex as u8 }
}

/// Base colors that gradients are derived from. Some entries appear twice,
/// which doubles their chance of being picked.
pub const BASE_PALETTE: [RGB8; 112] = [
    c(0x000080), c(0x00008b), c(0x0000cd), c(0x006400), c(0x008000), c(0x008080),
    c(0x008b8b), c(0x00bfff), c(0x00ced1), c(0x0000ff), c(0x00fa9a), c(0x00ff7f),
    c(0x00ff00), c(0x00ffff), c(0x00ffff), c(0x191970), c(0x1e90ff), c(0x20b2aa),
    c(0x228b22), c(0x2e8b57), c(0x2f4f4f), c(0x32cd32), c(0x3cb371), c(0x40e0d0),
    c(0x4169e1), c(0x4682b4), c(0x483d8b), c(0x48d1cc), c(0x4b0082), c(0x556b2f),
    c(0x5f9ea0), c(0x663399), c(0x6495ed), c(0x66cdaa), c(0x6a5acd), c(0x6b8e23),
    c(0x7b68ee), c(0x7cfc00), c(0x7fff00), c(0x7fffd4), c(0x800000), c(0x800080),
    c(0x808000), c(0x87ceeb), c(0x87cefa), c(0x8a2be2), c(0x8b0000), c(0x8b008b),
    c(0x8b4513), c(0x8fbc8f), c(0x90ee90), c(0x9370d8), c(0x9400d3), c(0x98fb98),
    c(0x9932cc), c(0x9acd32), c(0xa0522d), c(0xa52a2a), c(0xadd8e6), c(0xadff2f),
    c(0xafeeee), c(0xb0c4de), c(0xb0e0e6), c(0xb22222), c(0xb8860b), c(0xba55d3),
    c(0xbc8f8f), c(0xbdb76b), c(0xc71585), c(0xcd5c5c), c(0xcd853f), c(0xd2691e),
    c(0xd2b48c), c(0xd87093), c(0xd8bfd8), c(0xda70d6), c(0xdaa520), c(0xdc143c),
    c(0xdda0dd), c(0xdeb887), c(0xe0ffff), c(0xe6e6fa), c(0xe9967a), c(0xee82ee),
    c(0xeee8aa), c(0xff0000), c(0xf08080), c(0xf0e68c), c(0xff00ff), c(0xff00ff),
    c(0xf4a460), c(0xf5deb3), c(0xf5f5dc), c(0xfa8072), c(0xfafad2), c(0xffff00),
    c(0xff1493), c(0xff4500), c(0xff6347), c(0xff69b4), c(0xff7f50), c(0xff8c00),
    c(0xffa07a), c(0xffa500), c(0xffb6c1), c(0xffc0cb), c(0xffd700), c(0xffdab9),
    c(0xffdead), c(0xffe4b5), c(0xffe4c4), c(0xffe4e1),
];

pub const DEFAULT_STOPS: usize = 2;

lazy_static! {
    /// One two-stop gradient per [`BASE_PALETTE`] entry, in catalog order.
    pub static ref GRADIENTS: Vec<Gradient> = {
        let gradients: Vec<Gradient> = BASE_PALETTE
            .iter()
            .map(|&base| Gradient::from_base(base, DEFAULT_STOPS))
            .collect();
        debug!(count = gradients.len(), "precomputed gradients");
        gradients
    };
}

/// Colors sharing the chroma of a base color, evenly spaced in lightness.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<Lab>,
}

impl Gradient {
    // Callers guarantee `n >= 2`.
    fn from_base(base: RGB8, n: usize) -> Gradient {
        let lab = Lab::from_rgb(base);
        let n_ = n as f64;
        let range = 100. * (0.95 - 1. / n_);
        let step = range / (n_ - 1.);
        let start = (100. - range) * 0.5;
        let stops = (0 .. n)
            .map(|i| Lab::new(start + i as f64 * step, lab.a, lab.b))
            .collect();
        Gradient { stops }
    }

    /// Exact stops, before gamut clipping.
    pub fn stops(&self) -> &[Lab] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Display colors of the stops.
    pub fn colors(&self) -> Vec<RGB8> {
        self.stops.iter().map(Lab::to_rgb8).collect()
    }

    pub fn hex(&self) -> Vec<String> {
        self.colors().into_iter().map(to_hex).collect()
    }

    /// Continuous scale through the display colors.
    pub fn scale(&self) -> ColorScale {
        ColorScale::from_display(&self.colors())
    }
}

/// Derives `stops` colors from `base` by varying lightness only.
///
/// Lightness values are centred on 50, spanning `100 * (0.95 - 1 / stops)`.
pub fn build_gradient(base: RGB8, stops: usize) -> Result<Gradient, ConfigError> {
    if stops < 2 {
        return Err(ConfigError::GradientStops(stops));
    }
    Ok(Gradient::from_base(base, stops))
}

/// Builds a gradient for every catalog entry.
pub fn precompute_gradients(stops: usize) -> Result<Vec<Gradient>, ConfigError> {
    BASE_PALETTE.iter().map(|&base| build_gradient(base, stops)).collect()
}

/// Picks a table entry with one draw from `rand`. `table` must not be
/// empty.
pub fn pick_from<'a>(table: &'a [Gradient], rand: &mut impl UnitRandom) -> (usize, &'a Gradient) {
    let i = ((rand.next_unit() * table.len() as f64).floor() as usize).min(table.len() - 1);
    (i, &table[i])
}

/// Picks one of the precomputed [`GRADIENTS`].
pub fn pick_palette(rand: &mut impl UnitRandom) -> &'static Gradient {
    pick_from(&GRADIENTS, rand).1
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl UnitRandom for Fixed {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn two_stops_are_symmetric() {
        let g = build_gradient(c(0x1e90ff), 2).unwrap();
        let ls: Vec<f64> = g.stops().iter().map(|s| s.l).collect();
        assert!((ls[0] - 27.5).abs() < 1e-9, "{ls:?}");
        assert!((ls[1] - 72.5).abs() < 1e-9, "{ls:?}");
        assert!((ls[0] + ls[1] - 100.).abs() < 1e-9);
    }

    #[test]
    fn chroma_is_held() {
        let base = Lab::from_rgb(c(0xff4500));
        let g = build_gradient(c(0xff4500), 5).unwrap();
        for s in g.stops() {
            assert_eq!((s.a, s.b), (base.a, base.b));
        }
    }

    #[test]
    fn lightness_increases() {
        for n in 2 .. 12 {
            let g = build_gradient(c(0x6a5acd), n).unwrap();
            assert_eq!(g.len(), n);
            for w in g.stops().windows(2) {
                assert!(w[0].l < w[1].l, "{n} stops: {:?}", g.stops());
            }
            let first = g.stops()[0].l;
            let last = g.stops()[n - 1].l;
            assert!((first + last - 100.).abs() < 1e-9);
        }
    }

    #[test]
    fn too_few_stops() {
        assert_eq!(build_gradient(c(0), 1), Err(ConfigError::GradientStops(1)));
        assert_eq!(build_gradient(c(0), 0), Err(ConfigError::GradientStops(0)));
        assert!(precompute_gradients(1).is_err());
    }

    #[test]
    fn table_covers_catalog() {
        assert_eq!(GRADIENTS.len(), BASE_PALETTE.len());
        assert_eq!(precompute_gradients(2).unwrap(), *GRADIENTS);
        assert_eq!(precompute_gradients(3).unwrap()[0].len(), 3);
    }

    #[test]
    fn gray_gradient_hex() {
        let g = build_gradient(c(0x808080), 2).unwrap();
        for h in g.hex() {
            let v = &h[1 .. 3];
            assert_eq!(&h[3 .. 5], v);
            assert_eq!(&h[5 .. 7], v);
        }
    }

    #[test]
    fn picking_is_floor_of_scaled_draw() {
        assert_eq!(pick_from(&GRADIENTS, &mut Fixed(0.)).0, 0);
        assert_eq!(pick_from(&GRADIENTS, &mut Fixed(0.5)).0, 56);
        assert_eq!(pick_from(&GRADIENTS, &mut Fixed(0.999_999)).0, 111);
        assert!(std::ptr::eq(pick_palette(&mut Fixed(0.)), &GRADIENTS[0]));
    }
}
