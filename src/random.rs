use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// 2^48, the denominator of a fresh 6-byte draw.
const START_DENOM: f64 = 281_474_976_710_656.;
const SIGNIFICANCE: u64 = 1 << 52;
const OVERFLOW: u64 = 1 << 53;

/// A source of floats uniformly distributed in `[0, 1)`.
///
/// Every randomized stage of the pipeline draws through this trait, so the
/// color and shape streams can be swapped for any generator.
pub trait UnitRandom {
    fn next_unit(&mut self) -> f64;
}

/// Adapts any [`rand::Rng`] into a [`UnitRandom`].
#[derive(Debug, Clone)]
pub struct RngUnit<R>(pub R);

impl<R: Rng> UnitRandom for RngUnit<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random()
    }
}

/// RC4 keystream seeded from a string, producing the same sequence of
/// doubles as the `seedrandom` JavaScript generator.
#[derive(Clone)]
pub struct Arc4 {
    i: u8,
    j: u8,
    s: [u8; 256],
}

impl Arc4 {
    pub fn new(seed: &str) -> Arc4 {
        Arc4::from_key(&mix_key(seed))
    }

    fn from_key(key: &[u8]) -> Arc4 {
        let key: &[u8] = if key.is_empty() { &[0] } else { key };

        let mut s = [0u8; 256];
        for (i, v) in s.iter_mut().enumerate() {
            *v = i as u8;
        }

        let mut j: u8 = 0;
        for i in 0 .. 256 {
            let t = s[i];
            j = j.wrapping_add(key[i % key.len()]).wrapping_add(t);
            s[i] = s[j as usize];
            s[j as usize] = t;
        }

        let mut arc4 = Arc4 { i: 0, j: 0, s };
        // RC4-drop[256]
        for _ in 0 .. 256 {
            arc4.next_byte();
        }
        arc4
    }

    fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        let t = self.s[self.i as usize];
        self.j = self.j.wrapping_add(t);
        let sj = self.s[self.j as usize];
        self.s[self.i as usize] = sj;
        self.s[self.j as usize] = t;
        self.s[sj.wrapping_add(t) as usize]
    }

    /// Big-endian integer built from the next `count` bytes (`count <= 8`).
    fn next_bytes(&mut self, count: usize) -> u64 {
        (0 .. count).fold(0, |r, _| (r << 8) | self.next_byte() as u64)
    }
}

impl UnitRandom for Arc4 {
    fn next_unit(&mut self) -> f64 {
        let mut n = self.next_bytes(6);
        let mut d = START_DENOM;
        let mut x = 0;

        while n < SIGNIFICANCE {
            n = (n + x) << 8;
            d *= 256.;
            x = self.next_bytes(1);
        }

        while n >= OVERFLOW {
            n >>= 1;
            d /= 2.;
            x >>= 1;
        }

        (n + x) as f64 / d
    }
}

impl RngCore for Arc4 {
    fn next_u32(&mut self) -> u32 {
        self.next_bytes(4) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for b in dst.iter_mut() {
            *b = self.next_byte();
        }
    }
}

/// Folds the UTF-16 code units of `seed` into an RC4 key of at most 256
/// bytes.
fn mix_key(seed: &str) -> Vec<u8> {
    let mut key: Vec<u8> = Vec::new();
    let mut smear: u32 = 0;

    for (j, unit) in seed.encode_utf16().enumerate() {
        let idx = j & 0xff;
        smear ^= key.get(idx).copied().unwrap_or(0) as u32 * 19;
        let v = ((smear + unit as u32) & 0xff) as u8;
        if idx < key.len() {
            key[idx] = v;
        } else {
            key.push(v);
        }
    }

    key
}

/// Where a stream gets its state from.
///
/// Only [`Seed::Text`] is reproducible. [`Seed::Entropy`] draws a fresh
/// state from the thread generator, so every stream built from it differs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seed {
    Text(String),
    Entropy,
}

impl From<Option<String>> for Seed {
    fn from(seed: Option<String>) -> Seed {
        seed.map_or(Seed::Entropy, Seed::Text)
    }
}

impl From<&str> for Seed {
    fn from(seed: &str) -> Seed {
        Seed::Text(seed.to_owned())
    }
}

#[derive(Clone)]
enum Source {
    Arc4(Arc4),
    Entropy(StdRng),
}

/// A color or shape stream, built from a [`Seed`].
#[derive(Clone)]
pub struct SeededRandom {
    source: Source,
}

impl SeededRandom {
    pub fn new(seed: &Seed) -> SeededRandom {
        let source = match seed {
            Seed::Text(s) => Source::Arc4(Arc4::new(s)),
            Seed::Entropy => Source::Entropy(StdRng::from_rng(&mut rand::rng())),
        };
        SeededRandom { source }
    }

    pub fn is_reproducible(&self) -> bool {
        matches!(self.source, Source::Arc4(_))
    }
}

impl UnitRandom for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        match &mut self.source {
            Source::Arc4(arc4) => arc4.next_unit(),
            Source::Entropy(rng) => rng.random(),
        }
    }
}
