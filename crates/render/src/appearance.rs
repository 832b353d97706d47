use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Mesh the rendering backend should build for an object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Sphere {
        radius: f32,
        subdivisions_axis: u32,
        subdivisions_height: u32,
    },
    Cube {
        size: f32,
    },
    TruncatedCone {
        bottom_radius: f32,
        top_radius: f32,
        height: f32,
        radial_subdivisions: u32,
        vertical_subdivisions: u32,
        top_cap: bool,
        bottom_cap: bool,
    },
}

impl Primitive {
    /// The shapes an object may be drawn as.
    pub const CATALOG: [Primitive; 3] = [
        Primitive::Sphere {
            radius: 10.0,
            subdivisions_axis: 12,
            subdivisions_height: 6,
        },
        Primitive::Cube { size: 20.0 },
        Primitive::TruncatedCone {
            bottom_radius: 10.0,
            top_radius: 0.0,
            height: 20.0,
            radial_subdivisions: 12,
            vertical_subdivisions: 1,
            top_cap: true,
            bottom_cap: false,
        },
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Sphere { .. } => "sphere",
            Primitive::Cube { .. } => "cube",
            Primitive::TruncatedCone { .. } => "cone",
        }
    }
}

/// Splitmix64 sequence used for reproducible appearance rolls.
#[derive(Debug, Clone)]
pub struct SceneRng {
    state: u64,
}

impl SceneRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        // top 53 bits fill the mantissa
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize % len
    }
}

/// Euclidean modulo: result is always in `[0, n)` for positive `n`.
pub fn emod(x: f64, n: f64) -> f64 {
    x.rem_euclid(n)
}

/// HSV (hue in degrees, saturation and value in `[0, 1]`) to opaque RGBA.
pub fn hsv_to_rgba(hue: f64, saturation: f64, value: f64) -> Vec4 {
    let h = emod(hue, 360.0) / 60.0;
    let c = value * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Vec4::new((r + m) as f32, (g + m) as f32, (b + m) as f32, 1.0)
}

/// Shape and colour multiplier of one drawn object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub primitive: Primitive,
    pub color_mult: Vec4,
}

impl Appearance {
    /// Roll `count` appearances from `seed`.
    ///
    /// Colours share a random base hue and spread up to 120° from it, with
    /// saturation and value in `[0.5, 1)`.
    pub fn roll(seed: u64, count: usize) -> Vec<Appearance> {
        let mut rng = SceneRng::new(seed);
        let base_hue = rng.range(0.0, 360.0);
        let colors: Vec<Vec4> = (0..count)
            .map(|_| {
                let hue = emod(base_hue + rng.range(0.0, 120.0), 360.0);
                let saturation = rng.range(0.5, 1.0);
                let value = rng.range(0.5, 1.0);
                hsv_to_rgba(hue, saturation, value)
            })
            .collect();
        let appearances: Vec<Appearance> = colors
            .into_iter()
            .map(|color_mult| Appearance {
                primitive: Primitive::CATALOG[rng.index(Primitive::CATALOG.len())],
                color_mult,
            })
            .collect();
        tracing::debug!(
            seed,
            shapes = ?appearances.iter().map(|a| a.primitive.name()).collect::<Vec<_>>(),
            "rolled appearances"
        );
        appearances
    }
}
