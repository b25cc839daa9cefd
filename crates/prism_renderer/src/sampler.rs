//! Sub-pixel sample placement.
//!
//! Anti-aliasing uses stratified jitter: the pixel is split into an
//! `h x v` grid and each cell is sampled once at a uniformly random
//! position inside it.

use prism_math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Deterministic generator for one pixel of a render.
///
/// Seeding per pixel keeps the output independent of the order in which
/// pixels are rendered.
pub fn pixel_rng(seed: u64, pixel_index: u64) -> StdRng {
    // Spread neighbouring indices across the seed space
    const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
    StdRng::seed_from_u64(seed ^ pixel_index.wrapping_add(1).wrapping_mul(GOLDEN_GAMMA))
}

/// How sample positions are chosen inside a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePattern {
    /// A single sample through the pixel center.
    Center,
    /// One jittered sample per cell of an `h x v` grid.
    Jittered { h: u32, v: u32 },
}

impl SamplePattern {
    /// Number of samples per pixel.
    pub fn sample_count(&self) -> u32 {
        match *self {
            SamplePattern::Center => 1,
            SamplePattern::Jittered { h, v } => h.saturating_mul(v),
        }
    }

    /// Sub-pixel offsets for one pixel, each component in [0, 1).
    pub fn offsets(&self, rng: &mut dyn RngCore) -> Vec<Vec2> {
        match *self {
            SamplePattern::Center => vec![Vec2::new(0.5, 0.5)],
            SamplePattern::Jittered { h, v } => {
                let mut offsets = Vec::with_capacity(h as usize * v as usize);
                for j in 0..v {
                    for i in 0..h {
                        let ox = (i as f32 + gen_f32(rng)) / h as f32;
                        let oy = (j as f32 + gen_f32(rng)) / v as f32;
                        offsets.push(Vec2::new(ox, oy));
                    }
                }
                offsets
            }
        }
    }
}
