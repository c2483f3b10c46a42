use std::f32::consts::TAU;

use fieldconfig::{Color, SampleRange};
use rand::prelude::*;

use crate::host::Viewport;
use crate::surface::Point;

/// Seeded random source shared by every entity of one animator.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw from `[min, max)`; a degenerate range yields `min` exactly.
    pub fn range(&mut self, range: SampleRange) -> f32 {
        self.between(range.min, range.max)
    }

    pub fn between(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Uniform integer from the inclusive bounds.
    pub fn count(&mut self, bounds: [u32; 2]) -> u32 {
        let [low, high] = bounds;
        if low < high {
            self.rng.gen_range(low..=high)
        } else {
            low
        }
    }

    pub fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            0
        } else {
            self.rng.gen_range(0..len)
        }
    }

    pub fn angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        probability > 0.0 && self.rng.gen::<f32>() < probability
    }

    pub fn point_in(&mut self, viewport: Viewport) -> Point {
        Point::new(
            self.between(0.0, viewport.width as f32),
            self.between(0.0, viewport.height as f32),
        )
    }

    pub fn color(&mut self, palette: &[Color]) -> Color {
        palette
            .get(self.index(palette.len()))
            .copied()
            .unwrap_or(Color::GOLD)
    }
}
