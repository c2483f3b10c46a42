use fieldconfig::{Color, WaveConfig};

use crate::host::Viewport;
use crate::sampler::Sampler;
use crate::surface::{Point, Rgba, Stroke, Surface};

/// Phase advanced per reference frame for a wave of unit speed.
pub const WAVE_PHASE_STEP: f32 = 0.01;

/// Horizontal distance between polyline vertices, in pixels.
pub const WAVE_SAMPLE_SPACING: usize = 5;

/// Horizontal sine stroke `y(x) = baseline + sin(x * frequency + offset) * amplitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    baseline: f32,
    amplitude: f32,
    frequency: f32,
    speed: f32,
    color: Color,
    opacity: f32,
    offset: f32,
}

impl Wave {
    pub(crate) fn sample(
        config: &WaveConfig,
        palette: &[Color],
        viewport: Viewport,
        sampler: &mut Sampler,
    ) -> Self {
        Self {
            baseline: sampler.between(0.0, viewport.height as f32),
            amplitude: sampler.range(config.amplitude),
            frequency: sampler.range(config.frequency),
            speed: sampler.range(config.speed),
            offset: sampler.angle(),
            color: sampler.color(palette),
            opacity: sampler.range(config.opacity),
        }
    }

    pub(crate) fn update(&mut self, steps: f32) {
        self.offset += self.speed * WAVE_PHASE_STEP * steps;
    }

    /// Vertical displacement from the baseline at horizontal position `x`.
    pub fn displacement(&self, x: f32) -> f32 {
        (x * self.frequency + self.offset).sin() * self.amplitude
    }

    pub(crate) fn draw<S: Surface + ?Sized>(&self, surface: &mut S, width: u32) {
        let points: Vec<Point> = (0..width as usize)
            .step_by(WAVE_SAMPLE_SPACING)
            .map(|x| {
                let x = x as f32;
                Point::new(x, self.baseline + self.displacement(x))
            })
            .collect();
        if points.len() < 2 {
            return;
        }
        surface.polyline(&points, Stroke::new(Rgba::new(self.color, self.opacity), 1.0));
    }

    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Accumulated phase offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }
}
