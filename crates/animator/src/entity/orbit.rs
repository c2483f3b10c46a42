use fieldconfig::{Color, ParticleConfig};

use crate::host::Viewport;
use crate::sampler::Sampler;
use crate::surface::{Point, Rgba, Surface};

/// Dot circling a fixed center at constant angular speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    center: Point,
    radius: f32,
    size: f32,
    color: Color,
    opacity: f32,
    angle: f32,
}

impl Particle {
    pub(crate) fn sample(
        config: &ParticleConfig,
        palette: &[Color],
        viewport: Viewport,
        sampler: &mut Sampler,
    ) -> Self {
        Self {
            size: sampler.range(config.size),
            center: sampler.point_in(viewport),
            radius: sampler.range(config.orbit_radius),
            angle: sampler.angle(),
            color: sampler.color(palette),
            opacity: sampler.range(config.opacity),
        }
    }

    pub(crate) fn update(&mut self, orbit_speed: f32, steps: f32) {
        self.angle += orbit_speed * steps;
    }

    pub fn position(&self) -> Point {
        Point::new(
            self.center.x + self.angle.cos() * self.radius,
            self.center.y + self.angle.sin() * self.radius,
        )
    }

    pub(crate) fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.circle(
            self.position(),
            self.size,
            Some(Rgba::new(self.color, self.opacity)),
            None,
        );
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn color(&self) -> Color {
        self.color
    }
}
