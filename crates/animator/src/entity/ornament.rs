use fieldconfig::{BeaconConfig, Color, LineConfig, ShapeConfig};

use super::{regular_polygon, square, triangle};
use crate::host::Viewport;
use crate::sampler::Sampler;
use crate::surface::{Point, Rgba, Stroke, Surface};

/// Hairline from one viewport edge to the opposite edge, easing its opacity
/// toward a target that is occasionally re-sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    from: Point,
    to: Point,
    fade_speed: f32,
    color: Color,
    opacity: f32,
    target: f32,
}

impl Line {
    pub(crate) fn sample(
        config: &LineConfig,
        palette: &[Color],
        viewport: Viewport,
        sampler: &mut Sampler,
    ) -> Self {
        let width = viewport.width as f32;
        let height = viewport.height as f32;
        let (from, to) = match sampler.index(4) {
            0 => (
                Point::new(sampler.between(0.0, width), 0.0),
                Point::new(sampler.between(0.0, width), height),
            ),
            1 => (
                Point::new(width, sampler.between(0.0, height)),
                Point::new(0.0, sampler.between(0.0, height)),
            ),
            2 => (
                Point::new(sampler.between(0.0, width), height),
                Point::new(sampler.between(0.0, width), 0.0),
            ),
            _ => (
                Point::new(0.0, sampler.between(0.0, height)),
                Point::new(width, sampler.between(0.0, height)),
            ),
        };
        Self {
            from,
            to,
            opacity: 0.0,
            target: sampler.range(config.target_opacity),
            fade_speed: sampler.range(config.fade_speed),
            color: sampler.color(palette),
        }
    }

    pub(crate) fn update(&mut self, config: &LineConfig, steps: f32, sampler: &mut Sampler) {
        let step = self.fade_speed * steps;
        if self.opacity < self.target {
            self.opacity = (self.opacity + step).min(self.target);
        } else if self.opacity > self.target {
            self.opacity = (self.opacity - step).max(self.target);
        }

        if sampler.chance(config.retarget_chance) {
            self.target = sampler.range(config.target_opacity);
        }
    }

    pub(crate) fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.line(
            self.from,
            self.to,
            Stroke::new(Rgba::new(self.color, self.opacity), 0.5),
        );
    }

    pub fn endpoints(&self) -> (Point, Point) {
        (self.from, self.to)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn target_opacity(&self) -> f32 {
        self.target
    }
}

/// Stationary dot whose size and opacity follow a wrapping pulse.
#[derive(Debug, Clone, PartialEq)]
pub struct Beacon {
    position: Point,
    size: f32,
    pulse_speed: f32,
    max_pulse: f32,
    color: Color,
    pulse: f32,
}

impl Beacon {
    pub(crate) fn sample(
        config: &BeaconConfig,
        palette: &[Color],
        viewport: Viewport,
        sampler: &mut Sampler,
    ) -> Self {
        Self {
            position: sampler.point_in(viewport),
            size: sampler.range(config.size),
            pulse: 0.0,
            pulse_speed: sampler.range(config.pulse_speed),
            max_pulse: sampler.range(config.max_pulse),
            color: sampler.color(palette),
        }
    }

    pub(crate) fn update(&mut self, steps: f32) {
        self.pulse += self.pulse_speed * steps;
        if self.pulse > self.max_pulse {
            self.pulse = 0.0;
        }
    }

    pub(crate) fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let wobble = self.pulse.sin();
        surface.circle(
            self.position,
            self.size + wobble * 0.5,
            Some(Rgba::new(self.color, 0.2 + wobble * 0.1)),
            None,
        );
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn pulse(&self) -> f32 {
        self.pulse
    }

    pub fn max_pulse(&self) -> f32 {
        self.max_pulse
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Triangle,
    Square,
    Hexagon,
}

impl ShapeKind {
    const ALL: [ShapeKind; 3] = [ShapeKind::Triangle, ShapeKind::Square, ShapeKind::Hexagon];
}

/// Filled, outlined polygon spinning in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    position: Point,
    size: f32,
    rotation_speed: f32,
    kind: ShapeKind,
    color: Color,
    opacity: f32,
    rotation: f32,
}

impl Shape {
    pub(crate) fn sample(
        config: &ShapeConfig,
        palette: &[Color],
        viewport: Viewport,
        sampler: &mut Sampler,
    ) -> Self {
        Self {
            position: sampler.point_in(viewport),
            size: sampler.range(config.size),
            rotation: sampler.angle(),
            rotation_speed: sampler.range(config.rotation_speed),
            kind: ShapeKind::ALL[sampler.index(ShapeKind::ALL.len())],
            opacity: sampler.range(config.opacity),
            color: sampler.color(palette),
        }
    }

    pub(crate) fn update(&mut self, steps: f32) {
        self.rotation += self.rotation_speed * steps;
    }

    pub(crate) fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let half = self.size / 2.0;
        let vertices = match self.kind {
            ShapeKind::Triangle => triangle(self.position, half, self.rotation),
            ShapeKind::Square => square(self.position, half, self.rotation),
            ShapeKind::Hexagon => regular_polygon(self.position, half, 6, self.rotation),
        };
        surface.polygon(
            &vertices,
            Rgba::new(self.color, self.opacity),
            Some(Stroke::new(Rgba::new(self.color, self.opacity * 1.5), 0.5)),
        );
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(opacity: f32, target: f32) -> Line {
        Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(0.0, 100.0),
            fade_speed: 0.125,
            color: Color::WHITE,
            opacity,
            target,
        }
    }

    fn steady() -> LineConfig {
        LineConfig {
            retarget_chance: 0.0,
            ..LineConfig::default()
        }
    }

    #[test]
    fn line_eases_up_and_stops_at_target() {
        let mut sampler = Sampler::new(1);
        let mut line = line(0.0, 0.3);
        line.update(&steady(), 1.0, &mut sampler);
        assert_eq!(line.opacity(), 0.125);
        line.update(&steady(), 1.0, &mut sampler);
        assert_eq!(line.opacity(), 0.25);
        line.update(&steady(), 1.0, &mut sampler);
        assert_eq!(line.opacity(), 0.3);
        line.update(&steady(), 1.0, &mut sampler);
        assert_eq!(line.opacity(), 0.3);
    }

    #[test]
    fn line_fades_down_by_frame_steps() {
        let mut sampler = Sampler::new(1);
        let mut line = line(0.5, 0.0);
        line.update(&steady(), 2.0, &mut sampler);
        assert_eq!(line.opacity(), 0.25);
        line.update(&steady(), 4.0, &mut sampler);
        assert_eq!(line.opacity(), 0.0);
        assert_eq!(line.target_opacity(), 0.0);
    }

    #[test]
    fn beacon_pulse_wraps_past_maximum() {
        let mut beacon = Beacon {
            position: Point::new(5.0, 5.0),
            size: 2.0,
            pulse_speed: 0.5,
            max_pulse: 1.0,
            color: Color::GOLD,
            pulse: 0.0,
        };
        beacon.update(1.0);
        assert_eq!(beacon.pulse(), 0.5);
        beacon.update(1.0);
        assert_eq!(beacon.pulse(), 1.0);
        beacon.update(1.0);
        assert_eq!(beacon.pulse(), 0.0);
    }
}
