use std::f32::consts::{FRAC_2_PI, TAU};

use fieldconfig::{Color, SignalConfig};

use crate::host::Viewport;
use crate::sampler::Sampler;
use crate::surface::{Point, Rgba, Stroke, Surface};

/// How far outside the viewport a signal may drift before wrapping around.
const WRAP_MARGIN: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

impl Waveform {
    const ALL: [Waveform; 3] = [Waveform::Sine, Waveform::Square, Waveform::Triangle];

    /// Unit-amplitude value of the waveform at `phase` radians.
    pub fn sample(self, phase: f32) -> f32 {
        let sine = phase.sin();
        match self {
            Waveform::Sine => sine,
            Waveform::Square => {
                if sine > 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => FRAC_2_PI * sine.clamp(-1.0, 1.0).asin(),
        }
    }
}

/// Short waveform snippet wandering across the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    position: Point,
    amplitude: f32,
    speed: f32,
    color: Color,
    opacity: f32,
    points: u32,
    waveform: Waveform,
}

impl Signal {
    pub(crate) fn sample(
        config: &SignalConfig,
        palette: &[Color],
        viewport: Viewport,
        sampler: &mut Sampler,
    ) -> Self {
        Self {
            position: sampler.point_in(viewport),
            amplitude: sampler.range(config.amplitude),
            speed: sampler.range(config.speed),
            color: sampler.color(palette),
            opacity: sampler.range(config.opacity),
            points: sampler.count(config.points).max(1),
            waveform: Waveform::ALL[sampler.index(Waveform::ALL.len())],
        }
    }

    pub(crate) fn update(&mut self, elapsed: f32, steps: f32, viewport: Viewport) {
        self.position.x += (elapsed * self.speed).sin() * 0.5 * steps;
        self.position.y += (elapsed * self.speed * 0.7).cos() * 0.3 * steps;

        let width = viewport.width as f32;
        let height = viewport.height as f32;
        if self.position.x < -WRAP_MARGIN {
            self.position.x = width + WRAP_MARGIN;
        }
        if self.position.x > width + WRAP_MARGIN {
            self.position.x = -WRAP_MARGIN;
        }
        if self.position.y < -WRAP_MARGIN {
            self.position.y = height + WRAP_MARGIN;
        }
        if self.position.y > height + WRAP_MARGIN {
            self.position.y = -WRAP_MARGIN;
        }
    }

    fn vertex(&self, index: u32, elapsed: f32, waveform: Waveform) -> Point {
        let t = index as f32 / self.points as f32;
        let phase = t * TAU + elapsed * self.speed * 10.0;
        Point::new(
            self.position.x + t * self.amplitude * 2.0 - self.amplitude,
            self.position.y + waveform.sample(phase) * self.amplitude * 0.3,
        )
    }

    pub(crate) fn draw<S: Surface + ?Sized>(&self, surface: &mut S, elapsed: f32) {
        let vertices: Vec<Point> = (0..=self.points)
            .map(|i| self.vertex(i, elapsed, self.waveform))
            .collect();
        surface.polyline(
            &vertices,
            Stroke::new(Rgba::new(self.color, self.opacity * 0.8), 2.0),
        );

        // End dots ride the sine curve for every waveform.
        let dot = Rgba::new(self.color, self.opacity);
        for end in [0, self.points] {
            surface.circle(self.vertex(end, elapsed, Waveform::Sine), 3.0, Some(dot), None);
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn waveforms_agree_at_quarter_phase() {
        let quarter = std::f32::consts::FRAC_PI_2;
        assert!((Waveform::Sine.sample(quarter) - 1.0).abs() < 1e-6);
        assert_eq!(Waveform::Square.sample(quarter), 1.0);
        assert!((Waveform::Triangle.sample(quarter) - 1.0).abs() < 1e-3);
        assert_eq!(Waveform::Square.sample(-quarter), -1.0);
    }

    #[test]
    fn drifting_past_margin_wraps() {
        let mut sampler = Sampler::new(2);
        let viewport = Viewport::new(200, 100);
        let mut signal = Signal::sample(&SignalConfig::default(), &[Color::GOLD], viewport, &mut sampler);
        signal.position = Point::new(-150.0, 250.0);
        signal.update(0.0, 0.0, viewport);
        assert_eq!(signal.position, Point::new(300.0, -100.0));
    }

    #[test]
    fn end_dots_follow_sine_for_square_waves() {
        let signal = Signal {
            position: Point::new(100.0, 100.0),
            amplitude: 40.0,
            speed: 0.0,
            color: Color::GOLD,
            opacity: 0.5,
            points: 4,
            waveform: Waveform::Square,
        };
        let mut surface = RecordingSurface::new(Viewport::new(200, 200));
        signal.draw(&mut surface, 0.0);

        let commands = surface.commands();
        assert_eq!(commands.len(), 3);
        let DrawCommand::Polyline { points, .. } = &commands[0] else {
            panic!("expected the waveform polyline first");
        };
        // sin(0) is 0 but a square wave snaps to -1 there
        assert_eq!(points[0].x, 60.0);
        assert!((points[0].y - 88.0).abs() < 1e-4);
        for (command, x) in commands[1..].iter().zip([60.0, 140.0]) {
            let DrawCommand::Circle { center, .. } = command else {
                panic!("expected an end dot");
            };
            assert!((center.x - x).abs() < 1e-4);
            assert!((center.y - 100.0).abs() < 1e-4);
        }
    }
}
