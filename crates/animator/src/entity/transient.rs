use fieldconfig::{Color, RingConfig, SparkConfig};

use super::{square, triangle};
use crate::sampler::Sampler;
use crate::surface::{Point, Rgba, Stroke, Surface};

/// Expanding outline that fades by a fixed amount every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    center: Point,
    max_radius: f32,
    speed: f32,
    thickness: f32,
    decay: f32,
    color: Color,
    radius: f32,
    opacity: f32,
}

impl Ring {
    pub(crate) fn sample(
        config: &RingConfig,
        palette: &[Color],
        center: Point,
        sampler: &mut Sampler,
    ) -> Self {
        Self {
            center,
            radius: 0.0,
            max_radius: sampler.range(config.max_radius),
            speed: sampler.range(config.speed),
            opacity: sampler.range(config.opacity),
            thickness: sampler.range(config.thickness),
            decay: config.decay,
            color: sampler.color(palette),
        }
    }

    /// Advances exactly one frame, independent of the frame delta.
    pub(crate) fn update(&mut self) {
        self.radius += self.speed;
        self.opacity -= self.decay;
    }

    pub fn is_spent(&self) -> bool {
        self.opacity <= 0.0 || self.radius > self.max_radius
    }

    pub(crate) fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.is_spent() {
            return;
        }
        surface.circle(
            self.center,
            self.radius,
            None,
            Some(Stroke::new(Rgba::new(self.color, self.opacity), self.thickness)),
        );
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparkShape {
    Circle,
    Square,
    Triangle,
}

impl SparkShape {
    const ALL: [SparkShape; 3] = [SparkShape::Circle, SparkShape::Square, SparkShape::Triangle];
}

/// Particle thrown from an origin that slows down and fades over its life.
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    position: Point,
    velocity: Point,
    size: f32,
    max_life: f32,
    damping: f32,
    shape: SparkShape,
    color: Color,
    life: f32,
}

impl Spark {
    pub(crate) fn sample(
        config: &SparkConfig,
        palette: &[Color],
        origin: Point,
        sampler: &mut Sampler,
    ) -> Self {
        Self {
            position: origin,
            size: sampler.range(config.size),
            velocity: Point::new(sampler.range(config.velocity), sampler.range(config.velocity)),
            life: 0.0,
            max_life: sampler.range(config.max_life),
            damping: config.damping,
            shape: SparkShape::ALL[sampler.index(SparkShape::ALL.len())],
            color: sampler.color(palette),
        }
    }

    /// Advances exactly one frame of life.
    pub(crate) fn update(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        self.life += 1.0;
        self.velocity.x *= self.damping;
        self.velocity.y *= self.damping;
    }

    pub fn opacity(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            1.0 - self.life / self.max_life
        }
    }

    pub fn is_spent(&self) -> bool {
        self.opacity() <= 0.0
    }

    pub(crate) fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let opacity = self.opacity();
        if opacity <= 0.0 {
            return;
        }
        let fill = Rgba::new(self.color, opacity);
        match self.shape {
            SparkShape::Circle => surface.circle(self.position, self.size, Some(fill), None),
            SparkShape::Square => {
                surface.polygon(&square(self.position, self.size, 0.0), fill, None)
            }
            SparkShape::Triangle => {
                surface.polygon(&triangle(self.position, self.size, 0.0), fill, None)
            }
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn max_life(&self) -> f32 {
        self.max_life
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Viewport;
    use crate::surface::RecordingSurface;

    fn spark(max_life: f32) -> Spark {
        Spark {
            position: Point::new(10.0, 10.0),
            velocity: Point::new(2.0, -4.0),
            size: 3.0,
            max_life,
            damping: 0.5,
            shape: SparkShape::Circle,
            color: Color::GOLD,
            life: 0.0,
        }
    }

    fn painted(spark: &Spark) -> usize {
        let mut surface = RecordingSurface::new(Viewport::new(100, 100));
        spark.draw(&mut surface);
        surface.commands().len()
    }

    #[test]
    fn spark_slows_down_as_it_moves() {
        let mut spark = spark(10.0);
        spark.update();
        assert_eq!(spark.position(), Point::new(12.0, 6.0));
        spark.update();
        assert_eq!(spark.position(), Point::new(13.0, 4.0));
        assert_eq!(spark.life(), 2.0);
    }

    #[test]
    fn spark_fades_out_on_its_last_frame() {
        let mut spark = spark(4.0);
        for _ in 0..3 {
            spark.update();
        }
        assert_eq!(spark.opacity(), 0.25);
        assert!(!spark.is_spent());
        assert_eq!(painted(&spark), 1);

        spark.update();
        assert_eq!(spark.opacity(), 0.0);
        assert!(spark.is_spent());
        assert_eq!(painted(&spark), 0);
    }

    #[test]
    fn spark_without_life_is_spent() {
        let spark = spark(0.0);
        assert!(spark.is_spent());
    }

    #[test]
    fn ring_grows_and_fades_each_frame() {
        let mut ring = Ring {
            center: Point::new(0.0, 0.0),
            max_radius: 100.0,
            speed: 2.0,
            thickness: 1.0,
            decay: 0.25,
            color: Color::WHITE,
            radius: 0.0,
            opacity: 0.5,
        };
        ring.update();
        assert_eq!((ring.radius(), ring.opacity()), (2.0, 0.25));
        assert!(!ring.is_spent());
        ring.update();
        assert_eq!(ring.opacity(), 0.0);
        assert!(ring.is_spent());
    }
}
