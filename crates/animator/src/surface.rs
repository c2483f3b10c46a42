use fieldconfig::Color;
use serde::Serialize;

use crate::host::Viewport;

/// Position on the drawing surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Maps a point expressed relative to `self` after rotating it by `angle`.
    pub fn local(self, x: f32, y: f32, angle: f32) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x + x * cos - y * sin, self.y + x * sin + y * cos)
    }
}

/// A palette color combined with an opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn new(color: Color, alpha: f32) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
            a: alpha.clamp(0.0, 1.0),
        }
    }

    /// CSS `rgba()` notation understood by canvas 2D contexts.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub paint: Rgba,
    pub width: f32,
}

impl Stroke {
    pub fn new(paint: Rgba, width: f32) -> Self {
        Self { paint, width }
    }
}

/// 2D drawing target owned by a running animator.
///
/// Implementations only need the handful of primitives the field entities
/// use; transforms are resolved by the entities before they reach the
/// surface.
pub trait Surface {
    fn size(&self) -> Viewport;

    /// Erases the whole surface.
    fn clear(&mut self);

    fn polyline(&mut self, points: &[Point], stroke: Stroke);

    /// Closed polygon with a fill and an optional outline.
    fn polygon(&mut self, points: &[Point], fill: Rgba, outline: Option<Stroke>);

    fn circle(&mut self, center: Point, radius: f32, fill: Option<Rgba>, outline: Option<Stroke>);

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.polyline(&[from, to], stroke);
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        width: u32,
        height: u32,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point>,
        fill: Rgba,
        outline: Option<Stroke>,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Option<Rgba>,
        outline: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
}

/// Surface that keeps the draw calls issued since the last clear.
///
/// Used by the headless host for tests and snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    size: Viewport,
    commands: Vec<DrawCommand>,
    clears: u64,
}

impl RecordingSurface {
    pub fn new(size: Viewport) -> Self {
        Self {
            size,
            commands: Vec::new(),
            clears: 0,
        }
    }

    /// Draw calls of the most recent frame, starting with its clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started on this surface.
    pub fn frames(&self) -> u64 {
        self.clears
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
        self.commands.push(DrawCommand::Clear {
            width: self.size.width,
            height: self.size.height,
        });
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn polygon(&mut self, points: &[Point], fill: Rgba, outline: Option<Stroke>) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            outline,
        });
    }

    fn circle(&mut self, center: Point, radius: f32, fill: Option<Rgba>, outline: Option<Stroke>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            outline,
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }
}
