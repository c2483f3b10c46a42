use std::f64::consts::TAU;

use animator::{Point, Rgba, Stroke, Surface, Viewport};
use web_sys::CanvasRenderingContext2d;

/// [`Surface`] backed by a canvas 2D context.
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    size: Viewport,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d, size: Viewport) -> Self {
        Self { context, size }
    }

    fn trace(&self, points: &[Point]) {
        self.context.begin_path();
        let mut points = points.iter();
        if let Some(first) = points.next() {
            self.context.move_to(f64::from(first.x), f64::from(first.y));
        }
        for point in points {
            self.context.line_to(f64::from(point.x), f64::from(point.y));
        }
    }

    fn apply_stroke(&self, stroke: Stroke) {
        self.context.set_stroke_style_str(&stroke.paint.css());
        self.context.set_line_width(f64::from(stroke.width));
        self.context.stroke();
    }

    fn apply_fill(&self, fill: Rgba) {
        self.context.set_fill_style_str(&fill.css());
        self.context.fill();
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            f64::from(self.size.width),
            f64::from(self.size.height),
        );
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.trace(points);
        self.apply_stroke(stroke);
    }

    fn polygon(&mut self, points: &[Point], fill: Rgba, outline: Option<Stroke>) {
        if points.len() < 3 {
            return;
        }
        self.trace(points);
        self.context.close_path();
        self.apply_fill(fill);
        if let Some(outline) = outline {
            self.apply_stroke(outline);
        }
    }

    fn circle(&mut self, center: Point, radius: f32, fill: Option<Rgba>, outline: Option<Stroke>) {
        self.context.begin_path();
        let arc = self.context.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius.max(0.0)),
            0.0,
            TAU,
        );
        if arc.is_err() {
            return;
        }
        if let Some(fill) = fill {
            self.apply_fill(fill);
        }
        if let Some(outline) = outline {
            self.apply_stroke(outline);
        }
    }
}
