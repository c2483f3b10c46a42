//! Entity variants populating a field.
//!
//! Every variant follows the same shape: `sample` draws the constant
//! parameters from the scene configuration, `update` advances the mutable
//! state for one frame, and `draw` paints the current state. Constants are
//! never touched after sampling.

mod network;
mod orbit;
mod ornament;
mod signal;
mod transient;
mod wave;

use std::f32::consts::TAU;

pub use network::{Link, Node, NodeKind};
pub use orbit::Particle;
pub use ornament::{Beacon, Line, Shape, ShapeKind};
pub use signal::{Signal, Waveform};
pub use transient::{Ring, Spark, SparkShape};
pub use wave::{Wave, WAVE_PHASE_STEP, WAVE_SAMPLE_SPACING};

use crate::surface::Point;

/// Isosceles triangle pointing up in local space, `half` units from center.
pub(crate) fn triangle(center: Point, half: f32, rotation: f32) -> Vec<Point> {
    vec![
        center.local(0.0, -half, rotation),
        center.local(-half, half, rotation),
        center.local(half, half, rotation),
    ]
}

pub(crate) fn square(center: Point, half: f32, rotation: f32) -> Vec<Point> {
    vec![
        center.local(-half, -half, rotation),
        center.local(half, -half, rotation),
        center.local(half, half, rotation),
        center.local(-half, half, rotation),
    ]
}

pub(crate) fn regular_polygon(center: Point, radius: f32, sides: usize, rotation: f32) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let angle = i as f32 * TAU / sides as f32;
            center.local(radius * angle.cos(), radius * angle.sin(), rotation)
        })
        .collect()
}
