use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::range::SampleRange;
use crate::{deserialize_duration, ConfigError};

/// Everything needed to populate one animated field.
///
/// Each variant block is optional; a missing block means the variant is
/// absent from the scene. Sampling ranges default to the values the bundled
/// backgrounds were tuned with.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waves: Option<WaveConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particles: Option<ParticleConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<NodeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<LinkConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rings: Option<RingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparks: Option<SparkConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals: Option<SignalConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beacons: Option<BeaconConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shapes: Option<ShapeConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            waves: None,
            particles: None,
            nodes: None,
            links: None,
            rings: None,
            sparks: None,
            signals: None,
            lines: None,
            beacons: None,
            shapes: None,
        }
    }
}

fn default_palette() -> Vec<Color> {
    vec![Color::GOLD]
}

/// Sinusoidal strokes spanning the full surface width.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveConfig {
    pub count: usize,
    pub amplitude: SampleRange,
    pub frequency: SampleRange,
    pub speed: SampleRange,
    pub opacity: SampleRange,
    pub palette: Option<Vec<Color>>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            count: 8,
            amplitude: SampleRange::new(10.0, 40.0),
            frequency: SampleRange::new(0.005, 0.015),
            speed: SampleRange::new(0.2, 0.7),
            opacity: SampleRange::new(0.05, 0.15),
            palette: None,
        }
    }
}

/// Dots orbiting a fixed center, optionally linked to close neighbours.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    pub count: usize,
    pub orbit_radius: SampleRange,
    pub size: SampleRange,
    pub opacity: SampleRange,
    /// Angle advanced per reference frame, in radians.
    pub orbit_speed: f32,
    pub link_distance: Option<f32>,
    pub link_opacity: f32,
    pub palette: Option<Vec<Color>>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            orbit_radius: SampleRange::new(50.0, 150.0),
            size: SampleRange::new(1.0, 4.0),
            opacity: SampleRange::new(0.1, 0.6),
            orbit_speed: 0.005,
            link_distance: Some(150.0),
            link_opacity: 0.1,
            palette: None,
        }
    }
}

/// Wandering glyphs that seek random targets; the palette is indexed by kind.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    pub count: usize,
    pub size: SampleRange,
    pub seek_speed: SampleRange,
    pub pulse_speed: SampleRange,
    pub rotation_speed: SampleRange,
    pub palette: Option<Vec<Color>>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            count: 30,
            size: SampleRange::new(6.0, 14.0),
            seek_speed: SampleRange::new(0.01, 0.03),
            pulse_speed: SampleRange::new(0.02, 0.07),
            rotation_speed: SampleRange::new(-0.01, 0.01),
            palette: None,
        }
    }
}

/// Edges between random node pairs, carrying a moving flow dot.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    pub count: usize,
    pub distance: f32,
    pub strength: SampleRange,
    pub flow_speed: SampleRange,
    pub active_chance: f32,
    pub toggle_chance: f32,
    pub color: Color,
    pub flow_color: Color,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            count: 40,
            distance: 200.0,
            strength: SampleRange::new(0.1, 0.4),
            flow_speed: SampleRange::new(0.01, 0.03),
            active_chance: 0.7,
            toggle_chance: 0.005,
            color: Color::WHITE,
            flow_color: Color::GOLD,
        }
    }
}

/// Expanding rings that fade out and leave the field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingConfig {
    pub count: usize,
    pub max_radius: SampleRange,
    pub speed: SampleRange,
    pub opacity: SampleRange,
    pub thickness: SampleRange,
    /// Opacity lost per frame.
    pub decay: f32,
    /// Sparks emitted at the center of every spawned ring.
    pub sparks_per_ring: usize,
    pub spawn: Option<SpawnConfig>,
    pub palette: Option<Vec<Color>>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            count: 5,
            max_radius: SampleRange::new(50.0, 200.0),
            speed: SampleRange::new(0.5, 1.5),
            opacity: SampleRange::new(0.2, 0.6),
            thickness: SampleRange::new(1.0, 3.0),
            decay: 0.002,
            sparks_per_ring: 0,
            spawn: None,
            palette: None,
        }
    }
}

/// Short-lived shapes drifting away from an origin.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SparkConfig {
    pub count: usize,
    pub size: SampleRange,
    pub velocity: SampleRange,
    /// Lifetime in frames.
    pub max_life: SampleRange,
    pub damping: f32,
    pub palette: Option<Vec<Color>>,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            count: 0,
            size: SampleRange::new(1.0, 4.0),
            velocity: SampleRange::new(-1.0, 1.0),
            max_life: SampleRange::new(50.0, 150.0),
            damping: 0.98,
            palette: None,
        }
    }
}

/// Small drifting waveform snippets.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalConfig {
    pub count: usize,
    pub amplitude: SampleRange,
    pub speed: SampleRange,
    pub opacity: SampleRange,
    /// Inclusive bounds on the number of segments per snippet.
    pub points: [u32; 2],
    pub palette: Option<Vec<Color>>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            count: 8,
            amplitude: SampleRange::new(20.0, 70.0),
            speed: SampleRange::new(0.01, 0.03),
            opacity: SampleRange::new(0.1, 0.4),
            points: [3, 5],
            palette: None,
        }
    }
}

/// Hairlines crossing the surface from one edge to the opposite edge.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineConfig {
    pub count: usize,
    pub target_opacity: SampleRange,
    pub fade_speed: SampleRange,
    pub retarget_chance: f32,
    pub palette: Option<Vec<Color>>,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            count: 15,
            target_opacity: SampleRange::new(0.05, 0.2),
            fade_speed: SampleRange::new(0.002, 0.007),
            retarget_chance: 0.005,
            palette: None,
        }
    }
}

/// Stationary pulsing dots.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeaconConfig {
    pub count: usize,
    pub size: SampleRange,
    pub pulse_speed: SampleRange,
    pub max_pulse: SampleRange,
    pub palette: Option<Vec<Color>>,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            count: 20,
            size: SampleRange::new(1.0, 3.0),
            pulse_speed: SampleRange::new(0.01, 0.03),
            max_pulse: SampleRange::new(3.0, 8.0),
            palette: None,
        }
    }
}

/// Slowly rotating outlined polygons.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeConfig {
    pub count: usize,
    pub size: SampleRange,
    pub rotation_speed: SampleRange,
    pub opacity: SampleRange,
    pub palette: Option<Vec<Color>>,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            count: 8,
            size: SampleRange::new(20.0, 50.0),
            rotation_speed: SampleRange::new(-0.005, 0.045),
            opacity: SampleRange::new(0.05, 0.15),
            palette: None,
        }
    }
}

/// Cadence for adding transient entities while the field runs.
///
/// `initial` spawns are staggered `stagger` apart starting at time zero;
/// periodic spawns follow every `interval`. Spawns are skipped while the
/// live count sits at `cap`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpawnConfig {
    #[serde(default)]
    pub initial: u32,
    #[serde(
        default = "default_stagger",
        deserialize_with = "deserialize_duration"
    )]
    pub stagger: Duration,
    #[serde(
        default = "default_interval",
        deserialize_with = "deserialize_duration"
    )]
    pub interval: Duration,
    #[serde(default)]
    pub cap: Option<usize>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial: 0,
            stagger: default_stagger(),
            interval: default_interval(),
            cap: None,
        }
    }
}

fn default_stagger() -> Duration {
    Duration::from_secs(1)
}

fn default_interval() -> Duration {
    Duration::from_secs(2)
}

impl SceneConfig {
    /// Total number of entities allocated when the scene is constructed.
    pub fn initial_entity_count(&self) -> usize {
        self.waves.as_ref().map_or(0, |c| c.count)
            + self.particles.as_ref().map_or(0, |c| c.count)
            + self.nodes.as_ref().map_or(0, |c| c.count)
            + self.links.as_ref().map_or(0, |c| c.count)
            + self.rings.as_ref().map_or(0, |c| c.count)
            + self.sparks.as_ref().map_or(0, |c| c.count)
            + self.signals.as_ref().map_or(0, |c| c.count)
            + self.lines.as_ref().map_or(0, |c| c.count)
            + self.beacons.as_ref().map_or(0, |c| c.count)
            + self.shapes.as_ref().map_or(0, |c| c.count)
    }

    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "scene '{name}' palette must contain at least one color"
            )));
        }

        let check = SceneCheck { scene: name };

        if let Some(waves) = &self.waves {
            check.range("waves.amplitude", waves.amplitude)?;
            check.range("waves.frequency", waves.frequency)?;
            check.range("waves.speed", waves.speed)?;
            check.opacity("waves.opacity", waves.opacity)?;
            check.palette("waves.palette", waves.palette.as_deref())?;
        }

        if let Some(particles) = &self.particles {
            check.non_negative("particles.orbit_radius", particles.orbit_radius)?;
            check.non_negative("particles.size", particles.size)?;
            check.opacity("particles.opacity", particles.opacity)?;
            check.finite("particles.orbit_speed", particles.orbit_speed)?;
            if let Some(distance) = particles.link_distance {
                check.positive("particles.link_distance", distance)?;
            }
            check.probability("particles.link_opacity", particles.link_opacity)?;
            check.palette("particles.palette", particles.palette.as_deref())?;
        }

        if let Some(nodes) = &self.nodes {
            check.non_negative("nodes.size", nodes.size)?;
            check.unit("nodes.seek_speed", nodes.seek_speed)?;
            check.range("nodes.pulse_speed", nodes.pulse_speed)?;
            check.range("nodes.rotation_speed", nodes.rotation_speed)?;
            check.palette("nodes.palette", nodes.palette.as_deref())?;
        }

        if let Some(links) = &self.links {
            if links.count > 0 && self.nodes.is_none() {
                return Err(ConfigError::Invalid(format!(
                    "scene '{name}' defines links without nodes"
                )));
            }
            check.positive("links.distance", links.distance)?;
            check.opacity("links.strength", links.strength)?;
            check.range("links.flow_speed", links.flow_speed)?;
            check.probability("links.active_chance", links.active_chance)?;
            check.probability("links.toggle_chance", links.toggle_chance)?;
        }

        if let Some(rings) = &self.rings {
            check.non_negative("rings.max_radius", rings.max_radius)?;
            check.non_negative("rings.speed", rings.speed)?;
            check.opacity("rings.opacity", rings.opacity)?;
            check.non_negative("rings.thickness", rings.thickness)?;
            if !rings.decay.is_finite() || rings.decay < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "scene '{name}' rings.decay must be a non-negative number"
                )));
            }
            if let Some(spawn) = &rings.spawn {
                check.spawn("rings.spawn", spawn)?;
            }
            check.palette("rings.palette", rings.palette.as_deref())?;
        }

        if let Some(sparks) = &self.sparks {
            check.non_negative("sparks.size", sparks.size)?;
            check.range("sparks.velocity", sparks.velocity)?;
            check.non_negative("sparks.max_life", sparks.max_life)?;
            if !(sparks.damping > 0.0 && sparks.damping <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "scene '{name}' sparks.damping must be within (0, 1]"
                )));
            }
            check.palette("sparks.palette", sparks.palette.as_deref())?;
        }

        if let Some(signals) = &self.signals {
            check.non_negative("signals.amplitude", signals.amplitude)?;
            check.range("signals.speed", signals.speed)?;
            check.opacity("signals.opacity", signals.opacity)?;
            let [low, high] = signals.points;
            if low < 1 || low > high {
                return Err(ConfigError::Invalid(format!(
                    "scene '{name}' signals.points must satisfy 1 <= min <= max"
                )));
            }
            check.palette("signals.palette", signals.palette.as_deref())?;
        }

        if let Some(lines) = &self.lines {
            check.opacity("lines.target_opacity", lines.target_opacity)?;
            check.non_negative("lines.fade_speed", lines.fade_speed)?;
            check.probability("lines.retarget_chance", lines.retarget_chance)?;
            check.palette("lines.palette", lines.palette.as_deref())?;
        }

        if let Some(beacons) = &self.beacons {
            check.non_negative("beacons.size", beacons.size)?;
            check.non_negative("beacons.pulse_speed", beacons.pulse_speed)?;
            check.non_negative("beacons.max_pulse", beacons.max_pulse)?;
            check.palette("beacons.palette", beacons.palette.as_deref())?;
        }

        if let Some(shapes) = &self.shapes {
            check.non_negative("shapes.size", shapes.size)?;
            check.range("shapes.rotation_speed", shapes.rotation_speed)?;
            check.opacity("shapes.opacity", shapes.opacity)?;
            check.palette("shapes.palette", shapes.palette.as_deref())?;
        }

        Ok(())
    }
}

struct SceneCheck<'a> {
    scene: &'a str,
}

impl SceneCheck<'_> {
    fn range(&self, field: &str, range: SampleRange) -> Result<(), ConfigError> {
        if !range.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "scene '{}' {field} {range} must be finite with min <= max",
                self.scene
            )));
        }
        Ok(())
    }

    fn non_negative(&self, field: &str, range: SampleRange) -> Result<(), ConfigError> {
        self.range(field, range)?;
        if range.min < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "scene '{}' {field} {range} must not be negative",
                self.scene
            )));
        }
        Ok(())
    }

    fn opacity(&self, field: &str, range: SampleRange) -> Result<(), ConfigError> {
        self.unit(field, range)
    }

    fn unit(&self, field: &str, range: SampleRange) -> Result<(), ConfigError> {
        self.range(field, range)?;
        if range.min < 0.0 || range.max > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "scene '{}' {field} {range} must lie within [0, 1]",
                self.scene
            )));
        }
        Ok(())
    }

    fn finite(&self, field: &str, value: f32) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "scene '{}' {field} must be a finite number",
                self.scene
            )));
        }
        Ok(())
    }

    fn positive(&self, field: &str, value: f32) -> Result<(), ConfigError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "scene '{}' {field} must be greater than zero",
                self.scene
            )));
        }
        Ok(())
    }

    fn probability(&self, field: &str, value: f32) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::Invalid(format!(
                "scene '{}' {field} must lie within [0, 1]",
                self.scene
            )));
        }
        Ok(())
    }

    fn palette(&self, field: &str, palette: Option<&[Color]>) -> Result<(), ConfigError> {
        if matches!(palette, Some(colors) if colors.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "scene '{}' {field} must not be empty when set",
                self.scene
            )));
        }
        Ok(())
    }

    fn spawn(&self, field: &str, spawn: &SpawnConfig) -> Result<(), ConfigError> {
        if spawn.interval.is_zero() {
            return Err(ConfigError::Invalid(format!(
                "scene '{}' {field}.interval must be greater than zero",
                self.scene
            )));
        }
        Ok(())
    }
}
