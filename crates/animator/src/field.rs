use fieldconfig::{Color, SceneConfig};
use serde::Serialize;

use crate::clock::FrameTime;
use crate::entity::{Beacon, Line, Link, Node, Particle, Ring, Shape, Signal, Spark, Wave};
use crate::host::Viewport;
use crate::sampler::Sampler;
use crate::spawner::Spawner;
use crate::surface::{Point, Rgba, Stroke, Surface};

/// Number of live entities per variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub waves: usize,
    pub particles: usize,
    pub nodes: usize,
    pub links: usize,
    pub rings: usize,
    pub sparks: usize,
    pub signals: usize,
    pub lines: usize,
    pub beacons: usize,
    pub shapes: usize,
}

impl EntityCounts {
    pub fn total(&self) -> usize {
        self.waves
            + self.particles
            + self.nodes
            + self.links
            + self.rings
            + self.sparks
            + self.signals
            + self.lines
            + self.beacons
            + self.shapes
    }
}

fn palette<'a>(scene: &'a [Color], own: Option<&'a Vec<Color>>) -> &'a [Color] {
    match own {
        Some(colors) if !colors.is_empty() => colors,
        _ => scene,
    }
}

/// The full entity set of one scene at one viewport size.
///
/// Painted back to front in a fixed layer order: lines, links, rings,
/// sparks, waves, signals, particle links, particles, nodes, beacons,
/// shapes. Within a layer entities paint in creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    scene: SceneConfig,
    viewport: Viewport,
    reference_fps: f32,
    elapsed: f32,
    waves: Vec<Wave>,
    particles: Vec<Particle>,
    nodes: Vec<Node>,
    links: Vec<Link>,
    rings: Vec<Ring>,
    sparks: Vec<Spark>,
    signals: Vec<Signal>,
    lines: Vec<Line>,
    beacons: Vec<Beacon>,
    shapes: Vec<Shape>,
    ring_spawner: Option<Spawner>,
}

impl Field {
    pub fn new(
        scene: &SceneConfig,
        viewport: Viewport,
        reference_fps: f32,
        sampler: &mut Sampler,
    ) -> Self {
        let colors = scene.palette.as_slice();

        let waves = scene.waves.as_ref().map_or_else(Vec::new, |cfg| {
            let palette = palette(colors, cfg.palette.as_ref());
            (0..cfg.count)
                .map(|_| Wave::sample(cfg, palette, viewport, sampler))
                .collect()
        });

        let particles = scene.particles.as_ref().map_or_else(Vec::new, |cfg| {
            let palette = palette(colors, cfg.palette.as_ref());
            (0..cfg.count)
                .map(|_| Particle::sample(cfg, palette, viewport, sampler))
                .collect()
        });

        let nodes: Vec<Node> = scene.nodes.as_ref().map_or_else(Vec::new, |cfg| {
            let palette = palette(colors, cfg.palette.as_ref());
            (0..cfg.count)
                .map(|_| Node::sample(cfg, palette, viewport, sampler))
                .collect()
        });

        let links = scene.links.as_ref().map_or_else(Vec::new, |cfg| {
            (0..cfg.count)
                .filter_map(|_| Link::sample(cfg, nodes.len(), sampler))
                .collect()
        });

        let rings = scene.rings.as_ref().map_or_else(Vec::new, |cfg| {
            let palette = palette(colors, cfg.palette.as_ref());
            (0..cfg.count)
                .map(|_| {
                    let center = sampler.point_in(viewport);
                    Ring::sample(cfg, palette, center, sampler)
                })
                .collect()
        });

        let sparks = scene.sparks.as_ref().map_or_else(Vec::new, |cfg| {
            let palette = palette(colors, cfg.palette.as_ref());
            (0..cfg.count)
                .map(|_| {
                    let origin = sampler.point_in(viewport);
                    Spark::sample(cfg, palette, origin, sampler)
                })
                .collect()
        });

        let signals = scene.signals.as_ref().map_or_else(Vec::new, |cfg| {
            let palette = palette(colors, cfg.palette.as_ref());
            (0..cfg.count)
                .map(|_| Signal::sample(cfg, palette, viewport, sampler))
                .collect()
        });

        let lines = scene.lines.as_ref().map_or_else(Vec::new, |cfg| {
            let palette = palette(colors, cfg.palette.as_ref());
            (0..cfg.count)
                .map(|_| Line::sample(cfg, palette, viewport, sampler))
                .collect()
        });

        let beacons = scene.beacons.as_ref().map_or_else(Vec::new, |cfg| {
            let palette = palette(colors, cfg.palette.as_ref());
            (0..cfg.count)
                .map(|_| Beacon::sample(cfg, palette, viewport, sampler))
                .collect()
        });

        let shapes = scene.shapes.as_ref().map_or_else(Vec::new, |cfg| {
            let palette = palette(colors, cfg.palette.as_ref());
            (0..cfg.count)
                .map(|_| Shape::sample(cfg, palette, viewport, sampler))
                .collect()
        });

        let ring_spawner = scene
            .rings
            .as_ref()
            .and_then(|cfg| cfg.spawn.as_ref())
            .map(Spawner::new);

        Self {
            scene: scene.clone(),
            viewport,
            reference_fps,
            elapsed: 0.0,
            waves,
            particles,
            nodes,
            links,
            rings,
            sparks,
            signals,
            lines,
            beacons,
            shapes,
            ring_spawner,
        }
    }

    /// Advances every entity by one frame.
    pub fn step(&mut self, time: &FrameTime, sampler: &mut Sampler) {
        let steps = time.steps(self.reference_fps);
        self.elapsed = time.elapsed as f32;

        let live = self.rings.len();
        let due = match self.ring_spawner.as_mut() {
            Some(spawner) => spawner.due(time.elapsed_duration(), live),
            None => 0,
        };
        for _ in 0..due {
            self.spawn_ring(sampler);
        }

        for wave in &mut self.waves {
            wave.update(steps);
        }

        if let Some(cfg) = &self.scene.particles {
            for particle in &mut self.particles {
                particle.update(cfg.orbit_speed, steps);
            }
        }

        for node in &mut self.nodes {
            node.update(steps, self.viewport, sampler);
        }

        if let Some(cfg) = &self.scene.links {
            for link in &mut self.links {
                link.update(cfg, steps, sampler);
            }
        }

        for ring in &mut self.rings {
            ring.update();
        }
        self.rings.retain(|ring| !ring.is_spent());

        for spark in &mut self.sparks {
            spark.update();
        }
        self.sparks.retain(|spark| !spark.is_spent());

        for signal in &mut self.signals {
            signal.update(self.elapsed, steps, self.viewport);
        }

        if let Some(cfg) = &self.scene.lines {
            for line in &mut self.lines {
                line.update(cfg, steps, sampler);
            }
        }

        for beacon in &mut self.beacons {
            beacon.update(steps);
        }

        for shape in &mut self.shapes {
            shape.update(steps);
        }
    }

    fn spawn_ring(&mut self, sampler: &mut Sampler) {
        let Some(cfg) = &self.scene.rings else {
            return;
        };
        let center = sampler.point_in(self.viewport);
        let ring_palette = palette(&self.scene.palette, cfg.palette.as_ref());
        self.rings
            .push(Ring::sample(cfg, ring_palette, center, sampler));

        if cfg.sparks_per_ring == 0 {
            return;
        }
        let spark_cfg = self.scene.sparks.clone().unwrap_or_default();
        let spark_palette = palette(&self.scene.palette, spark_cfg.palette.as_ref());
        for _ in 0..cfg.sparks_per_ring {
            self.sparks
                .push(Spark::sample(&spark_cfg, spark_palette, center, sampler));
        }
    }

    /// Paints the current state; the caller clears the surface first.
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        for line in &self.lines {
            line.draw(surface);
        }

        if let Some(cfg) = &self.scene.links {
            for link in &self.links {
                link.draw(cfg, &self.nodes, surface);
            }
        }

        for ring in &self.rings {
            ring.draw(surface);
        }

        for spark in &self.sparks {
            spark.draw(surface);
        }

        for wave in &self.waves {
            wave.draw(surface, self.viewport.width);
        }

        for signal in &self.signals {
            signal.draw(surface, self.elapsed);
        }

        self.paint_particle_links(surface);
        for particle in &self.particles {
            particle.draw(surface);
        }

        for node in &self.nodes {
            node.draw(surface);
        }

        for beacon in &self.beacons {
            beacon.draw(surface);
        }

        for shape in &self.shapes {
            shape.draw(surface);
        }
    }

    /// Joins particles closer than the link distance, using the positions
    /// settled by this frame's update.
    fn paint_particle_links<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(cfg) = &self.scene.particles else {
            return;
        };
        let Some(max_distance) = cfg.link_distance else {
            return;
        };

        let positions: Vec<Point> = self.particles.iter().map(Particle::position).collect();
        for (i, from) in positions.iter().enumerate() {
            for to in &positions[i + 1..] {
                let distance = from.distance(*to);
                if distance >= max_distance {
                    continue;
                }
                let alpha = cfg.link_opacity * (1.0 - distance / max_distance);
                surface.line(
                    *from,
                    *to,
                    Stroke::new(Rgba::new(self.particles[i].color(), alpha), 0.5),
                );
            }
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            waves: self.waves.len(),
            particles: self.particles.len(),
            nodes: self.nodes.len(),
            links: self.links.len(),
            rings: self.rings.len(),
            sparks: self.sparks.len(),
            signals: self.signals.len(),
            lines: self.lines.len(),
            beacons: self.beacons.len(),
            shapes: self.shapes.len(),
        }
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn beacons(&self) -> &[Beacon] {
        &self.beacons
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}
