use fieldconfig::{Color, LinkConfig, NodeConfig};

use super::{square, triangle};
use crate::host::Viewport;
use crate::sampler::Sampler;
use crate::surface::{Point, Rgba, Stroke, Surface};

/// Distance under which a node counts as having reached its target.
const ARRIVAL_RADIUS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Circle,
    Square,
    Triangle,
}

impl NodeKind {
    const ALL: [NodeKind; 3] = [NodeKind::Circle, NodeKind::Square, NodeKind::Triangle];

    fn index(self) -> usize {
        match self {
            NodeKind::Circle => 0,
            NodeKind::Square => 1,
            NodeKind::Triangle => 2,
        }
    }
}

/// Pulsing glyph easing toward a random target, re-targeting on arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    position: Point,
    target: Point,
    size: f32,
    seek: f32,
    kind: NodeKind,
    color: Color,
    pulse: f32,
    pulse_speed: f32,
    rotation: f32,
    rotation_speed: f32,
}

impl Node {
    pub(crate) fn sample(
        config: &NodeConfig,
        palette: &[Color],
        viewport: Viewport,
        sampler: &mut Sampler,
    ) -> Self {
        let position = sampler.point_in(viewport);
        let size = sampler.range(config.size);
        let target = sampler.point_in(viewport);
        let seek = sampler.range(config.seek_speed);
        let kind = NodeKind::ALL[sampler.index(NodeKind::ALL.len())];
        let color = if palette.is_empty() {
            Color::GOLD
        } else {
            palette[kind.index() % palette.len()]
        };
        Self {
            position,
            target,
            size,
            seek,
            kind,
            color,
            pulse: sampler.angle(),
            pulse_speed: sampler.range(config.pulse_speed),
            rotation: sampler.angle(),
            rotation_speed: sampler.range(config.rotation_speed),
        }
    }

    pub(crate) fn update(&mut self, steps: f32, viewport: Viewport, sampler: &mut Sampler) {
        let pull = (self.seek * steps).min(1.0);
        self.position = self.position.lerp(self.target, pull);

        if (self.position.x - self.target.x).abs() < ARRIVAL_RADIUS
            && (self.position.y - self.target.y).abs() < ARRIVAL_RADIUS
        {
            self.target = sampler.point_in(viewport);
        }

        self.pulse += self.pulse_speed * steps;
        self.rotation += self.rotation_speed * steps;
    }

    pub(crate) fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let wobble = self.pulse.sin();
        let extent = self.size + wobble * 1.5;
        let opacity = 0.3 + wobble * 0.2;
        let fill = Rgba::new(self.color, opacity);
        let outline = Some(Stroke::new(Rgba::new(self.color, opacity * 1.5), 1.0));

        match self.kind {
            NodeKind::Circle => surface.circle(self.position, extent / 2.0, Some(fill), outline),
            NodeKind::Square => surface.polygon(
                &square(self.position, extent * 0.4, self.rotation),
                fill,
                outline,
            ),
            NodeKind::Triangle => surface.polygon(
                &triangle(self.position, extent / 2.0, self.rotation),
                fill,
                outline,
            ),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Edge between two nodes, referenced by index into the node list.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    a: usize,
    b: usize,
    strength: f32,
    flow: f32,
    flow_speed: f32,
    active: bool,
}

impl Link {
    /// Picks two distinct nodes; `None` when fewer than two exist.
    pub(crate) fn sample(config: &LinkConfig, nodes: usize, sampler: &mut Sampler) -> Option<Self> {
        if nodes < 2 {
            return None;
        }
        let a = sampler.index(nodes);
        let mut b = sampler.index(nodes - 1);
        if b >= a {
            b += 1;
        }
        Some(Self {
            a,
            b,
            strength: sampler.range(config.strength),
            active: sampler.chance(config.active_chance),
            flow: 0.0,
            flow_speed: sampler.range(config.flow_speed),
        })
    }

    pub(crate) fn update(&mut self, config: &LinkConfig, steps: f32, sampler: &mut Sampler) {
        self.flow += self.flow_speed * steps;
        if self.flow > 1.0 {
            self.flow = 0.0;
        }
        if sampler.chance(config.toggle_chance) {
            self.active = !self.active;
        }
    }

    pub(crate) fn draw<S: Surface + ?Sized>(
        &self,
        config: &LinkConfig,
        nodes: &[Node],
        surface: &mut S,
    ) {
        if !self.active {
            return;
        }
        let (Some(a), Some(b)) = (nodes.get(self.a), nodes.get(self.b)) else {
            return;
        };
        let (from, to) = (a.position, b.position);
        let distance = from.distance(to);
        if distance > config.distance {
            return;
        }

        let opacity = (1.0 - distance / config.distance) * self.strength;
        surface.line(
            from,
            to,
            Stroke::new(Rgba::new(config.color, opacity * 0.3), 1.0),
        );
        surface.circle(
            from.lerp(to, self.flow),
            2.0,
            Some(Rgba::new(config.flow_color, opacity)),
            None,
        );
    }

    /// Indices of the two connected nodes.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    const VIEWPORT: Viewport = Viewport::new(400, 300);

    fn node(position: Point, target: Point) -> Node {
        Node {
            position,
            target,
            size: 6.0,
            seek: 0.5,
            kind: NodeKind::Circle,
            color: Color::GOLD,
            pulse: 0.0,
            pulse_speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    fn link(flow: f32, active: bool) -> Link {
        Link {
            a: 0,
            b: 1,
            strength: 1.0,
            flow,
            flow_speed: 0.25,
            active,
        }
    }

    fn steady() -> LinkConfig {
        LinkConfig {
            toggle_chance: 0.0,
            ..LinkConfig::default()
        }
    }

    fn painted(link: &Link, nodes: &[Node]) -> usize {
        let mut surface = RecordingSurface::new(VIEWPORT);
        link.draw(&steady(), nodes, &mut surface);
        surface.commands().len()
    }

    #[test]
    fn node_keeps_target_while_far_away() {
        let mut sampler = Sampler::new(1);
        let target = Point::new(200.0, 100.0);
        let mut node = node(Point::new(100.0, 100.0), target);
        node.update(1.0, VIEWPORT, &mut sampler);
        assert_eq!(node.position(), Point::new(150.0, 100.0));
        assert_eq!(node.target, target);
    }

    #[test]
    fn node_retargets_within_arrival_radius() {
        let mut sampler = Sampler::new(1);
        let target = Point::new(104.0, 100.0);
        let mut node = node(Point::new(100.0, 100.0), target);
        node.update(1.0, VIEWPORT, &mut sampler);
        assert_eq!(node.position(), Point::new(102.0, 100.0));
        assert_ne!(node.target, target);
        assert!((0.0..=400.0).contains(&node.target.x));
        assert!((0.0..=300.0).contains(&node.target.y));
    }

    #[test]
    fn node_seek_never_overshoots() {
        let mut sampler = Sampler::new(1);
        let mut node = node(Point::new(0.0, 0.0), Point::new(300.0, 0.0));
        node.update(4.0, VIEWPORT, &mut sampler);
        assert_eq!(node.position(), Point::new(300.0, 0.0));
    }

    #[test]
    fn link_flow_wraps_past_one() {
        let mut sampler = Sampler::new(1);
        let mut link = link(0.75, true);
        link.update(&steady(), 1.0, &mut sampler);
        assert_eq!(link.flow, 1.0);
        link.update(&steady(), 1.0, &mut sampler);
        assert_eq!(link.flow, 0.0);
        assert!(link.is_active());
    }

    #[test]
    fn link_draws_only_within_distance() {
        let origin = Point::new(0.0, 0.0);
        let near = [node(origin, origin), node(Point::new(200.0, 0.0), origin)];
        let far = [node(origin, origin), node(Point::new(200.5, 0.0), origin)];

        assert_eq!(painted(&link(0.5, true), &near), 2);
        assert_eq!(painted(&link(0.5, true), &far), 0);
        assert_eq!(painted(&link(0.5, false), &near), 0);
    }
}
