use fieldconfig::{FieldConfig, SceneConfig};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::clock::{FrameClock, FrameTime};
use crate::field::Field;
use crate::host::{FrameToken, HeadlessHost, Host, Viewport};
use crate::sampler::Sampler;
use crate::surface::Surface;

#[derive(Debug, Error)]
pub enum AnimatorError {
    #[error("scene '{0}' is not defined")]
    UnknownScene(String),
    #[error("no scene requested and the configuration names no default")]
    NoScene,
}

/// Coarse lifecycle state reported by [`Animator::phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Constructed, or the viewport has a zero dimension. Waiting for a
    /// usable size.
    Deferred,
    /// The host could not provide a drawing surface. The animator does
    /// nothing further until torn down.
    Unavailable,
    /// A field exists and frames are being drawn.
    Running,
    TornDown,
}

enum State<S> {
    Deferred,
    Unavailable,
    Running { surface: S, field: Field },
    TornDown,
}

/// Drives one scene on one host: builds the field, steps and paints it on
/// every frame callback, rebuilds it on resize.
///
/// At most one frame callback is outstanding at any time. Tearing down
/// cancels it, so no frame runs afterwards.
pub struct Animator<H: Host> {
    host: H,
    scene: SceneConfig,
    reference_fps: f32,
    sampler: Sampler,
    clock: FrameClock,
    viewport: Viewport,
    state: State<H::Surface>,
    pending: Option<FrameToken>,
    last_frame: Option<FrameTime>,
}

impl<H: Host> Animator<H> {
    pub fn new(host: H, scene: SceneConfig, reference_fps: f32, seed: u64) -> Self {
        Self {
            host,
            scene,
            reference_fps,
            sampler: Sampler::new(seed),
            clock: FrameClock::new(),
            viewport: Viewport::default(),
            state: State::Deferred,
            pending: None,
            last_frame: None,
        }
    }

    /// Looks up `scene` (or the configured default) and builds an animator
    /// for it. Without an explicit seed the configuration's seed is used,
    /// falling back to a random one.
    pub fn from_config(
        host: H,
        config: &FieldConfig,
        scene: Option<&str>,
        seed: Option<u64>,
    ) -> Result<Self, AnimatorError> {
        let name = scene
            .or_else(|| config.default_scene())
            .ok_or(AnimatorError::NoScene)?;
        let scene = config
            .scene(name)
            .ok_or_else(|| AnimatorError::UnknownScene(name.to_string()))?
            .clone();
        let seed = seed.or(config.seed).unwrap_or_else(rand::random);
        debug!(scene = name, seed, "animator configured");
        Ok(Self::new(host, scene, config.reference_fps(), seed))
    }

    /// Reads the host's viewport and starts animating if it is usable.
    pub fn mount(&mut self) {
        if !matches!(self.state, State::Deferred) {
            return;
        }
        let viewport = self.host.viewport_size();
        self.apply_viewport(viewport);
    }

    /// Reacts to a viewport change reported by the host.
    ///
    /// A change to a usable size regenerates the field and restarts the
    /// clock. Reporting the current size again is a no-op.
    pub fn resize(&mut self, viewport: Viewport) {
        match self.state {
            State::TornDown | State::Unavailable => return,
            State::Running { .. } if viewport == self.viewport => return,
            _ => {}
        }
        self.apply_viewport(viewport);
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        self.cancel_pending();
        self.viewport = viewport;

        if viewport.is_empty() {
            debug!(%viewport, "viewport has no area; deferring");
            self.state = State::Deferred;
            return;
        }

        let Some(surface) = self.host.acquire_surface(viewport) else {
            debug!(%viewport, "no drawing surface available; field stays blank");
            self.state = State::Unavailable;
            return;
        };

        let field = Field::new(&self.scene, viewport, self.reference_fps, &mut self.sampler);
        debug!(
            %viewport,
            entities = field.counts().total(),
            "field generated"
        );
        self.clock.reset();
        self.last_frame = None;
        self.state = State::Running { surface, field };
        self.pending = self.host.schedule_frame();
    }

    /// Frame callback body: steps the field to `timestamp_ms`, repaints it
    /// and requests the next callback.
    ///
    /// Ignored unless a callback is outstanding.
    pub fn frame(&mut self, timestamp_ms: f64) {
        let State::Running { surface, field } = &mut self.state else {
            return;
        };
        if self.pending.take().is_none() {
            return;
        }

        let time = self.clock.tick(timestamp_ms);
        field.step(&time, &mut self.sampler);
        surface.clear();
        field.paint(surface);

        self.last_frame = Some(time);
        self.pending = self.host.schedule_frame();
    }

    /// Stops the animation for good. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.cancel_pending();
        if !matches!(self.state, State::TornDown) {
            debug!("animator torn down");
        }
        self.state = State::TornDown;
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.host.cancel_frame(token);
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Deferred => Phase::Deferred,
            State::Unavailable => Phase::Unavailable,
            State::Running { .. } => Phase::Running,
            State::TornDown => Phase::TornDown,
        }
    }

    pub fn field(&self) -> Option<&Field> {
        match &self.state {
            State::Running { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn surface(&self) -> Option<&H::Surface> {
        match &self.state {
            State::Running { surface, .. } => Some(surface),
            _ => None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Time state of the most recently drawn frame.
    pub fn last_frame(&self) -> Option<FrameTime> {
        self.last_frame
    }
}

impl<H: Host> Drop for Animator<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Animator<HeadlessHost> {
    /// Delivers the headless host's outstanding callback at `timestamp_ms`.
    /// Returns `false` when nothing was scheduled.
    pub fn fire_frame(&mut self, timestamp_ms: f64) -> bool {
        if self.host.fire().is_none() {
            return false;
        }
        self.frame(timestamp_ms);
        true
    }

    /// Fires up to `frames` callbacks spaced `frame_ms` apart starting at
    /// `start_ms`. Returns how many were delivered.
    pub fn run_frames(&mut self, start_ms: f64, frame_ms: f64, frames: u32) -> u32 {
        let mut delivered = 0;
        for index in 0..frames {
            if !self.fire_frame(start_ms + frame_ms * f64::from(index)) {
                break;
            }
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use fieldconfig::WaveConfig;

    use super::*;
    use crate::surface::RecordingSurface;

    fn waves(count: usize) -> SceneConfig {
        SceneConfig {
            waves: Some(WaveConfig {
                count,
                ..WaveConfig::default()
            }),
            ..SceneConfig::default()
        }
    }

    fn animator(viewport: Viewport) -> Animator<HeadlessHost> {
        Animator::new(HeadlessHost::new(viewport), waves(3), 60.0, 9)
    }

    #[test]
    fn mount_generates_field_and_schedules_one_frame() {
        let mut animator = animator(Viewport::new(320, 200));
        assert_eq!(animator.phase(), Phase::Deferred);
        animator.mount();
        assert_eq!(animator.phase(), Phase::Running);
        assert_eq!(animator.field().map(|f| f.waves().len()), Some(3));
        assert_eq!(animator.host().scheduled(), 1);
        assert_eq!(animator.pending_frame(), animator.host().outstanding());
    }

    #[test]
    fn mount_twice_keeps_the_field() {
        let mut animator = animator(Viewport::new(320, 200));
        animator.mount();
        let field = animator.field().cloned();
        animator.mount();
        assert_eq!(animator.field().cloned(), field);
        assert_eq!(animator.host().scheduled(), 1);
    }

    #[test]
    fn frames_before_mount_are_ignored() {
        let mut animator = animator(Viewport::new(320, 200));
        animator.frame(0.0);
        assert!(!animator.fire_frame(16.0));
        assert_eq!(animator.last_frame(), None);

        animator.mount();
        assert!(animator.fire_frame(32.0));
        assert_eq!(animator.surface().map(RecordingSurface::frames), Some(1));
        assert_eq!(animator.last_frame().map(|t| t.elapsed), Some(0.0));
    }

    #[test]
    fn each_frame_clears_before_painting() {
        let mut animator = animator(Viewport::new(320, 200));
        animator.mount();
        assert_eq!(animator.run_frames(0.0, 16.0, 4), 4);
        let surface = animator.surface().unwrap();
        assert_eq!(surface.frames(), 4);
        assert_eq!(surface.commands().len(), 1 + 3);
        assert_eq!(animator.last_frame().map(|t| t.frame_index), Some(3));
    }

    #[test]
    fn drop_cancels_outstanding_frame() {
        let mut animator = animator(Viewport::new(320, 200));
        animator.mount();
        let token = animator.pending_frame();
        animator.teardown();
        assert_eq!(animator.host().cancelled(), token.as_slice());
        assert_eq!(animator.host().outstanding(), None);
    }

    #[test]
    fn unknown_scene_is_reported() {
        let config = FieldConfig::builtin().unwrap();
        let err = Animator::from_config(
            HeadlessHost::new(Viewport::new(10, 10)),
            &config,
            Some("missing"),
            Some(1),
        )
        .err()
        .unwrap();
        assert!(matches!(err, AnimatorError::UnknownScene(name) if name == "missing"));
    }

    #[test]
    fn default_scene_comes_from_config() {
        let config = FieldConfig::builtin().unwrap();
        let animator = Animator::from_config(
            HeadlessHost::new(Viewport::new(10, 10)),
            &config,
            None,
            Some(1),
        )
        .unwrap();
        assert!(animator.scene().particles.is_some());
    }
}
