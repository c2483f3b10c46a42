use serde::Serialize;

use crate::surface::{RecordingSurface, Surface};

/// Size of the drawing region in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A viewport with a zero dimension cannot host a field.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Handle returned when a frame callback is requested; used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FrameToken(pub u64);

/// Windowing environment the animator runs inside.
///
/// The host delivers frame callbacks by calling [`crate::Animator::frame`]
/// for every token it handed out and did not see cancelled, and delivers
/// viewport changes through [`crate::Animator::resize`].
pub trait Host {
    type Surface: Surface;

    fn viewport_size(&self) -> Viewport;

    /// Sizes the drawing target to `viewport` and hands out a surface for
    /// it, or `None` when no 2D context is available.
    fn acquire_surface(&mut self, viewport: Viewport) -> Option<Self::Surface>;

    /// Requests a single callback before the next repaint.
    fn schedule_frame(&mut self) -> Option<FrameToken>;

    fn cancel_frame(&mut self, token: FrameToken);
}

/// In-memory host with a recording surface and counter-based frame tokens.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    viewport: Viewport,
    surfaces: bool,
    next_token: u64,
    outstanding: Option<FrameToken>,
    scheduled: u64,
    cancelled: Vec<FrameToken>,
    acquired: Vec<Viewport>,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            surfaces: true,
            next_token: 1,
            outstanding: None,
            scheduled: 0,
            cancelled: Vec::new(),
            acquired: Vec::new(),
        }
    }

    /// A host whose drawing surface can never be acquired.
    pub fn without_surface(viewport: Viewport) -> Self {
        Self {
            surfaces: false,
            ..Self::new(viewport)
        }
    }

    /// Changes what [`Host::viewport_size`] reports; the caller still has to
    /// notify the animator.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Token of the frame callback currently waiting to fire.
    pub fn outstanding(&self) -> Option<FrameToken> {
        self.outstanding
    }

    /// Total number of frame callbacks ever requested.
    pub fn scheduled(&self) -> u64 {
        self.scheduled
    }

    pub fn cancelled(&self) -> &[FrameToken] {
        &self.cancelled
    }

    /// Viewports every acquired surface was sized to, oldest first.
    pub fn acquired(&self) -> &[Viewport] {
        &self.acquired
    }

    /// Marks the outstanding callback as delivered.
    pub(crate) fn fire(&mut self) -> Option<FrameToken> {
        self.outstanding.take()
    }
}

impl Host for HeadlessHost {
    type Surface = RecordingSurface;

    fn viewport_size(&self) -> Viewport {
        self.viewport
    }

    fn acquire_surface(&mut self, viewport: Viewport) -> Option<RecordingSurface> {
        if !self.surfaces {
            return None;
        }
        self.acquired.push(viewport);
        Some(RecordingSurface::new(viewport))
    }

    fn schedule_frame(&mut self) -> Option<FrameToken> {
        let token = FrameToken(self.next_token);
        self.next_token += 1;
        self.scheduled += 1;
        self.outstanding = Some(token);
        Some(token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.outstanding == Some(token) {
            self.outstanding = None;
        }
        self.cancelled.push(token);
    }
}
