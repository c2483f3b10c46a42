use animator::{FrameToken, Host, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::canvas::CanvasSurface;
use crate::viewport_from_inner;

/// [`Host`] for a browser window and one of its canvases.
///
/// Frame callbacks go through `requestAnimationFrame`; the callback itself
/// is installed after construction because it has to reach the animator
/// that owns this host.
pub struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    frame_callback: Option<Closure<dyn FnMut(f64)>>,
}

impl WebHost {
    pub fn new(window: Window, canvas: HtmlCanvasElement) -> Self {
        Self {
            window,
            canvas,
            frame_callback: None,
        }
    }

    pub fn install_frame_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.frame_callback = Some(callback);
    }

    /// Drops the frame callback; nothing can be scheduled afterwards.
    pub fn release_frame_callback(&mut self) {
        self.frame_callback = None;
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Host for WebHost {
    type Surface = CanvasSurface;

    fn viewport_size(&self) -> Viewport {
        let width = self.window.inner_width().ok().and_then(|value| value.as_f64());
        let height = self.window.inner_height().ok().and_then(|value| value.as_f64());
        viewport_from_inner(width, height)
    }

    fn acquire_surface(&mut self, viewport: Viewport) -> Option<CanvasSurface> {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
        let context = self
            .canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasSurface::new(context, viewport))
    }

    fn schedule_frame(&mut self) -> Option<FrameToken> {
        let callback = self.frame_callback.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameToken(u64::from(id as u32))),
            Err(err) => {
                tracing::warn!(?err, "requestAnimationFrame failed");
                None
            }
        }
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Err(err) = self.window.cancel_animation_frame(token.0 as i32) {
            tracing::debug!(?err, "cancelAnimationFrame failed");
        }
    }
}
