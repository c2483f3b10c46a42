use std::cell::RefCell;
use std::rc::Rc;

use animator::{Animator, Host, Phase};
use fieldconfig::FieldConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::host::WebHost;

type SharedAnimator = Rc<RefCell<Animator<WebHost>>>;

/// Running field returned to JavaScript. Dropping or freeing it tears the
/// animation down.
#[wasm_bindgen]
pub struct FieldHandle {
    animator: SharedAnimator,
    resize_listener: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl FieldHandle {
    /// Stops the frame loop and detaches the resize listener. Safe to call
    /// more than once.
    pub fn teardown(&mut self) {
        let mut animator = self.animator.borrow_mut();
        if let Some(listener) = self.resize_listener.take() {
            let removed = animator
                .host()
                .window()
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
            if let Err(err) = removed {
                tracing::debug!(?err, "failed to detach resize listener");
            }
        }
        animator.teardown();
        animator.host_mut().release_frame_callback();
    }

    /// One of `deferred`, `unavailable`, `running` or `torn_down`.
    pub fn phase(&self) -> String {
        match self.animator.borrow().phase() {
            Phase::Deferred => "deferred",
            Phase::Unavailable => "unavailable",
            Phase::Running => "running",
            Phase::TornDown => "torn_down",
        }
        .to_string()
    }

    #[wasm_bindgen(js_name = entityCount)]
    pub fn entity_count(&self) -> usize {
        self.animator
            .borrow()
            .field()
            .map_or(0, |field| field.counts().total())
    }
}

impl Drop for FieldHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn load_config(config_toml: Option<&str>) -> Result<FieldConfig, JsValue> {
    let builtin = FieldConfig::builtin().map_err(|err| JsValue::from_str(&err.to_string()))?;
    let Some(raw) = config_toml else {
        return Ok(builtin);
    };
    let mut config =
        FieldConfig::from_toml_str(raw).map_err(|err| JsValue::from_str(&err.to_string()))?;
    config.merge_missing(&builtin);
    Ok(config)
}

/// Starts animating `scene` (or the configured default) on the canvas with
/// id `canvas_id`. `config_toml` adds scenes to the bundled presets.
#[wasm_bindgen(js_name = mountField)]
pub fn mount_field(
    canvas_id: &str,
    scene: Option<String>,
    config_toml: Option<String>,
    seed: Option<u32>,
) -> Result<FieldHandle, JsValue> {
    console_error_panic_hook::set_once();
    // A second mount finds the logger already installed.
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or("canvas not found")?
        .dyn_into::<HtmlCanvasElement>()?;

    let config = load_config(config_toml.as_deref())?;
    let animator = Animator::from_config(
        WebHost::new(window.clone(), canvas),
        &config,
        scene.as_deref(),
        seed.map(u64::from),
    )
    .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let animator: SharedAnimator = Rc::new(RefCell::new(animator));

    let weak = Rc::downgrade(&animator);
    let frame = Closure::wrap(Box::new(move |timestamp: f64| {
        if let Some(animator) = weak.upgrade() {
            animator.borrow_mut().frame(timestamp);
        }
    }) as Box<dyn FnMut(f64)>);
    animator.borrow_mut().host_mut().install_frame_callback(frame);

    let weak = Rc::downgrade(&animator);
    let resize = Closure::wrap(Box::new(move || {
        if let Some(animator) = weak.upgrade() {
            let mut animator = animator.borrow_mut();
            let viewport = animator.host().viewport_size();
            animator.resize(viewport);
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

    animator.borrow_mut().mount();
    tracing::info!(canvas = canvas_id, phase = ?animator.borrow().phase(), "field mounted");

    Ok(FieldHandle {
        animator,
        resize_listener: Some(resize),
    })
}
