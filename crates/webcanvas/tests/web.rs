#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

use webcanvas::mount_field;

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn mounts_and_tears_down() {
    let canvas = add_canvas("field-mount");
    let mut handle = mount_field("field-mount", Some("landing".into()), None, Some(5)).unwrap();
    assert_eq!(handle.phase(), "running");
    assert_eq!(handle.entity_count(), 43);
    assert!(canvas.width() > 0);

    handle.teardown();
    handle.teardown();
    assert_eq!(handle.phase(), "torn_down");
}

#[wasm_bindgen_test]
fn custom_config_scene() {
    add_canvas("field-custom");
    let config = "version = 1\n[scenes.mist.waves]\ncount = 3\n";
    let handle = mount_field("field-custom", Some("mist".into()), Some(config.into()), None).unwrap();
    assert_eq!(handle.entity_count(), 3);
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    assert!(mount_field("no-such-canvas", None, None, None).is_err());
}

#[wasm_bindgen_test]
fn unknown_scene_is_an_error() {
    add_canvas("field-unknown");
    assert!(mount_field("field-unknown", Some("nowhere".into()), None, None).is_err());
}
