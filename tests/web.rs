#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use lightrays_wasm::config::RayFieldConfig;
use lightrays_wasm::render::{RenderError, RenderHandle};
use lightrays_wasm::rng::SeededSource;
use lightrays_wasm::style::{RAY_CLASS, SOFT_CLASS, STYLE_ELEMENT_ID, ULTRA_CLASS};

wasm_bindgen_test_configure!(run_in_browser);

fn make_surface(id: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let surface = document.create_element("div").unwrap();
    surface.set_id(id);
    document.body().unwrap().append_child(&surface).unwrap();
    surface
}

fn count(surface: &web_sys::Element, selector: &str) -> u32 {
    surface.query_selector_all(selector).unwrap().length()
}

#[wasm_bindgen_test]
fn missing_surface_fails_fast() {
    let err = RenderHandle::mount("no-such-surface", RayFieldConfig::default()).unwrap_err();
    assert!(matches!(err, RenderError::SurfaceNotFound(_)));
}

#[wasm_bindgen_test]
fn mounted_field_has_the_invariant_element_counts() {
    let surface = make_surface("t-counts");
    let config = RayFieldConfig { ray_count: 12, blur_enabled: true, ..Default::default() };
    let handle = RenderHandle::mount_with_source(
        "t-counts",
        config,
        Box::new(SeededSource::new(11)),
    )
    .unwrap();

    // 12 + 8 mains, 20 softs, 12 ultras, one ambient, one central.
    assert_eq!(count(&surface, &format!(".{RAY_CLASS}")), 20);
    assert_eq!(count(&surface, &format!(".{SOFT_CLASS}")), 20);
    assert_eq!(count(&surface, &format!(".{ULTRA_CLASS}")), 12);
    assert_eq!(count(&surface, ".light-rays-ambient"), 1);
    assert_eq!(count(&surface, ".light-rays-central"), 1);
    assert_eq!(count(&surface, ".light-rays-container"), 1);

    handle.dispose();
    surface.remove();
}

#[wasm_bindgen_test]
fn sharp_mode_emits_no_halos() {
    let surface = make_surface("t-sharp");
    let config = RayFieldConfig { ray_count: 10, blur_enabled: false, ..Default::default() };
    let handle = RenderHandle::mount("t-sharp", config).unwrap();

    assert_eq!(count(&surface, &format!(".{RAY_CLASS}")), 17);
    assert_eq!(count(&surface, &format!(".{SOFT_CLASS}")), 0);
    assert_eq!(count(&surface, &format!(".{ULTRA_CLASS}")), 0);

    handle.dispose();
    surface.remove();
}

#[wasm_bindgen_test]
fn update_regenerates_in_place() {
    let surface = make_surface("t-update");
    let mut handle = RenderHandle::mount("t-update", RayFieldConfig::default()).unwrap();

    let smaller = RayFieldConfig { ray_count: 4, ..Default::default() };
    handle.update(smaller).unwrap();

    // still exactly one container, with the new counts
    assert_eq!(count(&surface, ".light-rays-container"), 1);
    assert_eq!(count(&surface, &format!(".{RAY_CLASS}")), 4 + 2);

    handle.dispose();
    surface.remove();
}

#[wasm_bindgen_test]
fn animation_toggle_rewrites_the_stylesheet_without_changing_counts() {
    let surface = make_surface("t-anim");
    let document = web_sys::window().unwrap().document().unwrap();
    let config = RayFieldConfig { ray_count: 8, ..Default::default() };
    let mut handle = RenderHandle::mount("t-anim", config.clone()).unwrap();

    let before = count(&surface, &format!(".{RAY_CLASS}"));
    let css = document
        .get_element_by_id(STYLE_ELEMENT_ID)
        .unwrap()
        .text_content()
        .unwrap();
    assert!(css.contains("animation:"));

    handle
        .update(RayFieldConfig { animated: false, ..config })
        .unwrap();

    let css = document
        .get_element_by_id(STYLE_ELEMENT_ID)
        .unwrap()
        .text_content()
        .unwrap();
    assert!(!css.contains("animation:"));
    assert_eq!(count(&surface, &format!(".{RAY_CLASS}")), before);

    handle.dispose();
    surface.remove();
}

#[wasm_bindgen_test]
fn stylesheet_is_shared_and_removed_with_the_last_instance() {
    let a = make_surface("t-share-a");
    let b = make_surface("t-share-b");
    let document = web_sys::window().unwrap().document().unwrap();

    let first = RenderHandle::mount("t-share-a", RayFieldConfig::default()).unwrap();
    let second = RenderHandle::mount("t-share-b", RayFieldConfig::default()).unwrap();
    assert_eq!(
        document.query_selector_all(&format!("#{STYLE_ELEMENT_ID}")).unwrap().length(),
        1
    );

    first.dispose();
    assert!(document.get_element_by_id(STYLE_ELEMENT_ID).is_some());

    second.dispose();
    assert!(document.get_element_by_id(STYLE_ELEMENT_ID).is_none());

    a.remove();
    b.remove();
}

#[wasm_bindgen_test]
fn background_toggle_paints_the_surface() {
    let surface = make_surface("t-bg");
    let config = RayFieldConfig {
        background_enabled: true,
        background_color: lightrays_wasm::color::Rgb::new(0x0f, 0x17, 0x2a),
        ..Default::default()
    };
    let mut handle = RenderHandle::mount("t-bg", config.clone()).unwrap();

    let style = surface.get_attribute("style").unwrap_or_default();
    assert!(style.contains("background-color"), "style was: {style}");

    handle
        .update(RayFieldConfig { background_enabled: false, ..config })
        .unwrap();
    let style = surface.get_attribute("style").unwrap_or_default();
    assert!(!style.contains("background-color"), "style was: {style}");

    handle.dispose();
    surface.remove();
}
