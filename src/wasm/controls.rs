//! Generator page glue: binds form controls, presets, and export buttons to
//! the configuration and re-renders on every change.
//!
//! Binding is by element id and tolerates missing elements, so the bare
//! embed page shares this entry point with the full generator page.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use super::clipboard;
use super::render::{RenderError, RenderHandle};
use crate::color::{accent_palette, Rgb};
use crate::config::RayFieldConfig;
use crate::embed::{self, WidgetFlavor};
use crate::presets::{PresetAction, PresetState};
use crate::query;

const SURFACE_ID: &str = "preview";

const NUMERIC_FIELDS: [&str; 10] = [
    "intensity",
    "rayCount",
    "raySpread",
    "rayWidth",
    "rayHeight",
    "lightX",
    "lightY",
    "animationSpeed1",
    "animationSpeed2",
    "blurIntensity",
];

const TOGGLE_FIELDS: [&str; 3] = ["animated", "blurEnabled", "backgroundEnabled"];

struct App {
    config: RayFieldConfig,
    presets: PresetState,
    handle: RenderHandle,
}

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<Vec<EventListener>> = const { RefCell::new(Vec::new()) };
}

/// Wire the page up: parse the query string, mount the renderer, bind
/// whatever controls the page has.
pub fn boot() -> Result<(), RenderError> {
    let document = document()?;
    let config = config_from_location();

    let handle = RenderHandle::mount(SURFACE_ID, config.clone())?;
    let app = Rc::new(RefCell::new(App {
        config,
        presets: PresetState::default(),
        handle,
    }));

    sync_controls(&document, &app.borrow());
    bind_inputs(&document, &app);
    bind_presets(&document, &app);
    bind_actions(&document, &app);

    APP.with(|slot| *slot.borrow_mut() = Some(app));
    console::log!("light rays ready");
    Ok(())
}

fn document() -> Result<Document, RenderError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RenderError::Dom("no document".into()))
}

fn config_from_location() -> RayFieldConfig {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    query::decode(&search)
}

fn keep(listener: EventListener) {
    LISTENERS.with(|slot| slot.borrow_mut().push(listener));
}

fn bind_inputs(document: &Document, app: &Rc<RefCell<App>>) {
    for id in NUMERIC_FIELDS {
        let Some(el) = document.get_element_by_id(id) else { continue };
        let app = app.clone();
        keep(EventListener::new(&el, "input", move |event| {
            if let Some(value) = input_value(event).and_then(|v| v.parse::<f32>().ok()) {
                let mut app = app.borrow_mut();
                set_numeric_field(&mut app.config, id, value);
                app.presets.invalidate();
                after_change(&mut app);
            }
        }));
    }

    for id in ["color", "backgroundColor"] {
        let Some(el) = document.get_element_by_id(id) else { continue };
        let app = app.clone();
        keep(EventListener::new(&el, "input", move |event| {
            if let Some(rgb) = input_value(event).and_then(|v| Rgb::parse(&v)) {
                let mut app = app.borrow_mut();
                match id {
                    "color" => app.config.color = rgb,
                    _ => app.config.background_color = rgb,
                }
                app.presets.invalidate();
                after_change(&mut app);
            }
        }));
    }

    for id in TOGGLE_FIELDS {
        let Some(el) = document.get_element_by_id(id) else { continue };
        let app = app.clone();
        keep(EventListener::new(&el, "change", move |event| {
            let Some(input) = event_input(event) else { return };
            let mut app = app.borrow_mut();
            let checked = input.checked();
            match id {
                "animated" => app.config.animated = checked,
                "blurEnabled" => app.config.blur_enabled = checked,
                _ => app.config.background_enabled = checked,
            }
            app.presets.invalidate();
            after_change(&mut app);
        }));
    }
}

fn bind_presets(document: &Document, app: &Rc<RefCell<App>>) {
    let Ok(buttons) = document.query_selector_all("[data-preset]") else { return };
    for i in 0..buttons.length() {
        let Some(el) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(name) = el.get_attribute("data-preset") else { continue };
        let app = app.clone();
        keep(EventListener::new(&el, "click", move |_| {
            let mut state = app.borrow_mut();
            let App { config, presets, .. } = &mut *state;
            match presets.toggle(&name, config) {
                PresetAction::Applied => notify(&format!("Applied \"{name}\" preset")),
                PresetAction::Reverted => notify(&format!("Reverted \"{name}\" preset")),
                PresetAction::Unknown => return,
            }
            after_change(&mut state);
        }));
    }
}

fn bind_actions(document: &Document, app: &Rc<RefCell<App>>) {
    let exports: [(&str, fn(&RayFieldConfig, &str) -> String); 4] = [
        ("export-inline", |c, _| embed::inline_widget(c)),
        ("export-iframe", |c, base| embed::iframe_snippet(c, base)),
        ("export-react-frame", |c, base| {
            embed::react_widget(c, base, WidgetFlavor::Frame)
        }),
        ("export-react-inline", |c, base| {
            embed::react_widget(c, base, WidgetFlavor::Inline)
        }),
    ];

    for (id, build) in exports {
        let Some(el) = document.get_element_by_id(id) else { continue };
        let app = app.clone();
        keep(EventListener::new(&el, "click", move |_| {
            let snippet = build(&app.borrow().config, &embed_base_url());
            show_export(&snippet);
            clipboard::copy_text(snippet);
        }));
    }

    if let Some(el) = document.get_element_by_id("copy-link") {
        let app = app.clone();
        keep(EventListener::new(&el, "click", move |_| {
            clipboard::copy_text(share_url(&app.borrow().config));
        }));
    }

    if let Some(el) = document.get_element_by_id("reset") {
        let app = app.clone();
        keep(EventListener::new(&el, "click", move |_| {
            let mut app = app.borrow_mut();
            app.config = RayFieldConfig::default();
            app.presets = PresetState::default();
            after_change(&mut app);
            notify("Reset to default settings");
        }));
    }
}

/// Re-render and bring the visible controls back in line with the config.
fn after_change(app: &mut App) {
    if let Err(err) = app.handle.update(app.config.clone()) {
        console::error!(format!("render failed: {err}"));
    }
    if let Ok(document) = document() {
        sync_controls(&document, app);
    }
}

fn sync_controls(document: &Document, app: &App) {
    let config = &app.config;

    for (id, value) in [
        ("intensity", config.intensity),
        ("raySpread", config.ray_spread),
        ("rayWidth", config.ray_width),
        ("rayHeight", config.ray_height),
        ("lightX", config.light_x),
        ("lightY", config.light_y),
        ("animationSpeed1", config.animation_speed1),
        ("animationSpeed2", config.animation_speed2),
        ("blurIntensity", config.blur_intensity),
    ] {
        set_input_value(document, id, &trim_float(value));
    }
    set_input_value(document, "rayCount", &config.ray_count.to_string());
    set_input_value(document, "color", &config.color.to_hex());
    set_input_value(document, "backgroundColor", &config.background_color.to_hex());

    for (id, checked) in [
        ("animated", config.animated),
        ("blurEnabled", config.blur_enabled),
        ("backgroundEnabled", config.background_enabled),
    ] {
        if let Some(input) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_checked(checked);
        }
    }

    // Value readouts next to the sliders.
    for (id, text) in [
        ("intensity-value", trim_float(config.intensity)),
        ("rayCount-value", config.ray_count.to_string()),
        ("raySpread-value", format!("{}°", trim_float(config.ray_spread))),
        ("rayWidth-value", format!("{}px", trim_float(config.ray_width))),
        ("rayHeight-value", format!("{}vh", trim_float(config.ray_height))),
        ("lightX-value", format!("{}%", trim_float(config.light_x))),
        ("lightY-value", format!("{}%", trim_float(config.light_y))),
        ("animationSpeed1-value", format!("{:.1}x", config.animation_speed1)),
        ("animationSpeed2-value", format!("{:.1}x", config.animation_speed2)),
        ("blurIntensity-value", format!("{:.1}x", config.blur_intensity)),
        ("color-value", config.color.to_hex()),
        ("backgroundColor-value", config.background_color.to_hex()),
    ] {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(&text));
        }
    }

    // Active-preset highlight.
    if let Ok(buttons) = document.query_selector_all("[data-preset]") {
        for i in 0..buttons.length() {
            let Some(el) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let active = el.get_attribute("data-preset").as_deref() == app.presets.active();
            let _ = if active {
                el.class_list().add_1("active")
            } else {
                el.class_list().remove_1("active")
            };
        }
    }

    apply_accent_palette(document, config.color);
}

/// Page chrome picks up accent colors derived from the ray color.
fn apply_accent_palette(document: &Document, color: Rgb) {
    let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let palette = accent_palette(color);
    let css = root.style();
    let _ = css.set_property("--accent-primary", &palette.primary.to_hex());
    let _ = css.set_property(
        "--accent-primary-rgb",
        &format!("{}, {}, {}", palette.primary.r, palette.primary.g, palette.primary.b),
    );
    let _ = css.set_property("--accent-secondary", &palette.secondary.to_hex());
    let _ = css.set_property("--accent-muted", &palette.muted.to_hex());
}

fn set_numeric_field(config: &mut RayFieldConfig, id: &str, value: f32) {
    match id {
        "intensity" => config.intensity = value,
        "rayCount" => config.ray_count = value.max(0.0) as u32,
        "raySpread" => config.ray_spread = value,
        "rayWidth" => config.ray_width = value,
        "rayHeight" => config.ray_height = value,
        "lightX" => config.light_x = value,
        "lightY" => config.light_y = value,
        "animationSpeed1" => config.animation_speed1 = value,
        "animationSpeed2" => config.animation_speed2 = value,
        "blurIntensity" => config.blur_intensity = value,
        _ => {}
    }
}

fn set_input_value(document: &Document, id: &str, value: &str) {
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value(value);
    }
}

fn input_value(event: &Event) -> Option<String> {
    event_input(event).map(|input| input.value())
}

fn event_input(event: &Event) -> Option<HtmlInputElement> {
    event.target()?.dyn_into().ok()
}

fn trim_float(v: f32) -> String {
    if v == v.trunc() {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Shareable generator link carrying the full configuration.
fn share_url(config: &RayFieldConfig) -> String {
    let (origin, path) = location_parts();
    format!("{origin}{path}?{}", query::encode(config))
}

/// URL of the hosted embed page next to the generator page.
fn embed_base_url() -> String {
    let (origin, path) = location_parts();
    let dir = path
        .strip_suffix("index.html")
        .unwrap_or(path.rsplit_once('/').map(|(d, _)| d).unwrap_or(""))
        .trim_end_matches('/');
    format!("{origin}{dir}/embed.html")
}

fn location_parts() -> (String, String) {
    web_sys::window()
        .map(|w| {
            let loc = w.location();
            (
                loc.origin().unwrap_or_default(),
                loc.pathname().unwrap_or_default(),
            )
        })
        .unwrap_or_default()
}

fn show_export(snippet: &str) {
    let Ok(document) = document() else { return };
    let Some(el) = document.get_element_by_id("embed-output") else { return };
    if let Some(textarea) = el.dyn_ref::<HtmlTextAreaElement>() {
        textarea.set_value(snippet);
    } else {
        el.set_text_content(Some(snippet));
    }
    let _ = el.class_list().remove_1("hidden");
}

/// Flash a short status message if the page has a notification slot.
pub fn notify(message: &str) {
    console::log!(message.to_string());
    let Ok(document) = document() else { return };
    let Some(el) = document.get_element_by_id("notification") else { return };
    el.set_text_content(Some(message));
    let _ = el.class_list().add_1("show");

    let el = el.clone();
    Timeout::new(2000, move || {
        let _ = el.class_list().remove_1("show");
    })
    .forget();
}
