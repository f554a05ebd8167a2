//! DOM renderer for the ray field.
//!
//! A [`RenderHandle`] owns one container subtree under its surface element
//! plus a share of the process-wide stylesheet. Every configuration change
//! destroys and rebuilds the full primitive set synchronously; there is no
//! incremental update.

use std::cell::Cell;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::config::RayFieldConfig;
use crate::field::{RayField, RayKind, RayPrimitive};
use crate::rng::{EntropySource, RaySource};
use crate::style::{
    self, AMBIENT_CLASS, CENTRAL_CLASS, CONTAINER_CLASS, RAY_CLASS, SOFT_CLASS,
    STYLE_ELEMENT_ID, ULTRA_CLASS,
};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface `{0}` not found")]
    SurfaceNotFound(String),
    #[error("dom operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for RenderError {
    fn from(value: JsValue) -> Self {
        Self::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

thread_local! {
    // Live handles sharing the stylesheet element.
    static STYLE_REFS: Cell<usize> = const { Cell::new(0) };
}

fn document() -> Result<Document, RenderError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RenderError::Dom("no document".into()))
}

/// Install (or retain) the shared stylesheet and write `css` into it.
fn acquire_stylesheet(document: &Document, css: &str) -> Result<(), RenderError> {
    let style = match document.get_element_by_id(STYLE_ELEMENT_ID) {
        Some(el) => el,
        None => {
            let el = document.create_element("style")?;
            el.set_id(STYLE_ELEMENT_ID);
            let head = document
                .head()
                .ok_or_else(|| RenderError::Dom("no head".into()))?;
            head.append_child(&el)?;
            el
        }
    };
    style.set_text_content(Some(css));
    STYLE_REFS.with(|refs| refs.set(refs.get() + 1));
    Ok(())
}

/// Rewrite the shared stylesheet without changing its reference count.
fn rewrite_stylesheet(document: &Document, css: &str) {
    if let Some(style) = document.get_element_by_id(STYLE_ELEMENT_ID) {
        style.set_text_content(Some(css));
    }
}

/// Drop one reference; the last one out removes the element.
fn release_stylesheet(document: &Document) {
    let last = STYLE_REFS.with(|refs| {
        let n = refs.get().saturating_sub(1);
        refs.set(n);
        n == 0
    });
    if last {
        if let Some(style) = document.get_element_by_id(STYLE_ELEMENT_ID) {
            style.remove();
        }
    }
}

/// A mounted ray field. Dropping the handle does not clean up the DOM; call
/// [`RenderHandle::dispose`].
pub struct RenderHandle {
    surface: HtmlElement,
    container: HtmlElement,
    config: RayFieldConfig,
    source: Box<dyn RaySource>,
}

impl RenderHandle {
    /// Mount a ray field on the element with id `surface_id`, with the
    /// production jitter source.
    pub fn mount(surface_id: &str, config: RayFieldConfig) -> Result<Self, RenderError> {
        Self::mount_with_source(surface_id, config, Box::new(EntropySource::new()))
    }

    /// Mount with a caller-supplied jitter source (tests pass a seeded one).
    pub fn mount_with_source(
        surface_id: &str,
        config: RayFieldConfig,
        source: Box<dyn RaySource>,
    ) -> Result<Self, RenderError> {
        let document = document()?;
        let surface: HtmlElement = document
            .get_element_by_id(surface_id)
            .ok_or_else(|| RenderError::SurfaceNotFound(surface_id.to_string()))?
            .dyn_into()
            .map_err(|_| RenderError::SurfaceNotFound(surface_id.to_string()))?;

        // Clear any container a previous instance left on this surface.
        if let Ok(Some(stale)) = surface.query_selector(&format!(".{CONTAINER_CLASS}")) {
            stale.remove();
        }

        let container: HtmlElement = document.create_element("div")?.unchecked_into();
        container.set_class_name(CONTAINER_CLASS);
        container.style().set_css_text(
            "position: absolute; top: 0; left: 0; width: 100%; height: 100%; \
             overflow: hidden; pointer-events: none; z-index: 1;",
        );
        surface.style().set_property("position", "relative")?;
        surface.append_child(&container)?;

        acquire_stylesheet(&document, &style::stylesheet(&config))?;

        let mut handle = Self { surface, container, config, source };
        handle.regenerate()?;
        Ok(handle)
    }

    pub fn config(&self) -> &RayFieldConfig {
        &self.config
    }

    /// Replace the configuration and rebuild everything.
    pub fn update(&mut self, config: RayFieldConfig) -> Result<(), RenderError> {
        self.config = config;
        rewrite_stylesheet(&document()?, &style::stylesheet(&self.config));
        self.regenerate()
    }

    /// Remove all emitted elements and release the stylesheet share.
    pub fn dispose(self) {
        self.container.remove();
        let _ = self
            .surface
            .style()
            .remove_property("background-color");
        if let Ok(document) = document() {
            release_stylesheet(&document);
        }
    }

    fn regenerate(&mut self) -> Result<(), RenderError> {
        let document = document()?;
        self.container.set_inner_html("");

        let field = RayField::generate(&self.config, self.source.as_mut());

        if self.config.background_enabled {
            self.surface
                .style()
                .set_property("background-color", &self.config.background_color.to_hex())?;
        } else {
            let _ = self.surface.style().remove_property("background-color");
        }

        let ambient = document.create_element("div")?;
        ambient.set_class_name(AMBIENT_CLASS);
        self.container.append_child(&ambient)?;

        for ray in &field.rays {
            let el = self.create_ray(&document, ray)?;
            self.container.append_child(&el)?;
        }

        let central = document.create_element("div")?;
        central.set_class_name(CENTRAL_CLASS);
        self.container.append_child(&central)?;

        Ok(())
    }

    fn create_ray(&self, document: &Document, ray: &RayPrimitive) -> Result<Element, RenderError> {
        let el: HtmlElement = document.create_element("div")?.unchecked_into();
        let class = match ray.kind {
            RayKind::Main => RAY_CLASS,
            RayKind::Soft => SOFT_CLASS,
            RayKind::Ultra => ULTRA_CLASS,
        };
        el.set_class_name(&format!("{class} layer{}", ray.layer));

        let css = el.style();
        css.set_property("--angle", &format!("{}deg", ray.angle))?;
        css.set_property("--delay", &format!("{}s", ray.delay))?;
        css.set_property("--opacity", &ray.opacity.to_string())?;
        css.set_property("--width", &format!("{}px", ray.width))?;
        css.set_property("--height", &format!("{}vh", ray.height))?;
        css.set_property("--shimmer-duration", &format!("{}s", ray.shimmer_s))?;
        css.set_property("--sway-angle", &format!("{}deg", ray.sway_deg))?;
        if ray.reversed {
            css.set_property("--direction", "reverse")?;
        }
        Ok(el.into())
    }
}
