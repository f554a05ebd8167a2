//! Light-rays generator: a parametrized decorative effect rendered as
//! layered DOM elements driven by CSS custom properties, plus exporters for
//! standalone embeddable snippets.
//!
//! The portable modules below (config, field generation, styling, query
//! codec, presets, exports) build and test on the host; everything touching
//! the DOM lives in the wasm-only module.

#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod color;
pub mod config;
pub mod embed;
pub mod field;
pub mod presets;
pub mod query;
pub mod rng;
pub mod style;

// Only compile DOM-facing code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    pub mod clipboard;
    pub mod controls;
    pub mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        controls::boot().map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{clipboard, controls, render};
