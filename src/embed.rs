//! Export surfaces: embeddable snippets reproducing the current
//! configuration outside the generator page.
//!
//! The inline widget is fully deterministic — per-ray opacity ramps on the
//! ray index instead of drawing jitter — so the same configuration always
//! exports byte-identical markup.

use std::fmt::Write;

use crate::config::RayFieldConfig;
use crate::query;

/// Target flavor for the React component export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetFlavor {
    /// Self-contained component carrying the full markup inline.
    Inline,
    /// Thin component wrapping the hosted embed endpoint in an iframe.
    Frame,
}

/// URL of the hosted embed endpoint carrying the whole config in its query
/// string.
pub fn embed_url(config: &RayFieldConfig, base_url: &str) -> String {
    format!("{}?{}", base_url, query::encode(config))
}

/// `<iframe>` snippet pointing at the hosted endpoint.
pub fn iframe_snippet(config: &RayFieldConfig, base_url: &str) -> String {
    format!(
        "<!-- Light Rays Embed -->\n<iframe\n    src=\"{}\"\n    width=\"100%\" height=\"400\" frameborder=\"0\"\n    style=\"border: none; border-radius: 10px;\"\n    allowfullscreen>\n</iframe>",
        embed_url(config, base_url)
    )
}

/// Self-contained markup + style bundle for pasting into a third-party page.
pub fn inline_widget(config: &RayFieldConfig) -> String {
    let rgb = config.color;
    let background = if config.background_enabled {
        config.background_color.to_hex()
    } else {
        "#000".to_string()
    };

    let mut rays = String::new();
    push_layer_markup(&mut rays, config, 1);
    push_layer_markup(&mut rays, config, 2);

    let ray_paint = if config.blur_enabled {
        format!(
            "background: radial-gradient(ellipse calc(var(--ray-width) / 2) var(--ray-height) at center 0%, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 1) 0%, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.7) 20%, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.4) 45%, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.2) 70%, transparent 100%); filter: blur(calc(var(--ray-width) / 12 * {})) saturate(1.2);",
            config.blur_intensity
        )
    } else {
        "background: linear-gradient(to bottom, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 1) 0%, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.6) 30%, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.2) 70%, transparent 100%); clip-path: polygon(45% 0%, 55% 0%, 100% 100%, 0% 100%);".to_string()
    };

    let animations = if config.animated {
        "
.light-rays-embed .light-ray.layer1 { animation: lr-embed-shimmer calc(3s / var(--animation-speed1)) ease-in-out infinite alternate; animation-delay: var(--delay); }
.light-rays-embed .light-ray.layer2 { animation: lr-embed-shimmer-2 calc(4s / var(--animation-speed2)) ease-in-out infinite alternate; animation-delay: calc(var(--delay) + 1.5s); }
.light-rays-embed .central-glow { animation: lr-embed-pulse 3s ease-in-out infinite alternate; }
@keyframes lr-embed-shimmer { 0% { opacity: var(--opacity); transform: translate(-50%, -50%) rotate(var(--angle)) scaleY(1); } 100% { opacity: calc(var(--opacity) * 1.5); transform: translate(-50%, -50%) rotate(calc(var(--angle) + 2deg)) scaleY(1.1); } }
@keyframes lr-embed-shimmer-2 { 0% { opacity: calc(var(--opacity) * 0.8); transform: translate(-50%, -50%) rotate(var(--angle)) scaleY(0.9); } 100% { opacity: calc(var(--opacity) * 1.3); transform: translate(-50%, -50%) rotate(calc(var(--angle) + 1deg)) scaleY(1.15); } }
@keyframes lr-embed-pulse { 0% { opacity: calc(var(--intensity) * 0.8); transform: translate(-50%, -50%) scale(0.9); } 100% { opacity: calc(var(--intensity) * 1.2); transform: translate(-50%, -50%) scale(1.1); } }"
    } else {
        ""
    };

    let central_blur = if config.blur_enabled { 30.0 * config.blur_intensity } else { 10.0 };

    format!(
        "<!-- Light Rays Effect -->
<div class=\"light-rays-embed\" style=\"position: relative; width: 100%; height: 400px; background: {background}; overflow: hidden; border-radius: 10px;\">
<style>
.light-rays-embed {{
    --ray-r: {r}; --ray-g: {g}; --ray-b: {b};
    --intensity: {intensity};
    --light-x: {light_x}%; --light-y: {light_y}%;
    --ray-width: {ray_width}px; --ray-height: {ray_height}vh;
    --animation-speed1: {speed1}; --animation-speed2: {speed2};
}}
.light-rays-embed .ambient-glow {{ position: absolute; inset: 0; pointer-events: none; background: linear-gradient(to bottom, rgba(var(--ray-r), var(--ray-g), var(--ray-b), {amb_top}) 0%, rgba(var(--ray-r), var(--ray-g), var(--ray-b), {amb_mid}) 25%, transparent 80%); }}
.light-rays-embed .light-ray, .light-rays-embed .light-ray-soft {{ position: absolute; top: var(--light-y); left: var(--light-x); width: var(--ray-width); height: var(--ray-height); transform-origin: 50% 0%; transform: translate(-50%, -50%) rotate(var(--angle)); opacity: var(--opacity); pointer-events: none; }}
.light-rays-embed .light-ray {{ {ray_paint} }}
.light-rays-embed .light-ray-soft {{ width: calc(var(--ray-width) * 1.5); background: radial-gradient(ellipse calc(var(--ray-width) * 0.75) var(--ray-height) at center 0%, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.6) 0%, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.3) 45%, transparent 100%); filter: blur(calc(var(--ray-width) / 8)); }}
.light-rays-embed .central-glow {{ position: absolute; top: var(--light-y); left: var(--light-x); width: 200px; height: 200px; transform: translate(-50%, -50%); background: radial-gradient(circle, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 1) 0%, rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.4) 40%, transparent 70%); border-radius: 50%; opacity: calc(var(--intensity) * 0.8); filter: blur({central_blur}px); }}{animations}
</style>
<div class=\"ambient-glow\"></div>
{rays}<div class=\"central-glow\"></div>
</div>",
        r = rgb.r,
        g = rgb.g,
        b = rgb.b,
        intensity = config.intensity,
        light_x = config.light_x,
        light_y = config.light_y,
        ray_width = config.ray_width,
        ray_height = config.ray_height,
        speed1 = config.animation_speed1,
        speed2 = config.animation_speed2,
        amb_top = (0.36 * config.intensity).clamp(0.0, 0.6),
        amb_mid = (0.20 * config.intensity).clamp(0.0, 0.4),
    )
}

fn push_layer_markup(out: &mut String, config: &RayFieldConfig, layer: u8) {
    let count = match layer {
        1 => config.layer1_count(),
        _ => config.layer2_count(),
    };
    let (angle_offset, delay_step, delay_base, opacity_mult) = match layer {
        1 => (0.0, 0.1, 0.0, 1.0),
        _ => (15.0, 0.15, 0.5, 0.8),
    };

    for i in 0..count {
        let angle = config.ray_spread / count as f32 * i as f32 + angle_offset;
        let delay = i as f32 * delay_step + delay_base;
        // Deterministic stand-in for the preview's random opacity.
        let opacity = (0.3 + i as f32 / count as f32 * 0.4) * config.intensity * opacity_mult;

        let _ = writeln!(
            out,
            "<div class=\"light-ray layer{layer}\" style=\"--angle: {angle}deg; --delay: {delay}s; --opacity: {opacity};\"></div>"
        );
        if config.blur_enabled {
            let _ = writeln!(
                out,
                "<div class=\"light-ray-soft layer{layer}\" style=\"--angle: {angle}deg; --delay: {delay}s; --opacity: {soft};\"></div>",
                soft = opacity * 0.4
            );
        }
    }
}

/// React component source wrapping the effect, in the requested flavor.
pub fn react_widget(config: &RayFieldConfig, base_url: &str, flavor: WidgetFlavor) -> String {
    match flavor {
        WidgetFlavor::Frame => react_frame_widget(config, base_url),
        WidgetFlavor::Inline => react_inline_widget(config),
    }
}

fn react_frame_widget(config: &RayFieldConfig, base_url: &str) -> String {
    let url = embed_url(config, base_url);
    format!(
        "// Light Rays — iframe-backed React component
import React from 'react';

const LightRays = ({{ width = '100%', height = '400px', style = {{}} }}) => (
  <iframe
    src=\"{url}\"
    style={{{{ border: 'none', borderRadius: '10px', width, height, ...style }}}}
    title=\"Light rays effect\"
  />
);

export default LightRays;"
    )
}

fn react_inline_widget(config: &RayFieldConfig) -> String {
    // JSON string literal doubles as a JS string literal, escaping included.
    let markup = serde_json::to_string(&inline_widget(config))
        .unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "// Light Rays — self-contained React component
import React from 'react';

const MARKUP = {markup};

const LightRays = ({{ width = '100%', height = '400px', style = {{}} }}) => (
  <div
    style={{{{ position: 'relative', overflow: 'hidden', width, height, ...style }}}}
    dangerouslySetInnerHTML={{{{ __html: MARKUP }}}}
  />
);

export default LightRays;"
    )
}
