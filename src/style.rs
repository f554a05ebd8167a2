//! Shared stylesheet generation.
//!
//! The renderer installs a single `<style>` element per process under
//! [`STYLE_ELEMENT_ID`] and rewrites its text on every pass. Per-primitive
//! values (angle, delay, opacity, sway) travel as inline custom properties;
//! everything shape-related lives here.

use std::fmt::Write;

use crate::config::RayFieldConfig;
use crate::field::{AmbientGlow, CentralGlow};

/// Fixed id of the process-wide stylesheet element.
pub const STYLE_ELEMENT_ID: &str = "light-rays-styles";

pub const CONTAINER_CLASS: &str = "light-rays-container";
pub const AMBIENT_CLASS: &str = "light-rays-ambient";
pub const RAY_CLASS: &str = "light-rays-ray";
pub const SOFT_CLASS: &str = "light-rays-ray-soft";
pub const ULTRA_CLASS: &str = "light-rays-ray-ultra";
pub const CENTRAL_CLASS: &str = "light-rays-central";

/// Build the stylesheet text for `config`.
pub fn stylesheet(config: &RayFieldConfig) -> String {
    let rgb = config.color;
    let ambient = AmbientGlow {
        alpha_top: (0.36 * config.intensity).clamp(0.0, 0.6),
        alpha_mid: (0.20 * config.intensity).clamp(0.0, 0.4),
    };
    let central = CentralGlow {
        opacity: config.intensity * 0.8,
        blur_px: if config.blur_enabled { 30.0 * config.blur_intensity } else { 10.0 },
    };

    let mut css = String::with_capacity(6 * 1024);

    let _ = write!(
        css,
        ".{CONTAINER_CLASS} {{
    --ray-r: {r}; --ray-g: {g}; --ray-b: {b};
    --intensity: {intensity};
    --ambient-alpha-top: {amb_top};
    --ambient-alpha-mid: {amb_mid};
    --light-x: {light_x}%;
    --light-y: {light_y}%;
    --ray-width: {ray_width}px;
    --ray-height: {ray_height}vh;
    --animation-speed1: {speed1};
    --animation-speed2: {speed2};
}}
",
        r = rgb.r,
        g = rgb.g,
        b = rgb.b,
        intensity = config.intensity,
        amb_top = ambient.alpha_top,
        amb_mid = ambient.alpha_mid,
        light_x = config.light_x,
        light_y = config.light_y,
        ray_width = config.ray_width,
        ray_height = config.ray_height,
        speed1 = config.animation_speed1,
        speed2 = config.animation_speed2,
    );

    // Ambient wash: top-to-bottom tint in the ray color, no blur.
    let _ = write!(
        css,
        ".{AMBIENT_CLASS} {{
    position: absolute;
    inset: 0;
    pointer-events: none;
    z-index: 0;
    background: linear-gradient(
        to bottom,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), var(--ambient-alpha-top)) 0%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), var(--ambient-alpha-mid)) 25%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0) 80%
    );
}}
"
    );

    let ray_paint = if config.blur_enabled {
        format!(
            "    background: radial-gradient(
        ellipse calc(var(--width) / 2) var(--height) at center 0%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 1) 0%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.9) 8%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.7) 20%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.5) 35%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.3) 50%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.2) 65%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.1) 80%,
        transparent 100%
    );
    filter: blur(calc(var(--width) / 12 * {blur})) saturate(1.2);
",
            blur = config.blur_intensity
        )
    } else {
        "    background: linear-gradient(
        to bottom,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 1) 0%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.9) 15%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.6) 30%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.4) 50%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.2) 70%,
        transparent 100%
    );
    clip-path: polygon(45% 0%, 55% 0%, 100% 100%, 0% 100%);
"
        .to_string()
    };

    let _ = write!(
        css,
        ".{RAY_CLASS}, .{SOFT_CLASS}, .{ULTRA_CLASS} {{
    position: absolute;
    top: var(--light-y);
    left: var(--light-x);
    width: var(--width);
    height: var(--height);
    transform-origin: 50% 0%;
    transform: translate(-50%, -50%) rotate(var(--angle));
    opacity: calc(var(--opacity) * var(--intensity));
    pointer-events: none;
}}
.{RAY_CLASS} {{
{ray_paint}}}
"
    );

    if config.blur_enabled {
        let _ = write!(
            css,
            ".{SOFT_CLASS}, .{ULTRA_CLASS} {{
    background: radial-gradient(
        ellipse calc(var(--width) / 2) var(--height) at center 0%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.6) 0%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.4) 25%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.3) 45%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.2) 65%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.1) 80%,
        transparent 100%
    );
    filter: blur(calc(var(--width) / 8 * {blur}));
}}
.{ULTRA_CLASS} {{
    filter: blur(calc(var(--width) / 5 * {blur}));
}}
",
            blur = config.blur_intensity
        );
    }

    let _ = write!(
        css,
        ".{CENTRAL_CLASS} {{
    position: absolute;
    top: var(--light-y);
    left: var(--light-x);
    width: 200px;
    height: 200px;
    transform: translate(-50%, -50%);
    background: radial-gradient(
        circle,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 1) 0%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.8) 20%,
        rgba(var(--ray-r), var(--ray-g), var(--ray-b), 0.4) 40%,
        transparent 70%
    );
    border-radius: 50%;
    opacity: {central_opacity};
    filter: blur({central_blur}px);
}}
",
        central_opacity = central.opacity,
        central_blur = central.blur_px,
    );

    if config.animated {
        let _ = write!(
            css,
            ".{RAY_CLASS}.layer1, .{SOFT_CLASS}.layer1, .{ULTRA_CLASS}.layer1 {{
    animation: lr-ray-combined calc(var(--shimmer-duration) / var(--animation-speed1)) ease-in-out infinite;
    animation-delay: var(--delay);
    animation-direction: var(--direction, normal);
}}
.{RAY_CLASS}.layer2, .{SOFT_CLASS}.layer2 {{
    animation: lr-ray-combined-2 calc(var(--shimmer-duration) / var(--animation-speed2)) ease-in-out infinite;
    animation-delay: calc(var(--delay) + 1.5s);
    animation-direction: var(--direction, normal);
}}
.{CENTRAL_CLASS} {{
    animation: lr-central-glow-pulse 6s ease-in-out infinite alternate;
}}
@keyframes lr-ray-combined {{
    0% {{ opacity: calc(var(--opacity) * var(--intensity) * 0.8); transform: translate(-50%, -50%) rotate(var(--angle)) scaleY(0.98); }}
    25% {{ opacity: calc(var(--opacity) * var(--intensity)); transform: translate(-50%, -50%) rotate(calc(var(--angle) + var(--sway-angle) * 0.5)) scaleY(1.02); }}
    50% {{ opacity: calc(var(--opacity) * var(--intensity) * 1.1); transform: translate(-50%, -50%) rotate(calc(var(--angle) + var(--sway-angle))) scaleY(1.05); }}
    75% {{ opacity: calc(var(--opacity) * var(--intensity)); transform: translate(-50%, -50%) rotate(calc(var(--angle) + var(--sway-angle) * 0.5)) scaleY(1.02); }}
    100% {{ opacity: calc(var(--opacity) * var(--intensity) * 0.9); transform: translate(-50%, -50%) rotate(var(--angle)) scaleY(0.99); }}
}}
@keyframes lr-ray-combined-2 {{
    0% {{ opacity: calc(var(--opacity) * var(--intensity) * 0.7); transform: translate(-50%, -50%) rotate(calc(var(--angle) - var(--sway-angle) * 0.3)) scaleY(0.96); }}
    50% {{ opacity: calc(var(--opacity) * var(--intensity)); transform: translate(-50%, -50%) rotate(calc(var(--angle) + var(--sway-angle) * 0.7)) scaleY(1.08); }}
    100% {{ opacity: calc(var(--opacity) * var(--intensity) * 0.8); transform: translate(-50%, -50%) rotate(calc(var(--angle) - var(--sway-angle) * 0.3)) scaleY(1.01); }}
}}
@keyframes lr-central-glow-pulse {{
    0% {{ opacity: calc({central_opacity}); transform: translate(-50%, -50%) scale(0.9); }}
    50% {{ opacity: calc({central_opacity} * 1.5); transform: translate(-50%, -50%) scale(1.1); }}
    100% {{ opacity: calc({central_opacity} * 1.125); transform: translate(-50%, -50%) scale(0.95); }}
}}
",
            central_opacity = central.opacity,
        );
    }

    css
}
