//! The ray-field configuration record.
//!
//! One struct covers every knob the generator exposes; the historical
//! variants (with/without `raySpread`, `blurIntensity`, background) collapse
//! into optional behavior gated by the fields below. A config is immutable
//! per render pass: the renderer clones it and regenerates from scratch on
//! every change.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Full configuration of a ray field.
///
/// Numeric fields are deliberately permissive; the only normalization the
/// engine applies is [`RayFieldConfig::layer1_count`] clamping the ray count
/// to at least one so the angle distribution never divides by zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RayFieldConfig {
    /// Tint applied to every ray and glow.
    pub color: Rgb,
    /// Global opacity scale in [0, 1].
    pub intensity: f32,
    /// Number of primary-layer rays.
    pub ray_count: u32,
    /// Angular span in degrees over which each layer distributes its rays.
    pub ray_spread: f32,
    /// Base ray width in px.
    pub ray_width: f32,
    /// Base ray height in vh.
    pub ray_height: f32,
    /// Light origin X as a percentage of the surface box.
    pub light_x: f32,
    /// Light origin Y as a percentage; negative places the origin above the
    /// visible area.
    pub light_y: f32,
    /// Layer-1 animation rate multiplier.
    pub animation_speed1: f32,
    /// Layer-2 animation rate multiplier.
    pub animation_speed2: f32,
    /// Disables all keyframe animation when false.
    pub animated: bool,
    /// Soft radial rays with halos when true, sharp clipped wedges when false.
    pub blur_enabled: bool,
    /// Scales every blur radius.
    pub blur_intensity: f32,
    /// Paint a solid backdrop behind the field.
    pub background_enabled: bool,
    pub background_color: Rgb,
}

impl Default for RayFieldConfig {
    fn default() -> Self {
        Self {
            color: Rgb::new(0x00, 0xdd, 0xff),
            intensity: 0.8,
            ray_count: 30,
            ray_spread: 360.0,
            ray_width: 240.0,
            ray_height: 180.0,
            light_x: 100.0,
            light_y: -5.0,
            animation_speed1: 3.0,
            animation_speed2: 3.0,
            animated: true,
            blur_enabled: true,
            blur_intensity: 1.0,
            background_enabled: false,
            background_color: Rgb::new(0, 0, 0),
        }
    }
}

impl RayFieldConfig {
    /// Primary-layer ray count, clamped to a minimum of one.
    pub fn layer1_count(&self) -> u32 {
        self.ray_count.max(1)
    }

    /// Secondary-layer ray count: `floor(rayCount * 0.7)`. May be zero.
    pub fn layer2_count(&self) -> u32 {
        (self.layer1_count() as f32 * 0.7).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_counts_follow_the_seventy_percent_rule() {
        let mut config = RayFieldConfig { ray_count: 12, ..Default::default() };
        assert_eq!(config.layer1_count(), 12);
        assert_eq!(config.layer2_count(), 8);

        config.ray_count = 1;
        assert_eq!(config.layer2_count(), 0);
    }

    #[test]
    fn zero_ray_count_clamps_to_one() {
        let config = RayFieldConfig { ray_count: 0, ..Default::default() };
        assert_eq!(config.layer1_count(), 1);
    }

    #[test]
    fn serde_uses_camel_case_wire_names() {
        let json = serde_json::to_string(&RayFieldConfig::default()).unwrap();
        assert!(json.contains("\"rayCount\":30"));
        assert!(json.contains("\"color\":\"#00ddff\""));
        assert!(json.contains("\"blurEnabled\":true"));

        let back: RayFieldConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RayFieldConfig::default());
    }
}
