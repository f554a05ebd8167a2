//! Ray field generation — the layout algorithm behind the effect.
//!
//! A [`RayField`] is the ephemeral primitive set derived from one
//! configuration: two concentric layers of rays plus an ambient wash and a
//! central glow. The set is rebuilt from scratch on every configuration
//! change; there is no diffing. Output is random in angle/opacity jitter but
//! fixed in structure: the same configuration always yields the same element
//! counts and the same non-random geometry.

use crate::color::Rgb;
use crate::config::RayFieldConfig;
use crate::rng::RaySource;

/// Which visual treatment a primitive gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RayKind {
    /// The beam itself.
    Main,
    /// Wider, fainter halo behind a beam. Blur mode only.
    Soft,
    /// Very wide, very faint outer halo. Blur mode, layer 1 only.
    Ultra,
}

/// One positioned beam element. Regenerated every pass, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct RayPrimitive {
    pub layer: u8,
    pub kind: RayKind,
    /// Rotation around the light origin, degrees.
    pub angle: f32,
    /// Animation delay, seconds.
    pub delay: f32,
    /// Base opacity before the intensity scale is applied.
    pub opacity: f32,
    /// Width in px.
    pub width: f32,
    /// Height in vh.
    pub height: f32,
    /// Per-ray shimmer cycle duration, seconds (6–10).
    pub shimmer_s: f32,
    /// Per-ray sway amplitude, degrees (1–3).
    pub sway_deg: f32,
    /// Runs its keyframes backwards. Roughly 15% of rays.
    pub reversed: bool,
}

impl RayPrimitive {
    /// Opacity after the global intensity scale, as the stylesheet resolves
    /// it. Zero intensity extinguishes the field without changing counts.
    pub fn effective_opacity(&self, intensity: f32) -> f32 {
        self.opacity * intensity
    }
}

/// The broad top-down gradient wash behind the rays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientGlow {
    /// Alpha at the top edge, capped at 0.6.
    pub alpha_top: f32,
    /// Alpha a quarter of the way down, capped at 0.4.
    pub alpha_mid: f32,
}

/// The bright highlight at the light origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentralGlow {
    pub opacity: f32,
    /// Blur radius in px.
    pub blur_px: f32,
}

/// Values the surface exposes as CSS custom properties.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceVars {
    pub rgb: Rgb,
    pub intensity: f32,
    pub light_x: f32,
    pub light_y: f32,
    pub ray_width: f32,
    pub ray_height: f32,
    pub speed1: f32,
    pub speed2: f32,
}

/// Complete primitive set for one configuration.
#[derive(Clone, Debug)]
pub struct RayField {
    pub vars: SurfaceVars,
    pub ambient: AmbientGlow,
    pub central: CentralGlow,
    pub rays: Vec<RayPrimitive>,
}

/// Per-layer generation parameters.
struct LayerParams {
    layer: u8,
    angle_offset: f32,
    size_mult: f32,
    soft_mult: f32,
    height_mult: f32,
    opacity_mult: f32,
    delay_step: f32,
    delay_base: f32,
}

const LAYERS: [LayerParams; 2] = [
    LayerParams {
        layer: 1,
        angle_offset: 0.0,
        size_mult: 1.0,
        soft_mult: 1.5,
        height_mult: 1.0,
        opacity_mult: 1.0,
        delay_step: 0.1,
        delay_base: 0.0,
    },
    LayerParams {
        layer: 2,
        angle_offset: 15.0,
        size_mult: 0.8,
        soft_mult: 1.2,
        height_mult: 0.9,
        opacity_mult: 0.8,
        delay_step: 0.15,
        delay_base: 0.5,
    },
];

impl RayField {
    /// Generate the full primitive set for `config`, drawing jitter from
    /// `source`.
    pub fn generate(config: &RayFieldConfig, source: &mut dyn RaySource) -> Self {
        let mut rays = Vec::with_capacity(Self::expected_ray_count(config));

        for params in LAYERS {
            let count = match params.layer {
                1 => config.layer1_count(),
                _ => config.layer2_count(),
            };
            generate_layer(config, &params, count, source, &mut rays);
        }

        Self {
            vars: SurfaceVars {
                rgb: config.color,
                intensity: config.intensity,
                light_x: config.light_x,
                light_y: config.light_y,
                ray_width: config.ray_width,
                ray_height: config.ray_height,
                speed1: config.animation_speed1,
                speed2: config.animation_speed2,
            },
            ambient: AmbientGlow {
                alpha_top: (0.36 * config.intensity).clamp(0.0, 0.6),
                alpha_mid: (0.20 * config.intensity).clamp(0.0, 0.4),
            },
            central: CentralGlow {
                opacity: config.intensity * 0.8,
                blur_px: if config.blur_enabled {
                    30.0 * config.blur_intensity
                } else {
                    10.0
                },
            },
            rays,
        }
    }

    /// Total ray primitives the configuration produces: each layer-1 group
    /// emits up to 3 primitives and each layer-2 group up to 2, depending on
    /// blur mode.
    pub fn expected_ray_count(config: &RayFieldConfig) -> usize {
        let per_group1 = if config.blur_enabled { 3 } else { 1 };
        let per_group2 = if config.blur_enabled { 2 } else { 1 };
        config.layer1_count() as usize * per_group1 + config.layer2_count() as usize * per_group2
    }

    pub fn layer_mains(&self, layer: u8) -> impl Iterator<Item = &RayPrimitive> {
        self.rays
            .iter()
            .filter(move |r| r.layer == layer && r.kind == RayKind::Main)
    }
}

fn generate_layer(
    config: &RayFieldConfig,
    params: &LayerParams,
    count: u32,
    source: &mut dyn RaySource,
    out: &mut Vec<RayPrimitive>,
) {
    for i in 0..count {
        let base_angle = (config.ray_spread / count as f32) * i as f32 + params.angle_offset;
        let angle = base_angle + source.range(-2.0, 2.0);
        let delay = i as f32 * params.delay_step + params.delay_base + source.range(0.0, 0.2);
        let base_opacity = (0.4 + source.unit() * 0.5) * params.opacity_mult;
        let size_variation = 0.85 + source.unit() * 0.3;
        let height_variation = 0.9 + source.unit() * 0.2;

        let width = config.ray_width * params.size_mult * size_variation;
        let height = config.ray_height * params.height_mult * height_variation;

        out.push(sprinkle(source, RayPrimitive {
            layer: params.layer,
            kind: RayKind::Main,
            angle,
            delay,
            opacity: base_opacity,
            width,
            height,
            shimmer_s: 0.0,
            sway_deg: 0.0,
            reversed: false,
        }));

        if config.blur_enabled {
            out.push(sprinkle(source, RayPrimitive {
                layer: params.layer,
                kind: RayKind::Soft,
                angle,
                delay,
                opacity: base_opacity * 0.4,
                width: width * params.soft_mult,
                height,
                shimmer_s: 0.0,
                sway_deg: 0.0,
                reversed: false,
            }));

            if params.layer == 1 {
                out.push(sprinkle(source, RayPrimitive {
                    layer: params.layer,
                    kind: RayKind::Ultra,
                    angle,
                    delay,
                    opacity: base_opacity * 0.2,
                    width: width * 2.0,
                    height,
                    shimmer_s: 0.0,
                    sway_deg: 0.0,
                    reversed: false,
                }));
            }
        }
    }
}

/// Fill in the per-ray animation character.
fn sprinkle(source: &mut dyn RaySource, mut ray: RayPrimitive) -> RayPrimitive {
    ray.shimmer_s = 6.0 + source.unit() * 4.0;
    ray.sway_deg = 1.0 + source.unit() * 2.0;
    ray.reversed = source.unit() < 0.15;
    ray
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    fn generate(config: &RayFieldConfig) -> RayField {
        RayField::generate(config, &mut SeededSource::new(99))
    }

    #[test]
    fn layer_group_counts_match_config() {
        for ray_count in [1, 6, 12, 30, 61] {
            let config = RayFieldConfig { ray_count, ..Default::default() };
            let field = generate(&config);
            assert_eq!(field.layer_mains(1).count() as u32, ray_count);
            assert_eq!(
                field.layer_mains(2).count() as u32,
                (ray_count as f32 * 0.7).floor() as u32
            );
        }
    }

    #[test]
    fn sharp_mode_emits_only_main_primitives() {
        let config = RayFieldConfig { blur_enabled: false, ..Default::default() };
        let field = generate(&config);
        assert!(field.rays.iter().all(|r| r.kind == RayKind::Main));
        assert_eq!(field.rays.len(), config.ray_count as usize + config.layer2_count() as usize);
    }

    #[test]
    fn blur_mode_emits_halos_and_layer1_ultras() {
        let config = RayFieldConfig { ray_count: 12, blur_enabled: true, ..Default::default() };
        let field = generate(&config);

        // 12 groups x 3 + 8 groups x 2, plus one ambient and one central
        // carried separately on the field.
        assert_eq!(field.rays.len(), 12 * 3 + 8 * 2);
        assert_eq!(
            field.rays.iter().filter(|r| r.kind == RayKind::Ultra).count(),
            12
        );
        assert!(field
            .rays
            .iter()
            .filter(|r| r.kind == RayKind::Ultra)
            .all(|r| r.layer == 1));
    }

    #[test]
    fn zero_intensity_extinguishes_without_changing_counts() {
        let config = RayFieldConfig { intensity: 0.0, ..Default::default() };
        let field = generate(&config);
        assert_eq!(field.rays.len(), RayField::expected_ray_count(&config));
        for ray in &field.rays {
            assert_eq!(ray.effective_opacity(config.intensity), 0.0);
        }
        assert_eq!(field.ambient.alpha_top, 0.0);
        assert_eq!(field.central.opacity, 0.0);
    }

    #[test]
    fn structure_is_idempotent_across_regenerations() {
        let config = RayFieldConfig::default();
        let a = RayField::generate(&config, &mut SeededSource::new(1));
        let b = RayField::generate(&config, &mut SeededSource::new(2));

        // Jitter differs, structure does not.
        assert_eq!(a.rays.len(), b.rays.len());
        assert_eq!(a.vars, b.vars);
        assert_eq!(a.ambient, b.ambient);
        assert_eq!(a.central, b.central);
        for (x, y) in a.rays.iter().zip(&b.rays) {
            assert_eq!(x.layer, y.layer);
            assert_eq!(x.kind, y.kind);
        }
    }

    #[test]
    fn same_seed_yields_identical_fields() {
        let config = RayFieldConfig::default();
        let a = RayField::generate(&config, &mut SeededSource::new(5));
        let b = RayField::generate(&config, &mut SeededSource::new(5));
        assert_eq!(a.rays, b.rays);
    }

    #[test]
    fn angles_follow_the_spread_distribution() {
        let config = RayFieldConfig { ray_count: 12, ray_spread: 360.0, ..Default::default() };
        let field = generate(&config);
        for (i, ray) in field.layer_mains(1).enumerate() {
            let base = 360.0 / 12.0 * i as f32;
            assert!(
                (ray.angle - base).abs() <= 2.0,
                "ray {i} angle {} too far from {base}",
                ray.angle
            );
        }
        for (i, ray) in field.layer_mains(2).enumerate() {
            let base = 360.0 / 8.0 * i as f32 + 15.0;
            assert!((ray.angle - base).abs() <= 2.0);
        }
    }

    #[test]
    fn delays_ramp_per_layer() {
        let config = RayFieldConfig { ray_count: 10, ..Default::default() };
        let field = generate(&config);
        for (i, ray) in field.layer_mains(1).enumerate() {
            let base = i as f32 * 0.1;
            assert!(ray.delay >= base && ray.delay < base + 0.2 + 1e-4);
        }
        for (i, ray) in field.layer_mains(2).enumerate() {
            let base = i as f32 * 0.15 + 0.5;
            assert!(ray.delay >= base && ray.delay < base + 0.2 + 1e-4);
        }
    }

    #[test]
    fn layer2_opacity_is_scaled_down() {
        let config = RayFieldConfig { ray_count: 40, ..Default::default() };
        let field = generate(&config);
        for ray in field.layer_mains(1) {
            assert!(ray.opacity >= 0.4 && ray.opacity < 0.9 + 1e-4);
        }
        for ray in field.layer_mains(2) {
            assert!(ray.opacity >= 0.4 * 0.8 && ray.opacity < 0.9 * 0.8 + 1e-4);
        }
    }

    #[test]
    fn halo_opacities_derive_from_their_main() {
        let config = RayFieldConfig { ray_count: 4, blur_enabled: true, ..Default::default() };
        let field = generate(&config);
        let mut iter = field.rays.iter();
        while let Some(main) = iter.next() {
            assert_eq!(main.kind, RayKind::Main);
            let soft = iter.next().unwrap();
            assert_eq!(soft.kind, RayKind::Soft);
            assert!((soft.opacity - main.opacity * 0.4).abs() < 1e-6);
            assert_eq!(soft.angle, main.angle);
            if main.layer == 1 {
                let ultra = iter.next().unwrap();
                assert_eq!(ultra.kind, RayKind::Ultra);
                assert!((ultra.opacity - main.opacity * 0.2).abs() < 1e-6);
                assert!((ultra.width - main.width * 2.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn central_blur_tracks_blur_intensity() {
        let blurred = generate(&RayFieldConfig { blur_intensity: 2.0, ..Default::default() });
        assert_eq!(blurred.central.blur_px, 60.0);
        let sharp = generate(&RayFieldConfig { blur_enabled: false, ..Default::default() });
        assert_eq!(sharp.central.blur_px, 10.0);
    }
}
