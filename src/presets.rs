//! Named configuration bundles and the one-level preset undo.

use crate::color::Rgb;
use crate::config::RayFieldConfig;

/// A preset overwrites only the fields it defines; everything else keeps its
/// current value. Applied atomically.
#[derive(Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    apply: fn(&mut RayFieldConfig),
}

impl Preset {
    pub fn apply_to(&self, config: &mut RayFieldConfig) {
        (self.apply)(config);
    }
}

pub const PRESETS: [Preset; 5] = [
    Preset { name: "soft", apply: soft },
    Preset { name: "neon", apply: neon },
    Preset { name: "ethereal", apply: ethereal },
    Preset { name: "cinematic", apply: cinematic },
    Preset { name: "forest", apply: forest },
];

pub fn find(name: &str) -> Option<Preset> {
    PRESETS.iter().copied().find(|p| p.name == name)
}

fn soft(c: &mut RayFieldConfig) {
    c.color = Rgb::new(0x00, 0xff, 0x7f);
    c.intensity = 0.4;
    c.ray_count = 8;
    c.ray_width = 100.0;
    c.ray_height = 150.0;
    c.blur_enabled = true;
    c.animated = true;
    c.light_x = 100.0;
    c.light_y = -50.0;
    c.animation_speed1 = 1.0;
    c.animation_speed2 = 0.7;
}

fn neon(c: &mut RayFieldConfig) {
    c.color = Rgb::new(0xff, 0x69, 0xb4);
    c.intensity = 0.9;
    c.ray_count = 20;
    c.ray_width = 60.0;
    c.ray_height = 160.0;
    c.blur_enabled = false;
    c.animated = true;
    c.light_x = 25.0;
    c.light_y = 25.0;
    c.animation_speed1 = 2.5;
    c.animation_speed2 = 3.0;
}

fn ethereal(c: &mut RayFieldConfig) {
    c.color = Rgb::new(0xaa, 0x44, 0xff);
    c.intensity = 0.6;
    c.ray_count = 12;
    c.ray_width = 120.0;
    c.ray_height = 200.0;
    c.blur_enabled = true;
    c.animated = true;
    c.light_x = 75.0;
    c.light_y = -75.0;
    c.animation_speed1 = 0.5;
    c.animation_speed2 = 1.8;
}

fn cinematic(c: &mut RayFieldConfig) {
    c.color = Rgb::new(0xff, 0x6b, 0x35);
    c.intensity = 0.7;
    c.ray_count = 6;
    c.ray_width = 180.0;
    c.ray_height = 250.0;
    c.blur_enabled = true;
    c.animated = false;
    c.light_x = 100.0;
    c.light_y = -25.0;
    c.animation_speed1 = 1.0;
    c.animation_speed2 = 1.0;
}

fn forest(c: &mut RayFieldConfig) {
    c.color = Rgb::new(0x32, 0xcd, 0x32);
    c.intensity = 0.5;
    c.ray_count = 10;
    c.ray_width = 90.0;
    c.ray_height = 140.0;
    c.blur_enabled = true;
    c.animated = true;
    c.light_x = 80.0;
    c.light_y = -100.0;
    c.animation_speed1 = 0.8;
    c.animation_speed2 = 0.4;
}

/// Toggle bookkeeping: the first application snapshots the configuration so
/// re-applying the active preset reverts to it. One level of undo only.
#[derive(Default)]
pub struct PresetState {
    active: Option<&'static str>,
    saved: Option<RayFieldConfig>,
}

/// What a toggle did, for UI feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetAction {
    Applied,
    Reverted,
    Unknown,
}

impl PresetState {
    pub fn active(&self) -> Option<&'static str> {
        self.active
    }

    /// Apply `name` to `config`, or revert if `name` is already active.
    pub fn toggle(&mut self, name: &str, config: &mut RayFieldConfig) -> PresetAction {
        let Some(preset) = find(name) else {
            return PresetAction::Unknown;
        };

        if self.active == Some(preset.name) {
            if let Some(saved) = self.saved.take() {
                *config = saved;
            }
            self.active = None;
            return PresetAction::Reverted;
        }

        // Snapshot only when no preset is active; switching presets keeps
        // the original pre-preset state as the revert target.
        if self.active.is_none() {
            self.saved = Some(config.clone());
        }
        preset.apply_to(config);
        self.active = Some(preset.name);
        PresetAction::Applied
    }

    /// A manual edit clears the active preset without restoring anything.
    pub fn invalidate(&mut self) {
        self.active = None;
        self.saved = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_applies_then_reverts_exactly() {
        let mut state = PresetState::default();
        let mut config = RayFieldConfig { ray_count: 17, intensity: 0.33, ..Default::default() };
        let before = config.clone();

        assert_eq!(state.toggle("neon", &mut config), PresetAction::Applied);
        assert_eq!(config.ray_count, 20);
        assert_eq!(state.active(), Some("neon"));

        assert_eq!(state.toggle("neon", &mut config), PresetAction::Reverted);
        assert_eq!(config, before);
        assert_eq!(state.active(), None);
    }

    #[test]
    fn switching_presets_keeps_the_original_revert_target() {
        let mut state = PresetState::default();
        let mut config = RayFieldConfig { ray_count: 17, ..Default::default() };
        let before = config.clone();

        state.toggle("soft", &mut config);
        state.toggle("forest", &mut config);
        assert_eq!(config.ray_count, 10);

        state.toggle("forest", &mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn presets_overwrite_only_their_fields() {
        let mut state = PresetState::default();
        let mut config = RayFieldConfig {
            ray_spread: 180.0,
            blur_intensity: 2.5,
            background_enabled: true,
            ..Default::default()
        };
        state.toggle("soft", &mut config);
        // soft does not define these
        assert_eq!(config.ray_spread, 180.0);
        assert_eq!(config.blur_intensity, 2.5);
        assert!(config.background_enabled);
    }

    #[test]
    fn unknown_preset_is_a_no_op() {
        let mut state = PresetState::default();
        let mut config = RayFieldConfig::default();
        assert_eq!(state.toggle("vaporwave", &mut config), PresetAction::Unknown);
        assert_eq!(config, RayFieldConfig::default());
        assert_eq!(state.active(), None);
    }

    #[test]
    fn manual_edit_clears_active_without_restoring() {
        let mut state = PresetState::default();
        let mut config = RayFieldConfig::default();
        state.toggle("neon", &mut config);
        state.invalidate();
        assert_eq!(state.active(), None);
        // config stays as neon left it
        assert_eq!(config.ray_count, 20);
        // and re-toggling neon now snapshots the neon values themselves
        state.toggle("neon", &mut config);
        state.toggle("neon", &mut config);
        assert_eq!(config.ray_count, 20);
    }

    #[test]
    fn every_preset_is_findable() {
        for preset in PRESETS {
            assert!(find(preset.name).is_some());
        }
    }
}
