//! Configuration ⇄ URL query string.
//!
//! One parameter per field, camelCase keys. Colors are stored without their
//! leading `#` and re-prefixed on parse; booleans serialize as the literal
//! strings `true`/`false`. Decoding is forgiving: unknown parameters are
//! ignored and missing or unparseable values keep their defaults.

use crate::color::Rgb;
use crate::config::RayFieldConfig;

/// Serialize `config` into a query string (no leading `?`).
pub fn encode(config: &RayFieldConfig) -> String {
    let pairs: Vec<String> = vec![
        format!("color={}", config.color.to_bare_hex()),
        format!("intensity={}", fmt_num(config.intensity)),
        format!("rayCount={}", config.ray_count),
        format!("raySpread={}", fmt_num(config.ray_spread)),
        format!("rayWidth={}", fmt_num(config.ray_width)),
        format!("rayHeight={}", fmt_num(config.ray_height)),
        format!("lightX={}", fmt_num(config.light_x)),
        format!("lightY={}", fmt_num(config.light_y)),
        format!("animationSpeed1={}", fmt_num(config.animation_speed1)),
        format!("animationSpeed2={}", fmt_num(config.animation_speed2)),
        format!("animated={}", config.animated),
        format!("blurEnabled={}", config.blur_enabled),
        format!("blurIntensity={}", fmt_num(config.blur_intensity)),
        format!("backgroundEnabled={}", config.background_enabled),
        format!("backgroundColor={}", config.background_color.to_bare_hex()),
    ];
    pairs.join("&")
}

/// Parse a query string (leading `?` allowed) over the default config.
pub fn decode(query: &str) -> RayFieldConfig {
    decode_over(query, RayFieldConfig::default())
}

/// Parse a query string, overriding fields of `base` for every recognized
/// parameter.
pub fn decode_over(query: &str, mut base: RayFieldConfig) -> RayFieldConfig {
    let query = query.strip_prefix('?').unwrap_or(query);

    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else { continue };
        match key {
            "color" => set_color(&mut base.color, value),
            "backgroundColor" => set_color(&mut base.background_color, value),
            "intensity" => set_f32(&mut base.intensity, value),
            "rayCount" => {
                if let Ok(n) = value.parse::<f64>() {
                    base.ray_count = n as u32;
                }
            }
            "raySpread" => set_f32(&mut base.ray_spread, value),
            "rayWidth" => set_f32(&mut base.ray_width, value),
            "rayHeight" => set_f32(&mut base.ray_height, value),
            "lightX" => set_f32(&mut base.light_x, value),
            "lightY" => set_f32(&mut base.light_y, value),
            "animationSpeed1" => set_f32(&mut base.animation_speed1, value),
            "animationSpeed2" => set_f32(&mut base.animation_speed2, value),
            "animated" => base.animated = value == "true",
            "blurEnabled" => base.blur_enabled = value == "true",
            "backgroundEnabled" => base.background_enabled = value == "true",
            "blurIntensity" => set_f32(&mut base.blur_intensity, value),
            _ => {}
        }
    }
    base
}

fn set_color(slot: &mut Rgb, value: &str) {
    // Values arrive bare or percent-encoded with the marker.
    let value = value.strip_prefix("%23").unwrap_or(value);
    if let Some(rgb) = Rgb::parse(value) {
        *slot = rgb;
    }
}

fn set_f32(slot: &mut f32, value: &str) {
    if let Ok(v) = value.parse::<f32>() {
        *slot = v;
    }
}

/// Shortest decimal form that parses back to the same value. Integers lose
/// the trailing `.0` so `360` round-trips as `360`.
fn fmt_num(v: f32) -> String {
    if v == v.trunc() && v.abs() < 1e7 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_every_field() {
        let config = RayFieldConfig {
            color: Rgb::parse("#ff69b4").unwrap(),
            intensity: 0.9,
            ray_count: 20,
            ray_spread: 270.0,
            ray_width: 60.0,
            ray_height: 160.0,
            light_x: 25.0,
            light_y: -25.5,
            animation_speed1: 2.5,
            animation_speed2: 3.0,
            animated: false,
            blur_enabled: false,
            blur_intensity: 0.7,
            background_enabled: true,
            background_color: Rgb::parse("#0f172a").unwrap(),
        };
        let decoded = decode(&encode(&config));
        assert_eq!(decoded, config);
    }

    #[test]
    fn round_trip_of_defaults() {
        assert_eq!(decode(&encode(&RayFieldConfig::default())), RayFieldConfig::default());
    }

    #[test]
    fn colors_travel_without_marker() {
        let encoded = encode(&RayFieldConfig::default());
        assert!(encoded.contains("color=00ddff"));
        assert!(!encoded.contains("color=#"));
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let config = decode("?color=00ff7f&utm_source=share&bogus");
        assert_eq!(config.color, Rgb::new(0, 255, 127));
        assert_eq!(config.ray_count, RayFieldConfig::default().ray_count);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = decode("intensity=high&rayCount=twelve&color=nothex&animated=yes");
        let default = RayFieldConfig::default();
        assert_eq!(config.intensity, default.intensity);
        assert_eq!(config.ray_count, default.ray_count);
        assert_eq!(config.color, default.color);
        // "yes" is not the literal "true"
        assert!(!config.animated);
    }

    #[test]
    fn booleans_are_literal_strings() {
        let config = decode("animated=false&blurEnabled=true&backgroundEnabled=true");
        assert!(!config.animated);
        assert!(config.blur_enabled);
        assert!(config.background_enabled);
    }

    #[test]
    fn percent_encoded_marker_is_tolerated() {
        let config = decode("color=%2300ff7f");
        assert_eq!(config.color, Rgb::new(0, 255, 127));
    }

    #[test]
    fn empty_query_yields_defaults() {
        assert_eq!(decode(""), RayFieldConfig::default());
        assert_eq!(decode("?"), RayFieldConfig::default());
    }
}
