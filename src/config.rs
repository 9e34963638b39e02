//! Typed panel configuration and the normalization boundary.
//!
//! The host hands configuration over as a JSON-compatible value. Normalization
//! is a total function over that value: every field is merged over a known
//! default, scalars are coerced rather than rejected, deprecated keys are
//! dropped by construction, and the slot list is truncated to
//! [`MAX_BUTTONS`]. Only three shapes are fatal (see [`ConfigError`]):
//! a missing/non-object configuration, a non-list `buttons`, and a
//! `center_card` that is neither object nor null.
//!
//! # Merge Strategy
//!
//! The schema is small and fully enumerable, so the merge is explicit and
//! field-by-field instead of a generic recursive object merge: object fields
//! (`badge`) merge key-wise, arrays (`buttons`) and primitives overwrite
//! wholesale. Unknown keys are ignored (forward compatibility); deprecated
//! keys (`width`, `height`, `offset_left_px`, `center_show_name`,
//! `badge.pos_right`, `badge.pos_bottom`) can never survive into the typed
//! output (backward compatibility).
//!
//! # Round-trips
//!
//! The normalized configuration serializes back to the persisted JSON layout
//! via [`PanelConfig::to_value`]; the editor collaborator shares this
//! contract. `normalize` is idempotent through that round-trip.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ConfigError;
use crate::layout::MAX_BUTTONS;
use crate::state::parse_leading_int;

// =============================================================================
// Defaults
// =============================================================================

/// Default main icon color. Also the fallback for badge case colors and
/// button icon colors.
pub const DEFAULT_MAIN_ICON_COLOR: &str = "teal";

/// Default main icon.
pub const DEFAULT_MAIN_ICON: &str = "mdi:home";

/// Default button icon, applied at render time when a slot has none.
pub const DEFAULT_BUTTON_ICON: &str = "mdi:gesture-tap";

/// Deprecated top-level keys. Stripped on every write path; listed here as
/// the compatibility contract, the typed merge ignores them by construction.
pub const DEPRECATED_TOP_LEVEL_KEYS: [&str; 4] = ["width", "height", "offset_left_px", "center_show_name"];

/// Deprecated keys inside `badge` (the badge position is a design invariant).
pub const DEPRECATED_BADGE_KEYS: [&str; 2] = ["pos_right", "pos_bottom"];

// =============================================================================
// Configuration Tree
// =============================================================================

/// Badge evaluation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeMode {
    /// No badge is ever shown.
    #[default]
    None,
    /// Threshold chain over temperature/humidity readings.
    TempHumidityThresholds,
}

/// Badge policy: thresholds plus per-case icon/color overrides.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BadgeConfig {
    /// Evaluation mode.
    pub mode: BadgeMode,
    /// Humidity at or above this shows the humidity badge.
    pub humidity_high: i32,
    /// Temperature at or above this shows the hot badge.
    pub temp_hot: i32,
    /// Temperature at or below this shows the cold badge.
    pub temp_cold: i32,
    /// Icon for the humidity case.
    pub icon_humidity: String,
    /// Color for the humidity case. Blank falls back to the main icon color.
    pub color_humidity: String,
    /// Icon for the hot case.
    pub icon_hot: String,
    /// Color for the hot case.
    pub color_hot: String,
    /// Icon for the cold case.
    pub icon_cold: String,
    /// Color for the cold case.
    pub color_cold: String,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            mode: BadgeMode::None,
            humidity_high: 60,
            temp_hot: 26,
            temp_cold: 18,
            icon_humidity: "mdi:water".into(),
            color_humidity: "blue".into(),
            icon_hot: "mdi:fire".into(),
            color_hot: "red".into(),
            icon_cold: "mdi:snowflake".into(),
            color_cold: "blue".into(),
        }
    }
}

/// Center control preset.
///
/// Unknown preset strings normalize to [`CenterPreset::Entity`], matching the
/// generic fallback the synthesis table applies anyway.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CenterPreset {
    /// No synthesized center control.
    #[default]
    None,
    /// Thermostat card.
    Thermostat,
    /// Light card.
    Light,
    /// Media player card.
    Media,
    /// Fan as a single-row entities card.
    Fan,
    /// Generic single-row entities card.
    Entity,
}

/// Tap action for one interactive slot.
///
/// The five kinds are mutually exclusive; unknown action strings normalize
/// to [`TapAction::None`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum TapAction {
    /// Inert tap.
    #[default]
    None,
    /// Toggle the slot entity via its domain's generic toggle operation.
    Toggle,
    /// Request the host's more-info surface for the slot entity.
    MoreInfo,
    /// Push a path onto host navigation history.
    Navigate {
        /// Target path. Empty paths are dispatch no-ops.
        navigation_path: String,
    },
    /// Invoke an arbitrary `domain.service` with a JSON payload.
    CallService {
        /// `domain.service`-shaped identifier.
        service: String,
        /// Payload object, defaults to empty.
        data: Map<String, Value>,
    },
}

/// One interactive slot definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ButtonConfig {
    /// Button label.
    pub label: String,
    /// Icon name. Blank falls back to [`DEFAULT_BUTTON_ICON`] at render time.
    pub icon: String,
    /// Icon color. Blank falls back to the main icon color.
    pub icon_color: String,
    /// Label text color. Blank inherits the theme color.
    pub text_color: String,
    /// Entity this button refers to (used by toggle and more-info).
    pub entity: String,
    /// Disabled buttons render dimmed and never dispatch.
    pub disabled: bool,
    /// Tap action.
    pub tap: TapAction,
}

/// Normalized panel configuration. Immutable snapshot per update.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PanelConfig {
    /// Room title.
    pub title: String,
    /// Title color, blank inherits the theme.
    pub title_color: String,
    /// Title size in pixels (render floor applies).
    pub title_size_px: i32,
    /// Subtitle color, blank inherits the theme.
    pub subtitle_color: String,
    /// Subtitle size in pixels (render floor applies).
    pub subtitle_size_px: i32,

    /// Temperature entity for the subtitle/badge, blank omits the part.
    pub env_temp_entity: String,
    /// Humidity entity for the subtitle/badge, blank omits the part.
    pub env_humidity_entity: String,

    /// Background image reference, passed through to the renderer.
    pub background_image: String,
    /// Dark overlay opacity over the background.
    pub overlay_opacity: f32,

    /// Main (room) icon.
    pub big_icon: String,
    /// Main icon color; drives the halo and several fallbacks.
    pub big_icon_color: String,
    /// Main icon size in pixels (render floor applies).
    pub big_icon_size: i32,

    /// Badge policy.
    pub badge: BadgeConfig,

    /// General center control scale multiplier.
    pub center_scale: f32,
    /// Scale multiplier when the active preset is `light` (documented
    /// special case, not derivable from the general scale).
    pub center_light_scale: f32,
    /// Whether more-info affordances inside the center control are hidden.
    pub center_hide_more_info: bool,

    /// Literal center descriptor override. Wins over preset + entity.
    pub center_card: Option<Value>,
    /// Center control preset.
    pub center_preset: CenterPreset,
    /// Entity the synthesized center control binds to.
    pub center_entity: String,

    /// Interactive slot definitions, at most [`MAX_BUTTONS`].
    pub buttons: Vec<ButtonConfig>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "Room".into(),
            title_color: String::new(),
            title_size_px: 26,
            subtitle_color: String::new(),
            subtitle_size_px: 20,
            env_temp_entity: String::new(),
            env_humidity_entity: String::new(),
            background_image: String::new(),
            overlay_opacity: 0.7,
            big_icon: DEFAULT_MAIN_ICON.into(),
            big_icon_color: DEFAULT_MAIN_ICON_COLOR.into(),
            big_icon_size: 200,
            badge: BadgeConfig::default(),
            center_scale: 1.0,
            center_light_scale: 1.25,
            center_hide_more_info: true,
            center_card: None,
            center_preset: CenterPreset::None,
            center_entity: String::new(),
            buttons: Vec::new(),
        }
    }
}

impl PanelConfig {
    /// Starter configuration offered to new panels (the editor's stub).
    pub fn stub() -> Self {
        Self {
            background_image: "/local/images/room.jpg".into(),
            ..Self::default()
        }
    }

    /// Serialize back to the persisted JSON layout shared with the editor.
    ///
    /// Serialization of this schema cannot fail; a default tree is returned
    /// in the (unreachable) error case to keep the write path total.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

// =============================================================================
// Scalar Coercion Helpers
// =============================================================================

fn str_field(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

/// `parseInt`-style integer coercion: numbers truncate toward zero, strings
/// contribute their leading integer, everything else falls back.
fn int_field(obj: &Map<String, Value>, key: &str, default: i32) -> i32 {
    match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64().map_or(default, |f| f.trunc() as i32),
        Some(Value::String(s)) => parse_leading_int(s).unwrap_or(default),
        _ => default,
    }
}

fn num_field(obj: &Map<String, Value>, key: &str, default: f32) -> f32 {
    match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64().map_or(default, |f| f as f32),
        Some(Value::String(s)) => s.trim().parse::<f32>().unwrap_or(default),
        _ => default,
    }
}

fn bool_field(obj: &Map<String, Value>, key: &str, default: bool) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => match s.as_str() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => default,
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalize a raw configuration value into a [`PanelConfig`].
///
/// Total over everything except the three fatal shapes in [`ConfigError`]:
/// malformed scalars coerce, unknown keys are ignored, deprecated keys are
/// dropped, the slot list is truncated to [`MAX_BUTTONS`] in stable order.
pub fn normalize(raw: &Value) -> Result<PanelConfig, ConfigError> {
    let obj = match raw {
        Value::Object(m) => m,
        _ => return Err(ConfigError::Missing),
    };

    // buttons: absent or null is fine, anything else must be a list
    let raw_buttons: &[Value] = match obj.get("buttons") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ConfigError::ButtonsNotAList),
    };

    // center_card: literal descriptor must be an object (or null/absent)
    let center_card = match obj.get("center_card") {
        None | Some(Value::Null) => None,
        Some(Value::Object(m)) => Some(Value::Object(m.clone())),
        Some(_) => return Err(ConfigError::CenterCardNotAnObject),
    };

    let d = PanelConfig::default();
    let buttons = raw_buttons.iter().take(MAX_BUTTONS).map(normalize_button).collect();

    Ok(PanelConfig {
        title: str_field(obj, "title", &d.title),
        title_color: str_field(obj, "title_color", &d.title_color),
        title_size_px: int_field(obj, "title_size_px", d.title_size_px),
        subtitle_color: str_field(obj, "subtitle_color", &d.subtitle_color),
        subtitle_size_px: int_field(obj, "subtitle_size_px", d.subtitle_size_px),
        env_temp_entity: str_field(obj, "env_temp_entity", &d.env_temp_entity),
        env_humidity_entity: str_field(obj, "env_humidity_entity", &d.env_humidity_entity),
        background_image: str_field(obj, "background_image", &d.background_image),
        overlay_opacity: num_field(obj, "overlay_opacity", d.overlay_opacity),
        big_icon: str_field(obj, "big_icon", &d.big_icon),
        big_icon_color: str_field(obj, "big_icon_color", &d.big_icon_color),
        big_icon_size: int_field(obj, "big_icon_size", d.big_icon_size),
        badge: normalize_badge(obj.get("badge")),
        center_scale: num_field(obj, "center_scale", d.center_scale),
        center_light_scale: num_field(obj, "center_light_scale", d.center_light_scale),
        center_hide_more_info: bool_field(obj, "center_hide_more_info", d.center_hide_more_info),
        center_card,
        center_preset: normalize_preset(obj),
        center_entity: str_field(obj, "center_entity", &d.center_entity),
        buttons,
    })
}

/// Key-wise merge of the badge record over its defaults.
/// `pos_right`/`pos_bottom` are never read: position is a design invariant.
fn normalize_badge(raw: Option<&Value>) -> BadgeConfig {
    let d = BadgeConfig::default();
    let obj = match raw {
        Some(Value::Object(m)) => m,
        _ => return d,
    };
    let mode = match obj.get("mode").and_then(Value::as_str) {
        Some("temp_humidity_thresholds") => BadgeMode::TempHumidityThresholds,
        _ => BadgeMode::None,
    };
    BadgeConfig {
        mode,
        humidity_high: int_field(obj, "humidity_high", d.humidity_high),
        temp_hot: int_field(obj, "temp_hot", d.temp_hot),
        temp_cold: int_field(obj, "temp_cold", d.temp_cold),
        icon_humidity: str_field(obj, "icon_humidity", &d.icon_humidity),
        color_humidity: str_field(obj, "color_humidity", &d.color_humidity),
        icon_hot: str_field(obj, "icon_hot", &d.icon_hot),
        color_hot: str_field(obj, "color_hot", &d.color_hot),
        icon_cold: str_field(obj, "icon_cold", &d.icon_cold),
        color_cold: str_field(obj, "color_cold", &d.color_cold),
    }
}

fn normalize_preset(obj: &Map<String, Value>) -> CenterPreset {
    match obj.get("center_preset").and_then(Value::as_str) {
        None | Some("none") | Some("") => CenterPreset::None,
        Some("thermostat") => CenterPreset::Thermostat,
        Some("light") => CenterPreset::Light,
        Some("media") => CenterPreset::Media,
        Some("fan") => CenterPreset::Fan,
        // Unknown presets behave as the generic entity card
        Some(_) => CenterPreset::Entity,
    }
}

/// Normalize one slot definition. Non-object entries coerce to an inert
/// default button rather than failing the whole list.
fn normalize_button(raw: &Value) -> ButtonConfig {
    let obj = match raw {
        Value::Object(m) => m,
        _ => return ButtonConfig::default(),
    };
    ButtonConfig {
        label: str_field(obj, "label", ""),
        icon: str_field(obj, "icon", ""),
        icon_color: str_field(obj, "icon_color", ""),
        text_color: str_field(obj, "text_color", ""),
        entity: str_field(obj, "entity", ""),
        disabled: bool_field(obj, "disabled", false),
        tap: normalize_tap(obj.get("tap")),
    }
}

fn normalize_tap(raw: Option<&Value>) -> TapAction {
    let obj = match raw {
        Some(Value::Object(m)) => m,
        _ => return TapAction::None,
    };
    match obj.get("action").and_then(Value::as_str) {
        Some("toggle") => TapAction::Toggle,
        Some("more-info") => TapAction::MoreInfo,
        Some("navigate") => {
            // `path` is the legacy alias for `navigation_path`
            let path = match obj.get("navigation_path").and_then(Value::as_str) {
                Some(p) if !p.is_empty() => p.to_string(),
                _ => str_field(obj, "path", ""),
            };
            TapAction::Navigate { navigation_path: path }
        }
        Some("call-service") => {
            let data = match obj.get("data") {
                Some(Value::Object(m)) => m.clone(),
                _ => Map::new(),
            };
            TapAction::CallService {
                service: str_field(obj, "service", ""),
                data,
            }
        }
        // Unknown action kinds are inert
        _ => TapAction::None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_empty_object_yields_defaults() {
        let cfg = normalize(&json!({})).unwrap();
        assert_eq!(cfg, PanelConfig::default());
    }

    #[test]
    fn test_normalize_missing_config() {
        assert_eq!(normalize(&Value::Null), Err(ConfigError::Missing));
        assert_eq!(normalize(&json!("room")), Err(ConfigError::Missing));
    }

    #[test]
    fn test_normalize_buttons_not_a_list() {
        let raw = json!({ "buttons": "nope" });
        assert_eq!(normalize(&raw), Err(ConfigError::ButtonsNotAList));
    }

    #[test]
    fn test_normalize_buttons_null_is_empty() {
        let cfg = normalize(&json!({ "buttons": null })).unwrap();
        assert!(cfg.buttons.is_empty());
    }

    #[test]
    fn test_normalize_center_card_shapes() {
        let ok = normalize(&json!({ "center_card": { "type": "thermostat" } })).unwrap();
        assert!(ok.center_card.is_some());

        let null = normalize(&json!({ "center_card": null })).unwrap();
        assert!(null.center_card.is_none());

        assert_eq!(
            normalize(&json!({ "center_card": [1, 2] })),
            Err(ConfigError::CenterCardNotAnObject)
        );
    }

    #[test]
    fn test_normalize_coerces_scalars() {
        let raw = json!({
            "title": 5,
            "title_size_px": "30px",
            "overlay_opacity": "0.4",
            "big_icon_size": 150.9,
            "center_hide_more_info": "false",
        });
        let cfg = normalize(&raw).unwrap();
        assert_eq!(cfg.title, "5");
        assert_eq!(cfg.title_size_px, 30);
        assert!((cfg.overlay_opacity - 0.4).abs() < 1e-6);
        assert_eq!(cfg.big_icon_size, 150, "fractional sizes truncate, never round");
        assert!(!cfg.center_hide_more_info);
    }

    #[test]
    fn test_normalize_truncates_buttons() {
        let buttons: Vec<Value> = (0..12).map(|i| json!({ "label": format!("b{i}") })).collect();
        let cfg = normalize(&json!({ "buttons": buttons })).unwrap();
        assert_eq!(cfg.buttons.len(), MAX_BUTTONS, "slot list is capped at {MAX_BUTTONS}");
        assert_eq!(cfg.buttons[0].label, "b0", "truncation keeps stable order");
        assert_eq!(cfg.buttons[MAX_BUTTONS - 1].label, "b7");
    }

    #[test]
    fn test_normalize_ignores_deprecated_keys() {
        let raw = json!({
            "width": 800,
            "height": 600,
            "offset_left_px": 20,
            "center_show_name": true,
            "badge": { "mode": "temp_humidity_thresholds", "pos_right": 1, "pos_bottom": 2 },
        });
        let cfg = normalize(&raw).unwrap();
        let round = cfg.to_value();
        let obj = round.as_object().unwrap();
        for key in DEPRECATED_TOP_LEVEL_KEYS {
            assert!(!obj.contains_key(key), "deprecated key '{key}' must not survive");
        }
        let badge = obj["badge"].as_object().unwrap();
        for key in DEPRECATED_BADGE_KEYS {
            assert!(!badge.contains_key(key), "deprecated badge key '{key}' must not survive");
        }
        assert_eq!(cfg.badge.mode, BadgeMode::TempHumidityThresholds);
    }

    #[test]
    fn test_normalize_tap_actions() {
        let raw = json!({ "buttons": [
            { "tap": { "action": "toggle" } },
            { "tap": { "action": "navigate", "navigation_path": "/lovelace/0" } },
            { "tap": { "action": "navigate", "path": "/legacy" } },
            { "tap": { "action": "call-service", "service": "script.wake", "data": { "x": 1 } } },
            { "tap": { "action": "mystery" } },
            { "tap": { "action": "call-service" } },
        ]});
        let cfg = normalize(&raw).unwrap();
        assert_eq!(cfg.buttons[0].tap, TapAction::Toggle);
        assert_eq!(
            cfg.buttons[1].tap,
            TapAction::Navigate { navigation_path: "/lovelace/0".into() }
        );
        assert_eq!(
            cfg.buttons[2].tap,
            TapAction::Navigate { navigation_path: "/legacy".into() },
            "legacy 'path' key still resolves"
        );
        match &cfg.buttons[3].tap {
            TapAction::CallService { service, data } => {
                assert_eq!(service, "script.wake");
                assert_eq!(data.get("x"), Some(&json!(1)));
            }
            other => panic!("expected call-service, got {other:?}"),
        }
        assert_eq!(cfg.buttons[4].tap, TapAction::None, "unknown action kinds are inert");
        match &cfg.buttons[5].tap {
            TapAction::CallService { service, data } => {
                assert_eq!(service, "");
                assert!(data.is_empty(), "payload defaults to an empty object");
            }
            other => panic!("expected call-service, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_unknown_preset_is_generic_entity() {
        let cfg = normalize(&json!({ "center_preset": "vacuum" })).unwrap();
        assert_eq!(cfg.center_preset, CenterPreset::Entity);
    }

    #[test]
    fn test_normalize_idempotent_round_trip() {
        let raws = [
            json!({}),
            json!({ "title": "Kitchen", "badge": { "mode": "temp_humidity_thresholds" } }),
            json!({
                "title_size_px": "40",
                "center_preset": "light",
                "center_entity": "light.kitchen",
                "buttons": [
                    { "label": "Fan", "entity": "fan.bedroom", "tap": { "action": "toggle" } },
                    "garbage-entry",
                ],
                "center_show_name": false,
            }),
        ];
        for raw in raws {
            let once = normalize(&raw).unwrap();
            let twice = normalize(&once.to_value()).unwrap();
            assert_eq!(once, twice, "normalize must be idempotent for {raw}");
        }
    }

    #[test]
    fn test_stub_config_normalizes_to_itself() {
        let stub = PanelConfig::stub();
        assert_eq!(normalize(&stub.to_value()).unwrap(), stub);
    }
}
