//! Derived visual status: subtitle text and the threshold badge.
//!
//! Both functions are pure over `(PanelConfig, LiveState)` and are recomputed
//! on every render, never cached.
//!
//! # The Coercion Asymmetry
//!
//! Subtitle display coerces malformed readings to `0` so the text stays
//! stable; badge thresholds treat them as *no reading* (`None`), so an absent
//! sensor can never fake its way past a threshold. The asymmetry is
//! intentional and load-bearing: do not unify the two paths.

use crate::config::{BadgeMode, PanelConfig};
use crate::state::{LiveState, parse_leading_int_or};

// =============================================================================
// Subtitle
// =============================================================================

/// Delimiter between subtitle parts.
const SUBTITLE_DELIMITER: &str = " | ";

/// Build the subtitle from the configured environment entities.
///
/// Zero to two parts: `"21ºC"`, `"54%"`, joined with `" | "`. A blank entity
/// reference omits its part; malformed readings display as `0`.
pub fn subtitle_text(state: &LiveState, cfg: &PanelConfig) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(2);
    if !cfg.env_temp_entity.is_empty() {
        let t = parse_leading_int_or(state.state_str(&cfg.env_temp_entity), 0);
        parts.push(format!("{t}ºC"));
    }
    if !cfg.env_humidity_entity.is_empty() {
        let h = parse_leading_int_or(state.state_str(&cfg.env_humidity_entity), 0);
        parts.push(format!("{h}%"));
    }
    parts.join(SUBTITLE_DELIMITER)
}

// =============================================================================
// Badge
// =============================================================================

/// Resolved badge: icon plus circle color, both passed through to the
/// renderer as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    /// Icon name (glyph stays white; the circle carries the color).
    pub icon: String,
    /// Circle color.
    pub color: String,
}

/// Evaluate the status badge.
///
/// Only the threshold mode produces a badge. The priority chain is fixed,
/// first match wins:
/// 1. humidity ≥ `humidity_high`
/// 2. temperature ≥ `temp_hot`
/// 3. temperature ≤ `temp_cold`
///
/// Readings come from [`LiveState::reading`]; `None` never matches, so
/// missing or non-numeric sensors cannot raise a badge.
pub fn badge(state: &LiveState, cfg: &PanelConfig) -> Option<Badge> {
    if cfg.badge.mode != BadgeMode::TempHumidityThresholds {
        return None;
    }

    let b = &cfg.badge;
    let temp = state.reading(&cfg.env_temp_entity);
    let humidity = state.reading(&cfg.env_humidity_entity);

    if humidity.is_some_and(|h| h >= b.humidity_high) {
        return Some(badge_case(&b.icon_humidity, "mdi:water", &b.color_humidity, cfg));
    }
    if temp.is_some_and(|t| t >= b.temp_hot) {
        return Some(badge_case(&b.icon_hot, "mdi:fire", &b.color_hot, cfg));
    }
    if temp.is_some_and(|t| t <= b.temp_cold) {
        return Some(badge_case(&b.icon_cold, "mdi:snowflake", &b.color_cold, cfg));
    }
    None
}

/// Fill one badge case, falling back icon → fixed default and
/// color → main icon color when overrides are blank.
fn badge_case(icon: &str, icon_fallback: &str, color: &str, cfg: &PanelConfig) -> Badge {
    let icon = if icon.is_empty() { icon_fallback } else { icon };
    let color = if color.is_empty() {
        if cfg.big_icon_color.is_empty() {
            crate::config::DEFAULT_MAIN_ICON_COLOR
        } else {
            &cfg.big_icon_color
        }
    } else {
        color
    };
    Badge {
        icon: icon.to_string(),
        color: color.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
