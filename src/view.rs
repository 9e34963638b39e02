//! Per-frame view model.
//!
//! [`build_view`] is a pure projection of `(PanelConfig, LiveState)` plus the
//! center lifecycle's mount status into exactly what the renderer draws.
//! Render-time floors and clamps live here, not in normalization: the
//! configuration keeps the user's literal values (the editor shows them
//! back), the view refuses to draw illegible ones.

use crate::config::{ButtonConfig, CenterPreset, PanelConfig, DEFAULT_BUTTON_ICON, DEFAULT_MAIN_ICON_COLOR};
use crate::layout::{
    CENTER_SCALE_MAX, CENTER_SCALE_MIN, MAIN_ICON_SIZE_MIN, MAX_BUTTONS, SUBTITLE_SIZE_MIN,
    TITLE_SIZE_MIN,
};
use crate::slots;
use crate::state::LiveState;
use crate::status::{self, Badge};

// =============================================================================
// View Types
// =============================================================================

/// Center column content for this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CenterView {
    /// No center control is configured; draw the main icon placeholder.
    Placeholder,
    /// Construction is in flight; draw nothing (the next frame catches up).
    Pending,
    /// A live widget is mounted; draw it at this effective scale.
    Mounted {
        /// Clamped scale multiplier.
        scale: f32,
    },
    /// Construction failed; draw the inline error placeholder.
    Failed,
}

/// One occupied button slot, fallbacks already applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotView {
    /// Button label.
    pub label: String,
    /// Icon to draw (never blank).
    pub icon: String,
    /// Icon color (never blank).
    pub icon_color: String,
    /// Label color, blank inherits the theme.
    pub text_color: String,
    /// Dimmed and inert.
    pub disabled: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelView {
    /// Room title.
    pub title: String,
    /// Title color, blank inherits the theme.
    pub title_color: String,
    /// Title size with the legibility floor applied.
    pub title_size_px: i32,
    /// Derived subtitle text (may be empty).
    pub subtitle: String,
    /// Subtitle color, blank inherits the theme.
    pub subtitle_color: String,
    /// Subtitle size with the legibility floor applied.
    pub subtitle_size_px: i32,

    /// Background image reference (may be empty).
    pub background_image: String,
    /// Dark overlay opacity.
    pub overlay_opacity: f32,

    /// Main icon, drawn when the center shows the placeholder.
    pub big_icon: String,
    /// Main icon color (never blank).
    pub big_icon_color: String,
    /// Main icon size with the floor applied.
    pub big_icon_size: i32,

    /// Status badge, if the threshold chain matched.
    pub badge: Option<Badge>,
    /// Center column content.
    pub center: CenterView,
    /// Fixed grid of slots; `None` cells are invisible placeholders.
    pub slots: [Option<SlotView>; MAX_BUTTONS],
}

// =============================================================================
// Projection
// =============================================================================

/// Effective center scale: the light multiplier applies only when the light
/// preset is actually the active source (a literal `center_card` overrides
/// the preset and takes the general scale). Clamped to the sane range.
pub fn effective_center_scale(cfg: &PanelConfig) -> f32 {
    let base = if cfg.center_card.is_none() && cfg.center_preset == CenterPreset::Light {
        cfg.center_light_scale
    } else {
        cfg.center_scale
    };
    base.clamp(CENTER_SCALE_MIN, CENTER_SCALE_MAX)
}

fn slot_view(button: &ButtonConfig, cfg: &PanelConfig) -> SlotView {
    let icon = if button.icon.is_empty() {
        DEFAULT_BUTTON_ICON
    } else {
        &button.icon
    };
    let icon_color = if !button.icon_color.is_empty() {
        &button.icon_color
    } else if !cfg.big_icon_color.is_empty() {
        &cfg.big_icon_color
    } else {
        DEFAULT_MAIN_ICON_COLOR
    };
    SlotView {
        label: button.label.clone(),
        icon: icon.to_string(),
        icon_color: icon_color.to_string(),
        text_color: button.text_color.clone(),
        disabled: button.disabled,
    }
}

/// Project one frame.
///
/// `center` comes from the coordinator, which is the only party that knows
/// the lifecycle's mount status; everything else derives from configuration
/// and live state right here.
pub fn build_view(cfg: &PanelConfig, state: &LiveState, center: CenterView) -> PanelView {
    let big_icon_color = if cfg.big_icon_color.is_empty() {
        DEFAULT_MAIN_ICON_COLOR.to_string()
    } else {
        cfg.big_icon_color.clone()
    };

    let mut slot_views: [Option<SlotView>; MAX_BUTTONS] = Default::default();
    for (cell, button) in slot_views.iter_mut().zip(slots::layout(&cfg.buttons)) {
        *cell = button.map(|b| slot_view(b, cfg));
    }

    PanelView {
        title: cfg.title.clone(),
        title_color: cfg.title_color.clone(),
        title_size_px: cfg.title_size_px.max(TITLE_SIZE_MIN),
        subtitle: status::subtitle_text(state, cfg),
        subtitle_color: cfg.subtitle_color.clone(),
        subtitle_size_px: cfg.subtitle_size_px.max(SUBTITLE_SIZE_MIN),
        background_image: cfg.background_image.clone(),
        overlay_opacity: cfg.overlay_opacity,
        big_icon: cfg.big_icon.clone(),
        big_icon_color,
        big_icon_size: cfg.big_icon_size.max(MAIN_ICON_SIZE_MIN),
        badge: status::badge(state, cfg),
        center,
        slots: slot_views,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
