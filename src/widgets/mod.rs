//! Widget components for the room panel display.
//!
//! This module organizes the visual components into logical submodules:
//!
//! - [`header`]: Title and subtitle block
//! - [`room_icon`]: Main room icon placeholder and the status badge
//! - [`buttons`]: The fixed 2x4 button grid
//! - [`center`]: Center column content (placeholder / pending / error frame)
//!
//! # Coordinate Space
//!
//! All widgets draw in stage coordinates (960x480). A host whose display is
//! not stage-sized applies [`crate::geometry::StageTransform`] to input; the
//! simulator binary simply uses a stage-sized display.
//!
//! # Icons
//!
//! Icon references (`mdi:home`) arrive as strings. The drawing layer has no
//! vector icon set, so icons render as their short name in the icon color,
//! inside whatever shape the widget defines. Hosts with a real icon font can
//! draw over the same geometry.
//!
//! All drawing is fallible-but-ignored: a draw error on one widget must not
//! take down the frame, so every `.draw()` ends in `.ok()`.

mod buttons;
mod center;
mod header;
mod room_icon;

pub use buttons::draw_buttons;
pub use center::draw_center;
pub use header::draw_header;
pub use room_icon::{draw_badge, draw_room_icon};

use embedded_graphics::pixelcolor::Rgb888;

/// Stand-in for the background image plus dark overlay: a flat backdrop
/// whose brightness falls with the overlay opacity.
pub fn backdrop_color(overlay_opacity: f32) -> Rgb888 {
    let opacity = overlay_opacity.clamp(0.0, 1.0);
    let v = ((1.0 - opacity) * 72.0) as u8;
    Rgb888::new(v, v, v)
}

/// Short display name of an icon reference (`mdi:home` -> `home`).
pub(crate) fn icon_label(icon: &str) -> &str {
    icon.strip_prefix("mdi:").unwrap_or(icon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::RgbColor;

    #[test]
    fn test_icon_label_strips_prefix() {
        assert_eq!(icon_label("mdi:water"), "water");
        assert_eq!(icon_label("custom"), "custom");
    }

    #[test]
    fn test_backdrop_darkens_with_opacity() {
        let light = backdrop_color(0.0);
        let dark = backdrop_color(1.0);
        assert!(light.r() > dark.r());
        assert_eq!(dark, Rgb888::new(0, 0, 0));
        // Out-of-range opacities clamp instead of wrapping
        assert_eq!(backdrop_color(5.0), dark);
    }
}
