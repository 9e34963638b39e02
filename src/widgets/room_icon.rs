//! Main room icon placeholder and the status badge.
//!
//! The room icon fills the center column when no center control is
//! configured: a stroked circle halo in the icon color with the icon's short
//! name inside. The badge is a small filled circle pinned to the stage's
//! right edge; its position is a design invariant, not configuration.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder};
use embedded_graphics::text::Text;

use crate::layout::{
    BADGE_BOTTOM_PX, BADGE_DIAMETER, BADGE_RIGHT_PX, BODY_HEIGHT, BODY_Y, CENTER_COL_WIDTH,
    CENTER_X, STAGE_HEIGHT, STAGE_WIDTH,
};
use crate::status::Badge;
use crate::styles::{self, CENTERED, LABEL_STYLE_WHITE, TEAL};
use crate::view::PanelView;
use crate::widgets::icon_label;

/// Center of the icon halo: middle of the center column.
const ICON_CENTER: Point = Point::new(
    (CENTER_X + CENTER_COL_WIDTH / 2) as i32,
    (BODY_Y + BODY_HEIGHT / 2) as i32,
);

/// Top-left of the badge circle, pinned right/bottom.
const BADGE_TOP_LEFT: Point = Point::new(
    (STAGE_WIDTH - BADGE_RIGHT_PX - BADGE_DIAMETER) as i32,
    (STAGE_HEIGHT - BADGE_BOTTOM_PX - BADGE_DIAMETER) as i32,
);

/// Draw the main icon placeholder at the view's (floored) size.
pub fn draw_room_icon<D>(display: &mut D, view: &PanelView)
where
    D: DrawTarget<Color = Rgb888>,
{
    let color = styles::resolve_color(&view.big_icon_color, TEAL);
    let diameter = view.big_icon_size as u32;
    let halo = PrimitiveStyleBuilder::new().stroke_color(color).stroke_width(4).build();

    Circle::with_center(ICON_CENTER, diameter)
        .into_styled(halo)
        .draw(display)
        .ok();

    let glyph_style = embedded_graphics::mono_font::MonoTextStyle::new(styles::SUBTITLE_FONT, color);
    Text::with_text_style(icon_label(&view.big_icon), ICON_CENTER, glyph_style, CENTERED)
        .draw(display)
        .ok();
}

/// Draw the status badge, if the threshold chain matched this frame.
///
/// The circle carries the badge color; the glyph stays white.
pub fn draw_badge<D>(display: &mut D, badge: Option<&Badge>)
where
    D: DrawTarget<Color = Rgb888>,
{
    let Some(badge) = badge else { return };

    let fill = styles::resolve_color(&badge.color, TEAL);
    Circle::new(BADGE_TOP_LEFT, BADGE_DIAMETER)
        .into_styled(PrimitiveStyle::with_fill(fill))
        .draw(display)
        .ok();

    let center = BADGE_TOP_LEFT + Point::new(BADGE_DIAMETER as i32 / 2, BADGE_DIAMETER as i32 / 2);
    // One-letter glyph stand-in for the icon (w / f / s)
    let glyph = icon_label(&badge.icon).get(0..1).unwrap_or("?");
    Text::with_text_style(glyph, center, LABEL_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}
