//! Center column content.
//!
//! The engine only draws the states it owns: the main-icon placeholder, the
//! pending gap, and the inline failure notice. A mounted widget is the
//! host's to draw; this module just frames the area it gets.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::layout::{BODY_HEIGHT, BODY_Y, CENTER_COL_WIDTH, CENTER_X};
use crate::styles::{CENTERED, ERROR_STYLE};
use crate::view::{CenterView, PanelView};
use crate::widgets::room_icon;

/// Stage rectangle reserved for the center control.
pub const CENTER_RECT: Rectangle = Rectangle::new(
    Point::new(CENTER_X as i32, BODY_Y as i32),
    Size::new(CENTER_COL_WIDTH, BODY_HEIGHT),
);

/// Failure notice shown in place of a center control that would not load.
const FAILURE_NOTICE: &str = "control failed to load";

/// Dim outline marking where the mounted widget draws.
const MOUNT_FRAME: Rgb888 = Rgb888::new(50, 56, 64);

/// Draw the center column for this frame.
pub fn draw_center<D>(display: &mut D, view: &PanelView)
where
    D: DrawTarget<Color = Rgb888>,
{
    match view.center {
        CenterView::Placeholder => room_icon::draw_room_icon(display, view),
        // Construction in flight: leave the column empty for this frame
        CenterView::Pending => {}
        CenterView::Mounted { scale } => {
            let frame = scaled_frame(scale);
            frame
                .into_styled(PrimitiveStyle::with_stroke(MOUNT_FRAME, 1))
                .draw(display)
                .ok();
        }
        CenterView::Failed => {
            let center = CENTER_RECT.top_left
                + Point::new(CENTER_COL_WIDTH as i32 / 2, BODY_HEIGHT as i32 / 2);
            Text::with_text_style(FAILURE_NOTICE, center, ERROR_STYLE, CENTERED)
                .draw(display)
                .ok();
        }
    }
}

/// The mount frame scaled about the column center.
fn scaled_frame(scale: f32) -> Rectangle {
    let w = (CENTER_COL_WIDTH as f32 * scale) as u32;
    let h = (BODY_HEIGHT as f32 * scale) as u32;
    let center = CENTER_RECT.top_left
        + Point::new(CENTER_COL_WIDTH as i32 / 2, BODY_HEIGHT as i32 / 2);
    Rectangle::with_center(center, Size::new(w, h))
}
