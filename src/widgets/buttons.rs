//! The fixed 2x4 button grid on the right side of the stage.
//!
//! Placeholders draw nothing at all: an empty cell is indistinguishable from
//! background, but its rectangle is still reserved so neighbors never move.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, RoundedRectangle};
use embedded_graphics::text::Text;
use heapless::String as HString;

use crate::layout::{MAX_BUTTONS, SLOT_HEIGHT, SLOT_WIDTH};
use crate::slots::slot_rect;
use crate::styles::{self, CENTERED, DIM_GRAY, LABEL_STYLE_DIM, WHITE};
use crate::view::SlotView;

/// Corner radius of a slot's background.
const SLOT_CORNER: u32 = 10;

/// Slot background fill (semi-dark chip over the backdrop).
const SLOT_FILL: Rgb888 = Rgb888::new(30, 34, 40);

/// Longest label that fits one slot at the label font.
const LABEL_MAX: usize = 18;

/// Draw every occupied slot of the grid.
pub fn draw_buttons<D>(display: &mut D, slots: &[Option<SlotView>; MAX_BUTTONS])
where
    D: DrawTarget<Color = Rgb888>,
{
    for (index, slot) in slots.iter().enumerate() {
        if let Some(slot) = slot {
            draw_button(display, index, slot);
        }
    }
}

fn draw_button<D>(display: &mut D, index: usize, slot: &SlotView)
where
    D: DrawTarget<Color = Rgb888>,
{
    let rect = slot_rect(index);

    let chip = PrimitiveStyleBuilder::new().fill_color(SLOT_FILL).build();
    RoundedRectangle::with_equal_corners(rect, Size::new(SLOT_CORNER, SLOT_CORNER))
        .into_styled(chip)
        .draw(display)
        .ok();

    let icon_color = if slot.disabled {
        DIM_GRAY
    } else {
        styles::resolve_color(&slot.icon_color, WHITE)
    };
    let icon_pos = rect.top_left + Point::new(SLOT_WIDTH as i32 / 2, SLOT_HEIGHT as i32 / 2 - 10);
    let icon_style = MonoTextStyle::new(styles::SMALL_FONT, icon_color);
    Text::with_text_style(super::icon_label(&slot.icon), icon_pos, icon_style, CENTERED)
        .draw(display)
        .ok();

    let label_pos = rect.top_left + Point::new(SLOT_WIDTH as i32 / 2, SLOT_HEIGHT as i32 - 14);
    let label = truncate_label(&slot.label);
    if slot.disabled {
        Text::with_text_style(&label, label_pos, LABEL_STYLE_DIM, CENTERED)
            .draw(display)
            .ok();
    } else {
        let color = styles::resolve_color(&slot.text_color, WHITE);
        let style = MonoTextStyle::new(styles::LABEL_FONT, color);
        Text::with_text_style(&label, label_pos, style, CENTERED)
            .draw(display)
            .ok();
    }
}

/// Clip a label to the slot width. No ellipsis: the editor preview shows the
/// same clipping, so what you see is what you get.
fn truncate_label(label: &str) -> HString<LABEL_MAX> {
    let mut out = HString::new();
    for ch in label.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
