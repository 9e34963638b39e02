//! Title and subtitle block at the top-left of the stage.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use profont::PROFONT_18_POINT;

use crate::layout::{HEADER_INDENT, PAD_TOP};
use crate::styles::{self, LEFT_ALIGNED, SUBTITLE_STYLE_WHITE, TITLE_STYLE_WHITE, WHITE};
use crate::view::PanelView;

// Pre-computed positions (baseline coordinates)
const TITLE_POS: Point = Point::new(HEADER_INDENT as i32, (PAD_TOP + 26) as i32);
const SUBTITLE_POS: Point = Point::new(HEADER_INDENT as i32, (PAD_TOP + 58) as i32);

/// Pick the title font for a requested pixel size. Mono fonts come in fixed
/// sizes; the floor in the view model guarantees the request is legible.
fn title_font_for(size_px: i32) -> &'static MonoFont<'static> {
    if size_px >= 24 { styles::TITLE_FONT } else { &PROFONT_18_POINT }
}

fn subtitle_font_for(size_px: i32) -> &'static MonoFont<'static> {
    if size_px >= 18 { styles::SUBTITLE_FONT } else { styles::LABEL_FONT }
}

/// Draw the title, and the subtitle line when it is non-empty.
///
/// The theme-default case (blank color, default-or-larger size) uses the
/// pre-computed white styles; anything else builds a style at draw time.
pub fn draw_header<D>(display: &mut D, view: &PanelView)
where
    D: DrawTarget<Color = Rgb888>,
{
    let title_style = if view.title_color.is_empty() && view.title_size_px >= 24 {
        TITLE_STYLE_WHITE
    } else {
        let color = styles::resolve_color(&view.title_color, WHITE);
        MonoTextStyle::new(title_font_for(view.title_size_px), color)
    };
    Text::with_text_style(&view.title, TITLE_POS, title_style, LEFT_ALIGNED)
        .draw(display)
        .ok();

    if view.subtitle.is_empty() {
        return;
    }
    let subtitle_style = if view.subtitle_color.is_empty() && view.subtitle_size_px >= 18 {
        SUBTITLE_STYLE_WHITE
    } else {
        let color = styles::resolve_color(&view.subtitle_color, WHITE);
        MonoTextStyle::new(subtitle_font_for(view.subtitle_size_px), color)
    };
    Text::with_text_style(&view.subtitle, SUBTITLE_POS, subtitle_style, LEFT_ALIGNED)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_font_steps_down_below_24px() {
        assert_eq!(title_font_for(26).character_size, styles::TITLE_FONT.character_size);
        assert_eq!(title_font_for(12).character_size, PROFONT_18_POINT.character_size);
    }

    #[test]
    fn test_const_styles_match_dynamic_path() {
        // The fast path must be indistinguishable from building the style
        // with the theme-default color.
        assert_eq!(TITLE_STYLE_WHITE.text_color, Some(WHITE));
        assert_eq!(TITLE_STYLE_WHITE.font.character_size, title_font_for(26).character_size);
        assert_eq!(SUBTITLE_STYLE_WHITE.text_color, Some(WHITE));
        assert_eq!(SUBTITLE_STYLE_WHITE.font.character_size, subtitle_font_for(20).character_size);
    }
}
