//! Fixed stage layout constants.
//!
//! The panel targets one display: a 960x480 touch screen. Every region of the
//! stage is known at compile time, so positions and sizes are `const` and the
//! drawing code never recomputes layout per frame.
//!
//! # Stage Regions
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  TITLE / SUBTITLE (header)                           │  64px
//! ├────────────┬───────────────────────┬─────────────────┤
//! │  room icon │     center control    │  button grid    │
//! │  + halo    │     (embedded card)   │  2 cols x 4 rows│  374px
//! │  + badge   │                       │                 │
//! └────────────┴───────────────────────┴─────────────────┘
//!    240px             320px                340px
//! ```
//!
//! The badge position is a product invariant, not a configuration knob; it is
//! pinned relative to the stage and any legacy position keys are stripped
//! during normalization.

// =============================================================================
// Stage (virtual canvas)
// =============================================================================

/// Stage width in pixels. The engine always lays out against this canvas;
/// the viewport transform scales it onto the real display.
pub const STAGE_WIDTH: u32 = 960;

/// Stage height in pixels.
pub const STAGE_HEIGHT: u32 = 480;

/// Horizontal centering nudge in pixels, correcting a known asymmetry in the
/// target display's safe area. Applied after cover-fit centering.
pub const NUDGE_X: f32 = -30.0;

// =============================================================================
// Interactive Slot Grid
// =============================================================================

/// Hard cap on interactive slots. Configurations with more buttons are
/// truncated (stable order) at normalization time.
pub const MAX_BUTTONS: usize = 8;

/// Slot grid columns.
pub const SLOT_COLS: u32 = 2;

/// Slot grid rows.
pub const SLOT_ROWS: u32 = 4;

const _: () = assert!(MAX_BUTTONS == (SLOT_COLS * SLOT_ROWS) as usize);

// =============================================================================
// Outer Padding and Column Split
// =============================================================================

/// Horizontal stage padding.
pub const PAD_X: u32 = 16;

/// Top stage padding.
pub const PAD_TOP: u32 = 16;

/// Bottom stage padding.
pub const PAD_BOTTOM: u32 = 14;

/// Gap between the three body columns.
pub const COL_GAP: u32 = 14;

/// Gap between the header row and the body row.
pub const ROW_GAP: u32 = 12;

/// Extra left indent for the header text block.
pub const HEADER_INDENT: u32 = 40;

/// Header row height (title plus subtitle lines).
pub const HEADER_HEIGHT: u32 = 64;

/// Width of the left column (room icon and halo).
pub const LEFT_COL_WIDTH: u32 = 240;

/// Width of the right column (button grid).
pub const RIGHT_COL_WIDTH: u32 = 340;

/// Width of the middle column (center control mount).
/// Pre-computed so drawing code never does this subtraction per frame.
pub const CENTER_COL_WIDTH: u32 = STAGE_WIDTH - 2 * PAD_X - LEFT_COL_WIDTH - RIGHT_COL_WIDTH - 2 * COL_GAP;

/// Top edge of the body row (below header).
pub const BODY_Y: u32 = PAD_TOP + HEADER_HEIGHT + ROW_GAP;

/// Height of the body row.
pub const BODY_HEIGHT: u32 = STAGE_HEIGHT - BODY_Y - PAD_BOTTOM;

/// Left edge of the center column.
pub const CENTER_X: u32 = PAD_X + LEFT_COL_WIDTH + COL_GAP;

/// Left edge of the button grid column.
pub const BUTTONS_X: u32 = CENTER_X + CENTER_COL_WIDTH + COL_GAP;

// =============================================================================
// Slot Geometry
// =============================================================================

/// Gap between slots, both axes.
pub const SLOT_GAP: u32 = 10;

/// Slot width (two columns split the right column).
pub const SLOT_WIDTH: u32 = (RIGHT_COL_WIDTH - SLOT_GAP) / SLOT_COLS;

/// Slot height (four rows split the body height).
pub const SLOT_HEIGHT: u32 = (BODY_HEIGHT - (SLOT_ROWS - 1) * SLOT_GAP) / SLOT_ROWS;

// Grid must fit inside the stage
const _: () = assert!(BUTTONS_X + RIGHT_COL_WIDTH <= STAGE_WIDTH);
const _: () = assert!(BODY_Y + BODY_HEIGHT <= STAGE_HEIGHT);

// =============================================================================
// Badge (fixed position, not configurable)
// =============================================================================

/// Badge circle offset from the right edge of the left column.
pub const BADGE_RIGHT_PX: u32 = 12;

/// Badge circle offset from the bottom of the stage.
pub const BADGE_BOTTOM_PX: u32 = 220;

/// Badge circle diameter.
pub const BADGE_DIAMETER: u32 = 44;

/// Badge glyph size inside the circle.
pub const BADGE_ICON_SIZE: u32 = 24;

// =============================================================================
// Render-time Floors and Clamps
// =============================================================================

/// Minimum rendered title size in pixels.
pub const TITLE_SIZE_MIN: i32 = 12;

/// Minimum rendered subtitle size in pixels.
pub const SUBTITLE_SIZE_MIN: i32 = 10;

/// Minimum rendered main icon size in pixels.
pub const MAIN_ICON_SIZE_MIN: i32 = 96;

/// Center control scale clamp, lower bound.
pub const CENTER_SCALE_MIN: f32 = 0.75;

/// Center control scale clamp, upper bound.
pub const CENTER_SCALE_MAX: f32 = 1.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_fill_stage() {
        let total = 2 * PAD_X + LEFT_COL_WIDTH + CENTER_COL_WIDTH + RIGHT_COL_WIDTH + 2 * COL_GAP;
        assert_eq!(total, STAGE_WIDTH, "three columns plus gaps should span the stage");
    }

    #[test]
    fn test_slot_grid_fits_body() {
        let grid_w = SLOT_COLS * SLOT_WIDTH + (SLOT_COLS - 1) * SLOT_GAP;
        let grid_h = SLOT_ROWS * SLOT_HEIGHT + (SLOT_ROWS - 1) * SLOT_GAP;
        assert!(grid_w <= RIGHT_COL_WIDTH, "slot columns should fit the right column");
        assert!(grid_h <= BODY_HEIGHT, "slot rows should fit the body height");
    }

    #[test]
    fn test_badge_inside_stage() {
        assert!(BADGE_BOTTOM_PX + BADGE_DIAMETER <= STAGE_HEIGHT);
        assert!(BADGE_RIGHT_PX + BADGE_DIAMETER <= LEFT_COL_WIDTH);
    }
}
