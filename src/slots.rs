//! Fixed slot grid for the interactive buttons.
//!
//! The grid always has [`MAX_BUTTONS`] cells (2 columns x 4 rows, row-major).
//! Shorter button lists are right-padded with placeholders so the grid
//! geometry never reflows while the user edits fewer than eight buttons; a
//! placeholder occupies its cell but is invisible and excluded from
//! interaction.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::config::ButtonConfig;
use crate::layout::{BODY_Y, BUTTONS_X, MAX_BUTTONS, SLOT_COLS, SLOT_GAP, SLOT_HEIGHT, SLOT_WIDTH};

// =============================================================================
// Grid Layout
// =============================================================================

/// Map a button list onto the fixed grid.
///
/// Input beyond [`MAX_BUTTONS`] is truncated (normalization already caps the
/// list, this guards direct callers); indices beyond the input length are
/// placeholders (`None`).
pub fn layout(buttons: &[ButtonConfig]) -> [Option<&ButtonConfig>; MAX_BUTTONS] {
    let mut slots: [Option<&ButtonConfig>; MAX_BUTTONS] = [None; MAX_BUTTONS];
    for (slot, button) in slots.iter_mut().zip(buttons.iter()) {
        *slot = Some(button);
    }
    slots
}

/// Stage-space rectangle of one slot. Row-major: slot 0 is the top-left
/// cell, slot 1 its right neighbor.
pub const fn slot_rect(index: usize) -> Rectangle {
    let col = (index as u32) % SLOT_COLS;
    let row = (index as u32) / SLOT_COLS;
    Rectangle::new(
        Point::new(
            (BUTTONS_X + col * (SLOT_WIDTH + SLOT_GAP)) as i32,
            (BODY_Y + row * (SLOT_HEIGHT + SLOT_GAP)) as i32,
        ),
        Size::new(SLOT_WIDTH, SLOT_HEIGHT),
    )
}

// =============================================================================
// Hit Testing
// =============================================================================

/// Find the occupied slot under a stage-space point.
///
/// Placeholders are unreachable: a point inside an empty cell returns
/// `None`. Disabled buttons still hit (the dispatcher skips them), matching
/// a visible-but-inert button.
pub fn hit_test(buttons: &[ButtonConfig], stage_point: Point) -> Option<usize> {
    let slots = layout(buttons);
    (0..MAX_BUTTONS).find(|&i| slots[i].is_some() && contains(&slot_rect(i), stage_point))
}

/// `Rectangle::contains` without the trait import, usable in const-adjacent
/// call sites.
fn contains(rect: &Rectangle, p: Point) -> bool {
    let br = rect.top_left + Point::new(rect.size.width as i32, rect.size.height as i32);
    p.x >= rect.top_left.x && p.y >= rect.top_left.y && p.x < br.x && p.y < br.y
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(n: usize) -> Vec<ButtonConfig> {
        (0..n)
            .map(|i| ButtonConfig {
                label: format!("b{i}"),
                ..ButtonConfig::default()
            })
            .collect()
    }

    #[test]
    fn test_layout_pads_short_lists() {
        let buttons = labeled(3);
        let slots = layout(&buttons);
        assert_eq!(slots.len(), MAX_BUTTONS, "grid size is always {MAX_BUTTONS}");
        for i in 0..3 {
            assert_eq!(slots[i].unwrap().label, format!("b{i}"));
        }
        for slot in &slots[3..] {
            assert!(slot.is_none(), "indices beyond input are placeholders");
        }
    }

    #[test]
    fn test_layout_empty_list_is_all_placeholders() {
        let slots = layout(&[]);
        assert!(slots.iter().all(Option::is_none));
    }

    #[test]
    fn test_layout_truncates_long_lists() {
        let buttons = labeled(12);
        let slots = layout(&buttons);
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(slot.unwrap().label, format!("b{i}"), "first {MAX_BUTTONS} kept in order");
        }
    }

    #[test]
    fn test_slot_rects_are_disjoint() {
        for i in 0..MAX_BUTTONS {
            for j in (i + 1)..MAX_BUTTONS {
                let a = slot_rect(i);
                let b = slot_rect(j);
                let overlap = a.intersection(&b);
                assert_eq!(overlap.size.width * overlap.size.height, 0, "slots {i} and {j} overlap");
            }
        }
    }

    #[test]
    fn test_slot_rects_row_major() {
        let s0 = slot_rect(0);
        let s1 = slot_rect(1);
        let s2 = slot_rect(2);
        assert_eq!(s0.top_left.y, s1.top_left.y, "slots 0 and 1 share a row");
        assert!(s1.top_left.x > s0.top_left.x, "slot 1 is right of slot 0");
        assert!(s2.top_left.y > s0.top_left.y, "slot 2 starts the second row");
        assert_eq!(s2.top_left.x, s0.top_left.x);
    }

    #[test]
    fn test_hit_test_occupied_slot() {
        let buttons = labeled(2);
        let center = slot_rect(1).top_left + Point::new(5, 5);
        assert_eq!(hit_test(&buttons, center), Some(1));
    }

    #[test]
    fn test_hit_test_placeholder_is_unreachable() {
        let buttons = labeled(2);
        let inside_empty = slot_rect(5).top_left + Point::new(5, 5);
        assert_eq!(
            hit_test(&buttons, inside_empty),
            None,
            "placeholders must be excluded from interaction"
        );
    }

    #[test]
    fn test_hit_test_outside_grid() {
        let buttons = labeled(8);
        assert_eq!(hit_test(&buttons, Point::new(0, 0)), None);
    }

    #[test]
    fn test_hit_test_gap_between_slots() {
        let buttons = labeled(8);
        let r0 = slot_rect(0);
        let in_gap = Point::new(r0.top_left.x + r0.size.width as i32 + 2, r0.top_left.y + 5);
        assert_eq!(hit_test(&buttons, in_gap), None, "gaps between slots do not hit");
    }
}
