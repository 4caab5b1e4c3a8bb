//! Adaptive dialog geometry.
//!
//! Recomputed before every dialog invocation, never cached: the terminal
//! may be resized while a previous screen was up.

use ratatui::layout::Rect;

use super::layout::centered_rect_abs;

pub const MIN_WIDTH: u16 = 80;
pub const MAX_WIDTH: u16 = 120;
pub const MIN_HEIGHT: u16 = 25;
pub const MAX_HEIGHT: u16 = 40;

/// Dialog box dimensions derived from the current terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometrySpec {
    pub width: u16,
    pub height: u16,
    /// Inner height available to list content.
    pub content_height: u16,
}

impl GeometrySpec {
    /// Pure function of the terminal size: width is 90% of the columns
    /// clamped to [80,120], height 80% of the rows clamped to [25,40],
    /// content height 60% of the resulting height.
    pub fn from_terminal((cols, rows): (u16, u16)) -> Self {
        let width = (u32::from(cols) * 90 / 100).clamp(MIN_WIDTH.into(), MAX_WIDTH.into()) as u16;
        let height = (u32::from(rows) * 80 / 100).clamp(MIN_HEIGHT.into(), MAX_HEIGHT.into()) as u16;
        let content_height = (u32::from(height) * 60 / 100) as u16;
        Self { width, height, content_height }
    }

    /// The centered on-screen rectangle for this dialog. Terminals smaller
    /// than the clamp minimum shrink the rectangle, not the computed
    /// dimensions.
    pub fn dialog_rect(&self, screen: Rect) -> Rect {
        centered_rect_abs(self.width, self.height, screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bounds_hold_for_all_terminal_sizes() {
        for cols in 0..400u16 {
            for rows in (0..200u16).step_by(3) {
                let g = GeometrySpec::from_terminal((cols, rows));
                assert!((MIN_WIDTH..=MAX_WIDTH).contains(&g.width), "cols={cols}");
                assert!((MIN_HEIGHT..=MAX_HEIGHT).contains(&g.height), "rows={rows}");
                assert!(g.content_height <= g.height);
            }
        }
    }

    #[test]
    fn width_and_height_are_monotone_in_terminal_size() {
        let mut prev = GeometrySpec::from_terminal((0, 0));
        for n in 1..400u16 {
            let g = GeometrySpec::from_terminal((n, n));
            assert!(g.width >= prev.width);
            assert!(g.height >= prev.height);
            prev = g;
        }
    }

    #[test]
    fn large_terminal_clamps_to_maximums() {
        let g = GeometrySpec::from_terminal((200, 50));
        assert_eq!(g.width, 120);
        assert_eq!(g.height, 40);
        assert_eq!(g.content_height, 24);
    }

    #[test]
    fn tiny_terminal_clamps_to_minimums() {
        let g = GeometrySpec::from_terminal((20, 10));
        assert_eq!(g.width, 80);
        assert_eq!(g.height, 25);
    }
}
