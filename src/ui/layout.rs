use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Header / body / footer split used by the full-size dialogs.
pub struct ThreeBox {
    pub top: Rect,
    pub middle: Rect,
    pub bottom: Rect,
    pub top_inner: Rect,
    pub middle_inner: Rect,
    pub bottom_inner: Rect,
}

pub struct Margins {
    pub page: u16,         // outer page margin
    pub inner_top: u16,    // inner margin for the header box
    pub inner_middle: u16, // inner margin for the body box
    pub inner_bottom: u16, // inner margin for the footer box
}

pub fn three_box_layout(
    size: Rect,
    top_needed: u16,
    footer_height: u16,
    margins: Margins,
) -> ThreeBox {
    let available = size
        .height
        .saturating_sub(2 * margins.page)
        .saturating_sub(footer_height);

    let top_min = 4;
    let top_height = top_needed.max(top_min).min(available.saturating_sub(3));
    let middle_height = available.saturating_sub(top_height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(margins.page)
        .constraints([
            Constraint::Length(top_height),
            Constraint::Length(middle_height),
            Constraint::Length(footer_height),
        ])
        .split(size);

    let top_inner = chunks[0].inner(&Margin { horizontal: margins.inner_top, vertical: 1 });
    let middle_inner = chunks[1].inner(&Margin { horizontal: margins.inner_middle, vertical: 1 });
    let bottom_inner = chunks[2].inner(&Margin { horizontal: margins.inner_bottom, vertical: 1 });

    ThreeBox {
        top: chunks[0],
        middle: chunks[1],
        bottom: chunks[2],
        top_inner,
        middle_inner,
        bottom_inner,
    }
}

/// Center a box of absolute size within `r`, shrinking when `r` is smaller.
pub fn centered_rect_abs(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect { x, y, width: w, height: h }
}
