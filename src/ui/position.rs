use ratatui::layout::Rect;

/// Columns between the input and the popout.
const GAP: u16 = 1;

/// Places a `width` x `height` popout next to `anchor`.
///
/// Prefers the right-hand side, top-aligned with the input. Falls back to
/// directly below the input when the right side is too narrow, and is always
/// clamped inside `screen`.
pub fn place_popout(anchor: Rect, width: u16, height: u16, screen: Rect) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    let screen_right = screen.x.saturating_add(screen.width);
    let screen_bottom = screen.y.saturating_add(screen.height);

    let right_x = anchor.x.saturating_add(anchor.width).saturating_add(GAP);
    let (x, y) = if right_x.saturating_add(width) <= screen_right {
        (right_x, anchor.y)
    } else {
        (anchor.x, anchor.y.saturating_add(anchor.height))
    };

    let x = x.min(screen_right - width).max(screen.x);
    let y = y.min(screen_bottom - height).max(screen.y);
    Rect::new(x, y, width, height)
}
