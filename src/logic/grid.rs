//! Grid geometry and cursor movement for the batch results
//!
//! Items are laid out row-major; the column count follows the available
//! width (two columns on narrow panes, three once there is room).

/// Minimum width in cells for one item card
pub const MIN_CARD_WIDTH: u16 = 22;

/// Card height in rows (borders + URL + hint + download control)
pub const CARD_HEIGHT: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    First,
    Last,
}

/// Number of grid columns for a pane of `width` cells
pub fn grid_columns(width: u16) -> usize {
    if width >= MIN_CARD_WIDTH * 3 {
        3
    } else {
        2
    }
}

/// Move the grid cursor, clamping at the edges
///
/// Returns `None` only when the grid is empty. A missing cursor lands on the
/// first item.
pub fn move_cursor(
    current: Option<usize>,
    len: usize,
    columns: usize,
    direction: Direction,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let columns = columns.max(1);
    let Some(current) = current.filter(|c| *c < len) else {
        return Some(0);
    };

    let next = match direction {
        Direction::Up => current.checked_sub(columns).unwrap_or(current),
        Direction::Down => {
            let below = current + columns;
            if below < len {
                below
            } else {
                current
            }
        }
        Direction::Left => {
            if current % columns == 0 {
                current
            } else {
                current - 1
            }
        }
        Direction::Right => {
            if (current + 1) % columns == 0 || current + 1 >= len {
                current
            } else {
                current + 1
            }
        }
        Direction::First => 0,
        Direction::Last => len - 1,
    };

    Some(next)
}

/// First row to draw so the cursor row stays visible
pub fn scroll_offset(cursor: Option<usize>, columns: usize, visible_rows: usize) -> usize {
    let Some(cursor) = cursor else {
        return 0;
    };
    let row = cursor / columns.max(1);
    let visible_rows = visible_rows.max(1);
    (row + 1).saturating_sub(visible_rows)
}
