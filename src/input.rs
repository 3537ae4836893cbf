//! Input normalization: keyboard and pointer events, click targets, and
//! pixel → terminal cell conversion.

use ratzilla::ratatui::layout::Rect;

/// Keyboard, mouse and touch input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A press on a registered target. `col`/`row` is the cell that was hit;
    /// game logic only uses it for cosmetic placement.
    Click { action: u16, col: u16, row: u16 },
}

/// A screen region that triggers an action when pressed.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets registered by the last render, shared with the mouse handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// Register a full-width target on `row`, if the row lies inside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action under the given cell. Later registrations sit on top.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| {
                let r = t.rect;
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|t| t.action_id)
    }
}

/// Narrow screens stack panels vertically.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 80
}

/// Map one pixel axis onto `cells` equal slices of `extent` pixels.
fn pixel_to_index(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let index = (offset / (extent / cells as f64)) as u16;
    (index < cells).then_some(index)
}

/// Convert a pixel position relative to the grid's top-left corner into a
/// terminal `(col, row)`. `None` when outside the grid.
pub fn pixel_to_cell(
    x: f64,
    y: f64,
    grid_width: f64,
    grid_height: f64,
    cols: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    let col = pixel_to_index(x, grid_width, cols)?;
    let row = pixel_to_index(y, grid_height, rows)?;
    Some((col, row))
}
