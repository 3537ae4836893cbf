//! Clickable UI components.
//!
//! Each component renders and registers its click targets in one place, so
//! a label can never drift away from the row that reacts to it.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A single-row tab strip. Every label gets a click target spanning its own
/// width plus the separator that follows it.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Column spans `(start, width, action_id)` of each tab relative to the
    /// start of the row.
    fn spans(&self) -> Vec<(u16, u16, u16)> {
        let sep_width = Line::from(self.separator).width() as u16;
        let mut cursor = 0u16;
        let mut out = Vec::with_capacity(self.tabs.len());
        for (i, (label, _, action_id)) in self.tabs.iter().enumerate() {
            let width = Line::from(format!(" {} ", label)).width() as u16;
            let trailing = if i + 1 < self.tabs.len() { sep_width } else { 0 };
            out.push((cursor, width + trailing, *action_id));
            cursor += width + trailing;
        }
        out
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let spans = self.spans();

        let mut line = Vec::new();
        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                line.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            line.push(Span::styled(format!(" {} ", label), *style));
        }
        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(line)).block(block),
            None => Paragraph::new(Line::from(line)),
        };
        f.render_widget(paragraph, area);

        let right_edge = inner.x + inner.width;
        for (start, width, action_id) in spans {
            let x = inner.x.saturating_add(start);
            if x >= right_edge {
                break;
            }
            let w = width.min(right_edge - x);
            cs.add_click_target(Rect::new(x, area.y, w, area.height.max(1)), action_id);
        }
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with optional action ids. Targets follow their line, so
/// inserting a header above a row never misaligns the row's target.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register row targets for a widget drawn into `area` without wrapping.
    /// `top_offset`/`bottom_offset` are border rows.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let first = area.y + top_offset;
        let end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = first + line_idx;
            if row < end {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}
