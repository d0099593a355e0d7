use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthChar;

use crate::tui::buffer::TextBuffer;
use crate::tui::constants::{FORM_EDIT_TITLE, FORM_PLACEHOLDER, FORM_TITLE};
use crate::tui::helpers::{accent_title, BG_PANEL};

/// Bordered single-line input for capturing (or renaming) a task.
#[derive(Debug, Clone, Copy)]
pub struct TaskForm<'a> {
    buffer: &'a TextBuffer,
    focused: bool,
    editing: bool,
}

impl<'a> TaskForm<'a> {
    pub const HEIGHT: u16 = 3;

    pub fn new(buffer: &'a TextBuffer) -> Self {
        Self {
            buffer,
            focused: false,
            editing: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    /// Where the terminal cursor belongs, if the form has focus.
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        if !self.focused {
            return None;
        }
        let inner = Self::block_for(self.focused, self.editing).inner(area);
        if inner.width == 0 || inner.height == 0 {
            return None;
        }
        let (_, hidden) = self.scroll(inner.width);
        let visible = self.buffer.cursor_column().saturating_sub(hidden);
        Some((inner.x + visible as u16, inner.y))
    }

    /// Byte offset and cell count of the text hidden on the left so the cursor cell stays
    /// inside the box. Only whole glyphs are hidden.
    fn scroll(&self, width: u16) -> (usize, usize) {
        let width = usize::from(width.max(1));
        let overflow = self.buffer.cursor_column().saturating_sub(width - 1);
        let text = self.buffer.as_str();
        let mut hidden = 0;
        for (idx, ch) in text.char_indices() {
            if hidden >= overflow {
                return (idx, hidden);
            }
            hidden += ch.width().unwrap_or(0);
        }
        (text.len(), hidden)
    }

    fn block_for(focused: bool, editing: bool) -> Block<'static> {
        let border = if focused { Color::Green } else { Color::DarkGray };
        Block::default()
            .borders(Borders::ALL)
            .title(accent_title(if editing { FORM_EDIT_TITLE } else { FORM_TITLE }))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(BG_PANEL))
    }
}

impl Widget for TaskForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Self::block_for(self.focused, self.editing);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let line = if self.buffer.as_str().is_empty() {
            Line::from(Span::styled(
                FORM_PLACEHOLDER,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            let (offset, _) = self.scroll(inner.width);
            let visible = self.buffer.as_str()[offset..].to_string();
            Line::from(Span::styled(visible, Style::default().fg(Color::White)))
        };
        Paragraph::new(line).render(inner, buf);
    }
}
