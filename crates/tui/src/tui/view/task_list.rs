use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap,
};

use crate::model::{ListView, Task};
use crate::tui::helpers::{accent_title, centered_rect, format_added_date, BG_ACCENT, BG_PANEL};

/// The tasks of one view, with a selectable cursor.
#[derive(Debug, Clone, Copy)]
pub struct TaskList<'a> {
    tasks: &'a [Task],
    view: ListView,
    focused: bool,
}

impl<'a> TaskList<'a> {
    pub fn new(tasks: &'a [Task], view: ListView) -> Self {
        Self {
            tasks,
            view,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn heading(&self) -> String {
        let active = self.tasks.iter().filter(|task| !task.is_done()).count();
        format!(
            "Tasks · {} ({} active / {} total)",
            self.view.label(),
            active,
            self.tasks.len()
        )
    }

    fn empty_hint(&self) -> &'static str {
        match self.view {
            ListView::All => "Nothing to do. Press 'a' to add a task.",
            ListView::Active => "All done! Nothing left on the list.",
            ListView::Done => "Nothing finished yet. Press Space on a task to complete it.",
        }
    }

    fn item(task: &Task) -> ListItem<'static> {
        let (checkbox, title_style) = if task.is_done() {
            (
                Span::styled("[x] ", Style::default().fg(Color::Green)),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            (
                Span::styled("[ ] ", Style::default().fg(Color::Gray)),
                Style::default().fg(Color::White),
            )
        };
        ListItem::new(Line::from(vec![
            checkbox,
            Span::styled(task.title.clone(), title_style),
            Span::styled(
                format!("  · added {}", format_added_date(&task.created_at)),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
    }
}

impl StatefulWidget for TaskList<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border = if self.focused {
            Color::Green
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&self.heading()))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(BG_PANEL));

        if self.tasks.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            if inner.width == 0 || inner.height == 0 {
                return;
            }
            let hint_area = centered_rect(inner.width.min(80), 1, inner);
            Paragraph::new(Span::styled(
                self.empty_hint(),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            ))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .render(hint_area, buf);
            return;
        }

        let items: Vec<ListItem> = self.tasks.iter().map(Self::item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        StatefulWidget::render(list, area, buf, state);
    }
}
