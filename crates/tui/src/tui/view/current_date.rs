use chrono::NaiveDate;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::tui::constants::DATE_FORMAT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentDate {
    date: NaiveDate,
}

impl CurrentDate {
    pub const HEIGHT: u16 = 1;

    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl Widget for CurrentDate {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled("📅 ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.text(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
