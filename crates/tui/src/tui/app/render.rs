use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::constants::{APP_VERSION, HINT_BROWSE, HINT_COMPOSE, HINT_EDIT};
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, inset_rect, BG_BASE, BG_PANEL,
};
use crate::tui::view::{Child, CurrentDate, TaskForm, TaskList};

use super::{App, ConfirmChoice, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);

        let fragment = self.root.render();
        let mut constraints = fragment.constraints();
        constraints.push(Constraint::Length(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);

        for (child, area) in fragment.iter().zip(chunks.iter()) {
            self.draw_child(f, child, *area);
        }
        self.draw_footer(f, chunks[fragment.len()]);

        match self.input_mode {
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::ConfirmDelete => self.draw_confirm_overlay(f, size),
            InputMode::Browse | InputMode::Compose | InputMode::Edit => {}
        }
    }

    fn draw_child(&mut self, f: &mut Frame<'_>, child: &Child, area: Rect) {
        match child {
            Child::Title(title) => f.render_widget(title, area),
            Child::TaskForm => {
                let form = TaskForm::new(&self.input)
                    .focused(matches!(
                        self.input_mode,
                        InputMode::Compose | InputMode::Edit
                    ))
                    .editing(self.input_mode == InputMode::Edit);
                if let Some((x, y)) = form.cursor_position(area) {
                    f.set_cursor(x, y);
                }
                f.render_widget(form, area);
            }
            Child::CurrentDate => f.render_widget(CurrentDate::new(self.today), area),
            Child::TaskList => {
                let list = TaskList::new(&self.tasks, self.view)
                    .focused(self.input_mode == InputMode::Browse);
                f.render_stateful_widget(list, area, &mut self.list_state);
            }
        }
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let right = format!("v{} · {}", APP_VERSION, self.config.db_path().display());
        let right_width = min(right.chars().count() as u16 + 1, area.width / 2);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(right_width)])
            .split(area);

        let left = match &self.status {
            Some(status) => Line::from(Span::styled(status.text.clone(), status.style())),
            None => {
                let hint = match self.input_mode {
                    InputMode::Compose => HINT_COMPOSE,
                    InputMode::Edit => HINT_EDIT,
                    _ => HINT_BROWSE,
                };
                Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
            }
        };
        f.render_widget(Paragraph::new(left), cols[0]);
        f.render_widget(
            Paragraph::new(Span::styled(right, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Right),
            cols[1],
        );
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 70);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2));
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Keyboard reference"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);
        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(format!("{:<16}", combo), Style::default().fg(Color::Cyan)),
                    Span::raw(desc),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(20), 60).max(40);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Delete task"))
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let task_title = self
            .selected_task()
            .map(|task| task.title.as_str())
            .unwrap_or("selected task");

        let yes_style = if self.confirm_choice == ConfirmChoice::Yes {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        let no_style = if self.confirm_choice == ConfirmChoice::No {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let lines = vec![
            Line::from(Span::styled(
                "This action cannot be undone.",
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled(
                format!("Delete '{}'?", task_title),
                Style::default().fg(Color::White),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("  Yes  ", yes_style),
                Span::raw("    "),
                Span::styled("  No  ", no_style),
            ]),
        ];

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }
}
